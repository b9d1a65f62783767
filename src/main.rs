use std::path::{ Path, PathBuf };
use std::process;

use clap::{ Parser, Subcommand, ValueEnum };
use log::LevelFilter;

use ray_kernel::canvas::Canvas;
use ray_kernel::consts::*;
use ray_kernel::demo::{ clock, projectile_trace, sphere_silhouette };
use ray_kernel::scene::Scene;
use ray_kernel::Result;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> LevelFilter {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Renders the ray kernel's demo images as PPM files.
#[derive(Parser)]
#[clap(name = "ray-kernel", version)]
struct Cli {
    /// Logging verbosity; RUST_LOG filters still apply
    #[clap(long, global = true, value_enum, default_value = "info")]
    log_level: LogLevel,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Twelve hour marks of a clock face
    Clock {
        #[clap(short, long, value_parser, default_value = CLOCK_OUT_FILE)]
        output: PathBuf,
    },

    /// The trajectory of a projectile under gravity and wind
    Projectile {
        #[clap(short, long, value_parser, default_value = PROJECTILE_OUT_FILE)]
        output: PathBuf,
    },

    /// The hit mask of a squashed, sheared sphere
    Silhouette {
        #[clap(short, long, value_parser, default_value = SILHOUETTE_OUT_FILE)]
        output: PathBuf,
    },

    /// A Phong-shaded sphere, optionally described by a JSON scene file
    Sphere {
        #[clap(short, long, value_parser)]
        scene: Option<PathBuf>,

        #[clap(short, long, value_parser, default_value = SPHERE_OUT_FILE)]
        output: PathBuf,
    },
}

fn save(canvas: &Canvas, output: &Path) -> Result<()> {
    canvas.save(output)?;
    log::info!("wrote {}x{} image to {}",
        canvas.width, canvas.height, output.display());

    Ok(())
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Clock { output } => {
            save(&clock(CLOCK_CANVAS_SIZE), &output)
        },
        Command::Projectile { output } => {
            let canvas = projectile_trace(PROJECTILE_CANVAS_WIDTH,
                PROJECTILE_CANVAS_HEIGHT);
            save(&canvas, &output)
        },
        Command::Silhouette { output } => {
            save(&sphere_silhouette(SILHOUETTE_CANVAS_PIXELS), &output)
        },
        Command::Sphere { scene, output } => {
            let scene = match scene {
                Some(path) => Scene::load(&path)?,
                None => Scene::default(),
            };

            save(&scene.render(), &output)
        },
    }
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(cli.log_level.into())
        .init();

    if let Err(e) = run(cli.command) {
        log::error!("{}", e);
        process::exit(1);
    }
}
