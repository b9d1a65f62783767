use std::fs;
use std::io;
use std::path::Path;

use crate::color::Color;
use crate::consts::{ PPM_LINE_WIDTH, PPM_MAX_COLOR };
use crate::math::ulround;

/// A canvas for drawing pixels.
///
/// This structure stores the colors produced by the drivers, one per pixel.
/// Once drawing finishes, the `Canvas` can be encoded as a plain-text PPM
/// image and saved to a file.
///
/// Pixels are addressed by `(x, y)`, where `x` is the column and `y` is the
/// row, both zero-indexed from the top-left corner.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector of rows.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new canvas with specified width and height.
    ///
    /// Every pixel starts out black.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Canvas {
        let len = width.checked_mul(height).unwrap_or_else(|| {
            panic!("a {}x{} canvas has too many pixels", width, height)
        });

        Canvas {
            width,
            height,
            pixels: vec![Color::black(); len]
        }
    }

    /// Whether a signed pixel coordinate lies on the canvas.
    ///
    /// Drivers which map world coordinates to pixels may land off the canvas
    /// on either side; this checks before converting to `usize`.
    pub fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64
            && (y as u64) < self.height as u64
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. Pixels are specified in column-row
    /// order, where `x` is the column of the pixel, and `y` is the row.
    ///
    /// # Examples
    ///
    /// Writing a pixel to the fourth column, second row on an 8-by-8 canvas:
    ///
    /// ```
    /// # use ray_kernel::color::Color;
    /// # use ray_kernel::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, purple);
    /// assert_eq!(canvas.read_pixel(4, 2), Some(purple));
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: Color) {
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// If the specified pixel location is out-of-bounds, `None` is returned.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Encodes the canvas as a PPM (P3) image.
    ///
    /// The header is followed by one block of lines per canvas row. Channels
    /// are clamped to `0.0..=1.0`, scaled to 255 and rounded. No line exceeds
    /// 70 columns; a value which would cross that mark starts the next line.
    /// Every row ends with a newline, so the output does too. A canvas with
    /// no pixels produces only the header.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ray_kernel::color::Color;
    /// # use ray_kernel::canvas::Canvas;
    /// let mut canvas = Canvas::new(2, 1);
    /// canvas.write_pixel(1, 0, Color::rgb(1.5, 0.5, -1.0));
    /// assert_eq!(canvas.to_ppm(), "P3\n2 1\n255\n0 0 0 255 128 0\n");
    /// ```
    pub fn to_ppm(&self) -> String {
        let mut out = format!("P3\n{} {}\n{}\n",
            self.width, self.height, PPM_MAX_COLOR);

        if self.pixels.is_empty() {
            return out;
        }

        for row in self.pixels.chunks(self.width) {
            let mut line = String::new();

            for pixel in row {
                for channel in [pixel.red, pixel.green, pixel.blue] {
                    let value = scale_channel(channel).to_string();

                    // Move values crossing the 70 column mark to a new line
                    if !line.is_empty() {
                        if line.len() + 1 + value.len() > PPM_LINE_WIDTH {
                            out.push_str(&line);
                            out.push('\n');
                            line.clear();
                        } else {
                            line.push(' ');
                        }
                    }

                    line.push_str(&value);
                }
            }

            out.push_str(&line);
            out.push('\n');
        }

        out
    }

    /// Saves a canvas to a PPM file.
    ///
    /// See `to_ppm` for the format.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_ppm())
    }
}

fn scale_channel(channel: f64) -> usize {
    if channel.is_nan() {
        return 0;
    }

    ulround(channel.clamp(0.0, 1.0) * PPM_MAX_COLOR)
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.width, 10);
    assert_eq!(c.height, 20);
    for y in 0..c.height {
        for x in 0..c.width {
            assert_eq!(c.read_pixel(x, y), Some(Color::black()));
        }
    }
}

#[test]
#[should_panic(expected = "too many pixels")]
fn overflowing_canvas_size() {
    Canvas::new(usize::MAX, 2);
}

#[test]
fn write_and_read_pixel() {
    let mut c = Canvas::new(10, 20);
    let red = Color::rgb(1.0, 0.0, 0.0);

    c.write_pixel(2, 3, red);
    assert_eq!(c.read_pixel(2, 3), Some(red));
    assert_eq!(c.read_pixel(3, 2), Some(Color::black()));
}

#[test]
fn out_of_bounds_pixels() {
    let mut c = Canvas::new(4, 3);
    let before = c.clone();

    c.write_pixel(4, 0, Color::white());
    c.write_pixel(0, 3, Color::white());
    assert_eq!(c, before);

    assert_eq!(c.read_pixel(4, 0), None);
    assert_eq!(c.read_pixel(0, 3), None);
}

#[test]
fn signed_bounds() {
    let c = Canvas::new(4, 3);

    assert!(c.in_bounds(0, 0));
    assert!(c.in_bounds(3, 2));
    assert!(!c.in_bounds(-1, 0));
    assert!(!c.in_bounds(0, -1));
    assert!(!c.in_bounds(4, 0));
    assert!(!c.in_bounds(0, 3));
}

#[test]
fn ppm_header() {
    let ppm = Canvas::new(5, 3).to_ppm();

    assert!(ppm.starts_with("P3\n5 3\n255\n"));
}

#[test]
fn ppm_pixel_data() {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, Color::rgb(1.5, 0.0, 0.0));
    c.write_pixel(2, 1, Color::rgb(0.0, 0.5, 0.0));
    c.write_pixel(4, 2, Color::rgb(-0.5, 0.0, 1.0));

    assert_eq!(c.to_ppm(), concat!(
        "P3\n5 3\n255\n",
        "255 0 0 0 0 0 0 0 0 0 0 0 0 0 0\n",
        "0 0 0 0 0 0 0 128 0 0 0 0 0 0 0\n",
        "0 0 0 0 0 0 0 0 0 0 0 0 0 0 255\n",
    ));
}

#[test]
fn ppm_splits_long_lines() {
    let mut c = Canvas::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            c.write_pixel(x, y, Color::rgb(1.0, 0.8, 0.6));
        }
    }

    let ppm = c.to_ppm();
    assert_eq!(ppm, concat!(
        "P3\n10 2\n255\n",
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204\n",
        "153 255 204 153 255 204 153 255 204 153 255 204 153\n",
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204\n",
        "153 255 204 153 255 204 153 255 204 153 255 204 153\n",
    ));
    assert!(ppm.lines().all(|l| l.len() <= 70));
}

#[test]
fn ppm_ends_with_newline() {
    assert!(Canvas::new(5, 3).to_ppm().ends_with('\n'));
}

#[test]
fn ppm_of_empty_canvas() {
    assert_eq!(Canvas::new(0, 0).to_ppm(), "P3\n0 0\n255\n");
    assert_eq!(Canvas::new(4, 0).to_ppm(), "P3\n4 0\n255\n");
}

#[test]
fn save_writes_ppm() {
    let mut c = Canvas::new(3, 2);
    c.write_pixel(1, 1, Color::rgb(0.2, 0.4, 0.6));

    let path = std::env::temp_dir()
        .join(format!("ray_kernel_canvas_{}.ppm", std::process::id()));
    c.save(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();
    assert_eq!(written, c.to_ppm());
}
