// Floating point comparisons
pub const EPSILON: f64 = 0.00001;

// PPM output
pub const PPM_MAX_COLOR: f64 = 255.0;
pub const PPM_LINE_WIDTH: usize = 70;

// Largest side of a canvas described by a scene file
pub const MAX_CANVAS_PIXELS: usize = 4096;

// Demo parameters
pub const CLOCK_CANVAS_SIZE: usize = 400;
pub const PROJECTILE_CANVAS_WIDTH: usize = 800;
pub const PROJECTILE_CANVAS_HEIGHT: usize = 600;
pub const SILHOUETTE_CANVAS_PIXELS: usize = 100;

// Default output files
pub const CLOCK_OUT_FILE: &str = "./clock.ppm";
pub const PROJECTILE_OUT_FILE: &str = "./projectile_trace.ppm";
pub const SILHOUETTE_OUT_FILE: &str = "./sphere_silhouette.ppm";
pub const SPHERE_OUT_FILE: &str = "./sphere.ppm";
