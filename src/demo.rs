//! Small drivers which exercise the kernel and draw the result onto a canvas.

use crate::canvas::Canvas;
use crate::color::Color;
use crate::intersect::{ intersect, intersections };
use crate::math::iround;
use crate::ray::Ray;
use crate::shape::Shape;
use crate::transform::{ rotation_y, scaling };
use crate::tuple::Tuple;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Projectile {
    pub position: Tuple,
    pub velocity: Tuple,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Environment {
    pub gravity: Tuple,
    pub wind: Tuple,
}

impl Environment {
    /// Advances a projectile by one tick, based on environmental conditions.
    ///
    /// The projectile returned from this function is the parameter `proj`
    /// subjected to one "tick" of time in this environment. The position
    /// moves by the old velocity; the velocity then picks up gravity and wind.
    ///
    /// Velocity, gravity and wind are all represented as vectors.
    pub fn tick(&self, proj: &Projectile) -> Projectile {
        let position = proj.position + proj.velocity;
        let velocity = proj.velocity + self.gravity + self.wind;

        Projectile { position, velocity }
    }
}

/// Plots the path of a projectile fired up and to the right.
///
/// Canvas row 0 is the top, so world `y` is flipped. Plotting stops as soon
/// as the projectile leaves the canvas.
pub fn projectile_trace(width: usize, height: usize) -> Canvas {
    let env = Environment {
        gravity: Tuple::vector(0.0, -0.05, 0.0),
        wind: Tuple::vector(-0.01, 0.0, 0.0),
    };
    let mut proj = Projectile {
        position: Tuple::point(0.0, 1.0, 0.0),
        velocity: Tuple::vector(1.0, 1.8, 0.0).normalize() * 8.0,
    };

    let mut canvas = Canvas::new(width, height);
    let trail = Color::rgb(0.0, 1.0, 0.2);
    let mut ticks = 0usize;

    loop {
        let x = iround(proj.position.x);
        let y = height as i64 - iround(proj.position.y);

        if !canvas.in_bounds(x, y) {
            break;
        }

        log::trace!("tick {}: position {:?}, velocity {:?}",
            ticks, proj.position, proj.velocity);

        canvas.write_pixel(x as usize, y as usize, trail);
        proj = env.tick(&proj);
        ticks += 1;
    }

    log::debug!("projectile left the canvas after {} ticks", ticks);

    canvas
}

/// Marks the twelve hours of a clock face, seen from above.
///
/// The hand starts at twelve o'clock (towards +Z) and is rotated about the
/// Y axis by one hour at a time. The radius is 3/8 of the canvas width.
pub fn clock(size: usize) -> Canvas {
    let mut canvas = Canvas::new(size, size);
    let mark = Color::rgb(1.0, 0.3, 0.2);

    let radius = size as f64 * 3.0 / 8.0;
    let one_hour = rotation_y(std::f64::consts::PI / 6.0);
    let mut hand = Tuple::point(0.0, 0.0, radius);

    for _ in 0..12 {
        let x = (size / 2) as i64 + iround(hand.x);
        let y = (size / 2) as i64 + iround(hand.z);

        if canvas.in_bounds(x, y) {
            canvas.write_pixel(x as usize, y as usize, mark);
        }

        hand = one_hour * hand;
    }

    canvas
}

/// Casts one ray per pixel at a squashed, sheared sphere and marks the hits.
///
/// The wall is 7 units wide at `z = 10` and the rays start at `(0, 0, -5)`.
pub fn sphere_silhouette(pixels: usize) -> Canvas {
    let ray_origin = Tuple::point(0.0, 0.0, -5.0);
    let wall_z = 10.0;
    let wall_size = 7.0;
    let pixel_size = wall_size / pixels as f64;
    let half = wall_size / 2.0;

    let mut canvas = Canvas::new(pixels, pixels);
    let red = Color::rgb(1.0, 0.0, 0.0);

    let mut shape = Shape::sphere();
    shape.transform = scaling(0.5, 1.0, 1.0).shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    for y in 0..pixels {
        let world_y = half - pixel_size * y as f64;

        for x in 0..pixels {
            let world_x = -half + pixel_size * x as f64;
            let position = Tuple::point(world_x, world_y, wall_z);

            let ray = Ray::new(ray_origin, (position - ray_origin).normalize());
            if intersections(intersect(&ray, &shape)).hit().is_some() {
                canvas.write_pixel(x, y, red);
            }
        }
    }

    canvas
}

#[test]
fn projectile_tick() {
    let env = Environment {
        gravity: Tuple::vector(0.0, -0.1, 0.0),
        wind: Tuple::vector(-0.01, 0.0, 0.0),
    };
    let proj = Projectile {
        position: Tuple::point(0.0, 1.0, 0.0),
        velocity: Tuple::vector(1.0, 1.0, 0.0),
    };

    let next = env.tick(&proj);
    assert_eq!(next.position, Tuple::point(1.0, 2.0, 0.0));
    assert_eq!(next.velocity, Tuple::vector(0.99, 0.9, 0.0));
}

#[test]
fn projectile_trace_starts_bottom_left() {
    let canvas = projectile_trace(800, 600);

    assert_eq!(canvas.read_pixel(0, 599), Some(Color::rgb(0.0, 1.0, 0.2)));
    assert_eq!(canvas.read_pixel(799, 0), Some(Color::black()));
}

#[test]
fn projectile_trace_stops_at_edge() {
    // The second tick is already past a one-column canvas
    let canvas = projectile_trace(1, 600);

    let mut expected = Canvas::new(1, 600);
    expected.write_pixel(0, 599, Color::rgb(0.0, 1.0, 0.2));
    assert_eq!(canvas, expected);
}

#[test]
fn clock_marks_twelve_hours() {
    let canvas = clock(400);
    let mark = Color::rgb(1.0, 0.3, 0.2);

    let mut marked = 0;
    for y in 0..400 {
        for x in 0..400 {
            if canvas.read_pixel(x, y) == Some(mark) {
                marked += 1;
            }
        }
    }
    assert_eq!(marked, 12);

    // Twelve, three, six and nine o'clock
    assert_eq!(canvas.read_pixel(200, 350), Some(mark));
    assert_eq!(canvas.read_pixel(350, 200), Some(mark));
    assert_eq!(canvas.read_pixel(200, 50), Some(mark));
    assert_eq!(canvas.read_pixel(50, 200), Some(mark));
}

#[test]
fn silhouette_center_and_corner() {
    let canvas = sphere_silhouette(100);

    assert_eq!(canvas.read_pixel(50, 50), Some(Color::rgb(1.0, 0.0, 0.0)));
    assert_eq!(canvas.read_pixel(0, 0), Some(Color::black()));
    assert_eq!(canvas.read_pixel(99, 99), Some(Color::black()));
}
