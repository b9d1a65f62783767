use crate::tuple::Tuple;
use crate::matrix::Matrix4;

/// A ray, starting at `origin` and travelling along `direction`.
///
/// The origin should be a point and the direction a vector. The direction
/// need not be normalized; `t` values are measured in multiples of it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    pub origin: Tuple,
    pub direction: Tuple,
}

impl Ray {
    pub fn new(origin: Tuple, direction: Tuple) -> Ray {
        Ray { origin, direction }
    }

    /// The point `t` units along the ray.
    pub fn position(&self, t: f64) -> Tuple {
        self.origin + self.direction * t
    }

    /// Applies a transformation to both the origin and the direction.
    ///
    /// Passing a `&Transformation` works too, through deref coercion.
    pub fn transform(&self, m: &Matrix4) -> Ray {
        Ray {
            origin: *m * self.origin,
            direction: *m * self.direction,
        }
    }
}

#[cfg(test)]
use crate::transform::{ translation, scaling };

#[test]
fn ray_fields() {
    let origin = Tuple::point(1.0, 2.0, 3.0);
    let direction = Tuple::vector(4.0, 5.0, 6.0);
    let r = Ray::new(origin, direction);

    assert_eq!(r.origin, origin);
    assert_eq!(r.direction, direction);
}

#[test]
fn ray_position() {
    let r = Ray::new(
                Tuple::point(2.0, 3.0, 4.0),
                Tuple::vector(1.0, 0.0, 0.0)
            );

    assert_eq!(r.position(0.0), Tuple::point(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Tuple::point(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Tuple::point(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Tuple::point(4.5, 3.0, 4.0));
}

#[test]
fn ray_translation() {
    let r = Ray::new(
                Tuple::point(1.0, 2.0, 3.0),
                Tuple::vector(0.0, 1.0, 0.0)
            );
    let t = r.transform(&translation(3.0, 4.0, 5.0));

    assert_eq!(t.origin, Tuple::point(4.0, 6.0, 8.0));
    assert_eq!(t.direction, Tuple::vector(0.0, 1.0, 0.0));
}

#[test]
fn ray_scaling() {
    let r = Ray::new(
                Tuple::point(1.0, 2.0, 3.0),
                Tuple::vector(0.0, 1.0, 0.0)
            );
    let t = r.transform(&scaling(2.0, 3.0, 4.0));

    assert_eq!(t.origin, Tuple::point(2.0, 6.0, 12.0));
    assert_eq!(t.direction, Tuple::vector(0.0, 3.0, 0.0));
}

#[test]
fn transform_round_trip() {
    let r = Ray::new(
                Tuple::point(1.0, -2.0, 3.0),
                Tuple::vector(0.5, 1.0, -1.0)
            );
    let m = translation(3.0, 4.0, 5.0).scaling(2.0, 0.5, 1.0).rotation_y(0.3);

    assert_eq!(r.transform(&m).transform(&m.inverse()), r);
}
