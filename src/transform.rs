//! Affine transformations in homogeneous coordinates.
//!
//! The free functions build the elementary transforms. `Transformation` also
//! exposes each of them as a chaining method, so a sequence of transforms can
//! be written in the order it is applied:
//!
//! ```
//! # use std::f64::consts::PI;
//! # use ray_kernel::tuple::Tuple;
//! # use ray_kernel::transform::{ Transformation, rotation_x, scaling, translation };
//! let chained = Transformation::identity()
//!     .rotation_x(PI / 2.0)
//!     .scaling(5.0, 5.0, 5.0)
//!     .translation(10.0, 5.0, 7.0);
//!
//! // Same thing, written as matrix products (applied right to left).
//! let product = translation(10.0, 5.0, 7.0)
//!     * scaling(5.0, 5.0, 5.0)
//!     * rotation_x(PI / 2.0);
//!
//! let p = Tuple::point(1.0, 0.0, 1.0);
//! assert_eq!(chained, product);
//! assert_eq!(chained * p, Tuple::point(15.0, 0.0, 7.0));
//! ```

use std::fmt;
use std::ops::{ Deref, Mul };

use crate::matrix::Matrix4;
use crate::tuple::Tuple;

/// A 4x4 matrix standing for an affine map.
///
/// Dereferences to the underlying `Matrix4`, so determinants, transposes
/// and element access come for free. Composition produces a new value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transformation(Matrix4);

impl Default for Transformation {
    fn default() -> Transformation {
        Transformation::identity()
    }
}

impl Transformation {
    /// The transformation which leaves every point where it is.
    pub fn identity() -> Transformation {
        Transformation(Matrix4::identity())
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> Matrix4 {
        self.0
    }

    /// The transformation undoing this one.
    ///
    /// # Panics
    ///
    /// Panics if the matrix is singular (for example, a zero scale).
    pub fn inverse(&self) -> Transformation {
        Transformation(self.0.inverse())
    }

    /// Follows this transformation with a translation.
    pub fn translation(self, x: f64, y: f64, z: f64) -> Transformation {
        translation(x, y, z) * self
    }

    /// Follows this transformation with a scaling.
    pub fn scaling(self, x: f64, y: f64, z: f64) -> Transformation {
        scaling(x, y, z) * self
    }

    /// Follows this transformation with a rotation about the X axis.
    pub fn rotation_x(self, r: f64) -> Transformation {
        rotation_x(r) * self
    }

    /// Follows this transformation with a rotation about the Y axis.
    pub fn rotation_y(self, r: f64) -> Transformation {
        rotation_y(r) * self
    }

    /// Follows this transformation with a rotation about the Z axis.
    pub fn rotation_z(self, r: f64) -> Transformation {
        rotation_z(r) * self
    }

    /// Follows this transformation with a shear.
    pub fn shearing(self, xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Transformation {
        shearing(xy, xz, yx, yz, zx, zy) * self
    }
}

impl Deref for Transformation {
    type Target = Matrix4;

    fn deref(&self) -> &Matrix4 {
        &self.0
    }
}

impl From<Matrix4> for Transformation {
    fn from(m: Matrix4) -> Transformation {
        Transformation(m)
    }
}

impl From<[[f64; 4]; 4]> for Transformation {
    fn from(data: [[f64; 4]; 4]) -> Transformation {
        Transformation(data.into())
    }
}

/// Composition. `a * b` applies `b` first, then `a`.
impl Mul<Transformation> for Transformation {
    type Output = Transformation;

    fn mul(self, other: Transformation) -> Transformation {
        Transformation(self.0 * other.0)
    }
}

impl Mul<Tuple> for Transformation {
    type Output = Tuple;

    fn mul(self, other: Tuple) -> Tuple {
        self.0 * other
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Instantiates a translation.
///
/// Points are offset by `x`, `y` and `z`; vectors are unaffected, since
/// their `w` is zero.
pub fn translation(x: f64, y: f64, z: f64) -> Transformation {
    let mut trans = Matrix4::identity();
    trans[(0, 3)] = x;
    trans[(1, 3)] = y;
    trans[(2, 3)] = z;

    Transformation(trans)
}

/// Instantiates a scaling along the X, Y and Z axes.
///
/// A negative factor reflects across the corresponding axis.
pub fn scaling(x: f64, y: f64, z: f64) -> Transformation {
    let mut scale = Matrix4::new();
    scale[(0, 0)] = x;
    scale[(1, 1)] = y;
    scale[(2, 2)] = z;
    scale[(3, 3)] = 1.0;

    Transformation(scale)
}

/// Instantiates a rotation about the X axis by `r` radians.
///
/// Positive angles turn the Y axis toward the Z axis.
///
/// ```
/// # use ray_kernel::tuple::Tuple;
/// # use ray_kernel::transform::rotation_x;
/// let m = rotation_x(std::f64::consts::PI / 2.0);
/// assert_eq!(m * Tuple::point(0.0, 1.0, 0.0), Tuple::point(0.0, 0.0, 1.0));
/// ```
pub fn rotation_x(r: f64) -> Transformation {
    let mut rotate = Matrix4::identity();
    rotate[(1, 1)] =  r.cos();
    rotate[(1, 2)] = -r.sin();
    rotate[(2, 1)] =  r.sin();
    rotate[(2, 2)] =  r.cos();

    Transformation(rotate)
}

/// Instantiates a rotation about the Y axis by `r` radians.
pub fn rotation_y(r: f64) -> Transformation {
    let mut rotate = Matrix4::identity();
    rotate[(0, 0)] =  r.cos();
    rotate[(0, 2)] =  r.sin();
    rotate[(2, 0)] = -r.sin();
    rotate[(2, 2)] =  r.cos();

    Transformation(rotate)
}

/// Instantiates a rotation about the Z axis by `r` radians.
pub fn rotation_z(r: f64) -> Transformation {
    let mut rotate = Matrix4::identity();
    rotate[(0, 0)] =  r.cos();
    rotate[(0, 1)] = -r.sin();
    rotate[(1, 0)] =  r.sin();
    rotate[(1, 1)] =  r.cos();

    Transformation(rotate)
}

/// Instantiates a shear.
///
/// Each parameter moves one coordinate in proportion to another; `xy` moves
/// `x` in proportion to `y`, `zx` moves `z` in proportion to `x`, and so on.
///
/// ```
/// # use ray_kernel::tuple::Tuple;
/// # use ray_kernel::transform::shearing;
/// let m = shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
/// assert_eq!(m * Tuple::point(2.0, 3.0, 4.0), Tuple::point(5.0, 3.0, 4.0));
/// ```
pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
    -> Transformation {
    let mut shear = Matrix4::identity();
    shear[(0, 1)] = xy;
    shear[(0, 2)] = xz;
    shear[(1, 0)] = yx;
    shear[(1, 2)] = yz;
    shear[(2, 0)] = zx;
    shear[(2, 1)] = zy;

    Transformation(shear)
}

#[cfg(test)]
use std::f64::consts::PI;

#[test]
fn translate_point() {
    let transform = translation(5.0, -3.0, 2.0);
    let point = Tuple::point(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Tuple::point(2.0, 1.0, 7.0));
}

#[test]
fn translate_point_inverse() {
    let transform = translation(5.0, -3.0, 2.0).inverse();
    let point = Tuple::point(-3.0, 4.0, 5.0);

    assert_eq!(transform * point, Tuple::point(-8.0, 7.0, 3.0));
}

#[test]
fn translate_vector() {
    let transform = translation(5.0, -3.0, 2.0);
    let vector = Tuple::vector(-3.0, 4.0, 5.0);

    assert_eq!(transform * vector, vector);
}

#[test]
fn scale_point_and_vector() {
    let transform = scaling(2.0, 3.0, 4.0);

    assert_eq!(transform * Tuple::point(-4.0, 6.0, 8.0),
        Tuple::point(-8.0, 18.0, 32.0));
    assert_eq!(transform * Tuple::vector(-4.0, 6.0, 8.0),
        Tuple::vector(-8.0, 18.0, 32.0));
}

#[test]
fn scale_inverse() {
    let transform = scaling(2.0, 3.0, 4.0).inverse();
    let vector = Tuple::vector(-4.0, 6.0, 8.0);

    assert_eq!(transform * vector, Tuple::vector(-2.0, 2.0, 2.0));
}

#[test]
fn scale_reflection() {
    let transform = scaling(-1.0, 1.0, 1.0);
    let point = Tuple::point(2.0, 3.0, 4.0);

    assert_eq!(transform * point, Tuple::point(-2.0, 3.0, 4.0));
}

#[test]
fn rotate_x() {
    let half_quarter = rotation_x(PI / 4.0);
    let full_quarter = rotation_x(PI / 2.0);
    let point = Tuple::point(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point, Tuple::point(0.0, 0.0, 1.0));
    assert_eq!(half_quarter * point,
        Tuple::point(0.0, 2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0));
    assert_eq!(half_quarter.inverse() * point,
        Tuple::point(0.0, 2.0f64.sqrt() / 2.0, -(2.0f64.sqrt() / 2.0)));
}

#[test]
fn rotate_y() {
    let half_quarter = rotation_y(PI / 4.0);
    let full_quarter = rotation_y(PI / 2.0);
    let point = Tuple::point(0.0, 0.0, 1.0);

    assert_eq!(full_quarter * point, Tuple::point(1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Tuple::point(2.0f64.sqrt() / 2.0, 0.0, 2.0f64.sqrt() / 2.0));
}

#[test]
fn rotate_z() {
    let half_quarter = rotation_z(PI / 4.0);
    let full_quarter = rotation_z(PI / 2.0);
    let point = Tuple::point(0.0, 1.0, 0.0);

    assert_eq!(full_quarter * point, Tuple::point(-1.0, 0.0, 0.0));
    assert_eq!(half_quarter * point,
        Tuple::point(-(2.0f64.sqrt()) / 2.0, 2.0f64.sqrt() / 2.0, 0.0));
}

#[test]
fn shear_each_axis_pair() {
    let point = Tuple::point(2.0, 3.0, 4.0);

    assert_eq!(shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0) * point,
        Tuple::point(5.0, 3.0, 4.0));
    assert_eq!(shearing(0.0, 1.0, 0.0, 0.0, 0.0, 0.0) * point,
        Tuple::point(6.0, 3.0, 4.0));
    assert_eq!(shearing(0.0, 0.0, 1.0, 0.0, 0.0, 0.0) * point,
        Tuple::point(2.0, 5.0, 4.0));
    assert_eq!(shearing(0.0, 0.0, 0.0, 1.0, 0.0, 0.0) * point,
        Tuple::point(2.0, 7.0, 4.0));
    assert_eq!(shearing(0.0, 0.0, 0.0, 0.0, 1.0, 0.0) * point,
        Tuple::point(2.0, 3.0, 6.0));
    assert_eq!(shearing(0.0, 0.0, 0.0, 0.0, 0.0, 1.0) * point,
        Tuple::point(2.0, 3.0, 7.0));
}

#[test]
fn individual_transforms_in_sequence() {
    let p = Tuple::point(1.0, 0.0, 1.0);
    let a = rotation_x(PI / 2.0);
    let b = scaling(5.0, 5.0, 5.0);
    let c = translation(10.0, 5.0, 7.0);

    let p2 = a * p;
    assert_eq!(p2, Tuple::point(1.0, -1.0, 0.0));

    let p3 = b * p2;
    assert_eq!(p3, Tuple::point(5.0, -5.0, 0.0));

    let p4 = c * p3;
    assert_eq!(p4, Tuple::point(15.0, 0.0, 7.0));
}

#[test]
fn chained_transforms_apply_in_reverse_order() {
    let a = rotation_x(PI / 2.0);
    let b = scaling(5.0, 5.0, 5.0);
    let c = translation(10.0, 5.0, 7.0);
    let p = Tuple::point(1.0, 0.0, 1.0);

    assert_eq!((c * b * a) * p, Tuple::point(15.0, 0.0, 7.0));
    assert_ne!((a * b * c) * p, Tuple::point(15.0, 0.0, 7.0));
}

#[test]
fn fluent_chain_reads_in_application_order() {
    let t = Transformation::identity()
        .rotation_x(PI / 2.0)
        .scaling(5.0, 5.0, 5.0)
        .translation(10.0, 5.0, 7.0);

    assert_eq!(t * Tuple::point(1.0, 0.0, 1.0), Tuple::point(15.0, 0.0, 7.0));
    assert_eq!(t, translation(10.0, 5.0, 7.0) * scaling(5.0, 5.0, 5.0)
        * rotation_x(PI / 2.0));
}

#[test]
fn fluent_chain_prepends() {
    let t = scaling(0.5, 1.0, 1.0).shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);

    assert_eq!(t, shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0) * scaling(0.5, 1.0, 1.0));
    assert_eq!(Transformation::identity().rotation_y(PI).rotation_z(0.3)
        .rotation_x(-1.2), rotation_x(-1.2) * rotation_z(0.3) * rotation_y(PI));
}

#[test]
fn composition_is_associative() {
    let transforms = [
        rotation_x(0.7),
        scaling(2.0, -1.0, 0.5),
        translation(1.0, -2.0, 3.0),
        shearing(0.5, 0.0, 1.0, 0.0, 0.0, 2.0),
        rotation_z(PI / 3.0),
    ];
    let points = [
        Tuple::point(1.0, 0.0, 1.0),
        Tuple::point(-3.0, 2.5, 0.25),
        Tuple::vector(0.0, 1.0, -1.0),
    ];

    for a in transforms.iter() {
        for b in transforms.iter() {
            for c in transforms.iter() {
                for p in points.iter() {
                    assert_eq!((*c * *b * *a) * *p, *c * (*b * (*a * *p)));
                }
            }
        }
    }
}

#[test]
fn identity_is_neutral() {
    let t = translation(1.0, 2.0, 3.0).rotation_y(0.4);

    assert_eq!(Transformation::identity() * t, t);
    assert_eq!(t * Transformation::identity(), t);
    assert_eq!(Transformation::default(), Transformation::identity());
}

#[test]
fn deref_exposes_matrix_operations() {
    let t = scaling(2.0, 3.0, 4.0);

    assert_eq!(t.determinant(), 24.0);
    assert_eq!(t[(1, 1)], 3.0);
    assert_eq!(t.transpose(), t.matrix());
}
