use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::math::{ feq, sqrt };

/// A homogeneous coordinate: either a point or a direction.
///
/// The `w` component tells the two apart; points carry `w == 1.0` and
/// vectors carry `w == 0.0`. Arithmetic treats all four components alike, so
/// the usual identities fall out of the `w` arithmetic: a point minus a point
/// is a vector, a point plus a vector is a point, and so on.
///
/// # Examples
///
/// ```
/// # use ray_kernel::tuple::Tuple;
/// let p = Tuple::point(3.0, 2.0, 1.0);
/// let q = Tuple::point(5.0, 6.0, 7.0);
/// assert!((p - q).is_vector());
/// assert!((p + Tuple::vector(1.0, 1.0, 1.0)).is_point());
/// ```
#[derive(Debug, Default, Copy, Clone, PartialOrd)]
pub struct Tuple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

/// Tuples compare component-wise within `EPSILON`.
impl PartialEq for Tuple {
    fn eq(&self, other: &Tuple) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z) &&
            feq(self.w, other.w)
    }
}

impl Tuple {
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Tuple {
        Tuple { x, y, z, w }
    }

    pub const fn point(x: f64, y: f64, z: f64) -> Tuple {
        Tuple { x, y, z, w: 1.0 }
    }

    pub const fn vector(x: f64, y: f64, z: f64) -> Tuple {
        Tuple { x, y, z, w: 0.0 }
    }

    pub const fn is_point(&self) -> bool {
        feq(self.w, 1.0)
    }

    pub const fn is_vector(&self) -> bool {
        feq(self.w, 0.0)
    }

    /// Euclidean length over all four components.
    pub const fn magnitude(&self) -> f64 {
        sqrt(self.dot(self))
    }

    /// Scales a tuple to unit length.
    ///
    /// The tuple must not be zero; a zero tuple yields NaN components.
    pub const fn normalize(&self) -> Tuple {
        let mag = self.magnitude();

        Tuple {
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
            w: self.w / mag,
        }
    }

    /// Dot product over all four components.
    pub const fn dot(&self, other: &Tuple) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
            + self.w * other.w
    }

    /// Cross product of two vectors.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either operand is not a vector.
    pub const fn cross(&self, other: &Tuple) -> Tuple {
        debug_assert!(self.is_vector(), "cross product of a non-vector");
        debug_assert!(other.is_vector(), "cross product of a non-vector");

        Tuple::vector(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Reflects a vector across a normal.
    pub fn reflect(&self, normal: &Tuple) -> Tuple {
        *self - *normal * 2.0 * self.dot(normal)
    }
}

impl Add for Tuple {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w
        }
    }
}

impl Sub for Tuple {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            w: self.w - other.w
        }
    }
}

impl Neg for Tuple {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w
        }
    }
}

/// Scalar right-multiplication.
///
/// ```
/// # use ray_kernel::tuple::Tuple;
/// let t = Tuple::new(1.0, -2.0, 3.0, -4.0);
/// assert_eq!(t * 3.5, Tuple::new(3.5, -7.0, 10.5, -14.0));
/// ```
impl Mul<f64> for Tuple {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
            w: self.w * other
        }
    }
}

/// Scalar left-multiplication.
impl Mul<Tuple> for f64 {
    type Output = Tuple;

    fn mul(self, other: Tuple) -> Tuple {
        other * self
    }
}

impl Div<f64> for Tuple {
    type Output = Self;

    fn div(self, other: f64) -> Self {
        Self {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
            w: self.w / other
        }
    }
}

/* Tests */

#[test]
fn point_has_w_one() {
    let a = Tuple::new(4.3, -4.2, 3.1, 1.0);

    assert!(a.is_point());
    assert!(!a.is_vector());
    assert_eq!(Tuple::point(4.0, -4.0, 3.0), Tuple::new(4.0, -4.0, 3.0, 1.0));
}

#[test]
fn vector_has_w_zero() {
    let a = Tuple::new(4.3, -4.2, 3.1, 0.0);

    assert!(a.is_vector());
    assert!(!a.is_point());
    assert_eq!(Tuple::vector(4.0, -4.0, 3.0), Tuple::new(4.0, -4.0, 3.0, 0.0));
}

#[test]
fn add_tuples() {
    let a1 = Tuple::new(3.0, -2.0, 5.0, 1.0);
    let a2 = Tuple::new(-2.0, 3.0, 1.0, 0.0);

    assert_eq!(a1 + a2, Tuple::new(1.0, 1.0, 6.0, 1.0));
}

#[test]
fn sub_points() {
    let p1 = Tuple::point(3.0, 2.0, 1.0);
    let p2 = Tuple::point(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple::vector(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vector_from_point() {
    let p = Tuple::point(3.0, 2.0, 1.0);
    let v = Tuple::vector(5.0, 6.0, 7.0);

    assert_eq!(p - v, Tuple::point(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vectors() {
    let v1 = Tuple::vector(3.0, 2.0, 1.0);
    let v2 = Tuple::vector(5.0, 6.0, 7.0);

    assert_eq!(v1 - v2, Tuple::vector(-2.0, -4.0, -6.0));
}

#[test]
fn neg_tuple() {
    let a = Tuple::new(1.0, -2.0, 3.0, -4.0);

    assert_eq!(-a, Tuple::new(-1.0, 2.0, -3.0, 4.0));
}

#[test]
fn mul_scalar() {
    let a = Tuple::new(1.0, -2.0, 3.0, -4.0);

    assert_eq!(a * 3.5, Tuple::new(3.5, -7.0, 10.5, -14.0));
    assert_eq!(0.5 * a, Tuple::new(0.5, -1.0, 1.5, -2.0));
}

#[test]
fn div_scalar() {
    let a = Tuple::new(1.0, -2.0, 3.0, -4.0);

    assert_eq!(a / 2.0, Tuple::new(0.5, -1.0, 1.5, -2.0));
}

#[test]
fn magnitude() {
    assert_eq!(Tuple::vector(1.0, 0.0, 0.0).magnitude(), 1.0);
    assert_eq!(Tuple::vector(0.0, 0.0, 1.0).magnitude(), 1.0);
    assert!(crate::math::feq(Tuple::vector(1.0, 2.0, 3.0).magnitude(), f64::sqrt(14.0)));
    assert!(crate::math::feq(Tuple::vector(-1.0, -2.0, -3.0).magnitude(), f64::sqrt(14.0)));
}

#[test]
fn normalize_clean() {
    let v = Tuple::vector(4.0, 0.0, 0.0);

    assert_eq!(v.normalize(), Tuple::vector(1.0, 0.0, 0.0));
}

#[test]
fn normalize_dirty() {
    let v = Tuple::vector(1.0, 2.0, 3.0);
    let e = Tuple::vector(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    assert_eq!(v.normalize(), e);
}

#[test]
fn normalized_tuples_have_unit_magnitude() {
    let samples = [
        Tuple::vector(1.0, 2.0, 3.0),
        Tuple::vector(-0.001, 0.0, 0.002),
        Tuple::vector(1e4, -3e3, 7.5),
        Tuple::point(3.0, -4.0, 12.0),
        Tuple::new(0.5, 0.5, 0.5, 0.5),
    ];

    for t in samples.iter() {
        assert!(crate::math::feq(t.normalize().magnitude(), 1.0), "{:?}", t);
    }
}

#[test]
fn const_tuple_math() {
    const V: Tuple = Tuple::vector(0.0, 3.0, 4.0).normalize();
    assert_eq!(V, Tuple::vector(0.0, 0.6, 0.8));
}

#[test]
fn dot_vectors() {
    let a = Tuple::vector(1.0, 2.0, 3.0);
    let b = Tuple::vector(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
}

#[test]
fn cross_vectors() {
    let a = Tuple::vector(1.0, 2.0, 3.0);
    let b = Tuple::vector(2.0, 3.0, 4.0);

    assert_eq!(a.cross(&b), Tuple::vector(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Tuple::vector(1.0, -2.0, 1.0));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
fn cross_rejects_points() {
    let a = Tuple::point(1.0, 2.0, 3.0);
    let b = Tuple::vector(2.0, 3.0, 4.0);

    a.cross(&b);
}

#[test]
fn reflect_45() {
    let v = Tuple::vector(1.0, -1.0, 0.0);
    let n = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(v.reflect(&n), Tuple::vector(1.0, 1.0, 0.0));
}

#[test]
fn reflect_slanted() {
    let v = Tuple::vector(0.0, -1.0, 0.0);
    let n = Tuple::vector(2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0);

    assert_eq!(v.reflect(&n), Tuple::vector(1.0, 0.0, 0.0));
}

#[test]
fn reflection_negates_normal_component() {
    let normals = [
        Tuple::vector(0.0, 1.0, 0.0),
        Tuple::vector(1.0, 1.0, 0.0).normalize(),
        Tuple::vector(-2.0, 0.5, 3.0).normalize(),
    ];
    let vectors = [
        Tuple::vector(1.0, -1.0, 0.0),
        Tuple::vector(0.3, 2.0, -7.0),
        Tuple::vector(-4.0, 0.0, 0.25),
    ];

    for n in normals.iter() {
        for v in vectors.iter() {
            let r = v.reflect(n);
            assert!(crate::math::feq(r.dot(n), -v.dot(n)));
        }
    }
}
