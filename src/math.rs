//! Scalar helpers shared by the rest of the kernel.
//!
//! Everything that can be is a `const fn`, so tuple algebra built on top of
//! these helpers can be evaluated at compile time.

use crate::consts::EPSILON;

/// Checks whether `a` and `b` differ by less than `epsilon`.
pub const fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
    let diff = a - b;
    diff < epsilon && diff > -epsilon
}

/// Approximate equality using the crate-wide `EPSILON`.
pub const fn feq(a: f64, b: f64) -> bool {
    approx_eq(a, b, EPSILON)
}

/// Square root by Newton-Raphson iteration.
///
/// Negative and NaN inputs produce NaN. Zero and positive infinity are
/// returned unchanged.
///
/// The first estimate, `max(x, 1)`, is never below the true root, so every
/// iteration moves the estimate down toward it. Iteration stops as soon as
/// an estimate fails to decrease.
///
/// ```
/// # use ray_kernel::math::sqrt;
/// const ROOT_TWO: f64 = sqrt(2.0);
/// assert!((ROOT_TWO - std::f64::consts::SQRT_2).abs() < 1e-12);
/// ```
#[allow(clippy::eq_op)]
pub const fn sqrt(x: f64) -> f64 {
    if x != x || x < 0.0 {
        return f64::NAN;
    }

    if x == 0.0 || x == f64::INFINITY {
        return x;
    }

    let mut guess = if x > 1.0 { x } else { 1.0 };
    loop {
        let next = 0.5 * (guess + x / guess);
        if next >= guess {
            return guess;
        }

        guess = next;
    }
}

/// Rounds to the nearest integer, halfway cases away from zero.
pub fn iround(x: f64) -> i64 {
    x.round() as i64
}

/// Rounds a nonnegative value to the nearest unsigned integer.
///
/// # Panics
///
/// Panics if `x` is negative.
pub fn ulround(x: f64) -> usize {
    assert!(x >= 0.0, "ulround called with a negative value: {}", x);
    x.round() as usize
}

#[test]
fn approx_eq_respects_epsilon() {
    assert!(approx_eq(1.0, 1.000009, 0.00001));
    assert!(!approx_eq(1.0, 1.00002, 0.00001));
    assert!(approx_eq(1.0, 1.05, 0.1));
}

#[test]
fn feq_uses_crate_epsilon() {
    assert!(feq(0.1 + 0.2, 0.3));
    assert!(!feq(0.3, 0.3001));
}

#[test]
fn sqrt_matches_std() {
    for x in [0.25, 0.5, 1.0, 2.0, 14.0, 1e-8, 12345.678, 1e12] {
        let expected = f64::sqrt(x);
        assert!(
            ((sqrt(x) - expected) / expected).abs() < 1e-12,
            "sqrt({}) = {}, expected {}", x, sqrt(x), expected
        );
    }
}

#[test]
fn sqrt_edge_cases() {
    assert_eq!(sqrt(0.0), 0.0);
    assert_eq!(sqrt(1.0), 1.0);
    assert_eq!(sqrt(f64::INFINITY), f64::INFINITY);
    assert!(sqrt(-1.0).is_nan());
    assert!(sqrt(f64::NAN).is_nan());
}

#[test]
fn sqrt_is_const() {
    const ROOT: f64 = sqrt(16.0);
    assert!((ROOT - 4.0).abs() < 1e-12);
}

#[test]
fn rounding() {
    assert_eq!(iround(2.5), 3);
    assert_eq!(iround(-2.5), -3);
    assert_eq!(iround(-0.4), 0);
    assert_eq!(ulround(127.5), 128);
    assert_eq!(ulround(0.49), 0);
}

#[test]
#[should_panic]
fn ulround_rejects_negative() {
    ulround(-1.0);
}
