use std::ops::{ Add, Sub, Mul, Div, Neg };

use crate::math::feq;

/// A color.
///
/// Represented with red, green and blue channels. Channels are not clamped;
/// they may leave the `0.0..=1.0` range while lighting is accumulated, and
/// are only clamped when a canvas is encoded to an image.
///
/// The same type doubles as a light intensity.
///
/// # Examples
///
/// Tint white light with a surface color:
///
/// ```
/// # use ray_kernel::color::Color;
/// let surface = Color::rgb(1.0, 0.2, 0.4);
/// let light = Color::rgb(0.9, 1.0, 0.1);
/// assert_eq!(surface * light, Color::rgb(0.9, 0.2, 0.04));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

/// Colors compare channel-wise within `EPSILON`.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.red, other.red) &&
            feq(self.green, other.green) &&
            feq(self.blue, other.blue)
    }
}

/// Conversion from an `[r, g, b]` triple.
impl From<[f64; 3]> for Color {
    fn from(c: [f64; 3]) -> Color {
        Color::rgb(c[0], c[1], c[2])
    }
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Color {
        Color { red, green, blue }
    }

    /// The color black.
    pub const fn black() -> Color {
        Color::rgb(0.0, 0.0, 0.0)
    }

    /// The color white.
    pub const fn white() -> Color {
        Color::rgb(1.0, 1.0, 1.0)
    }

    /// Computes the Hadamard (channel-wise) product of two colors.
    ///
    /// This is what `Color * Color` does; the named form exists to make
    /// blending explicit at call sites.
    pub const fn hadamard(c1: &Color, c2: &Color) -> Color {
        Color {
            red: c1.red * c2.red,
            green: c1.green * c2.green,
            blue: c1.blue * c2.blue,
        }
    }
}

impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            red: self.red + other.red,
            green: self.green + other.green,
            blue: self.blue + other.blue,
        }
    }
}

impl Sub<Color> for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Self::Output {
        Color {
            red: self.red - other.red,
            green: self.green - other.green,
            blue: self.blue - other.blue,
        }
    }
}

impl Neg for Color {
    type Output = Color;

    fn neg(self) -> Self::Output {
        Color {
            red: -self.red,
            green: -self.green,
            blue: -self.blue,
        }
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            red: self.red * other,
            green: self.green * other,
            blue: self.blue * other,
        }
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        other * self
    }
}

impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        Color::hadamard(&self, &other)
    }
}

impl Div<f64> for Color {
    type Output = Color;

    fn div(self, other: f64) -> Self::Output {
        Color {
            red: self.red / other,
            green: self.green / other,
            blue: self.blue / other,
        }
    }
}

#[test]
fn channels_are_unclamped() {
    let c = Color::rgb(-0.5, 0.4, 1.7);

    assert_eq!(c.red, -0.5);
    assert_eq!(c.green, 0.4);
    assert_eq!(c.blue, 1.7);
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 + c2, Color::rgb(1.6, 0.7, 1.0));
}

#[test]
fn subtract_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);

    assert_eq!(c1 - c2, Color::rgb(0.2, 0.5, 0.5));
}

#[test]
fn scale_colors() {
    let c = Color::rgb(0.2, 0.3, 0.4);

    assert_eq!(c * 2.0, Color::rgb(0.4, 0.6, 0.8));
    assert_eq!(2.0 * c, Color::rgb(0.4, 0.6, 0.8));
    assert_eq!(c / 2.0, Color::rgb(0.1, 0.15, 0.2));
    assert_eq!(-c, Color::rgb(-0.2, -0.3, -0.4));
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(1.0, 0.2, 0.4);
    let c2 = Color::rgb(0.9, 1.0, 0.1);

    assert_eq!(c1 * c2, Color::rgb(0.9, 0.2, 0.04));
    assert_eq!(c1 * c2, Color::hadamard(&c2, &c1));
}

#[test]
fn from_triple() {
    assert_eq!(Color::from([1.0, 0.2, 1.0]), Color::rgb(1.0, 0.2, 1.0));
}
