use std::fmt;
use std::ops::{ Index, IndexMut, Mul };

use crate::math::feq;
use crate::tuple::Tuple;

/// A dense, row-major matrix with `R` rows and `C` columns.
///
/// Dimensions are part of the type, so multiplying incompatible matrices or
/// taking the submatrix of a 1x1 matrix is a compile error rather than a
/// runtime one.
///
/// `Matrix4` is the workhorse of the kernel: it encodes affine
/// transformations in homogeneous coordinates, acting on both points and
/// vectors (`w` components of `1.0` and `0.0`, respectively). The smaller
/// square sizes mostly exist because cofactor expansion recurses through
/// them.
///
/// Equality is approximate; elements are compared within `EPSILON`.
///
/// # Examples
///
/// Multiplying a 2x3 matrix by a 3x2 matrix:
///
/// ```
/// # use ray_kernel::matrix::Matrix;
/// let a: Matrix<2, 3> = [[1.0, 2.0, 3.0],
///                        [4.0, 5.0, 6.0]].into();
/// let b: Matrix<3, 2> = a.transpose();
/// let c: Matrix<2, 2> = [[14.0, 32.0],
///                        [32.0, 77.0]].into();
/// assert_eq!(a * b, c);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct Matrix<const R: usize, const C: usize> {
    data: [[f64; C]; R],
}

pub type Matrix2 = Matrix<2, 2>;
pub type Matrix3 = Matrix<3, 3>;
pub type Matrix4 = Matrix<4, 4>;

impl<const R: usize, const C: usize> Default for Matrix<R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const R: usize, const C: usize> Matrix<R, C> {
    /// Creates a new matrix. All elements are initialized to `0.0`.
    pub const fn new() -> Self {
        Matrix { data: [[0.0; C]; R] }
    }

    /// Reads the element at `row`, `col` (zero-indexed).
    ///
    /// # Panics
    ///
    /// Panics if the position lies outside the matrix.
    pub fn at(&self, row: usize, col: usize) -> f64 {
        Self::check_bounds(row, col);
        self.data[row][col]
    }

    /// Mutable access to the element at `row`, `col` (zero-indexed).
    ///
    /// # Panics
    ///
    /// Panics if the position lies outside the matrix.
    pub fn at_mut(&mut self, row: usize, col: usize) -> &mut f64 {
        Self::check_bounds(row, col);
        &mut self.data[row][col]
    }

    fn check_bounds(row: usize, col: usize) {
        assert!(row < R && col < C,
            "index ({}, {}) is out of bounds for a {}x{} matrix", row, col, R, C);
    }

    /// Produces the transpose of a matrix.
    ///
    /// The transpose swaps rows with columns; for matrix `A`, the element of
    /// `A^T` at row `i`, column `j` is the element of `A` at row `j`,
    /// column `i`.
    pub fn transpose(&self) -> Matrix<C, R> {
        let mut res = Matrix::<C, R>::new();

        for r in 0..R {
            for c in 0..C {
                res[(c, r)] = self[(r, c)];
            }
        }

        res
    }
}

impl<const N: usize> Matrix<N, N> {
    /// Instantiates an identity matrix.
    pub fn identity() -> Self {
        let mut id = Self::new();
        for i in 0..N {
            id[(i, i)] = 1.0;
        }

        id
    }
}

impl Matrix<1, 1> {
    pub fn determinant(&self) -> f64 {
        self[(0, 0)]
    }
}

impl Matrix<2, 2> {
    /// Calculates the determinant of a `Matrix2` directly, as `ad - bc`.
    pub fn determinant(&self) -> f64 {
        self[(0, 0)] * self[(1, 1)] - self[(0, 1)] * self[(1, 0)]
    }
}

/// Cofactor expansion for a square matrix of size `$n`, whose submatrices
/// have size `$sub`.
macro_rules! cofactor_expansion {
    ($n:literal, $sub:literal) => {
        impl Matrix<$n, $n> {
            /// Returns the submatrix left after removing `row` and `col`.
            ///
            /// For example, removing row 1 and column 2 of
            ///
            /// ```text
            /// | 1 0 2 |
            /// | 3 1 0 |
            /// | 1 1 1 |
            /// ```
            ///
            /// leaves
            ///
            /// ```text
            /// | 1 0 |
            /// | 1 1 |
            /// ```
            pub fn submatrix(&self, row: usize, col: usize) -> Matrix<$sub, $sub> {
                Self::check_bounds(row, col);

                let mut sub = Matrix::<$sub, $sub>::new();
                let mut dest_r = 0;
                for r in 0..$n {
                    if r == row {
                        continue;
                    }

                    let mut dest_c = 0;
                    for c in 0..$n {
                        if c == col {
                            continue;
                        }

                        sub[(dest_r, dest_c)] = self[(r, c)];
                        dest_c += 1;
                    }

                    dest_r += 1;
                }

                sub
            }

            /// The determinant of the submatrix at `row` and `col`.
            pub fn minor(&self, row: usize, col: usize) -> f64 {
                self.submatrix(row, col).determinant()
            }

            /// The minor at `row` and `col`, negated when `row + col` is odd.
            pub fn cofactor(&self, row: usize, col: usize) -> f64 {
                let m = self.minor(row, col);
                if (row + col) % 2 == 0 { m } else { -m }
            }

            /// A matrix is invertible when its determinant is nonzero.
            ///
            /// The comparison is exact. Nearly singular matrices count as
            /// invertible and produce very large inverses.
            pub fn is_invertible(&self) -> bool {
                self.determinant() != 0.0
            }

            /// Calculates the inverse, or `None` for a singular matrix.
            ///
            /// Each cofactor is divided by the determinant and written to the
            /// transposed position, which builds the adjugate in one pass.
            pub fn checked_inverse(&self) -> Option<Self> {
                let det = self.determinant();
                if det == 0.0 {
                    return None;
                }

                let mut inv = Self::new();
                for r in 0..$n {
                    for c in 0..$n {
                        inv[(c, r)] = self.cofactor(r, c) / det;
                    }
                }

                Some(inv)
            }

            /// Calculates the inverse of an invertible matrix.
            ///
            /// # Panics
            ///
            /// Panics if the matrix is singular. Use `checked_inverse` when
            /// the matrix comes from untrusted input.
            pub fn inverse(&self) -> Self {
                match self.checked_inverse() {
                    Some(inv) => inv,
                    None => panic!("attempted to invert a singular matrix:\n{}", self),
                }
            }
        }
    };
}

cofactor_expansion!(2, 1);
cofactor_expansion!(3, 2);
cofactor_expansion!(4, 3);

/// Determinant by cofactor expansion along row 0.
macro_rules! expanded_determinant {
    ($n:literal) => {
        impl Matrix<$n, $n> {
            pub fn determinant(&self) -> f64 {
                (0..$n).map(|c| self[(0, c)] * self.cofactor(0, c)).sum()
            }
        }
    };
}

expanded_determinant!(3);
expanded_determinant!(4);

/// Matrices are compared element-wise, within `EPSILON`.
impl<const R: usize, const C: usize> PartialEq for Matrix<R, C> {
    fn eq(&self, other: &Self) -> bool {
        self.data.iter().flatten()
            .zip(other.data.iter().flatten())
            .all(|(x, y)| feq(*x, *y))
    }
}

impl<const R: usize, const C: usize> From<[[f64; C]; R]> for Matrix<R, C> {
    fn from(data: [[f64; C]; R]) -> Self {
        Matrix { data }
    }
}

impl<const R: usize, const C: usize> Index<(usize, usize)> for Matrix<R, C> {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        Self::check_bounds(index.0, index.1);
        &self.data[index.0][index.1]
    }
}

impl<const R: usize, const C: usize> IndexMut<(usize, usize)> for Matrix<R, C> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        self.at_mut(index.0, index.1)
    }
}

/// Multiplication between an `A`x`B` and a `B`x`C` matrix.
///
/// Matrix multiplication is not commutative; for matrices `A` and `B`,
/// `A * B` is not necessarily equal to `B * A`.
impl<const A: usize, const B: usize, const C: usize> Mul<Matrix<B, C>> for Matrix<A, B> {
    type Output = Matrix<A, C>;

    fn mul(self, other: Matrix<B, C>) -> Matrix<A, C> {
        let mut res = Matrix::<A, C>::new();

        for i in 0..A {
            for k in 0..B {
                for j in 0..C {
                    res[(i, j)] += self[(i, k)] * other[(k, j)];
                }
            }
        }

        res
    }
}

/// Multiplication between a 4x4 matrix and a `Tuple`.
///
/// The tuple acts as a 4x1 column, so it sits on the right.
///
/// ```
/// # use ray_kernel::tuple::Tuple;
/// # use ray_kernel::matrix::Matrix4;
/// let m: Matrix4 = [[1.0, 2.0, 3.0, 4.0],
///                   [2.0, 4.0, 4.0, 2.0],
///                   [8.0, 6.0, 4.0, 1.0],
///                   [0.0, 0.0, 0.0, 1.0]].into();
/// assert_eq!(m * Tuple::new(1.0, 2.0, 3.0, 1.0), Tuple::new(18.0, 24.0, 33.0, 1.0));
/// ```
impl Mul<Tuple> for Matrix4 {
    type Output = Tuple;

    fn mul(self, other: Tuple) -> Tuple {
        let row = |r: usize| {
            self[(r, 0)] * other.x
                + self[(r, 1)] * other.y
                + self[(r, 2)] * other.z
                + self[(r, 3)] * other.w
        };

        Tuple::new(row(0), row(1), row(2), row(3))
    }
}

impl<const R: usize, const C: usize> fmt::Display for Matrix<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..R {
            write!(f, "|")?;
            for c in 0..C {
                write!(f, " {} |", self[(r, c)])?;
            }

            // Don't put a newline on the final row (allow the caller to)
            if r + 1 != R {
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[test]
fn construct_and_inspect() {
    let m: Matrix4 = [[ 1.0,  2.0,  3.0,  4.0],
                      [ 5.5,  6.5,  7.5,  8.5],
                      [ 9.0, 10.0, 11.0, 12.0],
                      [13.5, 14.5, 15.5, 16.5]].into();

    assert_eq!(m.at(0, 0), 1.0);
    assert_eq!(m.at(0, 3), 4.0);
    assert_eq!(m.at(1, 0), 5.5);
    assert_eq!(m[(1, 2)], 7.5);
    assert_eq!(m[(2, 2)], 11.0);
    assert_eq!(m[(3, 0)], 13.5);
    assert_eq!(m[(3, 2)], 15.5);
}

#[test]
#[should_panic]
fn out_of_bounds_access() {
    let m = Matrix3::identity();
    m.at(3, 0);
}

#[test]
#[should_panic(expected = "out of bounds")]
fn submatrix_out_of_bounds() {
    let m = Matrix4::identity();
    m.submatrix(0, 4);
}

#[test]
fn approximate_equality() {
    let a: Matrix2 = [[1.0, 2.0], [3.0, 4.0]].into();
    let b: Matrix2 = [[1.000001, 2.0], [3.0, 3.999999]].into();
    let c: Matrix2 = [[1.0, 2.0], [3.0, 4.1]].into();

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn multiply() {
    let a: Matrix4 = [[1.0, 2.0, 3.0, 4.0],
                      [5.0, 6.0, 7.0, 8.0],
                      [9.0, 8.0, 7.0, 6.0],
                      [5.0, 4.0, 3.0, 2.0]].into();
    let b: Matrix4 = [[-2.0, 1.0, 2.0,  3.0],
                      [ 3.0, 2.0, 1.0, -1.0],
                      [ 4.0, 3.0, 6.0,  5.0],
                      [ 1.0, 2.0, 7.0,  8.0]].into();
    let c: Matrix4 = [[20.0, 22.0,  50.0,  48.0],
                      [44.0, 54.0, 114.0, 108.0],
                      [40.0, 58.0, 110.0, 102.0],
                      [16.0, 26.0,  46.0,  42.0]].into();

    assert_eq!(a * b, c);
}

#[test]
fn identity() {
    let i = Matrix4::identity();
    let a: Matrix4 = [[0.0, 1.0,  2.0,  4.0],
                      [1.0, 2.0,  4.0,  8.0],
                      [2.0, 4.0,  8.0, 16.0],
                      [4.0, 8.0, 16.0, 32.0]].into();
    let t = Tuple::new(1.0, 2.0, 3.0, 4.0);

    assert_eq!(i * a, a);
    assert_eq!(a * i, a);
    assert_eq!(i * t, t);
}

#[test]
fn transpose() {
    let a: Matrix4 = [[0.0, 9.0, 3.0, 0.0],
                      [9.0, 8.0, 0.0, 8.0],
                      [1.0, 8.0, 5.0, 3.0],
                      [0.0, 0.0, 5.0, 8.0]].into();
    let t: Matrix4 = [[0.0, 9.0, 1.0, 0.0],
                      [9.0, 8.0, 8.0, 0.0],
                      [3.0, 0.0, 5.0, 5.0],
                      [0.0, 8.0, 3.0, 8.0]].into();

    assert_eq!(t, a.transpose());
    assert_eq!(t.transpose(), a);
    assert_eq!(Matrix4::identity(), Matrix4::identity().transpose());
}

#[test]
fn transpose_non_square() {
    let a: Matrix<2, 3> = [[1.0, 2.0, 3.0],
                           [4.0, 5.0, 6.0]].into();
    let t: Matrix<3, 2> = [[1.0, 4.0],
                           [2.0, 5.0],
                           [3.0, 6.0]].into();

    assert_eq!(a.transpose(), t);
}

#[test]
fn mat2_determinant() {
    let a: Matrix2 = [[ 1.0, 5.0],
                      [-3.0, 2.0]].into();

    assert_eq!(a.determinant(), 17.0);
}

#[test]
fn mat3_submatrix() {
    let a: Matrix3 = [[ 1.0, 5.0,  0.0],
                      [-3.0, 2.0,  7.0],
                      [ 0.0, 6.0, -3.0]].into();
    let s: Matrix2 = [[-3.0, 2.0],
                      [ 0.0, 6.0]].into();

    assert_eq!(a.submatrix(0, 2), s);
}

#[test]
fn mat4_submatrix() {
    let a: Matrix4 = [[-6.0, 1.0,  1.0, 6.0],
                      [-8.0, 5.0,  8.0, 6.0],
                      [-1.0, 0.0,  8.0, 2.0],
                      [-7.0, 1.0, -1.0, 1.0]].into();
    let s: Matrix3 = [[-6.0,  1.0, 6.0],
                      [-8.0,  8.0, 6.0],
                      [-7.0, -1.0, 1.0]].into();

    assert_eq!(a.submatrix(2, 1), s);
}

#[test]
fn mat3_minor_and_cofactor() {
    let a: Matrix3 = [[3.0,  5.0,  0.0],
                      [2.0, -1.0, -7.0],
                      [6.0, -1.0,  5.0]].into();

    assert_eq!(a.submatrix(1, 0).determinant(), 25.0);
    assert_eq!(a.minor(0, 0), -12.0);
    assert_eq!(a.cofactor(0, 0), -12.0);
    assert_eq!(a.minor(1, 0), 25.0);
    assert_eq!(a.cofactor(1, 0), -25.0);
}

#[test]
fn mat3_determinant() {
    let a: Matrix3 = [[ 1.0, 2.0,  6.0],
                      [-5.0, 8.0, -4.0],
                      [ 2.0, 6.0,  4.0]].into();

    assert_eq!(a.cofactor(0, 0), 56.0);
    assert_eq!(a.cofactor(0, 1), 12.0);
    assert_eq!(a.cofactor(0, 2), -46.0);
    assert_eq!(a.determinant(), -196.0);
}

#[test]
fn mat4_determinant() {
    let a: Matrix4 = [[-2.0, -8.0,  3.0,  5.0],
                      [-3.0,  1.0,  7.0,  3.0],
                      [ 1.0,  2.0, -9.0,  6.0],
                      [-6.0,  7.0,  7.0, -9.0]].into();

    assert_eq!(a.cofactor(0, 0), 690.0);
    assert_eq!(a.cofactor(0, 1), 447.0);
    assert_eq!(a.cofactor(0, 2), 210.0);
    assert_eq!(a.cofactor(0, 3), 51.0);
    assert_eq!(a.determinant(), -4071.0);
}

#[test]
fn invertibility() {
    let a: Matrix4 = [[6.0,  4.0, 4.0,  4.0],
                      [5.0,  5.0, 7.0,  6.0],
                      [4.0, -9.0, 3.0, -7.0],
                      [9.0,  1.0, 7.0, -6.0]].into();
    let b: Matrix4 = [[-4.0,  2.0, -2.0, -3.0],
                      [ 9.0,  6.0,  2.0,  6.0],
                      [ 0.0, -5.0,  1.0, -5.0],
                      [ 0.0,  0.0,  0.0,  0.0]].into();

    assert_eq!(a.determinant(), -2120.0);
    assert!(a.is_invertible());
    assert_eq!(b.determinant(), 0.0);
    assert!(!b.is_invertible());
    assert!(b.checked_inverse().is_none());
}

#[test]
#[should_panic]
fn inverse_of_singular_matrix() {
    let b: Matrix4 = [[-4.0,  2.0, -2.0, -3.0],
                      [ 9.0,  6.0,  2.0,  6.0],
                      [ 0.0, -5.0,  1.0, -5.0],
                      [ 0.0,  0.0,  0.0,  0.0]].into();

    b.inverse();
}

#[test]
fn mat4_inverse() {
    let a: Matrix4 = [[-5.0,  2.0,  6.0, -8.0],
                      [ 1.0, -5.0,  1.0,  8.0],
                      [ 7.0,  7.0, -6.0, -7.0],
                      [ 1.0, -3.0,  7.0,  4.0]].into();
    let b = a.inverse();

    assert_eq!(a.determinant(), 532.0);
    assert_eq!(a.cofactor(2, 3), -160.0);
    assert!(crate::math::feq(b[(3, 2)], -160.0 / 532.0));
    assert_eq!(a.cofactor(3, 2), 105.0);
    assert!(crate::math::feq(b[(2, 3)], 105.0 / 532.0));

    let i: Matrix4 = [[ 0.21805,  0.45113,  0.24060, -0.04511],
                      [-0.80827, -1.45677, -0.44361,  0.52068],
                      [-0.07895, -0.22368, -0.05263,  0.19737],
                      [-0.52256, -0.81391, -0.30075,  0.30639]].into();

    assert_eq!(b, i);
}

#[test]
fn mat4_inverse_other() {
    let a: Matrix4 = [[ 8.0, -5.0,  9.0,  2.0],
                      [ 7.0,  5.0,  6.0,  1.0],
                      [-6.0,  0.0,  9.0,  6.0],
                      [-3.0,  0.0, -9.0, -4.0]].into();
    let i: Matrix4 = [[-0.15385, -0.15385, -0.28205, -0.53846],
                      [-0.07692,  0.12308,  0.02564,  0.03077],
                      [ 0.35897,  0.35897,  0.43590,  0.92308],
                      [-0.69231, -0.69231, -0.76923, -1.92308]].into();

    assert_eq!(a.inverse(), i);
}

#[test]
fn mat2_and_mat3_inverse() {
    let a: Matrix2 = [[4.0, 7.0],
                      [2.0, 6.0]].into();
    let b: Matrix3 = [[2.0, 0.0, 0.0],
                      [0.0, 4.0, 0.0],
                      [0.0, 0.0, 8.0]].into();

    let b_inv: Matrix3 = [[0.5,  0.0,   0.0],
                          [0.0, 0.25,   0.0],
                          [0.0,  0.0, 0.125]].into();

    assert_eq!(a * a.inverse(), Matrix2::identity());
    assert_eq!(b.inverse(), b_inv);
}

#[test]
fn mat4_inverse_mult() {
    let a: Matrix4 = [[ 3.0, -9.0,  7.0,  3.0],
                      [ 3.0,  8.0,  2.0, -9.0],
                      [-4.0,  4.0,  4.0,  1.0],
                      [-6.0,  5.0, -1.0,  1.0]].into();
    let b: Matrix4 = [[8.0,  2.0, 2.0, 2.0],
                      [3.0, -1.0, 7.0, 0.0],
                      [7.0,  0.0, 5.0, 4.0],
                      [6.0, -2.0, 0.0, 5.0]].into();

    let c = a * b;
    assert_eq!(a, c * b.inverse());
}

#[test]
fn inverse_properties() {
    let samples: [Matrix4; 3] = [
        [[ 8.0, -5.0,  9.0,  2.0],
         [ 7.0,  5.0,  6.0,  1.0],
         [-6.0,  0.0,  9.0,  6.0],
         [-3.0,  0.0, -9.0, -4.0]].into(),
        [[ 9.0,  3.0,  0.0,  9.0],
         [-5.0, -2.0, -6.0, -3.0],
         [-4.0,  9.0,  6.0,  4.0],
         [-7.0,  6.0,  6.0,  2.0]].into(),
        [[ 2.0,  0.0,  0.0,  1.0],
         [ 0.0,  3.0,  0.5,  0.0],
         [ 0.0,  0.0,  4.0, -2.0],
         [ 0.0,  0.0,  0.0,  1.0]].into(),
    ];

    for m in samples.iter() {
        assert_eq!(*m * m.inverse(), Matrix4::identity());
        assert_eq!(m.inverse().inverse(), *m);
        assert_eq!(m.transpose().inverse(), m.inverse().transpose());
    }

    assert_eq!(Matrix4::identity().inverse(), Matrix4::identity());
}

#[test]
fn display() {
    let a: Matrix2 = [[1.0, 2.0], [3.0, 4.5]].into();

    assert_eq!(a.to_string(), "| 1 | 2 |\n| 3 | 4.5 |");
}
