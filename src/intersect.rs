use std::cmp::Ordering;
use std::ops::Index;
use std::slice;

use crate::ray::Ray;
use crate::shape::{ Shape, ShapeType };

/// An intersection.
///
/// This structure assumes that some ray produced an intersection. Parameter `t`
/// is analogous to `t` for a ray (the offset from the ray origin).
///
/// The `object` field records which kind of shape was struck. Intersections
/// are plain values; they hold no reference to the ray or the shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Intersection {
    pub t: f64,
    pub object: ShapeType,
}

impl Intersection {
    pub fn new(t: f64, object: ShapeType) -> Intersection {
        Intersection { t, object }
    }

    /// Orders intersections so that the hit comes first.
    ///
    /// Nonnegative `t`s sort ascending and ahead of every negative `t`.
    /// Negative `t`s are never placed before another intersection; among
    /// themselves they compare equal, so a stable sort leaves them in input
    /// order at the back.
    pub fn hit_order(&self, other: &Intersection) -> Ordering {
        match (self.t < 0.0, other.t < 0.0) {
            (false, false) => self.t.total_cmp(&other.t),
            (false, true) => Ordering::Less,
            (true, false) => Ordering::Greater,
            (true, true) => Ordering::Equal,
        }
    }
}

/// A collection of intersections.
///
/// Mostly a wrapper for a vector of `Intersection` objects. See the
/// `Intersection` documentation for more information.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Intersections {
    pub intersections: Vec<Intersection>,
}

impl Intersections {
    /// Creates a new, empty list of intersections.
    pub fn new() -> Intersections {
        Intersections { intersections: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Intersection> {
        self.intersections.iter()
    }

    /// Sorts the intersections with `Intersection::hit_order`.
    pub fn sort(&mut self) {
        self.intersections.sort_by(Intersection::hit_order);
    }

    /// Whether the intersections are in `Intersection::hit_order`.
    pub fn is_sorted(&self) -> bool {
        is_hit_ordered(&self.intersections)
    }

    /// The hit of a sorted list. See the free function `hit`.
    pub fn hit(&self) -> Option<Intersection> {
        hit(&self.intersections)
    }
}

impl From<Vec<Intersection>> for Intersections {
    fn from(intersections: Vec<Intersection>) -> Intersections {
        Intersections { intersections }
    }
}

impl Index<usize> for Intersections {
    type Output = Intersection;

    fn index(&self, index: usize) -> &Intersection {
        &self.intersections[index]
    }
}

impl IntoIterator for Intersections {
    type Item = Intersection;
    type IntoIter = std::vec::IntoIter<Intersection>;

    fn into_iter(self) -> Self::IntoIter {
        self.intersections.into_iter()
    }
}

impl<'a> IntoIterator for &'a Intersections {
    type Item = &'a Intersection;
    type IntoIter = slice::Iter<'a, Intersection>;

    fn into_iter(self) -> Self::IntoIter {
        self.intersections.iter()
    }
}

fn is_hit_ordered(xs: &[Intersection]) -> bool {
    xs.windows(2).all(|w| w[0].hit_order(&w[1]) != Ordering::Greater)
}

/// Intersects a world-space ray with a `Shape`.
///
/// The ray is moved into object space with the inverse of the shape's
/// transform, so every shape can be intersected in its canonical form. The
/// resulting `t` values are valid along the original ray as well.
///
/// A miss is an empty `Intersections`, not an error. The result is in the
/// order the shape produced it; pass it through `intersections` before
/// asking for a hit.
///
/// # Panics
///
/// Panics if the shape's transform is singular.
pub fn intersect(ray: &Ray, shape: &Shape) -> Intersections {
    let inverse_transform = shape.transform.inverse();
    let local_ray = ray.transform(&inverse_transform);

    shape.local_intersect(&local_ray)
}

/// Aggregates intersections, sorted for hit selection.
///
/// # Examples
///
/// ```
/// # use ray_kernel::intersect::{ Intersection, intersections };
/// # use ray_kernel::shape::ShapeType;
/// let xs = intersections([5.0, 7.0, -3.0, 2.0]
///     .iter()
///     .map(|&t| Intersection::new(t, ShapeType::Sphere)));
///
/// assert_eq!(xs.hit().map(|i| i.t), Some(2.0));
/// ```
pub fn intersections<I>(xs: I) -> Intersections
    where I: IntoIterator<Item = Intersection> {
    let mut all = Intersections { intersections: xs.into_iter().collect() };
    all.sort();

    all
}

/// Selects the hit: the first intersection, if its `t` is nonnegative.
///
/// The input must already be sorted by `Intersection::hit_order` (as
/// `intersections` returns it); the hit is then always at the front.
///
/// # Panics
///
/// In debug builds, panics if the input is not sorted.
pub fn hit(xs: &[Intersection]) -> Option<Intersection> {
    debug_assert!(is_hit_ordered(xs),
        "hit selection requires intersections sorted by hit order");

    xs.first().filter(|i| i.t >= 0.0).copied()
}

#[cfg(test)]
use crate::tuple::Tuple;
#[cfg(test)]
use crate::transform::{ translation, scaling };

#[cfg(test)]
fn sphere_at(t: f64) -> Intersection {
    Intersection::new(t, ShapeType::Sphere)
}

#[test]
fn intersection_fields() {
    let i = Intersection::new(3.5, ShapeType::Sphere);

    assert_eq!(i.t, 3.5);
    assert_eq!(i.object, ShapeType::Sphere);
}

#[test]
fn ray_pierces_sphere() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = intersect(&r, &Shape::sphere());

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, 4.0);
    assert_eq!(xs[1].t, 6.0);
    assert_eq!(xs[0].object, ShapeType::Sphere);
    assert_eq!(xs[1].object, ShapeType::Sphere);
}

#[test]
fn ray_is_tangent_to_sphere() {
    let r = Ray::new(Tuple::point(0.0, 1.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = intersect(&r, &Shape::sphere());

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, 5.0);
    assert_eq!(xs[1].t, 5.0);
}

#[test]
fn ray_misses_sphere() {
    let r = Ray::new(Tuple::point(0.0, 2.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = intersect(&r, &Shape::sphere());

    assert!(xs.is_empty());
    assert_eq!(intersections(xs).hit(), None);
}

#[test]
fn ray_originates_inside_sphere() {
    let r = Ray::new(Tuple::point(0.0, 0.0, 0.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = intersect(&r, &Shape::sphere());

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, -1.0);
    assert_eq!(xs[1].t, 1.0);
}

#[test]
fn sphere_behind_ray() {
    let r = Ray::new(Tuple::point(0.0, 0.0, 5.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = intersect(&r, &Shape::sphere());

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, -6.0);
    assert_eq!(xs[1].t, -4.0);
}

#[test]
fn intersect_scaled_sphere() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let mut s = Shape::sphere();
    s.transform = scaling(2.0, 2.0, 2.0);
    let xs = intersect(&r, &s);

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, 3.0);
    assert_eq!(xs[1].t, 7.0);
}

#[test]
fn intersect_translated_sphere() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let mut s = Shape::sphere();
    s.transform = translation(5.0, 0.0, 0.0);

    assert!(intersect(&r, &s).is_empty());
}

#[test]
fn transformed_sphere_matches_inverse_transformed_ray() {
    let transforms = [
        scaling(2.0, 2.0, 2.0),
        translation(0.5, -0.25, 1.0),
        scaling(1.0, 0.5, 2.0).translation(0.1, 0.2, 0.0).rotation_y(0.5),
    ];
    let rays = [
        Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0)),
        Ray::new(Tuple::point(0.3, 0.2, -4.0), Tuple::vector(0.0, 0.1, 1.0)),
        Ray::new(Tuple::point(-6.0, 0.0, 0.0), Tuple::vector(2.0, 0.0, 0.1)),
    ];

    for m in transforms.iter() {
        let mut s = Shape::sphere();
        s.transform = *m;

        for r in rays.iter() {
            let local = r.transform(&m.inverse());
            assert_eq!(intersect(r, &s), intersect(&local, &Shape::sphere()));
        }
    }
}

#[test]
fn hit_all_positive() {
    let xs = intersections(vec![sphere_at(1.0), sphere_at(2.0)]);

    assert_eq!(xs.hit(), Some(sphere_at(1.0)));
}

#[test]
fn hit_some_negative() {
    let xs = intersections(vec![sphere_at(-1.0), sphere_at(1.0)]);

    assert_eq!(xs.hit(), Some(sphere_at(1.0)));
}

#[test]
fn hit_all_negative() {
    let xs = intersections(vec![sphere_at(-2.0), sphere_at(-1.0)]);

    assert_eq!(xs.hit(), None);
}

#[test]
fn hit_is_lowest_nonnegative() {
    let xs = intersections(vec![
        sphere_at(5.0), sphere_at(7.0), sphere_at(-3.0), sphere_at(2.0)
    ]);

    assert_eq!(xs.hit(), Some(sphere_at(2.0)));
}

#[test]
fn hit_of_zero_t() {
    let xs = intersections(vec![sphere_at(3.0), sphere_at(0.0), sphere_at(-0.5)]);

    assert_eq!(xs.hit(), Some(sphere_at(0.0)));
}

#[test]
fn hit_of_nothing() {
    assert_eq!(intersections(Vec::new()).hit(), None);
    assert_eq!(hit(&[]), None);
}

#[test]
fn negatives_sort_to_the_back_in_input_order() {
    let xs = intersections(vec![
        sphere_at(-1.0), sphere_at(4.0), sphere_at(-7.0), sphere_at(0.5), sphere_at(-3.0)
    ]);
    let ts: Vec<f64> = xs.iter().map(|i| i.t).collect();

    assert_eq!(ts, vec![0.5, 4.0, -1.0, -7.0, -3.0]);
    assert!(xs.is_sorted());
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
fn hit_rejects_unsorted_input() {
    hit(&[sphere_at(5.0), sphere_at(2.0)]);
}
