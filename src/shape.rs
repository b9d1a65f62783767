use crate::tuple::Tuple;
use crate::ray::Ray;
use crate::light::Material;
use crate::transform::Transformation;
use crate::intersect::{ Intersection, Intersections };

/// The kind of a shape.
///
/// Each variant knows how to intersect a ray and compute a normal in its own
/// object space; `Shape` handles the move between object and world space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShapeType {
    /// A unit sphere with its center at the object-space origin.
    Sphere,
}

/// A shape placed in the world.
///
/// `transform` maps object space to world space. Both `transform` and
/// `material` are replaced wholesale by assignment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Shape {
    pub ty: ShapeType,
    pub transform: Transformation,
    pub material: Material,
}

impl Default for Shape {
    fn default() -> Shape {
        Shape::sphere()
    }
}

impl Shape {
    /// Creates a unit sphere with identity transform and default material.
    pub fn sphere() -> Shape {
        Shape {
            ty: ShapeType::Sphere,
            transform: Transformation::identity(),
            material: Default::default(),
        }
    }

    /// Intersects a ray which is already in object space.
    ///
    /// Use `intersect::intersect` for world-space rays.
    pub fn local_intersect(&self, ray: &Ray) -> Intersections {
        match self.ty {
            ShapeType::Sphere => self.intersect_sphere(ray),
        }
    }

    /// The object-space normal at an object-space point.
    pub fn local_normal_at(&self, at: &Tuple) -> Tuple {
        match self.ty {
            ShapeType::Sphere => *at - Tuple::point(0.0, 0.0, 0.0),
        }
    }

    /// The world-space surface normal at a world-space point.
    ///
    /// The point is moved into object space with the inverse transform and
    /// the normal is moved back with the transpose of that inverse, which
    /// keeps it perpendicular to the surface under non-uniform scaling and
    /// shearing. The transposed inverse can disturb `w`, so `w` is reset to
    /// zero before normalizing.
    ///
    /// # Panics
    ///
    /// Panics if the shape's transform is singular.
    pub fn normal_at(&self, world_point: Tuple) -> Tuple {
        let inverse = self.transform.inverse();

        let object_point = inverse * world_point;
        let object_normal = self.local_normal_at(&object_point);
        let mut world_normal = inverse.transpose() * object_normal;
        world_normal.w = 0.0;

        world_normal.normalize()
    }

    /// Solves the ray-sphere quadratic for a unit sphere at the origin.
    ///
    /// A miss produces no intersections. Otherwise both roots are returned,
    /// smaller first when the direction is nonzero; a tangent ray yields the
    /// same `t` twice.
    fn intersect_sphere(&self, ray: &Ray) -> Intersections {
        let sphere_to_ray = ray.origin - Tuple::point(0.0, 0.0, 0.0);

        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

        let discriminant = b.powi(2) - 4.0 * a * c;
        if discriminant < 0.0 {
            return Intersections::new();
        }

        let t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let t2 = (-b + discriminant.sqrt()) / (2.0 * a);

        Intersections::from(vec![
            Intersection::new(t1, self.ty),
            Intersection::new(t2, self.ty),
        ])
    }
}

#[cfg(test)]
use crate::transform::{ translation, scaling, rotation_z };

#[test]
fn default_sphere() {
    let s = Shape::sphere();

    assert_eq!(s.ty, ShapeType::Sphere);
    assert_eq!(s.transform, Transformation::identity());
    assert_eq!(s.material, Material::default());
    assert_eq!(Shape::default(), s);
}

#[test]
fn replace_transform_and_material() {
    let mut s = Shape::sphere();
    let t = translation(2.0, 3.0, 4.0);
    let m = Material { ambient: 1.0, ..Default::default() };

    s.transform = t;
    s.material = m;

    assert_eq!(s.transform, t);
    assert_eq!(s.material, m);
}

#[test]
fn normal_on_axes() {
    let s = Shape::sphere();

    assert_eq!(s.normal_at(Tuple::point(1.0, 0.0, 0.0)),
        Tuple::vector(1.0, 0.0, 0.0));
    assert_eq!(s.normal_at(Tuple::point(0.0, 1.0, 0.0)),
        Tuple::vector(0.0, 1.0, 0.0));
    assert_eq!(s.normal_at(Tuple::point(0.0, 0.0, 1.0)),
        Tuple::vector(0.0, 0.0, 1.0));
}

#[test]
fn normal_at_nonaxial_point() {
    let s = Shape::sphere();
    let k = 3.0f64.sqrt() / 3.0;
    let n = s.normal_at(Tuple::point(k, k, k));

    assert_eq!(n, Tuple::vector(k, k, k));
    assert_eq!(n, n.normalize());
}

#[test]
fn normal_on_translated_sphere() {
    let mut s = Shape::sphere();
    s.transform = translation(0.0, 1.0, 0.0);

    let n = s.normal_at(Tuple::point(0.0, 1.70711, -0.70711));
    assert_eq!(n, Tuple::vector(0.0, 0.70711, -0.70711));
}

#[test]
fn normal_on_transformed_sphere() {
    let mut s = Shape::sphere();
    s.transform = rotation_z(std::f64::consts::PI / 5.0).scaling(1.0, 0.5, 1.0);

    let k = 2.0f64.sqrt() / 2.0;
    let n = s.normal_at(Tuple::point(0.0, k, -k));
    assert_eq!(n, Tuple::vector(0.0, 0.97014, -0.24254));
    assert_eq!(n.w, 0.0);
}

#[test]
fn normal_uses_inverse_transpose() {
    // Under non-uniform scaling, transforming the object normal with the
    // transform itself would tilt it off the surface.
    let mut s = Shape::sphere();
    s.transform = scaling(1.0, 0.5, 1.0);

    let k = 2.0f64.sqrt() / 2.0;
    let p = Tuple::point(0.0, 0.5 * k, -k);
    let n = s.normal_at(p);
    let naive = (s.transform * Tuple::vector(0.0, k, -k)).normalize();

    assert_eq!(n, Tuple::vector(0.0, 2.0, -1.0).normalize());
    assert_ne!(n, naive);
}

#[test]
fn local_intersect_is_in_object_space() {
    let mut s = Shape::sphere();
    s.transform = scaling(2.0, 2.0, 2.0);

    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0));
    let xs = s.local_intersect(&r);

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, 4.0);
    assert_eq!(xs[1].t, 6.0);
    assert_eq!(xs[0].object, ShapeType::Sphere);
}
