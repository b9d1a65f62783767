use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::canvas::Canvas;
use crate::color::Color;
use crate::consts::MAX_CANVAS_PIXELS;
use crate::error::{ Error, Result };
use crate::intersect::{ intersect, intersections };
use crate::light::{ lighting, Material, PointLight };
use crate::ray::Ray;
use crate::shape::Shape;
use crate::transform::Transformation;
use crate::tuple::Tuple;

/// A single shaded sphere, seen through a square wall of pixels.
///
/// Rays start at `ray_origin` and pass through the wall, which is centered
/// on the Z axis at `wall_z` and is `wall_size` units on a side. The wall is
/// divided into `canvas_pixels` by `canvas_pixels` pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub canvas_pixels: usize,
    pub wall_z: f64,
    pub wall_size: f64,
    pub ray_origin: Tuple,
    pub light: PointLight,
    pub sphere: Shape,
}

impl Default for Scene {
    /// A purple unit sphere at the origin, lit from the upper left.
    fn default() -> Scene {
        let mut sphere = Shape::sphere();
        sphere.material.color = Color::rgb(1.0, 0.2, 1.0);

        Scene {
            canvas_pixels: 100,
            wall_z: 10.0,
            wall_size: 7.0,
            ray_origin: Tuple::point(0.0, 0.0, -5.0),
            light: PointLight::new(Tuple::point(-10.0, 10.0, -10.0), Color::white()),
            sphere,
        }
    }
}

impl Scene {
    /// Parses and validates a JSON scene description.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ray_kernel::scene::Scene;
    /// let scene = Scene::from_json_str(r#"{
    ///     "canvas_pixels": 10,
    ///     "wall_z": 10.0,
    ///     "wall_size": 7.0,
    ///     "ray_origin": [0.0, 0.0, -5.0],
    ///     "light": { "position": [-10.0, 10.0, -10.0], "intensity": [1.0, 1.0, 1.0] },
    ///     "sphere": { "transform": [ { "scaling": [1.0, 0.5, 1.0] } ] }
    /// }"#).unwrap();
    ///
    /// assert_eq!(scene.render().width, 10);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Scene> {
        let scene_json: SceneJson = serde_json::from_str(json)?;

        Scene::try_from(scene_json)
    }

    /// Reads a JSON scene description from a file.
    pub fn load(path: &Path) -> Result<Scene> {
        log::debug!("loading scene from {}", path.display());
        let json = fs::read_to_string(path)?;

        Scene::from_json_str(&json)
    }

    /// Renders the scene, one ray per pixel.
    ///
    /// Pixels whose ray hits the sphere are shaded with `lighting`; the rest
    /// stay black. Row 0 is the top of the wall.
    pub fn render(&self) -> Canvas {
        let pixels = self.canvas_pixels;
        let pixel_size = self.wall_size / pixels as f64;
        let half = self.wall_size / 2.0;

        log::debug!("rendering {0}x{0} pixels, wall {1} units at z = {2}",
            pixels, self.wall_size, self.wall_z);

        let mut canvas = Canvas::new(pixels, pixels);
        let mut hits = 0usize;

        for y in 0..pixels {
            // World Y shrinks as canvas rows grow
            let world_y = half - pixel_size * y as f64;

            for x in 0..pixels {
                let world_x = -half + pixel_size * x as f64;
                let position = Tuple::point(world_x, world_y, self.wall_z);

                let ray = Ray::new(self.ray_origin,
                    (position - self.ray_origin).normalize());
                let xs = intersections(intersect(&ray, &self.sphere));

                if let Some(hit) = xs.hit() {
                    let point = ray.position(hit.t);
                    let normal = self.sphere.normal_at(point);
                    let eye = -ray.direction;

                    let color = lighting(&self.sphere.material, &self.light,
                        point, eye, normal);
                    canvas.write_pixel(x, y, color);
                    hits += 1;
                }
            }
        }

        log::debug!("{} of {} rays hit the sphere", hits, pixels * pixels);

        canvas
    }
}

impl TryFrom<SceneJson> for Scene {
    type Error = Error;

    fn try_from(scene_json: SceneJson) -> Result<Scene> {
        if scene_json.canvas_pixels == 0 {
            return Err(Error::InvalidScene(
                "canvas_pixels must be positive".to_string()));
        }

        if scene_json.canvas_pixels > MAX_CANVAS_PIXELS {
            return Err(Error::InvalidScene(
                format!("canvas_pixels must be at most {}, got {}",
                    MAX_CANVAS_PIXELS, scene_json.canvas_pixels)));
        }

        if !(scene_json.wall_size > 0.0 && scene_json.wall_size.is_finite()) {
            return Err(Error::InvalidScene(
                format!("wall_size must be positive, got {}", scene_json.wall_size)));
        }

        if scene_json.ray_origin[2] == scene_json.wall_z {
            return Err(Error::InvalidScene(
                "ray_origin must not lie on the wall plane".to_string()));
        }

        // Apply the transforms in list order; each one prepends
        let transform = scene_json.sphere.transform.iter()
            .fold(Transformation::identity(), |t, op| op.apply(t));

        if transform.checked_inverse().is_none() {
            return Err(Error::InvalidScene(
                format!("sphere transform is not invertible:\n{}", transform)));
        }

        let mut sphere = Shape::sphere();
        sphere.transform = transform;
        sphere.material = scene_json.sphere.material.into();

        let light = PointLight::new(
            point_from(scene_json.light.position),
            scene_json.light.intensity.into(),
        );

        Ok(Scene {
            canvas_pixels: scene_json.canvas_pixels,
            wall_z: scene_json.wall_z,
            wall_size: scene_json.wall_size,
            ray_origin: point_from(scene_json.ray_origin),
            light,
            sphere,
        })
    }
}

fn point_from(p: [f64; 3]) -> Tuple {
    Tuple::point(p[0], p[1], p[2])
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneJson {
    canvas_pixels: usize,
    wall_z: f64,
    wall_size: f64,
    ray_origin: [f64; 3],

    light: LightJson,
    sphere: SphereJson,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LightJson {
    position: [f64; 3],
    intensity: [f64; 3],
}

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SphereJson {
    #[serde(default)]
    transform: Vec<TransformJson>,
    #[serde(default)]
    material: MaterialJson,
}

/// One step of a sphere transform, e.g. `{"rotation_z": 0.5}`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum TransformJson {
    Translation([f64; 3]),
    Scaling([f64; 3]),
    RotationX(f64),
    RotationY(f64),
    RotationZ(f64),
    Shearing([f64; 6]),
}

impl TransformJson {
    fn apply(&self, t: Transformation) -> Transformation {
        match *self {
            TransformJson::Translation([x, y, z]) => t.translation(x, y, z),
            TransformJson::Scaling([x, y, z]) => t.scaling(x, y, z),
            TransformJson::RotationX(r) => t.rotation_x(r),
            TransformJson::RotationY(r) => t.rotation_y(r),
            TransformJson::RotationZ(r) => t.rotation_z(r),
            TransformJson::Shearing([xy, xz, yx, yz, zx, zy])
                => t.shearing(xy, xz, yx, yz, zx, zy),
        }
    }
}

/// Material overrides; omitted fields keep the `Material` defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MaterialJson {
    color: Option<[f64; 3]>,
    ambient: Option<f64>,
    diffuse: Option<f64>,
    specular: Option<f64>,
    shininess: Option<f64>,
}

impl From<MaterialJson> for Material {
    fn from(material_json: MaterialJson) -> Material {
        let defaults = Material::default();

        Material {
            color: material_json.color.map(Color::from).unwrap_or(defaults.color),
            ambient: material_json.ambient.unwrap_or(defaults.ambient),
            diffuse: material_json.diffuse.unwrap_or(defaults.diffuse),
            specular: material_json.specular.unwrap_or(defaults.specular),
            shininess: material_json.shininess.unwrap_or(defaults.shininess),
        }
    }
}

#[cfg(test)]
const PURPLE_SCENE: &str = r#"{
    "canvas_pixels": 100,
    "wall_z": 10.0,
    "wall_size": 7.0,
    "ray_origin": [0.0, 0.0, -5.0],
    "light": { "position": [-10.0, 10.0, -10.0], "intensity": [1.0, 1.0, 1.0] },
    "sphere": { "material": { "color": [1.0, 0.2, 1.0] } }
}"#;

#[cfg(test)]
fn scene_with_sphere(sphere: &str) -> String {
    format!(r#"{{
        "canvas_pixels": 20,
        "wall_z": 10.0,
        "wall_size": 7.0,
        "ray_origin": [0.0, 0.0, -5.0],
        "light": {{ "position": [-10.0, 10.0, -10.0], "intensity": [1.0, 1.0, 1.0] }},
        "sphere": {}
    }}"#, sphere)
}

#[test]
fn json_matches_default_scene() {
    let scene = Scene::from_json_str(PURPLE_SCENE).unwrap();

    assert_eq!(scene, Scene::default());
}

#[test]
fn omitted_material_fields_take_defaults() {
    let json = scene_with_sphere(r#"{ "material": { "ambient": 0.5 } }"#);
    let scene = Scene::from_json_str(&json).unwrap();

    assert_eq!(scene.sphere.material,
        Material { ambient: 0.5, ..Default::default() });
}

#[test]
fn omitted_sphere_fields_take_defaults() {
    let scene = Scene::from_json_str(&scene_with_sphere("{}")).unwrap();

    assert_eq!(scene.sphere, Shape::sphere());
}

#[test]
fn transforms_apply_in_list_order() {
    let json = scene_with_sphere(r#"{ "transform": [
        { "translation": [1.0, 0.0, 0.0] },
        { "scaling": [2.0, 2.0, 2.0] }
    ] }"#);
    let scene = Scene::from_json_str(&json).unwrap();

    // Translated first, then scaled
    assert_eq!(scene.sphere.transform * Tuple::point(0.0, 0.0, 0.0),
        Tuple::point(2.0, 0.0, 0.0));
}

#[test]
fn every_transform_op_parses() {
    let json = scene_with_sphere(r#"{ "transform": [
        { "translation": [0.0, 1.0, 0.0] },
        { "scaling": [1.0, 2.0, 1.0] },
        { "rotation_x": 0.1 },
        { "rotation_y": 0.2 },
        { "rotation_z": 0.3 },
        { "shearing": [1.0, 0.0, 0.0, 0.0, 0.0, 0.0] }
    ] }"#);
    let scene = Scene::from_json_str(&json).unwrap();

    let expected = Transformation::identity()
        .translation(0.0, 1.0, 0.0)
        .scaling(1.0, 2.0, 1.0)
        .rotation_x(0.1)
        .rotation_y(0.2)
        .rotation_z(0.3)
        .shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    assert_eq!(scene.sphere.transform, expected);
}

#[test]
fn reject_empty_canvas() {
    let json = PURPLE_SCENE.replace("\"canvas_pixels\": 100", "\"canvas_pixels\": 0");

    assert!(matches!(Scene::from_json_str(&json), Err(Error::InvalidScene(_))));
}

#[test]
fn reject_oversized_canvas() {
    let too_big = format!("\"canvas_pixels\": {}", MAX_CANVAS_PIXELS + 1);
    let json = PURPLE_SCENE.replace("\"canvas_pixels\": 100", &too_big);
    assert!(matches!(Scene::from_json_str(&json), Err(Error::InvalidScene(_))));

    let overflowing = PURPLE_SCENE
        .replace("\"canvas_pixels\": 100", "\"canvas_pixels\": 4294967296");
    assert!(matches!(Scene::from_json_str(&overflowing),
        Err(Error::InvalidScene(_)) | Err(Error::Json(_))));
}

#[test]
fn accept_largest_canvas() {
    let largest = format!("\"canvas_pixels\": {}", MAX_CANVAS_PIXELS);
    let json = PURPLE_SCENE.replace("\"canvas_pixels\": 100", &largest);

    assert_eq!(Scene::from_json_str(&json).unwrap().canvas_pixels, MAX_CANVAS_PIXELS);
}

#[test]
fn reject_unknown_sphere_key() {
    // A misspelled key must not fall back to the identity transform
    let json = scene_with_sphere(r#"{ "transfrom": [ { "scaling": [0.0, 1.0, 1.0] } ] }"#);

    assert!(matches!(Scene::from_json_str(&json), Err(Error::Json(_))));
}

#[test]
fn reject_unknown_scene_and_light_keys() {
    let top = PURPLE_SCENE.replace("\"wall_z\"", "\"wallz\"");
    assert!(matches!(Scene::from_json_str(&top), Err(Error::Json(_))));

    let extra = PURPLE_SCENE.replace("\"canvas_pixels\": 100,",
        "\"canvas_pixels\": 100, \"fov\": 1.0,");
    assert!(matches!(Scene::from_json_str(&extra), Err(Error::Json(_))));

    let light = PURPLE_SCENE.replace("\"intensity\"", "\"colour\"");
    assert!(matches!(Scene::from_json_str(&light), Err(Error::Json(_))));
}

#[test]
fn reject_non_positive_wall() {
    let json = PURPLE_SCENE.replace("\"wall_size\": 7.0", "\"wall_size\": -7.0");

    assert!(matches!(Scene::from_json_str(&json), Err(Error::InvalidScene(_))));
}

#[test]
fn reject_origin_on_wall() {
    let json = PURPLE_SCENE.replace("\"wall_z\": 10.0", "\"wall_z\": -5.0");

    assert!(matches!(Scene::from_json_str(&json), Err(Error::InvalidScene(_))));
}

#[test]
fn reject_singular_transform() {
    let json = scene_with_sphere(r#"{ "transform": [ { "scaling": [0.0, 1.0, 1.0] } ] }"#);

    assert!(matches!(Scene::from_json_str(&json), Err(Error::InvalidScene(_))));
}

#[test]
fn reject_malformed_json() {
    assert!(matches!(Scene::from_json_str("{ \"canvas_pixels\": "),
        Err(Error::Json(_))));

    let json = scene_with_sphere(r#"{ "transform": [ { "skew": 1.0 } ] }"#);
    assert!(matches!(Scene::from_json_str(&json), Err(Error::Json(_))));
}

#[test]
fn load_missing_file() {
    let path = Path::new("./this/scene/does/not/exist.json");

    assert!(matches!(Scene::load(path), Err(Error::Io(_))));
}

#[test]
fn render_default_scene() {
    let scene = Scene::default();
    let canvas = scene.render();

    assert_eq!(canvas.width, 100);
    assert_eq!(canvas.height, 100);

    // The wall corner is well outside the sphere
    assert_eq!(canvas.read_pixel(0, 0), Some(Color::black()));

    // The center ray strikes the sphere head-on at (0, 0, -1)
    let center = canvas.read_pixel(50, 50).unwrap();
    let point = Tuple::point(0.0, 0.0, -1.0);
    let eye = Tuple::vector(0.0, 0.0, -1.0);
    let normal = scene.sphere.normal_at(point);
    assert_eq!(center,
        lighting(&scene.sphere.material, &scene.light, point, eye, normal));
    assert!(center.red > center.green);
}

#[test]
fn render_is_lit_from_the_upper_left() {
    let canvas = Scene::default().render();

    let upper_left = canvas.read_pixel(40, 40).unwrap();
    let lower_right = canvas.read_pixel(60, 60).unwrap();
    assert!(upper_left.red > lower_right.red);
}
