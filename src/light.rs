use crate::color::Color;
use crate::tuple::Tuple;

/// A point light.
///
/// A very simple light source. Provides a position where light is produced
/// from and the color of that light. There is no attenuation with distance.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointLight {
    pub position: Tuple,
    pub intensity: Color,
}

impl PointLight {
    /// Creates a point light.
    ///
    /// If `position` isn't a point, it is converted to a point automatically.
    pub fn new(mut position: Tuple, intensity: Color) -> PointLight {
        if !position.is_point() {
            position.w = 1.0;
        }

        PointLight { position, intensity }
    }
}

/// A material record.
///
/// Materials use attributes from the Phong reflection model; ambient, diffuse,
/// specular and shininess.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Material {
    pub color: Color,

    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
}

impl Default for Material {
    fn default() -> Material {
        Material {
            color: Color::white(),

            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
        }
    }
}

/// Calculate the lighting of a point on a surface.
///
/// Takes a material, a single light, the surface point, the eye vector and
/// the normal vector, and calculates how the light looks from the eye. Both
/// `eyev` and `normalv` are expected to be normalized. The result is the sum
/// of the ambient, diffuse and specular terms, and is not clamped.
///
/// # Examples
///
/// ```
/// # use ray_kernel::color::Color;
/// # use ray_kernel::tuple::Tuple;
/// # use ray_kernel::light::{ lighting, Material, PointLight };
/// let light = PointLight::new(Tuple::point(0.0, 0.0, -10.0), Color::white());
/// let c = lighting(&Material::default(), &light,
///     Tuple::point(0.0, 0.0, 0.0),
///     Tuple::vector(0.0, 0.0, -1.0),
///     Tuple::vector(0.0, 0.0, -1.0));
///
/// assert_eq!(c, Color::rgb(1.9, 1.9, 1.9));
/// ```
pub fn lighting(m: &Material, light: &PointLight,
    point: Tuple, eyev: Tuple, normalv: Tuple) -> Color {
    // Combine surface color with light's color
    let effective_color = m.color * light.intensity;

    // Find direction to light source
    let lightv = (light.position - point).normalize();

    // Compute ambient light
    let ambient = effective_color * m.ambient;

    let diffuse;
    let specular;

    // For the side of the surface with no light, use only ambient light
    let light_dot_normal = lightv.dot(&normalv);
    if light_dot_normal < 0.0 {
        diffuse = Color::black();
        specular = Color::black();
    } else {
        diffuse = effective_color * m.diffuse * light_dot_normal;

        let reflectv = (-lightv).reflect(&normalv);
        let reflect_dot_eye = reflectv.dot(&eyev);

        // Light reflecting away from the eye has no highlight
        if reflect_dot_eye <= 0.0 {
            specular = Color::black();
        } else {
            let factor = reflect_dot_eye.powf(m.shininess);
            specular = light.intensity * m.specular * factor;
        }
    }

    ambient + diffuse + specular
}

#[cfg(test)]
fn white_light_at(x: f64, y: f64, z: f64) -> PointLight {
    PointLight::new(Tuple::point(x, y, z), Color::white())
}

#[test]
fn point_light_fields() {
    let light = PointLight::new(Tuple::point(0.0, 0.0, 0.0), Color::white());

    assert_eq!(light.position, Tuple::point(0.0, 0.0, 0.0));
    assert_eq!(light.intensity, Color::white());
}

#[test]
fn point_light_position_becomes_point() {
    let light = PointLight::new(Tuple::vector(1.0, 2.0, 3.0), Color::white());

    assert!(light.position.is_point());
    assert_eq!(light.position, Tuple::point(1.0, 2.0, 3.0));
}

#[test]
fn default_material() {
    let m = Material::default();

    assert_eq!(m.color, Color::rgb(1.0, 1.0, 1.0));
    assert_eq!(m.ambient, 0.1);
    assert_eq!(m.diffuse, 0.9);
    assert_eq!(m.specular, 0.9);
    assert_eq!(m.shininess, 200.0);
}

#[test]
fn eye_between_light_and_surface() {
    let m = Material::default();
    let position = Tuple::point(0.0, 0.0, 0.0);

    let eyev = Tuple::vector(0.0, 0.0, -1.0);
    let normalv = Tuple::vector(0.0, 0.0, -1.0);
    let light = white_light_at(0.0, 0.0, -10.0);

    let res = lighting(&m, &light, position, eyev, normalv);
    assert_eq!(res, Color::rgb(1.9, 1.9, 1.9));
}

#[test]
fn eye_between_light_and_surface_offset_45() {
    let m = Material::default();
    let position = Tuple::point(0.0, 0.0, 0.0);

    let eyev = Tuple::vector(0.0, 2.0f64.sqrt() / 2.0, -(2.0f64.sqrt()) / 2.0);
    let normalv = Tuple::vector(0.0, 0.0, -1.0);
    let light = white_light_at(0.0, 0.0, -10.0);

    let res = lighting(&m, &light, position, eyev, normalv);
    assert_eq!(res, Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn eye_opposite_from_surface_offset_45() {
    let m = Material::default();
    let position = Tuple::point(0.0, 0.0, 0.0);

    let eyev = Tuple::vector(0.0, 0.0, -1.0);
    let normalv = Tuple::vector(0.0, 0.0, -1.0);
    let light = white_light_at(0.0, 10.0, -10.0);

    let res = lighting(&m, &light, position, eyev, normalv);
    assert_eq!(res, Color::rgb(0.7364, 0.7364, 0.7364));
}

#[test]
fn eye_in_path_of_reflection() {
    let m = Material::default();
    let position = Tuple::point(0.0, 0.0, 0.0);

    let eyev = Tuple::vector(0., -(2.0f64.sqrt())/2., -(2.0f64.sqrt())/2.);
    let normalv = Tuple::vector(0.0, 0.0, -1.0);
    let light = white_light_at(0.0, 10.0, -10.0);

    let res = lighting(&m, &light, position, eyev, normalv);
    assert_eq!(res, Color::rgb(1.6364, 1.6364, 1.6364));
}

#[test]
fn light_behind_surface() {
    let m = Material::default();
    let position = Tuple::point(0.0, 0.0, 0.0);

    let eyev = Tuple::vector(0.0, 0.0, -1.0);
    let normalv = Tuple::vector(0.0, 0.0, -1.0);
    let light = white_light_at(0.0, 0.0, 10.0);

    let res = lighting(&m, &light, position, eyev, normalv);
    assert_eq!(res, Color::rgb(0.1, 0.1, 0.1));
}

#[test]
fn lighting_is_tinted_by_color_and_intensity() {
    let m = Material {
        color: Color::rgb(1.0, 0.2, 1.0),
        ambient: 1.0,
        diffuse: 0.0,
        specular: 0.0,
        ..Default::default()
    };
    let light = PointLight::new(Tuple::point(0.0, 0.0, -10.0),
        Color::rgb(0.5, 1.0, 0.5));

    let res = lighting(&m, &light, Tuple::point(0.0, 0.0, 0.0),
        Tuple::vector(0.0, 0.0, -1.0), Tuple::vector(0.0, 0.0, -1.0));
    assert_eq!(res, Color::rgb(0.5, 0.2, 0.5));
}

#[test]
fn lighting_is_unclamped() {
    let m = Material { ambient: 1.0, ..Default::default() };
    let light = PointLight::new(Tuple::point(0.0, 0.0, -10.0),
        Color::rgb(2.0, 2.0, 2.0));

    let res = lighting(&m, &light, Tuple::point(0.0, 0.0, 0.0),
        Tuple::vector(0.0, 0.0, -1.0), Tuple::vector(0.0, 0.0, -1.0));
    assert_eq!(res, Color::rgb(5.6, 5.6, 5.6));
}
