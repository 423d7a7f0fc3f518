use serde_json::Value;
use thiserror::Error;

use crate::camera::Camera;
use crate::color::Color;
use crate::direction::Direction;
use crate::light::PointLight;
use crate::material::Material;
use crate::matrix::{Matrix33f, Matrix44f};
use crate::object::{Composite, Object, Surface};
use crate::point::Point;
use crate::shapes::Shape;
use crate::texture::{PatternKind, Texture};
use crate::world::World;

#[derive(Debug, Error)]
pub enum SceneError {
    #[error("malformed scene JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` should be {expected}")]
    Malformed {
        field: &'static str,
        expected: &'static str,
    },
    #[error("unknown shape type `{0}`, check spelling in the scene file")]
    UnknownShape(String),
    #[error("unknown pattern type `{0}`, check spelling in the scene file")]
    UnknownPattern(String),
    #[error("unknown transform type `{0}`, check spelling in the scene file")]
    UnknownTransform(String),
    #[error("transform `{kind}` takes {expected} values, got {actual}")]
    TransformArity {
        kind: String,
        expected: &'static str,
        actual: usize,
    },
    #[error("transform matrix is singular and cannot be inverted")]
    SingularTransform,
}

/// A fully loaded scene, ready to render.
pub struct Scene {
    pub world: World,
    pub camera: Camera,
}

pub fn parse(text: &str) -> Result<Scene, SceneError> {
    let root: Value = serde_json::from_str(text)?;

    let world_data = field(&root, "world")?;
    let light = parse_light(field(world_data, "light_source")?)?;

    let mut objects = Vec::new();
    for object_data in array(field(world_data, "objects")?, "world.objects")? {
        objects.push(parse_object(object_data)?);
    }

    let camera = parse_camera(field(&root, "camera")?)?;

    Ok(Scene {
        world: World::new(light, objects),
        camera,
    })
}

fn parse_light(value: &Value) -> Result<PointLight, SceneError> {
    let intensity = color(field(value, "intensity")?, "light_source.intensity")?;
    let position = point(field(value, "position")?, "light_source.position")?;
    Ok(PointLight::new(intensity, position))
}

fn parse_camera(value: &Value) -> Result<Camera, SceneError> {
    let width = unsigned(field(value, "viewport_width")?, "camera.viewport_width")?;
    let height = unsigned(field(value, "viewport_height")?, "camera.viewport_height")?;
    let fov = number(field(value, "field_of_view")?, "camera.field_of_view")?;

    let transform_data = field(value, "transform")?;
    let from = point(field(transform_data, "input_base")?, "camera.input_base")?;
    let to = point(field(transform_data, "output_base")?, "camera.output_base")?;
    let up = direction(field(transform_data, "up_vector")?, "camera.up_vector")?;

    let view = Matrix44f::view_transform(from, to, up);
    if view.try_inverse().is_none() {
        return Err(SceneError::SingularTransform);
    }

    Ok(Camera::new(width, height, fov, view))
}

fn parse_object(value: &Value) -> Result<Object, SceneError> {
    let shape_name = string(field(value, "shape")?, "shape")?;
    let transform = parse_transform_chain(value.get("transform"))?;

    if shape_name == "group" {
        let mut composite = match value.get("material") {
            Some(material) => Composite::with_material(transform, parse_material(material)?),
            None => Composite::new(transform),
        };
        for child in array(field(value, "children")?, "group.children")? {
            composite.add_child(parse_object(child)?);
        }
        return Ok(Object::Composite(composite));
    }

    let shape = match shape_name {
        "plane" => Shape::Plane,
        "sphere" => Shape::Sphere,
        "cube" => Shape::Cube,
        "cylinder" => {
            let (y_min, y_max, closed) = parse_shape_bounds(value)?;
            Shape::Cylinder {
                y_min,
                y_max,
                closed,
            }
        }
        "cone" => {
            let (y_min, y_max, closed) = parse_shape_bounds(value)?;
            Shape::Cone {
                y_min,
                y_max,
                closed,
            }
        }
        "triangle" => {
            let vertices = array(field(value, "vertices")?, "triangle.vertices")?;
            if vertices.len() != 3 {
                return Err(SceneError::Malformed {
                    field: "triangle.vertices",
                    expected: "three [x, y, z] points",
                });
            }
            Shape::triangle(
                point(&vertices[0], "triangle.vertices")?,
                point(&vertices[1], "triangle.vertices")?,
                point(&vertices[2], "triangle.vertices")?,
            )
        }
        other => return Err(SceneError::UnknownShape(other.to_string())),
    };

    let material = match value.get("material") {
        Some(material) => parse_material(material)?,
        None => Material::default(),
    };

    Ok(Object::Surface(Surface::new(shape, transform, material)))
}

fn parse_shape_bounds(value: &Value) -> Result<(f64, f64, bool), SceneError> {
    let Some(bounds) = value.get("bounds") else {
        return Ok((f64::NEG_INFINITY, f64::INFINITY, false));
    };

    let y_min = match bounds.get("y_min") {
        Some(v) => number(v, "bounds.y_min")?,
        None => f64::NEG_INFINITY,
    };
    let y_max = match bounds.get("y_max") {
        Some(v) => number(v, "bounds.y_max")?,
        None => f64::INFINITY,
    };
    let closed = match bounds.get("closed") {
        Some(v) => v.as_bool().ok_or(SceneError::Malformed {
            field: "bounds.closed",
            expected: "a boolean",
        })?,
        None => false,
    };
    Ok((y_min, y_max, closed))
}

fn parse_material(value: &Value) -> Result<Material, SceneError> {
    let mut material = Material::default();

    if let Some(v) = value.get("ambient") {
        material.ambient = number(v, "material.ambient")?;
    }
    if let Some(v) = value.get("diffuse") {
        material.diffuse = number(v, "material.diffuse")?;
    }
    if let Some(v) = value.get("specular") {
        material.specular = number(v, "material.specular")?;
    }
    if let Some(v) = value.get("shininess") {
        material.shininess = number(v, "material.shininess")?;
    }
    if let Some(v) = value.get("reflectivity") {
        material.reflectivity = number(v, "material.reflectivity")?;
    }
    if let Some(v) = value.get("transparency") {
        material.transparency = number(v, "material.transparency")?;
    }
    if let Some(v) = value.get("refractive_index") {
        material.refractive_index = number(v, "material.refractive_index")?;
    }

    if let Some(pattern) = value.get("pattern") {
        material.texture = parse_pattern(pattern)?;
    } else if let Some(c) = value.get("color") {
        material.texture = Texture::solid(color(c, "material.color")?);
    }

    Ok(material)
}

fn parse_pattern(value: &Value) -> Result<Texture, SceneError> {
    let type_name = string(field(value, "type")?, "pattern.type")?;
    let transform = parse_transform_chain(value.get("transform"))?;
    let a = Texture::solid(color(field(value, "color_a")?, "pattern.color_a")?);
    let b = Texture::solid(color(field(value, "color_b")?, "pattern.color_b")?);

    let (kind, three_dimensional) = match type_name {
        "stripe" => (PatternKind::Stripe, false),
        "ring" => (PatternKind::Ring, false),
        "checker" => (PatternKind::Checker, false),
        "gradient" => (PatternKind::Gradient, false),
        "stripe3d" => (PatternKind::Stripe, true),
        "ring3d" => (PatternKind::Ring, true),
        "checker3d" => (PatternKind::Checker, true),
        "gradient3d" => (PatternKind::Gradient, true),
        other => return Err(SceneError::UnknownPattern(other.to_string())),
    };

    if three_dimensional {
        Ok(Texture::pattern_3d(kind, transform, a, b))
    } else {
        let uv_transform = uv_projection(&transform);
        if uv_transform.try_inverse().is_none() {
            return Err(SceneError::SingularTransform);
        }
        Ok(Texture::pattern_2d(kind, uv_transform, a, b))
    }
}

/// Projects a scene transform onto the (x, z) plane the planar texture map
/// samples, giving the equivalent UV-space transform.
fn uv_projection(m: &Matrix44f) -> Matrix33f {
    Matrix33f([
        [m[0][0], m[0][2], m[0][3]],
        [m[2][0], m[2][2], m[2][3]],
        [m[3][0], m[3][2], m[3][3]],
    ])
}

/// Composes a TM list left-to-right and validates invertibility. A missing
/// list means the identity.
fn parse_transform_chain(value: Option<&Value>) -> Result<Matrix44f, SceneError> {
    let mut matrix = Matrix44f::identity();
    if let Some(value) = value {
        for tm in array(value, "transform")? {
            matrix = matrix * parse_transform(tm)?;
        }
    }
    if matrix.try_inverse().is_none() {
        return Err(SceneError::SingularTransform);
    }
    Ok(matrix)
}

fn parse_transform(value: &Value) -> Result<Matrix44f, SceneError> {
    let kind = string(field(value, "type")?, "transform.type")?;
    let values = array(field(value, "values")?, "transform.values")?;
    let mut nums = Vec::with_capacity(values.len());
    for v in values {
        nums.push(number(v, "transform.values")?);
    }

    let arity_error = |expected: &'static str| SceneError::TransformArity {
        kind: kind.to_string(),
        expected,
        actual: nums.len(),
    };

    match kind {
        "translate" => match nums.as_slice() {
            [x, y, z] => Ok(Matrix44f::translation(*x, *y, *z)),
            _ => Err(arity_error("3")),
        },
        "scale" => match nums.as_slice() {
            [s] => Ok(Matrix44f::uniform_scaling(*s)),
            [x, y, z] => Ok(Matrix44f::scaling(*x, *y, *z)),
            _ => Err(arity_error("1 or 3")),
        },
        "rotate_x" => match nums.as_slice() {
            [angle] => Ok(Matrix44f::rotation_x(*angle)),
            _ => Err(arity_error("1")),
        },
        "rotate_y" => match nums.as_slice() {
            [angle] => Ok(Matrix44f::rotation_y(*angle)),
            _ => Err(arity_error("1")),
        },
        "rotate_z" => match nums.as_slice() {
            [angle] => Ok(Matrix44f::rotation_z(*angle)),
            _ => Err(arity_error("1")),
        },
        "skew" => match nums.as_slice() {
            [xy, xz, yx, yz, zx, zy] => Ok(Matrix44f::skew(*xy, *xz, *yx, *yz, *zx, *zy)),
            _ => Err(arity_error("6")),
        },
        other => Err(SceneError::UnknownTransform(other.to_string())),
    }
}

fn field<'a>(value: &'a Value, name: &'static str) -> Result<&'a Value, SceneError> {
    value.get(name).ok_or(SceneError::MissingField(name))
}

fn string<'a>(value: &'a Value, what: &'static str) -> Result<&'a str, SceneError> {
    value.as_str().ok_or(SceneError::Malformed {
        field: what,
        expected: "a string",
    })
}

fn number(value: &Value, what: &'static str) -> Result<f64, SceneError> {
    value.as_f64().ok_or(SceneError::Malformed {
        field: what,
        expected: "a number",
    })
}

fn unsigned(value: &Value, what: &'static str) -> Result<usize, SceneError> {
    value
        .as_u64()
        .map(|n| n as usize)
        .ok_or(SceneError::Malformed {
            field: what,
            expected: "a positive integer",
        })
}

fn array<'a>(value: &'a Value, what: &'static str) -> Result<&'a Vec<Value>, SceneError> {
    value.as_array().ok_or(SceneError::Malformed {
        field: what,
        expected: "an array",
    })
}

fn triple(value: &Value, what: &'static str) -> Result<[f64; 3], SceneError> {
    let items = array(value, what)?;
    if items.len() != 3 {
        return Err(SceneError::Malformed {
            field: what,
            expected: "three numbers",
        });
    }
    Ok([
        number(&items[0], what)?,
        number(&items[1], what)?,
        number(&items[2], what)?,
    ])
}

fn color(value: &Value, what: &'static str) -> Result<Color, SceneError> {
    let [r, g, b] = triple(value, what)?;
    Ok(Color::new(r, g, b))
}

fn point(value: &Value, what: &'static str) -> Result<Point, SceneError> {
    let [x, y, z] = triple(value, what)?;
    Ok(Point::new(x, y, z))
}

fn direction(value: &Value, what: &'static str) -> Result<Direction, SceneError> {
    let [x, y, z] = triple(value, what)?;
    Ok(Direction::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;

    const MINIMAL_SCENE: &str = r#"{
        "world": {
            "light_source": {
                "intensity": [1, 1, 1],
                "position": [-10, 10, -10]
            },
            "objects": [
                {
                    "shape": "sphere",
                    "transform": [
                        { "type": "translate", "values": [0, 1, 0] },
                        { "type": "scale", "values": [2] }
                    ],
                    "material": {
                        "ambient": 0.1,
                        "diffuse": 0.7,
                        "specular": 0.2,
                        "shininess": 100,
                        "color": [0.8, 1.0, 0.6]
                    }
                },
                {
                    "shape": "plane",
                    "transform": [],
                    "material": {
                        "reflectivity": 0.5,
                        "transparency": 0.3,
                        "refractive_index": 1.5,
                        "pattern": {
                            "type": "checker",
                            "transform": [],
                            "color_a": [1, 1, 1],
                            "color_b": [0, 0, 0]
                        }
                    }
                }
            ]
        },
        "camera": {
            "viewport_width": 320,
            "viewport_height": 240,
            "field_of_view": 1.5707963267948966,
            "transform": {
                "input_base": [0, 1.5, -5],
                "output_base": [0, 1, 0],
                "up_vector": [0, 1, 0]
            }
        }
    }"#;

    #[test]
    fn parsing_a_minimal_scene() {
        let scene = parse(MINIMAL_SCENE).unwrap();

        assert_eq!(scene.world.objects.len(), 2);
        assert_eq!(
            scene.world.light,
            PointLight::new(Color::white(), Point::new(-10.0, 10.0, -10.0))
        );

        let sphere = scene.world.objects[0].as_surface().unwrap();
        assert!(matches!(sphere.shape(), Shape::Sphere));
        assert_approx_eq!(
            *sphere.transform(),
            Matrix44f::translation(0.0, 1.0, 0.0) * Matrix44f::uniform_scaling(2.0)
        );
        assert_approx_eq!(sphere.material().diffuse, 0.7);
        assert_approx_eq!(sphere.material().specular, 0.2);
        assert_approx_eq!(sphere.material().shininess, 100.0);
        assert_eq!(
            sphere.material().texture,
            Texture::solid(Color::new(0.8, 1.0, 0.6))
        );

        let plane = scene.world.objects[1].as_surface().unwrap();
        assert!(matches!(plane.shape(), Shape::Plane));
        assert_approx_eq!(plane.material().reflectivity, 0.5);
        assert_approx_eq!(plane.material().transparency, 0.3);
        assert_approx_eq!(plane.material().refractive_index, 1.5);
        assert_eq!(
            plane.material().texture,
            Texture::pattern_2d(
                PatternKind::Checker,
                Matrix33f::identity(),
                Texture::solid(Color::white()),
                Texture::solid(Color::black()),
            )
        );

        assert_eq!(scene.camera.viewport_width(), 320);
        assert_eq!(scene.camera.viewport_height(), 240);
        assert_approx_eq!(scene.camera.field_of_view(), FRAC_PI_2);
        assert_approx_eq!(
            *scene.camera.transform(),
            Matrix44f::view_transform(
                Point::new(0.0, 1.5, -5.0),
                Point::new(0.0, 1.0, 0.0),
                Direction::new(0.0, 1.0, 0.0),
            )
        );
    }

    fn object_json(body: &str) -> String {
        format!(
            r#"{{
                "world": {{
                    "light_source": {{ "intensity": [1, 1, 1], "position": [0, 10, 0] }},
                    "objects": [{body}]
                }},
                "camera": {{
                    "viewport_width": 10,
                    "viewport_height": 10,
                    "field_of_view": 0.785,
                    "transform": {{
                        "input_base": [0, 0, -5],
                        "output_base": [0, 0, 0],
                        "up_vector": [0, 1, 0]
                    }}
                }}
            }}"#
        )
    }

    #[test]
    fn parsing_a_bounded_cylinder() {
        let text = object_json(
            r#"{
                "shape": "cylinder",
                "bounds": { "y_min": -1, "y_max": 2, "closed": true }
            }"#,
        );
        let scene = parse(&text).unwrap();
        let cylinder = scene.world.objects[0].as_surface().unwrap();
        match cylinder.shape() {
            Shape::Cylinder {
                y_min,
                y_max,
                closed,
            } => {
                assert_approx_eq!(*y_min, -1.0);
                assert_approx_eq!(*y_max, 2.0);
                assert!(*closed);
            }
            other => panic!("expected a cylinder, got {other:?}"),
        }
    }

    #[test]
    fn cone_without_bounds_is_unbounded() {
        let text = object_json(r#"{ "shape": "cone" }"#);
        let scene = parse(&text).unwrap();
        let cone = scene.world.objects[0].as_surface().unwrap();
        match cone.shape() {
            Shape::Cone {
                y_min,
                y_max,
                closed,
            } => {
                assert_eq!(*y_min, f64::NEG_INFINITY);
                assert_eq!(*y_max, f64::INFINITY);
                assert!(!*closed);
            }
            other => panic!("expected a cone, got {other:?}"),
        }
    }

    #[test]
    fn parsing_a_triangle() {
        let text = object_json(
            r#"{
                "shape": "triangle",
                "vertices": [[0, 1, 0], [-1, 0, 0], [1, 0, 0]]
            }"#,
        );
        let scene = parse(&text).unwrap();
        let triangle = scene.world.objects[0].as_surface().unwrap();
        match triangle.shape() {
            Shape::Triangle(t) => {
                let (a, b, c) = t.vertices();
                assert_approx_eq!(a, Point::new(0.0, 1.0, 0.0));
                assert_approx_eq!(b, Point::new(-1.0, 0.0, 0.0));
                assert_approx_eq!(c, Point::new(1.0, 0.0, 0.0));
            }
            other => panic!("expected a triangle, got {other:?}"),
        }
    }

    #[test]
    fn group_material_overrides_children() {
        let text = object_json(
            r#"{
                "shape": "group",
                "transform": [{ "type": "scale", "values": [2] }],
                "material": { "color": [1, 0, 0] },
                "children": [
                    { "shape": "sphere" },
                    {
                        "shape": "group",
                        "children": [{ "shape": "cube" }]
                    }
                ]
            }"#,
        );
        let scene = parse(&text).unwrap();
        let group = match &scene.world.objects[0] {
            Object::Composite(c) => c,
            Object::Surface(_) => panic!("expected a group"),
        };
        assert_eq!(group.children().len(), 2);

        let sphere = group.children()[0].as_surface().unwrap();
        assert_eq!(
            sphere.material().texture,
            Texture::solid(Color::new(1.0, 0.0, 0.0))
        );

        let nested = match &group.children()[1] {
            Object::Composite(c) => c,
            Object::Surface(_) => panic!("expected a nested group"),
        };
        let cube = nested.children()[0].as_surface().unwrap();
        assert_eq!(
            cube.material().texture,
            Texture::solid(Color::new(1.0, 0.0, 0.0))
        );
    }

    #[test]
    fn all_pattern_kinds_parse() {
        for kind in [
            "stripe", "ring", "checker", "gradient", "stripe3d", "ring3d", "checker3d",
            "gradient3d",
        ] {
            let text = object_json(&format!(
                r#"{{
                    "shape": "sphere",
                    "material": {{
                        "pattern": {{
                            "type": "{kind}",
                            "transform": [{{ "type": "scale", "values": [0.5] }}],
                            "color_a": [1, 1, 1],
                            "color_b": [0, 0, 0]
                        }}
                    }}
                }}"#
            ));
            assert!(parse(&text).is_ok(), "pattern `{kind}` failed to parse");
        }
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let text = object_json(r#"{ "shape": "torus" }"#);
        assert!(matches!(
            parse(&text),
            Err(SceneError::UnknownShape(name)) if name == "torus"
        ));
    }

    #[test]
    fn unknown_transform_is_rejected() {
        let text = object_json(
            r#"{
                "shape": "sphere",
                "transform": [{ "type": "spin", "values": [1] }]
            }"#,
        );
        assert!(matches!(
            parse(&text),
            Err(SceneError::UnknownTransform(name)) if name == "spin"
        ));
    }

    #[test]
    fn wrong_transform_arity_is_rejected() {
        let text = object_json(
            r#"{
                "shape": "sphere",
                "transform": [{ "type": "translate", "values": [1, 2] }]
            }"#,
        );
        assert!(matches!(
            parse(&text),
            Err(SceneError::TransformArity { actual: 2, .. })
        ));
    }

    #[test]
    fn singular_transform_is_rejected() {
        let text = object_json(
            r#"{
                "shape": "sphere",
                "transform": [{ "type": "scale", "values": [0, 1, 1] }]
            }"#,
        );
        assert!(matches!(parse(&text), Err(SceneError::SingularTransform)));
    }

    #[test]
    fn missing_field_is_reported() {
        let text = r#"{ "world": { "objects": [] } }"#;
        assert!(matches!(
            parse(text),
            Err(SceneError::MissingField("light_source"))
        ));
    }

    #[test]
    fn invalid_json_is_reported() {
        assert!(matches!(parse("not json"), Err(SceneError::Json(_))));
    }
}
