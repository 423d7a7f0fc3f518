use std::fmt::Debug;

use crate::color::Color;
use crate::direction::Direction;
use crate::light::PointLight;
use crate::material::Material;
use crate::matrix::{Matrix33f, Matrix44f};
use crate::object::{Object, Surface};
use crate::point::Point;
use crate::shapes::Shape;
use crate::vector::Vector2f;
use crate::world::World;

pub const TEST_EPSILON: f64 = 1e-4;

pub trait ApproxEq: Debug {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self) -> bool {
        if self.is_nan() || other.is_nan() {
            return false;
        }
        if self.is_infinite() || other.is_infinite() {
            return self == other;
        }
        (*self - *other).abs() < TEST_EPSILON
    }
}

impl<T> ApproxEq for [T]
where
    T: ApproxEq,
{
    fn approx_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a.approx_eq(b))
    }
}

impl<T> ApproxEq for Vec<T>
where
    T: ApproxEq,
{
    fn approx_eq(&self, other: &Self) -> bool {
        self.as_slice().approx_eq(other.as_slice())
    }
}

impl ApproxEq for Color {
    fn approx_eq(&self, other: &Self) -> bool {
        [self.r, self.g, self.b].approx_eq(&[other.r, other.g, other.b])
    }
}

impl ApproxEq for Point {
    fn approx_eq(&self, other: &Self) -> bool {
        [self.x, self.y, self.z].approx_eq(&[other.x, other.y, other.z])
    }
}

impl ApproxEq for Direction {
    fn approx_eq(&self, other: &Self) -> bool {
        [self.x, self.y, self.z].approx_eq(&[other.x, other.y, other.z])
    }
}

impl ApproxEq for Vector2f {
    fn approx_eq(&self, other: &Self) -> bool {
        [self.0, self.1].approx_eq(&[other.0, other.1])
    }
}

impl ApproxEq for Matrix44f {
    fn approx_eq(&self, other: &Self) -> bool {
        (0..4).all(|i| self[i].approx_eq(&other[i]))
    }
}

impl ApproxEq for Matrix33f {
    fn approx_eq(&self, other: &Self) -> bool {
        (0..3).all(|i| self.0[i].approx_eq(&other.0[i]))
    }
}

macro_rules! assert_approx_eq {
    ($a:expr, $b:expr) => {{
        use crate::test_utils::ApproxEq;
        let a = $a;
        let b = $b;
        if !a.approx_eq(&b) {
            panic!(
                "assertion failed: `(left ~= right)`\n  left: `{:?}`,\n right: `{:?}`",
                a, b,
            )
        }
    }};
}

/// The two-sphere world most of the shading fixtures are written against:
/// a white light at (-10, 10, -10), a green-ish outer unit sphere and a
/// half-size default inner sphere.
pub fn default_world() -> World {
    default_world_with(default_outer_material(), Material::default())
}

pub fn default_world_with(outer: Material, inner: Material) -> World {
    let light = PointLight::new(Color::white(), Point::new(-10.0, 10.0, -10.0));
    let s1 = Surface::new(Shape::Sphere, Matrix44f::identity(), outer);
    let s2 = Surface::new(Shape::Sphere, Matrix44f::uniform_scaling(0.5), inner);
    World::new(light, vec![Object::Surface(s1), Object::Surface(s2)])
}

pub fn default_outer_material() -> Material {
    let mut material = Material::with_color(Color::new(0.8, 1.0, 0.6));
    material.diffuse = 0.7;
    material.specular = 0.2;
    material
}
