use crate::color::Color;
use crate::matrix::{Matrix33f, Matrix44f};
use crate::point::Point;
use crate::vector::Vector2f;

/// Maps an object-space point to a UV coordinate, so the same texture can be
/// parametrized differently on different primitives.
pub type TextureMap = fn(Point) -> Vector2f;

/// The default map: planar projection onto the xz plane.
pub fn projection_map(p: Point) -> Vector2f {
    Vector2f(p.x, p.z)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Stripe,
    Ring,
    Checker,
    Gradient,
}

/// A two-texture pattern sampled in UV space.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern2D {
    pub kind: PatternKind,
    transform: Matrix33f,
    transform_inverse: Matrix33f,
    pub texture_a: Texture,
    pub texture_b: Texture,
}

/// A two-texture pattern sampled at object-space points.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern3D {
    pub kind: PatternKind,
    transform: Matrix44f,
    transform_inverse: Matrix44f,
    pub texture_a: Texture,
    pub texture_b: Texture,
}

/// A function from surface position to color. Value-semantic and cheaply
/// clonable; patterns recurse into their sub-textures.
#[derive(Debug, Clone, PartialEq)]
pub enum Texture {
    Solid(Color),
    Pattern2D(Box<Pattern2D>),
    Pattern3D(Box<Pattern3D>),
}

impl Texture {
    pub fn solid(color: Color) -> Texture {
        Texture::Solid(color)
    }

    pub fn pattern_2d(kind: PatternKind, transform: Matrix33f, a: Texture, b: Texture) -> Texture {
        Texture::Pattern2D(Box::new(Pattern2D {
            kind,
            transform,
            transform_inverse: transform.inverse(),
            texture_a: a,
            texture_b: b,
        }))
    }

    pub fn pattern_3d(kind: PatternKind, transform: Matrix44f, a: Texture, b: Texture) -> Texture {
        Texture::Pattern3D(Box::new(Pattern3D {
            kind,
            transform,
            transform_inverse: transform.inverse(),
            texture_a: a,
            texture_b: b,
        }))
    }

    /// Samples the texture at an object-space point using the surface's
    /// texture map.
    pub fn color_at(&self, point: Point, map: TextureMap) -> Color {
        match self {
            Texture::Solid(c) => *c,
            Texture::Pattern2D(_) => self.sample_uv(map(point)),
            Texture::Pattern3D(p) => p.sample(p.transform_inverse * point, map),
        }
    }

    /// Samples the texture at a UV coordinate.
    pub fn sample_uv(&self, uv: Vector2f) -> Color {
        match self {
            Texture::Solid(c) => *c,
            Texture::Pattern2D(p) => p.sample(p.transform_inverse * uv),
            // A 3D pattern reached from UV space samples the embedding of
            // the coordinate under the planar projection.
            Texture::Pattern3D(_) => self.color_at(Point::new(uv.0, 0.0, uv.1), projection_map),
        }
    }
}

impl Pattern2D {
    fn sample(&self, uv: Vector2f) -> Color {
        match self.kind {
            PatternKind::Stripe => {
                if even(uv.0.floor()) {
                    self.texture_a.sample_uv(uv)
                } else {
                    self.texture_b.sample_uv(uv)
                }
            }
            PatternKind::Ring => {
                let radius = (uv.0 * uv.0 + uv.1 * uv.1).sqrt();
                if even(radius.floor()) {
                    self.texture_a.sample_uv(uv)
                } else {
                    self.texture_b.sample_uv(uv)
                }
            }
            PatternKind::Checker => {
                if even(uv.0.floor() + uv.1.floor()) {
                    self.texture_a.sample_uv(uv)
                } else {
                    self.texture_b.sample_uv(uv)
                }
            }
            PatternKind::Gradient => {
                let blend = uv.0 - uv.0.floor();
                let a = self.texture_a.sample_uv(uv);
                let b = self.texture_b.sample_uv(uv);
                a + (b - a) * blend
            }
        }
    }
}

impl Pattern3D {
    fn sample(&self, p: Point, map: TextureMap) -> Color {
        match self.kind {
            PatternKind::Stripe => {
                if even(p.x.floor()) {
                    self.texture_a.color_at(p, map)
                } else {
                    self.texture_b.color_at(p, map)
                }
            }
            PatternKind::Ring => {
                let radius = (p.x * p.x + p.z * p.z).sqrt();
                if even(radius.floor()) {
                    self.texture_a.color_at(p, map)
                } else {
                    self.texture_b.color_at(p, map)
                }
            }
            PatternKind::Checker => {
                if even(p.x.floor() + p.y.floor() + p.z.floor()) {
                    self.texture_a.color_at(p, map)
                } else {
                    self.texture_b.color_at(p, map)
                }
            }
            PatternKind::Gradient => {
                let blend = p.x - p.x.floor();
                let a = self.texture_a.color_at(p, map);
                let b = self.texture_b.color_at(p, map);
                a + (b - a) * blend
            }
        }
    }
}

fn even(n: f64) -> bool {
    (n as i64).rem_euclid(2) == 0
}
