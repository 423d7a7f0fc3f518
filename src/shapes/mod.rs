use crate::direction::Direction;
use crate::point::Point;
use crate::ray::Ray;
use crate::util::approx_eq;

mod bounding_box;
mod cone;
mod cube;
mod cylinder;
mod plane;
mod sphere;
mod triangle;

pub use self::bounding_box::BoundingBox;
pub use self::triangle::Triangle;

/// The geometry of a surface leaf. Every variant is defined in its own
/// object space; transforms live on the wrapping node.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Unit sphere at the origin.
    Sphere,
    /// Infinite xz plane.
    Plane,
    /// Unit cube centered at the origin with half-extent 1.
    Cube,
    /// Radius-1 cylinder around the y-axis.
    Cylinder { y_min: f64, y_max: f64, closed: bool },
    /// Double-napped unit cone around the y-axis.
    Cone { y_min: f64, y_max: f64, closed: bool },
    Triangle(Triangle),
}

impl Shape {
    pub fn triangle(a: Point, b: Point, c: Point) -> Shape {
        Shape::Triangle(Triangle::new(a, b, c))
    }

    /// Intersection distances along an object-space ray, sorted ascending.
    pub fn local_intersect(&self, ray: &Ray) -> Vec<f64> {
        match self {
            Shape::Sphere => sphere::intersect(ray),
            Shape::Plane => plane::intersect(ray),
            Shape::Cube => cube::intersect(ray),
            Shape::Cylinder {
                y_min,
                y_max,
                closed,
            } => cylinder::intersect(ray, *y_min, *y_max, *closed),
            Shape::Cone {
                y_min,
                y_max,
                closed,
            } => cone::intersect(ray, *y_min, *y_max, *closed),
            Shape::Triangle(t) => t.intersect(ray),
        }
    }

    /// Surface normal at an object-space point, not yet normalized.
    pub fn local_normal_at(&self, p: Point) -> Direction {
        match self {
            Shape::Sphere => sphere::normal_at(p),
            Shape::Plane => plane::normal_at(p),
            Shape::Cube => cube::normal_at(p),
            Shape::Cylinder { y_min, y_max, .. } => cylinder::normal_at(p, *y_min, *y_max),
            Shape::Cone { y_min, y_max, .. } => cone::normal_at(p, *y_min, *y_max),
            Shape::Triangle(t) => t.normal_at(p),
        }
    }

    /// Object-space bounds, independent of any transform.
    pub fn bounds(&self) -> BoundingBox {
        match self {
            Shape::Sphere => sphere::bounds(),
            Shape::Plane => plane::bounds(),
            Shape::Cube => cube::bounds(),
            Shape::Cylinder { y_min, y_max, .. } => cylinder::bounds(*y_min, *y_max),
            Shape::Cone { y_min, y_max, .. } => cone::bounds(*y_min, *y_max),
            Shape::Triangle(t) => t.bounds(),
        }
    }
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Shape::Sphere, Shape::Sphere) => true,
            (Shape::Plane, Shape::Plane) => true,
            (Shape::Cube, Shape::Cube) => true,
            (
                Shape::Cylinder {
                    y_min: a_min,
                    y_max: a_max,
                    closed: a_closed,
                },
                Shape::Cylinder {
                    y_min: b_min,
                    y_max: b_max,
                    closed: b_closed,
                },
            )
            | (
                Shape::Cone {
                    y_min: a_min,
                    y_max: a_max,
                    closed: a_closed,
                },
                Shape::Cone {
                    y_min: b_min,
                    y_max: b_max,
                    closed: b_closed,
                },
            ) => {
                (approx_eq(*a_min, *b_min) || a_min == b_min)
                    && (approx_eq(*a_max, *b_max) || a_max == b_max)
                    && a_closed == b_closed
            }
            (Shape::Triangle(a), Shape::Triangle(b)) => a == b,
            _ => false,
        }
    }
}
