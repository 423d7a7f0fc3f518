use crate::direction::Direction;
use crate::point::Point;
use crate::ray::Ray;
use crate::shapes::bounding_box::BoundingBox;
use crate::util::approx_zero;

/// Infinite plane spanning xz.
pub fn intersect(ray: &Ray) -> Vec<f64> {
    if approx_zero(ray.direction.y) {
        return Vec::new();
    }
    vec![-ray.origin.y / ray.direction.y]
}

pub fn normal_at(_p: Point) -> Direction {
    Direction::new(0.0, 1.0, 0.0)
}

pub fn bounds() -> BoundingBox {
    BoundingBox::new(
        Point::new(f64::NEG_INFINITY, 0.0, f64::NEG_INFINITY),
        Point::new(f64::INFINITY, 0.0, f64::INFINITY),
    )
}
