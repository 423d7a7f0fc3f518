use crate::direction::Direction;
use crate::point::Point;
use crate::ray::Ray;
use crate::shapes::bounding_box::BoundingBox;
use crate::util::{approx_eq, approx_zero, EPSILON};

/// Radius-1 cylinder around the y-axis, truncated to `y_min < y < y_max`
/// and optionally capped.
pub fn intersect(ray: &Ray, y_min: f64, y_max: f64, closed: bool) -> Vec<f64> {
    let o = ray.origin;
    let d = ray.direction;
    let mut ts = Vec::new();

    let a = d.x * d.x + d.z * d.z;
    if !approx_zero(a) {
        let b = 2.0 * (o.x * d.x + o.z * d.z);
        let c = o.x * o.x + o.z * o.z - 1.0;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return ts;
        }

        let sqrt = discriminant.sqrt();
        let mut t_0 = (-b - sqrt) / (2.0 * a);
        let mut t_1 = (-b + sqrt) / (2.0 * a);
        if t_0 > t_1 {
            std::mem::swap(&mut t_0, &mut t_1);
        }

        for t in [t_0, t_1] {
            let y = o.y + t * d.y;
            if y_min < y && y < y_max {
                ts.push(t);
            }
        }
    }

    if closed && !approx_zero(d.y) {
        for bound in [y_min, y_max] {
            let t = (bound - o.y) / d.y;
            if within_walls(ray, t) {
                ts.push(t);
            }
        }
    }

    ts.sort_by(f64::total_cmp);
    ts
}

fn within_walls(ray: &Ray, t: f64) -> bool {
    let x = ray.origin.x + t * ray.direction.x;
    let z = ray.origin.z + t * ray.direction.z;
    x * x + z * z <= 1.0 + EPSILON
}

pub fn normal_at(p: Point, y_min: f64, y_max: f64) -> Direction {
    let y_axis_distance = p.x * p.x + p.z * p.z;

    if y_axis_distance < 1.0 && approx_eq(p.y, y_min) {
        return Direction::new(0.0, -1.0, 0.0);
    }
    if y_axis_distance < 1.0 && approx_eq(p.y, y_max) {
        return Direction::new(0.0, 1.0, 0.0);
    }

    Direction::new(p.x, 0.0, p.z)
}

pub fn bounds(y_min: f64, y_max: f64) -> BoundingBox {
    BoundingBox::new(Point::new(-1.0, y_min, -1.0), Point::new(1.0, y_max, 1.0))
}
