use crate::direction::Direction;
use crate::point::Point;
use crate::ray::Ray;
use crate::shapes::bounding_box::BoundingBox;
use crate::util::{approx_eq, approx_zero, EPSILON};

/// Double-napped cone around the y-axis whose radius at height `y` is `|y|`,
/// truncated to `y_min < y < y_max` and optionally capped.
pub fn intersect(ray: &Ray, y_min: f64, y_max: f64, closed: bool) -> Vec<f64> {
    let o = ray.origin;
    let d = ray.direction;
    let mut ts = Vec::new();

    let a = d.x * d.x - d.y * d.y + d.z * d.z;
    let b = 2.0 * (o.x * d.x - o.y * d.y + o.z * d.z);
    let c = o.x * o.x - o.y * o.y + o.z * o.z;

    if !approx_zero(a) {
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
    } else if !approx_zero(b) {
        // parallel to one nappe, still pierces the other once
        ts.push(-c / (2.0 * b));
    }

    if closed && !approx_zero(d.y) {
        for bound in [y_min, y_max] {
            let t = (bound - o.y) / d.y;
            if within_walls(ray, t, bound) {
                ts.push(t);
            }
        }
    }

    ts.sort_by(f64::total_cmp);
    ts
}

fn within_walls(ray: &Ray, t: f64, cap_y: f64) -> bool {
    let x = ray.origin.x + t * ray.direction.x;
    let z = ray.origin.z + t * ray.direction.z;
    x * x + z * z <= cap_y.abs() + EPSILON
}

pub fn normal_at(p: Point, y_min: f64, y_max: f64) -> Direction {
    let y_axis_distance = p.x * p.x + p.z * p.z;
    let radius_at_point = p.y.abs();

    if y_axis_distance < radius_at_point {
        if approx_eq(p.y, y_min) {
            return Direction::new(0.0, -1.0, 0.0);
        }
        if approx_eq(p.y, y_max) {
            return Direction::new(0.0, 1.0, 0.0);
        }
    }

    let y = y_axis_distance.sqrt();
    Direction::new(p.x, if p.y > 0.0 { -y } else { y }, p.z)
}

pub fn bounds(y_min: f64, y_max: f64) -> BoundingBox {
    let limit = y_min.abs().max(y_max.abs());
    BoundingBox::new(
        Point::new(-limit, y_min, -limit),
        Point::new(limit, y_max, limit),
    )
}
