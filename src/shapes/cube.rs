use crate::direction::Direction;
use crate::point::Point;
use crate::ray::Ray;
use crate::shapes::bounding_box::BoundingBox;

/// Unit cube centered at the origin with half-extent 1.
pub fn intersect(ray: &Ray) -> Vec<f64> {
    let (x_t_min, x_t_max) = axis_ts(ray.origin.x, ray.direction.x);
    let (y_t_min, y_t_max) = axis_ts(ray.origin.y, ray.direction.y);
    let (z_t_min, z_t_max) = axis_ts(ray.origin.z, ray.direction.z);

    let t_min = x_t_min.max(y_t_min).max(z_t_min);
    let t_max = x_t_max.min(y_t_max).min(z_t_max);

    if t_min > t_max {
        Vec::new()
    } else {
        vec![t_min, t_max]
    }
}

fn axis_ts(origin: f64, direction: f64) -> (f64, f64) {
    let t_min = (-1.0 - origin) / direction;
    let t_max = (1.0 - origin) / direction;
    if t_min > t_max {
        (t_max, t_min)
    } else {
        (t_min, t_max)
    }
}

/// The face the point lies on is the axis with the largest absolute
/// coordinate.
pub fn normal_at(p: Point) -> Direction {
    let abs_x = p.x.abs();
    let abs_y = p.y.abs();
    let abs_z = p.z.abs();
    let max_component = abs_x.max(abs_y).max(abs_z);

    if max_component == abs_x {
        Direction::new(p.x, 0.0, 0.0)
    } else if max_component == abs_y {
        Direction::new(0.0, p.y, 0.0)
    } else {
        Direction::new(0.0, 0.0, p.z)
    }
}

pub fn bounds() -> BoundingBox {
    BoundingBox::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0))
}
