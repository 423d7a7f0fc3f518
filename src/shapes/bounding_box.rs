use crate::matrix::Matrix44f;
use crate::point::Point;
use crate::ray::Ray;
use crate::util::EPSILON;

/// Axis-aligned extents. The empty box carries `min = +INF`, `max = -INF`
/// componentwise, which makes it the identity for `union`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    pub fn empty() -> BoundingBox {
        BoundingBox {
            min: Point::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn new(min: Point, max: Point) -> BoundingBox {
        BoundingBox { min, max }
    }

    pub fn add_point(&mut self, p: Point) {
        self.min = Point::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = Point::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: Point::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.min.x - EPSILON
            && p.x <= self.max.x + EPSILON
            && p.y >= self.min.y - EPSILON
            && p.y <= self.max.y + EPSILON
            && p.z >= self.min.z - EPSILON
            && p.z <= self.max.z + EPSILON
    }

    /// Slab test. Reports hit/miss only.
    pub fn intersected_by(&self, ray: &Ray) -> bool {
        let (x_min, x_max) = axis_ts(self.min.x, self.max.x, ray.origin.x, ray.direction.x);
        let (y_min, y_max) = axis_ts(self.min.y, self.max.y, ray.origin.y, ray.direction.y);
        let (z_min, z_max) = axis_ts(self.min.z, self.max.z, ray.origin.z, ray.direction.z);

        let t_min = x_min.max(y_min).max(z_min);
        let t_max = x_max.min(y_max).min(z_max);
        t_min <= t_max + EPSILON
    }

    /// Maps the eight corners through `m` and re-bounds them.
    pub fn transform(&self, m: Matrix44f) -> BoundingBox {
        let corners = [
            self.min,
            Point::new(self.min.x, self.min.y, self.max.z),
            Point::new(self.min.x, self.max.y, self.min.z),
            Point::new(self.min.x, self.max.y, self.max.z),
            Point::new(self.max.x, self.min.y, self.min.z),
            Point::new(self.max.x, self.min.y, self.max.z),
            Point::new(self.max.x, self.max.y, self.min.z),
            self.max,
        ];
        let mut result = BoundingBox::empty();
        for corner in corners {
            result.add_point(m * corner);
        }
        result
    }
}

// A zero direction component yields +/-INF slab distances whose sign comes
// from the sign of the numerator, which is exactly what the comparison needs.
fn axis_ts(min: f64, max: f64, origin: f64, direction: f64) -> (f64, f64) {
    let t_min = (min - origin) / direction;
    let t_max = (max - origin) / direction;
    if t_min > t_max {
        (t_max, t_min)
    } else {
        (t_min, t_max)
    }
}
