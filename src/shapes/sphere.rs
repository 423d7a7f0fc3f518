use crate::direction::Direction;
use crate::point::Point;
use crate::ray::Ray;
use crate::shapes::bounding_box::BoundingBox;

/// Unit sphere centered at the origin.
pub fn intersect(ray: &Ray) -> Vec<f64> {
    let center_offset = ray.origin - Point::zero();
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * ray.direction.dot(center_offset);
    let c = center_offset.dot(center_offset) - 1.0;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }

    let sqrt = discriminant.sqrt();
    vec![(-b - sqrt) / (2.0 * a), (-b + sqrt) / (2.0 * a)]
}

pub fn normal_at(p: Point) -> Direction {
    p - Point::zero()
}

pub fn bounds() -> BoundingBox {
    BoundingBox::new(Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_through_the_center() {
        let r = Ray::new(Point::new(0.0, 0.0, -5.0), Direction::new(0.0, 0.0, 1.0));
        assert_approx_eq!(intersect(&r), vec![4.0, 6.0]);
    }

    #[test]
    fn tangent_ray_yields_a_double_root() {
        let r = Ray::new(Point::new(0.0, 1.0, -5.0), Direction::new(0.0, 0.0, 1.0));
        assert_approx_eq!(intersect(&r), vec![5.0, 5.0]);
    }

    #[test]
    fn missing_ray() {
        let r = Ray::new(Point::new(0.0, 2.0, -5.0), Direction::new(0.0, 0.0, 1.0));
        assert!(intersect(&r).is_empty());
    }

    #[test]
    fn ray_from_the_center() {
        let r = Ray::new(Point::zero(), Direction::new(0.0, 0.0, 1.0));
        assert_approx_eq!(intersect(&r), vec![-1.0, 1.0]);
    }

    #[test]
    fn sphere_behind_the_ray() {
        let r = Ray::new(Point::new(0.0, 0.0, 5.0), Direction::new(0.0, 0.0, 1.0));
        assert_approx_eq!(intersect(&r), vec![-6.0, -4.0]);
    }

    #[test]
    fn normals_point_away_from_the_center() {
        assert_approx_eq!(
            normal_at(Point::new(1.0, 0.0, 0.0)),
            Direction::new(1.0, 0.0, 0.0)
        );
        let k = 3f64.sqrt() / 3.0;
        assert_approx_eq!(normal_at(Point::new(k, k, k)), Direction::new(k, k, k));
    }
}
