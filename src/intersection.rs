use crate::direction::Direction;
use crate::object::Surface;
use crate::point::Point;
use crate::ray::Ray;
use crate::util::{approx_eq, EPSILON};

/// A single ray/surface crossing at distance `t` along the ray.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    pub t: f64,
    pub surface: &'a Surface,
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, surface: &'a Surface) -> Intersection<'a> {
        Intersection { t, surface }
    }
}

/// Equal distance and the same surface identity.
impl PartialEq for Intersection<'_> {
    fn eq(&self, other: &Self) -> bool {
        approx_eq(self.t, other.t) && std::ptr::eq(self.surface, other.surface)
    }
}

/// The first intersection with `t >= 0`; ties keep the earliest list entry.
pub fn hit<'a, 'o>(intersections: &'a [Intersection<'o>]) -> Option<&'a Intersection<'o>> {
    let mut nearest: Option<&Intersection> = None;
    for intersection in intersections {
        if intersection.t >= 0.0 && nearest.map_or(true, |n| intersection.t < n.t) {
            nearest = Some(intersection);
        }
    }
    nearest
}

/// An intersection extended with the shading state derived from the ray.
#[derive(Debug, Clone, Copy)]
pub struct DetailedIntersection<'a> {
    pub t: f64,
    pub surface: &'a Surface,
    pub point: Point,
    pub view: Direction,
    pub normal: Direction,
    pub reflection: Direction,
    pub over_point: Point,
    pub under_point: Point,
    pub inside: bool,
}

impl<'a> DetailedIntersection<'a> {
    pub fn new(intersection: &Intersection<'a>, ray: &Ray) -> DetailedIntersection<'a> {
        let point = ray.position(intersection.t);
        let view = -ray.direction;
        let mut normal = intersection.surface.world_normal_at(point);

        // The view vector facing away from the normal means the ray origin
        // is inside the object.
        let inside = normal.dot(view) < 0.0;
        if inside {
            normal = -normal;
        }

        DetailedIntersection {
            t: intersection.t,
            surface: intersection.surface,
            point,
            view,
            normal,
            reflection: ray.direction.reflect(normal),
            over_point: point + normal * EPSILON,
            under_point: point - normal * EPSILON,
            inside,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::matrix::Matrix44f;
    use crate::object::Surface;
    use crate::shapes::Shape;

    fn sphere() -> Surface {
        Surface::new(Shape::Sphere, Matrix44f::identity(), Material::default())
    }

    #[test]
    fn hit_with_all_positive_distances() {
        let s = sphere();
        let xs = vec![Intersection::new(1.0, &s), Intersection::new(2.0, &s)];
        assert_eq!(hit(&xs), Some(&xs[0]));
    }

    #[test]
    fn hit_skips_negative_distances() {
        let s = sphere();
        let xs = vec![Intersection::new(-1.0, &s), Intersection::new(1.0, &s)];
        assert_eq!(hit(&xs), Some(&xs[1]));
    }

    #[test]
    fn hit_with_all_negative_distances() {
        let s = sphere();
        let xs = vec![Intersection::new(-2.0, &s), Intersection::new(-1.0, &s)];
        assert_eq!(hit(&xs), None);
    }

    #[test]
    fn hit_is_the_lowest_nonnegative_distance() {
        let s = sphere();
        let xs = vec![
            Intersection::new(5.0, &s),
            Intersection::new(7.0, &s),
            Intersection::new(-3.0, &s),
            Intersection::new(2.0, &s),
        ];
        assert_eq!(hit(&xs), Some(&xs[3]));
    }

    #[test]
    fn hit_tie_keeps_insertion_order() {
        let a = sphere();
        let b = sphere();
        let xs = vec![Intersection::new(1.0, &a), Intersection::new(1.0, &b)];
        let h = hit(&xs).unwrap();
        assert!(std::ptr::eq(h.surface, &a));
    }

    #[test]
    fn equality_requires_the_same_surface() {
        let a = sphere();
        let b = sphere();
        assert_eq!(Intersection::new(1.0, &a), Intersection::new(1.0, &a));
        assert_ne!(Intersection::new(1.0, &a), Intersection::new(1.0, &b));
        assert_ne!(Intersection::new(1.0, &a), Intersection::new(2.0, &a));
    }

    #[test]
    fn detailed_state_for_an_outside_hit() {
        let s = sphere();
        let r = Ray::new(Point::new(0.0, 0.0, -5.0), Direction::new(0.0, 0.0, 1.0));
        let d = DetailedIntersection::new(&Intersection::new(4.0, &s), &r);
        assert_approx_eq!(d.t, 4.0);
        assert_approx_eq!(d.point, Point::new(0.0, 0.0, -1.0));
        assert_approx_eq!(d.view, Direction::new(0.0, 0.0, -1.0));
        assert_approx_eq!(d.normal, Direction::new(0.0, 0.0, -1.0));
        assert!(!d.inside);
    }

    #[test]
    fn detailed_state_for_an_inside_hit_flips_the_normal() {
        let s = sphere();
        let r = Ray::new(Point::zero(), Direction::new(0.0, 0.0, 1.0));
        let d = DetailedIntersection::new(&Intersection::new(1.0, &s), &r);
        assert_approx_eq!(d.point, Point::new(0.0, 0.0, 1.0));
        assert_approx_eq!(d.view, Direction::new(0.0, 0.0, -1.0));
        assert_approx_eq!(d.normal, Direction::new(0.0, 0.0, -1.0));
        assert!(d.inside);
    }

    #[test]
    fn over_point_sits_above_the_surface() {
        let s = Surface::new(
            Shape::Sphere,
            Matrix44f::translation(0.0, 0.0, 1.0),
            Material::default(),
        );
        let r = Ray::new(Point::new(0.0, 0.0, -5.0), Direction::new(0.0, 0.0, 1.0));
        let d = DetailedIntersection::new(&Intersection::new(5.0, &s), &r);
        assert!(d.over_point.z < -EPSILON / 2.0);
        assert!(d.point.z > d.over_point.z);
    }

    #[test]
    fn under_point_sits_below_the_surface() {
        let s = Surface::new(
            Shape::Sphere,
            Matrix44f::translation(0.0, 0.0, 1.0),
            Material::glass(),
        );
        let r = Ray::new(Point::new(0.0, 0.0, -5.0), Direction::new(0.0, 0.0, 1.0));
        let d = DetailedIntersection::new(&Intersection::new(5.0, &s), &r);
        assert!(d.under_point.z > EPSILON / 2.0);
        assert!(d.point.z < d.under_point.z);
    }

    #[test]
    fn reflection_vector_bounces_off_a_plane() {
        let s = Surface::new(Shape::Plane, Matrix44f::identity(), Material::default());
        let k = 2f64.sqrt() / 2.0;
        let r = Ray::new(Point::new(0.0, 1.0, -1.0), Direction::new(0.0, -k, k));
        let d = DetailedIntersection::new(&Intersection::new(2f64.sqrt(), &s), &r);
        assert_approx_eq!(d.reflection, Direction::new(0.0, k, k));
    }
}
