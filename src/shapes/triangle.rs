use crate::direction::Direction;
use crate::point::Point;
use crate::ray::Ray;
use crate::shapes::bounding_box::BoundingBox;
use crate::util::EPSILON;

/// A triangle with precomputed edges, normal and bounds.
#[derive(Debug, Clone)]
pub struct Triangle {
    vertex_a: Point,
    vertex_b: Point,
    vertex_c: Point,
    edge_a: Direction,
    edge_b: Direction,
    normal: Direction,
    bounds: BoundingBox,
}

impl Triangle {
    pub fn new(vertex_a: Point, vertex_b: Point, vertex_c: Point) -> Triangle {
        let edge_a = vertex_b - vertex_a;
        let edge_b = vertex_c - vertex_a;
        let normal = edge_b.cross(edge_a).normalize();
        let mut bounds = BoundingBox::empty();
        bounds.add_point(vertex_a);
        bounds.add_point(vertex_b);
        bounds.add_point(vertex_c);
        Triangle {
            vertex_a,
            vertex_b,
            vertex_c,
            edge_a,
            edge_b,
            normal,
            bounds,
        }
    }

    /// Moller-Trumbore barycentric intersection.
    pub fn intersect(&self, ray: &Ray) -> Vec<f64> {
        let dir_cross_edge_b = ray.direction.cross(self.edge_b);
        let determinant = self.edge_a.dot(dir_cross_edge_b);
        if determinant.abs() < EPSILON {
            return Vec::new();
        }

        let f = 1.0 / determinant;
        let a_to_origin = ray.origin - self.vertex_a;
        let u = f * a_to_origin.dot(dir_cross_edge_b);
        if !(0.0..=1.0).contains(&u) {
            return Vec::new();
        }

        let origin_cross_edge_a = a_to_origin.cross(self.edge_a);
        let v = f * ray.direction.dot(origin_cross_edge_a);
        if v < 0.0 || u + v > 1.0 {
            return Vec::new();
        }

        vec![f * self.edge_b.dot(origin_cross_edge_a)]
    }

    pub fn normal_at(&self, _p: Point) -> Direction {
        self.normal
    }

    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn vertices(&self) -> (Point, Point, Point) {
        (self.vertex_a, self.vertex_b, self.vertex_c)
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.vertex_a == other.vertex_a
            && self.vertex_b == other.vertex_b
            && self.vertex_c == other.vertex_c
    }
}
