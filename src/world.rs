use crate::color::Color;
use crate::intersection::{hit, DetailedIntersection, Intersection};
use crate::light::PointLight;
use crate::object::Object;
use crate::point::Point;
use crate::ray::Ray;
use crate::shading;
use crate::util::approx_zero;

/// Reflection/refraction recursion budget for primary rays.
pub const MAX_RECURSION_DEPTH: u16 = 5;

/// The scene: one point light and the root objects, immutable during
/// rendering.
#[derive(Debug, Clone)]
pub struct World {
    pub light: PointLight,
    pub objects: Vec<Object>,
}

impl World {
    pub fn new(light: PointLight, objects: Vec<Object>) -> World {
        World { light, objects }
    }

    /// Every intersection of the ray with the scene, ascending by distance.
    pub fn all_intersections(&self, ray: &Ray) -> Vec<Intersection<'_>> {
        let mut intersections: Vec<Intersection> = self
            .objects
            .iter()
            .flat_map(|object| object.intersect(ray))
            .collect();
        intersections.sort_by(|a, b| a.t.total_cmp(&b.t));
        intersections
    }

    /// True when something blocks the segment from `point` to the light.
    pub fn is_shadowed(&self, point: Point) -> bool {
        let to_light = self.light.position - point;
        let distance = to_light.length();
        let shadow_ray = Ray::new(point, to_light.normalize());

        match hit(&self.all_intersections(&shadow_ray)) {
            Some(h) => h.t < distance,
            None => false,
        }
    }

    /// The color seen along `ray`, recursing into reflection and refraction
    /// until `depth` runs out.
    pub fn color_at(&self, ray: &Ray, depth: u16) -> Color {
        if depth == 0 {
            return Color::black();
        }

        let intersections = self.all_intersections(ray);
        match hit(&intersections) {
            None => Color::black(),
            Some(h) => {
                let detailed = DetailedIntersection::new(h, ray);
                self.shade_hit(&detailed, &intersections, depth)
            }
        }
    }

    fn shade_hit(
        &self,
        hit: &DetailedIntersection<'_>,
        intersections: &[Intersection<'_>],
        depth: u16,
    ) -> Color {
        let material = hit.surface.material();
        let shadowed = self.is_shadowed(hit.over_point);
        let surface = shading::phong(
            hit.surface,
            &self.light,
            hit.over_point,
            hit.normal,
            hit.view,
            shadowed,
        );
        let reflected = self.reflected_color(hit, depth);

        if approx_zero(material.transparency) {
            return surface + reflected;
        }

        let (n1, n2) = shading::refractive_indices(hit.t, hit.surface, intersections);
        let refracted = self.refracted_color(hit, n1, n2, depth);

        if !approx_zero(material.reflectivity) {
            let reflectance = shading::schlick(hit.view, hit.normal, n1, n2);
            surface + reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    fn reflected_color(&self, hit: &DetailedIntersection<'_>, depth: u16) -> Color {
        let reflectivity = hit.surface.material().reflectivity;
        if approx_zero(reflectivity) {
            return Color::black();
        }

        let reflected_ray = Ray::new(hit.over_point, hit.reflection);
        self.color_at(&reflected_ray, depth - 1) * reflectivity
    }

    fn refracted_color(
        &self,
        hit: &DetailedIntersection<'_>,
        n1: f64,
        n2: f64,
        depth: u16,
    ) -> Color {
        let transparency = hit.surface.material().transparency;
        if approx_zero(transparency) || depth == 0 {
            return Color::black();
        }

        // Snell's law: check whether the transmitted angle has a real
        // solution.
        let n_ratio = n1 / n2;
        let cos_i = hit.view.dot(hit.normal);
        let sin2_t = n_ratio * n_ratio * (1.0 - cos_i * cos_i);
        if sin2_t > 1.0 {
            // total internal reflection
            return Color::black();
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = hit.normal * (n_ratio * cos_i - cos_t) - hit.view * n_ratio;
        let refracted_ray = Ray::new(hit.under_point, direction);
        self.color_at(&refracted_ray, depth - 1) * transparency
    }
}
