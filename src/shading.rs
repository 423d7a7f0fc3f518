use crate::color::Color;
use crate::direction::Direction;
use crate::intersection::Intersection;
use crate::light::PointLight;
use crate::object::Surface;
use crate::point::Point;
use crate::util::approx_eq;

/// Phong direct illumination at a surface point.
pub fn phong(
    surface: &Surface,
    light: &PointLight,
    position: Point,
    normal: Direction,
    view: Direction,
    shadowed: bool,
) -> Color {
    let material = surface.material();
    let effective = surface.color_at(position) * light.intensity;
    let ambient = effective * material.ambient;

    if shadowed {
        return ambient;
    }

    let light_direction = (light.position - position).normalize();
    let light_normal_cosine = light_direction.dot(normal);
    if light_normal_cosine < 0.0 {
        // light is on the other side of the surface
        return ambient;
    }

    let diffuse = effective * material.diffuse * light_normal_cosine;

    let reflection_direction = (-light_direction).reflect(normal);
    let reflection_view_cosine = reflection_direction.dot(view);
    let specular = if reflection_view_cosine <= 0.0 {
        Color::black()
    } else {
        light.intensity * material.specular * reflection_view_cosine.powf(material.shininess)
    };

    ambient + diffuse + specular
}

/// The refractive indices of the medium being exited and the medium being
/// entered at `hit`, given all intersections along the ray in order.
///
/// Walks the list toggling membership in the set of surfaces the ray is
/// currently inside; the set stays tiny, so an ordered vector with linear
/// removal is all the bookkeeping needed.
pub fn refractive_indices(hit_t: f64, hit_surface: &Surface, xs: &[Intersection]) -> (f64, f64) {
    let mut containers: Vec<&Surface> = Vec::new();
    let mut n1 = 1.0;

    for intersection in xs {
        let is_hit =
            approx_eq(intersection.t, hit_t) && std::ptr::eq(intersection.surface, hit_surface);

        if is_hit {
            if let Some(last) = containers.last() {
                n1 = last.material().refractive_index;
            }
        }

        if let Some(index) = containers
            .iter()
            .position(|s| std::ptr::eq(*s, intersection.surface))
        {
            // the ray exits this surface
            containers.remove(index);
        } else {
            // the ray enters this surface
            containers.push(intersection.surface);
        }

        if is_hit {
            let n2 = containers
                .last()
                .map_or(1.0, |s| s.material().refractive_index);
            return (n1, n2);
        }
    }

    (n1, 1.0)
}

/// Schlick's approximation to the Fresnel reflectance at a refractive
/// interface.
pub fn schlick(view: Direction, normal: Direction, n1: f64, n2: f64) -> f64 {
    let mut cosine = view.dot(normal);

    if n1 > n2 {
        let n_ratio = n1 / n2;
        let sin2_t = n_ratio * n_ratio * (1.0 - cosine * cosine);
        if sin2_t > 1.0 {
            // total internal reflection
            return 1.0;
        }
        cosine = (1.0 - sin2_t).sqrt();
    }

    let r0 = ((n1 - n2) / (n1 + n2)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
