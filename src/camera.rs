use crate::matrix::Matrix44f;
use crate::point::Point;
use crate::ray::Ray;

/// Viewport geometry and primary-ray generation. The canvas sits one unit
/// in front of the camera; `half_width`, `half_height` and `pixel_size` are
/// derived from the viewport and field of view at construction.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    viewport_width: usize,
    viewport_height: usize,
    field_of_view: f64,
    transform: Matrix44f,
    transform_inverse: Matrix44f,
    half_width: f64,
    half_height: f64,
    pixel_size: f64,
}

impl Camera {
    pub fn new(
        viewport_width: usize,
        viewport_height: usize,
        field_of_view: f64,
        transform: Matrix44f,
    ) -> Camera {
        let half_view = (field_of_view / 2.0).tan();
        let aspect_ratio = viewport_width as f64 / viewport_height as f64;

        let (half_width, half_height) = if aspect_ratio >= 1.0 {
            (half_view, half_view / aspect_ratio)
        } else {
            (half_view * aspect_ratio, half_view)
        };

        Camera {
            viewport_width,
            viewport_height,
            field_of_view,
            transform,
            transform_inverse: transform.inverse(),
            half_width,
            half_height,
            // pixels are square, so one dimension suffices
            pixel_size: half_width * 2.0 / viewport_width as f64,
        }
    }

    pub fn viewport_width(&self) -> usize {
        self.viewport_width
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn transform(&self) -> &Matrix44f {
        &self.transform
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// The world-space ray through the center of pixel `(x, y)`.
    pub fn cast_ray(&self, x: usize, y: usize) -> Ray {
        let x_offset = (x as f64 + 0.5) * self.pixel_size;
        let y_offset = (y as f64 + 0.5) * self.pixel_size;

        let world_x = self.half_width - x_offset;
        let world_y = self.half_height - y_offset;

        let pixel = self.transform_inverse * Point::new(world_x, world_y, -1.0);
        let origin = self.transform_inverse * Point::zero();

        Ray::new(origin, (pixel - origin).normalize())
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    use super::*;
    use crate::direction::Direction;

    #[test]
    fn pixel_size_for_a_landscape_viewport() {
        let c = Camera::new(200, 125, FRAC_PI_2, Matrix44f::identity());
        assert_approx_eq!(c.pixel_size(), 0.01);
    }

    #[test]
    fn pixel_size_for_a_portrait_viewport() {
        let c = Camera::new(125, 200, FRAC_PI_2, Matrix44f::identity());
        assert_approx_eq!(c.pixel_size(), 0.01);
    }

    #[test]
    fn ray_through_the_center_of_the_viewport() {
        let c = Camera::new(201, 101, FRAC_PI_2, Matrix44f::identity());
        let r = c.cast_ray(100, 50);
        assert_approx_eq!(r.origin, Point::zero());
        assert_approx_eq!(r.direction, Direction::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn ray_through_a_corner_of_the_viewport() {
        let c = Camera::new(201, 101, FRAC_PI_2, Matrix44f::identity());
        let r = c.cast_ray(0, 0);
        assert_approx_eq!(r.origin, Point::zero());
        assert_approx_eq!(r.direction, Direction::new(0.66519, 0.33259, -0.66851));
    }

    #[test]
    fn ray_through_a_transformed_camera() {
        let transform = Matrix44f::rotation_y(FRAC_PI_4) * Matrix44f::translation(0.0, -2.0, 5.0);
        let c = Camera::new(201, 101, FRAC_PI_2, transform);
        let r = c.cast_ray(100, 50);
        let k = 2f64.sqrt() / 2.0;
        assert_approx_eq!(r.origin, Point::new(0.0, 2.0, -5.0));
        assert_approx_eq!(r.direction, Direction::new(k, 0.0, -k));
    }
}
