use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use crate::camera::Camera;
use crate::canvas::Canvas;
use crate::world::{World, MAX_RECURSION_DEPTH};

/// Renders the world through the camera, one primary ray per pixel.
///
/// Rows are rendered in parallel; every pixel is an independent pure
/// computation over the immutable scene and writes one disjoint canvas
/// cell. `rows_done` is bumped as rows finish so a progress display can
/// watch the render from another thread.
pub fn render(world: &World, camera: &Camera, rows_done: &AtomicUsize) -> Canvas {
    let width = camera.viewport_width();
    let mut canvas = Canvas::new(width, camera.viewport_height());

    canvas
        .pixels_mut()
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                let ray = camera.cast_ray(x, y);
                *pixel = world.color_at(&ray, MAX_RECURSION_DEPTH);
            }
            rows_done.fetch_add(1, Ordering::Relaxed);
        });

    canvas
}
