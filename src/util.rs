/// Process-wide tolerance for approximate comparisons, shadow-ray offsets
/// and bounding-box inclusivity.
pub const EPSILON: f64 = 1e-4;

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

pub fn approx_zero(a: f64) -> bool {
    a.abs() < EPSILON
}
