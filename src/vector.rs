use crate::util::approx_eq;

/// A UV texture coordinate.
#[derive(Debug, Clone, Copy)]
pub struct Vector2f(pub f64, pub f64);

impl PartialEq for Vector2f {
    fn eq(&self, rhs: &Self) -> bool {
        approx_eq(self.0, rhs.0) && approx_eq(self.1, rhs.1)
    }
}
