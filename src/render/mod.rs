//! Shading evaluation (CPU).

mod shade;

pub use shade::{shade_quadratic, shade_quadratic_parallel};
