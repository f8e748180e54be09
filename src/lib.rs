//! # polyshade: spatially-varying illumination model evaluation
//!
//! This crate evaluates a compact, spatially-varying illumination model
//! over a dense surface-normal map, producing per-pixel, per-light shading
//! intensities. The model's parameters vary smoothly over the image plane
//! and are encoded as coefficients of a bivariate polynomial of total
//! degree up to 6; at each pixel the coefficients are reconstructed by
//! dotting a monomial basis against the fit matrices, assembled into a
//! quadratic form `q(n) = nᵀAn + bᵀn + c` per light, and evaluated against
//! the pixel's normal with the result clamped at zero.
//!
//! ## Architecture
//!
//! - `core`: pure data and math (polynomial basis, buffer views, the
//!   per-light quadratic model)
//! - `fit`: basis-projection kernels and the validated parameter bundle
//! - `render`: the pixel traversal (sequential and row-parallel)
//!
//! The evaluator is stateless: all inputs are read-only, the output cube
//! is freshly allocated per invocation, and identical inputs produce
//! bit-identical outputs.

pub mod core;
pub mod fit;
pub mod render;

// Re-export commonly used types at crate root for convenience
pub use crate::core::{FitMatrix, IntensityCube, NormalMap, QuadraticModel, ShapeError};
pub use fit::{ModelParams, ParamError, ShadingMode, MIN_SCALE};
pub use render::{shade_quadratic, shade_quadratic_parallel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
