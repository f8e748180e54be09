//! Spatially-varying fit reconstruction.
//!
//! - `project`: the basis-projection kernels shared by every reconstructed
//!   quantity (per-light model parameters, full 3-vectors, reflection
//!   scalars).
//! - `params`: the validated parameter bundle handed over by the host.

mod params;
mod project;

// Re-export public types and functions
pub use params::{ModelParams, ParamError, ShadingMode};
pub use project::{
    light_matrix, normalized_light_matrix, project_full, reflection_vector, MIN_SCALE,
};
