//! Core data structures and mathematical operations.
//!
//! This module contains the fundamental types used throughout the system:
//! - Polynomial basis over normalized image coordinates
//! - Typed buffer views (normal map, fit matrices, output cube)
//! - The per-light quadratic shading model
//!
//! All types here are "pure data" - no I/O, no traversal logic.

mod basis;
mod quadratic;
mod tensor;

// Re-export public types
pub use basis::{basis_features, is_valid_feature_count, NUM_FEATURES};
pub use quadratic::{QuadraticModel, QUADRATIC_PARAMS};
pub use tensor::{FitMatrix, IntensityCube, NormalMap, ShapeError};
