//! Boundary adapter: the validated illumination-model parameter bundle.
//!
//! The host hands over a record `{nL, linfit, quadfit, sz}`; everything is
//! checked here, once, before any evaluation starts. The evaluator itself
//! assumes validated inputs and never re-checks shapes.

use crate::core::{is_valid_feature_count, FitMatrix, NUM_FEATURES};
use thiserror::Error;

/// A parameter-bundle field failed validation. Computation never starts;
/// no partial output is produced.
#[derive(Debug, Error)]
pub enum ParamError {
    #[error("nL must be positive")]
    InvalidLightCount,

    #[error("linfit has {rows} rows, not a valid feature count")]
    LinfitRows { rows: usize },

    #[error("linfit has {cols} columns, expected 3*nL or 4*nL ({nl} lights)")]
    LinfitCols { cols: usize, nl: usize },

    #[error("quadfit has {rows} rows, not a valid feature count")]
    QuadfitRows { rows: usize },

    #[error("quadfit has {cols} columns, expected 10*nL or 11*nL ({nl} lights)")]
    QuadfitCols { cols: usize, nl: usize },
}

/// Whether the quadratic fit carries a per-light scale parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadingMode {
    /// 10 parameters per light, projected as-is.
    Raw,
    /// 11 parameters per light; the last is a scale factor applied to the
    /// other 10 and floored at `MIN_SCALE`.
    Normalized,
}

/// Validated spatially-varying illumination model.
///
/// `reference_size` is the (height, width) canvas the model was fit on. It
/// only feeds the coordinate center and normalization denominator; it is
/// deliberately NOT required to match the normal map being shaded, so a
/// model can be rendered at a different canvas size than it was fit on.
#[derive(Debug, Clone)]
pub struct ModelParams {
    n_lights: usize,
    linfit: FitMatrix,
    quadfit: FitMatrix,
    reference_size: (f64, f64),
}

impl ModelParams {
    /// Validate and construct the bundle.
    ///
    /// Checks, in order: `n_lights` positive; `linfit` rows are a valid
    /// feature count and its columns are `3*nL` or `4*nL`; `quadfit` rows
    /// are a valid feature count and its columns are `10*nL` or `11*nL`.
    pub fn new(
        n_lights: usize,
        linfit: FitMatrix,
        quadfit: FitMatrix,
        reference_size: (f64, f64),
    ) -> Result<Self, ParamError> {
        if n_lights == 0 {
            return Err(ParamError::InvalidLightCount);
        }

        if !is_valid_feature_count(linfit.rows()) {
            return Err(ParamError::LinfitRows {
                rows: linfit.rows(),
            });
        }
        let cols = linfit.cols();
        if cols != 3 * n_lights && cols != 4 * n_lights {
            return Err(ParamError::LinfitCols {
                cols,
                nl: n_lights,
            });
        }

        if !is_valid_feature_count(quadfit.rows()) {
            return Err(ParamError::QuadfitRows {
                rows: quadfit.rows(),
            });
        }
        let cols = quadfit.cols();
        if cols != 10 * n_lights && cols != 11 * n_lights {
            return Err(ParamError::QuadfitCols {
                cols,
                nl: n_lights,
            });
        }

        Ok(Self {
            n_lights,
            linfit,
            quadfit,
            reference_size,
        })
    }

    pub fn n_lights(&self) -> usize {
        self.n_lights
    }

    pub fn linfit(&self) -> &FitMatrix {
        &self.linfit
    }

    pub fn quadfit(&self) -> &FitMatrix {
        &self.quadfit
    }

    /// (height, width) of the canvas the model was fit on.
    pub fn reference_size(&self) -> (f64, f64) {
        self.reference_size
    }

    /// Quadratic parameters per light: 10 raw, 11 normalized.
    pub fn quad_models_per_light(&self) -> usize {
        self.quadfit.cols() / self.n_lights
    }

    /// Mode selected from the quadfit column count.
    pub fn shading_mode(&self) -> ShadingMode {
        if self.quad_models_per_light() == 11 {
            ShadingMode::Normalized
        } else {
            ShadingMode::Raw
        }
    }

    /// Offset of the quadfit's basis suffix into the full feature table.
    pub fn quad_basis_offset(&self) -> usize {
        NUM_FEATURES - self.quadfit.rows()
    }
}
