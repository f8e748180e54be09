//! Basis-projection kernels.
//!
//! Every spatially-varying quantity in the model is reconstructed the same
//! way: dot the pixel's basis-feature suffix against one column of a fit
//! matrix. The four kernels here differ only in how the projected values
//! are combined afterwards:
//!
//! - `light_matrix`: raw per-light model parameters.
//! - `normalized_light_matrix`: per-light parameters rescaled by a
//!   projected scale factor, floored at `MIN_SCALE`.
//! - `project_full`: a signal-weighted 3-vector summed over lights.
//! - `reflection_vector`: one scalar per light with an index-shifted
//!   signal pairing.
//!
//! All kernels take the basis as a slice whose length equals the fit
//! matrix's row count: the caller passes `&features[NUM_FEATURES - nx..]`,
//! the lowest-degree suffix of the full feature table.

use crate::core::FitMatrix;
use nalgebra::Vector3;

/// Floor on any reconstructed intensity-scale factor. Keeps a normalized
/// model's rescaling away from zero or negative values.
pub const MIN_SCALE: f64 = 0.001;

/// Dot the basis suffix against one fit-matrix column.
#[inline]
fn project_column(fit: &FitMatrix, col: usize, basis: &[f64]) -> f64 {
    let column = fit.column(col);
    debug_assert_eq!(column.len(), basis.len());
    basis.iter().zip(column).map(|(x, c)| x * c).sum()
}

/// Reconstruct raw per-light model parameters for all lights at once.
///
/// `fit` has `n_lights * models_per_light` columns addressed as
/// `light * models_per_light + param`; `out` receives one projected value
/// per column at the same index.
pub fn light_matrix(
    fit: &FitMatrix,
    basis: &[f64],
    n_lights: usize,
    models_per_light: usize,
    out: &mut [f64],
) {
    debug_assert_eq!(out.len(), n_lights * models_per_light);
    for light in 0..n_lights {
        for param in 0..models_per_light {
            let col = light * models_per_light + param;
            out[col] = project_column(fit, col, basis);
        }
    }
}

/// Reconstruct normalized per-light model parameters for all lights.
///
/// The last of each light's `models_per_light` parameters is a scale
/// factor: it is projected, floored at [`MIN_SCALE`], applied as a
/// multiplier to the remaining parameters, and NOT written to the output.
/// `out` therefore holds `models_per_light - 1` values per light.
///
/// Parameters are traversed in DESCENDING order within each light. This is
/// an algorithmic contract, not a convenience: the scale parameter is
/// stored last but must be known before any other parameter is written.
/// Reordering the traversal silently changes results.
pub fn normalized_light_matrix(
    fit: &FitMatrix,
    basis: &[f64],
    n_lights: usize,
    models_per_light: usize,
    out: &mut [f64],
) {
    let retained = models_per_light - 1;
    debug_assert_eq!(out.len(), n_lights * retained);
    for light in 0..n_lights {
        let mut scale = MIN_SCALE;
        for param in (0..models_per_light).rev() {
            let value = project_column(fit, light * models_per_light + param, basis);
            if param == models_per_light - 1 {
                scale = value.max(MIN_SCALE);
            } else {
                out[light * retained + param] = value * scale;
            }
        }
    }
}

/// Reconstruct a full 3-vector (e.g. an estimated normal) as a
/// signal-weighted combination over all lights.
///
/// `inv_fit` holds one column triple per light, addressed as
/// `3 * light + component`; each component sums the per-light projections
/// weighted by `signal[light]`. No clamping.
pub fn project_full(inv_fit: &FitMatrix, basis: &[f64], signal: &[f64]) -> Vector3<f64> {
    let mut result = Vector3::zeros();
    for component in 0..3 {
        let mut acc = 0.0;
        for (light, sig) in signal.iter().enumerate() {
            acc += project_column(inv_fit, 3 * light + component, basis) * sig;
        }
        result[component] = acc;
    }
    result
}

/// Build the per-light reflection scalars.
///
/// Each light has `n_lights - 1` model parameters; parameter `p` of light
/// `light` pairs with signal channel `p + 1` when `p >= light` and with
/// channel `p` otherwise. The shift skips the light's own signal channel,
/// coupling each light's model against every OTHER channel.
pub fn reflection_vector(fit: &FitMatrix, basis: &[f64], signal: &[f64], out: &mut [f64]) {
    let n_lights = signal.len();
    let n_model = n_lights - 1;
    debug_assert_eq!(out.len(), n_lights);
    for light in 0..n_lights {
        let mut acc = 0.0;
        for param in 0..n_model {
            let coeff = project_column(fit, light * n_model + param, basis);
            let sig = if param >= light {
                signal[param + 1]
            } else {
                signal[param]
            };
            acc += coeff * sig;
        }
        out[light] = acc;
    }
}
