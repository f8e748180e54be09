//! Quadratic shading evaluation over a normal map.
//!
//! For every pixel: build the polynomial basis once, reconstruct all
//! lights' quadratic models in one projection pass, then evaluate each
//! model against the pixel's normal. Basis construction and projection are
//! amortized over the light directions; only the 3×3 evaluation runs per
//! light.
//!
//! The pixel traversal is embarrassingly parallel: every pixel reads only
//! the shared fit matrices and the normal map and writes a disjoint slice
//! of the output, so the parallel variant partitions rows across workers
//! with per-worker scratch and no synchronization.

use crate::core::{basis_features, IntensityCube, NormalMap, QuadraticModel, QUADRATIC_PARAMS};
use crate::fit::{light_matrix, normalized_light_matrix, ModelParams, ShadingMode};
use rayon::prelude::*;

/// Normalized-coordinate frame derived from the model's reference canvas.
///
/// The reference size is decoupled from the normal map being shaded: it
/// fixes the center and the normalization denominator, while loop bounds
/// always come from the normal map itself.
struct CoordFrame {
    center_x: f64,
    center_y: f64,
    dim: f64,
}

impl CoordFrame {
    fn new(params: &ModelParams) -> Self {
        let (ref_h, ref_w) = params.reference_size();
        Self {
            center_x: (ref_w + 1.0) / 2.0,
            center_y: (ref_h + 1.0) / 2.0,
            dim: ref_h.min(ref_w),
        }
    }

    fn x(&self, px: usize) -> f64 {
        (px as f64 - self.center_x) / self.dim
    }

    fn y(&self, py: usize) -> f64 {
        (py as f64 - self.center_y) / self.dim
    }
}

/// Reconstruct the per-light quadratic parameters for one pixel.
///
/// `quad_params` receives 10 values per light in both modes; the
/// normalized mode consumes its 11th (scale) parameter during projection.
fn project_pixel(params: &ModelParams, basis_suffix: &[f64], quad_params: &mut [f64]) {
    match params.shading_mode() {
        ShadingMode::Raw => light_matrix(
            params.quadfit(),
            basis_suffix,
            params.n_lights(),
            params.quad_models_per_light(),
            quad_params,
        ),
        ShadingMode::Normalized => normalized_light_matrix(
            params.quadfit(),
            basis_suffix,
            params.n_lights(),
            params.quad_models_per_light(),
            quad_params,
        ),
    }
}

/// Shade one row of pixels into its output slice (length W·nL).
fn shade_row(
    normals: &NormalMap,
    params: &ModelParams,
    frame: &CoordFrame,
    y: usize,
    quad_params: &mut [f64],
    out_row: &mut [f64],
) {
    let n_lights = params.n_lights();
    let offset = params.quad_basis_offset();
    let yv = frame.y(y);

    for x in 0..normals.width() {
        let features = basis_features(frame.x(x), yv);
        project_pixel(params, &features[offset..], quad_params);

        let n = normals.normal(y, x);
        let out_pixel = &mut out_row[x * n_lights..(x + 1) * n_lights];
        for (light, out) in out_pixel.iter_mut().enumerate() {
            let light_params = &quad_params[light * QUADRATIC_PARAMS..][..QUADRATIC_PARAMS];
            let model = QuadraticModel::from_params(light_params);
            *out = model.intensity(&n);
        }
    }
}

/// Evaluate the quadratic shading model at every pixel of `normals`.
///
/// Returns an H×W×nL cube of clamped intensities, H and W taken from the
/// normal map and nL from the parameter bundle. Scratch is allocated once
/// and reused across pixels; the computation is pure and deterministic.
pub fn shade_quadratic(normals: &NormalMap, params: &ModelParams) -> IntensityCube {
    let frame = CoordFrame::new(params);
    let mut output = IntensityCube::zeros(normals.height(), normals.width(), params.n_lights());
    let mut quad_params = vec![0.0; params.n_lights() * QUADRATIC_PARAMS];

    for (y, out_row) in output.rows_mut().enumerate() {
        shade_row(normals, params, &frame, y, &mut quad_params, out_row);
    }
    output
}

/// Row-parallel variant of [`shade_quadratic`].
///
/// Rows are disjoint output slices; each worker allocates its own
/// projection scratch, so no state is shared across concurrently shaded
/// pixels. The result is bit-identical to the sequential evaluator.
pub fn shade_quadratic_parallel(normals: &NormalMap, params: &ModelParams) -> IntensityCube {
    let frame = CoordFrame::new(params);
    let n_lights = params.n_lights();
    let mut output = IntensityCube::zeros(normals.height(), normals.width(), n_lights);

    let row_len = normals.width() * n_lights;
    output
        .as_mut_slice()
        .par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, out_row)| {
            let mut quad_params = vec![0.0; n_lights * QUADRATIC_PARAMS];
            shade_row(normals, params, &frame, y, &mut quad_params, out_row);
        });
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FitMatrix;
    use approx::assert_relative_eq;

    // Constant-only model (nX = 1): the basis suffix is [1.0], so every
    // reconstructed parameter is just its fit coefficient.
    fn constant_params(n_lights: usize, quad_coeffs: Vec<f64>) -> ModelParams {
        let linfit = FitMatrix::new(vec![0.0; 3 * n_lights], 1, 3 * n_lights).unwrap();
        let cols = quad_coeffs.len();
        let quadfit = FitMatrix::new(quad_coeffs, 1, cols).unwrap();
        ModelParams::new(n_lights, linfit, quadfit, (2.0, 2.0)).unwrap()
    }

    fn flat_normals(h: usize, w: usize) -> NormalMap {
        let mut data = Vec::with_capacity(h * w * 3);
        for _ in 0..h * w {
            data.extend_from_slice(&[0.0, 0.0, 1.0]);
        }
        NormalMap::new(data, h, w).unwrap()
    }

    #[test]
    fn test_constant_offset_model_shades_uniformly() {
        // A = 0, b = 0, c = 2.5: every pixel, every light reads 2.5.
        let mut coeffs = vec![0.0; 10];
        coeffs[9] = 2.5;
        let params = constant_params(1, coeffs);
        let out = shade_quadratic(&flat_normals(2, 2), &params);
        for y in 0..2 {
            for x in 0..2 {
                assert_relative_eq!(out.intensity(y, x, 0), 2.5);
            }
        }
    }

    #[test]
    fn test_negative_constant_clamps_everywhere() {
        let mut coeffs = vec![0.0; 10];
        coeffs[9] = -1.0;
        let params = constant_params(1, coeffs);
        let out = shade_quadratic(&flat_normals(2, 2), &params);
        assert!(out.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_output_shape_follows_normal_map_not_reference_size() {
        let mut coeffs = vec![0.0; 20];
        coeffs[9] = 1.0;
        coeffs[19] = 1.0;
        let linfit = FitMatrix::new(vec![0.0; 6], 1, 6).unwrap();
        let quadfit = FitMatrix::new(coeffs, 1, 20).unwrap();
        // Reference canvas 512x1024, actual map 3x5.
        let params = ModelParams::new(2, linfit, quadfit, (512.0, 1024.0)).unwrap();
        let out = shade_quadratic(&flat_normals(3, 5), &params);
        assert_eq!(out.height(), 3);
        assert_eq!(out.width(), 5);
        assert_eq!(out.lights(), 2);
    }
}
