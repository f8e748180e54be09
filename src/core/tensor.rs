//! Typed views over the dense numeric buffers the evaluator consumes.
//!
//! Layouts:
//! - `NormalMap`: row-major H×W×3, channel fastest
//!   (index = (y·W + x)·3 + channel).
//! - `FitMatrix`: column-major rows×cols
//!   (index = col·rows + row); this preserves the fit tensors' column
//!   addressing contract `column = light·models_per_light + param`.
//! - `IntensityCube`: row-major H×W×nL, light channel fastest
//!   (index = (y·W + x)·nL + light).
//!
//! Construction checks the buffer length against the declared shape, so
//! downstream indexing never goes out of bounds on validated inputs.

use nalgebra::Vector3;
use thiserror::Error;

/// A buffer's length does not match its declared shape.
#[derive(Debug, Error)]
#[error("{name} has {len} elements, expected {expected} for shape {shape}")]
pub struct ShapeError {
    pub name: &'static str,
    pub len: usize,
    pub expected: usize,
    pub shape: String,
}

/// Dense per-pixel surface normal field, H×W×3 double precision.
///
/// Normals are used as supplied; the evaluator does not renormalize them.
#[derive(Debug, Clone)]
pub struct NormalMap {
    data: Vec<f64>,
    height: usize,
    width: usize,
}

impl NormalMap {
    /// Wrap a row-major H×W×3 buffer (channel fastest).
    pub fn new(data: Vec<f64>, height: usize, width: usize) -> Result<Self, ShapeError> {
        let expected = height * width * 3;
        if data.len() != expected {
            return Err(ShapeError {
                name: "normal map",
                len: data.len(),
                expected,
                shape: format!("{height}x{width}x3"),
            });
        }
        Ok(Self {
            data,
            height,
            width,
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// The normal at pixel (y, x).
    pub fn normal(&self, y: usize, x: usize) -> Vector3<f64> {
        let base = (y * self.width + x) * 3;
        Vector3::new(self.data[base], self.data[base + 1], self.data[base + 2])
    }
}

/// Column-major coefficient matrix for a spatially-varying fit.
///
/// One row per polynomial feature, one column per (light, parameter) pair
/// addressed as `light·models_per_light + param`. Each column is dotted
/// against the basis-vector suffix of matching length.
#[derive(Debug, Clone)]
pub struct FitMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl FitMatrix {
    /// Wrap a column-major rows×cols buffer.
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Result<Self, ShapeError> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(ShapeError {
                name: "fit matrix",
                len: data.len(),
                expected,
                shape: format!("{rows}x{cols}"),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Number of rows, i.e. the feature count the fit was built with.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The `rows` coefficients of column `col`, contiguous in storage.
    pub fn column(&self, col: usize) -> &[f64] {
        let start = col * self.rows;
        &self.data[start..start + self.rows]
    }
}

/// Evaluated shading intensities, H×W×nL double precision, all entries >= 0.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityCube {
    data: Vec<f64>,
    height: usize,
    width: usize,
    lights: usize,
}

impl IntensityCube {
    /// Allocate a zero-filled cube.
    pub fn zeros(height: usize, width: usize, lights: usize) -> Self {
        Self {
            data: vec![0.0; height * width * lights],
            height,
            width,
            lights,
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn lights(&self) -> usize {
        self.lights
    }

    /// Intensity at pixel (y, x) for light `light`.
    pub fn intensity(&self, y: usize, x: usize, light: usize) -> f64 {
        self.data[(y * self.width + x) * self.lights + light]
    }

    /// Mutable slice of one pixel's per-light intensities.
    pub fn pixel_mut(&mut self, y: usize, x: usize) -> &mut [f64] {
        let base = (y * self.width + x) * self.lights;
        &mut self.data[base..base + self.lights]
    }

    /// Mutable W×nL slice of row `y`. Rows are disjoint, so a parallel
    /// evaluator can hand each worker its own row slices.
    pub fn rows_mut(&mut self) -> std::slice::ChunksMut<'_, f64> {
        self.data.chunks_mut(self.width * self.lights)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
}
