// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Quantization to and from the fixed-point grid
//!
//! Pure functions over a [`FixedPointFormat`]. Rounding is fixed as
//! round-half-away-from-zero on the pre-clamp value so results are
//! reproducible on every platform.

use crate::format::FixedPointFormat;

/// Saturating fixed-point codec for one format
///
/// # Example
/// ```
/// use qforge_fixed::FixedPointCodec;
///
/// let codec = FixedPointCodec::q16_16();
/// let step = 1.0 / 65536.0;
///
/// // Ties round away from zero
/// assert_eq!(codec.quantize(2.5 * step), 3.0 * step);
/// assert_eq!(codec.quantize(-2.5 * step), -3.0 * step);
///
/// // Saturation
/// assert_eq!(codec.quantize(-1.0e6), -32768.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedPointCodec {
    format: FixedPointFormat,
}

impl FixedPointCodec {
    pub const fn new(format: FixedPointFormat) -> Self {
        Self { format }
    }

    /// Codec for the reference Q16.16 datapath
    pub const fn q16_16() -> Self {
        Self::new(FixedPointFormat::Q16_16)
    }

    #[inline]
    pub fn format(&self) -> FixedPointFormat {
        self.format
    }

    /// Snap `x` to the nearest multiple of 1/S and saturate to [MIN, MAX]
    ///
    /// Infinities saturate. NaN has no hardware encoding and maps to zero.
    #[inline]
    pub fn quantize(&self, x: f64) -> f64 {
        if x.is_nan() {
            return 0.0;
        }
        let scale = self.format.scale();
        // f64::round is round-half-away-from-zero
        let snapped = (x * scale).round() / scale;
        snapped.clamp(self.format.min_value(), self.format.max_value())
    }

    /// Quantize every element of a slice
    pub fn quantize_slice(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.quantize(v)).collect()
    }

    /// Quantize every element of a row-major matrix
    pub fn quantize_matrix(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.quantize_slice(row)).collect()
    }

    /// Two's-complement integer code of `x` (what the hardware register holds)
    #[inline]
    pub fn to_raw(&self, x: f64) -> i64 {
        if x.is_nan() {
            return 0;
        }
        let code = (x * self.format.scale()).round();
        code.clamp(self.format.min_raw() as f64, self.format.max_raw() as f64) as i64
    }

    /// Real value of an integer code; out-of-range codes saturate
    #[inline]
    pub fn from_raw(&self, raw: i64) -> f64 {
        let code = raw.clamp(self.format.min_raw(), self.format.max_raw());
        code as f64 / self.format.scale()
    }

    /// True if `x` already lies on the grid inside the representable range
    #[inline]
    pub fn is_representable(&self, x: f64) -> bool {
        self.quantize(x) == x
    }
}

impl From<FixedPointFormat> for FixedPointCodec {
    fn from(format: FixedPointFormat) -> Self {
        Self::new(format)
    }
}
