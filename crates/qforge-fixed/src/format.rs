// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Fixed-point format description (integer/fractional bit split)

use core::fmt;

use crate::error::{FixedPointError, Result};

/// Signed fixed-point format `Q<integer_bits>.<fractional_bits>`
///
/// Immutable once built. All derived quantities (scale, range, raw code
/// range) are computed from the two widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedPointFormat {
    integer_bits: u32,
    fractional_bits: u32,
}

impl FixedPointFormat {
    /// Q16.16, the format of the reference hardware datapath
    pub const Q16_16: Self = Self {
        integer_bits: 16,
        fractional_bits: 16,
    };

    /// Widest format whose every grid point is exact in an `f64`
    pub const MAX_TOTAL_BITS: u32 = 53;

    /// Build a format, validating the bit widths
    ///
    /// # Errors
    ///
    /// Returns `FixedPointError::InvalidFormat` if there is no sign/integer
    /// bit or the total width exceeds [`Self::MAX_TOTAL_BITS`].
    pub fn new(integer_bits: u32, fractional_bits: u32) -> Result<Self> {
        if integer_bits == 0 {
            return Err(FixedPointError::InvalidFormat {
                integer_bits,
                fractional_bits,
                reason: "integer part must hold at least the sign bit",
            });
        }
        if integer_bits.saturating_add(fractional_bits) > Self::MAX_TOTAL_BITS {
            return Err(FixedPointError::InvalidFormat {
                integer_bits,
                fractional_bits,
                reason: "total width exceeds 53 bits",
            });
        }
        Ok(Self {
            integer_bits,
            fractional_bits,
        })
    }

    #[inline]
    pub fn integer_bits(&self) -> u32 {
        self.integer_bits
    }

    #[inline]
    pub fn fractional_bits(&self) -> u32 {
        self.fractional_bits
    }

    #[inline]
    pub fn total_bits(&self) -> u32 {
        self.integer_bits + self.fractional_bits
    }

    /// Scale factor S = 2^fractional_bits
    #[inline]
    pub fn scale(&self) -> f64 {
        (1u64 << self.fractional_bits) as f64
    }

    /// Grid spacing 1/S
    #[inline]
    pub fn resolution(&self) -> f64 {
        1.0 / self.scale()
    }

    /// Most negative representable value, -2^(integer_bits - 1)
    #[inline]
    pub fn min_value(&self) -> f64 {
        -((1u64 << (self.integer_bits - 1)) as f64)
    }

    /// Most positive representable value, 2^(integer_bits - 1) - 1/S
    #[inline]
    pub fn max_value(&self) -> f64 {
        (1u64 << (self.integer_bits - 1)) as f64 - self.resolution()
    }

    /// Smallest two's-complement code
    #[inline]
    pub fn min_raw(&self) -> i64 {
        -(1i64 << (self.total_bits() - 1))
    }

    /// Largest two's-complement code
    #[inline]
    pub fn max_raw(&self) -> i64 {
        (1i64 << (self.total_bits() - 1)) - 1
    }
}

impl Default for FixedPointFormat {
    fn default() -> Self {
        Self::Q16_16
    }
}

impl fmt::Display for FixedPointFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}.{}", self.integer_bits, self.fractional_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_q16_16_constants() {
        let fmt = FixedPointFormat::Q16_16;
        assert_eq!(fmt.scale(), 65536.0);
        assert_eq!(fmt.min_value(), -32768.0);
        assert_eq!(fmt.max_value(), 32768.0 - 1.0 / 65536.0);
        assert_eq!(fmt.min_raw(), i32::MIN as i64);
        assert_eq!(fmt.max_raw(), i32::MAX as i64);
        assert_eq!(fmt.to_string(), "Q16.16");
    }

    #[test]
    fn test_new_matches_constant() {
        assert_eq!(FixedPointFormat::new(16, 16).unwrap(), FixedPointFormat::Q16_16);
        assert_eq!(FixedPointFormat::default(), FixedPointFormat::Q16_16);
    }

    #[test]
    fn test_invalid_formats() {
        assert!(matches!(
            FixedPointFormat::new(0, 16),
            Err(FixedPointError::InvalidFormat { .. })
        ));
        assert!(FixedPointFormat::new(32, 32).is_err());
        assert!(FixedPointFormat::new(u32::MAX, 1).is_err());
        assert!(FixedPointFormat::new(1, 52).is_ok());
        assert!(FixedPointFormat::new(53, 0).is_ok());
    }

    #[test]
    fn test_integer_only_format() {
        let fmt = FixedPointFormat::new(8, 0).unwrap();
        assert_eq!(fmt.scale(), 1.0);
        assert_eq!(fmt.min_value(), -128.0);
        assert_eq!(fmt.max_value(), 127.0);
    }
}
