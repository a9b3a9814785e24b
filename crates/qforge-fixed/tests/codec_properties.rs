// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Property tests for the saturating fixed-point codec

use proptest::prelude::*;
use qforge_fixed::{FixedPointCodec, FixedPointFormat};

const Q: FixedPointCodec = FixedPointCodec::q16_16();

fn is_grid_multiple(v: f64) -> bool {
    let scaled = v * FixedPointFormat::Q16_16.scale();
    scaled.fract() == 0.0
}

proptest! {
    #[test]
    fn quantize_is_idempotent(x in any::<f64>()) {
        let once = Q.quantize(x);
        prop_assert_eq!(Q.quantize(once), once);
    }

    #[test]
    fn in_range_error_is_bounded(x in -32768.0f64..32767.99998) {
        let fmt = FixedPointFormat::Q16_16;
        let q = Q.quantize(x);
        prop_assert!((q - x).abs() <= fmt.resolution() / 2.0);
        prop_assert!(is_grid_multiple(q));
        prop_assert!(q >= fmt.min_value() && q <= fmt.max_value());
    }

    #[test]
    fn above_max_saturates(x in 32768.0f64..1.0e300) {
        prop_assert_eq!(Q.quantize(x), FixedPointFormat::Q16_16.max_value());
    }

    #[test]
    fn below_min_saturates(x in -1.0e300f64..-32768.0) {
        prop_assert_eq!(Q.quantize(x), FixedPointFormat::Q16_16.min_value());
    }

    #[test]
    fn raw_code_agrees_with_quantize(x in -1.0e6f64..1.0e6) {
        let raw = Q.to_raw(x);
        prop_assert_eq!(Q.from_raw(raw), Q.quantize(x));
    }
}
