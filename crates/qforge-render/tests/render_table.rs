// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

use qforge_fixed::FixedPointCodec;
use qforge_network::{Topology, WeightEmitter, WeightSet};
use qforge_render::{ConstantTableRenderer, RenderRequest, VhdlRenderer};

#[test]
fn emitted_table_renders_in_hardware_order() {
    let weights = WeightSet::new(
        vec![vec![1.0, 1.0], vec![1.0, 1.0]],
        vec![0.0, -1.0],
        vec![vec![1.0, -2.0]],
        vec![-0.5],
    );
    let table = WeightEmitter::new(Topology::xor(), FixedPointCodec::q16_16())
        .emit(&weights)
        .unwrap();

    let text = VhdlRenderer.render(&RenderRequest::from_table(&table)).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "constant NEURONS_PER_LAYER_C : integer_array(0 to 1) := (2, 1);");
    assert_eq!(lines[1], "constant WEIGHTS_C : sfixed_bus_array(0 to 8) := (");
    assert_eq!(lines[2], "  to_sfixed_a(0.0),");
    assert_eq!(lines[5], "  to_sfixed_a(-1.0),");
    assert_eq!(lines[8], "  to_sfixed_a(-0.5),");
    assert_eq!(lines[10], "  to_sfixed_a(-2.0)");
    assert_eq!(lines[11], ");");
    assert_eq!(VhdlRenderer.file_extension(), "vhd");
}

#[test]
fn custom_names_flow_through() {
    let table = WeightEmitter::new(Topology::xor(), FixedPointCodec::q16_16())
        .emit(&WeightSet::zeros(&Topology::xor()))
        .unwrap();
    let request = RenderRequest::named("XOR_W", "XOR_LAYERS", &table);
    let text = VhdlRenderer.render(&request).unwrap();
    assert!(text.starts_with("constant XOR_LAYERS : integer_array(0 to 1)"));
    assert!(text.contains("constant XOR_W : sfixed_bus_array(0 to 8) := ("));
}
