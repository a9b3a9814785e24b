// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Verify-then-emit flow across the public API

use qforge_fixed::{FixedPointCodec, FixedPointFormat};
use qforge_network::{
    AccuracyVerifier, HardwareEmulator, Mode, NetworkError, Topology, WeightEmitter, WeightSet,
};

fn relu_xor() -> WeightSet {
    WeightSet::new(
        vec![vec![1.0, 1.0], vec![1.0, 1.0]],
        vec![0.0, -1.0],
        vec![vec![1.0, -2.0]],
        vec![-0.5],
    )
}

#[test]
fn accepted_weights_emit_in_hardware_order() {
    let topology = Topology::xor();
    let codec = FixedPointCodec::q16_16();
    let verifier = AccuracyVerifier::new(HardwareEmulator::new(topology.clone(), codec));

    let weights = relu_xor();
    let verification = verifier.verify(&weights).unwrap();
    assert!(verification.report(Mode::Quantized).all_correct());

    let table = WeightEmitter::new(topology, codec).emit(&weights).unwrap();
    assert_eq!(
        table.values(),
        &[0.0, 1.0, 1.0, -1.0, 1.0, 1.0, -0.5, 1.0, -2.0]
    );
}

#[test]
fn weights_round_trip_through_json_before_verification() {
    let json = r#"{"w1":[[1.0,1.0],[1.0,1.0]],"b1":[0.0,-1.0],"w2":[[1.0,-2.0]],"b2":[-0.5]}"#;
    let weights: WeightSet = serde_json::from_str(json).unwrap();
    assert_eq!(weights, relu_xor());

    let verifier = AccuracyVerifier::new(HardwareEmulator::new(
        Topology::xor(),
        FixedPointCodec::q16_16(),
    ));
    assert!(verifier.verify(&weights).unwrap().float.all_correct());
}

#[test]
fn coarse_format_loses_a_fine_bias() {
    // Q8.2 cannot hold -0.9; it snaps to -1.0 and the mixed corners land on 0
    let weights = WeightSet::new(
        vec![vec![1.0, 1.0], vec![1.0, 1.0]],
        vec![0.0, -1.0],
        vec![vec![1.0, -2.0]],
        vec![-0.9],
    );
    let coarse = FixedPointCodec::new(FixedPointFormat::new(8, 2).unwrap());
    let verifier = AccuracyVerifier::new(HardwareEmulator::new(Topology::xor(), coarse));
    let v = verifier.verify(&weights).unwrap();

    assert!(v.float.all_correct());
    assert!(!v.quantized.all_correct());
    assert_eq!(v.quantized.labels(), vec![0, 0, 0, 0]);
}

#[test]
fn topology_mismatch_is_reported_by_every_stage() {
    let narrow = WeightSet::zeros(&Topology::new(2, 1).unwrap());
    let topology = Topology::xor();
    let codec = FixedPointCodec::q16_16();

    let emulator = HardwareEmulator::new(topology.clone(), codec);
    assert!(matches!(
        emulator.forward_float(&narrow, &[0.0, 0.0]),
        Err(NetworkError::OutOfDomainShape { .. })
    ));
    assert!(AccuracyVerifier::new(emulator).verify(&narrow).is_err());
    assert!(WeightEmitter::new(topology, codec).emit(&narrow).is_err());
}
