// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Search, verify and emit through the umbrella crate

use qforge::prelude::*;

fn codec() -> FixedPointCodec {
    FixedPointCodec::q16_16()
}

fn verifier() -> AccuracyVerifier {
    AccuracyVerifier::new(HardwareEmulator::new(Topology::xor(), codec()))
}

fn textbook_relu_xor() -> WeightSet {
    WeightSet::new(
        vec![vec![1.0, 1.0], vec![1.0, 1.0]],
        vec![0.0, -1.0],
        vec![vec![1.0, -2.0]],
        vec![-0.5],
    )
}

#[test]
fn test_verify_then_render_textbook_network() {
    let weights = textbook_relu_xor();
    let verification = verifier().verify(&weights).unwrap();
    assert!(verification.float.all_correct());
    assert!(verification.quantized.all_correct());

    let table = WeightEmitter::new(Topology::xor(), codec())
        .emit(&weights)
        .unwrap();
    let vhdl = VhdlRenderer
        .render(&RenderRequest::from_table(&table))
        .unwrap();
    let expected = "\
constant NEURONS_PER_LAYER_C : integer_array(0 to 1) := (2, 1);
constant WEIGHTS_C : sfixed_bus_array(0 to 8) := (
  to_sfixed_a(0.0),
  to_sfixed_a(1.0),
  to_sfixed_a(1.0),
  to_sfixed_a(-1.0),
  to_sfixed_a(1.0),
  to_sfixed_a(1.0),
  to_sfixed_a(-0.5),
  to_sfixed_a(1.0),
  to_sfixed_a(-2.0)
);
";
    assert_eq!(vhdl, expected);
}

#[test]
fn test_search_skips_seeds_lost_in_quantization() {
    // Seeds below 5 produce a bias that only works in float
    let trainer = |seed: u64, _p: &TrainingParams| {
        let mut w = textbook_relu_xor();
        if seed < 5 {
            w = WeightSet::new(
                w.w1().to_vec(),
                w.b1().to_vec(),
                w.w2().to_vec(),
                vec![-1.0 + 0.3 / 65536.0],
            );
        }
        w
    };
    let outcome = TrainingSearchLoop::new(trainer, verifier(), SearchConfig::default())
        .search()
        .unwrap();
    match outcome {
        SearchOutcome::Accepted { seed, attempts, .. } => {
            assert_eq!(seed, 5);
            assert_eq!(attempts, 6);
        }
        other => panic!("expected acceptance, got {:?}", other),
    }
}

#[test]
fn test_reference_trainer_output_passes_the_hardware_check() {
    let topology = Topology::xor();
    let search = TrainingSearchLoop::new(
        MlpTrainer::new(topology.clone()),
        verifier(),
        SearchConfig::default(),
    );
    let accepted = search.search().unwrap().into_accepted().unwrap();

    // Independent re-check of the accepted weights
    let again = verifier().verify(&accepted.weights).unwrap();
    assert!(again.quantized.all_correct());

    let table = WeightEmitter::new(topology, codec())
        .emit(&accepted.weights)
        .unwrap();
    assert_eq!(table.len(), 9);
    assert!(table.values().iter().all(|v| codec().is_representable(*v)));
}

#[test]
fn test_accepted_weights_survive_json() {
    let json = serde_json::to_string(&textbook_relu_xor()).unwrap();
    let restored: WeightSet = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, textbook_relu_xor());
}
