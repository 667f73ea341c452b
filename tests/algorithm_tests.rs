// tests/algorithm_tests.rs

// End-to-end coverage of the Deutsch-Jozsa pipeline: oracle construction,
// circuit composition, noiseless execution, and classification.

use deutsch_jozsa::{
    build_circuit, classify, Classification, DeutschJozsa, DjError, Gate, MeasurementCounts,
    Oracle, QubitId, QubitRegister, Simulator,
};
use std::collections::HashMap;

// Helper function to create QubitId for tests
fn qid(id: u64) -> QubitId {
    QubitId(id)
}

fn run_scenario(m: usize, oracle: Oracle, shots: u64) -> (Classification, MeasurementCounts) {
    let algorithm = DeutschJozsa::new(m, oracle).expect("valid configuration");
    let simulator = Simulator::with_seed(1234);
    let outcome = algorithm.run(&simulator, shots).expect("run failed");
    (outcome.classification, outcome.counts)
}

#[test]
fn test_constant_zero_m4_full_mass_on_zero_string() {
    let (classification, counts) = run_scenario(4, Oracle::ConstantZero, 100_000);

    assert_eq!(classification, Classification::Constant);
    assert_eq!(counts.dominant_outcome(), Some(("0000", 100_000)));
    // Noiseless execution is exactly deterministic: one outcome, all shots.
    assert_eq!(counts.outcomes().len(), 1);
    assert_eq!(counts.get("0000"), 100_000);
}

#[test]
fn test_constant_one_m4_full_mass_on_zero_string() {
    let (classification, counts) = run_scenario(4, Oracle::ConstantOne, 100_000);

    assert_eq!(classification, Classification::Constant);
    assert_eq!(counts.dominant_outcome(), Some(("0000", 100_000)));
    assert_eq!(counts.outcomes().len(), 1);
}

#[test]
fn test_balanced_parity_m4_full_mass_on_ones_string() {
    let (classification, counts) = run_scenario(4, Oracle::Parity, 100_000);

    assert_eq!(classification, Classification::Balanced);
    assert_eq!(counts.dominant_outcome(), Some(("1111", 100_000)));
    assert_eq!(counts.outcomes().len(), 1);
}

#[test]
fn test_smallest_register_constant_one() {
    // m = 1 is the original Deutsch algorithm.
    let (classification, counts) = run_scenario(1, Oracle::ConstantOne, 4096);

    assert_eq!(classification, Classification::Constant);
    assert_eq!(counts.dominant_outcome(), Some(("0", 4096)));
}

#[test]
fn test_smallest_register_parity() {
    let (classification, counts) = run_scenario(1, Oracle::Parity, 4096);

    assert_eq!(classification, Classification::Balanced);
    assert_eq!(counts.dominant_outcome(), Some(("1", 4096)));
}

#[test]
fn test_subset_parity_reveals_its_subset() {
    // The final interference pattern concentrates on the subset's
    // characteristic string: slot i reads 1 exactly when i is a control.
    let oracle = Oracle::SubsetParity { controls: vec![0, 2] };
    let (classification, counts) = run_scenario(3, oracle, 4096);

    assert_eq!(classification, Classification::Balanced);
    assert_eq!(counts.dominant_outcome(), Some(("101", 4096)));
}

#[test]
fn test_oracle_gate_counts() {
    let register = QubitRegister::new(5).unwrap();

    let constant_zero = Oracle::ConstantZero.circuit(&register).unwrap();
    assert!(constant_zero.is_empty());

    let constant_one = Oracle::ConstantOne.circuit(&register).unwrap();
    assert_eq!(constant_one.len(), 1);
    assert_eq!(
        constant_one.gates(),
        &[Gate::PauliX { target: register.ancilla() }]
    );

    let parity = Oracle::Parity.circuit(&register).unwrap();
    assert_eq!(parity.len(), 5);
    for (i, gate) in parity.gates().iter().enumerate() {
        assert_eq!(
            gate,
            &Gate::Cnot { control: qid(i as u64), target: register.ancilla() }
        );
    }
}

#[test]
fn test_oracle_circuits_contain_no_measurement() {
    let register = QubitRegister::new(3).unwrap();
    let oracles = [
        Oracle::ConstantZero,
        Oracle::ConstantOne,
        Oracle::Parity,
        Oracle::SubsetParity { controls: vec![1] },
    ];
    for oracle in oracles {
        let circuit = oracle.circuit(&register).unwrap();
        assert!(!circuit.has_measurement(), "oracle {} measures", oracle);
    }
}

#[test]
fn test_full_circuit_shape() {
    for m in [1, 2, 4, 7] {
        let register = QubitRegister::new(m).unwrap();
        let circuit = build_circuit(&register, &Oracle::Parity).unwrap();

        assert_eq!(circuit.num_qubits(), m + 1, "qubit count for m={}", m);

        // Exactly m classical slots, qubit i measured into slot i.
        let measured = circuit.measured_qubits();
        assert_eq!(measured.len(), m);
        for (slot, qubit) in measured.iter().enumerate() {
            assert_eq!(*qubit, qid(slot as u64));
        }
        // The ancilla is never measured.
        assert!(!measured.contains(&register.ancilla()));
    }
}

#[test]
fn test_circuit_construction_is_idempotent() {
    let oracles = [
        Oracle::ConstantZero,
        Oracle::ConstantOne,
        Oracle::Parity,
        Oracle::SubsetParity { controls: vec![1, 3] },
    ];
    for oracle in oracles {
        let algorithm = DeutschJozsa::new(4, oracle).unwrap();
        assert_eq!(algorithm.circuit().unwrap(), algorithm.circuit().unwrap());
    }
}

#[test]
fn test_empty_input_register_rejected() {
    let result = DeutschJozsa::new(0, Oracle::ConstantZero);
    assert!(matches!(result, Err(DjError::InvalidConfiguration { .. })));

    let result = QubitRegister::new(0);
    assert!(matches!(result, Err(DjError::InvalidConfiguration { .. })));
}

#[test]
fn test_malformed_subsets_rejected() {
    for controls in [vec![], vec![3], vec![0, 0]] {
        let result = DeutschJozsa::new(3, Oracle::SubsetParity { controls: controls.clone() });
        assert!(
            matches!(result, Err(DjError::InvalidConfiguration { .. })),
            "subset {:?} should be rejected",
            controls
        );
    }
}

#[test]
fn test_zero_shots_rejected() {
    let algorithm = DeutschJozsa::new(2, Oracle::Parity).unwrap();
    let result = algorithm.run(&Simulator::with_seed(0), 0);
    assert!(matches!(result, Err(DjError::InvalidConfiguration { .. })));
}

#[test]
fn test_oracle_truth_tables_are_balanced_or_constant() {
    let register = QubitRegister::new(4).unwrap();
    let oracles = [
        Oracle::ConstantZero,
        Oracle::ConstantOne,
        Oracle::Parity,
        Oracle::SubsetParity { controls: vec![1, 2] },
    ];
    for oracle in oracles {
        let ones: u64 = (0..16u64)
            .map(|x| oracle.evaluate(&register, x).unwrap() as u64)
            .sum();
        if oracle.is_balanced() {
            assert_eq!(ones, 8, "oracle {} is not 50/50 over all inputs", oracle);
        } else {
            assert!(ones == 0 || ones == 16, "oracle {} is not constant", oracle);
        }
    }
}

#[test]
fn test_classify_counts_from_external_engine() {
    // The interpreter accepts counts from any engine honoring the contract.
    let mut constant_counts = HashMap::new();
    constant_counts.insert("000".to_string(), 1000);
    let counts = MeasurementCounts::from_counts(constant_counts, 1000, 3);
    assert_eq!(classify(&counts).unwrap(), Classification::Constant);

    let mut balanced_counts = HashMap::new();
    balanced_counts.insert("010".to_string(), 998);
    balanced_counts.insert("000".to_string(), 2);
    let counts = MeasurementCounts::from_counts(balanced_counts, 1000, 3);
    assert_eq!(classify(&counts).unwrap(), Classification::Balanced);
}

#[test]
fn test_classify_rejects_contract_violations() {
    // Sum of counts disagrees with the declared shot total.
    let mut short_counts = HashMap::new();
    short_counts.insert("00".to_string(), 900);
    let counts = MeasurementCounts::from_counts(short_counts, 1000, 2);
    assert!(matches!(classify(&counts), Err(DjError::InconsistentCounts { .. })));

    // An outcome string of unexpected length.
    let mut wide_counts = HashMap::new();
    wide_counts.insert("000".to_string(), 1000);
    let counts = MeasurementCounts::from_counts(wide_counts, 1000, 2);
    assert!(matches!(classify(&counts), Err(DjError::InconsistentCounts { .. })));

    // An empty map cannot be classified.
    let counts = MeasurementCounts::from_counts(HashMap::new(), 0, 2);
    assert!(matches!(classify(&counts), Err(DjError::InconsistentCounts { .. })));
}

#[test]
fn test_seeded_runs_reproduce() {
    let algorithm = DeutschJozsa::new(3, Oracle::Parity).unwrap();
    let first = algorithm.run(&Simulator::with_seed(99), 2048).unwrap();
    let second = algorithm.run(&Simulator::with_seed(99), 2048).unwrap();
    assert_eq!(first, second);
}
