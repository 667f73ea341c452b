// src/simulation/mod.rs

//! Executes `crate::circuits::Circuit` instances and produces
//! measurement-outcome frequency counts.
//!
//! This module contains the `Simulator` entry point and the internal
//! `SimulationEngine` responsible for evolving the joint state vector.
//! The engine supports exactly the contract the algorithm needs: bit-flip,
//! Hadamard, controlled bit-flip, and measurement of a qubit subset,
//! repeated over independent shots.

// Make engine module crate visible for tests
mod counts;
pub(crate) mod engine;

// Re-export the main public interface types
pub use counts::MeasurementCounts;

use crate::circuits::Circuit;
use crate::core::DjError;
use crate::gates::Gate;
use crate::validation;
use engine::SimulationEngine;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// The execution engine front-end: submit a circuit and a shot count,
/// receive outcome counts. One blocking call, no retries — the algorithm
/// performs exactly one oracle query per shot by design.
///
/// Each shot is an independent execution from |0...0>: gates evolve the
/// state deterministically and each measurement samples and collapses it.
/// With a fixed seed the whole run is reproducible.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    /// Optional PRNG seed; `None` draws one from the OS.
    seed: Option<u64>,
}

impl Simulator {
    /// Creates a simulator with OS-seeded sampling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a simulator whose measurement sampling is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Runs `circuit` for `shots` independent trials and returns the
    /// outcome counts. The counts sum to `shots` and every outcome string
    /// has one bit per measured qubit, in measurement-target order.
    ///
    /// # Errors
    /// * [`DjError::InvalidConfiguration`] — `shots` is zero.
    /// * [`DjError::InvalidOperation`] — the circuit measures nothing, or
    ///   a gate is structurally invalid.
    /// * [`DjError::SimulationError`] — internal engine failure; surfaced
    ///   to the caller unchanged.
    pub fn run(&self, circuit: &Circuit, shots: u64) -> Result<MeasurementCounts, DjError> {
        if shots == 0 {
            return Err(DjError::InvalidConfiguration {
                message: "shot count must be a positive integer".to_string(),
            });
        }
        if !circuit.has_measurement() {
            return Err(DjError::InvalidOperation {
                message: "circuit contains no measurement; execution would produce no outcomes"
                    .to_string(),
            });
        }

        let width = circuit.measured_qubits().len();
        let mut engine = SimulationEngine::init(circuit.qubits())?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let mut result = MeasurementCounts::new(shots, width);
        for _ in 0..shots {
            engine.reset();
            let mut bits = Vec::with_capacity(width);
            for gate in circuit.gates() {
                match gate {
                    Gate::Measure { targets } => {
                        // Unitary evolution must not have drifted the norm.
                        validation::check_normalization(engine.state(), None)?;
                        bits.extend(engine.measure(targets, &mut rng)?);
                    }
                    _ => engine.apply_gate(gate)?,
                }
            }
            let outcome: String = bits
                .iter()
                .map(|bit| if *bit == 1 { '1' } else { '0' })
                .collect();
            result.record(outcome);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::engine::SimulationEngine;
    use crate::core::{DjError, QubitId, StateVector};
    use crate::gates::Gate;
    use num_complex::Complex;
    use num_traits::Zero;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;
    use std::f64::consts::FRAC_1_SQRT_2;

    const TEST_TOLERANCE: f64 = 1e-9;

    // --- Helper Functions ---
    fn qid(id: u64) -> QubitId {
        QubitId(id)
    }

    fn engine_for(ids: &[u64]) -> SimulationEngine {
        let qubit_set: HashSet<QubitId> = ids.iter().map(|id| qid(*id)).collect();
        SimulationEngine::init(&qubit_set).expect("engine init failed")
    }

    /// Asserts that two complex state vectors are approximately equal
    /// component-wise.
    fn assert_complex_vec_approx_equal(
        actual: &[Complex<f64>],
        expected: &[Complex<f64>],
        context: &str,
    ) {
        assert_eq!(actual.len(), expected.len(), "Vector length mismatch - {}", context);
        for i in 0..actual.len() {
            let dist_sq = (actual[i] - expected[i]).norm_sqr();
            assert!(
                dist_sq < TEST_TOLERANCE * TEST_TOLERANCE,
                "Vector mismatch at index {} - Actual: {}, Expected: {}, DistSq: {:.3e}, Context: {}",
                i, actual[i], expected[i], dist_sq, context
            );
        }
    }

    #[test]
    fn test_pauli_x_flips_basis_state() -> Result<(), DjError> {
        let mut engine = engine_for(&[0]);
        engine.apply_gate(&Gate::PauliX { target: qid(0) })?;

        let expected = vec![Complex::zero(), Complex::new(1.0, 0.0)];
        assert_complex_vec_approx_equal(engine.state().vector(), &expected, "X on |0>");
        Ok(())
    }

    #[test]
    fn test_hadamard_creates_superposition() -> Result<(), DjError> {
        let mut engine = engine_for(&[0]);
        engine.apply_gate(&Gate::Hadamard { target: qid(0) })?;

        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        assert_complex_vec_approx_equal(engine.state().vector(), &[h, h], "H on |0>");
        Ok(())
    }

    #[test]
    fn test_hadamard_on_last_qubit() -> Result<(), DjError> {
        // Exercises the pair-index insertion at bit position 0.
        let mut engine = engine_for(&[0, 1]);
        engine.apply_gate(&Gate::Hadamard { target: qid(1) })?;

        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        let expected = vec![h, h, Complex::zero(), Complex::zero()];
        assert_complex_vec_approx_equal(engine.state().vector(), &expected, "H on q1 of |00>");
        Ok(())
    }

    #[test]
    fn test_cnot_correlates_qubits() -> Result<(), DjError> {
        // H then CNOT from |00> gives (|00> + |11>)/sqrt(2).
        let mut engine = engine_for(&[0, 1]);
        engine.apply_gate(&Gate::Hadamard { target: qid(0) })?;
        engine.apply_gate(&Gate::Cnot { control: qid(0), target: qid(1) })?;

        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        let expected = vec![h, Complex::zero(), Complex::zero(), h];
        assert_complex_vec_approx_equal(engine.state().vector(), &expected, "H + CNOT from |00>");
        Ok(())
    }

    #[test]
    fn test_cnot_across_outer_qubits() -> Result<(), DjError> {
        // Control and target straddle a spectator qubit: |100> -> |101>.
        let mut engine = engine_for(&[0, 1, 2]);
        engine.apply_gate(&Gate::PauliX { target: qid(0) })?;
        engine.apply_gate(&Gate::Cnot { control: qid(0), target: qid(2) })?;

        let mut expected = vec![Complex::zero(); 8];
        expected[0b101] = Complex::new(1.0, 0.0);
        assert_complex_vec_approx_equal(engine.state().vector(), &expected, "CNOT q0 -> q2");
        Ok(())
    }

    #[test]
    fn test_measure_basis_state_is_deterministic() -> Result<(), DjError> {
        let mut engine = engine_for(&[0, 1]);
        engine.apply_gate(&Gate::PauliX { target: qid(1) })?;

        let mut rng = StdRng::seed_from_u64(42);
        let bits = engine.measure(&[qid(0), qid(1)], &mut rng)?;
        assert_eq!(bits, vec![0, 1]);
        Ok(())
    }

    #[test]
    fn test_measure_collapses_and_renormalizes() -> Result<(), DjError> {
        let mut engine = engine_for(&[0]);
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        engine.set_state(StateVector::new(vec![h, h]))?;

        let mut rng = StdRng::seed_from_u64(7);
        let bits = engine.measure(&[qid(0)], &mut rng)?;
        assert_eq!(bits.len(), 1);

        // Post-measurement the state is the observed basis state, norm 1.
        let observed = bits[0] as usize;
        let amplitudes = engine.state().vector();
        assert!((engine.state().norm_sqr() - 1.0).abs() < TEST_TOLERANCE);
        assert!((amplitudes[observed].norm_sqr() - 1.0).abs() < TEST_TOLERANCE);
        assert!(amplitudes[1 - observed].norm_sqr() < TEST_TOLERANCE);
        Ok(())
    }

    #[test]
    fn test_apply_gate_rejects_measurement() {
        let mut engine = engine_for(&[0]);
        let result = engine.apply_gate(&Gate::Measure { targets: vec![qid(0)] });
        assert!(matches!(result, Err(DjError::InvalidOperation { .. })));
    }

    #[test]
    fn test_cnot_rejects_coinciding_qubits() {
        let mut engine = engine_for(&[0, 1]);
        let result = engine.apply_gate(&Gate::Cnot { control: qid(0), target: qid(0) });
        assert!(matches!(result, Err(DjError::InvalidOperation { .. })));
    }

    #[test]
    fn test_unknown_qubit_rejected() {
        let mut engine = engine_for(&[0]);
        let result = engine.apply_gate(&Gate::PauliX { target: qid(9) });
        assert!(matches!(result, Err(DjError::InvalidOperation { .. })));

        let mut rng = StdRng::seed_from_u64(0);
        let result = engine.measure(&[qid(9)], &mut rng);
        assert!(matches!(result, Err(DjError::InvalidOperation { .. })));
    }

    #[test]
    fn test_set_state_dimension_mismatch() {
        let mut engine = engine_for(&[0, 1]);
        let result = engine.set_state(StateVector::new(vec![Complex::new(1.0, 0.0)]));
        assert!(matches!(result, Err(DjError::SimulationError { .. })));
    }
}
