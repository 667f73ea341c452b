// src/algorithm/mod.rs

//! Composition and interpretation of the Deutsch-Jozsa algorithm.
//!
//! [`build_circuit`] assembles the full executable circuit around an
//! oracle; [`classify`] turns one run's measurement counts into a
//! constant/balanced verdict. [`DeutschJozsa`] ties the pipeline together
//! for callers that just want an answer.

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{DjError, QubitRegister};
use crate::gates::Gate;
use crate::oracle::Oracle;
use crate::simulation::{MeasurementCounts, Simulator};
use std::fmt;

/// The algorithm's verdict on the hidden function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Every input maps to the same output value.
    Constant,
    /// Exactly half of all inputs map to each output value.
    Balanced,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Constant => write!(f, "constant"),
            Classification::Balanced => write!(f, "balanced"),
        }
    }
}

/// Builds the complete Deutsch-Jozsa circuit for the given register and
/// oracle:
///
/// 1. bit-flip on the ancilla, preparing |1>,
/// 2. Hadamard on all m + 1 qubits,
/// 3. the oracle circuit, appended as a single composite unit,
/// 4. Hadamard on the m input qubits only,
/// 5. measurement of the input qubits in index order (qubit i -> slot i).
///
/// The ancilla is never measured, and the H / oracle / H ordering is what
/// converts the single oracle query into interference over the input
/// register (phase kickback); reordering it breaks the algorithm.
///
/// # Errors
/// Propagates [`DjError::InvalidConfiguration`] from oracle validation.
pub fn build_circuit(register: &QubitRegister, oracle: &Oracle) -> Result<Circuit, DjError> {
    let oracle_circuit = oracle.circuit(register)?;

    let mut builder = CircuitBuilder::new().add_gate(Gate::PauliX {
        target: register.ancilla(),
    });
    for target in register.all_qubits() {
        builder = builder.add_gate(Gate::Hadamard { target });
    }
    builder = builder.append(&oracle_circuit);
    for target in register.input_qubits() {
        builder = builder.add_gate(Gate::Hadamard { target });
    }
    builder = builder.add_gate(Gate::Measure {
        targets: register.input_qubits(),
    });

    Ok(builder.build())
}

/// Classifies the hidden function from one run's measurement counts.
///
/// The counts are validated first — totals must sum to the declared shot
/// count and every outcome string must have the declared width; a
/// violation means the execution engine broke its contract and is
/// surfaced as [`DjError::InconsistentCounts`]. The dominant outcome then
/// decides: the all-zero string means constant, anything else balanced.
/// Under noiseless execution the dominant outcome carries all the count
/// mass, so ties cannot occur.
pub fn classify(counts: &MeasurementCounts) -> Result<Classification, DjError> {
    counts.validate()?;
    let (outcome, _) = counts.dominant_outcome().ok_or_else(|| DjError::InconsistentCounts {
        message: "cannot classify from an empty counts map".to_string(),
    })?;
    if outcome.bytes().all(|b| b == b'0') {
        Ok(Classification::Constant)
    } else {
        Ok(Classification::Balanced)
    }
}

/// A configured Deutsch-Jozsa instance: the register layout plus the
/// oracle under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeutschJozsa {
    register: QubitRegister,
    oracle: Oracle,
}

impl DeutschJozsa {
    /// Creates an instance for an oracle over `input_bits`-bit strings.
    ///
    /// # Errors
    /// Returns [`DjError::InvalidConfiguration`] for `input_bits` = 0 or a
    /// malformed oracle subset.
    pub fn new(input_bits: usize, oracle: Oracle) -> Result<Self, DjError> {
        let register = QubitRegister::new(input_bits)?;
        // Surface oracle validation errors at configuration time, not at
        // first use.
        oracle.circuit(&register)?;
        Ok(Self { register, oracle })
    }

    /// The register layout (m input qubits plus the ancilla).
    pub fn register(&self) -> &QubitRegister {
        &self.register
    }

    /// The oracle under test.
    pub fn oracle(&self) -> &Oracle {
        &self.oracle
    }

    /// Builds the full algorithm circuit. Construction is pure, so calling
    /// this twice yields structurally identical circuits.
    pub fn circuit(&self) -> Result<Circuit, DjError> {
        build_circuit(&self.register, &self.oracle)
    }

    /// Runs the pipeline end to end: compose the circuit, execute it on
    /// `simulator` for `shots` trials, classify the resulting counts.
    pub fn run(&self, simulator: &Simulator, shots: u64) -> Result<DeutschJozsaResult, DjError> {
        let circuit = self.circuit()?;
        let counts = simulator.run(&circuit, shots)?;
        let classification = classify(&counts)?;
        Ok(DeutschJozsaResult {
            classification,
            counts,
        })
    }
}

/// The outcome of one full algorithm run.
#[derive(Debug, Clone, PartialEq)]
pub struct DeutschJozsaResult {
    /// The constant/balanced verdict.
    pub classification: Classification,
    /// The raw measurement counts the verdict was derived from.
    pub counts: MeasurementCounts,
}

impl fmt::Display for DeutschJozsaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.counts.dominant_outcome() {
            Some((outcome, _)) => writeln!(
                f,
                "Verdict: {} (dominant outcome \"{}\")",
                self.classification, outcome
            )?,
            None => writeln!(f, "Verdict: {}", self.classification)?,
        }
        write!(f, "{}", self.counts)
    }
}
