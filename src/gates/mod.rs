// src/gates/mod.rs

//! Defines the gate set circuits are built from.
//!
//! The set is deliberately closed: a bit-flip, the Hadamard transform, a
//! controlled bit-flip, and measurement of a qubit subset are exactly the
//! operations the Deutsch-Jozsa construction needs, and exactly what the
//! execution engine contract promises to support.

use crate::core::QubitId;

/// A single gate operation within a circuit.
///
/// Gate order in a [`Circuit`](crate::circuits::Circuit) defines unitary
/// composition order, left to right in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Bit-flip (NOT): swaps |0> and |1> on the target qubit. Used to
    /// prepare the ancilla in |1> and to realize the constant-1 oracle.
    PauliX {
        /// The qubit being flipped.
        target: QubitId,
    },

    /// Hadamard transform: maps |0> to (|0>+|1>)/sqrt(2) and |1> to
    /// (|0>-|1>)/sqrt(2). A layer of these places the input register into
    /// uniform superposition and the ancilla into the |-> phase-kickback
    /// state.
    Hadamard {
        /// The qubit being transformed.
        target: QubitId,
    },

    /// Controlled bit-flip: flips `target` when `control` is |1>. The
    /// balanced parity oracles are built entirely from these.
    Cnot {
        /// The qubit whose state conditions the flip.
        control: QubitId,
        /// The qubit that is conditionally flipped.
        target: QubitId,
    },

    /// Measurement of a qubit subset in the computational basis. Each
    /// target collapses to a classical bit; bit j of the recorded outcome
    /// string comes from `targets[j]`. Measurement may occur mid-circuit;
    /// subsequent gates act on the collapsed state.
    Measure {
        /// The qubits to measure, in output-slot order.
        targets: Vec<QubitId>,
    },
}

impl Gate {
    /// Returns all qubit IDs mentioned in the gate's parameters, letting a
    /// circuit track the set of qubits it acts on.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Gate::PauliX { target } => vec![*target],
            Gate::Hadamard { target } => vec![*target],
            Gate::Cnot { control, target } => vec![*control, *target],
            Gate::Measure { targets } => targets.clone(),
        }
    }

    /// `true` for the measurement gate, `false` for the unitary gates.
    pub fn is_measurement(&self) -> bool {
        matches!(self, Gate::Measure { .. })
    }
}
