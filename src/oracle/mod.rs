// src/oracle/mod.rs

//! Oracle construction for the Deutsch-Jozsa algorithm.
//!
//! An oracle is a reversible circuit embodying a hidden function
//! f: {0,1}^m -> {0,1}, realized as the map |x>|y> -> |x>|f(x) XOR y>.
//! The variants form a closed tagged set rather than an open callback
//! mechanism: the algorithm's one-query guarantee relies on every oracle
//! being reversible and bit-count-preserving, and on balanced variants
//! mapping exactly half of all 2^m inputs to each output value.

use crate::circuits::{Circuit, CircuitBuilder};
use crate::core::{DjError, QubitRegister};
use crate::gates::Gate;
use std::fmt;

/// The hidden function presented to the algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Oracle {
    /// f(x) = 0 for every x. The identity circuit; no gates at all.
    ConstantZero,

    /// f(x) = 1 for every x. A single bit-flip on the ancilla.
    ConstantOne,

    /// f(x) = x0 XOR x1 XOR ... XOR x(m-1), the parity of all input bits.
    /// The canonical balanced representative: one CNOT from each input
    /// qubit onto the ancilla.
    Parity,

    /// f(x) = XOR of the input bits named by `controls`, a non-empty
    /// subset of `0..m`. Balanced for every non-empty subset; `Parity` is
    /// the special case of the full subset.
    SubsetParity {
        /// Input-qubit indices contributing to the parity. Must be
        /// non-empty, in range, and free of duplicates (a repeated index
        /// would cancel its own CNOT pair and silently break balance).
        controls: Vec<usize>,
    },
}

impl Oracle {
    /// Builds the reversible oracle circuit over the register's m + 1
    /// qubits. Pure construction: the output contains no measurement and
    /// building has no side effects.
    ///
    /// # Errors
    /// Returns [`DjError::InvalidConfiguration`] for a malformed
    /// [`Oracle::SubsetParity`] subset.
    pub fn circuit(&self, register: &QubitRegister) -> Result<Circuit, DjError> {
        let ancilla = register.ancilla();
        match self {
            Oracle::ConstantZero => Ok(Circuit::new()),
            Oracle::ConstantOne => {
                Ok(CircuitBuilder::new()
                    .add_gate(Gate::PauliX { target: ancilla })
                    .build())
            }
            Oracle::Parity => {
                let mut builder = CircuitBuilder::new();
                for control in register.input_qubits() {
                    builder = builder.add_gate(Gate::Cnot {
                        control,
                        target: ancilla,
                    });
                }
                Ok(builder.build())
            }
            Oracle::SubsetParity { controls } => {
                Self::check_subset(controls, register.input_count())?;
                let input_qubits = register.input_qubits();
                let mut builder = CircuitBuilder::new();
                for &index in controls {
                    builder = builder.add_gate(Gate::Cnot {
                        control: input_qubits[index],
                        target: ancilla,
                    });
                }
                Ok(builder.build())
            }
        }
    }

    /// `true` when exactly half of all 2^m inputs map to each output
    /// value, `false` for the constant variants.
    pub fn is_balanced(&self) -> bool {
        matches!(self, Oracle::Parity | Oracle::SubsetParity { .. })
    }

    /// Classical reference evaluation of f on an m-bit input, with bit i
    /// of `input` holding x_i. Lets tests confirm the 50/50 balance
    /// promise without touching the quantum circuit.
    ///
    /// # Errors
    /// Returns [`DjError::InvalidConfiguration`] if `input` has bits set
    /// beyond the register width or the oracle subset is malformed.
    pub fn evaluate(&self, register: &QubitRegister, input: u64) -> Result<u8, DjError> {
        let m = register.input_count();
        if m < 64 && input >> m != 0 {
            return Err(DjError::InvalidConfiguration {
                message: format!("input {:#b} exceeds the {}-bit register width", input, m),
            });
        }
        match self {
            Oracle::ConstantZero => Ok(0),
            Oracle::ConstantOne => Ok(1),
            Oracle::Parity => Ok((input.count_ones() % 2) as u8),
            Oracle::SubsetParity { controls } => {
                Self::check_subset(controls, m)?;
                let masked = controls
                    .iter()
                    .fold(0u32, |acc, &i| acc ^ ((input >> i) & 1) as u32);
                Ok(masked as u8)
            }
        }
    }

    /// A subset must be non-empty (empty degenerates to constant-0), in
    /// range, and duplicate-free.
    fn check_subset(controls: &[usize], input_count: usize) -> Result<(), DjError> {
        if controls.is_empty() {
            return Err(DjError::InvalidConfiguration {
                message: "subset-parity oracle requires a non-empty control subset".to_string(),
            });
        }
        let mut seen = vec![false; input_count];
        for &index in controls {
            if index >= input_count {
                return Err(DjError::InvalidConfiguration {
                    message: format!(
                        "subset-parity control index {} is out of range for an {}-bit input register",
                        index, input_count
                    ),
                });
            }
            if seen[index] {
                return Err(DjError::InvalidConfiguration {
                    message: format!("subset-parity control index {} appears more than once", index),
                });
            }
            seen[index] = true;
        }
        Ok(())
    }
}

impl fmt::Display for Oracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Oracle::ConstantZero => write!(f, "constant-0"),
            Oracle::ConstantOne => write!(f, "constant-1"),
            Oracle::Parity => write!(f, "balanced(parity)"),
            Oracle::SubsetParity { controls } => {
                write!(f, "balanced(subset-parity {:?})", controls)
            }
        }
    }
}
