// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! gates (`crate::gates::Gate`).
//!
//! This module provides the `Circuit` structure: a precise, ordered pathway
//! of gate applications and measurements over a set of qubits. Circuits are
//! append-only during construction and immutable once built.

use crate::core::QubitId;
use crate::gates::Gate;
use std::collections::{HashMap, HashSet}; // HashSet tracks the unique qubits involved
use std::fmt;

/// An ordered sequence of gates applied to a set of qubits.
///
/// Gate order directly defines unitary composition order; the oracle
/// sub-circuit is embedded by appending its gates in place, so the
/// H / oracle / H structure of the algorithm is preserved by construction.
#[derive(Clone, PartialEq, Eq)] // structural equality backs the build-twice idempotence property
pub struct Circuit {
    /// The unique set of qubits involved across all gates in this circuit.
    qubits: HashSet<QubitId>,

    /// The ordered gate sequence defining the circuit's logic.
    gates: Vec<Gate>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self {
            qubits: HashSet::new(),
            gates: Vec::new(),
        }
    }

    /// Appends a single gate to the circuit's sequence, registering any
    /// qubits it involves.
    pub fn add_gate(&mut self, gate: Gate) {
        for qubit in gate.involved_qubits() {
            self.qubits.insert(qubit);
        }
        self.gates.push(gate);
    }

    /// Appends multiple gates from an iterator.
    pub fn add_gates<I>(&mut self, gates: I)
    where
        I: IntoIterator<Item = Gate>,
    {
        for gate in gates {
            self.add_gate(gate);
        }
    }

    /// Appends another circuit's gate sequence to this one as a composite
    /// unit. This is how an oracle sub-circuit is inserted into the full
    /// algorithm circuit.
    pub fn append(&mut self, other: &Circuit) {
        self.add_gates(other.gates.iter().cloned());
    }

    /// Returns a reference to the set of unique qubits involved.
    pub fn qubits(&self) -> &HashSet<QubitId> {
        &self.qubits
    }

    /// Returns the number of distinct qubits the circuit acts on.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Returns the ordered gate sequence.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Returns the total number of gates in the circuit.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns `true` if the circuit contains no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Returns `true` if any gate in the sequence is a measurement.
    pub fn has_measurement(&self) -> bool {
        self.gates.iter().any(Gate::is_measurement)
    }

    /// All measured qubits in output-slot order, concatenated across
    /// measurement gates.
    pub fn measured_qubits(&self) -> Vec<QubitId> {
        self.gates
            .iter()
            .filter_map(|gate| match gate {
                Gate::Measure { targets } => Some(targets.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect()
    }
}

// Implement Default for convenient creation of empty circuits.
impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances
/// using method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self {
            circuit: Circuit::new(),
        }
    }

    /// Adds a single gate to the circuit being built.
    ///
    /// Returns `self` to allow for continued method chaining.
    pub fn add_gate(mut self, gate: Gate) -> Self {
        self.circuit.add_gate(gate);
        self
    }

    /// Adds multiple gates from an iterator to the circuit being built.
    pub fn add_gates<I>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = Gate>,
    {
        self.circuit.add_gates(gates);
        self
    }

    /// Appends an already-built circuit (e.g. an oracle) as a composite
    /// unit.
    pub fn append(mut self, other: &Circuit) -> Self {
        self.circuit.append(other);
        self
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

// Implement Default for convenient creation of builders.
impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.gates.is_empty() {
            return writeln!(f, "Circuit[0 gates on 0 qubits]");
        }

        // --- Setup ---
        let gates = &self.gates;
        let num_gates = gates.len();

        // Sorted qubit list gives a stable row order
        let mut sorted_qubits: Vec<QubitId> = self.qubits.iter().cloned().collect();
        sorted_qubits.sort();
        let num_qubits = sorted_qubits.len();
        let qubit_to_row: HashMap<QubitId, usize> = sorted_qubits
            .iter()
            .enumerate()
            .map(|(i, q)| (*q, i))
            .collect();

        let max_label_width = sorted_qubits
            .iter()
            .map(|q| format!("{}", q).len())
            .max()
            .unwrap_or(0);
        let label_padding = " ".repeat(max_label_width + 2); // label + ": "

        const GATE_WIDTH: usize = 7; // e.g. "───H───"
        const WIRE: &str = "───────"; // GATE_WIDTH dashes
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // grid[row][time] holds the gate/wire segment; v_connect[row][time]
        // holds the vertical connector drawn below that row
        let mut grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_gates]; num_qubits];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_gates]; num_qubits];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre = total_dashes / 2;
                let post = total_dashes - pre;
                format!(
                    "{}{}{}",
                    H_WIRE.to_string().repeat(pre),
                    symbol,
                    H_WIRE.to_string().repeat(post)
                )
            }
        }

        // --- Populate grids ---
        for (t, gate) in gates.iter().enumerate() {
            match gate {
                Gate::PauliX { target } => {
                    if let Some(r) = qubit_to_row.get(target) {
                        grid[*r][t] = format_gate("X");
                    }
                }
                Gate::Hadamard { target } => {
                    if let Some(r) = qubit_to_row.get(target) {
                        grid[*r][t] = format_gate("H");
                    }
                }
                Gate::Cnot { control, target } => {
                    if let (Some(r_ctrl), Some(r_tgt)) =
                        (qubit_to_row.get(control), qubit_to_row.get(target))
                    {
                        grid[*r_ctrl][t] = format_gate("@");
                        grid[*r_tgt][t] = format_gate("X");

                        let r_min = (*r_ctrl).min(*r_tgt);
                        let r_max = (*r_ctrl).max(*r_tgt);
                        for row_vec in v_connect.iter_mut().take(r_max).skip(r_min) {
                            row_vec[t] = V_WIRE;
                        }
                    }
                }
                Gate::Measure { targets } => {
                    for target in targets {
                        if let Some(r) = qubit_to_row.get(target) {
                            grid[*r][t] = format_gate("M");
                        }
                    }
                }
            }
        }

        // --- Format output ---
        writeln!(f, "Circuit[{} gates on {} qubits]", num_gates, num_qubits)?;
        for r in 0..num_qubits {
            let label = format!("{}: ", sorted_qubits[r]);
            write!(f, "{:<width$}", label, width = max_label_width + 2)?;
            writeln!(f, "{}", grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_gates {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre = padding_needed / 2;
                    let post = padding_needed - pre;
                    write!(f, "{}{}{}", " ".repeat(pre), connector, " ".repeat(post))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
