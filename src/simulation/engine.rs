// src/simulation/engine.rs
use crate::core::{DjError, QubitId, StateVector};
use crate::gates::Gate;
use num_complex::Complex;
use num_traits::Zero; // For Complex::zero()
use rand::RngExt;
use rand::rngs::StdRng;
use std::collections::{BTreeMap, HashMap, HashSet};

/// Squared amplitudes at or below this are float-noise residue from gate
/// arithmetic and carry no outcome probability. Filtering them is what
/// makes noiseless runs exactly deterministic.
const AMPLITUDE_TOLERANCE: f64 = 1e-12;

/// The core state-vector engine: holds the joint state of all simulated
/// qubits and evolves it gate by gate. One instance serves a whole run;
/// [`SimulationEngine::reset`] rewinds it to |0...0> between shots.
/// (Internal visibility)
pub(crate) struct SimulationEngine {
    /// Maps qubit IDs to their index (0..n-1) in the sorted order used for
    /// the joint state vector.
    qubit_indices: HashMap<QubitId, usize>,
    /// The joint state vector, dimension 2^n. Qubit index 0 occupies the
    /// most significant bit of a basis-state index.
    state: StateVector,
    /// Number of qubits being simulated (n).
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes the engine for a given set of qubits, starting in
    /// |0...0>. Index assignment sorts the IDs so it is deterministic
    /// regardless of set iteration order.
    pub(crate) fn init(qubit_ids: &HashSet<QubitId>) -> Result<Self, DjError> {
        if qubit_ids.is_empty() {
            return Err(DjError::InvalidOperation {
                message: "cannot initialize the simulation engine with zero qubits".to_string(),
            });
        }

        let num_qubits = qubit_ids.len();
        let dim = 1usize.checked_shl(num_qubits as u32).ok_or_else(|| DjError::SimulationError {
            message: "qubit count too large; state-vector dimension overflows usize".to_string(),
        })?;

        let mut sorted_ids: Vec<QubitId> = qubit_ids.iter().cloned().collect();
        sorted_ids.sort();
        let mut qubit_indices = HashMap::with_capacity(num_qubits);
        for (index, qubit) in sorted_ids.into_iter().enumerate() {
            qubit_indices.insert(qubit, index);
        }

        Ok(Self {
            qubit_indices,
            state: StateVector::zero_basis(dim),
            num_qubits,
        })
    }

    /// Rewinds the state to |0...0> for the next independent shot.
    pub(crate) fn reset(&mut self) {
        self.state = StateVector::zero_basis(self.state.dim());
    }

    /// Read access to the current joint state.
    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    // Set the state directly for testing
    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), DjError> {
        if state.dim() != self.state.dim() {
            Err(DjError::SimulationError {
                message: format!(
                    "cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            })
        } else {
            self.state = state;
            Ok(())
        }
    }

    /// Applies a single unitary gate to the joint state. Measurement is
    /// not a unitary and must go through [`SimulationEngine::measure`].
    pub(crate) fn apply_gate(&mut self, gate: &Gate) -> Result<(), DjError> {
        match gate {
            Gate::PauliX { target } => {
                let target_idx = self.get_qubit_index(target)?;
                self.apply_single_qubit_gate(target_idx, &pauli_x_matrix());
            }
            Gate::Hadamard { target } => {
                let target_idx = self.get_qubit_index(target)?;
                self.apply_single_qubit_gate(target_idx, &hadamard_matrix());
            }
            Gate::Cnot { control, target } => {
                let control_idx = self.get_qubit_index(control)?;
                let target_idx = self.get_qubit_index(target)?;
                if control_idx == target_idx {
                    return Err(DjError::InvalidOperation {
                        message: "control and target qubits cannot coincide for a controlled gate"
                            .to_string(),
                    });
                }

                // Build the 4x4 controlled-X from the 2x2 bit-flip.
                // Basis order: |control, target> -> |00>, |01>, |10>, |11>
                let u = pauli_x_matrix();
                let one = Complex::new(1.0, 0.0);
                let controlled_u: [[Complex<f64>; 4]; 4] = [
                    // Control |0> subspace: identity on the target
                    [one, Complex::zero(), Complex::zero(), Complex::zero()],
                    [Complex::zero(), one, Complex::zero(), Complex::zero()],
                    // Control |1> subspace: apply U to the target
                    [Complex::zero(), Complex::zero(), u[0][0], u[0][1]],
                    [Complex::zero(), Complex::zero(), u[1][0], u[1][1]],
                ];
                self.apply_two_qubit_gate(control_idx, target_idx, &controlled_u);
            }
            Gate::Measure { .. } => {
                return Err(DjError::InvalidOperation {
                    message: "measurement must not be passed to the unitary-application path"
                        .to_string(),
                });
            }
        }
        Ok(())
    }

    /// Measures the given qubits in the computational basis: samples one
    /// joint outcome from the current amplitude distribution, collapses
    /// the state onto it, renormalizes, and returns the observed bits in
    /// target order. Gates applied afterwards act on the collapsed state,
    /// which is what makes mid-circuit measurement well-defined.
    pub(crate) fn measure(&mut self, targets: &[QubitId], rng: &mut StdRng) -> Result<Vec<u8>, DjError> {
        if targets.is_empty() {
            return Ok(Vec::new());
        }

        // Resolve targets to bit positions once, surfacing unknown qubits early.
        let mut bit_positions = Vec::with_capacity(targets.len());
        for qubit in targets {
            let index = self.get_qubit_index(qubit)?;
            bit_positions.push(self.num_qubits - 1 - index);
        }

        // Joint outcome distribution over the measured subset. A BTreeMap
        // keeps iteration order deterministic so seeded runs reproduce.
        let mut outcome_weights: BTreeMap<usize, f64> = BTreeMap::new();
        for (k, amplitude) in self.state.vector().iter().enumerate() {
            let weight = amplitude.norm_sqr();
            if weight > AMPLITUDE_TOLERANCE {
                *outcome_weights
                    .entry(Self::outcome_key(k, &bit_positions))
                    .or_insert(0.0) += weight;
            }
        }

        let total: f64 = outcome_weights.values().sum();
        if outcome_weights.is_empty() || total <= AMPLITUDE_TOLERANCE {
            return Err(DjError::SimulationError {
                message: "no outcome with non-negligible amplitude to measure".to_string(),
            });
        }

        // Sample one outcome proportionally to its weight. The running
        // cumulative keeps the last key as a fallback against float edge
        // cases where `sample` lands exactly on `total`.
        let sample = rng.random::<f64>() * total;
        let mut cumulative = 0.0;
        let mut chosen = None;
        for (&key, &weight) in &outcome_weights {
            cumulative += weight;
            chosen = Some((key, weight));
            if sample < cumulative {
                break;
            }
        }
        let (chosen_key, chosen_weight) = chosen.ok_or_else(|| DjError::SimulationError {
            message: "outcome sampling failed to select a result".to_string(),
        })?;

        // Collapse onto the chosen outcome and renormalize.
        let scale = chosen_weight.sqrt();
        let new_vec: Vec<Complex<f64>> = self
            .state
            .vector()
            .iter()
            .enumerate()
            .map(|(k, amplitude)| {
                if Self::outcome_key(k, &bit_positions) == chosen_key {
                    amplitude / scale
                } else {
                    Complex::zero()
                }
            })
            .collect();
        self.state = StateVector::new(new_vec);

        Ok((0..targets.len())
            .map(|slot| ((chosen_key >> slot) & 1) as u8)
            .collect())
    }

    /// Packs the measured bits of basis-state index `k` into a compact
    /// outcome key, slot j coming from `bit_positions[j]`.
    fn outcome_key(k: usize, bit_positions: &[usize]) -> usize {
        bit_positions
            .iter()
            .enumerate()
            .fold(0, |key, (slot, &bit_pos)| key | (((k >> bit_pos) & 1) << slot))
    }

    /// Helper to get a qubit's index, returning a specific error if not found.
    fn get_qubit_index(&self, qubit: &QubitId) -> Result<usize, DjError> {
        self.qubit_indices.get(qubit).copied().ok_or_else(|| DjError::InvalidOperation {
            message: format!("qubit {} is not part of this simulation", qubit),
        })
    }

    // --- State manipulation helpers ---
    // Both helpers assume the standard tensor-product layout of the joint
    // state vector, with qubit index 0 at the most significant bit.

    /// Applies a 2x2 matrix to a single qubit within the joint state.
    fn apply_single_qubit_gate(&mut self, target_idx: usize, matrix: &[[Complex<f64>; 2]; 2]) {
        let k = self.num_qubits - 1 - target_idx; // bit position (from the right)
        let k_mask = 1usize << k;
        let lower_mask = k_mask - 1;

        let dim = self.state.dim();
        let mut new_vec = vec![Complex::zero(); dim];

        // Iterate over pairs of basis states differing only at the target
        // qubit's bit: insert a 0 bit at position k into the pair index.
        for i in 0..dim / 2 {
            let i0 = ((i & !lower_mask) << 1) | (i & lower_mask);
            let i1 = i0 | k_mask;

            let psi_0 = self.state.vector()[i0];
            let psi_1 = self.state.vector()[i1];

            new_vec[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            new_vec[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }

        self.state = StateVector::new(new_vec);
    }

    /// Applies a 4x4 matrix to two qubits within the joint state. Matrix
    /// rows/columns follow the |b1, b2> basis where b1 is the qubit at
    /// `idx1` and b2 the qubit at `idx2`.
    fn apply_two_qubit_gate(
        &mut self,
        idx1: usize,
        idx2: usize,
        matrix: &[[Complex<f64>; 4]; 4],
    ) {
        let n = self.num_qubits;
        let dim = self.state.dim();
        let mut new_vec = vec![Complex::zero(); dim];

        // Bit positions of the two qubits.
        let b1 = n - 1 - idx1;
        let b2 = n - 1 - idx2;
        let (hi, lo) = (b1.max(b2), b1.min(b2)); // hi > lo

        // Iterate over all settings of the other n-2 qubits: re-insert 0
        // bits at positions lo and hi into the compact index.
        for i_other in 0..dim / 4 {
            let low_part = i_other & ((1usize << lo) - 1);
            let mid_part = ((i_other >> lo) & ((1usize << (hi - 1 - lo)) - 1)) << (lo + 1);
            let high_part = (i_other >> (hi - 1)) << (hi + 1);
            let base = high_part | mid_part | low_part;

            let indices = [
                base,                              // |b1=0, b2=0>
                base | (1 << b2),                  // |b1=0, b2=1>
                base | (1 << b1),                  // |b1=1, b2=0>
                base | (1 << b1) | (1 << b2),      // |b1=1, b2=1>
            ];

            let mut psi = [Complex::zero(); 4];
            for (j, &index) in indices.iter().enumerate() {
                psi[j] = self.state.vector()[index];
            }

            let mut psi_prime = [Complex::zero(); 4];
            for (row, out) in psi_prime.iter_mut().enumerate() {
                for (col, amplitude) in psi.iter().enumerate() {
                    *out += matrix[row][col] * *amplitude;
                }
            }

            for (j, &index) in indices.iter().enumerate() {
                new_vec[index] = psi_prime[j];
            }
        }

        self.state = StateVector::new(new_vec);
    }
}

/// The 2x2 bit-flip (Pauli-X) matrix.
fn pauli_x_matrix() -> [[Complex<f64>; 2]; 2] {
    [
        [Complex::zero(), Complex::new(1.0, 0.0)],
        [Complex::new(1.0, 0.0), Complex::zero()],
    ]
}

/// The 2x2 Hadamard matrix.
fn hadamard_matrix() -> [[Complex<f64>; 2]; 2] {
    const H: f64 = std::f64::consts::FRAC_1_SQRT_2;
    [
        [Complex::new(H, 0.0), Complex::new(H, 0.0)],
        [Complex::new(H, 0.0), Complex::new(-H, 0.0)],
    ]
}
