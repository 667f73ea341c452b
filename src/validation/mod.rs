// src/validation/mod.rs

//! Provides functions to validate simulation state and engine output.

use crate::core::{DjError, StateVector};
use crate::simulation::MeasurementCounts;

// Default tolerance value (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks that the state vector is normalized (sum of squared amplitudes
/// deviates from 1.0 by no more than the tolerance). Unitary gate
/// application preserves the norm, so a failure here means the engine's
/// arithmetic went wrong.
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0 (e.g. 1e-9). A default is used when `None`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(DjError::SimulationError)` if normalization fails.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), DjError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sqr = state.norm_sqr();
    if (norm_sqr - 1.0).abs() > effective_tolerance {
        Err(DjError::SimulationError {
            message: format!(
                "state vector normalization failed: Sum(|c_i|^2) = {} (deviation > {})",
                norm_sqr, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks the execution-engine contract on a counts map: occurrence counts
/// must sum to the declared shot total, and every outcome must be a
/// bit-string of the declared width. A violation is fatal — it means the
/// engine broke its contract, not that the run was noisy.
///
/// # Returns
/// * `Ok(())` if the counts are consistent.
/// * `Err(DjError::InconsistentCounts)` describing the first violation found.
pub fn check_counts(counts: &MeasurementCounts) -> Result<(), DjError> {
    let total: u64 = counts.outcomes().values().sum();
    if total != counts.shots() {
        return Err(DjError::InconsistentCounts {
            message: format!(
                "recorded outcomes sum to {} but {} shots were requested",
                total,
                counts.shots()
            ),
        });
    }
    for outcome in counts.outcomes().keys() {
        if outcome.len() != counts.width() {
            return Err(DjError::InconsistentCounts {
                message: format!(
                    "outcome \"{}\" has length {}, expected {}",
                    outcome,
                    outcome.len(),
                    counts.width()
                ),
            });
        }
        if let Some(bad) = outcome.bytes().find(|b| *b != b'0' && *b != b'1') {
            return Err(DjError::InconsistentCounts {
                message: format!(
                    "outcome \"{}\" contains a non-bit character '{}'",
                    outcome, bad as char
                ),
            });
        }
    }
    Ok(())
}
