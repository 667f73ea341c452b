//! Error handling logic

use std::fmt;

/// Unique identifier for a qubit within a circuit.
/// Identifiers are assigned by the caller; the simulation engine orders
/// them numerically when laying out the joint state vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QubitId(pub u64);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// Error types surfaced by circuit construction, simulation, and
/// result interpretation.
#[derive(Debug, Clone, PartialEq, Eq)] // Eq useful for testing error variants
pub enum DjError {
    /// A caller-supplied parameter is outside the algorithm's domain:
    /// an empty input register (m = 0), a zero shot count, or a malformed
    /// balanced-oracle subset. Raised synchronously at construction time.
    InvalidConfiguration {
        /// InvalidConfiguration failure message
        message: String
    },

    /// A structurally invalid use of a circuit or gate, e.g. a controlled
    /// gate whose control and target coincide, a gate addressing a qubit
    /// unknown to the engine, or a circuit submitted for execution with no
    /// measurement in it.
    InvalidOperation {
        /// InvalidOperation failure message
        message: String
    },

    /// The execution engine violated its contract: measurement counts do
    /// not sum to the requested shot total, or an outcome bit-string has
    /// an unexpected length. Fatal, never silently tolerated.
    InconsistentCounts {
        /// InconsistentCounts failure message
        message: String
    },

    /// General failure inside the simulation engine itself (dimension
    /// overflow, state-vector index escape, norm drift).
    SimulationError {
        /// SimulationError failure message
        message: String
    },
}

impl fmt::Display for DjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DjError::InvalidConfiguration { message } => write!(f, "Invalid Configuration: {}", message),
            DjError::InvalidOperation { message } => write!(f, "Invalid Operation: {}", message),
            DjError::InconsistentCounts { message } => write!(f, "Inconsistent Counts: {}", message),
            DjError::SimulationError { message } => write!(f, "Simulation Process Error: {}", message),
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for DjError {}
