// src/lib.rs

//! `deutsch-jozsa` - One-query classification of constant vs. balanced oracles
//!
//! Given oracle access to a hidden function f mapping m-bit strings to a
//! single bit, the Deutsch-Jozsa algorithm decides with a single oracle
//! query whether f is constant or balanced. This crate builds the oracle
//! and algorithm circuits, executes them on a bundled state-vector engine,
//! and interprets the measurement counts.

pub mod core;
pub mod gates;
pub mod circuits;
pub mod oracle;
pub mod algorithm;
pub mod simulation;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use core::{DjError, QubitId, QubitRegister, StateVector};
pub use gates::Gate;
pub use circuits::{Circuit, CircuitBuilder};
pub use oracle::Oracle;
pub use algorithm::{build_circuit, classify, Classification, DeutschJozsa, DeutschJozsaResult};
pub use simulation::{MeasurementCounts, Simulator};

// Example 1: A constant oracle
// The final Hadamard layer maps the untouched uniform superposition back
// to |0...0>, so every shot measures the all-zero string.
/// ```
/// use deutsch_jozsa::{Classification, DeutschJozsa, Oracle, Simulator};
///
/// let algorithm = DeutschJozsa::new(3, Oracle::ConstantOne).unwrap();
/// let simulator = Simulator::with_seed(7);
///
/// match algorithm.run(&simulator, 2048) {
///     Ok(outcome) => {
///         println!("{}", outcome);
///         assert_eq!(outcome.classification, Classification::Constant);
///         assert_eq!(outcome.counts.dominant_outcome(), Some(("000", 2048)));
///     }
///     Err(e) => panic!("Example 1 failed: {}", e),
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: The parity-balanced oracle
// Phase kickback imprints a sign flip for every odd-parity input; the
// interference pattern concentrates all mass on the all-ones string.
/// ```
/// use deutsch_jozsa::{Classification, DeutschJozsa, Oracle, Simulator};
///
/// let algorithm = DeutschJozsa::new(3, Oracle::Parity).unwrap();
/// let simulator = Simulator::with_seed(7);
///
/// match algorithm.run(&simulator, 2048) {
///     Ok(outcome) => {
///         println!("{}", outcome);
///         assert_eq!(outcome.classification, Classification::Balanced);
///         assert_eq!(outcome.counts.dominant_outcome(), Some(("111", 2048)));
///     }
///     Err(e) => panic!("Example 2 failed: {}", e),
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
