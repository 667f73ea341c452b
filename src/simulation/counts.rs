// src/simulation/counts.rs
use crate::core::DjError;
use crate::validation;
use std::collections::HashMap;
use std::fmt;

/// Measurement-outcome frequency counts from repeated circuit execution.
///
/// Maps each observed bit-string (character j is the bit measured into
/// output slot j) to its occurrence count, and remembers the shot total
/// and outcome width the producing engine declared. The invariant that
/// counts sum to the shot total is checked by [`MeasurementCounts::validate`],
/// not assumed.
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementCounts {
    counts: HashMap<String, u64>,
    shots: u64,
    width: usize,
}

impl MeasurementCounts {
    /// Creates an empty counts container for a run of `shots` trials
    /// measuring `width` bits. (Internal visibility)
    pub(crate) fn new(shots: u64, width: usize) -> Self {
        Self {
            counts: HashMap::new(),
            shots,
            width,
        }
    }

    /// Records one observed outcome. (Internal visibility)
    pub(crate) fn record(&mut self, outcome: String) {
        *self.counts.entry(outcome).or_insert(0) += 1;
    }

    /// Wraps counts produced by an external execution engine. Call
    /// [`MeasurementCounts::validate`] afterwards; a sum or width mismatch
    /// means the engine violated its contract.
    pub fn from_counts(counts: HashMap<String, u64>, shots: u64, width: usize) -> Self {
        Self {
            counts,
            shots,
            width,
        }
    }

    /// The raw outcome -> count map.
    pub fn outcomes(&self) -> &HashMap<String, u64> {
        &self.counts
    }

    /// The shot total declared by the producing engine.
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// The declared outcome bit-string length.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Occurrence count for one outcome; 0 if it was never observed.
    pub fn get(&self, outcome: &str) -> u64 {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// The outcome with the highest occurrence count, with its count.
    /// Ties resolve to the lexicographically smallest outcome; in the
    /// noiseless case there is exactly one dominant outcome anyway.
    pub fn dominant_outcome(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .max_by(|(outcome_a, count_a), (outcome_b, count_b)| {
                count_a.cmp(count_b).then_with(|| outcome_b.cmp(outcome_a))
            })
            .map(|(outcome, count)| (outcome.as_str(), *count))
    }

    /// Checks the engine contract: counts sum to the declared shot total
    /// and every outcome string has the declared width.
    pub fn validate(&self) -> Result<(), DjError> {
        validation::check_counts(self)
    }
}

impl fmt::Display for MeasurementCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement counts ({} shots):", self.shots)?;
        if self.counts.is_empty() {
            return writeln!(f, "  (no outcomes recorded)");
        }
        // Sort by outcome for consistent and readable output
        let mut sorted: Vec<(&String, &u64)> = self.counts.iter().collect();
        sorted.sort_by(|a, b| a.0.cmp(b.0));
        let max_count = sorted.iter().map(|(_, c)| **c).max().unwrap_or(1).max(1);
        for (outcome, count) in sorted {
            let bar_len = (*count as u128 * 40 / max_count as u128) as usize;
            let percent = 100.0 * *count as f64 / self.shots.max(1) as f64;
            writeln!(
                f,
                "  {}  {:>8}  {:<40} {:>5.1}%",
                outcome,
                count,
                "█".repeat(bar_len),
                percent
            )?;
        }
        Ok(())
    }
}
