use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::core::record::{DistanceBinner, Side, DEFAULT_BIN_WIDTH};
use crate::core::types::Resid;
use crate::matching::report::{best_matches, PointMatch, TieBreak};
use crate::matching::scoring::{corroborates, trim, DEFAULT_ACCURACY};
use crate::matching::signature::SignatureSet;

/// Default cap on elimination rounds
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("no convergence after {iterations} iterations")]
    NonConvergence { iterations: usize },
}

/// Configuration for the matching engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Width of a distance bin
    pub bin_width: f64,
    /// Percentage similarity at which two distance bitsets corroborate each other
    pub accuracy_threshold: f64,
    /// Swap positive and negative charges on the pattern side
    pub invert_pattern_properties: bool,
    /// Rounds allowed before the run is abandoned
    pub max_iterations: usize,
    /// Choice between equally scored structure candidates
    pub tie_break: TieBreak,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            bin_width: DEFAULT_BIN_WIDTH,
            accuracy_threshold: DEFAULT_ACCURACY,
            invert_pattern_properties: false,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tie_break: TieBreak::default(),
        }
    }
}

impl MatchConfig {
    /// Replace out-of-range values with their defaults
    #[must_use]
    pub fn normalized(&self) -> Self {
        let mut config = self.clone();

        if !(config.bin_width > 0.0 && config.bin_width.is_finite()) {
            warn!(
                "Bin width {} is not positive, using {DEFAULT_BIN_WIDTH}",
                config.bin_width
            );
            config.bin_width = DEFAULT_BIN_WIDTH;
        }

        if !(config.accuracy_threshold > 0.0 && config.accuracy_threshold <= 100.0) {
            warn!(
                "Accuracy {} is outside (0, 100], using {DEFAULT_ACCURACY}",
                config.accuracy_threshold
            );
            config.accuracy_threshold = DEFAULT_ACCURACY;
        }

        if config.max_iterations == 0 {
            warn!("Iteration cap of 0 is not usable, using {DEFAULT_MAX_ITERATIONS}");
            config.max_iterations = DEFAULT_MAX_ITERATIONS;
        }

        config
    }

    /// Binner for turning raw distances into bins under this configuration
    #[must_use]
    pub fn binner(&self) -> DistanceBinner {
        DistanceBinner::new(self.bin_width)
    }
}

/// Result of a converged matching run
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    /// One entry per matched pattern point, in pattern order
    pub matches: Vec<PointMatch>,
    /// Number of signature rebuilds performed, including the converged one
    pub iterations: usize,
    /// Pattern points left at convergence
    pub pattern_points: usize,
    /// Structure points left at convergence
    pub structure_points: usize,
    /// Structure points eliminated, in kill order
    pub killed: Vec<Resid>,
    /// Structure points still live at the end, in order of first appearance
    pub surviving: Vec<Resid>,
}

/// Lesk-style constraint propagation between a pattern and a structure.
///
/// Each round rebuilds signatures from the live records, trims bins that one
/// side never observes, and kills every structure point that no pattern point
/// corroborates. The run stops once the point counts of both sides repeat.
/// Only the structure side is ever eliminated.
pub struct MatchEngine {
    pattern: Side,
    structure: Side,
    config: MatchConfig,
}

impl MatchEngine {
    /// Create an engine with default configuration
    pub fn new(pattern: Side, structure: Side) -> Self {
        Self::with_config(pattern, structure, MatchConfig::default())
    }

    /// Create an engine with custom configuration
    pub fn with_config(pattern: Side, structure: Side, config: MatchConfig) -> Self {
        Self {
            pattern,
            structure,
            config: config.normalized(),
        }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn pattern(&self) -> &Side {
        &self.pattern
    }

    pub fn structure(&self) -> &Side {
        &self.structure
    }

    /// Signatures of both sides for the current live records, already trimmed
    pub fn signatures(&self) -> (SignatureSet, SignatureSet) {
        let mut pattern =
            SignatureSet::build(&self.pattern, self.config.invert_pattern_properties);
        let mut structure = SignatureSet::build(&self.structure, false);
        trim(&mut pattern, &mut structure);
        (pattern, structure)
    }

    /// Iterate to a fixed point and report the best pairing of every pattern point.
    ///
    /// A side with no points ends the run at once with no matches.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::NonConvergence` if the point counts are still
    /// changing after `max_iterations` rounds. No partial result is returned.
    pub fn run(&mut self) -> Result<MatchOutcome, MatchError> {
        let mut previous = (0, 0);
        let mut killed = Vec::new();

        for iteration in 0..self.config.max_iterations {
            let (pattern, structure) = self.signatures();
            let counts = (pattern.len(), structure.len());

            debug!(
                "Iteration {iteration}: {} pattern points and {} structure points remain",
                counts.0, counts.1
            );

            // Nothing can be paired once either side is empty
            if counts.0 == 0 || counts.1 == 0 {
                info!(
                    "Stopped after {} iterations: {} side has no points left",
                    iteration + 1,
                    if counts.0 == 0 { "pattern" } else { "structure" }
                );
                return Ok(self.outcome(Vec::new(), iteration + 1, counts, killed));
            }

            if counts == previous {
                let matches = best_matches(
                    &pattern,
                    &structure,
                    self.config.accuracy_threshold,
                    self.config.tie_break,
                );
                info!(
                    "Converged after {} iterations with {} matches",
                    iteration + 1,
                    matches.len()
                );
                return Ok(self.outcome(matches, iteration + 1, counts, killed));
            }
            previous = counts;

            killed.extend(eliminate(
                &pattern,
                &structure,
                &mut self.structure,
                self.config.accuracy_threshold,
            ));
        }

        Err(MatchError::NonConvergence {
            iterations: self.config.max_iterations,
        })
    }

    fn outcome(
        &self,
        matches: Vec<PointMatch>,
        iterations: usize,
        counts: (usize, usize),
        killed: Vec<Resid>,
    ) -> MatchOutcome {
        MatchOutcome {
            matches,
            iterations,
            pattern_points: counts.0,
            structure_points: counts.1,
            killed,
            surviving: self.structure.live_resids(),
        }
    }
}

/// Kill every structure point that no pattern point corroborates.
///
/// Decisions are taken against the given signatures, so the order in which
/// points are killed within one round does not matter. Returns the resids
/// killed in this round.
pub fn eliminate(
    pattern: &SignatureSet,
    structure: &SignatureSet,
    side: &mut Side,
    accuracy: f64,
) -> Vec<Resid> {
    let mut killed = Vec::new();

    for candidate in structure {
        let found = pattern
            .iter()
            .any(|p| corroborates(p, candidate, accuracy));

        if !found {
            side.kill(&candidate.resid);
            debug!("Structure point {} {} killed", candidate.label, candidate.resid);
            killed.push(candidate.resid.clone());
        }
    }

    killed
}
