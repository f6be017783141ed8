use serde::{Deserialize, Serialize};

use crate::core::types::Resid;
use crate::matching::scoring::{corroborates, score};
use crate::matching::signature::{PointSignature, SignatureSet};

/// How to choose between structure candidates with equal scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Keep the first candidate reaching the best score in scan order
    #[default]
    FirstEncountered,
    /// Keep the last candidate reaching the best score in scan order
    LastEncountered,
}

/// Best structure counterpart of one pattern point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointMatch {
    pub pattern_label: String,
    pub pattern_resid: Resid,
    pub structure_label: String,
    pub structure_resid: Resid,

    /// Percentage bitset similarity of the pairing
    pub score: f64,
}

impl PointMatch {
    fn new(pattern: &PointSignature, structure: &PointSignature, score: f64) -> Self {
        Self {
            pattern_label: pattern.label.clone(),
            pattern_resid: pattern.resid.clone(),
            structure_label: structure.label.clone(),
            structure_resid: structure.resid.clone(),
            score,
        }
    }
}

/// Best-scoring corroborating structure point for `pattern`, if any.
///
/// Only candidates with a strictly positive score are considered.
#[must_use]
pub fn best_match<'a>(
    pattern: &PointSignature,
    structure: &'a SignatureSet,
    accuracy: f64,
    tie_break: TieBreak,
) -> Option<(&'a PointSignature, f64)> {
    let mut best: Option<(&PointSignature, f64)> = None;

    for candidate in structure.iter().filter(|c| corroborates(pattern, c, accuracy)) {
        let candidate_score = score(&pattern.distance_bits, &candidate.distance_bits);
        let best_score = best.map_or(0.0, |(_, s)| s);

        let better = match tie_break {
            TieBreak::FirstEncountered => candidate_score > best_score,
            TieBreak::LastEncountered => {
                candidate_score > best_score || (best.is_some() && candidate_score >= best_score)
            }
        };

        if better {
            best = Some((candidate, candidate_score));
        }
    }

    best
}

/// Pair every pattern point with its best structure point, in pattern order.
///
/// Pattern points without a corroborating candidate are omitted.
#[must_use]
pub fn best_matches(
    pattern: &SignatureSet,
    structure: &SignatureSet,
    accuracy: f64,
    tie_break: TieBreak,
) -> Vec<PointMatch> {
    pattern
        .iter()
        .filter_map(|p| {
            best_match(p, structure, accuracy, tie_break)
                .map(|(s, match_score)| PointMatch::new(p, s, match_score))
        })
        .collect()
}
