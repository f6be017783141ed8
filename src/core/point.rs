use serde::{Deserialize, Serialize};

use crate::core::types::{PropertySet, Resid};

/// One endpoint of a pairwise distance observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    /// Short chemical/residue name used for display and classification
    pub label: String,

    /// Stable identifier, unique per point within one side
    pub resid: Resid,

    /// Precomputed property vector; when absent the label is classified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertySet>,
}

impl Point {
    pub fn new(label: impl Into<String>, resid: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            resid: Resid::new(resid),
            properties: None,
        }
    }

    #[must_use]
    pub fn with_properties(mut self, properties: PropertySet) -> Self {
        self.properties = Some(properties);
        self
    }

    /// The property vector of this point, falling back to the label classification table
    #[must_use]
    pub fn resolved_properties(&self) -> PropertySet {
        self.properties
            .unwrap_or_else(|| PropertySet::classify(&self.label))
    }
}

/// A point placed at 3-D coordinates, as produced by surface detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPoint {
    pub point: Point,
    pub position: [f64; 3],
}

impl PlacedPoint {
    pub fn new(point: Point, position: [f64; 3]) -> Self {
        Self { point, position }
    }

    /// Euclidean distance between two placed points
    #[must_use]
    pub fn distance_to(&self, other: &PlacedPoint) -> f64 {
        self.position
            .iter()
            .zip(other.position.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}
