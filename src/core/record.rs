use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::point::{PlacedPoint, Point};
use crate::core::types::Resid;

/// Number of distance slots in a signature.
///
/// Real bins occupy `0..MAX_DIST - 1`; anything beyond collapses into bin
/// `MAX_DIST - 2`, and the top slot is never set.
pub const MAX_DIST: usize = 32;

/// Default width of a distance bin (Angstroms)
pub const DEFAULT_BIN_WIDTH: f64 = 1.0;

/// Converts continuous distances into bin indices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceBinner {
    width: f64,
}

impl Default for DistanceBinner {
    fn default() -> Self {
        Self {
            width: DEFAULT_BIN_WIDTH,
        }
    }
}

impl DistanceBinner {
    /// Create a binner; a width that is not strictly positive falls back to
    /// [`DEFAULT_BIN_WIDTH`]
    #[must_use]
    pub fn new(width: f64) -> Self {
        if width > 0.0 && width.is_finite() {
            Self { width }
        } else {
            Self::default()
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// `floor(distance / width)`, clamped to `MAX_DIST - 2`.
    ///
    /// Distances are expected to be non-negative. A negative distance is a
    /// caller error and lands in bin 0.
    #[must_use]
    pub fn bin(&self, distance: f64) -> usize {
        // `as` saturates: negatives and NaN become 0
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bin = (distance / self.width).floor() as usize;
        bin.min(MAX_DIST - 2)
    }
}

/// One pairwise observation between two points on the same side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDistanceRecord {
    pub a: Point,
    pub b: Point,

    #[serde(deserialize_with = "deserialize_bin")]
    bin: usize,

    /// Set once either endpoint has been eliminated
    #[serde(default)]
    pub dead: bool,
}

impl RawDistanceRecord {
    /// Create a live record from an already binned distance
    pub fn new(a: Point, b: Point, bin: usize) -> Self {
        debug_assert_ne!(a.resid, b.resid, "a record must link two distinct points");
        Self {
            a,
            b,
            bin: bin.min(MAX_DIST - 2),
            dead: false,
        }
    }

    /// Create a live record from a raw distance
    pub fn from_distance(a: Point, b: Point, distance: f64, binner: &DistanceBinner) -> Self {
        Self::new(a, b, binner.bin(distance))
    }

    /// Distance bin index, always `< MAX_DIST - 1`
    #[must_use]
    pub fn bin(&self) -> usize {
        self.bin
    }

    #[must_use]
    pub fn involves(&self, resid: &Resid) -> bool {
        &self.a.resid == resid || &self.b.resid == resid
    }
}

fn deserialize_bin<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: serde::Deserializer<'de>,
{
    usize::deserialize(deserializer).map(|bin| bin.min(MAX_DIST - 2))
}

/// The ordered record list of one side (pattern or structure).
///
/// Records are never removed; eliminating a point flips the `dead` flag on
/// every record that references it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Side {
    records: Vec<RawDistanceRecord>,
}

impl Side {
    pub fn new(records: Vec<RawDistanceRecord>) -> Self {
        Self { records }
    }

    /// Build every unordered pair `(i, j)`, `i < j`, in input order
    pub fn from_placed_points(points: &[PlacedPoint], binner: &DistanceBinner) -> Self {
        let mut records = Vec::with_capacity(points.len() * points.len().saturating_sub(1) / 2);

        for (i, first) in points.iter().enumerate() {
            for second in &points[i + 1..] {
                records.push(RawDistanceRecord::from_distance(
                    first.point.clone(),
                    second.point.clone(),
                    first.distance_to(second),
                    binner,
                ));
            }
        }

        Self { records }
    }

    pub fn push(&mut self, record: RawDistanceRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[RawDistanceRecord] {
        &self.records
    }

    pub fn live_records(&self) -> impl Iterator<Item = &RawDistanceRecord> {
        self.records.iter().filter(|r| !r.dead)
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn live_record_count(&self) -> usize {
        self.live_records().count()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct resids referenced by live records, in order of first appearance
    pub fn live_resids(&self) -> Vec<Resid> {
        let mut seen = HashSet::new();
        let mut resids = Vec::new();
        for record in self.live_records() {
            for point in [&record.a, &record.b] {
                if seen.insert(&point.resid) {
                    resids.push(point.resid.clone());
                }
            }
        }
        resids
    }

    /// Mark every live record referencing `resid` as dead.
    ///
    /// Returns the number of records that were newly killed.
    pub fn kill(&mut self, resid: &Resid) -> usize {
        let mut killed = 0;
        for record in self.records.iter_mut().filter(|r| !r.dead) {
            if record.involves(resid) {
                record.dead = true;
                killed += 1;
            }
        }
        killed
    }
}
