//! Pattern-to-structure matching by iterative elimination.
//!
//! This module provides the core matching functionality:
//!
//! - [`SignatureSet`]: Per-point property vectors and distance bitsets for one side
//! - [`scoring`]: Bitset rejection test, similarity score and trimming
//! - [`MatchEngine`]: The fixed-point elimination loop
//! - [`report`]: Best structure counterpart for every surviving pattern point
//!
//! ## Matching Algorithm
//!
//! Each round of the engine:
//!
//! 1. **Signatures**: Rebuilds every point's signature from the live records
//! 2. **Trimming**: Clears distance bins observed on one side only
//! 3. **Convergence**: Stops when both point counts equal the previous round's
//! 4. **Elimination**: Kills structure points with no corroborating pattern point
//!
//! A pattern point corroborates a structure point when their property vectors
//! are identical and their distance bitsets share at least the configured
//! percentage of bins (`100 * |a ∧ b| / max(|a|, |b|)`).
//!
//! ## Example
//!
//! ```rust
//! use lesk_match::{MatchEngine, Point, RawDistanceRecord, Side};
//!
//! let pattern = Side::new(vec![RawDistanceRecord::new(
//!     Point::new("LYS", "A12"),
//!     Point::new("ASP", "A40"),
//!     3,
//! )]);
//! let structure = Side::new(vec![RawDistanceRecord::new(
//!     Point::new("ARG", "B7"),
//!     Point::new("GLU", "B19"),
//!     3,
//! )]);
//!
//! let outcome = MatchEngine::new(pattern, structure).run().unwrap();
//! assert_eq!(outcome.matches.len(), 2);
//! assert_eq!(outcome.matches[0].structure_resid.as_str(), "B7");
//! ```

pub mod engine;
pub mod report;
pub mod scoring;
pub mod signature;

pub use engine::{MatchConfig, MatchEngine, MatchError, MatchOutcome};
pub use report::{PointMatch, TieBreak};
pub use signature::{DistanceBits, PointSignature, SignatureSet};
