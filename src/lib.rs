//! # lesk-match
//!
//! A library for finding correspondences between a small structural pattern and
//! a larger structure using Lesk's constraint-propagation method.
//!
//! Both inputs are sets of labelled points (e.g. charged and aromatic residues
//! on a protein surface) with binned pairwise distances. Every point gets a
//! signature: a property vector plus the set of distance bins at which it
//! touches another point. Structure points whose signature cannot appear in the
//! pattern are eliminated round by round until nothing changes; each surviving
//! pattern point is then paired with its best-scoring structure point.
//!
//! ## Features
//!
//! - **Property matching**: Charge, aromatic and hydropathy flags must agree exactly
//! - **Distance signatures**: Bitsets of binned pairwise distances per point
//! - **Trimming**: Distance bins seen on one side only are discarded
//! - **Iterative elimination**: Runs to a fixed point under an iteration cap
//! - **Charge inversion**: Optionally matches complementary charges in the pattern
//!
//! ## Example
//!
//! ```rust
//! use lesk_match::{MatchConfig, MatchEngine, Point, RawDistanceRecord, Side};
//!
//! let pattern = Side::new(vec![RawDistanceRecord::new(
//!     Point::new("LYS", "A12"),
//!     Point::new("ASP", "A40"),
//!     3,
//! )]);
//! let structure = Side::new(vec![RawDistanceRecord::new(
//!     Point::new("GLU", "B19"),
//!     Point::new("ARG", "B7"),
//!     3,
//! )]);
//!
//! let mut engine = MatchEngine::with_config(pattern, structure, MatchConfig::default());
//! let outcome = engine.run().unwrap();
//!
//! for m in &outcome.matches {
//!     println!("{} {} -> {} {}", m.pattern_label, m.pattern_resid, m.structure_label, m.structure_resid);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Points, properties, distance records and binning
//! - [`matching`]: Signatures, scoring, the elimination engine and reporting
//! - [`parsing`]: Parsers for point files and distance tables
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::point::{PlacedPoint, Point};
pub use crate::core::record::{DistanceBinner, RawDistanceRecord, Side};
pub use crate::core::types::*;
pub use matching::engine::{MatchConfig, MatchEngine, MatchError, MatchOutcome};
pub use matching::report::{PointMatch, TieBreak};
