//! Core data types for pattern matching.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Resid`]: Stable identifier of a point
//! - [`Property`], [`PropertySet`]: Chemical property flags of a point
//! - [`Point`], [`PlacedPoint`]: A labelled point, optionally with coordinates
//! - [`RawDistanceRecord`], [`Side`]: Binned pairwise observations of one side
//! - [`DistanceBinner`]: Quantization of distances into bins
//!
//! ## Properties
//!
//! Unless a point carries an explicit property vector, its label is classified:
//!
//! | Property    | Labels |
//! |-------------|--------|
//! | Positive    | LYS, ARG, HIS |
//! | Negative    | ASP, GLU, nucleotides A/T/C/G |
//! | Aromatic    | PHE, TYR, TRP |
//! | Hydrophobic | PHE, ILE, LEU, VAL, TRP |
//! | Hydrophilic | ASP, GLU, HIS, LYS, ASN, GLN, ARG, SER, THR, TYR |

pub mod point;
pub mod record;
pub mod types;

pub use point::{PlacedPoint, Point};
pub use record::{DistanceBinner, RawDistanceRecord, Side, MAX_DIST};
pub use types::{Property, PropertySet, Resid};
