//! Parsers turning input files into the records of one side.
//!
//! This module provides parsers for:
//!
//! - **Point files**: `label resid x y z [properties]`, one point per line;
//!   every pair of points becomes a record with its Euclidean distance binned
//! - **Distance tables**: `labelA residA labelB residB distance [propsA propsB]`,
//!   one precomputed record per line
//!
//! Files ending in `.gz` are decompressed transparently.
//!
//! ## Example
//!
//! ```rust
//! use lesk_match::parsing::points::parse_points_text;
//! use lesk_match::DistanceBinner;
//!
//! let text = "LYS A12 0.0 0.0 0.0\nASP A40 3.5 0.0 0.0\n";
//! let side = parse_points_text(text, &DistanceBinner::default()).unwrap();
//! assert_eq!(side.records()[0].bin(), 3);
//! ```

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

pub mod points;
pub mod table;

pub use points::ParseError;

/// Read a whole input file, decompressing it if the name ends in `.gz`
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or decompressed.
pub fn read_text(path: &Path) -> Result<String, ParseError> {
    let is_gzipped = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"));

    if is_gzipped {
        let file = std::fs::File::open(path)?;
        let mut text = String::new();
        GzDecoder::new(file).read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}
