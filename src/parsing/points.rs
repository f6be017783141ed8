//! Parser for point files produced by surface detection.
//!
//! One point per line, whitespace separated:
//! `label resid x y z [properties]`
//!
//! `properties` is an optional five-character `0`/`1` string (positive,
//! negative, aromatic, hydrophobic, hydrophilic). Without it the label is
//! classified.

use std::collections::HashSet;
use std::path::Path;

use thiserror::Error;
use tracing::warn;

use crate::core::point::{PlacedPoint, Point};
use crate::core::record::{DistanceBinner, Side};
use crate::core::types::PropertySet;
use crate::parsing::read_text;
use crate::utils::validation::{
    check_point_limit, check_record_limit, pair_count, MAX_POINTS, MAX_RECORDS,
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input format: {0}")]
    InvalidFormat(String),

    #[error("Too many points: {0} exceeds maximum allowed ({max})", max = MAX_POINTS)]
    TooManyPoints(usize),

    #[error("Too many distance records: {0} exceeds maximum allowed ({max})", max = MAX_RECORDS)]
    TooManyRecords(usize),

    #[error("Line {line}: record links point '{resid}' to itself")]
    SelfPair { line: usize, resid: String },

    #[error("Line {line}: resid '{resid}' was first seen as '{first}' but is labelled '{second}'")]
    ConflictingLabel {
        line: usize,
        resid: String,
        first: String,
        second: String,
    },
}

/// Parse a point file (optionally gzip-compressed) into the records of one side
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_points_file(path: &Path, binner: &DistanceBinner) -> Result<Side, ParseError> {
    let text = read_text(path)?;
    parse_points_text(&text, binner)
}

/// Parse point text and pair every point with every later one
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for malformed lines or duplicate
/// resids, `ParseError::TooManyPoints` if the point limit is exceeded, or
/// `ParseError::TooManyRecords` if pairing the points would exceed the record limit.
pub fn parse_points_text(text: &str, binner: &DistanceBinner) -> Result<Side, ParseError> {
    let points = parse_placed_points(text)?;

    // Every pair becomes a record, so bound the expansion before building it
    let records = pair_count(points.len());
    if check_record_limit(records).is_some() {
        return Err(ParseError::TooManyRecords(records));
    }

    if points.len() < 2 {
        warn!(
            "Only {} point(s) found; no distances can be formed",
            points.len()
        );
    }
    Ok(Side::from_placed_points(&points, binner))
}

/// Parse point text into placed points, in file order
///
/// # Errors
///
/// See [`parse_points_text`].
pub fn parse_placed_points(text: &str) -> Result<Vec<PlacedPoint>, ParseError> {
    let mut points = Vec::new();
    let mut seen = HashSet::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();

        if fields.len() < 5 || fields.len() > 6 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected 5 or 6",
                fields.len()
            )));
        }

        let mut position = [0.0; 3];
        for (slot, field) in position.iter_mut().zip(&fields[2..5]) {
            *slot = parse_coordinate(field, line_num)?;
        }

        let mut point = Point::new(fields[0], fields[1]);
        if let Some(props) = fields.get(5) {
            let properties: PropertySet = props
                .parse()
                .map_err(|e| ParseError::InvalidFormat(format!("Line {line_num}: {e}")))?;
            point = point.with_properties(properties);
        }

        if !seen.insert(point.resid.clone()) {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num}: duplicate resid '{}'",
                point.resid
            )));
        }

        // Check point limit for DOS protection
        if check_point_limit(points.len()).is_some() {
            return Err(ParseError::TooManyPoints(points.len()));
        }

        points.push(PlacedPoint::new(point, position));
    }

    Ok(points)
}

fn parse_coordinate(field: &str, line_num: usize) -> Result<f64, ParseError> {
    field
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            ParseError::InvalidFormat(format!("Invalid coordinate on line {line_num}: '{field}'"))
        })
}
