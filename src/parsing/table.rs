//! Parser for precomputed pairwise distance tables.
//!
//! One record per line, whitespace separated:
//! `labelA residA labelB residB distance [propertiesA propertiesB]`

use std::collections::HashMap;
use std::path::Path;

use crate::core::point::Point;
use crate::core::record::{DistanceBinner, RawDistanceRecord, Side};
use crate::core::types::{PropertySet, Resid};
use crate::parsing::points::ParseError;
use crate::parsing::read_text;
use crate::utils::validation::{check_point_limit, check_record_limit};

/// Parse a distance table file (optionally gzip-compressed)
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_table_file(path: &Path, binner: &DistanceBinner) -> Result<Side, ParseError> {
    let text = read_text(path)?;
    parse_table_text(&text, binner)
}

/// Parse distance table text, binning every distance
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for malformed lines,
/// `ParseError::SelfPair` when a record links a point to itself,
/// `ParseError::ConflictingLabel` when a resid appears under two labels,
/// `ParseError::TooManyPoints` if the point limit is exceeded, or
/// `ParseError::TooManyRecords` if the record limit is exceeded.
pub fn parse_table_text(text: &str, binner: &DistanceBinner) -> Result<Side, ParseError> {
    let mut side = Side::default();
    let mut labels: HashMap<Resid, String> = HashMap::new();

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_num = i + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();

        if fields.len() != 5 && fields.len() != 7 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields, expected 5 or 7",
                fields.len()
            )));
        }

        let distance: f64 = fields[4]
            .parse()
            .ok()
            .filter(|d: &f64| d.is_finite() && *d >= 0.0)
            .ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "Invalid distance on line {line_num}: '{}'",
                    fields[4]
                ))
            })?;

        let mut a = Point::new(fields[0], fields[1]);
        let mut b = Point::new(fields[2], fields[3]);

        if a.resid == b.resid {
            return Err(ParseError::SelfPair {
                line: line_num,
                resid: a.resid.to_string(),
            });
        }

        if fields.len() == 7 {
            a = a.with_properties(parse_properties(fields[5], line_num)?);
            b = b.with_properties(parse_properties(fields[6], line_num)?);
        }

        for point in [&a, &b] {
            match labels.get(&point.resid) {
                Some(first) if first != &point.label => {
                    return Err(ParseError::ConflictingLabel {
                        line: line_num,
                        resid: point.resid.to_string(),
                        first: first.clone(),
                        second: point.label.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    // Check point limit for DOS protection
                    if check_point_limit(labels.len()).is_some() {
                        return Err(ParseError::TooManyPoints(labels.len()));
                    }
                    labels.insert(point.resid.clone(), point.label.clone());
                }
            }
        }

        // Check record limit for DOS protection
        if check_record_limit(side.record_count() + 1).is_some() {
            return Err(ParseError::TooManyRecords(side.record_count() + 1));
        }

        side.push(RawDistanceRecord::from_distance(a, b, distance, binner));
    }

    Ok(side)
}

fn parse_properties(field: &str, line_num: usize) -> Result<PropertySet, ParseError> {
    field
        .parse()
        .map_err(|e| ParseError::InvalidFormat(format!("Line {line_num}: {e}")))
}
