//! Centralized validation and helper functions.

/// Maximum number of distinct points allowed on one side (DOS protection)
pub const MAX_POINTS: usize = 10_000;

/// Check if adding another point would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new point.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```
/// use lesk_match::utils::validation::{check_point_limit, MAX_POINTS};
///
/// assert!(check_point_limit(0).is_none());
/// assert!(check_point_limit(MAX_POINTS).is_some());
/// ```
#[must_use]
pub fn check_point_limit(count: usize) -> Option<String> {
    if count >= MAX_POINTS {
        Some(format!(
            "Too many points: adding another would exceed maximum of {MAX_POINTS}"
        ))
    } else {
        None
    }
}

/// Maximum number of pairwise distance records allowed on one side (DOS protection).
///
/// A point file of `n` points expands to `n * (n - 1) / 2` records, so this
/// is the bound that governs memory.
pub const MAX_RECORDS: usize = 1_000_000;

/// Check if a side with `count` records exceeds the maximum allowed.
///
/// Returns an error message if over the limit, None if within bounds.
///
/// # Example
/// ```
/// use lesk_match::utils::validation::{check_record_limit, MAX_RECORDS};
///
/// assert!(check_record_limit(MAX_RECORDS).is_none());
/// assert!(check_record_limit(MAX_RECORDS + 1).is_some());
/// ```
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count > MAX_RECORDS {
        Some(format!(
            "Too many distance records: {count} exceeds maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// Number of records generated by pairing every one of `points` points
#[must_use]
pub fn pair_count(points: usize) -> usize {
    points.saturating_mul(points.saturating_sub(1)) / 2
}
