use crate::core::record::MAX_DIST;
use crate::matching::signature::{DistanceBits, PointSignature, SignatureSet};

/// Default percentage similarity at which two distance bitsets corroborate each other
pub const DEFAULT_ACCURACY: f64 = 50.0;

/// Safely convert usize to f64 for percentage calculations
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Percentage similarity: `100 * |a ∧ b| / max(|a|, |b|)`.
///
/// Returns `None` when both bitsets are empty.
fn similarity(a: &DistanceBits, b: &DistanceBits) -> Option<f64> {
    let max_count = a.count().max(b.count());
    if max_count == 0 {
        None
    } else {
        Some(100.0 * count_to_f64(a.common(b)) / count_to_f64(max_count))
    }
}

/// Rejection test between two distance bitsets.
///
/// Returns `true` while the similarity stays below `accuracy`, i.e. the two
/// points are still distinguishable. Two empty bitsets carry no evidence and
/// are never treated as matched, so they return `true`.
#[must_use]
pub fn is_compatible(a: &DistanceBits, b: &DistanceBits, accuracy: f64) -> bool {
    similarity(a, b).map_or(true, |s| s < accuracy)
}

/// Ranking score, `100 * |a ∧ b| / max(|a|, |b|)`; `0.0` for two empty bitsets
#[must_use]
pub fn score(a: &DistanceBits, b: &DistanceBits) -> f64 {
    similarity(a, b).unwrap_or(0.0)
}

/// `true` when a pattern point and a structure point can be paired: identical
/// property vectors and a bitset similarity at or above `accuracy`
#[must_use]
pub fn corroborates(pattern: &PointSignature, structure: &PointSignature, accuracy: f64) -> bool {
    pattern.properties == structure.properties
        && !is_compatible(&pattern.distance_bits, &structure.distance_bits, accuracy)
}

/// Clear every distance bin that is set on one side only.
///
/// A bin flagged by some pattern signature but by no structure signature is
/// cleared on every pattern signature, and vice versa. Bins are only ever
/// removed.
pub fn trim(pattern: &mut SignatureSet, structure: &mut SignatureSet) {
    for bin in 0..MAX_DIST {
        let pattern_hit = pattern.any_has_bin(bin);
        let structure_hit = structure.any_has_bin(bin);

        if pattern_hit && !structure_hit {
            pattern.clear_bin(bin);
        } else if structure_hit && !pattern_hit {
            structure.clear_bin(bin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::point::Point;
    use crate::core::record::{RawDistanceRecord, Side};

    fn bits(bins: &[usize]) -> DistanceBits {
        DistanceBits::from_bins(bins)
    }

    #[test]
    fn test_score() {
        assert!((score(&bits(&[1, 2]), &bits(&[1, 2])) - 100.0).abs() < 1e-9);
        assert!((score(&bits(&[1, 2]), &bits(&[2, 3, 4, 5])) - 25.0).abs() < 1e-9);
        assert!((score(&bits(&[1]), &bits(&[2])) - 0.0).abs() < 1e-9);
        assert!((score(&bits(&[]), &bits(&[])) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_is_compatible_threshold() {
        // 50% similarity
        let a = bits(&[1, 2]);
        let b = bits(&[2, 3]);
        assert!(!is_compatible(&a, &b, 50.0));
        assert!(is_compatible(&a, &b, 50.1));
        assert!(!is_compatible(&a, &b, 10.0));

        // Identical bitsets count as matched for any threshold up to 100
        assert!(!is_compatible(&a, &a, 100.0));
    }

    #[test]
    fn test_is_compatible_empty() {
        assert!(is_compatible(&bits(&[]), &bits(&[]), 50.0));
        assert!(is_compatible(&bits(&[]), &bits(&[]), 0.0001));
        // One empty side gives 0% similarity
        assert!(is_compatible(&bits(&[]), &bits(&[4]), 50.0));
    }

    fn set(records: &[(&str, &str, usize)]) -> SignatureSet {
        let side = Side::new(
            records
                .iter()
                .map(|&(a, b, bin)| {
                    RawDistanceRecord::new(Point::new("LYS", a), Point::new("LYS", b), bin)
                })
                .collect(),
        );
        SignatureSet::build(&side, false)
    }

    #[test]
    fn test_trim_clears_one_sided_bins() {
        let mut pattern = set(&[("P1", "P2", 3), ("P2", "P3", 4)]);
        let mut structure = set(&[("S1", "S2", 3), ("S2", "S3", 9)]);

        trim(&mut pattern, &mut structure);

        for signature in &pattern {
            assert!(!signature.distance_bits.contains(4));
        }
        for signature in &structure {
            assert!(!signature.distance_bits.contains(9));
        }
        assert_eq!(
            pattern.get(&"P1".into()).unwrap().distance_bits,
            bits(&[3])
        );
        // P3 only had bin 4 and is left empty
        assert!(pattern.get(&"P3".into()).unwrap().distance_bits.is_empty());
        assert_eq!(
            structure.get(&"S2".into()).unwrap().distance_bits,
            bits(&[3])
        );
    }

    #[test]
    fn test_trim_never_adds_bits() {
        let mut pattern = set(&[("P1", "P2", 1), ("P1", "P3", 6), ("P2", "P3", 12)]);
        let mut structure = set(&[("S1", "S2", 6), ("S2", "S3", 12), ("S3", "S4", 20)]);
        let before_pattern = pattern.clone();
        let before_structure = structure.clone();

        trim(&mut pattern, &mut structure);

        for (after, before) in pattern.iter().zip(before_pattern.iter()) {
            assert!(after.distance_bits.is_subset_of(&before.distance_bits));
            for bin in before.distance_bits.bins() {
                let kept = after.distance_bits.contains(bin);
                assert_eq!(kept, before_structure.any_has_bin(bin), "bin {bin}");
            }
        }
        for (after, before) in structure.iter().zip(before_structure.iter()) {
            assert!(after.distance_bits.is_subset_of(&before.distance_bits));
            for bin in before.distance_bits.bins() {
                let kept = after.distance_bits.contains(bin);
                assert_eq!(kept, before_pattern.any_has_bin(bin), "bin {bin}");
            }
        }
    }

    #[test]
    fn test_corroborates_requires_equal_properties() {
        let positive = PointSignature {
            resid: "P1".into(),
            label: "LYS".to_string(),
            properties: crate::core::types::PropertySet::classify("LYS"),
            distance_bits: bits(&[3]),
        };
        let mut negative = positive.clone();
        negative.properties = crate::core::types::PropertySet::classify("ASP");

        assert!(corroborates(&positive, &positive, DEFAULT_ACCURACY));
        assert!(!corroborates(&positive, &negative, DEFAULT_ACCURACY));
    }
}
