use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::core::record::{Side, MAX_DIST};
use crate::core::types::{PropertySet, Resid};

/// Fixed-width set of distance bins observed for a point.
///
/// Bit `i` is set when some live record links the point to another live point
/// at bin `i`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DistanceBits(u32);

// One bit per distance slot
const _: () = assert!(MAX_DIST <= u32::BITS as usize);

impl DistanceBits {
    #[must_use]
    pub fn empty() -> Self {
        Self(0)
    }

    /// Build from a list of bin indices
    #[must_use]
    pub fn from_bins(bins: &[usize]) -> Self {
        let mut bits = Self::empty();
        for &bin in bins {
            bits.set(bin);
        }
        bits
    }

    /// Set `bin`; indices outside the signature are ignored
    pub fn set(&mut self, bin: usize) {
        if bin < MAX_DIST {
            self.0 |= 1 << bin;
        }
    }

    pub fn clear(&mut self, bin: usize) {
        if bin < MAX_DIST {
            self.0 &= !(1 << bin);
        }
    }

    #[must_use]
    pub fn contains(&self, bin: usize) -> bool {
        bin < MAX_DIST && self.0 & (1 << bin) != 0
    }

    /// Number of bins set
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Number of bins set in both bitsets
    #[must_use]
    pub fn common(&self, other: &DistanceBits) -> usize {
        (self.0 & other.0).count_ones() as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// `true` when every bin set here is also set in `other`
    #[cfg(test)]
    pub(crate) fn is_subset_of(&self, other: &DistanceBits) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn bins(&self) -> impl Iterator<Item = usize> + '_ {
        (0..MAX_DIST).filter(move |&bin| self.contains(bin))
    }
}

impl fmt::Display for DistanceBits {
    /// `0`/`1` string over the real bins, lowest bin first
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bin in 0..MAX_DIST - 1 {
            write!(f, "{}", if self.contains(bin) { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl Serialize for DistanceBits {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per-point view used for matching: properties plus observed distance bins
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointSignature {
    pub resid: Resid,
    pub label: String,
    pub properties: PropertySet,
    pub distance_bits: DistanceBits,
}

/// Signatures of every live point on one side, in order of first appearance.
///
/// A signature set is a pure function of the live records it was built from;
/// the engine discards and rebuilds it every iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureSet {
    signatures: Vec<PointSignature>,
    index: HashMap<Resid, usize>,
}

impl SignatureSet {
    /// Derive signatures from the live records of `side`.
    ///
    /// Properties are fixed when a point is first seen, optionally with the
    /// positive/negative flags swapped. Every occurrence sets the record's bin
    /// on both endpoints.
    pub fn build(side: &Side, swap_properties: bool) -> Self {
        let mut set = Self::default();

        for record in side.live_records() {
            for point in [&record.a, &record.b] {
                let pos = match set.index.get(&point.resid) {
                    Some(&pos) => pos,
                    None => {
                        let properties = point.resolved_properties();
                        set.signatures.push(PointSignature {
                            resid: point.resid.clone(),
                            label: point.label.clone(),
                            properties: if swap_properties {
                                properties.swapped()
                            } else {
                                properties
                            },
                            distance_bits: DistanceBits::empty(),
                        });
                        set.index
                            .insert(point.resid.clone(), set.signatures.len() - 1);
                        set.signatures.len() - 1
                    }
                };
                set.signatures[pos].distance_bits.set(record.bin());
            }
        }

        set
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn get(&self, resid: &Resid) -> Option<&PointSignature> {
        self.index.get(resid).map(|&i| &self.signatures[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PointSignature> {
        self.signatures.iter()
    }

    /// `true` when any signature has `bin` set
    pub fn any_has_bin(&self, bin: usize) -> bool {
        self.signatures
            .iter()
            .any(|s| s.distance_bits.contains(bin))
    }

    /// Clear `bin` on every signature
    pub fn clear_bin(&mut self, bin: usize) {
        for signature in &mut self.signatures {
            signature.distance_bits.clear(bin);
        }
    }
}

impl<'a> IntoIterator for &'a SignatureSet {
    type Item = &'a PointSignature;
    type IntoIter = std::slice::Iter<'a, PointSignature>;

    fn into_iter(self) -> Self::IntoIter {
        self.signatures.iter()
    }
}
