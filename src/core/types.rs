use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stable identifier of a point (e.g. chain + residue number + insertion code)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Resid(pub String);

impl Resid {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Resid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for Resid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of property slots carried by every point
pub const N_PROPERTIES: usize = 5;

/// Chemical property flags a point may carry.
///
/// The discriminant is the slot index in a [`PropertySet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    Positive = 0,
    Negative = 1,
    Aromatic = 2,
    Hydrophobic = 3,
    Hydrophilic = 4,
}

impl Property {
    pub const ALL: [Property; N_PROPERTIES] = [
        Property::Positive,
        Property::Negative,
        Property::Aromatic,
        Property::Hydrophobic,
        Property::Hydrophilic,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Positive => write!(f, "positive"),
            Self::Negative => write!(f, "negative"),
            Self::Aromatic => write!(f, "aromatic"),
            Self::Hydrophobic => write!(f, "hydrophobic"),
            Self::Hydrophilic => write!(f, "hydrophilic"),
        }
    }
}

/// Fixed-width property vector of a point.
///
/// Two points can only be paired when their property sets are identical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PropertySet([bool; N_PROPERTIES]);

impl PropertySet {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, property: Property) -> Self {
        self.0[property.index()] = true;
        self
    }

    #[must_use]
    pub fn contains(&self, property: Property) -> bool {
        self.0[property.index()]
    }

    pub fn insert(&mut self, property: Property) {
        self.0[property.index()] = true;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|&flag| flag)
    }

    /// Exchange the positive and negative charge flags, leaving the others alone
    #[must_use]
    pub fn swapped(mut self) -> Self {
        self.0
            .swap(Property::Positive.index(), Property::Negative.index());
        self
    }

    /// Classify a residue or nucleotide label.
    ///
    /// Only the first three characters of amino-acid names are significant.
    /// Nucleotide labels (`A`, `T`, `C`, `G`, possibly space padded) count as
    /// negatively charged through their phosphate.
    #[must_use]
    pub fn classify(label: &str) -> Self {
        let trimmed = label.trim();
        let code: String = trimmed.chars().take(3).collect::<String>().to_uppercase();
        let mut set = Self::empty();

        match code.as_str() {
            "ASP" | "GLU" | "A" | "T" | "C" | "G" => set.insert(Property::Negative),
            "LYS" | "ARG" | "HIS" => set.insert(Property::Positive),
            _ => {}
        }

        if matches!(code.as_str(), "PHE" | "TYR" | "TRP") {
            set.insert(Property::Aromatic);
        }

        if matches!(code.as_str(), "PHE" | "ILE" | "LEU" | "VAL" | "TRP") {
            set.insert(Property::Hydrophobic);
        }

        if matches!(
            code.as_str(),
            "ASP" | "GLU" | "HIS" | "LYS" | "ASN" | "GLN" | "ARG" | "SER" | "THR" | "TYR"
        ) {
            set.insert(Property::Hydrophilic);
        }

        set
    }

    pub fn iter(&self) -> impl Iterator<Item = Property> + '_ {
        Property::ALL
            .into_iter()
            .filter(move |p| self.contains(*p))
    }
}

impl fmt::Display for PropertySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &flag in &self.0 {
            write!(f, "{}", if flag { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Error returned when a property string is not exactly five `0`/`1` characters
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid property string '{0}': expected {N_PROPERTIES} characters of 0 or 1")]
pub struct InvalidPropertyString(pub String);

impl FromStr for PropertySet {
    type Err = InvalidPropertyString;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != N_PROPERTIES {
            return Err(InvalidPropertyString(s.to_string()));
        }

        let mut flags = [false; N_PROPERTIES];
        for (slot, c) in flags.iter_mut().zip(s.chars()) {
            *slot = match c {
                '1' => true,
                '0' => false,
                _ => return Err(InvalidPropertyString(s.to_string())),
            };
        }
        Ok(Self(flags))
    }
}

impl Serialize for PropertySet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PropertySet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
