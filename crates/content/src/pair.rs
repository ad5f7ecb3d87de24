//! Engine identifiers and comparison pairs.
//!
//! A [`ComparisonPair`] is the lookup key for every per-pair metric. Its
//! canonical serialization is `"<baseline>-<other>"`, which is why engine ids
//! may not contain `-`: the key must round-trip through [`str::parse`].
//!
//! ```rust
//! use content::ComparisonPair;
//!
//! let pair: ComparisonPair = "xe-pdf".parse().unwrap();
//! assert_eq!(pair.baseline().as_str(), "xe");
//! assert_eq!(pair.other().as_str(), "pdf");
//! assert_eq!(pair.key(), "xe-pdf");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// Separator between the two engine ids of a pair key.
pub const PAIR_KEY_SEPARATOR: char = '-';

/// Identifier of one rendering engine (or one engine version).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EngineId(String);

impl EngineId {
    pub fn new(id: impl Into<String>) -> Result<Self, ContentError> {
        let id: String = id.into();
        if id.is_empty() {
            return Err(ContentError::EmptyEngineId);
        }
        if id
            .chars()
            .any(|c| c == PAIR_KEY_SEPARATOR || c.is_whitespace())
        {
            return Err(ContentError::InvalidEngineId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EngineId {
    type Error = ContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EngineId> for String {
    fn from(value: EngineId) -> Self {
        value.0
    }
}

impl FromStr for EngineId {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Ordered `(baseline, other)` engine pair.
///
/// Ordering matters: signed metrics such as `insert_minus_delete` and
/// `num_pages_diff` are computed as baseline relative to other.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComparisonPair {
    baseline: EngineId,
    other: EngineId,
}

impl ComparisonPair {
    pub fn new(baseline: EngineId, other: EngineId) -> Result<Self, ContentError> {
        if baseline == other {
            return Err(ContentError::SamePairEngines {
                engine: baseline.0,
            });
        }
        Ok(Self { baseline, other })
    }

    pub fn baseline(&self) -> &EngineId {
        &self.baseline
    }

    pub fn other(&self) -> &EngineId {
        &self.other
    }

    /// Stable string key, e.g. `"xe-pdf"`.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Both engines, baseline first.
    pub fn engines(&self) -> [&EngineId; 2] {
        [&self.baseline, &self.other]
    }
}

impl fmt::Display for ComparisonPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.baseline, PAIR_KEY_SEPARATOR, self.other)
    }
}

impl FromStr for ComparisonPair {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (baseline, other) = s
            .split_once(PAIR_KEY_SEPARATOR)
            .ok_or_else(|| ContentError::InvalidPairKey(s.to_string()))?;
        let baseline =
            EngineId::new(baseline).map_err(|_| ContentError::InvalidPairKey(s.to_string()))?;
        let other =
            EngineId::new(other).map_err(|_| ContentError::InvalidPairKey(s.to_string()))?;
        Self::new(baseline, other)
    }
}

impl TryFrom<String> for ComparisonPair {
    type Error = ContentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ComparisonPair> for String {
    fn from(value: ComparisonPair) -> Self {
        value.to_string()
    }
}
