//! Configuration and error types for text comparison.
//!
//! The comparison is a pure function of `(text1, text2, config)`; nothing in
//! this module reads the environment or keeps process-wide state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A similarity or distance function evaluated on a pair of texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceFunction {
    /// Levenshtein distance in code points.
    Levenshtein,
    /// `1 - levenshtein / max(len1, len2)`, 1 for two empty texts.
    LevenshteinNormalized,
    /// `1 - indel_distance / (len1 + len2)`, 1 for two empty texts.
    Ratio,
    /// Hamming distance; only defined for texts of equal length.
    Hamming,
    /// `1 - hamming / len`, only defined for texts of equal length.
    HammingNormalized,
}

impl DistanceFunction {
    pub const ALL: [DistanceFunction; 5] = [
        DistanceFunction::Levenshtein,
        DistanceFunction::LevenshteinNormalized,
        DistanceFunction::Ratio,
        DistanceFunction::Hamming,
        DistanceFunction::HammingNormalized,
    ];
}

/// Configuration for [`compare_texts`](crate::compare_texts).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextDiffConfig {
    /// Configuration schema version.
    ///
    /// Any change that alters reported values must bump this.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Functions whose values are reported. The edit-op analysis (cleaned
    /// distance, classification, character nets) always runs.
    #[serde(default = "default_distance_functions")]
    pub distance_functions: Vec<DistanceFunction>,
    /// Keep grouped positional edit clusters in the result.
    #[serde(default)]
    pub include_clusters: bool,
}

impl TextDiffConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_distance_functions(
        mut self,
        functions: impl IntoIterator<Item = DistanceFunction>,
    ) -> Self {
        self.distance_functions = functions.into_iter().collect();
        self
    }

    /// Include or exclude edit clusters. Useful when debugging a single pair.
    pub fn with_clusters(mut self, include_clusters: bool) -> Self {
        self.include_clusters = include_clusters;
        self
    }

    pub fn enabled(&self, function: DistanceFunction) -> bool {
        self.distance_functions.contains(&function)
    }

    pub fn validate(&self) -> Result<(), TextDiffError> {
        if self.version < 1 {
            return Err(TextDiffError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.distance_functions.is_empty() {
            return Err(TextDiffError::InvalidConfig(
                "distance_functions must name at least one function".into(),
            ));
        }
        Ok(())
    }
}

impl Default for TextDiffConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            distance_functions: default_distance_functions(),
            include_clusters: false,
        }
    }
}

fn default_version() -> u32 {
    1
}

fn default_distance_functions() -> Vec<DistanceFunction> {
    DistanceFunction::ALL.to_vec()
}

/// Errors returned by the text comparison stage.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextDiffError {
    #[error("unknown edit action {0:?}")]
    UnknownAction(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_every_function() {
        let cfg = TextDiffConfig::default();
        assert_eq!(cfg.version, 1);
        for f in DistanceFunction::ALL {
            assert!(cfg.enabled(f));
        }
        assert!(!cfg.include_clusters);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn builder_chain() {
        let cfg = TextDiffConfig::new()
            .with_distance_functions([DistanceFunction::Ratio])
            .with_clusters(true);
        assert!(cfg.enabled(DistanceFunction::Ratio));
        assert!(!cfg.enabled(DistanceFunction::Hamming));
        assert!(cfg.include_clusters);
    }

    #[test]
    fn empty_function_list_rejected() {
        let cfg = TextDiffConfig::new().with_distance_functions(Vec::<DistanceFunction>::new());
        assert!(matches!(
            cfg.validate(),
            Err(TextDiffError::InvalidConfig(_))
        ));
    }

    #[test]
    fn zero_version_rejected() {
        let cfg = TextDiffConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(TextDiffError::InvalidConfigVersion { version: 0 })
        ));
    }

    #[test]
    fn functions_deserialize_snake_case() {
        let json = r#"{ "distance_functions": ["levenshtein_normalized", "hamming"] }"#;
        let cfg: TextDiffConfig = serde_json::from_str(json).unwrap();
        assert_eq!(
            cfg.distance_functions,
            vec![
                DistanceFunction::LevenshteinNormalized,
                DistanceFunction::Hamming
            ]
        );
        assert_eq!(cfg.version, 1);
    }
}
