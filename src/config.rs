//! YAML configuration for fidelity comparison runs.
//!
//! One file declares the engines, the ordered pairs to compare, and the
//! per-stage settings. Every field except `version` has a default, so a
//! minimal file is just `version: "1.0"`.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "tex engines"
//! engines: [xe, pdf, lua]
//! pairs: ["xe-pdf", "xe-lua"]
//! parallel: true
//!
//! normalizer:
//!   enabled: true
//!   unicode_form: none
//!   replacements:
//!     - ["ﬁ", "fi"]
//!
//! text:
//!   version: 1
//!   distance_functions: [levenshtein, levenshtein_normalized, ratio]
//!   include_clusters: false
//!
//! images:
//!   size_tolerance: 0.01
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use content::{ComparisonPair, EngineId, NormalizerConfig};
use reconcile::ImageConfig;
use serde::{Deserialize, Serialize};
use textdiff::TextDiffConfig;
use thiserror::Error;

use crate::error::FidelityError;

/// Errors that can occur when loading YAML configuration files.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

impl From<FidelityError> for ConfigLoadError {
    fn from(err: FidelityError) -> Self {
        match err {
            FidelityError::UnsupportedVersion(v) => ConfigLoadError::UnsupportedVersion(v),
            other => ConfigLoadError::Validation(other.to_string()),
        }
    }
}

/// Top-level configuration of a comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FidelityConfig {
    /// Configuration format version.
    pub version: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Engines whose content may appear in a run.
    #[serde(default = "default_engines")]
    pub engines: Vec<EngineId>,

    /// Ordered `baseline-other` pairs, evaluated in this order.
    #[serde(default = "default_pairs")]
    pub pairs: Vec<ComparisonPair>,

    /// Evaluate pairs on the rayon pool.
    #[serde(default)]
    pub parallel: bool,

    #[serde(default)]
    pub normalizer: NormalizerConfig,

    #[serde(default)]
    pub text: TextDiffConfig,

    #[serde(default)]
    pub images: ImageConfig,
}

impl FidelityConfig {
    /// Load a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: FidelityConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn with_engines(mut self, engines: impl IntoIterator<Item = EngineId>) -> Self {
        self.engines = engines.into_iter().collect();
        self
    }

    pub fn with_pairs(mut self, pairs: impl IntoIterator<Item = ComparisonPair>) -> Self {
        self.pairs = pairs.into_iter().collect();
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_normalizer(mut self, normalizer: NormalizerConfig) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_text(mut self, text: TextDiffConfig) -> Self {
        self.text = text;
        self
    }

    pub fn with_images(mut self, images: ImageConfig) -> Self {
        self.images = images;
        self
    }

    /// Validate the configuration.
    ///
    /// Every pair must name declared engines and appear once; engines must be
    /// unique; stage configs must pass their own checks.
    pub fn validate(&self) -> Result<(), FidelityError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(FidelityError::UnsupportedVersion(v.to_string())),
        }

        let mut engines = BTreeSet::new();
        for engine in &self.engines {
            if !engines.insert(engine) {
                return Err(FidelityError::DuplicateEngine(engine.to_string()));
            }
        }

        let mut pairs = BTreeSet::new();
        for pair in &self.pairs {
            if let Some(engine) = pair.engines().into_iter().find(|e| !engines.contains(e)) {
                return Err(FidelityError::UnknownEngine {
                    pair: pair.key(),
                    engine: engine.to_string(),
                });
            }
            if !pairs.insert(pair) {
                return Err(FidelityError::DuplicatePair(pair.key()));
            }
        }

        self.normalizer.validate()?;
        self.text.validate()?;
        self.images.validate()?;
        Ok(())
    }
}

impl Default for FidelityConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            engines: default_engines(),
            pairs: default_pairs(),
            parallel: false,
            normalizer: NormalizerConfig::default(),
            text: TextDiffConfig::default(),
            images: ImageConfig::default(),
        }
    }
}

/// XeTeX, pdfTeX and LuaTeX.
const DEFAULT_ENGINES: [&str; 3] = ["xe", "pdf", "lua"];

/// XeTeX is the baseline both other engines are compared against.
const DEFAULT_PAIRS: [&str; 2] = ["xe-pdf", "xe-lua"];

// The constants above are valid ids, so nothing is dropped here.
fn default_engines() -> Vec<EngineId> {
    DEFAULT_ENGINES
        .iter()
        .filter_map(|id| EngineId::new(*id).ok())
        .collect()
}

fn default_pairs() -> Vec<ComparisonPair> {
    DEFAULT_PAIRS
        .iter()
        .filter_map(|key| key.parse().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use textdiff::DistanceFunction;

    #[test]
    fn default_config_is_valid() {
        let config = FidelityConfig::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.engines.len(), 3);
        let keys: Vec<String> = config.pairs.iter().map(ComparisonPair::key).collect();
        assert_eq!(keys, ["xe-pdf", "xe-lua"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn minimal_yaml_uses_defaults() {
        let config = FidelityConfig::from_yaml("version: \"1.0\"\n").unwrap();
        assert_eq!(config, FidelityConfig::default());
    }

    #[test]
    fn load_valid_yaml() {
        let yaml = r#"
version: "1.0"
name: "tl2020 vs tl2023"
engines: ["20", "23"]
pairs: ["20-23"]
parallel: true
normalizer:
  enabled: false
text:
  version: 1
  distance_functions: [levenshtein, ratio]
  include_clusters: true
images:
  size_tolerance: 0.05
"#;
        let config = FidelityConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.name.as_deref(), Some("tl2020 vs tl2023"));
        assert_eq!(config.pairs[0].key(), "20-23");
        assert!(config.parallel);
        assert!(!config.normalizer.enabled);
        assert_eq!(
            config.text.distance_functions,
            vec![DistanceFunction::Levenshtein, DistanceFunction::Ratio]
        );
        assert!(config.text.include_clusters);
        assert_eq!(config.images.size_tolerance, 0.05);
    }

    #[test]
    fn load_from_file() {
        let yaml = "version: \"1\"\nengines: [a, b]\npairs: [\"a-b\"]\n";
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(yaml.as_bytes()).unwrap();

        let config = FidelityConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.engines.len(), 2);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = FidelityConfig::from_file("/definitely/not/here.yaml");
        assert!(matches!(result, Err(ConfigLoadError::FileRead(_))));
    }

    #[test]
    fn unsupported_version_rejected() {
        let result = FidelityConfig::from_yaml("version: \"2.0\"\n");
        assert!(matches!(result, Err(ConfigLoadError::UnsupportedVersion(v)) if v == "2.0"));
    }

    #[test]
    fn pair_with_undeclared_engine_rejected() {
        let yaml = "version: \"1.0\"\nengines: [xe, pdf]\npairs: [\"xe-lua\"]\n";
        let err = FidelityConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigLoadError::Validation(_)));
        assert!(err.to_string().contains("lua"));
    }

    #[test]
    fn duplicate_pair_rejected() {
        let config = FidelityConfig::default().with_pairs(
            ["xe-pdf", "xe-pdf"]
                .iter()
                .map(|k| k.parse::<ComparisonPair>().unwrap()),
        );
        assert!(matches!(
            config.validate(),
            Err(FidelityError::DuplicatePair(k)) if k == "xe-pdf"
        ));
    }

    #[test]
    fn duplicate_engine_rejected() {
        let yaml = "version: \"1.0\"\nengines: [xe, xe]\npairs: []\n";
        let err = FidelityConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn malformed_pair_key_is_a_parse_error() {
        let yaml = "version: \"1.0\"\npairs: [\"xepdf\"]\n";
        assert!(matches!(
            FidelityConfig::from_yaml(yaml),
            Err(ConfigLoadError::YamlParse(_))
        ));
    }

    #[test]
    fn negative_tolerance_rejected() {
        let yaml = "version: \"1.0\"\nimages:\n  size_tolerance: -1.0\n";
        let err = FidelityConfig::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("tolerance"));
    }

    #[test]
    fn yaml_roundtrip() {
        let config = FidelityConfig::default().with_parallel(true);
        let yaml = config.to_yaml().unwrap();
        assert_eq!(FidelityConfig::from_yaml(&yaml).unwrap(), config);
    }
}
