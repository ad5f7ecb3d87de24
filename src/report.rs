//! The metric table produced by a comparison run.
//!
//! A [`FidelityReport`] maps each [`Metric`] to a column per
//! [`ComparisonPair`]. A pair that was not compared, or a metric that is not
//! defined for a pair (Hamming on texts of different length, a disabled
//! distance function), has no cell at all. An absent cell is never zero.
//!
//! ```json
//! {
//!   "pairs": ["xe-pdf", "xe-lua"],
//!   "metrics": {
//!     "raw_distance": { "xe-pdf": 1 },
//!     "img_correct_order": { "xe-pdf": true }
//!   },
//!   "skipped": [{ "pair": "xe-lua", "missing": ["lua"] }]
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use content::{ComparisonPair, EngineId};
use serde::{Deserialize, Serialize};

/// Name of one report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    RawDistance,
    NormalizedDistance,
    Ratio,
    HammingDistance,
    HammingNormalized,
    CleanedDistance,
    CleanedAdjustedScore,
    InsertMinusDelete,
    CharsDiffNet,
    CharsDiffDistinct,
    OpWhitespace,
    OpCaseUpperToLower,
    OpCaseLowerToUpper,
    OpMovement,
    ImgCorrectOrder,
    ImgNumMissing,
    ImgNumSizeMismatch,
    FontsCountDrift,
    FontsIdentityDrift,
    NumPagesDiff,
}

impl Metric {
    pub const ALL: [Metric; 20] = [
        Metric::RawDistance,
        Metric::NormalizedDistance,
        Metric::Ratio,
        Metric::HammingDistance,
        Metric::HammingNormalized,
        Metric::CleanedDistance,
        Metric::CleanedAdjustedScore,
        Metric::InsertMinusDelete,
        Metric::CharsDiffNet,
        Metric::CharsDiffDistinct,
        Metric::OpWhitespace,
        Metric::OpCaseUpperToLower,
        Metric::OpCaseLowerToUpper,
        Metric::OpMovement,
        Metric::ImgCorrectOrder,
        Metric::ImgNumMissing,
        Metric::ImgNumSizeMismatch,
        Metric::FontsCountDrift,
        Metric::FontsIdentityDrift,
        Metric::NumPagesDiff,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::RawDistance => "raw_distance",
            Metric::NormalizedDistance => "normalized_distance",
            Metric::Ratio => "ratio",
            Metric::HammingDistance => "hamming_distance",
            Metric::HammingNormalized => "hamming_normalized",
            Metric::CleanedDistance => "cleaned_distance",
            Metric::CleanedAdjustedScore => "cleaned_adjusted_score",
            Metric::InsertMinusDelete => "insert_minus_delete",
            Metric::CharsDiffNet => "chars_diff_net",
            Metric::CharsDiffDistinct => "chars_diff_distinct",
            Metric::OpWhitespace => "op_whitespace",
            Metric::OpCaseUpperToLower => "op_case_upper_to_lower",
            Metric::OpCaseLowerToUpper => "op_case_lower_to_upper",
            Metric::OpMovement => "op_movement",
            Metric::ImgCorrectOrder => "img_correct_order",
            Metric::ImgNumMissing => "img_num_missing",
            Metric::ImgNumSizeMismatch => "img_num_size_mismatch",
            Metric::FontsCountDrift => "fonts_count_drift",
            Metric::FontsIdentityDrift => "fonts_identity_drift",
            Metric::NumPagesDiff => "num_pages_diff",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for [`Metric::from_str`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMetric(pub String);

impl fmt::Display for UnknownMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown metric {:?}", self.0)
    }
}

impl std::error::Error for UnknownMetric {}

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// One report cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl MetricValue {
    pub fn as_i64(self) -> Option<i64> {
        match self {
            MetricValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric view; integers widen, booleans have none.
    pub fn as_f64(self) -> Option<f64> {
        match self {
            MetricValue::Int(v) => Some(v as f64),
            MetricValue::Float(v) => Some(v),
            MetricValue::Bool(_) => None,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self {
            MetricValue::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for MetricValue {
    fn from(v: bool) -> Self {
        MetricValue::Bool(v)
    }
}

impl From<i64> for MetricValue {
    fn from(v: i64) -> Self {
        MetricValue::Int(v)
    }
}

impl From<usize> for MetricValue {
    fn from(v: usize) -> Self {
        MetricValue::Int(i64::try_from(v).unwrap_or(i64::MAX))
    }
}

impl From<f64> for MetricValue {
    fn from(v: f64) -> Self {
        MetricValue::Float(v)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Bool(v) => write!(f, "{v}"),
            MetricValue::Int(v) => write!(f, "{v}"),
            MetricValue::Float(v) => write!(f, "{v}"),
        }
    }
}

/// A declared pair that could not be compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPair {
    pub pair: ComparisonPair,
    /// Engines of the pair without content, baseline first.
    pub missing: Vec<EngineId>,
}

/// Metric name × pair table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FidelityReport {
    pairs: Vec<ComparisonPair>,
    metrics: BTreeMap<Metric, BTreeMap<ComparisonPair, MetricValue>>,
    skipped: Vec<SkippedPair>,
}

impl FidelityReport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_pair(
        &mut self,
        pair: &ComparisonPair,
        values: impl IntoIterator<Item = (Metric, MetricValue)>,
    ) {
        self.pairs.push(pair.clone());
        for (metric, value) in values {
            self.metrics
                .entry(metric)
                .or_default()
                .insert(pair.clone(), value);
        }
    }

    pub(crate) fn record_skipped(&mut self, skipped: SkippedPair) {
        self.skipped.push(skipped);
    }

    pub fn get(&self, metric: Metric, pair: &ComparisonPair) -> Option<MetricValue> {
        self.metrics.get(&metric)?.get(pair).copied()
    }

    /// Whether `pair` has a value for `metric`. `false` means "not measured",
    /// which is different from a zero difference.
    pub fn has_value(&self, metric: Metric, pair: &ComparisonPair) -> bool {
        self.get(metric, pair).is_some()
    }

    /// All values of one metric, keyed by pair.
    pub fn row(&self, metric: Metric) -> Option<&BTreeMap<ComparisonPair, MetricValue>> {
        self.metrics.get(&metric)
    }

    /// All metric values recorded for one pair.
    pub fn column(&self, pair: &ComparisonPair) -> BTreeMap<Metric, MetricValue> {
        self.metrics
            .iter()
            .filter_map(|(metric, cells)| cells.get(pair).map(|v| (*metric, *v)))
            .collect()
    }

    /// Metrics with at least one value.
    pub fn metrics(&self) -> impl Iterator<Item = Metric> + '_ {
        self.metrics.keys().copied()
    }

    /// Compared pairs, in declaration order.
    pub fn pairs(&self) -> &[ComparisonPair] {
        &self.pairs
    }

    /// Declared pairs that were not compared, in declaration order.
    pub fn skipped(&self) -> &[SkippedPair] {
        &self.skipped
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
