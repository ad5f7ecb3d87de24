//! Workspace umbrella crate for cross-rendering document fidelity comparison.
//!
//! Given the content an extractor pulled out of several renderings of one
//! document (one rendering per engine), this crate compares configured
//! `baseline-other` engine pairs and produces a [`FidelityReport`]: a table of
//! metric name × pair.
//!
//! Each pair runs through three independent stages:
//!
//! 1. text: normalize both sides, compute the edit script, discount trivial
//!    edits (whitespace, case flips, moved characters) and score ([`textdiff`]);
//! 2. images: reconcile the image multisets by digest and size ([`reconcile`]);
//! 3. fonts: compare the font sets ([`reconcile`]).
//!
//! A pair whose baseline or other content is missing is skipped and has no
//! cell in any metric.
//!
//! ```
//! use fidelity::{
//!     ComparisonPair, ContentSet, DocumentContent, EngineId, FidelityConfig, Metric, MetricValue,
//!     PairwiseReportBuilder,
//! };
//!
//! let contents = ContentSet::new()
//!     .with(EngineId::new("xe")?, DocumentContent::with_text("Hello World"))?
//!     .with(EngineId::new("pdf")?, DocumentContent::with_text("Hello  World"))?;
//!
//! let builder = PairwiseReportBuilder::new(FidelityConfig::default())?;
//! let report = builder.build(&contents)?.report;
//!
//! let xe_pdf: ComparisonPair = "xe-pdf".parse()?;
//! assert_eq!(report.get(Metric::RawDistance, &xe_pdf), Some(MetricValue::Int(1)));
//! assert_eq!(report.get(Metric::CleanedDistance, &xe_pdf), Some(MetricValue::Int(0)));
//! // No LuaTeX content: the pair is absent, not zero.
//! assert!(!report.has_value(Metric::RawDistance, &"xe-lua".parse::<ComparisonPair>()?));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod config;
mod error;
mod report;

pub use crate::builder::{ComparisonRun, PairComparison, PairwiseReportBuilder};
pub use crate::config::{ConfigLoadError, FidelityConfig};
pub use crate::error::FidelityError;
pub use crate::report::{FidelityReport, Metric, MetricValue, SkippedPair, UnknownMetric};

pub use content::{
    ComparisonPair, ContentError, ContentSet, DocumentContent, EngineId, FontDescriptor,
    FontSize, ImageDescriptor, NormalizerConfig, TextNormalizer, UnicodeForm, join_pages,
};
pub use reconcile::{
    FontReconciliation, ImageConfig, ImageReconciliation, ReconcileError, reconcile_fonts,
    reconcile_images,
};
pub use textdiff::{
    DistanceFunction, EditOp, EditSummary, OpMultiset, TextComparison, TextDiffConfig,
    TextDiffError, compare_texts, edit_script,
};
