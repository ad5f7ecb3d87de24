//! Pairwise report construction.

use std::time::Instant;

use content::{ComparisonPair, ContentSet, DocumentContent, EngineId, TextNormalizer};
use rayon::prelude::*;
use reconcile::{FontReconciliation, ImageReconciliation, reconcile_fonts, reconcile_images};
use serde::{Deserialize, Serialize};
use textdiff::{TextComparison, compare_texts};
use tracing::{Level, info};

use crate::config::FidelityConfig;
use crate::error::FidelityError;
use crate::report::{FidelityReport, Metric, MetricValue, SkippedPair};

/// Full detail of one compared pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairComparison {
    pub pair: ComparisonPair,
    pub text: TextComparison,
    pub images: ImageReconciliation,
    pub fonts: FontReconciliation,
    /// Baseline page count minus other page count.
    pub num_pages_diff: i64,
}

impl PairComparison {
    /// The report cells of this pair. Disabled distance functions and
    /// undefined Hamming values produce no cell.
    pub fn metric_values(&self) -> Vec<(Metric, MetricValue)> {
        let text = &self.text;
        let scores = &text.scores;
        let mut values: Vec<(Metric, MetricValue)> = Vec::with_capacity(Metric::ALL.len());

        let optional = [
            (Metric::RawDistance, scores.levenshtein.map(MetricValue::from)),
            (
                Metric::NormalizedDistance,
                scores.levenshtein_normalized.map(MetricValue::from),
            ),
            (Metric::Ratio, scores.ratio.map(MetricValue::from)),
            (Metric::HammingDistance, scores.hamming.map(MetricValue::from)),
            (
                Metric::HammingNormalized,
                scores.hamming_normalized.map(MetricValue::from),
            ),
        ];
        values.extend(
            optional
                .into_iter()
                .filter_map(|(metric, value)| value.map(|v| (metric, v))),
        );

        let always: [(Metric, MetricValue); 15] = [
            (Metric::CleanedDistance, text.cleaned_distance.into()),
            (Metric::CleanedAdjustedScore, text.cleaned_adjusted_score.into()),
            (Metric::InsertMinusDelete, text.insert_minus_delete.into()),
            (Metric::CharsDiffNet, text.chars_diff_net.into()),
            (Metric::CharsDiffDistinct, text.chars_diff_distinct.into()),
            (Metric::OpWhitespace, text.summary.whitespace.into()),
            (Metric::OpCaseUpperToLower, text.summary.upper_to_lower.into()),
            (Metric::OpCaseLowerToUpper, text.summary.lower_to_upper.into()),
            (Metric::OpMovement, text.summary.movements.into()),
            (Metric::ImgCorrectOrder, self.images.correct_order.into()),
            (Metric::ImgNumMissing, self.images.num_missing.into()),
            (Metric::ImgNumSizeMismatch, self.images.num_size_mismatch.into()),
            (Metric::FontsCountDrift, self.fonts.count_drift.into()),
            (Metric::FontsIdentityDrift, self.fonts.identity_drift.into()),
            (Metric::NumPagesDiff, self.num_pages_diff.into()),
        ];
        values.extend(always);
        values
    }
}

/// Result of a run: the metric table plus per-pair detail for debugging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRun {
    pub report: FidelityReport,
    /// Compared pairs in declaration order.
    pub details: Vec<PairComparison>,
}

enum PairOutcome {
    Compared(Box<PairComparison>),
    Skipped(SkippedPair),
}

/// Drives text, image and font comparison over every configured pair.
///
/// The builder holds only validated configuration; each [`build`] call owns
/// its accumulators, so one builder can serve many documents concurrently.
///
/// [`build`]: PairwiseReportBuilder::build
#[derive(Debug, Clone)]
pub struct PairwiseReportBuilder {
    cfg: FidelityConfig,
    normalizer: TextNormalizer,
}

impl PairwiseReportBuilder {
    pub fn new(cfg: FidelityConfig) -> Result<Self, FidelityError> {
        cfg.validate()?;
        let normalizer = TextNormalizer::new(cfg.normalizer.clone())?;
        Ok(Self { cfg, normalizer })
    }

    pub fn config(&self) -> &FidelityConfig {
        &self.cfg
    }

    pub fn pairs(&self) -> &[ComparisonPair] {
        &self.cfg.pairs
    }

    /// Compare every configured pair of `contents`.
    ///
    /// Pairs lacking content on either side are recorded as skipped and get
    /// no cell in any metric. Output order follows the configured pair order
    /// whether or not pairs run in parallel.
    pub fn build(&self, contents: &ContentSet) -> Result<ComparisonRun, FidelityError> {
        contents.validate()?;

        let outcomes: Vec<PairOutcome> = if self.cfg.parallel {
            self.cfg
                .pairs
                .par_iter()
                .map(|pair| self.evaluate(pair, contents))
                .collect::<Result<_, _>>()?
        } else {
            self.cfg
                .pairs
                .iter()
                .map(|pair| self.evaluate(pair, contents))
                .collect::<Result<_, _>>()?
        };

        let mut report = FidelityReport::new();
        let mut details = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                PairOutcome::Compared(comparison) => {
                    report.record_pair(&comparison.pair, comparison.metric_values());
                    details.push(*comparison);
                }
                PairOutcome::Skipped(skipped) => report.record_skipped(skipped),
            }
        }
        Ok(ComparisonRun { report, details })
    }

    /// Compare one pair, or `None` when either side has no content.
    pub fn compare_pair(
        &self,
        pair: &ComparisonPair,
        contents: &ContentSet,
    ) -> Result<Option<PairComparison>, FidelityError> {
        match self.evaluate(pair, contents)? {
            PairOutcome::Compared(comparison) => Ok(Some(*comparison)),
            PairOutcome::Skipped(_) => Ok(None),
        }
    }

    /// Compare two contents directly, `baseline` first.
    pub fn compare_contents(
        &self,
        pair: &ComparisonPair,
        baseline: &DocumentContent,
        other: &DocumentContent,
    ) -> Result<PairComparison, FidelityError> {
        let text1 = self.normalizer.normalize(&baseline.text);
        let text2 = self.normalizer.normalize(&other.text);
        let text = compare_texts(&text1, &text2, &self.cfg.text)?;
        let images = reconcile_images(&baseline.images, &other.images, &self.cfg.images);
        let fonts = reconcile_fonts(&baseline.fonts, &other.fonts);

        Ok(PairComparison {
            pair: pair.clone(),
            text,
            images,
            fonts,
            num_pages_diff: i64::from(baseline.page_count) - i64::from(other.page_count),
        })
    }

    fn evaluate(
        &self,
        pair: &ComparisonPair,
        contents: &ContentSet,
    ) -> Result<PairOutcome, FidelityError> {
        let start = Instant::now();
        let span = tracing::span!(Level::INFO, "fidelity.compare_pair", pair = %pair);
        let _guard = span.enter();

        let (baseline, other) = match (contents.get(pair.baseline()), contents.get(pair.other())) {
            (Some(baseline), Some(other)) => (baseline, other),
            _ => {
                let missing: Vec<EngineId> = pair
                    .engines()
                    .into_iter()
                    .filter(|engine| !contents.contains(engine))
                    .cloned()
                    .collect();
                info!(missing = ?missing, "pair_skipped");
                return Ok(PairOutcome::Skipped(SkippedPair {
                    pair: pair.clone(),
                    missing,
                }));
            }
        };

        let comparison = self.compare_contents(pair, baseline, other)?;
        let elapsed_micros = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        info!(
            raw_distance = comparison.text.raw_distance,
            cleaned_distance = comparison.text.cleaned_distance,
            img_num_missing = comparison.images.num_missing,
            fonts_identity_drift = comparison.fonts.identity_drift,
            elapsed_micros,
            "pair_compared"
        );
        Ok(PairOutcome::Compared(Box::new(comparison)))
    }
}
