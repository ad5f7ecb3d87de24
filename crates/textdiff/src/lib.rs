//! # Text Fidelity Comparison
//!
//! Character-level comparison of two extracted text streams. The crate turns
//! a pair of strings into a [`TextComparison`]: the edit distance, a
//! classification of every difference into cosmetic and substantive
//! categories, and the similarity scores derived from them.
//!
//! ## Pipeline
//!
//! 1.  **Edit script**: a minimal Levenshtein alignment of the two texts at
//!     code point granularity ([`edit_script`]).
//! 2.  **Collation**: the script is reduced to a multiset of
//!     `(action, from, to) -> count` entries ([`OpMultiset`]). Positions are
//!     dropped; the sum of counts is the edit distance.
//! 3.  **Classification**: whitespace-only and case-only entries are counted
//!     in an [`EditSummary`] and removed ([`classify`]).
//! 4.  **Movement detection**: matching insert/delete pairs of the same
//!     character, and reciprocal replaces `x→y`/`y→x`, are cancelled as
//!     relocations ([`cancel_movements`]). What is left is the *cleaned*
//!     multiset.
//! 5.  **Scoring**: raw, normalized and cleaned-adjusted scores, the
//!     insert/delete imbalance and per-character net changes.
//!
//! Metrics are a deterministic function of the alignment chosen in step 1.
//! Other Levenshtein implementations may choose a different minimal
//! alignment and therefore different per-entry counts.
//!
//! ## Example
//!
//! ```
//! use textdiff::{compare_texts, TextDiffConfig};
//!
//! let cmp = compare_texts("Hello World", "Hello  World", &TextDiffConfig::default()).unwrap();
//! assert_eq!(cmp.raw_distance, 1);
//! assert_eq!(cmp.cleaned_distance, 0);
//! assert_eq!(cmp.summary.whitespace, 1);
//! assert_eq!(cmp.cleaned_adjusted_score, 1.0);
//! ```
pub mod classify;
pub mod cluster;
pub mod config;
pub mod editops;
pub mod movement;
pub mod multiset;
pub mod score;

use tracing::debug;

pub use crate::classify::{classify, classify_op, EditSummary, OpClass};
pub use crate::cluster::{group_edit_ops, EditCluster, EditClusters};
pub use crate::config::{DistanceFunction, TextDiffConfig, TextDiffError};
pub use crate::editops::{edit_script, levenshtein, EditAction, EditOp};
pub use crate::movement::cancel_movements;
pub use crate::multiset::{collate, collate_tagged, CollatedOp, OpKey, OpMultiset};
pub use crate::score::{TextComparison, TextScores};

use crate::score::{
    char_nets, cleaned_adjusted_score, hamming, insert_minus_delete, normalize_distance, ratio,
};

/// Number of cleaned entries written to debug logs per comparison.
const DEBUG_TOP_OPS: usize = 20;

/// Compare `baseline` against `other`.
///
/// Both texts are compared verbatim; normalization is the caller's concern.
pub fn compare_texts(
    baseline: &str,
    other: &str,
    cfg: &TextDiffConfig,
) -> Result<TextComparison, TextDiffError> {
    cfg.validate()?;

    let len1 = baseline.chars().count();
    let len2 = other.chars().count();

    let script = edit_script(baseline, other);
    let collated = collate(&script);
    let raw_distance = collated.total();
    let raw_normalized = normalize_distance(raw_distance, len1, len2);

    let (mut summary, mut cleaned) = classify(&collated);
    summary.movements = cancel_movements(&mut cleaned);
    let cleaned_distance = cleaned.total();

    let hamming_distance = if cfg.enabled(DistanceFunction::Hamming)
        || cfg.enabled(DistanceFunction::HammingNormalized)
    {
        hamming(baseline, other)
    } else {
        None
    };

    let scores = TextScores {
        levenshtein: cfg
            .enabled(DistanceFunction::Levenshtein)
            .then_some(raw_distance),
        levenshtein_normalized: cfg
            .enabled(DistanceFunction::LevenshteinNormalized)
            .then_some(raw_normalized),
        ratio: cfg
            .enabled(DistanceFunction::Ratio)
            .then(|| ratio(baseline, other)),
        hamming: hamming_distance.filter(|_| cfg.enabled(DistanceFunction::Hamming)),
        hamming_normalized: hamming_distance
            .filter(|_| cfg.enabled(DistanceFunction::HammingNormalized))
            .map(|h| normalize_distance(h, len1, len2)),
    };

    let nets = char_nets(&collated);
    let chars_diff_net = nets.values().sum();
    let chars_diff_distinct = nets.len();

    let comparison = TextComparison {
        raw_distance,
        raw_normalized,
        scores,
        cleaned_distance,
        cleaned_adjusted_score: cleaned_adjusted_score(
            cleaned_distance,
            raw_distance,
            raw_normalized,
        ),
        insert_minus_delete: insert_minus_delete(&collated),
        char_nets: nets,
        chars_diff_net,
        chars_diff_distinct,
        summary,
        collated,
        cleaned,
        clusters: cfg.include_clusters.then(|| group_edit_ops(&script)),
    };

    if raw_distance > 0 {
        let top: Vec<CollatedOp> = comparison
            .cleaned
            .sorted_by_count()
            .into_iter()
            .take(DEBUG_TOP_OPS)
            .collect();
        debug!(
            raw_distance,
            cleaned_distance,
            summary = ?comparison.summary,
            top_cleaned_ops = ?top,
            char_nets = ?comparison.char_nets_by_magnitude(),
            "text_compared"
        );
    }

    Ok(comparison)
}
