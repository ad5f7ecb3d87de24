//! Aggregate text similarity scores.
//!
//! All lengths are counted in Unicode code points.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::classify::EditSummary;
use crate::cluster::EditClusters;
use crate::editops::EditAction;
use crate::multiset::OpMultiset;

/// `1 - distance / max_len`, with two empty texts scoring 1.
pub fn normalize_distance(distance: usize, len1: usize, len2: usize) -> f64 {
    let max_len = len1.max(len2);
    if max_len == 0 {
        return 1.0;
    }
    1.0 - distance as f64 / max_len as f64
}

/// Indel similarity: `1 - (len1 + len2 - 2 * lcs) / (len1 + len2)`.
///
/// Two empty texts score 1.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let indel = total - 2 * lcs_len(&a, &b);
    1.0 - indel as f64 / total as f64
}

/// Length of the longest common subsequence, in linear memory.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];
    for cl in long {
        for (j, cs) in short.iter().enumerate() {
            curr[j + 1] = if cl == cs {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[short.len()]
}

/// Hamming distance, or `None` when the texts differ in length.
pub fn hamming(a: &str, b: &str) -> Option<usize> {
    strsim::hamming(a, b).ok()
}

/// Score the cleaned distance against the raw one.
///
/// Documents whose only differences are cosmetic or relocations score 1
/// even when their raw distance is large. Defined as 1 when `raw` is 0.
pub fn cleaned_adjusted_score(cleaned: usize, raw: usize, raw_normalized: f64) -> f64 {
    if raw == 0 {
        return 1.0;
    }
    1.0 - (cleaned as f64 / raw as f64) * (1.0 - raw_normalized)
}

/// Net growth: total inserted minus total deleted occurrences.
pub fn insert_minus_delete(ops: &OpMultiset) -> i64 {
    ops.total_for(EditAction::Insert) as i64 - ops.total_for(EditAction::Delete) as i64
}

/// Signed net change per character: `+count` for the `to` side of every op,
/// `-count` for the `from` side. Whitespace and characters whose changes
/// cancel out are omitted.
pub fn char_nets(ops: &OpMultiset) -> BTreeMap<char, i64> {
    let mut nets: BTreeMap<char, i64> = BTreeMap::new();
    for (key, &count) in ops.iter() {
        let count = count as i64;
        if let Some(from) = key.from {
            *nets.entry(from).or_insert(0) -= count;
        }
        if let Some(to) = key.to {
            *nets.entry(to).or_insert(0) += count;
        }
    }
    nets.retain(|c, net| *net != 0 && !c.is_whitespace());
    nets
}

/// Values of the configured distance functions. A disabled function, or
/// Hamming on texts of unequal length, is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TextScores {
    pub levenshtein: Option<usize>,
    pub levenshtein_normalized: Option<f64>,
    pub ratio: Option<f64>,
    pub hamming: Option<usize>,
    pub hamming_normalized: Option<f64>,
}

/// Everything learned from comparing two texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextComparison {
    /// Edit distance, always equal to `collated.total()`.
    pub raw_distance: usize,
    pub raw_normalized: f64,
    pub scores: TextScores,
    /// Occurrences left after removing cosmetic and relocated ops.
    pub cleaned_distance: usize,
    pub cleaned_adjusted_score: f64,
    pub insert_minus_delete: i64,
    pub char_nets: BTreeMap<char, i64>,
    /// Sum of `char_nets`.
    pub chars_diff_net: i64,
    /// Number of entries in `char_nets`.
    pub chars_diff_distinct: usize,
    pub summary: EditSummary,
    pub collated: OpMultiset,
    pub cleaned: OpMultiset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clusters: Option<EditClusters>,
}

impl TextComparison {
    /// Per-character nets ordered by descending magnitude.
    pub fn char_nets_by_magnitude(&self) -> Vec<(char, i64)> {
        let mut nets: Vec<(char, i64)> = self.char_nets.iter().map(|(&c, &n)| (c, n)).collect();
        nets.sort_by(|a, b| b.1.abs().cmp(&a.1.abs()).then(a.0.cmp(&b.0)));
        nets
    }
}
