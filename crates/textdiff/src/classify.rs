//! Separation of cosmetic edit ops from substantive ones.
//!
//! Every collated entry lands in exactly one bucket, checked in this order:
//!
//! 1. whitespace: each side is absent or a whitespace character,
//! 2. case flip: a replace whose sides differ only in letter case,
//! 3. kept: everything else, passed on to movement detection.

use serde::{Deserialize, Serialize};

use crate::editops::EditAction;
use crate::multiset::{OpKey, OpMultiset};

/// Bucket of one collated entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpClass {
    Whitespace,
    LowerToUpper,
    UpperToLower,
    Kept,
}

/// Cosmetic buckets count distinct collated entries: `l→L` seen twice adds
/// one. `movements` is the number of cancelled pairs found later by movement
/// detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSummary {
    pub whitespace: usize,
    pub lower_to_upper: usize,
    pub upper_to_lower: usize,
    pub movements: usize,
}

impl EditSummary {
    /// Entries removed as cosmetic.
    pub fn cosmetic_entries(&self) -> usize {
        self.whitespace + self.lower_to_upper + self.upper_to_lower
    }
}

fn is_blank(c: Option<char>) -> bool {
    c.is_none_or(char::is_whitespace)
}

fn lowercase(c: char) -> String {
    c.to_lowercase().collect()
}

/// Classify one collated key.
pub fn classify_op(key: &OpKey) -> OpClass {
    if is_blank(key.from) && is_blank(key.to) {
        return OpClass::Whitespace;
    }
    if let (EditAction::Replace, Some(from), Some(to)) = (key.action, key.from, key.to) {
        let from_lower = lowercase(from);
        if from != to && from_lower == lowercase(to) {
            return if from_lower.chars().eq(std::iter::once(from)) {
                OpClass::LowerToUpper
            } else {
                OpClass::UpperToLower
            };
        }
    }
    OpClass::Kept
}

/// Split `ops` into a per-bucket entry summary and the multiset of kept
/// entries with their original counts.
pub fn classify(ops: &OpMultiset) -> (EditSummary, OpMultiset) {
    let mut summary = EditSummary::default();
    let mut kept = OpMultiset::new();
    for (key, &count) in ops.iter() {
        match classify_op(key) {
            OpClass::Whitespace => summary.whitespace += 1,
            OpClass::LowerToUpper => summary.lower_to_upper += 1,
            OpClass::UpperToLower => summary.upper_to_lower += 1,
            OpClass::Kept => kept.add(*key, count),
        }
    }
    (summary, kept)
}
