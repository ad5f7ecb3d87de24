//! Collation of edit ops into a counted multiset.
//!
//! Positions are discarded: two ops are the same entry iff their
//! `(action, from, to)` keys are equal. Invariants kept by [`OpMultiset`]:
//!
//! - every stored count is at least 1; an entry whose count reaches zero is
//!   removed,
//! - [`OpMultiset::total`] equals the number of elementary ops added minus
//!   the number removed.

use std::collections::btree_map::{self, BTreeMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::editops::{EditAction, EditOp};

/// Collation key of an edit op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OpKey {
    pub action: EditAction,
    pub from: Option<char>,
    pub to: Option<char>,
}

impl OpKey {
    pub fn new(action: EditAction, from: Option<char>, to: Option<char>) -> Self {
        Self { action, from, to }
    }

    pub fn insert(c: char) -> Self {
        Self::new(EditAction::Insert, None, Some(c))
    }

    pub fn delete(c: char) -> Self {
        Self::new(EditAction::Delete, Some(c), None)
    }

    pub fn replace(from: char, to: char) -> Self {
        Self::new(EditAction::Replace, Some(from), Some(to))
    }
}

impl From<&EditOp> for OpKey {
    fn from(op: &EditOp) -> Self {
        Self::new(op.action, op.from, op.to)
    }
}

/// One multiset entry in its serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollatedOp {
    pub action: EditAction,
    pub from: Option<char>,
    pub to: Option<char>,
    pub count: usize,
}

impl CollatedOp {
    pub fn key(&self) -> OpKey {
        OpKey::new(self.action, self.from, self.to)
    }
}

/// Counted multiset of collated edit ops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<CollatedOp>", from = "Vec<CollatedOp>")]
pub struct OpMultiset {
    counts: BTreeMap<OpKey, usize>,
}

impl OpMultiset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` occurrences of `key`. Adding zero is a no-op.
    pub fn add(&mut self, key: OpKey, n: usize) {
        if n > 0 {
            *self.counts.entry(key).or_insert(0) += n;
        }
    }

    /// Remove up to `n` occurrences of `key`, returning how many were removed.
    pub fn remove(&mut self, key: &OpKey, n: usize) -> usize {
        let Some(count) = self.counts.get_mut(key) else {
            return 0;
        };
        let removed = n.min(*count);
        *count -= removed;
        if *count == 0 {
            self.counts.remove(key);
        }
        removed
    }

    pub fn count(&self, key: &OpKey) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Sum of counts for one action.
    pub fn total_for(&self, action: EditAction) -> usize {
        self.counts
            .iter()
            .filter(|(key, _)| key.action == action)
            .map(|(_, n)| n)
            .sum()
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, OpKey, usize> {
        self.counts.iter()
    }

    /// Entries by descending count, ties in key order.
    pub fn sorted_by_count(&self) -> Vec<CollatedOp> {
        let mut ops: Vec<CollatedOp> = self.clone().into();
        ops.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key().cmp(&b.key())));
        ops
    }

    /// Keep only the entries for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&OpKey, usize) -> bool) {
        self.counts.retain(|key, n| keep(key, *n));
    }
}

impl FromIterator<EditOp> for OpMultiset {
    fn from_iter<I: IntoIterator<Item = EditOp>>(iter: I) -> Self {
        let mut multiset = Self::new();
        for op in iter {
            multiset.add(OpKey::from(&op), 1);
        }
        multiset
    }
}

impl From<OpMultiset> for Vec<CollatedOp> {
    fn from(multiset: OpMultiset) -> Self {
        multiset
            .counts
            .into_iter()
            .map(|(key, count)| CollatedOp {
                action: key.action,
                from: key.from,
                to: key.to,
                count,
            })
            .collect()
    }
}

impl From<Vec<CollatedOp>> for OpMultiset {
    fn from(ops: Vec<CollatedOp>) -> Self {
        let mut multiset = Self::new();
        for op in ops {
            multiset.add(op.key(), op.count);
        }
        multiset
    }
}

/// Collate an edit script into a multiset.
pub fn collate(ops: &[EditOp]) -> OpMultiset {
    ops.iter().copied().collect()
}

/// Collate an externally produced, string-tagged edit script.
///
/// Each item is `(tag, from, to)`. `equal` steps are skipped silently; any
/// other unknown tag is logged and dropped so that one bad op never aborts a
/// comparison.
pub fn collate_tagged<'a, I>(ops: I) -> OpMultiset
where
    I: IntoIterator<Item = (&'a str, Option<char>, Option<char>)>,
{
    let mut multiset = OpMultiset::new();
    for (tag, from, to) in ops {
        if tag == "equal" {
            continue;
        }
        match EditOp::try_from_tagged(tag, from, to, 0, 0) {
            Ok(op) => multiset.add(OpKey::from(&op), 1),
            Err(err) => {
                warn!(action = tag, error = %err, "unknown_edit_action");
            }
        }
    }
    multiset
}
