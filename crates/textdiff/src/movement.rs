//! Relocation detection.
//!
//! A character deleted in one place and inserted in another is a move, not a
//! change. For every `Insert c` entry with count `n` and a matching
//! `Delete c` entry with count `m`, `min(n, m)` occurrences are cancelled from
//! both.
//!
//! A minimal alignment often expresses a move as substitutions instead:
//! `"cat dog"` against `"dog cat"` is six replaces, `c→d` and `d→c` among
//! them. A replace `x→y` paired with a replace `y→x` is two characters
//! trading places and is cancelled the same way.
//!
//! Collation keys make each pairing unique, so the result does not depend on
//! iteration order. Each cancelled pair counts as one movement.

use crate::editops::EditAction;
use crate::multiset::{OpKey, OpMultiset};

/// Cancel relocated characters in place.
///
/// Returns the number of cancelled pairs. Entries that reach zero are
/// removed. Running this twice cancels nothing the second time.
pub fn cancel_movements(ops: &mut OpMultiset) -> usize {
    cancel_insert_delete(ops) + cancel_reciprocal_replaces(ops)
}

fn cancel_insert_delete(ops: &mut OpMultiset) -> usize {
    let inserts: Vec<(char, usize)> = ops
        .iter()
        .filter(|(key, _)| key.action == EditAction::Insert)
        .filter_map(|(key, &n)| key.to.map(|c| (c, n)))
        .collect();

    let mut moved = 0;
    for (c, n) in inserts {
        moved += cancel_pair(ops, OpKey::insert(c), OpKey::delete(c), n);
    }
    moved
}

fn cancel_reciprocal_replaces(ops: &mut OpMultiset) -> usize {
    let swaps: Vec<(char, char, usize)> = ops
        .iter()
        .filter(|(key, _)| key.action == EditAction::Replace)
        .filter_map(|(key, &n)| match (key.from, key.to) {
            (Some(x), Some(y)) if x < y => Some((x, y, n)),
            _ => None,
        })
        .collect();

    let mut moved = 0;
    for (x, y, n) in swaps {
        moved += cancel_pair(ops, OpKey::replace(x, y), OpKey::replace(y, x), n);
    }
    moved
}

fn cancel_pair(ops: &mut OpMultiset, first: OpKey, second: OpKey, first_count: usize) -> usize {
    let cancelled = first_count.min(ops.count(&second));
    if cancelled > 0 {
        ops.remove(&first, cancelled);
        ops.remove(&second, cancelled);
    }
    cancelled
}
