//! Character-level edit scripts.
//!
//! [`edit_script`] computes a minimal Levenshtein alignment (insert, delete,
//! replace; no transpositions) between two strings at Unicode code point
//! granularity and returns only the non-equal steps.
//!
//! The common prefix and suffix are stripped first, which removes most of the
//! work for near-identical renderings. The remaining middle section is aligned
//! with Hirschberg's divide-and-conquer, so memory stays linear in the input
//! length; subproblems small enough to fit [`FULL_MATRIX_CELLS`] are solved
//! with a full cost matrix and traceback.
//!
//! Several minimal alignments usually exist. The one returned here is a
//! deterministic function of the inputs: traceback prefers a diagonal step
//! (equal or replace), then a deletion, then an insertion. Other Levenshtein
//! implementations may pick a different alignment with the same length.
//!
//! # Positions
//!
//! Each [`EditOp`] carries the position it applies at, counted in code
//! points while walking both strings in step:
//!
//! - `Insert` at `(i, j)` inserts `b[j]` before `a[i]`.
//! - `Delete` at `(i, j)` removes `a[i]`.
//! - `Replace` at `(i, j)` turns `a[i]` into `b[j]`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::TextDiffError;

/// Largest subproblem (in matrix cells) aligned with a full cost matrix.
pub const FULL_MATRIX_CELLS: usize = 1 << 16;

/// Kind of an elementary edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditAction {
    Insert,
    Delete,
    Replace,
}

impl EditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            EditAction::Insert => "insert",
            EditAction::Delete => "delete",
            EditAction::Replace => "replace",
        }
    }
}

impl fmt::Display for EditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditAction {
    type Err = TextDiffError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insert" => Ok(EditAction::Insert),
            "delete" => Ok(EditAction::Delete),
            "replace" => Ok(EditAction::Replace),
            other => Err(TextDiffError::UnknownAction(other.to_string())),
        }
    }
}

/// One elementary edit with its source and destination positions.
///
/// `from` is `None` for inserts, `to` is `None` for deletes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditOp {
    pub action: EditAction,
    pub from: Option<char>,
    pub to: Option<char>,
    pub src_pos: usize,
    pub dest_pos: usize,
}

impl EditOp {
    pub fn insert(c: char, src_pos: usize, dest_pos: usize) -> Self {
        Self {
            action: EditAction::Insert,
            from: None,
            to: Some(c),
            src_pos,
            dest_pos,
        }
    }

    pub fn delete(c: char, src_pos: usize, dest_pos: usize) -> Self {
        Self {
            action: EditAction::Delete,
            from: Some(c),
            to: None,
            src_pos,
            dest_pos,
        }
    }

    pub fn replace(from: char, to: char, src_pos: usize, dest_pos: usize) -> Self {
        Self {
            action: EditAction::Replace,
            from: Some(from),
            to: Some(to),
            src_pos,
            dest_pos,
        }
    }

    /// Build an op from an externally produced, string-tagged edit script.
    ///
    /// Fails with [`TextDiffError::UnknownAction`] for tags other than
    /// `insert`, `delete` and `replace`. An `equal` step is not an edit and is
    /// reported the same way; callers filtering scripts drop it beforehand.
    pub fn try_from_tagged(
        tag: &str,
        from: Option<char>,
        to: Option<char>,
        src_pos: usize,
        dest_pos: usize,
    ) -> Result<Self, TextDiffError> {
        let action: EditAction = tag.parse()?;
        let (from, to) = match action {
            EditAction::Insert => (None, to),
            EditAction::Delete => (from, None),
            EditAction::Replace => (from, to),
        };
        Ok(Self {
            action,
            from,
            to,
            src_pos,
            dest_pos,
        })
    }
}

/// Compute a minimal edit script turning `a` into `b`.
///
/// ```rust
/// use textdiff::{edit_script, EditAction};
///
/// let ops = edit_script("kitten", "sitting");
/// assert_eq!(ops.len(), 3);
/// assert_eq!(ops[0].action, EditAction::Replace);
/// assert_eq!((ops[0].from, ops[0].to), (Some('k'), Some('s')));
/// ```
pub fn edit_script(a: &str, b: &str) -> Vec<EditOp> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let prefix = a.iter().zip(&b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    let a_mid = &a[prefix..a.len() - suffix];
    let b_mid = &b[prefix..b.len() - suffix];

    let mut ops = Vec::new();
    align(a_mid, b_mid, prefix, prefix, &mut ops);
    ops
}

/// Levenshtein distance in code points, i.e. the length of [`edit_script`].
pub fn levenshtein(a: &str, b: &str) -> usize {
    edit_script(a, b).len()
}

fn align(a: &[char], b: &[char], a_off: usize, b_off: usize, out: &mut Vec<EditOp>) {
    if a.is_empty() {
        out.extend(
            b.iter()
                .enumerate()
                .map(|(k, &c)| EditOp::insert(c, a_off, b_off + k)),
        );
        return;
    }
    if b.is_empty() {
        out.extend(
            a.iter()
                .enumerate()
                .map(|(k, &c)| EditOp::delete(c, a_off + k, b_off)),
        );
        return;
    }
    if a.len() == 1 || a.len().saturating_mul(b.len()) <= FULL_MATRIX_CELLS {
        align_full(a, b, a_off, b_off, out);
        return;
    }

    // Split `a` in half and find the column where an optimal path crosses it.
    let mid = a.len() / 2;
    let forward = cost_row(a[..mid].iter(), b.iter(), b.len());
    let backward = cost_row(a[mid..].iter().rev(), b.iter().rev(), b.len());

    let n = b.len();
    let split = (0..=n)
        .min_by_key(|&k| forward[k] + backward[n - k])
        .unwrap_or(0);

    align(&a[..mid], &b[..split], a_off, b_off, out);
    align(&a[mid..], &b[split..], a_off + mid, b_off + split, out);
}

/// Last row of the Levenshtein cost matrix of `a` against `b`.
fn cost_row<'a, A, B>(a: A, b: B, b_len: usize) -> Vec<usize>
where
    A: Iterator<Item = &'a char>,
    B: Iterator<Item = &'a char> + Clone,
{
    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];
    for (i, ca) in a.enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.clone().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev
}

fn align_full(a: &[char], b: &[char], a_off: usize, b_off: usize, out: &mut Vec<EditOp>) {
    let (n, m) = (a.len(), b.len());
    let width = m + 1;
    let mut d = vec![0usize; (n + 1) * width];
    for (j, cell) in d.iter_mut().take(width).enumerate() {
        *cell = j;
    }
    for i in 1..=n {
        d[i * width] = i;
        for j in 1..=m {
            let substitution = d[(i - 1) * width + j - 1] + usize::from(a[i - 1] != b[j - 1]);
            let deletion = d[(i - 1) * width + j] + 1;
            let insertion = d[i * width + j - 1] + 1;
            d[i * width + j] = substitution.min(deletion).min(insertion);
        }
    }

    let start = out.len();
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        let here = d[i * width + j];
        if i > 0 && j > 0 {
            let diag = d[(i - 1) * width + j - 1];
            if a[i - 1] == b[j - 1] && diag == here {
                i -= 1;
                j -= 1;
                continue;
            }
            if diag + 1 == here {
                out.push(EditOp::replace(a[i - 1], b[j - 1], a_off + i - 1, b_off + j - 1));
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 && d[(i - 1) * width + j] + 1 == here {
            out.push(EditOp::delete(a[i - 1], a_off + i - 1, b_off + j));
            i -= 1;
        } else {
            out.push(EditOp::insert(b[j - 1], a_off + i, b_off + j - 1));
            j -= 1;
        }
    }
    out[start..].reverse();
}
