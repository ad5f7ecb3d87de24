//! Grouped positional edit clusters.
//!
//! A debugging view of an edit script: consecutive ops whose positions touch
//! are merged into one range per side, so a reader can jump straight to the
//! regions where two renderings diverge. Nothing downstream computes on
//! clusters.

use serde::{Deserialize, Serialize};

use crate::editops::{EditAction, EditOp};

/// One contiguous region of edits on one side, `start..end` in code points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditCluster {
    pub start: usize,
    pub end: usize,
    /// Characters inserted in this region, in order.
    pub inserted: String,
    /// Characters deleted in this region, in order.
    pub deleted: String,
    /// `(from, to)` replacements in this region, in order.
    pub replaced: Vec<(char, char)>,
}

impl EditCluster {
    fn starting_at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
            inserted: String::new(),
            deleted: String::new(),
            replaced: Vec::new(),
        }
    }

    fn record(&mut self, op: &EditOp) {
        match (op.action, op.from, op.to) {
            (EditAction::Insert, _, Some(to)) => self.inserted.push(to),
            (EditAction::Delete, Some(from), _) => self.deleted.push(from),
            (EditAction::Replace, Some(from), Some(to)) => self.replaced.push((from, to)),
            _ => {}
        }
    }
}

/// Clusters for both texts of a pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditClusters {
    pub source: Vec<EditCluster>,
    pub dest: Vec<EditCluster>,
}

/// Group an edit script into per-side clusters.
///
/// An op joins the open cluster when its position is at most the cluster's
/// end, extending the end to `pos + 1`; otherwise it opens a new cluster.
pub fn group_edit_ops(ops: &[EditOp]) -> EditClusters {
    EditClusters {
        source: group_side(ops, |op| op.src_pos),
        dest: group_side(ops, |op| op.dest_pos),
    }
}

fn group_side(ops: &[EditOp], pos_of: impl Fn(&EditOp) -> usize) -> Vec<EditCluster> {
    let mut clusters: Vec<EditCluster> = Vec::new();
    for op in ops {
        let pos = pos_of(op);
        match clusters.last_mut() {
            Some(open) if pos <= open.end => {
                open.end = open.end.max(pos + 1);
                open.record(op);
            }
            _ => {
                let mut cluster = EditCluster::starting_at(pos);
                cluster.record(op);
                clusters.push(cluster);
            }
        }
    }
    clusters
}
