//! Font set reconciliation.

use std::collections::BTreeSet;

use content::FontDescriptor;
use serde::{Deserialize, Serialize};

/// Result of [`reconcile_fonts`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontReconciliation {
    /// `| |baseline| - |other| |`.
    pub count_drift: usize,
    /// Size of the symmetric difference. Two engines can use the same number
    /// of fonts while using entirely different ones.
    pub identity_drift: usize,
    pub only_in_baseline: Vec<FontDescriptor>,
    pub only_in_other: Vec<FontDescriptor>,
}

pub fn reconcile_fonts(
    baseline: &BTreeSet<FontDescriptor>,
    other: &BTreeSet<FontDescriptor>,
) -> FontReconciliation {
    let only_in_baseline: Vec<FontDescriptor> = baseline.difference(other).cloned().collect();
    let only_in_other: Vec<FontDescriptor> = other.difference(baseline).cloned().collect();
    FontReconciliation {
        count_drift: baseline.len().abs_diff(other.len()),
        identity_drift: only_in_baseline.len() + only_in_other.len(),
        only_in_baseline,
        only_in_other,
    }
}
