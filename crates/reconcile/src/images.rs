//! Image multiset reconciliation.
//!
//! Two renderings are compared on three independent questions:
//!
//! - **order**: are the digest sequences identical?
//! - **missing**: treating each side as a multiset of digests, how many
//!   occurrences lack a counterpart? A digest seen `N` times on one side and
//!   `M` times on the other contributes `|N - M|`.
//! - **size**: among paired occurrences of the same digest, how many were
//!   placed at a different size?
//!
//! # Pairing
//!
//! Digests can repeat, so occurrences are paired per digest from the end:
//! the last baseline occurrence with the last other occurrence, and so on
//! backwards. When the counts differ, the leading surplus stays unpaired and
//! is already reported as missing.
//!
//! # Size Rule
//!
//! Width and height are checked independently. A dimension mismatches when
//! one side is zero and the other is not, or when the relative difference
//! against the smaller value exceeds the tolerance. Two zeros agree.

use std::collections::BTreeMap;

use content::ImageDescriptor;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ImageConfig;

/// Occurrence counts of a digest whose counts differ between the sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestImbalance {
    pub digest: String,
    pub baseline_count: usize,
    pub other_count: usize,
}

impl DigestImbalance {
    pub fn missing(&self) -> usize {
        self.baseline_count.abs_diff(self.other_count)
    }
}

/// A paired occurrence whose placement size differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeMismatch {
    pub digest: String,
    pub baseline: (f64, f64),
    pub other: (f64, f64),
}

/// Result of [`reconcile_images`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageReconciliation {
    pub correct_order: bool,
    pub num_missing: usize,
    pub num_size_mismatch: usize,
    /// Digests with differing occurrence counts, in digest order.
    pub imbalances: Vec<DigestImbalance>,
    pub size_mismatches: Vec<SizeMismatch>,
}

/// Whether one dimension differs beyond `tolerance`.
pub fn dimension_mismatch(a: f64, b: f64, tolerance: f64) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo <= 0.0 {
        return hi > 0.0;
    }
    (hi - lo) / lo > tolerance
}

fn digest_counts(images: &[ImageDescriptor]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for image in images {
        *counts.entry(image.digest.as_str()).or_insert(0) += 1;
    }
    counts
}

/// Reconcile the images of `baseline` against those of `other`.
///
/// Empty lists are ordinary input: two empty sides agree on everything.
pub fn reconcile_images(
    baseline: &[ImageDescriptor],
    other: &[ImageDescriptor],
    cfg: &ImageConfig,
) -> ImageReconciliation {
    let correct_order = baseline.len() == other.len()
        && baseline
            .iter()
            .zip(other)
            .all(|(a, b)| a.digest == b.digest);

    let baseline_counts = digest_counts(baseline);
    let other_counts = digest_counts(other);
    let mut digests: Vec<&str> = baseline_counts
        .keys()
        .chain(other_counts.keys())
        .copied()
        .collect();
    digests.sort_unstable();
    digests.dedup();

    let imbalances: Vec<DigestImbalance> = digests
        .into_iter()
        .filter_map(|digest| {
            let baseline_count = baseline_counts.get(digest).copied().unwrap_or(0);
            let other_count = other_counts.get(digest).copied().unwrap_or(0);
            (baseline_count != other_count).then(|| DigestImbalance {
                digest: digest.to_string(),
                baseline_count,
                other_count,
            })
        })
        .collect();
    let num_missing = imbalances.iter().map(DigestImbalance::missing).sum();

    let mut unpaired: BTreeMap<&str, Vec<&ImageDescriptor>> = BTreeMap::new();
    for image in baseline {
        unpaired.entry(image.digest.as_str()).or_default().push(image);
    }

    let mut size_mismatches = Vec::new();
    for image in other.iter().rev() {
        let Some(partner) = unpaired
            .get_mut(image.digest.as_str())
            .and_then(|queue| queue.pop())
        else {
            continue;
        };
        if dimension_mismatch(partner.width, image.width, cfg.size_tolerance)
            || dimension_mismatch(partner.height, image.height, cfg.size_tolerance)
        {
            size_mismatches.push(SizeMismatch {
                digest: image.digest.clone(),
                baseline: (partner.width, partner.height),
                other: (image.width, image.height),
            });
        }
    }
    size_mismatches.reverse();

    if !correct_order || num_missing > 0 || !size_mismatches.is_empty() {
        debug!(
            correct_order,
            num_missing,
            num_size_mismatch = size_mismatches.len(),
            imbalances = ?imbalances,
            "images_diverge"
        );
    }

    ImageReconciliation {
        correct_order,
        num_missing,
        num_size_mismatch: size_mismatches.len(),
        imbalances,
        size_mismatches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(digest: &str, w: f64, h: f64) -> ImageDescriptor {
        ImageDescriptor::new(digest, w, h)
    }

    fn reconcile(a: &[ImageDescriptor], b: &[ImageDescriptor]) -> ImageReconciliation {
        reconcile_images(a, b, &ImageConfig::default())
    }

    #[test]
    fn identical_lists_agree() {
        let list = [img("d1", 10.0, 20.0), img("d2", 5.0, 5.0)];
        let r = reconcile(&list, &list);
        assert!(r.correct_order);
        assert_eq!(r.num_missing, 0);
        assert_eq!(r.num_size_mismatch, 0);
    }

    #[test]
    fn empty_lists_agree() {
        let r = reconcile(&[], &[]);
        assert!(r.correct_order);
        assert_eq!(r.num_missing, 0);
        assert_eq!(r.num_size_mismatch, 0);
    }

    #[test]
    fn one_empty_side_counts_everything_missing() {
        let r = reconcile(&[img("d1", 1.0, 1.0), img("d1", 1.0, 1.0)], &[]);
        assert!(!r.correct_order);
        assert_eq!(r.num_missing, 2);
        assert_eq!(r.num_size_mismatch, 0);
    }

    #[test]
    fn tripled_height_is_a_size_mismatch() {
        let r = reconcile(&[img("d1", 100.0, 100.0)], &[img("d1", 100.0, 300.0)]);
        assert!(r.correct_order);
        assert_eq!(r.num_missing, 0);
        assert_eq!(r.num_size_mismatch, 1);
        assert_eq!(r.size_mismatches[0].other, (100.0, 300.0));
    }

    #[test]
    fn swapped_order_is_not_missing() {
        let r = reconcile(
            &[img("d1", 1.0, 1.0), img("d2", 1.0, 1.0)],
            &[img("d2", 1.0, 1.0), img("d1", 1.0, 1.0)],
        );
        assert!(!r.correct_order);
        assert_eq!(r.num_missing, 0);
        assert_eq!(r.num_size_mismatch, 0);
    }

    #[test]
    fn repeated_digests_count_absolute_difference() {
        let r = reconcile(
            &[img("d1", 1.0, 1.0), img("d1", 1.0, 1.0), img("d1", 1.0, 1.0)],
            &[img("d1", 1.0, 1.0), img("d2", 1.0, 1.0)],
        );
        assert_eq!(r.num_missing, 3);
        assert_eq!(
            r.imbalances,
            vec![
                DigestImbalance {
                    digest: "d1".into(),
                    baseline_count: 3,
                    other_count: 1
                },
                DigestImbalance {
                    digest: "d2".into(),
                    baseline_count: 0,
                    other_count: 1
                },
            ]
        );
    }

    #[test]
    fn repeated_digests_pair_from_the_end() {
        // the surplus leading occurrence is unpaired, so its size is ignored
        let r = reconcile(
            &[img("d1", 999.0, 999.0), img("d1", 10.0, 10.0)],
            &[img("d1", 10.0, 10.0)],
        );
        assert_eq!(r.num_missing, 1);
        assert_eq!(r.num_size_mismatch, 0);
    }

    #[test]
    fn tolerance_is_relative_to_smaller_side() {
        assert!(!dimension_mismatch(100.0, 101.0, 0.01));
        assert!(dimension_mismatch(100.0, 101.5, 0.01));
        assert!(!dimension_mismatch(101.0, 100.0, 0.01));
        assert!(dimension_mismatch(0.0, 0.5, 0.01));
        assert!(!dimension_mismatch(0.0, 0.0, 0.01));
    }

    #[test]
    fn zero_to_nonzero_is_always_a_mismatch() {
        let cfg = ImageConfig::new().with_size_tolerance(1e9);
        let r = reconcile_images(&[img("d1", 0.0, 10.0)], &[img("d1", 4.0, 10.0)], &cfg);
        assert_eq!(r.num_size_mismatch, 1);
    }
}
