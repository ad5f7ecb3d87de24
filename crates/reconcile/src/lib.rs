//! # Content Reconciliation
//!
//! Compares the non-text content of two renderings of one document: the
//! embedded images ([`reconcile_images`]) and the font usages
//! ([`reconcile_fonts`]). Both are pure functions of their inputs and an
//! explicit configuration.
//!
//! ```
//! use content::ImageDescriptor;
//! use reconcile::{reconcile_images, ImageConfig};
//!
//! let a = [ImageDescriptor::new("d1", 100.0, 100.0)];
//! let b = [ImageDescriptor::new("d1", 100.0, 300.0)];
//! let r = reconcile_images(&a, &b, &ImageConfig::default());
//! assert!(r.correct_order);
//! assert_eq!(r.num_missing, 0);
//! assert_eq!(r.num_size_mismatch, 1);
//! ```
pub mod config;
pub mod fonts;
pub mod images;

pub use crate::config::{ImageConfig, ReconcileError, DEFAULT_SIZE_TOLERANCE};
pub use crate::fonts::{reconcile_fonts, FontReconciliation};
pub use crate::images::{
    dimension_mismatch, reconcile_images, DigestImbalance, ImageReconciliation, SizeMismatch,
};
