//! # Rendering Fidelity: Document Content
//!
//! This crate holds the data that an external PDF-content extractor produces
//! for one `(document, engine)` pair, and the identifiers used to line two
//! engines up against each other.
//!
//! ## Contract
//!
//! - Content is immutable once extracted; one [`DocumentContent`] per engine.
//! - [`ContentSet`] maps engines to their content. A missing engine is a
//!   recorded absence, never a default-filled entry.
//! - [`ComparisonPair`] is the typed lookup key for every per-pair metric and
//!   serializes to a stable `"<baseline>-<other>"` string.
//! - [`TextNormalizer`] rewrites known extraction artefacts (ligatures,
//!   spacing accents) identically on both sides before comparison.
//!
//! No I/O happens here; deserializing content from JSON is the caller's job.
//!
//! ## Example
//!
//! ```
//! use content::{ContentSet, DocumentContent, EngineId, ImageDescriptor};
//!
//! let mut set = ContentSet::new();
//! let xe = EngineId::new("xe").unwrap();
//! set.insert(
//!     xe.clone(),
//!     DocumentContent {
//!         text: "Hello World".into(),
//!         images: vec![ImageDescriptor::new("d1", 100.0, 100.0)],
//!         page_count: 1,
//!         ..Default::default()
//!     },
//! )
//! .unwrap();
//!
//! assert!(set.contains(&xe));
//! assert!(!set.contains(&EngineId::new("pdf").unwrap()));
//! ```

mod error;
mod normalize;
mod pair;
mod types;

pub use crate::error::ContentError;
pub use crate::normalize::{join_pages, NormalizerConfig, TextNormalizer, UnicodeForm};
pub use crate::pair::{ComparisonPair, EngineId, PAIR_KEY_SEPARATOR};
pub use crate::types::{
    ContentSet, DocumentContent, FontDescriptor, FontSize, ImageDescriptor,
    FONT_SIZE_GRANULARITY,
};
