//! Data model for per-engine document content.
//!
//! These types describe what an external PDF-content extractor hands over for
//! one `(document, engine)` pair. They are plain values: built once, never
//! mutated, and compared structurally.
//!
//! # Type Hierarchy
//!
//! ```text
//! ContentSet
//! └── engine: EngineId → DocumentContent
//!     ├── text: String
//!     ├── images: Vec<ImageDescriptor>   (page order preserved)
//!     │   ├── digest: String             (content identity)
//!     │   ├── width: f64
//!     │   └── height: f64
//!     ├── fonts: BTreeSet<FontDescriptor>
//!     │   ├── family: String
//!     │   ├── flags: u32
//!     │   ├── color: u32
//!     │   └── size: FontSize             (quantized to FONT_SIZE_GRANULARITY)
//!     └── page_count: u32
//! ```
//!
//! # JSON Shape
//!
//! ```json
//! {
//!   "text": "Hello World",
//!   "images": [{ "digest": "9f2c", "width": 120.0, "height": 80.0 }],
//!   "fonts": [{ "family": "CMR10", "flags": 4, "color": 0, "size": 9.96 }],
//!   "pageCount": 1
//! }
//! ```

use std::collections::btree_map::{self, BTreeMap};
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;
use crate::pair::EngineId;

/// Font sizes are compared after rounding to this many points.
pub const FONT_SIZE_GRANULARITY: f64 = 0.01;

/// Descriptor of one embedded image occurrence.
///
/// Two descriptors are the same image iff their digests are equal; width and
/// height describe the placed size and only matter for size-mismatch checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub digest: String,
    pub width: f64,
    pub height: f64,
}

impl ImageDescriptor {
    pub fn new(digest: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            digest: digest.into(),
            width,
            height,
        }
    }
}

/// Font size quantized to [`FONT_SIZE_GRANULARITY`], stored as an integer so
/// that descriptors can be hashed and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FontSize(u64);

impl FontSize {
    pub fn from_points(points: f64) -> Result<Self, ContentError> {
        if !points.is_finite() || points < 0.0 {
            return Err(ContentError::InvalidFontSize(points));
        }
        Ok(Self((points / FONT_SIZE_GRANULARITY).round() as u64))
    }

    pub fn points(self) -> f64 {
        self.0 as f64 * FONT_SIZE_GRANULARITY
    }
}

impl TryFrom<f64> for FontSize {
    type Error = ContentError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_points(value)
    }
}

impl From<FontSize> for f64 {
    fn from(value: FontSize) -> Self {
        value.points()
    }
}

/// One distinct font usage (family, style flags, color, size).
///
/// Used only as a set member; equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FontDescriptor {
    pub family: String,
    pub flags: u32,
    pub color: u32,
    pub size: FontSize,
}

impl FontDescriptor {
    pub fn new(
        family: impl Into<String>,
        flags: u32,
        color: u32,
        size_points: f64,
    ) -> Result<Self, ContentError> {
        Ok(Self {
            family: family.into(),
            flags,
            color,
            size: FontSize::from_points(size_points)?,
        })
    }
}

/// Everything extracted from one engine's rendering of one document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentContent {
    pub text: String,
    #[serde(default)]
    pub images: Vec<ImageDescriptor>,
    #[serde(default)]
    pub fonts: BTreeSet<FontDescriptor>,
    #[serde(default)]
    pub page_count: u32,
}

impl DocumentContent {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    /// Reject descriptors that no comparison rule can interpret.
    ///
    /// Zero-sized images are valid (see the zero-transition rule of the image
    /// reconciler); empty digests and NaN, infinite or negative sizes are not.
    pub fn validate(&self) -> Result<(), ContentError> {
        for (index, image) in self.images.iter().enumerate() {
            if image.digest.is_empty() {
                return Err(ContentError::EmptyDigest { index });
            }
            let valid = |v: f64| v.is_finite() && v >= 0.0;
            if !valid(image.width) || !valid(image.height) {
                return Err(ContentError::InvalidDimension {
                    digest: image.digest.clone(),
                    width: image.width,
                    height: image.height,
                });
            }
        }
        Ok(())
    }
}

/// Content of one document keyed by engine.
///
/// An engine without an entry is "missing": its rendering failed or was never
/// produced. Absence is data, not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentSet {
    contents: BTreeMap<EngineId, DocumentContent>,
}

impl ContentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the content extracted for `engine`.
    pub fn insert(
        &mut self,
        engine: EngineId,
        content: DocumentContent,
    ) -> Result<(), ContentError> {
        content.validate()?;
        self.contents.insert(engine, content);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(
        mut self,
        engine: EngineId,
        content: DocumentContent,
    ) -> Result<Self, ContentError> {
        self.insert(engine, content)?;
        Ok(self)
    }

    pub fn get(&self, engine: &EngineId) -> Option<&DocumentContent> {
        self.contents.get(engine)
    }

    pub fn contains(&self, engine: &EngineId) -> bool {
        self.contents.contains_key(engine)
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn engines(&self) -> impl Iterator<Item = &EngineId> {
        self.contents.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, EngineId, DocumentContent> {
        self.contents.iter()
    }

    /// Validate every entry; used after deserializing a whole set at once.
    pub fn validate(&self) -> Result<(), ContentError> {
        self.contents.values().try_for_each(DocumentContent::validate)
    }
}
