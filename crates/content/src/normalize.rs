//! Pre-comparison text normalization.
//!
//! Text extractors disagree on artefacts that are not rendering differences at
//! all: a ligature glyph extracted as `ﬁ` by one engine and as `fi` by another,
//! or a spacing diaeresis emitted before its base letter instead of a composed
//! `ö`. [`TextNormalizer`] rewrites both sides the same way before they are
//! diffed so those artefacts never reach the edit-script stage.
//!
//! # Order of Operations
//!
//! 1. Optional Unicode normalization ([`UnicodeForm`]).
//! 2. Literal replacements, in declared order, each over the whole text.
//!
//! # Examples
//!
//! ```rust
//! use content::{NormalizerConfig, TextNormalizer};
//!
//! let normalizer = TextNormalizer::new(NormalizerConfig::default()).unwrap();
//! assert_eq!(normalizer.normalize("e\u{FB03}cient"), "efficient");
//! assert_eq!(normalizer.normalize("K\u{00A8}onig"), "König");
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::ContentError;

/// Unicode normalization form applied before replacements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnicodeForm {
    /// Leave code points untouched.
    #[default]
    None,
    /// Canonical composition.
    Nfc,
    /// Compatibility composition. Also folds ligatures, superscripts and
    /// full-width forms, which may hide real differences.
    Nfkc,
}

/// Configuration for [`TextNormalizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// When false, text is compared verbatim.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub unicode_form: UnicodeForm,
    /// Ordered `(from, to)` literal rewrites.
    #[serde(default = "default_replacements")]
    pub replacements: Vec<(String, String)>,
}

impl NormalizerConfig {
    /// A configuration that leaves text untouched.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            unicode_form: UnicodeForm::None,
            replacements: Vec::new(),
        }
    }

    pub fn with_unicode_form(mut self, form: UnicodeForm) -> Self {
        self.unicode_form = form;
        self
    }

    /// Append a rewrite after the existing ones.
    pub fn with_replacement(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.replacements.push((from.into(), to.into()));
        self
    }

    /// Opt in to rejoining words hyphenated across a line break:
    /// `"hyphen-\nated"` becomes `"hyphen\nated"`, so one engine breaking a
    /// word where another does not is no longer a difference.
    pub fn with_hyphen_breaks_joined(self) -> Self {
        self.with_replacement(HYPHEN_BREAK.0, HYPHEN_BREAK.1)
    }

    /// Opt in to dropping both phi glyphs, which extractors map
    /// inconsistently between `ϕ` and `φ`.
    pub fn with_phi_removed(self) -> Self {
        PHI_GLYPHS
            .iter()
            .fold(self, |cfg, glyph| cfg.with_replacement(*glyph, ""))
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if let Some(pos) = self.replacements.iter().position(|(from, _)| from.is_empty()) {
            return Err(ContentError::InvalidNormalizer(format!(
                "replacement #{pos} has an empty pattern"
            )));
        }
        Ok(())
    }
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            unicode_form: UnicodeForm::None,
            replacements: default_replacements(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

const HYPHEN_BREAK: (&str, &str) = ("-\n", "\n");

const PHI_GLYPHS: [&str; 2] = ["\u{03D5}", "\u{03C6}"];

/// Ligatures first so that accent rules see plain letters.
const LIGATURES: [(&str, &str); 5] = [
    ("\u{FB00}", "ff"),
    ("\u{FB01}", "fi"),
    ("\u{FB02}", "fl"),
    ("\u{FB03}", "ffi"),
    ("\u{FB04}", "ffl"),
];

/// Spacing accents emitted ahead of their base letter by some extractors.
const SPACING_ACCENTS: [(&str, &str); 5] = [
    ("\u{00A8}o", "\u{00F6}"),
    ("\u{00A8}a", "\u{00E4}"),
    ("\u{00A8}u", "\u{00FC}"),
    ("\u{02DA}a", "\u{00E5}"),
    ("\u{02DA}A", "\u{00C5}"),
];

fn default_replacements() -> Vec<(String, String)> {
    LIGATURES
        .iter()
        .chain(SPACING_ACCENTS.iter())
        .map(|(from, to)| (from.to_string(), to.to_string()))
        .collect()
}

/// Applies a validated [`NormalizerConfig`] to text.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    cfg: NormalizerConfig,
}

impl TextNormalizer {
    pub fn new(cfg: NormalizerConfig) -> Result<Self, ContentError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.cfg
    }

    /// Normalize `text`, borrowing it when nothing changes.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !self.cfg.enabled {
            return Cow::Borrowed(text);
        }

        let mut out: Cow<'a, str> = match self.cfg.unicode_form {
            UnicodeForm::None => Cow::Borrowed(text),
            UnicodeForm::Nfc => Cow::Owned(text.nfc().collect()),
            UnicodeForm::Nfkc => Cow::Owned(text.nfkc().collect()),
        };

        for (from, to) in &self.cfg.replacements {
            if out.contains(from.as_str()) {
                out = Cow::Owned(out.replace(from.as_str(), to));
            }
        }
        out
    }
}

/// Join per-page text with `delimiter`, the way a page-aware extractor would
/// before handing a single stream over for comparison.
pub fn join_pages<S: AsRef<str>>(pages: &[S], delimiter: &str) -> String {
    let capacity: usize = pages
        .iter()
        .map(|p| p.as_ref().len() + delimiter.len())
        .sum();
    let mut joined = String::with_capacity(capacity);
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            joined.push_str(delimiter);
        }
        joined.push_str(page.as_ref());
    }
    joined
}
