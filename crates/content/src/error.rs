use thiserror::Error;

/// Errors raised while building or validating document content.
///
/// Degenerate but well-formed content (empty text, no images, zero-sized
/// images) is never an error; these variants cover input that cannot be
/// compared meaningfully at all.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ContentError {
    #[error("engine id must not be empty")]
    EmptyEngineId,
    #[error("invalid engine id {0:?}: must not contain '-' or whitespace")]
    InvalidEngineId(String),
    #[error("comparison pair must name two different engines (got {engine} twice)")]
    SamePairEngines { engine: String },
    #[error("invalid pair key {0:?}: expected \"<baseline>-<other>\"")]
    InvalidPairKey(String),
    #[error("image #{index} has an empty digest")]
    EmptyDigest { index: usize },
    #[error("image {digest} has invalid dimensions {width}x{height}")]
    InvalidDimension {
        digest: String,
        width: f64,
        height: f64,
    },
    #[error("invalid font size {0}: must be finite and non-negative")]
    InvalidFontSize(f64),
    #[error("invalid normalizer config: {0}")]
    InvalidNormalizer(String),
}
