use content::ContentError;
use reconcile::ReconcileError;
use textdiff::TextDiffError;
use thiserror::Error;

/// Errors raised while configuring or running a fidelity comparison.
///
/// Missing engine content is not an error: such pairs are recorded in
/// [`FidelityReport::skipped`](crate::FidelityReport::skipped).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FidelityError {
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    #[error("text comparison error: {0}")]
    TextDiff(#[from] TextDiffError),

    #[error("reconciliation error: {0}")]
    Reconcile(#[from] ReconcileError),

    #[error("pair {pair} references unknown engine {engine}")]
    UnknownEngine { pair: String, engine: String },

    #[error("pair {0} is declared more than once")]
    DuplicatePair(String),

    #[error("engine {0} is declared more than once")]
    DuplicateEngine(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}
