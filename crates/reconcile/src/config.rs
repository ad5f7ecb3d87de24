//! Configuration and error types for content reconciliation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default relative tolerance for image placement sizes (1 %).
pub const DEFAULT_SIZE_TOLERANCE: f64 = 0.01;

/// Configuration for [`reconcile_images`](crate::reconcile_images).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ImageConfig {
    /// Largest relative difference in width or height, measured against the
    /// smaller of the two values, that still counts as the same size.
    #[serde(default = "default_size_tolerance")]
    pub size_tolerance: f64,
}

impl ImageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size_tolerance(mut self, size_tolerance: f64) -> Self {
        self.size_tolerance = size_tolerance;
        self
    }

    pub fn validate(&self) -> Result<(), ReconcileError> {
        if !self.size_tolerance.is_finite() || self.size_tolerance < 0.0 {
            return Err(ReconcileError::InvalidTolerance(self.size_tolerance));
        }
        Ok(())
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            size_tolerance: default_size_tolerance(),
        }
    }
}

fn default_size_tolerance() -> f64 {
    DEFAULT_SIZE_TOLERANCE
}

/// Errors returned by the reconciliation stage.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReconcileError {
    #[error("invalid size tolerance {0}: must be finite and non-negative")]
    InvalidTolerance(f64),
}
