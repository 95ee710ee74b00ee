//! Error type shared by the primitives, transforms, persistence and samplers.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeomError>;

#[derive(Debug, Error)]
pub enum GeomError {
    /// Caller input could not be coerced to a fixed-length numeric array.
    #[error("cannot convert {input:?} to array: {reason}")]
    Shape { input: String, reason: String },

    /// Point/vector arithmetic outside the closure table.
    #[error("unsupported operation: {lhs} {op} {rhs}")]
    TypeMismatch {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },

    #[error("degenerate input: {reason}")]
    Degenerate { reason: String },

    #[error("not a rotation (det = {det}, max |R^T R - I| = {deviation})")]
    InvalidRotation { det: f64, deviation: f64 },

    #[error("invalid sampler params: {reason}")]
    InvalidParams { reason: String },

    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A rejection loop spent its round budget before collecting enough samples.
    #[error("{sampler} stalled after {rounds} rounds ({accepted}/{requested} accepted)")]
    SamplingStall {
        sampler: &'static str,
        rounds: usize,
        accepted: usize,
        requested: usize,
    },
}

impl GeomError {
    pub(crate) fn shape(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Shape {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::Degenerate {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for GeomError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for GeomError {
    fn from(err: std::io::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
