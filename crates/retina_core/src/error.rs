//! Error types for morphology generation.
//!
//! Growth dead-ends are ordinary control flow (see [`crate::segment::Growth`])
//! and never surface here. These variants cover invalid input and numerical
//! guards only.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MorphologyError {
    /// Configuration rejected before growth started
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Growth finished without emitting a single compartment
    #[error("Morphology grew no compartments")]
    EmptyArbor,

    /// A diffusion row could not be normalized
    #[error("Degenerate diffusion row {row}: sum = {sum}")]
    DegenerateDiffusionRow { row: usize, sum: f64 },
}

/// Result type alias for morphology operations.
pub type Result<T> = std::result::Result<T, MorphologyError>;

impl MorphologyError {
    #[must_use]
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

impl From<anyhow::Error> for MorphologyError {
    fn from(err: anyhow::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}
