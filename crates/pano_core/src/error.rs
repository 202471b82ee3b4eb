//! Error types

use thiserror::Error;

/// Errors raised while loading or validating gallery configuration
///
/// The scroll coordinator itself never fails: uninitialized calls are no-ops
/// and bad parameters are clamped.
#[derive(Error, Debug)]
pub enum PanoError {
    /// Configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// Layout table references unknown breakpoints or is incomplete
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

/// Result type for Pano operations
pub type Result<T> = std::result::Result<T, PanoError>;
