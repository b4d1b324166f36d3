//! Error types for the utility helpers.

use thiserror::Error;

/// Errors that can occur while generating keys.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum KeygenError {
    /// The operating system's random source could not be read.
    #[error("Entropy source unavailable: {0}")]
    Entropy(String),
}
