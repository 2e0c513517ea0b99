//! Crate-level error type.

use crate::transport::TransportError;
use thiserror::Error;

/// Unified error for harness operations. Any of these ends the run; there
/// is no retry or recovery at this layer.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The device answered with bytes that are not valid UTF-8.
    #[error("response is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),
}

pub type AppResult<T> = Result<T, AppError>;
