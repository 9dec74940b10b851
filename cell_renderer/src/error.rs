//! Error types for the Cell renderer
//!
//! This module defines the error type used throughout the renderer,
//! including backend failures, invalid resources and misuse of the
//! frame pipeline.

use std::fmt;

/// Result type for Cell renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Cell renderer errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (graphics API, device lock, submission)
    BackendError(String),

    /// Invalid resource (texture, shader, mesh, render target, material)
    InvalidResource(String),

    /// Initialization failed (renderer, targets, material library)
    InitializationFailed(String),

    /// Operation not valid in the current renderer state
    InvalidOperation(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an ERROR message and build an `Error::InvalidOperation` from it
///
/// # Example
///
/// ```ignore
/// let err = engine_err!("cell::Renderer", "Render target {} missing", name);
/// ```
#[macro_export]
macro_rules! engine_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::engine_error!($source, "{}", message);
        $crate::cell::Error::InvalidOperation(message)
    }};
}

/// Log an ERROR message and return early with an `Error::InvalidOperation`
///
/// # Example
///
/// ```ignore
/// if width == 0 {
///     engine_bail!("cell::RendererConfig", "Render width must be non-zero");
/// }
/// ```
#[macro_export]
macro_rules! engine_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::engine_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
