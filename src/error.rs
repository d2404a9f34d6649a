//! Crate error type.
//!
//! Every failure is terminal for the current effect session only, never
//! process-wide. A re-trigger on a busy target is *not* an error; it is the
//! [`crate::session::StartStatus::AlreadyRunning`] status.

/// Error raised by effect construction or surfaced through a session's
/// completion handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Required configuration is missing or out of range. Raised at
    /// invocation before any side effects are performed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The replacement image failed to load.
    #[error("image load failed: {src}")]
    ResourceLoad {
        /// Source path of the image that failed.
        src: String,
    },

    /// The replacement image did not load within the configured bound.
    #[error("image load timed out after {timeout_ms}ms: {src}")]
    ResourceTimeout {
        /// Source path of the image that timed out.
        src: String,
        /// The configured preload bound in milliseconds.
        timeout_ms: u64,
    },

    /// A DOM call failed on the JavaScript side.
    #[error("dom operation failed: {0}")]
    Dom(String),
}

impl Error {
    /// Shorthand for an [`Error::InvalidArgument`].
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}
