//! Builder methods for creating errors with context

use super::types::{BoxError, CancelReason, Error};
use std::path::PathBuf;

// Helper methods for creating errors with context
impl Error {
    /// Create a probe error for the given attempt
    #[must_use]
    pub fn probe(attempt: u32, source: impl Into<BoxError>) -> Self {
        Error::Probe {
            attempt,
            source: source.into(),
        }
    }

    /// Create a cancellation error
    #[must_use]
    pub fn cancelled(reason: CancelReason, attempts: u32) -> Self {
        Error::Cancelled { reason, attempts }
    }

    /// Create a try exhaustion error
    #[must_use]
    pub fn exhausted(tries: u32, last_error: Option<String>) -> Self {
        Error::Exhausted { tries, last_error }
    }

    /// Create a usage error
    #[must_use]
    pub fn usage(message: impl Into<String>) -> Self {
        Error::Usage {
            message: message.into(),
        }
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a path expansion error
    #[must_use]
    pub fn path_expansion(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::PathExpansion {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an unsupported format error
    #[must_use]
    pub fn unsupported_format(path: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Error::UnsupportedFormat {
            path: path.into(),
            extension: extension.into(),
        }
    }

    /// Create an empty document error
    #[must_use]
    pub fn empty_document(path: impl Into<PathBuf>) -> Self {
        Error::EmptyDocument { path: path.into() }
    }

    /// Create a template error wrapping the engine's failure
    #[must_use]
    pub fn template(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Template {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Attach a description to an existing error
    #[must_use]
    pub fn with_message(self, message: impl Into<String>) -> Self {
        Error::Context {
            message: message.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, looking through `Context` layers
    #[must_use]
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether the wait stopped because of cancellation or a deadline
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self.root(), Error::Cancelled { .. })
    }

    /// Whether every attempt ran without success
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self.root(), Error::Exhausted { .. })
    }

    /// Whether the probe itself reported a failure
    #[must_use]
    pub fn is_probe(&self) -> bool {
        matches!(self.root(), Error::Probe { .. })
    }

    /// Whether the call was rejected for invalid arguments
    #[must_use]
    pub fn is_usage(&self) -> bool {
        matches!(self.root(), Error::Usage { .. })
    }

    /// Cancellation reason, if this is a cancellation error
    #[must_use]
    pub fn cancel_reason(&self) -> Option<CancelReason> {
        match self.root() {
            Error::Cancelled { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}
