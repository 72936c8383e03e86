//! Core error type definitions

use std::path::PathBuf;

/// Result type alias for tarry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error produced by a caller-supplied probe
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why a wait stopped before its condition was met
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// The cancellation token was triggered by its owner
    Cancelled,
    /// The overall deadline of the wait elapsed
    DeadlineExceeded,
}

/// Core error type for tarry operations using thiserror
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The probe itself failed; the poll aborts without retrying
    Probe {
        attempt: u32,
        #[source]
        source: BoxError,
    },

    /// The wait was cancelled between attempts
    Cancelled { reason: CancelReason, attempts: u32 },

    /// Every attempt completed without the condition being met
    Exhausted {
        tries: u32,
        last_error: Option<String>,
    },

    /// Invalid call-time arguments
    Usage { message: String },

    /// File system operations
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// `~` or environment variable expansion failed
    PathExpansion { path: String, message: String },

    /// JSON serialization/deserialization errors
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML serialization/deserialization errors
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The file extension does not map to a known encoding
    UnsupportedFormat { path: PathBuf, extension: String },

    /// A decoded document carried no data
    EmptyDocument { path: PathBuf },

    /// A string template failed to parse or render
    Template {
        message: String,
        #[source]
        source: BoxError,
    },

    /// Configuration errors
    Configuration { message: String },

    /// Another error with a caller-supplied description attached
    Context {
        message: String,
        #[source]
        source: Box<Error>,
    },
}
