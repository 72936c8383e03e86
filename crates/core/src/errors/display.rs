//! Display implementations for error types

use super::types::{CancelReason, Error};
use std::fmt;

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Cancelled => write!(f, "cancelled"),
            CancelReason::DeadlineExceeded => write!(f, "deadline exceeded"),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Probe { attempt, source } => {
                write!(f, "condition failed with error on try {attempt}: {source}")
            }
            Error::Cancelled { reason, attempts } => {
                write!(f, "waiting canceled after {attempts} tries: {reason}")
            }
            Error::Exhausted { tries, last_error } => match last_error {
                Some(last) => write!(
                    f,
                    "condition not met after {tries} tries (last error: {last})"
                ),
                None => write!(f, "condition not met after {tries} tries"),
            },
            Error::Usage { message } => {
                write!(f, "invalid usage: {message}")
            }
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system {} operation failed for '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            Error::PathExpansion { path, message } => {
                write!(f, "failed to expand path '{path}': {message}")
            }
            Error::Json { message, .. } => {
                write!(f, "JSON error: {message}")
            }
            Error::Yaml { message, .. } => {
                write!(f, "YAML error: {message}")
            }
            Error::UnsupportedFormat { path, extension } => {
                write!(
                    f,
                    "unsupported file format '{}' for '{}' (expected .yaml, .yml, or .json)",
                    extension,
                    path.display()
                )
            }
            Error::EmptyDocument { path } => {
                write!(f, "decoded data from '{}' is empty", path.display())
            }
            Error::Template { message, .. } => {
                write!(f, "template error: {message}")
            }
            Error::Configuration { message } => {
                write!(f, "configuration error: {message}")
            }
            Error::Context { message, source } => {
                write!(f, "{message}: {source}")
            }
        }
    }
}
