//! Error types and result extensions for tarry operations

mod builders;
mod conversions;
mod display;
mod extensions;
mod types;

pub use extensions::*;
pub use types::{BoxError, CancelReason, Error, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_probe_error_preserves_source() {
        let err = Error::probe(3, io::Error::new(io::ErrorKind::Other, "disk gone"));
        assert!(err.is_probe());
        assert_eq!(
            err.to_string(),
            "condition failed with error on try 3: disk gone"
        );
        let source = err.source().expect("probe errors carry a source");
        assert_eq!(source.to_string(), "disk gone");
    }

    #[test]
    fn test_cancelled_error_keeps_reason() {
        let err = Error::cancelled(CancelReason::DeadlineExceeded, 2);
        assert!(err.is_cancelled());
        assert_eq!(err.cancel_reason(), Some(CancelReason::DeadlineExceeded));
        assert!(err.to_string().contains("deadline exceeded"));
        assert!(!err.is_exhausted());
    }

    #[test]
    fn test_exhausted_display() {
        assert_eq!(
            Error::exhausted(5, None).to_string(),
            "condition not met after 5 tries"
        );
        let with_last = Error::exhausted(2, Some("not ready".to_string()));
        assert!(with_last.to_string().ends_with("(last error: not ready)"));
        assert!(with_last.source().is_none());
    }

    #[test]
    fn test_context_wraps_message() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let err = result.context("loading settings").unwrap_err();
        assert!(matches!(err, Error::Context { .. }));
        assert_eq!(
            err.to_string(),
            "loading settings: file system unknown operation failed for '': missing"
        );
        assert!(matches!(err.root(), Error::FileSystem { .. }));
    }

    #[test]
    fn test_context_keeps_wait_predicates() {
        let result: Result<()> = Err(Error::cancelled(CancelReason::Cancelled, 1));
        let err = result
            .with_context(|| "failed to get result".to_string())
            .unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(err.cancel_reason(), Some(CancelReason::Cancelled));
        assert!(err.source().is_some_and(|s| s.to_string().contains("canceled")));
    }

    #[test]
    fn test_anyhow_conversion() {
        let err: Error = anyhow::anyhow!("boom").into();
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn test_yaml_conversion() {
        let parse: std::result::Result<u32, serde_yaml::Error> = serde_yaml::from_str("[unclosed");
        let err: Error = parse.unwrap_err().into();
        assert!(err.to_string().starts_with("YAML error:"));
    }
}
