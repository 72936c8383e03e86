//! File existence checks and waits built on the poller

use crate::wait::{wait_for_with, WaitOptions, WaitOutcome};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tarry_core::{Error, Result};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Whether `path` can be stat'ed
pub fn file_exists(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    match fs::metadata(path) {
        Ok(_) => true,
        Err(e) => {
            trace!(path = %path.display(), error = %e, "file not available");
            false
        }
    }
}

/// Whether every path exists, checked in a single pass.
///
/// An empty set trivially exists; use [`wait_for_files`] when an empty set
/// should be rejected.
pub fn files_exist<P: AsRef<Path>>(paths: &[P]) -> bool {
    paths.iter().all(file_exists)
}

/// Wait until `path` exists
pub async fn wait_for_file(
    cancel: &CancellationToken,
    interval: Duration,
    max_tries: u32,
    path: impl AsRef<Path>,
) -> Result<WaitOutcome<()>> {
    let path = path.as_ref();
    wait_for_with(&WaitOptions::new(interval, max_tries), cancel, || {
        file_exists(path)
    })
    .await
}

/// Wait until every path in `paths` exists at the same check.
///
/// Each attempt stats the whole set again, so a file that disappears
/// between attempts has to reappear before the wait succeeds.
pub async fn wait_for_files<P: AsRef<Path>>(
    cancel: &CancellationToken,
    interval: Duration,
    max_tries: u32,
    paths: &[P],
) -> Result<WaitOutcome<()>> {
    wait_for_files_with(&WaitOptions::new(interval, max_tries), cancel, paths).await
}

pub async fn wait_for_files_with<P: AsRef<Path>>(
    options: &WaitOptions,
    cancel: &CancellationToken,
    paths: &[P],
) -> Result<WaitOutcome<()>> {
    if paths.is_empty() {
        return Err(Error::usage("no files specified"));
    }

    wait_for_with(options, cancel, || files_exist(paths)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_files_exist() {
        let empty: [&Path; 0] = [];
        assert!(files_exist(&empty));

        let file1 = NamedTempFile::new().unwrap();
        let file2 = NamedTempFile::new().unwrap();
        assert!(files_exist(&[file1.path()]));
        assert!(files_exist(&[file1.path(), file2.path()]));
        assert!(!files_exist(&[
            file1.path(),
            Path::new("/path/to/nonexistent/file")
        ]));
        assert!(!file_exists("/path/to/nonexistent/file"));
    }

    #[tokio::test]
    async fn test_wait_for_files_rejects_empty_set() {
        let cancel = CancellationToken::new();
        let empty: Vec<String> = Vec::new();

        let err = wait_for_files(&cancel, Duration::from_millis(10), 3, &empty[..])
            .await
            .unwrap_err();

        assert!(err.is_usage());
        assert_eq!(err.to_string(), "invalid usage: no files specified");
    }

    #[tokio::test]
    async fn test_wait_for_existing_files() {
        let cancel = CancellationToken::new();
        let file1 = NamedTempFile::new().unwrap();
        let file2 = NamedTempFile::new().unwrap();

        let outcome = wait_for_files(
            &cancel,
            Duration::from_millis(10),
            3,
            &[file1.path(), file2.path()],
        )
        .await
        .unwrap();

        assert_eq!(outcome.attempts, 1);
    }

    #[tokio::test]
    async fn test_wait_for_files_created_later() {
        let cancel = CancellationToken::new();
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        fs::write(&first, "ready").unwrap();

        let late = second.clone();
        let writer = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            fs::write(&late, "ready").unwrap();
        });

        let outcome = wait_for_files(
            &cancel,
            Duration::from_millis(10),
            100,
            &[first.as_path(), second.as_path()],
        )
        .await
        .unwrap();

        writer.await.unwrap();
        assert!(outcome.attempts > 1);
    }

    #[tokio::test]
    async fn test_wait_for_missing_file_exhausts() {
        let cancel = CancellationToken::new();
        let dir = TempDir::new().unwrap();

        let err = wait_for_file(
            &cancel,
            Duration::from_millis(5),
            3,
            dir.path().join("never.txt"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::Exhausted { tries: 3, .. }));
    }

    #[tokio::test]
    async fn test_wait_for_file_cancelled() {
        let cancel = CancellationToken::new();
        let dir = TempDir::new().unwrap();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = wait_for_file(
            &cancel,
            Duration::from_millis(5),
            1_000,
            dir.path().join("never.txt"),
        )
        .await
        .unwrap_err();

        assert!(err.is_cancelled());
    }
}
