//! Cancellable, bounded-retry polling.
//!
//! Every wait evaluates its condition once immediately, then again after
//! each `interval` until the condition holds, the probe fails, the
//! [`CancellationToken`] fires (or the optional deadline passes), or
//! `max_tries` attempts have been made. A `max_tries` of 0 is treated as 1.
//!
//! Three shapes sit on top of the engine:
//!
//! - [`wait_for`]: the probe returns a bare `bool`.
//! - [`wait_for_ok`]: `Ok(())` is success, any `Err` means "not ready yet".
//! - [`wait_for_value`]: `Ok(Some(value))` is success and yields the value;
//!   `Ok(None)` and `Err(_)` keep waiting.
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use tarry_utils::wait::wait_for;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> tarry_core::Result<()> {
//! let cancel = CancellationToken::new();
//! let outcome = wait_for(&cancel, Duration::from_secs(2), 30, || service_ready()).await?;
//! println!("ready after {} tries", outcome.attempts);
//! # Ok(())
//! # }
//! # fn service_ready() -> bool { true }
//! ```

use crate::env::{lookup_env_parsed_in, EnvLookup, ProcessEnv};
use std::fmt::Display;
use std::time::Duration;
use tarry_core::{
    BoxError, CancelReason, Error, Result, ResultExt, DEFAULT_WAIT_INTERVAL,
    DEFAULT_WAIT_MAX_TRIES, TARRY_WAIT_INTERVAL_MS_VAR, TARRY_WAIT_MAX_TRIES_VAR,
};
use tokio::time::{sleep, sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Operating parameters of a single wait
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOptions {
    /// Time between the end of one attempt and the start of the next
    pub interval: Duration,
    /// Upper bound on attempts, including the immediate first one
    pub max_tries: u32,
    /// Overall time budget; when it elapses the wait is cancelled
    pub deadline: Option<Duration>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_WAIT_INTERVAL,
            max_tries: DEFAULT_WAIT_MAX_TRIES,
            deadline: None,
        }
    }
}

impl WaitOptions {
    pub fn new(interval: Duration, max_tries: u32) -> Self {
        Self {
            interval,
            max_tries,
            deadline: None,
        }
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// The number of attempts this wait will make at most
    pub fn effective_tries(&self) -> u32 {
        self.max_tries.max(1)
    }

    /// Read `TARRY_WAIT_INTERVAL_MS` and `TARRY_WAIT_MAX_TRIES` from the
    /// process environment, keeping defaults for absent or invalid values.
    pub fn from_env() -> Self {
        Self::from_env_in(&ProcessEnv)
    }

    pub fn from_env_in(lookup: &impl EnvLookup) -> Self {
        let defaults = Self::default();
        let interval = lookup_env_parsed_in::<u64>(lookup, TARRY_WAIT_INTERVAL_MS_VAR)
            .map(Duration::from_millis)
            .unwrap_or(defaults.interval);
        let max_tries = lookup_env_parsed_in::<u32>(lookup, TARRY_WAIT_MAX_TRIES_VAR)
            .unwrap_or(defaults.max_tries);

        Self {
            interval,
            max_tries,
            deadline: None,
        }
    }
}

/// A successful wait: the produced value and how many attempts it took
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOutcome<T> {
    pub value: T,
    pub attempts: u32,
}

/// Poll `condition` until it returns `Ok(true)`.
///
/// An `Err` from the condition aborts the wait immediately with
/// [`Error::Probe`]; it is not treated as "not ready yet".
pub async fn wait_until<F, E>(
    cancel: &CancellationToken,
    interval: Duration,
    max_tries: u32,
    condition: F,
) -> Result<WaitOutcome<()>>
where
    F: FnMut() -> std::result::Result<bool, E>,
    E: Into<BoxError>,
{
    wait_until_with(&WaitOptions::new(interval, max_tries), cancel, condition).await
}

/// [`wait_until`] driven by a [`WaitOptions`]
pub async fn wait_until_with<F, E>(
    options: &WaitOptions,
    cancel: &CancellationToken,
    mut condition: F,
) -> Result<WaitOutcome<()>>
where
    F: FnMut() -> std::result::Result<bool, E>,
    E: Into<BoxError>,
{
    let max_tries = options.effective_tries();
    let deadline = options.deadline.map(|budget| Instant::now() + budget);

    let mut attempts = 1;
    if evaluate(&mut condition, attempts, max_tries)? {
        return Ok(WaitOutcome {
            value: (),
            attempts,
        });
    }

    while attempts < max_tries {
        // The sleep futures live only inside this select, so every exit
        // path drops the pending timer.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(attempts, "wait cancelled");
                return Err(Error::cancelled(CancelReason::Cancelled, attempts));
            }
            _ = deadline_or_pending(deadline) => {
                debug!(attempts, "wait deadline exceeded");
                return Err(Error::cancelled(CancelReason::DeadlineExceeded, attempts));
            }
            _ = sleep(options.interval) => {}
        }

        attempts += 1;
        if evaluate(&mut condition, attempts, max_tries)? {
            return Ok(WaitOutcome {
                value: (),
                attempts,
            });
        }
    }

    warn!(tries = max_tries, "condition not met");
    Err(Error::exhausted(max_tries, None))
}

fn evaluate<F, E>(condition: &mut F, attempt: u32, max_tries: u32) -> Result<bool>
where
    F: FnMut() -> std::result::Result<bool, E>,
    E: Into<BoxError>,
{
    match condition() {
        Ok(true) => {
            debug!(attempt, "condition met");
            Ok(true)
        }
        Ok(false) => {
            debug!(attempt, max_tries, "condition not met yet");
            Ok(false)
        }
        Err(e) => Err(Error::probe(attempt, e)),
    }
}

/// Await the deadline if one is set, otherwise pend forever.
async fn deadline_or_pending(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}

/// Poll `op` until it returns `true`.
///
/// ```rust,no_run
/// # use std::time::Duration;
/// # use tokio_util::sync::CancellationToken;
/// # async fn example(cancel: CancellationToken) -> tarry_core::Result<()> {
/// tarry_utils::wait::wait_for(&cancel, Duration::from_millis(500), 20, || {
///     std::path::Path::new("/run/app.sock").exists()
/// })
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn wait_for<F>(
    cancel: &CancellationToken,
    interval: Duration,
    max_tries: u32,
    op: F,
) -> Result<WaitOutcome<()>>
where
    F: FnMut() -> bool,
{
    wait_for_with(&WaitOptions::new(interval, max_tries), cancel, op).await
}

pub async fn wait_for_with<F>(
    options: &WaitOptions,
    cancel: &CancellationToken,
    mut op: F,
) -> Result<WaitOutcome<()>>
where
    F: FnMut() -> bool,
{
    wait_until_with(options, cancel, || Ok::<_, BoxError>(op())).await
}

/// Poll `op` until it returns `Ok(())`.
///
/// Errors from `op` mean "not ready yet" and are never propagated; the most
/// recent one is reported in the [`Error::Exhausted`] message if every
/// attempt fails.
pub async fn wait_for_ok<F, E>(
    cancel: &CancellationToken,
    interval: Duration,
    max_tries: u32,
    op: F,
) -> Result<WaitOutcome<()>>
where
    F: FnMut() -> std::result::Result<(), E>,
    E: Display,
{
    wait_for_ok_with(&WaitOptions::new(interval, max_tries), cancel, op).await
}

pub async fn wait_for_ok_with<F, E>(
    options: &WaitOptions,
    cancel: &CancellationToken,
    mut op: F,
) -> Result<WaitOutcome<()>>
where
    F: FnMut() -> std::result::Result<(), E>,
    E: Display,
{
    let mut last_error = None;

    let result = wait_until_with(options, cancel, || match op() {
        Ok(()) => Ok::<_, BoxError>(true),
        Err(e) => {
            debug!(error = %e, "not ready yet");
            last_error = Some(e.to_string());
            Ok(false)
        }
    })
    .await;

    result.map_err(|e| attach_last_error(e, last_error))
}

/// Poll `op` until it produces a value.
///
/// `Ok(None)` and `Err(_)` both keep waiting; probe errors are treated as
/// retry-worthy exactly like [`wait_for_ok`].
pub async fn wait_for_value<T, F, E>(
    cancel: &CancellationToken,
    interval: Duration,
    max_tries: u32,
    op: F,
) -> Result<WaitOutcome<T>>
where
    F: FnMut() -> std::result::Result<Option<T>, E>,
    E: Display,
{
    wait_for_value_with(&WaitOptions::new(interval, max_tries), cancel, op).await
}

pub async fn wait_for_value_with<T, F, E>(
    options: &WaitOptions,
    cancel: &CancellationToken,
    mut op: F,
) -> Result<WaitOutcome<T>>
where
    F: FnMut() -> std::result::Result<Option<T>, E>,
    E: Display,
{
    let mut produced = None;
    let mut last_error = None;

    let result = wait_until_with(options, cancel, || match op() {
        Ok(Some(value)) => {
            produced = Some(value);
            Ok::<_, BoxError>(true)
        }
        Ok(None) => Ok(false),
        Err(e) => {
            debug!(error = %e, "no result yet");
            last_error = Some(e.to_string());
            Ok(false)
        }
    })
    .await;

    let outcome = result
        .map_err(|e| attach_last_error(e, last_error))
        .context("failed to get result")?;

    match produced {
        Some(value) => Ok(WaitOutcome {
            value,
            attempts: outcome.attempts,
        }),
        None => Err(Error::configuration(
            "condition reported success without producing a value",
        )),
    }
}

fn attach_last_error(error: Error, last_error: Option<String>) -> Error {
    match error {
        Error::Exhausted { tries, .. } => Error::exhausted(tries, last_error),
        other => other,
    }
}
