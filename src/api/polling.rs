//! Fixed-interval polling of long-running server jobs
//!
//! This is the only place in the crate that repeats a request automatically.
//! Interval and timeout come from [`PollConfig`] so callers (and tests) decide
//! how patient to be.

use crate::ui::spinner::Spinner;
use log::{debug, warn};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;

/// Configuration for polling behavior
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
    pub show_spinner: bool,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            timeout: Duration::from_secs(15 * 60),
            show_spinner: true,
        }
    }
}

impl PollConfig {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self {
            interval,
            timeout,
            ..Self::default()
        }
    }

    /// No waiting between checks and no spinner, for tests
    pub fn immediate() -> Self {
        Self {
            interval: Duration::ZERO,
            timeout: Duration::from_secs(5),
            show_spinner: false,
        }
    }

    pub fn with_spinner(mut self, show_spinner: bool) -> Self {
        self.show_spinner = show_spinner;
        self
    }
}

/// Why a poll stopped without reaching the wanted state
#[derive(Debug, Error)]
pub enum PollError {
    #[error("timed out after {attempts} checks ({elapsed:?})")]
    TimedOut { attempts: u32, elapsed: Duration },

    #[error("status check failed on attempt {attempt}")]
    CheckFailed {
        attempt: u32,
        #[source]
        source: anyhow::Error,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Poller {
    config: PollConfig,
}

impl Poller {
    pub fn new(config: PollConfig) -> Self {
        Self { config }
    }

    /// Call `check` until `is_done` accepts its value. A failed check stops
    /// the poll immediately; only unfinished states are retried.
    pub async fn poll<F, Fut, T, P>(
        &self,
        message: &str,
        check: F,
        is_done: P,
    ) -> Result<T, PollError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
        P: Fn(&T) -> bool,
    {
        let _spinner = self
            .config
            .show_spinner
            .then(|| Spinner::start(message.to_string()));
        let started = Instant::now();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            debug!("Polling '{}' (attempt {})", message, attempt);

            let value = check()
                .await
                .map_err(|source| PollError::CheckFailed { attempt, source })?;

            if is_done(&value) {
                debug!("Poll '{}' finished after {} attempts", message, attempt);
                return Ok(value);
            }

            let elapsed = started.elapsed();
            if elapsed >= self.config.timeout {
                warn!(
                    "Poll '{}' timed out after {} attempts ({:?})",
                    message, attempt, elapsed
                );
                return Err(PollError::TimedOut {
                    attempts: attempt,
                    elapsed,
                });
            }

            tokio::time::sleep(self.config.interval).await;
        }
    }
}
