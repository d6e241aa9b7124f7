//! Bounded polling for asynchronous UI state.
//!
//! A [`Waiter`] evaluates a predicate until its result is *satisfied* (see
//! [`WaitOutcome`]) or the time budget runs out. Running out is not an error:
//! the last result is handed back and the caller inspects it.
//!
//! ```text
//!            ┌──────────┐ satisfied ┌───────────┐
//!   start ──►│ Polling  ├──────────►│ Succeeded │
//!            └──┬────▲──┘           └───────────┘
//!   elapsed ≥   │    │ sleep(poll_interval)
//!   timeout     ▼    │
//!            ┌──────────┐
//!            │ TimedOut │
//!            └──────────┘
//! ```
//!
//! The deadline is checked between ticks only, so a wait can overrun its
//! budget by up to one poll interval plus one predicate evaluation.

use crate::locator::Locator;
use crate::result::{ProbarError, ProbarResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for wait operations (5 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;

/// Default polling interval (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Options for wait operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Reject options a wait loop cannot run with
    pub fn validate(&self) -> ProbarResult<()> {
        if self.poll_interval_ms == 0 {
            return Err(ProbarError::contract(
                "wait poll interval must be greater than zero",
            ));
        }
        Ok(())
    }
}

// =============================================================================
// WAIT OUTCOME
// =============================================================================

/// Decides whether a predicate result ends the wait
///
/// Booleans must be `true`, numbers non-zero, strings and collections
/// non-empty, options `Some` of a satisfied value, results `Ok` of a
/// satisfied value.
pub trait WaitOutcome {
    /// Check if this value ends the wait
    fn is_satisfied(&self) -> bool;
}

impl WaitOutcome for bool {
    fn is_satisfied(&self) -> bool {
        *self
    }
}

macro_rules! impl_numeric_outcome {
    ($($t:ty),*) => {
        $(impl WaitOutcome for $t {
            fn is_satisfied(&self) -> bool {
                *self != 0
            }
        })*
    };
}

impl_numeric_outcome!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl WaitOutcome for str {
    fn is_satisfied(&self) -> bool {
        !self.is_empty()
    }
}

impl WaitOutcome for String {
    fn is_satisfied(&self) -> bool {
        !self.is_empty()
    }
}

impl WaitOutcome for Locator {
    fn is_satisfied(&self) -> bool {
        !self.as_str().is_empty()
    }
}

impl<T> WaitOutcome for [T] {
    fn is_satisfied(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> WaitOutcome for Vec<T> {
    fn is_satisfied(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: WaitOutcome> WaitOutcome for Option<T> {
    fn is_satisfied(&self) -> bool {
        self.as_ref().is_some_and(WaitOutcome::is_satisfied)
    }
}

impl<T: WaitOutcome, E> WaitOutcome for Result<T, E> {
    fn is_satisfied(&self) -> bool {
        self.as_ref().is_ok_and(WaitOutcome::is_satisfied)
    }
}

impl<T: WaitOutcome + ?Sized> WaitOutcome for &T {
    fn is_satisfied(&self) -> bool {
        (**self).is_satisfied()
    }
}

// =============================================================================
// WAIT RESULT
// =============================================================================

/// Polling loop states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitState {
    /// Still evaluating the predicate
    Polling,
    /// The predicate returned a satisfied value
    Succeeded,
    /// The budget ran out
    TimedOut,
}

impl fmt::Display for WaitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polling => write!(f, "polling"),
            Self::Succeeded => write!(f, "succeeded"),
            Self::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Result of a wait operation
#[derive(Debug, Clone)]
pub struct WaitResult<T> {
    /// Last value the predicate returned
    pub value: T,
    /// Final state (`Succeeded` or `TimedOut`)
    pub state: WaitState,
    /// Number of predicate evaluations
    pub attempts: u32,
    /// Time spent waiting
    pub elapsed: Duration,
}

impl<T> WaitResult<T> {
    /// Check if the predicate was satisfied
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.state == WaitState::Succeeded
    }

    /// Consume into the predicate's last value
    pub fn into_value(self) -> T {
        self.value
    }
}

// =============================================================================
// WAITER IMPLEMENTATION
// =============================================================================

/// Waiter for synchronization operations
#[derive(Debug, Clone, Default)]
pub struct Waiter {
    options: WaitOptions,
}

impl Waiter {
    /// Create a new waiter with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom options
    #[must_use]
    pub const fn with_options(options: WaitOptions) -> Self {
        Self { options }
    }

    /// Get the options
    #[must_use]
    pub const fn options(&self) -> &WaitOptions {
        &self.options
    }

    /// Poll `predicate` until it is satisfied or the timeout elapses.
    ///
    /// The predicate runs at least once, even with a zero timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ProbarError::ContractViolation`] for invalid options, before
    /// the predicate is evaluated.
    pub fn poll<T, F>(&self, mut predicate: F) -> ProbarResult<WaitResult<T>>
    where
        T: WaitOutcome,
        F: FnMut() -> T,
    {
        self.options.validate()?;

        let start = Instant::now();
        let timeout = self.options.timeout();
        let poll_interval = self.options.poll_interval();
        let mut state = WaitState::Polling;
        let mut attempts = 0_u32;

        loop {
            let value = predicate();
            attempts += 1;
            tracing::trace!(target: "probar::wait", attempts, %state, "evaluated wait predicate");

            if value.is_satisfied() {
                state = WaitState::Succeeded;
            } else if start.elapsed() >= timeout {
                state = WaitState::TimedOut;
            }

            if state != WaitState::Polling {
                let elapsed = start.elapsed();
                tracing::debug!(
                    target: "probar::wait",
                    %state,
                    attempts,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "wait finished"
                );
                return Ok(WaitResult {
                    value,
                    state,
                    attempts,
                    elapsed,
                });
            }

            std::thread::sleep(poll_interval);
        }
    }
}

// =============================================================================
// CONVENIENCE FUNCTIONS
// =============================================================================

/// Poll `predicate` with the default interval and return its last value
pub fn wait_until<T, F>(timeout_ms: u64, predicate: F) -> ProbarResult<T>
where
    T: WaitOutcome,
    F: FnMut() -> T,
{
    let options = WaitOptions::new().with_timeout(timeout_ms);
    Waiter::with_options(options)
        .poll(predicate)
        .map(WaitResult::into_value)
}

// =============================================================================
// TESTS
// =============================================================================
