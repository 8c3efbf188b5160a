//! Process-wide harness defaults.
//!
//! [`Settings`] holds the defaults a stress configuration starts from when a
//! caller does not override them: number of concurrent callers, number of
//! trials, artificial construction delay, and jitter.  It is itself a
//! process-wide singleton reached through a `std::sync::OnceLock`.
//!
//! Thread safety: the defaults sit behind a `Mutex` so they can be changed
//! from any thread.  Code that changes them should restore them when done,
//! most easily with a [`ScopedDefaults`] guard.

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::time::Duration;

/// Default values for a stress run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressDefaults {
    /// Concurrent callers per trial.
    pub callers: usize,
    /// Trials per stress run.
    pub trials: usize,
    /// Sleep inside every construction.
    pub construction_delay: Duration,
    /// Upper bound of random yields a caller performs before calling the
    /// accessor.
    pub jitter: u32,
}

impl StressDefaults {
    /// Built-in defaults: 64 callers, 32 trials, no delay, no jitter.
    pub const BUILT_IN: StressDefaults = StressDefaults {
        callers: 64,
        trials: 32,
        construction_delay: Duration::ZERO,
        jitter: 0,
    };
}

impl Default for StressDefaults {
    fn default() -> Self {
        Self::BUILT_IN
    }
}

/// Process-wide settings used by the singleton-lab harness.
pub struct Settings {
    defaults: Mutex<StressDefaults>,
}

static INSTANCE: OnceLock<Settings> = OnceLock::new();

impl Settings {
    /// Return a reference to the global singleton.
    pub fn instance() -> &'static Settings {
        INSTANCE.get_or_init(|| Settings {
            defaults: Mutex::new(StressDefaults::BUILT_IN),
        })
    }

    // The guarded value is plain `Copy` data, always whole.
    fn lock(&self) -> MutexGuard<'_, StressDefaults> {
        self.defaults.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current defaults.
    pub fn defaults(&self) -> StressDefaults {
        *self.lock()
    }

    /// Replace all defaults at once, returning the previous ones.
    pub fn set_defaults(&self, defaults: StressDefaults) -> StressDefaults {
        std::mem::replace(&mut *self.lock(), defaults)
    }

    /// Set the default number of concurrent callers.
    pub fn set_callers(&self, callers: usize) {
        self.lock().callers = callers;
    }

    /// Set the default number of trials.
    pub fn set_trials(&self, trials: usize) {
        self.lock().trials = trials;
    }

    /// Set the default artificial construction delay.
    pub fn set_construction_delay(&self, delay: Duration) {
        self.lock().construction_delay = delay;
    }

    /// Set the default jitter bound.
    pub fn set_jitter(&self, jitter: u32) {
        self.lock().jitter = jitter;
    }

    /// Restore the built-in defaults.
    pub fn reset(&self) {
        *self.lock() = StressDefaults::BUILT_IN;
    }
}

/// Overrides the process-wide defaults for its lifetime.
///
/// The previous defaults are restored on drop.
#[must_use = "the previous defaults are restored as soon as the guard is dropped"]
pub struct ScopedDefaults {
    previous: StressDefaults,
}

impl ScopedDefaults {
    /// Install `defaults` until the guard is dropped.
    pub fn new(defaults: StressDefaults) -> Self {
        Self {
            previous: Settings::instance().set_defaults(defaults),
        }
    }
}

impl Drop for ScopedDefaults {
    fn drop(&mut self) {
        Settings::instance().set_defaults(self.previous);
    }
}
