//! Stress-run configuration.
//!
//! A [`StressConfig`] starts from the process-wide defaults held by
//! [`sl_core::Settings`] and is adjusted through [`StressConfigBuilder`].

use std::time::Duration;

use sl_core::{ensure, Result, Settings};

/// Parameters of one stress run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressConfig {
    callers: usize,
    trials: usize,
    construction_delay: Duration,
    jitter: u32,
    stop_on_violation: bool,
}

impl StressConfig {
    /// Start a builder from the current process-wide defaults.
    pub fn builder() -> StressConfigBuilder {
        StressConfigBuilder {
            config: StressConfig::default(),
        }
    }

    /// Concurrent callers per trial.
    pub fn callers(&self) -> usize {
        self.callers
    }

    /// Number of trials, each against a fresh provider.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Sleep inside every construction.
    pub fn construction_delay(&self) -> Duration {
        self.construction_delay
    }

    /// Upper bound of random yields before each call.
    pub fn jitter(&self) -> u32 {
        self.jitter
    }

    /// Whether the run ends at the first violating trial.
    pub fn stop_on_violation(&self) -> bool {
        self.stop_on_violation
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure!(
            self.callers > 0,
            "a trial needs at least one caller, got {}",
            self.callers
        );
        ensure!(
            self.trials > 0,
            "a stress run needs at least one trial, got {}",
            self.trials
        );
        Ok(())
    }
}

impl Default for StressConfig {
    /// The process-wide defaults, running every trial.
    fn default() -> Self {
        let defaults = Settings::instance().defaults();
        Self {
            callers: defaults.callers,
            trials: defaults.trials,
            construction_delay: defaults.construction_delay,
            jitter: defaults.jitter,
            stop_on_violation: false,
        }
    }
}

/// Builder for [`StressConfig`].
///
/// # Example
/// ```
/// use std::time::Duration;
/// use sl_harness::StressConfig;
///
/// let config = StressConfig::builder()
///     .callers(100)
///     .trials(10)
///     .construction_delay(Duration::from_millis(50))
///     .build()
///     .unwrap();
/// assert_eq!(config.callers(), 100);
/// assert!(StressConfig::builder().callers(0).build().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StressConfigBuilder {
    config: StressConfig,
}

impl StressConfigBuilder {
    /// Set the number of concurrent callers per trial.
    pub fn callers(mut self, callers: usize) -> Self {
        self.config.callers = callers;
        self
    }

    /// Set the number of trials.
    pub fn trials(mut self, trials: usize) -> Self {
        self.config.trials = trials;
        self
    }

    /// Set the artificial construction delay.
    pub fn construction_delay(mut self, delay: Duration) -> Self {
        self.config.construction_delay = delay;
        self
    }

    /// Set the jitter bound (`0` disables jitter).
    pub fn jitter(mut self, jitter: u32) -> Self {
        self.config.jitter = jitter;
        self
    }

    /// End the run at the first violating trial.
    pub fn stop_on_violation(mut self, stop: bool) -> Self {
        self.config.stop_on_violation = stop;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<StressConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
