//! Repeated trials against fresh providers.
//!
//! Each trial gets its own [`ConstructionProbe`] and a provider built around
//! it by the caller-supplied factory.  The probe is read twice: right after
//! the provider is built (eager strategies construct there, lazy ones must
//! not) and after the trial (the total number of constructions).

use std::fmt;
use std::sync::Arc;

use sl_core::{ConstructionProbe, Error, Result, SingletonProvider, Strategy};
use tracing::{info, warn};

use crate::config::StressConfig;
use crate::trial::run_trial_jittered;

/// What one trial observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialSummary {
    /// 0-based trial number.
    pub index: usize,
    /// Distinct identities handed to the callers.
    pub distinct: usize,
    /// Constructions recorded before any accessor call.
    pub constructions_at_setup: usize,
    /// Constructions recorded by the end of the trial.
    pub constructions: usize,
}

impl TrialSummary {
    /// `true` if the trial saw more than one instance or more than one
    /// construction.
    pub fn is_violation(&self) -> bool {
        self.distinct > 1 || self.constructions > 1
    }
}

/// Aggregate of a stress run.
#[derive(Debug, Clone)]
pub struct StressReport {
    strategy: Strategy,
    config: StressConfig,
    trials: Vec<TrialSummary>,
}

impl StressReport {
    /// Strategy under test.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Configuration the run used.
    pub fn config(&self) -> &StressConfig {
        &self.config
    }

    /// Per-trial results, in order.
    pub fn trials(&self) -> &[TrialSummary] {
        &self.trials
    }

    /// Number of trials that ran.  Lower than configured only when the run
    /// stopped on a violation.
    pub fn trials_run(&self) -> usize {
        self.trials.len()
    }

    /// Number of violating trials.
    pub fn violations(&self) -> usize {
        self.trials.iter().filter(|t| t.is_violation()).count()
    }

    /// Largest number of distinct identities seen in one trial.
    pub fn max_distinct(&self) -> usize {
        self.trials.iter().map(|t| t.distinct).max().unwrap_or(0)
    }

    /// Largest number of constructions seen in one trial.
    pub fn max_constructions(&self) -> usize {
        self.trials.iter().map(|t| t.constructions).max().unwrap_or(0)
    }

    /// `true` if at least one trial exposed the race.
    pub fn reproduced_race(&self) -> bool {
        self.violations() > 0
    }

    /// `true` if no trial constructed anything before the first call.
    pub fn was_lazy(&self) -> bool {
        self.trials.iter().all(|t| t.constructions_at_setup == 0)
    }

    /// `Ok` iff no trial violated the single-instance invariant.
    ///
    /// The first violating trial is reported; within it, seeing more than
    /// one identity takes precedence over constructing more than once.
    pub fn ensure_no_violations(&self) -> Result<()> {
        match self.trials.iter().find(|t| t.is_violation()) {
            None => Ok(()),
            Some(t) if t.distinct > 1 => Err(Error::Violation {
                strategy: self.strategy,
                expected: 1,
                observed: t.distinct,
            }),
            Some(t) => Err(Error::DuplicateConstruction {
                strategy: self.strategy,
                constructions: t.constructions,
            }),
        }
    }
}

impl fmt::Display for StressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}/{} trials violated (callers={}, delay={:?}, max distinct={}, max constructions={})",
            self.strategy,
            self.violations(),
            self.trials_run(),
            self.config.callers(),
            self.config.construction_delay(),
            self.max_distinct(),
            self.max_constructions(),
        )
    }
}

/// Run `config.trials()` trials, each against a fresh provider from
/// `make_provider`.
///
/// The factory receives the trial's probe and should route construction
/// through [`ConstructionProbe::construct`].  Providers that ignore the probe
/// report zero constructions.
pub fn stress<P, M>(config: &StressConfig, mut make_provider: M) -> Result<StressReport>
where
    P: SingletonProvider,
    M: FnMut(Arc<ConstructionProbe>) -> P,
{
    config.validate()?;
    let mut strategy = None;
    let mut trials = Vec::with_capacity(config.trials());
    for index in 0..config.trials() {
        let probe = Arc::new(ConstructionProbe::with_delay(config.construction_delay()));
        let provider = make_provider(Arc::clone(&probe));
        let constructions_at_setup = probe.constructions();
        strategy.get_or_insert(provider.strategy());

        let outcome = run_trial_jittered(&provider, config.callers(), config.jitter())?;
        let summary = TrialSummary {
            index,
            distinct: outcome.distinct(),
            constructions_at_setup,
            constructions: probe.constructions(),
        };
        trials.push(summary);

        if summary.is_violation() {
            warn!(
                strategy = %outcome.strategy(),
                trial = index,
                distinct = summary.distinct,
                constructions = summary.constructions,
                "single-instance invariant violated"
            );
            if config.stop_on_violation() {
                break;
            }
        }
    }

    let strategy = strategy.ok_or_else(|| Error::Precondition("no trial ran".to_string()))?;
    let report = StressReport {
        strategy,
        config: config.clone(),
        trials,
    };
    info!(%report, "stress run finished");
    Ok(report)
}
