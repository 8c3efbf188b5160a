//! One trial: N concurrent callers against one provider.
//!
//! Every caller is spawned first and parked on a start gate; the gate opens
//! once all of them exist, so they hit the accessor as close together as the
//! scheduler allows.  Each caller records the identity it was handed.  If a
//! spawn fails, the callers already parked are released and joined before
//! the error is returned.

use std::collections::BTreeMap;
use std::io;
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use rand::Rng;
use sl_core::{ensure, fail, Error, InstanceId, Result, SingletonProvider, Strategy};
use tracing::{debug, trace};

/// Identities observed by the callers of one trial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialOutcome {
    strategy: Strategy,
    observations: BTreeMap<InstanceId, usize>,
}

impl TrialOutcome {
    /// Strategy of the provider under test.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Number of distinct identities observed.
    pub fn distinct(&self) -> usize {
        self.observations.len()
    }

    /// Total number of calls recorded.
    pub fn calls(&self) -> usize {
        self.observations.values().sum()
    }

    /// How many callers observed each identity.
    pub fn observations(&self) -> &BTreeMap<InstanceId, usize> {
        &self.observations
    }

    /// `true` iff every caller observed the same instance.
    pub fn is_unique(&self) -> bool {
        self.distinct() == 1
    }

    /// `Ok` iff every caller observed the same instance.
    pub fn ensure_unique(&self) -> Result<()> {
        if self.is_unique() {
            Ok(())
        } else {
            Err(Error::Violation {
                strategy: self.strategy,
                expected: 1,
                observed: self.distinct(),
            })
        }
    }
}

/// Call the accessor once from each of `callers` threads released together.
pub fn run_trial<P: SingletonProvider>(provider: &P, callers: usize) -> Result<TrialOutcome> {
    run_trial_jittered(provider, callers, 0)
}

/// As [`run_trial`], with each caller yielding a random `0..=jitter` times
/// after release and before calling.
///
/// Fails with `Error::Precondition` if `P::Shared` is zero-sized: such
/// values share one address and cannot be told apart by [`InstanceId`].
pub fn run_trial_jittered<P: SingletonProvider>(
    provider: &P,
    callers: usize,
    jitter: u32,
) -> Result<TrialOutcome> {
    run_callers(provider, callers, jitter, callers)
}

/// Runs a trial in which at most `spawnable` caller threads can be started;
/// asking for more behaves like the OS refusing a thread.
fn run_callers<P: SingletonProvider>(
    provider: &P,
    callers: usize,
    jitter: u32,
    spawnable: usize,
) -> Result<TrialOutcome> {
    ensure!(callers > 0, "a trial needs at least one caller");
    ensure!(
        mem::size_of::<P::Shared>() > 0,
        "zero-sized shared instances have no identity to compare"
    );
    let strategy = provider.strategy();
    let gate = AtomicBool::new(false);

    let (spawn_error, joined) = thread::scope(|s| {
        let mut handles = Vec::with_capacity(callers);
        let mut spawn_error = None;
        for worker in 0..callers {
            let gate = &gate;
            let spawned = if worker < spawnable {
                thread::Builder::new()
                    .name(format!("caller-{worker}"))
                    .spawn_scoped(s, move || {
                        let spins = if jitter == 0 {
                            0
                        } else {
                            rand::thread_rng().gen_range(0..=jitter)
                        };
                        while !gate.load(Ordering::Acquire) {
                            thread::yield_now();
                        }
                        for _ in 0..spins {
                            thread::yield_now();
                        }
                        provider.observe()
                    })
            } else {
                Err(io::Error::other("caller thread limit reached"))
            };
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    spawn_error = Some((worker, e));
                    break;
                }
            }
        }
        // Opened and joined on every path: no caller outlives the scope
        // unjoined.
        trace!(spawned = handles.len(), "releasing callers");
        gate.store(true, Ordering::Release);
        let joined: Vec<thread::Result<InstanceId>> =
            handles.into_iter().map(|h| h.join()).collect();
        (spawn_error, joined)
    });

    if let Some((worker, e)) = spawn_error {
        fail!("failed to spawn caller {worker} of {callers}: {e}");
    }
    let mut observations = BTreeMap::new();
    for (worker, result) in joined.into_iter().enumerate() {
        let id = result.map_err(|_| Error::WorkerPanicked { worker })?;
        *observations.entry(id).or_insert(0) += 1;
    }
    debug!(%strategy, callers, distinct = observations.len(), "trial finished");
    Ok(TrialOutcome {
        strategy,
        observations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_core::ConstructionProbe;
    use sl_strategies::{DoubleChecked, EagerField, NaiveLazy};
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;
    use std::time::Duration;

    #[test]
    fn zero_callers_rejected() {
        let p = EagerField::new(1_u8);
        assert!(matches!(run_trial(&p, 0), Err(Error::Precondition(_))));
    }

    #[test]
    fn every_call_is_recorded() {
        let p = DoubleChecked::new(|| String::from("shared"));
        let outcome = run_trial(&p, 24).unwrap();
        assert_eq!(outcome.calls(), 24);
        assert!(outcome.is_unique());
        assert!(outcome.ensure_unique().is_ok());
        assert_eq!(outcome.strategy(), Strategy::DoubleChecked);
        let (id, count) = outcome.observations().iter().next().unwrap();
        assert_eq!(*id, InstanceId::of(p.get()));
        assert_eq!(*count, 24);
    }

    #[test]
    fn jitter_keeps_results_correct() {
        let p = DoubleChecked::new(|| 7_u32);
        let outcome = run_trial_jittered(&p, 16, 32).unwrap();
        assert_eq!(outcome.calls(), 16);
        assert!(outcome.is_unique());
    }

    #[test]
    fn zero_sized_instances_rejected() {
        static BUILDS: AtomicUsize = AtomicUsize::new(0);
        let p = NaiveLazy::new(|| {
            BUILDS.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(50));
        });
        let err = run_trial(&p, 64).unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
        assert!(err.to_string().contains("zero-sized"));
        // Rejected before any caller ran.
        assert_eq!(BUILDS.load(Ordering::SeqCst), 0);
        assert!(!p.is_initialized());
    }

    #[test]
    fn partial_spawn_joins_started_callers() {
        let probe = Arc::new(ConstructionProbe::new());
        let p = {
            let probe = probe.clone();
            DoubleChecked::new(move || probe.construct())
        };
        let err = run_callers(&p, 8, 0, 3).unwrap_err();
        assert_eq!(
            err,
            Error::Runtime(
                "failed to spawn caller 3 of 8: caller thread limit reached".to_string()
            )
        );
        // The three started callers were released and finished.
        assert_eq!(probe.constructions(), 1);
        assert!(p.is_set());
    }

    struct PanicsOnFirst(AtomicUsize, u64);

    impl SingletonProvider for PanicsOnFirst {
        type Shared = u64;

        fn get(&self) -> &u64 {
            if self.0.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("first caller fails");
            }
            &self.1
        }

        fn strategy(&self) -> Strategy {
            Strategy::Holder
        }

        fn is_initialized(&self) -> bool {
            true
        }
    }

    #[test]
    fn panicking_caller_in_partial_spawn_does_not_escape_scope() {
        let p = PanicsOnFirst(AtomicUsize::new(0), 9);
        let result = run_callers(&p, 4, 0, 2);
        assert!(matches!(result, Err(Error::Runtime(_))));

        let p = PanicsOnFirst(AtomicUsize::new(0), 9);
        let result = run_callers(&p, 4, 0, 4);
        assert!(matches!(result, Err(Error::WorkerPanicked { .. })));
    }
}
