//! Construction probe: counts how many times a shared instance is built.
//!
//! Providers under test are wired to a probe through their initializer, so the
//! probe sees every construction regardless of strategy.  An optional
//! artificial delay inside construction widens the race window of the racy
//! strategies.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tracing::debug;

/// A value produced by a [`ConstructionProbe`].
///
/// `serial` is the 1-based construction number: a correct provider only ever
/// hands out serial 1.
#[derive(Debug, PartialEq, Eq)]
pub struct ProbeInstance {
    serial: usize,
}

impl ProbeInstance {
    /// Construction number of this instance.
    pub fn serial(&self) -> usize {
        self.serial
    }
}

/// Counts constructions and optionally slows them down.
#[derive(Debug, Default)]
pub struct ConstructionProbe {
    constructions: AtomicUsize,
    delay: Duration,
}

impl ConstructionProbe {
    /// A probe that constructs instantly.
    pub fn new() -> Self {
        Self::default()
    }

    /// A probe that sleeps `delay` inside every construction.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            constructions: AtomicUsize::new(0),
            delay,
        }
    }

    /// Build a new instance, recording the construction.
    pub fn construct(&self) -> ProbeInstance {
        let serial = self.constructions.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(serial, delay_ms = self.delay.as_millis() as u64, "constructing probe instance");
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        ProbeInstance { serial }
    }

    /// Number of constructions so far.
    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::SeqCst)
    }

    /// Artificial construction delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
