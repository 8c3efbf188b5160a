//! Naive lazy initialization.  **Not thread-safe.**
//!
//! `get` checks whether the instance is set and, if not, builds and publishes
//! it.  Single-threaded this is correct and defers the cost until first use.
//! Under concurrency two callers can both see "unset" and both construct;
//! each then returns the instance it built, so different callers can hold
//! different instances.  Kept as the baseline of what not to do.

use sl_core::{SingletonProvider, Strategy};

use crate::slot::Slot;

/// Unsynchronized check-then-construct provider.
pub struct NaiveLazy<T, F = fn() -> T> {
    slot: Slot<T>,
    init: F,
}

impl<T, F: Fn() -> T> NaiveLazy<T, F> {
    /// A provider that will build its instance with `init` on first access.
    pub const fn new(init: F) -> Self {
        Self {
            slot: Slot::new(),
            init,
        }
    }

    /// Number of instances that lost a publication race and were displaced.
    pub fn displaced(&self) -> usize {
        self.slot.orphans()
    }

    /// Return the instance, building it if this caller sees it unset.
    pub fn get(&self) -> &T {
        if let Some(instance) = self.slot.load() {
            return instance;
        }
        // Race window: other callers can pass the check above until this
        // publication lands.
        self.slot.publish((self.init)())
    }
}

impl<T, F> SingletonProvider for NaiveLazy<T, F>
where
    T: Send + Sync,
    F: Fn() -> T + Sync,
{
    type Shared = T;

    fn get(&self) -> &T {
        NaiveLazy::get(self)
    }

    fn strategy(&self) -> Strategy {
        Strategy::NaiveLazy
    }

    fn is_initialized(&self) -> bool {
        self.slot.is_set()
    }
}
