//! Synchronized construction block.  **Not thread-safe.**
//!
//! Only the construction is locked; the unset check before it is not.  Two
//! callers can both pass the check before either takes the lock, and each
//! then constructs in turn.  Moving the lock inside the check does not close
//! the race window of [`NaiveLazy`], it only serializes the duplicates.
//!
//! [`NaiveLazy`]: crate::NaiveLazy

use std::sync::{Mutex, PoisonError};

use sl_core::{SingletonProvider, Strategy};

use crate::slot::Slot;

/// Provider that locks the construction but not the check.
pub struct SynchronizedBlock<T, F = fn() -> T> {
    lock: Mutex<()>,
    slot: Slot<T>,
    init: F,
}

impl<T, F: Fn() -> T> SynchronizedBlock<T, F> {
    /// A provider that will build its instance with `init` on first access.
    pub const fn new(init: F) -> Self {
        Self {
            lock: Mutex::new(()),
            slot: Slot::new(),
            init,
        }
    }

    /// Number of instances that lost a publication race and were displaced.
    pub fn displaced(&self) -> usize {
        self.slot.orphans()
    }

    /// Return the instance; construction happens under the lock.
    pub fn get(&self) -> &T {
        if let Some(instance) = self.slot.load() {
            return instance;
        }
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        // No re-check: whoever reached this point constructs.
        self.slot.publish((self.init)())
    }
}

impl<T, F> SingletonProvider for SynchronizedBlock<T, F>
where
    T: Send + Sync,
    F: Fn() -> T + Sync,
{
    type Shared = T;

    fn get(&self) -> &T {
        SynchronizedBlock::get(self)
    }

    fn strategy(&self) -> Strategy {
        Strategy::SynchronizedBlock
    }

    fn is_initialized(&self) -> bool {
        self.slot.is_set()
    }
}
