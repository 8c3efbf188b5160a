//! Fully synchronized accessor.
//!
//! Every call takes the lock for the whole check-construct-return sequence.
//! Correct, but callers keep paying for the lock long after the instance
//! exists; compare the `accessor` bench against [`DoubleChecked`].
//!
//! [`DoubleChecked`]: crate::DoubleChecked

use std::sync::{Mutex, PoisonError};

use sl_core::{SingletonProvider, Strategy};

use crate::slot::Slot;

/// Provider whose accessor is serialized by one lock.
pub struct SynchronizedAccessor<T, F = fn() -> T> {
    lock: Mutex<()>,
    slot: Slot<T>,
    init: F,
}

impl<T, F: Fn() -> T> SynchronizedAccessor<T, F> {
    /// A provider that will build its instance with `init` on first access.
    pub const fn new(init: F) -> Self {
        Self {
            lock: Mutex::new(()),
            slot: Slot::new(),
            init,
        }
    }

    /// Return the instance, holding the lock for the entire call.
    pub fn get(&self) -> &T {
        // A panicking initializer poisons the lock but leaves the slot empty.
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(instance) = self.slot.load() {
            return instance;
        }
        self.slot.publish((self.init)())
    }
}

impl<T, F> SingletonProvider for SynchronizedAccessor<T, F>
where
    T: Send + Sync,
    F: Fn() -> T + Sync,
{
    type Shared = T;

    fn get(&self) -> &T {
        SynchronizedAccessor::get(self)
    }

    fn strategy(&self) -> Strategy {
        Strategy::SynchronizedAccessor
    }

    fn is_initialized(&self) -> bool {
        self.slot.is_set()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_core::ConstructionProbe;
    use std::collections::HashSet;
    use std::sync::{Arc, Barrier};
    use std::time::Duration;

    #[test]
    fn lazy_and_idempotent() {
        let probe = Arc::new(ConstructionProbe::new());
        let p = {
            let probe = probe.clone();
            SynchronizedAccessor::new(move || probe.construct())
        };
        assert_eq!(probe.constructions(), 0);
        let first = p.observe();
        for _ in 0..100 {
            assert_eq!(p.observe(), first);
        }
        assert_eq!(probe.constructions(), 1);
        assert_eq!(p.get().serial(), 1);
    }

    #[test]
    fn concurrent_callers_see_one_instance() {
        let probe = Arc::new(ConstructionProbe::with_delay(Duration::from_millis(20)));
        let p = {
            let probe = probe.clone();
            SynchronizedAccessor::new(move || probe.construct())
        };
        let barrier = Barrier::new(32);
        let ids: HashSet<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..32)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        p.observe()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(ids.len(), 1);
        assert_eq!(probe.constructions(), 1);
    }

    #[test]
    fn recovers_after_panicking_initializer() {
        use std::sync::atomic::{AtomicBool, Ordering};

        let fail = AtomicBool::new(true);
        let p = SynchronizedAccessor::new(|| {
            if fail.swap(false, Ordering::SeqCst) {
                panic!("first construction fails");
            }
            42_u32
        });
        let first = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| *p.get()));
        assert!(first.is_err());
        assert!(!p.is_initialized());
        assert_eq!(*p.get(), 42);
    }
}
