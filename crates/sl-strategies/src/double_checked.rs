//! Double-checked locking.
//!
//! 1. Acquire-load the instance pointer; if set, return it without locking.
//! 2. Otherwise take the lock.
//! 3. Check again under the lock.
//! 4. If still unset, construct and publish with a release store.
//! 5. Release the lock and return the instance.
//!
//! The acquire/release pair plays the part of a `volatile` field: a caller
//! that sees the pointer on the fast path also sees every write made while
//! constructing the value behind it.  This is the strategy to reach for
//! when the value is lazy, shared between threads, and read on a hot path.
//!
//! # Example
//! ```
//! use sl_strategies::DoubleChecked;
//!
//! struct Registry { names: Vec<&'static str> }
//!
//! fn build() -> Registry {
//!     Registry { names: vec!["alpha", "beta"] }
//! }
//!
//! static REGISTRY: DoubleChecked<Registry> = DoubleChecked::new(build);
//!
//! assert!(!REGISTRY.is_set());
//! assert_eq!(REGISTRY.get().names.len(), 2);
//! assert!(std::ptr::eq(REGISTRY.get(), REGISTRY.get()));
//! ```

use std::sync::{Mutex, PoisonError};

use sl_core::{SingletonProvider, Strategy};

use crate::slot::Slot;

/// Lazy provider with a lock-free fast path.
pub struct DoubleChecked<T, F = fn() -> T> {
    lock: Mutex<()>,
    slot: Slot<T>,
    init: F,
}

impl<T, F: Fn() -> T> DoubleChecked<T, F> {
    /// A provider that will build its instance with `init` on first access.
    pub const fn new(init: F) -> Self {
        Self {
            lock: Mutex::new(()),
            slot: Slot::new(),
            init,
        }
    }

    /// `true` once the instance has been published.
    pub fn is_set(&self) -> bool {
        self.slot.is_set()
    }

    /// Return the instance, constructing it exactly once.
    #[inline]
    pub fn get(&self) -> &T {
        match self.slot.load() {
            Some(instance) => instance,
            None => self.get_slow(),
        }
    }

    #[cold]
    fn get_slow(&self) -> &T {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(instance) = self.slot.load() {
            return instance;
        }
        self.slot.publish((self.init)())
    }
}

impl<T, F> SingletonProvider for DoubleChecked<T, F>
where
    T: Send + Sync,
    F: Fn() -> T + Sync,
{
    type Shared = T;

    fn get(&self) -> &T {
        DoubleChecked::get(self)
    }

    fn strategy(&self) -> Strategy {
        Strategy::DoubleChecked
    }

    fn is_initialized(&self) -> bool {
        self.is_set()
    }
}
