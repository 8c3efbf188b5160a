//! Eager field: the instance is built together with the provider.
//!
//! Nothing can call `get` before the provider exists, so no synchronization
//! is needed.  The cost is paid even if the instance is never requested.
//!
//! # Example
//! ```
//! use sl_strategies::EagerField;
//!
//! struct Limits { max_connections: u32 }
//!
//! // Evaluated at compile time: built before any code runs.
//! static LIMITS: EagerField<Limits> = EagerField::new(Limits { max_connections: 64 });
//!
//! assert_eq!(LIMITS.get().max_connections, 64);
//! ```

use sl_core::{SingletonProvider, Strategy};
use tracing::debug;

/// Provider holding an instance built at provider construction.
#[derive(Debug)]
pub struct EagerField<T> {
    instance: T,
}

impl<T> EagerField<T> {
    /// Wrap an already constructed instance.
    ///
    /// `const`, so a `static` provider built from a constant expression is
    /// constructed at compile time.
    pub const fn new(instance: T) -> Self {
        Self { instance }
    }

    /// Run `init` now and hold its result.
    pub fn build(init: impl FnOnce() -> T) -> Self {
        debug!(strategy = %Strategy::EagerField, "constructing shared instance eagerly");
        Self { instance: init() }
    }

    /// The shared instance.
    pub fn get(&self) -> &T {
        &self.instance
    }
}

impl<T: Sync> SingletonProvider for EagerField<T> {
    type Shared = T;

    fn get(&self) -> &T {
        &self.instance
    }

    fn strategy(&self) -> Strategy {
        Strategy::EagerField
    }

    fn is_initialized(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_core::ConstructionProbe;

    #[test]
    fn built_before_first_call() {
        let probe = ConstructionProbe::new();
        let p = EagerField::build(|| probe.construct());
        assert_eq!(probe.constructions(), 1);
        assert!(p.is_initialized());
        let first = p.observe();
        for _ in 0..100 {
            assert_eq!(p.observe(), first);
        }
        assert_eq!(probe.constructions(), 1);
    }

    #[test]
    fn const_static_provider() {
        static ANSWER: EagerField<u64> = EagerField::new(42);
        assert_eq!(*ANSWER.get(), 42);
        assert!(std::ptr::eq(ANSWER.get(), ANSWER.get()));
    }
}
