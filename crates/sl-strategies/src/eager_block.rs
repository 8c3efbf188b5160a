//! Eager initializer block.
//!
//! Same guarantees as [`EagerField`]; the one-time setup is written as an
//! explicit initializer procedure instead of a field expression.  The block
//! receives the still-empty instance slot and must fill it before the provider
//! exists.
//!
//! [`EagerField`]: crate::EagerField

use sl_core::{Error, Result, SingletonProvider, Strategy};
use tracing::debug;

/// Provider whose instance is set by an initializer block at construction.
#[derive(Debug)]
pub struct EagerBlock<T> {
    instance: T,
}

impl<T> EagerBlock<T> {
    /// Run `block` against an empty slot and hold whatever it stored.
    ///
    /// Returns `Error::Precondition` if the block leaves the slot empty.
    pub fn try_with_initializer(block: impl FnOnce(&mut Option<T>)) -> Result<Self> {
        debug!(strategy = %Strategy::EagerBlock, "running initializer block");
        let mut slot = None;
        block(&mut slot);
        match slot {
            Some(instance) => Ok(Self { instance }),
            None => Err(Error::Precondition(
                "initializer block left the instance unset".to_string(),
            )),
        }
    }

    /// Run an initializer block that always produces the instance.
    pub fn with_initializer(block: impl FnOnce() -> T) -> Self {
        debug!(strategy = %Strategy::EagerBlock, "running initializer block");
        Self { instance: block() }
    }

    /// The shared instance.
    pub fn get(&self) -> &T {
        &self.instance
    }
}

impl<T: Sync> SingletonProvider for EagerBlock<T> {
    type Shared = T;

    fn get(&self) -> &T {
        &self.instance
    }

    fn strategy(&self) -> Strategy {
        Strategy::EagerBlock
    }

    fn is_initialized(&self) -> bool {
        true
    }
}
