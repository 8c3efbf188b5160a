//! The accessor contract every strategy implements.

use crate::identity::InstanceId;
use crate::strategy::Strategy;

/// A holder of one shared, immutable instance.
///
/// `get` takes no input and may be called from any number of threads at any
/// point of the provider's life.  There is no shutdown call: the instance
/// lives as long as the provider, and a `static` provider lives until the
/// program exits.
pub trait SingletonProvider: Sync {
    /// Type of the shared instance.
    type Shared;

    /// Return the shared instance, constructing it first if the strategy is
    /// lazy and no caller has done so yet.
    fn get(&self) -> &Self::Shared;

    /// Which strategy this provider implements.
    fn strategy(&self) -> Strategy;

    /// `true` once the shared instance has been constructed.
    ///
    /// Never triggers construction.
    fn is_initialized(&self) -> bool;

    /// Call [`get`][Self::get] and return the identity of the result.
    fn observe(&self) -> InstanceId {
        InstanceId::of(self.get())
    }
}

impl<P: SingletonProvider + ?Sized> SingletonProvider for &P {
    type Shared = P::Shared;

    fn get(&self) -> &Self::Shared {
        (**self).get()
    }

    fn strategy(&self) -> Strategy {
        (**self).strategy()
    }

    fn is_initialized(&self) -> bool {
        (**self).is_initialized()
    }
}
