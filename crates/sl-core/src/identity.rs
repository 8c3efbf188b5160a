//! Identity of an observed shared instance.

use std::fmt;

/// Identity of a value: the address it lives at.
///
/// Two references to a sized, non-zero-sized `T` yield the same `InstanceId`
/// iff they point at the same allocation.  Providers never free an instance
/// while they are alive, so an address cannot be reused within one trial.
///
/// Zero-sized values carry no identity: every boxed `()` lives at the same
/// dangling address.  The harness refuses to run trials over them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(usize);

impl InstanceId {
    /// Identity of the value behind `value`.
    pub fn of<T>(value: &T) -> Self {
        Self(value as *const T as usize)
    }

    /// Raw address.
    pub fn addr(&self) -> usize {
        self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
