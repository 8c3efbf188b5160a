//! Lazy holder.
//!
//! The one-time initialization is delegated to `std::sync::OnceLock`: the
//! first caller from any thread runs the initializer, callers arriving during
//! construction block until it completes, and every later call is a plain
//! read.  No lock appears in this code.
//!
//! [`define_singleton!`] is the process-wide form: it generates an accessor
//! function whose body owns a function-local `static` holder, so nothing but
//! the accessor can reach the instance.

use std::sync::OnceLock;

use sl_core::{SingletonProvider, Strategy};

/// Provider backed by a `OnceLock` holder.
pub struct Holder<T, F = fn() -> T> {
    cell: OnceLock<T>,
    init: F,
}

impl<T, F: Fn() -> T> Holder<T, F> {
    /// A provider that will build its instance with `init` on first access.
    pub const fn new(init: F) -> Self {
        Self {
            cell: OnceLock::new(),
            init,
        }
    }

    /// Return the instance, running the initializer on the first call.
    pub fn get(&self) -> &T {
        self.cell.get_or_init(|| (self.init)())
    }
}

impl<T, F> SingletonProvider for Holder<T, F>
where
    T: Send + Sync,
    F: Fn() -> T + Sync,
{
    type Shared = T;

    fn get(&self) -> &T {
        Holder::get(self)
    }

    fn strategy(&self) -> Strategy {
        Strategy::Holder
    }

    fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// Define an accessor function for a lazily-initialised global singleton.
///
/// The instance lives in a function-local `static OnceLock` and is built on
/// the first call.
///
/// # Example
/// ```
/// use sl_strategies::define_singleton;
///
/// struct Registry { data: Vec<String> }
///
/// define_singleton! {
///     /// The process-wide registry.
///     pub fn registry() -> Registry = Registry { data: Vec::new() };
/// }
///
/// assert!(registry().data.is_empty());
/// assert!(std::ptr::eq(registry(), registry()));
/// ```
#[macro_export]
macro_rules! define_singleton {
    ($(#[$attr:meta])* $vis:vis fn $name:ident() -> $ty:ty = $init:expr;) => {
        $(#[$attr])*
        $vis fn $name() -> &'static $ty {
            static HOLDER: ::std::sync::OnceLock<$ty> = ::std::sync::OnceLock::new();
            HOLDER.get_or_init(|| $init)
        }
    };
}
