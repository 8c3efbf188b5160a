//! Error types for singleton-lab.
//!
//! Accessors never fail: constructing the shared value is infallible.  The
//! errors here describe harness misuse and, above all, the correctness
//! defect of the racy strategies (more than one instance observed), which is
//! reported as a value instead of being masked.  The `ensure!` and `fail!`
//! macros are the short forms used for preconditions and runtime failures.

use thiserror::Error;

use crate::strategy::Strategy;

/// The top-level error type used throughout singleton-lab.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Failure of the environment the harness runs in (e.g. thread spawn).
    #[error("{0}")]
    Runtime(String),

    /// Precondition violated (harness misuse, empty initializer slot, ...).
    #[error("precondition not satisfied: {0}")]
    Precondition(String),

    /// Concurrent callers observed more than one instance.
    #[error("{strategy}: expected {expected} distinct instance, observed {observed}")]
    Violation {
        /// Strategy under test.
        strategy: Strategy,
        /// Number of identities a correct provider yields (always 1).
        expected: usize,
        /// Number of distinct identities actually observed.
        observed: usize,
    },

    /// The initializer ran more than once for a single provider.
    #[error("{strategy}: shared instance constructed {constructions} times")]
    DuplicateConstruction {
        /// Strategy under test.
        strategy: Strategy,
        /// Number of constructions recorded by the probe.
        constructions: usize,
    },

    /// A caller thread panicked before recording its observation.
    #[error("caller thread {worker} panicked")]
    WorkerPanicked {
        /// Index of the caller within its trial.
        worker: usize,
    },
}

/// Shorthand `Result` type used throughout singleton-lab.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::Precondition(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use sl_core::{ensure, errors::Error};
/// fn callers(n: usize) -> sl_core::errors::Result<usize> {
///     ensure!(n > 0, "at least one caller is required, got {n}");
///     Ok(n)
/// }
/// assert!(callers(8).is_ok());
/// assert!(matches!(callers(0), Err(Error::Precondition(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Precondition(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use sl_core::fail;
/// fn always_err() -> sl_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
