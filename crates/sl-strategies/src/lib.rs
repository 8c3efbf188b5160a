//! # sl-strategies
//!
//! Eight ways to provide one shared instance, from the racy to the canonical.
//!
//! | strategy | lazy | thread-safe | lock after init |
//! |----------|------|-------------|-----------------|
//! | [`EagerField`] | no | yes | no |
//! | [`EagerBlock`] | no | yes | no |
//! | [`NaiveLazy`] | yes | **no** | no |
//! | [`SynchronizedAccessor`] | yes | yes | **yes** |
//! | [`SynchronizedBlock`] | yes | **no** | no |
//! | [`DoubleChecked`] | yes | yes | no |
//! | [`Holder`] / [`define_singleton!`] | yes | yes | no |
//! | [`Enumerated`] | no | yes | no |
//!
//! All of them implement [`sl_core::SingletonProvider`].  The lazy ones take
//! their initializer as a generic `F: Fn() -> T` (defaulting to `fn() -> T`)
//! and have `const` constructors, so they can be declared as `static`
//! process-wide providers.

#![warn(missing_docs)]
#![deny(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Double-checked locking.
pub mod double_checked;

/// Eager initializer block.
pub mod eager_block;

/// Eager field.
pub mod eager_field;

/// Enumerated singleton.
pub mod enumerated;

/// `OnceLock` holder and `define_singleton!`.
pub mod holder;

/// Naive (racy) lazy initialization.
pub mod naive;

/// Lock around the whole accessor.
pub mod synchronized_accessor;

/// Lock around construction only (racy).
pub mod synchronized_block;

mod slot;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use double_checked::DoubleChecked;
pub use eager_block::EagerBlock;
pub use eager_field::EagerField;
pub use enumerated::{EnumState, Enumerated};
pub use holder::Holder;
pub use naive::NaiveLazy;
pub use synchronized_accessor::SynchronizedAccessor;
pub use synchronized_block::SynchronizedBlock;
