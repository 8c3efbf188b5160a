//! # singleton-lab
//!
//! Eight ways to hand every caller the same instance, and a harness that
//! hammers them from many threads at once to see which ones keep that
//! promise.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `sl-*` crates.
//!
//! ## Quick start
//!
//! ```toml
//! [dependencies]
//! singleton-lab = "0.1"
//! ```
//!
//! ```rust
//! use std::time::Duration;
//! use singleton_lab::harness::{stress, StressConfig};
//! use singleton_lab::strategies::{DoubleChecked, NaiveLazy};
//!
//! let config = StressConfig::builder()
//!     .callers(32)
//!     .trials(4)
//!     .construction_delay(Duration::from_millis(5))
//!     .build()
//!     .unwrap();
//!
//! let safe = stress(&config, |probe| DoubleChecked::new(move || probe.construct())).unwrap();
//! assert!(safe.ensure_no_violations().is_ok());
//!
//! // The naive strategy may or may not lose the race here; both are legal.
//! let racy = stress(&config, |probe| NaiveLazy::new(move || probe.construct())).unwrap();
//! assert!(racy.was_lazy());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Strategy tags, the provider trait, errors, and process-wide settings.
pub use sl_core as core;

/// The singleton providers.
pub use sl_strategies as strategies;

/// The concurrent stress harness.
pub use sl_harness as harness;
