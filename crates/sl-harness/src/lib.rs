//! # sl-harness
//!
//! Concurrent stress harness for singleton providers.
//!
//! A *trial* releases N caller threads together against one provider and
//! records which instance each was handed; it passes iff all N saw the same
//! one.  A *stress run* repeats trials against fresh providers, each wired to
//! a [`ConstructionProbe`](sl_core::ConstructionProbe), and reports how many
//! trials broke the single-instance invariant.
//!
//! ```
//! use std::time::Duration;
//! use sl_harness::{stress, StressConfig};
//! use sl_strategies::DoubleChecked;
//!
//! let config = StressConfig::builder()
//!     .callers(50)
//!     .trials(3)
//!     .construction_delay(Duration::from_millis(5))
//!     .build()
//!     .unwrap();
//! let report = stress(&config, |probe| DoubleChecked::new(move || probe.construct())).unwrap();
//! assert!(report.ensure_no_violations().is_ok());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Stress-run configuration and its builder.
pub mod config;

/// Repeated trials and their aggregate report.
pub mod stress;

/// A single trial of concurrent callers.
pub mod trial;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use config::{StressConfig, StressConfigBuilder};
pub use stress::{stress, StressReport, TrialSummary};
pub use trial::{run_trial, run_trial_jittered, TrialOutcome};
