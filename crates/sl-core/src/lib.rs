//! # sl-core
//!
//! Core types, traits, and error definitions for singleton-lab.
//!
//! This crate provides the building blocks shared by the strategy and harness
//! crates: the error hierarchy, the [`Strategy`] catalogue, the
//! [`SingletonProvider`] accessor contract, instance identity, the
//! construction probe used by tests, and the process-wide [`Settings`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Identity of an observed instance.
pub mod identity;

/// Construction counter with optional artificial delay.
pub mod probe;

/// The `SingletonProvider` accessor contract.
pub mod provider;

/// Process-wide harness defaults.
pub mod settings;

/// Catalogue of strategies.
pub mod strategy;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use identity::InstanceId;
pub use probe::{ConstructionProbe, ProbeInstance};
pub use provider::SingletonProvider;
pub use settings::{ScopedDefaults, Settings, StressDefaults};
pub use strategy::Strategy;
