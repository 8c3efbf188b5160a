//! Enumerated singleton.
//!
//! The instance is the only variant of a closed enum.  The variant is a
//! compile-time constant, so it exists exactly once by construction; the
//! state it stands for ([`EnumState`]) is created on first use behind a
//! `OnceLock` and shared by every copy of the variant.
//!
//! Every out-of-band reconstruction path leads back to the canonical
//! instance:
//!
//! * `Clone` / `Copy` produce the same constant, and [`Enumerated::state`]
//!   returns the same `&'static EnumState` for any copy.
//! * Deserializing the variant name yields the same constant; any other
//!   input is rejected by serde as an unknown variant.
//! * `EnumState` has no public constructor, so no second state can be built.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::thread::ThreadId;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use sl_core::{SingletonProvider, Strategy};
use tracing::debug;

/// The enumerated singleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Enumerated {
    /// The one and only instance.
    Instance,
}

/// State shared by every copy of [`Enumerated::Instance`].
#[derive(Debug)]
pub struct EnumState {
    created_by: ThreadId,
    created_at: Instant,
}

impl EnumState {
    /// Thread that ran the one-time initialization.
    pub fn created_by(&self) -> ThreadId {
        self.created_by
    }

    /// When the state was created.
    pub fn created_at(&self) -> Instant {
        self.created_at
    }
}

static INSTANCE: Enumerated = Enumerated::Instance;
static STATE: OnceLock<EnumState> = OnceLock::new();
static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

impl Enumerated {
    /// The canonical instance.
    pub fn instance() -> &'static Enumerated {
        &INSTANCE
    }

    /// The shared state behind the instance, created on first access.
    pub fn state(self) -> &'static EnumState {
        match self {
            Enumerated::Instance => STATE.get_or_init(|| {
                CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
                debug!(strategy = %Strategy::Enumerated, "creating enum state");
                EnumState {
                    created_by: std::thread::current().id(),
                    created_at: Instant::now(),
                }
            }),
        }
    }

    /// How many times the shared state has been created.  Never above 1.
    pub fn constructions() -> usize {
        CONSTRUCTIONS.load(Ordering::SeqCst)
    }
}

impl SingletonProvider for Enumerated {
    type Shared = EnumState;

    fn get(&self) -> &EnumState {
        self.state()
    }

    fn strategy(&self) -> Strategy {
        Strategy::Enumerated
    }

    fn is_initialized(&self) -> bool {
        STATE.get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn copies_share_state() {
        let a = *Enumerated::instance();
        #[allow(clippy::clone_on_copy)]
        let b = a.clone();
        assert_eq!(a, b);
        assert!(std::ptr::eq(a.state(), b.state()));
        assert_eq!(Enumerated::constructions(), 1);
    }

    #[test]
    fn deserialization_redirects_to_canonical_instance() {
        let json = serde_json::to_string(Enumerated::instance()).unwrap();
        assert_eq!(json, "\"Instance\"");
        let revived: Enumerated = serde_json::from_str(&json).unwrap();
        assert_eq!(revived, Enumerated::Instance);
        assert!(std::ptr::eq(revived.state(), Enumerated::Instance.state()));
        assert_eq!(Enumerated::constructions(), 1);
    }

    #[test]
    fn unknown_variant_is_rejected() {
        let result: Result<Enumerated, _> = serde_json::from_str("\"Other\"");
        assert!(result.is_err());
    }

    #[test]
    fn concurrent_callers_share_state() {
        let ids: HashSet<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..32)
                .map(|_| s.spawn(|| Enumerated::Instance.observe()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(ids.len(), 1);
        assert_eq!(Enumerated::constructions(), 1);
        assert!(Enumerated::Instance.is_initialized());
    }

    #[test]
    fn state_records_one_creation_for_every_thread() {
        let state = Enumerated::Instance.state();
        let seen: HashSet<_> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        let st = Enumerated::Instance.state();
                        (st.created_by(), st.created_at())
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(seen.len(), 1);
        assert!(seen.contains(&(state.created_by(), state.created_at())));
        assert!(state.created_at() <= Instant::now());
    }
}
