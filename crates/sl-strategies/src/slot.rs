//! Atomic publication slot shared by the pointer-based strategies.
//!
//! The slot holds a pointer to a heap-allocated instance.  Loads are
//! `Acquire` and publication is a `swap` with `AcqRel`, so a reader that sees
//! a non-null pointer also sees the fully constructed value behind it.  The
//! racy strategies use the same slot: their defect is the check-then-act gap
//! between `load` and `publish`, not a torn read.
//!
//! An instance displaced by a racing publisher is kept alive as an orphan
//! until the slot is dropped, because the caller that built it still holds a
//! reference to it.

#![allow(unsafe_code)]

use std::marker::PhantomData;
use std::ptr::{self, NonNull};
use std::sync::atomic::{AtomicPtr, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::{debug, warn};

pub(crate) struct Slot<T> {
    ptr: AtomicPtr<T>,
    orphans: Mutex<Vec<NonNull<T>>>,
    _owns: PhantomData<Box<T>>,
}

// SAFETY: the slot owns boxed `T`s; moving it to another thread moves them.
unsafe impl<T: Send> Send for Slot<T> {}

// SAFETY: shared access hands out `&T` to any thread and the `T` may be
// dropped by whichever thread drops the slot.
unsafe impl<T: Send + Sync> Sync for Slot<T> {}

impl<T> Slot<T> {
    pub(crate) const fn new() -> Self {
        Self {
            ptr: AtomicPtr::new(ptr::null_mut()),
            orphans: Mutex::new(Vec::new()),
            _owns: PhantomData,
        }
    }

    /// The published instance, if any.
    pub(crate) fn load(&self) -> Option<&T> {
        let ptr = self.ptr.load(Ordering::Acquire);
        // SAFETY: a non-null pointer in the slot came from `Box::into_raw` in
        // `publish` and is only freed in `drop`, which needs `&mut self`.
        unsafe { ptr.as_ref() }
    }

    pub(crate) fn is_set(&self) -> bool {
        !self.ptr.load(Ordering::Acquire).is_null()
    }

    /// Publish `value` unconditionally and return a reference to it.
    ///
    /// If another instance was already published it is displaced, not freed.
    pub(crate) fn publish(&self, value: T) -> &T {
        let fresh = Box::into_raw(Box::new(value));
        let previous = self.ptr.swap(fresh, Ordering::AcqRel);
        match NonNull::new(previous) {
            None => debug!("shared instance published"),
            Some(orphan) => {
                warn!("published instance displaced by a racing constructor");
                self.orphans
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(orphan);
            }
        }
        // SAFETY: `fresh` is a live allocation that is freed only in `drop`,
        // whether it stays in the slot or is later displaced into `orphans`.
        unsafe { &*fresh }
    }

    /// Number of instances displaced by racing publishers.
    pub(crate) fn orphans(&self) -> usize {
        self.orphans
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl<T> Drop for Slot<T> {
    fn drop(&mut self) {
        let current = *self.ptr.get_mut();
        if !current.is_null() {
            // SAFETY: exclusive access; the pointer came from `Box::into_raw`.
            drop(unsafe { Box::from_raw(current) });
        }
        let orphans = self
            .orphans
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        for orphan in orphans.drain(..) {
            // SAFETY: as above; every orphan was displaced exactly once.
            drop(unsafe { Box::from_raw(orphan.as_ptr()) });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    struct DropCounter(Arc<AtomicUsize>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn empty_until_published() {
        let slot = Slot::<u32>::new();
        assert!(slot.load().is_none());
        assert!(!slot.is_set());
        let v = slot.publish(5);
        assert_eq!(*v, 5);
        assert!(slot.is_set());
        assert!(ptr::eq(v, slot.load().unwrap()));
    }

    #[test]
    fn displaced_instance_stays_alive() {
        let slot = Slot::<String>::new();
        let first = slot.publish("first".to_string());
        let second = slot.publish("second".to_string());
        assert_eq!(first, "first");
        assert_eq!(second, "second");
        assert_eq!(slot.orphans(), 1);
        assert!(ptr::eq(second, slot.load().unwrap()));
    }

    #[test]
    fn drop_frees_current_and_orphans() {
        let drops = Arc::new(AtomicUsize::new(0));
        {
            let slot = Slot::new();
            slot.publish(DropCounter(drops.clone()));
            slot.publish(DropCounter(drops.clone()));
            slot.publish(DropCounter(drops.clone()));
            assert_eq!(drops.load(Ordering::SeqCst), 0);
        }
        assert_eq!(drops.load(Ordering::SeqCst), 3);
    }
}
