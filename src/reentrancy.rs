//! Debug-only reentrancy guard.
//!
//! The table calls user code (the hash and equality strategies) while a
//! chain walk is in progress. In debug builds each public operation marks
//! the table busy for its duration, and a strategy that calls back into
//! the same table panics with the names of both operations. In release
//! builds the guard is a zero-sized no-op.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-table busy marker. Public operations start with
/// `let _g = self.reentrancy.enter("op");`.
#[derive(Debug)]
pub(crate) struct DebugReentrancy {
    #[cfg(debug_assertions)]
    active: Cell<Option<&'static str>>,
    // Cell keeps the table !Sync even in release builds.
    _nosync: PhantomData<Cell<()>>,
}

impl DebugReentrancy {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            active: Cell::new(None),
            _nosync: PhantomData,
        }
    }

    /// Marks `op` as running. In debug builds, panics if another operation
    /// on the same table has not finished.
    #[inline]
    pub(crate) fn enter(&self, op: &'static str) -> ReentrancyGuard<'_> {
        #[cfg(debug_assertions)]
        {
            if let Some(running) = self.active.get() {
                panic!("reentrant call to `{op}` while `{running}` is in progress");
            }
            self.active.set(Some(op));
            ReentrancyGuard { owner: self }
        }

        #[cfg(not(debug_assertions))]
        {
            let _ = op;
            ReentrancyGuard { _z: PhantomData }
        }
    }
}

impl Default for DebugReentrancy {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard returned by [`DebugReentrancy::enter`].
pub(crate) struct ReentrancyGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a DebugReentrancy,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            debug_assert!(self.owner.active.get().is_some());
            self.owner.active.set(None);
        }
    }
}
