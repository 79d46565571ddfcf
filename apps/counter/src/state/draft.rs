//! # Draft State
//!
//! Holds the bill currently being keyed in.
//!
//! ## Thread Safety
//! The draft is wrapped in `Arc<Mutex<T>>` so that only one command edits it
//! at a time. A counter has one operator per draft, so contention is nil;
//! the lock only guards against overlapping commands.

use std::sync::{Arc, Mutex, MutexGuard};

use cellshop_core::DraftBill;
use tracing::warn;

/// Shared draft bill.
#[derive(Debug, Clone, Default)]
pub struct DraftState {
    draft: Arc<Mutex<DraftBill>>,
}

impl DraftState {
    /// Creates state around an existing draft.
    pub fn new(draft: DraftBill) -> Self {
        DraftState {
            draft: Arc::new(Mutex::new(draft)),
        }
    }

    /// Executes a function with read access to the draft.
    pub fn with_draft<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&DraftBill) -> R,
    {
        let draft = self.lock();
        f(&draft)
    }

    /// Executes a function with write access to the draft.
    pub fn with_draft_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut DraftBill) -> R,
    {
        let mut draft = self.lock();
        f(&mut draft)
    }

    // A panic mid-command cannot leave a DraftBill half-updated in a way
    // that breaks its invariants, so a poisoned lock is taken over.
    fn lock(&self) -> MutexGuard<'_, DraftBill> {
        self.draft.lock().unwrap_or_else(|poisoned| {
            warn!("Draft mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
