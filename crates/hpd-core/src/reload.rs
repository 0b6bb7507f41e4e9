//! Pending-reload flag shared with asynchronous triggers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// One bit, set by any trigger (signal handler, IPC thread) and cleared by the
/// rotation loop. Repeated triggers before a `take` coalesce into one reload.
#[derive(Debug, Clone, Default)]
pub struct ReloadSignal {
    pending: Arc<AtomicBool>,
}

impl ReloadSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trigger(&self) {
        self.pending.store(true, Ordering::SeqCst);
    }

    /// Read and clear in one step.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::SeqCst)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Raw flag, for registration with OS signal handlers.
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.pending)
    }
}
