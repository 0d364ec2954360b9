//! Cooperative cancellation for batch mining runs.
//!
//! Workers poll the token between chunks; a chunk is either fully
//! processed or never started, so cancellation can never leave a
//! half-counted chunk behind.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cancellation signal checked by mining workers between chunks.
pub trait CancellationToken: Send + Sync {
    /// True once the caller has requested cancellation.
    fn is_cancelled(&self) -> bool;
}

/// Token for callers that never cancel (the common batch-job case).
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverCancel;

impl CancellationToken for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl CancellationToken for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: CancellationToken> CancellationToken for Arc<T> {
    fn is_cancelled(&self) -> bool {
        self.as_ref().is_cancelled()
    }
}
