//! Cooperative cancellation
//!
//! The host hands a token to every verification call. Traversals call
//! [`CancellationToken::checkpoint`] once per step so a pathological type
//! graph cannot stall the host's analysis pass.

use crate::errors::{CopyguardError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag
///
/// Cloning yields a handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every call holding this token
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Returns `Err(Cancelled)` once cancellation has been requested
    ///
    /// Meant for use with `?` inside traversal loops.
    #[inline]
    pub fn checkpoint(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(CopyguardError::Cancelled)
        } else {
            Ok(())
        }
    }
}
