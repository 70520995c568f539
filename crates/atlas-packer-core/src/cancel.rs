use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{AtlasError, Result};

/// Cooperative cancellation flag shared between a packing run and its caller.
///
/// The pipeline polls the token between per-image preparation steps and
/// between sizing-search iterations; the core never blocks on it, and no
/// partial output is returned once cancellation is observed.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; observed at the next poll point.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Errors with [`AtlasError::Cancelled`] once cancellation was requested.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(AtlasError::Cancelled)
        } else {
            Ok(())
        }
    }
}
