//! Cancellation signal and injectable sleep
//!
//! Every blocking step in the provider layer (page fetch, create call, status
//! poll, inter-poll sleep) observes one `CancelToken` passed explicitly down
//! the call chain. No thread-local or global timeout state is consulted.

use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Explicit cancellation/deadline handle
///
/// Cloneable; all clones observe the same signal. The token fires when either
/// `cancel()` is called or the optional deadline passes.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancelToken {
    /// A token that never fires on its own; callers cancel it manually.
    pub fn new() -> Self {
        Self::default()
    }

    /// A token that fires once `deadline` has passed.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            deadline: Some(deadline),
        }
    }

    /// A token that fires after `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        if self.cancelled.load(Ordering::SeqCst) {
            return true;
        }
        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }

    /// Non-blocking check, the moral equivalent of a `select` with `default`
    /// on a done-channel.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(ProviderError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Injectable sleep dependency for poll loops
///
/// Tests substitute a fake to simulate many ticks without wall-clock delay.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production sleep backed by the tokio timer.
#[derive(Debug, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
