//! Cooperative cancellation shared between search workers

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Shared flag polled by long-running searches
///
/// Clones observe the same flag. A token created with a timeout also reports
/// cancellation once its deadline has passed; the deadline is checked when the
/// token is polled, so no timer thread is involved.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl CancellationToken {
    /// Create a token that is only cancelled explicitly
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a token that cancels itself after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            flag: Arc::default(),
            deadline: Instant::now().checked_add(timeout),
        }
    }

    /// Cancel every clone of this token
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Check if the token was cancelled or its deadline has passed
    pub fn is_cancelled(&self) -> bool {
        if self.flag.load(Ordering::Acquire) {
            return true;
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            self.cancel();
            return true;
        }
        false
    }
}
