//! Single-flight guard for user gestures.

use spotilove_core::error::{Result, SpotiLoveError};
use std::sync::atomic::{AtomicBool, Ordering};

/// Rejects a second invocation while the first is still running.
#[derive(Debug)]
pub struct InFlight {
    running: AtomicBool,
    action: &'static str,
}

impl InFlight {
    pub const fn new(action: &'static str) -> Self {
        Self {
            running: AtomicBool::new(false),
            action,
        }
    }

    /// Marks the action as running until the returned guard is dropped.
    pub fn begin(&self) -> Result<InFlightGuard<'_>> {
        self.running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SpotiLoveError::Busy(self.action))?;
        Ok(InFlightGuard {
            running: &self.running,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct InFlightGuard<'a> {
    running: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}
