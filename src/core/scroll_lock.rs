//! # Scroll Lock
//!
//! Process-wide "background may not scroll" flag. The only way to set it is
//! to hold a [`ScrollLockGuard`]; dropping the guard releases it. The flag is
//! held while at least one guard is alive, so overlays can stack without
//! clobbering each other.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;

#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::SeqCst) > 0
    }

    /// Only the navigation state machine takes the lock.
    pub(crate) fn acquire(&self) -> ScrollLockGuard {
        let holders = self.holders.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Scroll lock acquired ({holders} holder(s))");
        ScrollLockGuard {
            holders: self.holders.clone(),
        }
    }
}

#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let remaining = self.holders.fetch_sub(1, Ordering::SeqCst).saturating_sub(1);
        debug!("Scroll lock released ({remaining} holder(s) left)");
    }
}
