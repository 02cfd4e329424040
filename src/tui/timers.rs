//! # Ripple Timers
//!
//! One-shot removal timers for ripples, run as tokio tasks. A firing timer
//! sends `Action::RippleExpired` back into the event loop; the core decides
//! whether the ripple it names still exists.
//!
//! At most one timer is kept per control. Arming a new one aborts the old,
//! and unmounting a control cancels its timer outright.

use std::collections::HashMap;
use std::sync::mpsc;

use log::{debug, warn};
use tokio::task::AbortHandle;

use crate::core::action::Action;
use crate::core::control::{ControlId, RippleTimer};

#[derive(Debug, Default)]
pub struct RippleTimers {
    handles: HashMap<ControlId, AbortHandle>,
}

impl RippleTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, timer: RippleTimer, tx: mpsc::Sender<Action>) {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(timer.after).await;
            let expired = Action::RippleExpired {
                control: timer.control,
                ripple: timer.ripple,
            };
            if tx.send(expired).is_err() {
                warn!("Failed to deliver ripple expiry for {}: receiver dropped", timer.control);
            }
        });

        if let Some(previous) = self.handles.insert(timer.control, handle.abort_handle()) {
            previous.abort();
        }
        debug!("Ripple timer armed for {} ({:?})", timer.control, timer.after);
    }

    pub fn cancel(&mut self, control: ControlId) {
        if let Some(handle) = self.handles.remove(&control) {
            handle.abort();
            debug!("Ripple timer cancelled for {control}");
        }
    }

    pub fn cancel_all(&mut self) {
        for (control, handle) in self.handles.drain() {
            handle.abort();
            debug!("Ripple timer cancelled for {control}");
        }
    }

    /// Timers that have not fired or been aborted yet.
    pub fn pending(&self) -> usize {
        self.handles.values().filter(|h| !h.is_finished()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::control::RippleId;
    use std::time::Duration;

    fn timer(control: u32, ripple: u64) -> RippleTimer {
        RippleTimer {
            control: ControlId(control),
            ripple: RippleId(ripple),
            after: Duration::from_millis(10),
        }
    }

    #[tokio::test]
    async fn test_timer_delivers_expiry() {
        let (tx, rx) = mpsc::channel();
        let mut timers = RippleTimers::new();
        timers.schedule(timer(1, 1), tx);

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(
            rx.try_recv().unwrap(),
            Action::RippleExpired {
                control: ControlId(1),
                ripple: RippleId(1),
            }
        );
    }

    #[tokio::test]
    async fn test_cancelled_timer_never_fires() {
        let (tx, rx) = mpsc::channel();
        let mut timers = RippleTimers::new();
        timers.schedule(timer(2, 1), tx);
        timers.cancel(ControlId(2));

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert!(rx.try_recv().is_err());
        assert_eq!(timers.pending(), 0);
    }

    #[tokio::test]
    async fn test_rearming_replaces_previous_timer() {
        let (tx, rx) = mpsc::channel();
        let mut timers = RippleTimers::new();
        timers.schedule(timer(3, 1), tx.clone());
        timers.schedule(timer(3, 2), tx);

        tokio::time::sleep(Duration::from_millis(60)).await;

        let fired: Vec<Action> = rx.try_iter().collect();
        assert_eq!(
            fired,
            vec![Action::RippleExpired {
                control: ControlId(3),
                ripple: RippleId(2),
            }]
        );
    }

    #[tokio::test]
    async fn test_cancel_all() {
        let (tx, rx) = mpsc::channel();
        let mut timers = RippleTimers::new();
        timers.schedule(timer(4, 1), tx.clone());
        timers.schedule(timer(5, 1), tx);
        timers.cancel_all();

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(rx.try_recv().is_err());
    }
}
