//! # Scrolling
//!
//! [`Viewport`] owns the page scroll offset and publishes every change on a
//! `tokio::sync::watch` channel. [`ScrollTracker`] subscribes to it and
//! condenses the offset into the boolean "scrolled past the threshold"
//! signal the navbar styles itself by.
//!
//! ```text
//! Viewport ──watch<u16>──▶ ScrollTracker ──Some(bool) on crossing──▶ Navigation
//! ```
//!
//! A tracker holds its receiver until [`ScrollTracker::release`]; after that
//! the viewport has no listener left for it.

use log::debug;
use tokio::sync::watch;

use crate::core::scroll_lock::ScrollLock;

/// Offset (in rows) past which the page counts as scrolled.
pub const SCROLL_THRESHOLD: u16 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollSignal {
    pub scrolled: bool,
}

/// Scrollable page area.
#[derive(Debug)]
pub struct Viewport {
    offset: watch::Sender<u16>,
    content_height: u16,
    visible_height: u16,
    lock: ScrollLock,
}

impl Viewport {
    pub fn new(lock: ScrollLock) -> Self {
        let (offset, _) = watch::channel(0);
        Self {
            offset,
            content_height: 0,
            visible_height: 0,
            lock,
        }
    }

    pub fn offset(&self) -> u16 {
        *self.offset.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<u16> {
        self.offset.subscribe()
    }

    /// Number of live scroll subscriptions.
    pub fn listener_count(&self) -> usize {
        self.offset.receiver_count()
    }

    pub fn visible_height(&self) -> u16 {
        self.visible_height
    }

    /// Record the measured content and window heights, clamping the offset.
    pub fn set_extent(&mut self, content_height: u16, visible_height: u16) {
        self.content_height = content_height;
        self.visible_height = visible_height;
        if let Some(max) = self.max_offset()
            && self.offset() > max
        {
            self.publish(max);
        }
    }

    /// `None` until an extent has been measured.
    pub fn max_offset(&self) -> Option<u16> {
        (self.content_height > 0).then(|| self.content_height.saturating_sub(self.visible_height))
    }

    /// Scroll relative to the current offset. Refused while scroll-locked.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        let target = (i32::from(self.offset()) + delta).max(0);
        let target = u16::try_from(target).unwrap_or(u16::MAX);
        self.scroll_to(target)
    }

    /// Scroll to an absolute offset. Refused while scroll-locked.
    pub fn scroll_to(&mut self, offset: u16) -> bool {
        if self.lock.is_locked() {
            debug!("Scroll to {offset} refused: scroll lock held");
            return false;
        }
        let clamped = self.max_offset().map_or(offset, |max| offset.min(max));
        self.publish(clamped)
    }

    fn publish(&self, offset: u16) -> bool {
        self.offset.send_if_modified(|current| {
            if *current == offset {
                false
            } else {
                *current = offset;
                true
            }
        })
    }
}

/// Thresholded view of the viewport offset.
#[derive(Debug)]
pub struct ScrollTracker {
    subscription: Option<watch::Receiver<u16>>,
    threshold: u16,
    scrolled: bool,
}

impl ScrollTracker {
    pub fn new(mut subscription: watch::Receiver<u16>, threshold: u16) -> Self {
        let scrolled = *subscription.borrow_and_update() > threshold;
        Self {
            subscription: Some(subscription),
            threshold,
            scrolled,
        }
    }

    pub fn signal(&self) -> ScrollSignal {
        ScrollSignal {
            scrolled: self.scrolled,
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Consume a pending offset notification, if any.
    ///
    /// Returns `Some(scrolled)` only when the threshold was crossed.
    pub fn sync(&mut self) -> Option<bool> {
        let subscription = self.subscription.as_mut()?;
        if !subscription.has_changed().unwrap_or(false) {
            return None;
        }
        let offset = *subscription.borrow_and_update();
        self.observe(offset)
    }

    fn observe(&mut self, offset: u16) -> Option<bool> {
        let scrolled = offset > self.threshold;
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        debug!("Scroll threshold crossed at offset {offset}: scrolled={scrolled}");
        Some(scrolled)
    }

    pub fn release(&mut self) {
        if self.subscription.take().is_some() {
            debug!("Scroll subscription released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Viewport {
        let mut viewport = Viewport::new(ScrollLock::new());
        viewport.set_extent(400, 20);
        viewport
    }

    #[test]
    fn test_threshold_crossing_emits_once() {
        let mut viewport = page();
        let mut tracker = ScrollTracker::new(viewport.subscribe(), SCROLL_THRESHOLD);
        assert!(!tracker.signal().scrolled);

        viewport.scroll_to(120);
        assert_eq!(tracker.sync(), Some(true));
        assert!(tracker.signal().scrolled);

        viewport.scroll_to(80);
        assert_eq!(tracker.sync(), None);
        assert!(tracker.signal().scrolled);
    }

    #[test]
    fn test_threshold_boundary_is_exclusive() {
        let mut viewport = page();
        let mut tracker = ScrollTracker::new(viewport.subscribe(), SCROLL_THRESHOLD);

        viewport.scroll_to(50);
        assert_eq!(tracker.sync(), None);
        viewport.scroll_to(51);
        assert_eq!(tracker.sync(), Some(true));
        viewport.scroll_to(50);
        assert_eq!(tracker.sync(), Some(false));
    }

    #[test]
    fn test_no_notification_means_no_update() {
        let viewport = page();
        let mut tracker = ScrollTracker::new(viewport.subscribe(), SCROLL_THRESHOLD);
        assert_eq!(tracker.sync(), None);
    }

    #[test]
    fn test_tracker_starts_from_current_offset() {
        let mut viewport = page();
        viewport.scroll_to(200);
        let mut tracker = ScrollTracker::new(viewport.subscribe(), SCROLL_THRESHOLD);
        assert!(tracker.signal().scrolled);
        assert_eq!(tracker.sync(), None);
    }

    #[test]
    fn test_release_drops_listener() {
        let mut viewport = page();
        let mut tracker = ScrollTracker::new(viewport.subscribe(), SCROLL_THRESHOLD);
        assert_eq!(viewport.listener_count(), 1);

        tracker.release();
        assert_eq!(viewport.listener_count(), 0);
        assert!(!tracker.is_subscribed());

        viewport.scroll_to(300);
        assert_eq!(tracker.sync(), None);
        assert!(!tracker.signal().scrolled);
    }

    #[test]
    fn test_scroll_refused_while_locked() {
        let lock = ScrollLock::new();
        let mut viewport = Viewport::new(lock.clone());
        viewport.set_extent(400, 20);

        let guard = lock.acquire();
        assert!(!viewport.scroll_by(10));
        assert_eq!(viewport.offset(), 0);

        drop(guard);
        assert!(viewport.scroll_by(10));
        assert_eq!(viewport.offset(), 10);
    }

    #[test]
    fn test_offset_clamped_to_extent() {
        let mut viewport = page();
        viewport.scroll_to(1000);
        assert_eq!(viewport.offset(), 380);
        viewport.scroll_by(-2000);
        assert_eq!(viewport.offset(), 0);

        viewport.scroll_to(380);
        viewport.set_extent(100, 20);
        assert_eq!(viewport.offset(), 80);
    }

    #[test]
    fn test_unmeasured_viewport_does_not_clamp() {
        let mut viewport = Viewport::new(ScrollLock::new());
        assert!(viewport.scroll_to(120));
        assert_eq!(viewport.offset(), 120);
    }
}
