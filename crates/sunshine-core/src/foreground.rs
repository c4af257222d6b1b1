//! Foreground / background tracking.
//!
//! Notifications are only useful when nobody is looking at the forecast. The
//! tracker counts visible screens; the app is in the foreground while at
//! least one is shown.

use std::sync::atomic::{AtomicUsize, Ordering};

pub trait AppVisibility: Send + Sync {
    fn is_foreground(&self) -> bool;
}

#[derive(Debug, Default)]
pub struct ForegroundTracker {
    visible_screens: AtomicUsize,
}

impl ForegroundTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen_shown(&self) {
        self.visible_screens.fetch_add(1, Ordering::SeqCst);
    }

    /// Saturates at zero: an unmatched `screen_hidden` cannot underflow.
    pub fn screen_hidden(&self) {
        let _ = self
            .visible_screens
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }

    /// Marks a screen visible until the returned guard is dropped.
    pub fn show(&self) -> VisibleScreen<'_> {
        self.screen_shown();
        VisibleScreen { tracker: self }
    }
}

impl AppVisibility for ForegroundTracker {
    fn is_foreground(&self) -> bool {
        self.visible_screens.load(Ordering::SeqCst) > 0
    }
}

pub struct VisibleScreen<'a> {
    tracker: &'a ForegroundTracker,
}

impl Drop for VisibleScreen<'_> {
    fn drop(&mut self) {
        self.tracker.screen_hidden();
    }
}
