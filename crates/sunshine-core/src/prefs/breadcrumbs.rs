//! Debug-only rolling trail of sync diagnostics.
//!
//! Each branch of a sync run appends a short token (`wk`, `wkRetry`, `n`, ...)
//! to a single preference string, so the history of background runs can be
//! inspected with `sunshine breadcrumbs` without a log collector.

use tracing::debug;

use super::PreferenceStore;
use super::errors::PrefsError;
use super::keys::SYNC_BREADCRUMBS;

/// Maximum retained trail length, in characters. Oldest characters go first.
pub const MAX_BREADCRUMB_CHARS: usize = 1000;

const TRAIL_PREFIX: &str = "sync";

pub struct Breadcrumbs<'a> {
    store: &'a dyn PreferenceStore,
    enabled: bool,
}

impl<'a> Breadcrumbs<'a> {
    pub fn new(store: &'a dyn PreferenceStore, enabled: bool) -> Self {
        Self { store, enabled }
    }

    /// A trail that records nothing.
    pub fn disabled(store: &'a dyn PreferenceStore) -> Self {
        Self::new(store, false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Append `token`. Fire-and-forget: write failures are logged at debug.
    pub fn drop_crumb(&self, token: &str) {
        if !self.enabled {
            return;
        }
        let mut trail = self.store.get_string(SYNC_BREADCRUMBS, TRAIL_PREFIX);
        trail.push(' ');
        trail.push_str(token);
        let trail = keep_tail(&trail, MAX_BREADCRUMB_CHARS);

        if let Err(e) = self.store.put_string(SYNC_BREADCRUMBS, trail) {
            debug!(event = "core.breadcrumbs.write_failed", token = token, error = %e);
        }
    }
}

pub fn read_trail(store: &dyn PreferenceStore) -> Option<String> {
    let trail = store.get_string(SYNC_BREADCRUMBS, "");
    if trail.is_empty() { None } else { Some(trail) }
}

pub fn clear_trail(store: &dyn PreferenceStore) -> Result<(), PrefsError> {
    store.remove(SYNC_BREADCRUMBS)
}

fn keep_tail(text: &str, max_chars: usize) -> &str {
    let count = text.chars().count();
    if count <= max_chars {
        return text;
    }
    let skip = count - max_chars;
    match text.char_indices().nth(skip) {
        Some((idx, _)) => &text[idx..],
        None => "",
    }
}
