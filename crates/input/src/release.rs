//! Synthetic key release for terminal environments.
//!
//! Most terminals only report presses, and a held key arrives as a stream of
//! repeated presses. A key counts as held while presses keep arriving; once
//! none has been seen for the release timeout it is reported as released.

use arrayvec::ArrayVec;

use crate::types::Key;

// Long enough to bridge the gap before the terminal's own auto-repeat starts.
pub const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Tracks which named keys are held, from press events alone.
#[derive(Debug, Clone)]
pub struct ReleaseTracker {
    /// Last press time per key, `None` when released
    last_seen: [Option<u64>; 6],
    timeout_ms: u32,
}

impl Default for ReleaseTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseTracker {
    pub fn new() -> Self {
        Self {
            last_seen: [None; 6],
            timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Read the timeout from `TILEFALL_RELEASE_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        let timeout_ms = std::env::var("TILEFALL_RELEASE_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_KEY_RELEASE_TIMEOUT_MS);
        Self::new().with_timeout_ms(timeout_ms)
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Record a press. Returns true if the key was not already held.
    pub fn press(&mut self, key: Key, now_ms: u64) -> bool {
        self.last_seen[key.index()].replace(now_ms).is_none()
    }

    /// Record a real release event. Returns true if the key was held.
    pub fn release(&mut self, key: Key) -> bool {
        self.last_seen[key.index()].take().is_some()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.last_seen[key.index()].is_some()
    }

    /// Release every key not refreshed within the timeout and return them.
    pub fn expire(&mut self, now_ms: u64) -> ArrayVec<Key, 6> {
        let mut released = ArrayVec::new();
        for key in Key::ALL {
            let slot = &mut self.last_seen[key.index()];
            if let Some(last) = *slot {
                if now_ms.saturating_sub(last) > self.timeout_ms as u64 {
                    *slot = None;
                    released.push(key);
                }
            }
        }
        released
    }
}
