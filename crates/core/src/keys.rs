//! Key repeat timers
//!
//! Each key has a repeat period. A period of 0 fires once per press and never
//! repeats. A positive period fires on the first update after the press and
//! then at most once per period while the key stays down.

use crate::config::GameConfig;
use crate::types::Key;

/// Repeat state of one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRepeat {
    period_ms: u32,
    /// Time of the last fire; `None` means long ago
    last_ms: Option<u64>,
    pressed: bool,
}

impl KeyRepeat {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            last_ms: None,
            pressed: false,
        }
    }

    /// Register a press. Returns true if the key fires right now.
    ///
    /// A press while already held is ignored.
    pub fn press(&mut self, now_ms: u64) -> bool {
        if self.pressed {
            return false;
        }
        self.pressed = true;
        if self.period_ms == 0 {
            self.last_ms = Some(now_ms);
            return true;
        }
        false
    }

    pub fn release(&mut self) {
        self.pressed = false;
    }

    /// Returns true if a held key with a positive period is due.
    pub fn update(&mut self, now_ms: u64) -> bool {
        if !self.pressed || self.period_ms == 0 {
            return false;
        }
        let due = match self.last_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) >= self.period_ms as u64,
        };
        if due {
            self.last_ms = Some(now_ms);
        }
        due
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }
}

/// Repeat timers for every named key
#[derive(Debug, Clone)]
pub struct KeyTimers {
    keys: [KeyRepeat; 6],
}

impl KeyTimers {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            keys: Key::ALL.map(|k| KeyRepeat::new(config.repeat_ms(k))),
        }
    }

    pub fn press(&mut self, key: Key, now_ms: u64) -> bool {
        self.keys[key.index()].press(now_ms)
    }

    pub fn release(&mut self, key: Key) {
        self.keys[key.index()].release();
    }

    pub fn release_all(&mut self) {
        for k in self.keys.iter_mut() {
            k.release();
        }
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys[key.index()].is_pressed()
    }

    /// Call `fire` for every key that is due, in `Key::ALL` order.
    pub fn update(&mut self, now_ms: u64, mut fire: impl FnMut(Key)) {
        for key in Key::ALL {
            if self.keys[key.index()].update(now_ms) {
                fire(key);
            }
        }
    }
}
