//! Game configuration - tunables read from the environment

use crate::types::{
    Key, DEFAULT_DROP_REPEAT_MS, DEFAULT_MOVE_REPEAT_MS, DEFAULT_PREVIEW_LEN,
    DEFAULT_ROTATE_REPEAT_MS, GRAVITY_MS,
};

/// Session and loop configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Fixed gravity period in ms
    pub gravity_ms: u32,
    /// Take the gravity period from the level table instead of `gravity_ms`
    pub level_gravity: bool,
    /// Lookahead buffer length, at least 1
    pub preview: usize,
    pub seed: u32,
    /// Left/Right repeat period; 0 fires once per press
    pub move_repeat_ms: u32,
    /// Up repeat period
    pub rotate_repeat_ms: u32,
    /// Down repeat period
    pub drop_repeat_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity_ms: GRAVITY_MS,
            level_gravity: false,
            preview: DEFAULT_PREVIEW_LEN,
            seed: 1,
            move_repeat_ms: DEFAULT_MOVE_REPEAT_MS,
            rotate_repeat_ms: DEFAULT_ROTATE_REPEAT_MS,
            drop_repeat_ms: DEFAULT_DROP_REPEAT_MS,
        }
    }
}

impl GameConfig {
    /// Create from `TILEFALL_*` environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`GameConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let num = |name: &str, default: u32| {
            lookup(name)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default)
        };

        let level_gravity = lookup("TILEFALL_LEVEL_GRAVITY")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(defaults.level_gravity);

        let preview = lookup("TILEFALL_PREVIEW")
            .and_then(|s| s.trim().parse::<usize>().ok())
            .unwrap_or(defaults.preview)
            .max(1);

        Self {
            gravity_ms: num("TILEFALL_GRAVITY_MS", defaults.gravity_ms).max(1),
            level_gravity,
            preview,
            seed: num("TILEFALL_SEED", defaults.seed),
            move_repeat_ms: num("TILEFALL_REPEAT_MOVE_MS", defaults.move_repeat_ms),
            rotate_repeat_ms: num("TILEFALL_REPEAT_ROTATE_MS", defaults.rotate_repeat_ms),
            drop_repeat_ms: num("TILEFALL_REPEAT_DROP_MS", defaults.drop_repeat_ms),
        }
    }

    /// Whether a seed was given explicitly in the environment.
    pub fn env_has_seed() -> bool {
        std::env::var("TILEFALL_SEED").is_ok()
    }

    /// Repeat period for a key. Space and Enter never repeat.
    pub fn repeat_ms(&self, key: Key) -> u32 {
        match key {
            Key::Left | Key::Right => self.move_repeat_ms,
            Key::Up => self.rotate_repeat_ms,
            Key::Down => self.drop_repeat_ms,
            Key::Space | Key::Enter => 0,
        }
    }
}
