//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond parsing and lookup, so
//! they can be shared by the engine, the input layer and the renderer.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Target frame interval (~60 FPS) |
//! | `GRAVITY_MS` | 500 | Gravity period |
//! | `MOVE_ANIMATION_MS` | 100 | Linear slide after a one-cell move |
//! | `DROP_ANIMATION_MS` | 300 | Eased fall after a line clear |
//! | `DEFAULT_MOVE_REPEAT_MS` | 120 | Held left/right repeat period |
//! | `DEFAULT_ROTATE_REPEAT_MS` | 0 | Rotate fires once per press |
//! | `DEFAULT_DROP_REPEAT_MS` | 50 | Held soft drop repeat period |
//!
//! # Examples
//!
//! ```
//! use tilefall_types::{Key, GameAction, TileKind, GRID_WIDTH, GRID_HEIGHT};
//!
//! assert_eq!(TileKind::from_str("t"), Some(TileKind::T));
//! assert_eq!(Key::Up.action(), GameAction::Rotate);
//! assert_eq!(GRID_WIDTH, 10);
//! assert_eq!(GRID_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const GRID_WIDTH: i32 = 10;

/// Board height in cells (20 rows)
pub const GRID_HEIGHT: i32 = 20;

/// Target frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Fixed gravity period (one row every 500ms)
pub const GRAVITY_MS: u32 = 500;

/// Duration of the slide animation after a one-cell move
pub const MOVE_ANIMATION_MS: u32 = 100;

/// Duration of the eased fall applied to tiles shifted by a line clear
pub const DROP_ANIMATION_MS: u32 = 300;

/// Number of upcoming tiles kept in the lookahead buffer
pub const DEFAULT_PREVIEW_LEN: usize = 2;

/// Held left/right repeat period
pub const DEFAULT_MOVE_REPEAT_MS: u32 = 120;

/// Rotate repeat period (0 = once per press, no auto-repeat)
pub const DEFAULT_ROTATE_REPEAT_MS: u32 = 0;

/// Held soft drop repeat period
pub const DEFAULT_DROP_REPEAT_MS: u32 = 50;

/// Gravity periods by level (milliseconds per row), used when level gravity is enabled
///
/// Index 0 = Level 0, Index 8 = Level 8+
pub const LEVEL_GRAVITY_MS: [u32; 9] = [1000, 800, 650, 500, 400, 320, 250, 200, 160];

/// Absolute minimum gravity period (100ms)
pub const GRAVITY_MIN_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Base points for clearing N lines at level 0:
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Particles emitted per filled cell of a cleared row
pub const PARTICLES_PER_CELL: usize = 5;

/// 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

/// The seven canonical tile kinds
///
/// Each kind has a fixed shape matrix and colour (see `tilefall_core::pieces`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    I,
    O,
    J,
    L,
    S,
    T,
    Z,
}

impl TileKind {
    /// All kinds in factory order.
    pub const ALL: [TileKind; 7] = [
        TileKind::I,
        TileKind::O,
        TileKind::J,
        TileKind::L,
        TileKind::S,
        TileKind::T,
        TileKind::Z,
    ];

    /// Map a factory index (0..7) to a kind.
    ///
    /// # Panics
    ///
    /// An index outside `0..7` is a caller bug and panics.
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => TileKind::I,
            1 => TileKind::O,
            2 => TileKind::J,
            3 => TileKind::L,
            4 => TileKind::S,
            5 => TileKind::T,
            6 => TileKind::Z,
            _ => panic!("tile kind index out of range: {index}"),
        }
    }

    /// Parse tile kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_str("i"), Some(TileKind::I));
    /// assert_eq!(TileKind::from_str("O"), Some(TileKind::O));
    /// assert_eq!(TileKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(TileKind::I),
            "o" => Some(TileKind::O),
            "j" => Some(TileKind::J),
            "l" => Some(TileKind::L),
            "s" => Some(TileKind::S),
            "t" => Some(TileKind::T),
            "z" => Some(TileKind::Z),
            _ => None,
        }
    }

    /// Uppercase letter, used by preview panels.
    pub fn letter(&self) -> &'static str {
        match self {
            TileKind::I => "I",
            TileKind::O => "O",
            TileKind::J => "J",
            TileKind::L => "L",
            TileKind::S => "S",
            TileKind::T => "T",
            TileKind::Z => "Z",
        }
    }
}

/// Named keys the engine understands.
///
/// Raw keyboard events are mapped onto these by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
}

impl Key {
    pub const ALL: [Key; 6] = [Key::Left, Key::Right, Key::Up, Key::Down, Key::Space, Key::Enter];

    /// Action triggered whenever this key fires.
    pub fn action(&self) -> GameAction {
        match self {
            Key::Left => GameAction::MoveLeft,
            Key::Right => GameAction::MoveRight,
            Key::Up => GameAction::Rotate,
            Key::Down => GameAction::SoftDrop,
            Key::Space => GameAction::HardDrop,
            Key::Enter => GameAction::StartOrPause,
        }
    }

    /// Stable slot index for per-key tables.
    pub fn index(&self) -> usize {
        match self {
            Key::Left => 0,
            Key::Right => 1,
            Key::Up => 2,
            Key::Down => 3,
            Key::Space => 4,
            Key::Enter => 5,
        }
    }
}

/// Game actions that can be applied to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move tile one cell left
    MoveLeft,
    /// Move tile one cell right
    MoveRight,
    /// Rotate tile 90° clockwise
    Rotate,
    /// Drop tile one cell (settles it when blocked)
    SoftDrop,
    /// Drop tile to the lowest valid position and settle it
    HardDrop,
    /// Start a new game, or toggle pause while playing
    StartOrPause,
}

impl GameAction {
    /// Parse action from its camelCase name
    ///
    /// # Examples
    ///
    /// ```
    /// use tilefall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "rotate" => Some(GameAction::Rotate),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "startorpause" => Some(GameAction::StartOrPause),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::StartOrPause => "startOrPause",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(GRAVITY_MS, 500);
        assert_eq!(MOVE_ANIMATION_MS, 100);
        assert_eq!(DROP_ANIMATION_MS, 300);
        assert_eq!(DEFAULT_ROTATE_REPEAT_MS, 0);
        assert_eq!(LINE_SCORES[1..], [40, 100, 300, 1200]);
    }

    #[test]
    fn rgb_from_hex() {
        assert_eq!(Rgb::from_hex(0x0092ff), Rgb::new(0x00, 0x92, 0xff));
    }

    #[test]
    fn tile_kind_index_roundtrip() {
        for (i, kind) in TileKind::ALL.iter().enumerate() {
            assert_eq!(TileKind::from_index(i), *kind);
        }
    }

    #[test]
    #[should_panic]
    fn tile_kind_index_out_of_range_panics() {
        let _ = TileKind::from_index(7);
    }
}
