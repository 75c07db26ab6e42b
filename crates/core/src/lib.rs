//! Core game logic - deterministic, surface-agnostic, and testable
//!
//! This crate contains the rules of the falling-block game, the session state
//! machine and the frame scheduler. It has **no dependency** on a terminal or
//! window: drawing goes through the [`Surface`] trait and time is always
//! supplied by the caller.
//!
//! # Module Structure
//!
//! - [`grid`]: board bounds and coordinate types
//! - [`shape`]: 0/1 shape matrices with rotation, trimming and splitting
//! - [`cell`]: per-sub-cell views produced while iterating a tile
//! - [`pieces`]: the seven canonical matrices and colours
//! - [`tile`]: a shape placed on the board, with movement and collision
//! - [`animation`]: timed interpolation of tile draw positions
//! - [`line_clear`]: full-row removal with tile splitting
//! - [`scoring`]: line points, levels and level gravity
//! - [`particle`]: cosmetic debris from cleared cells
//! - [`rng`]: deterministic LCG and uniform kind selection
//! - [`session`]: the game state machine
//! - [`keys`]: per-key repeat timers
//! - [`game_loop`]: frame scheduler, gravity and frame statistics
//! - [`telemetry`]: serializable summary for presentation layers
//! - [`config`]: tunables read from `TILEFALL_*` environment variables
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every kind is equally likely on every draw, no bag
//! - **Rotation**: clockwise only, and a blocked rotation simply fails (no wall kicks)
//! - **Line clears**: tiles cut by a cleared row are split, and everything above falls with an eased animation
//! - **Scoring**: `[40, 100, 300, 1200] * (level + 1)`, level goes up every 10 lines
//!
//! # Example
//!
//! ```
//! use tilefall_core::{GameConfig, GameLoop, RecordingSurface};
//! use tilefall_types::Key;
//!
//! let mut game = GameLoop::new(GameConfig::default());
//! let mut surface = RecordingSurface::new(10.0, 20.0);
//!
//! // Enter starts a session
//! game.key_down(Key::Enter, 0);
//! game.key_up(Key::Enter);
//!
//! game.key_down(Key::Space, 16);
//! game.frame(16, &mut surface);
//!
//! assert!(game.session().is_playing());
//! assert_eq!(game.session().tiles().len(), 1);
//! ```
//!
//! # Timing
//!
//! All timestamps are milliseconds from a caller-owned monotonic clock:
//! - **Frame**: whenever the caller likes, typically every 16ms
//! - **Gravity**: 500ms, or the level table when `level_gravity` is set
//! - **Slides**: 100ms linear after each move
//! - **Falls**: 300ms eased after a line clear

pub mod animation;
pub mod cell;
pub mod config;
pub mod game_loop;
pub mod grid;
pub mod keys;
pub mod line_clear;
pub mod particle;
pub mod pieces;
pub mod render;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shape;
pub mod telemetry;
pub mod tile;

pub use tilefall_types as types;

// Re-export commonly used types for convenience
pub use animation::{Animation, Animations, Easing, PropertyStore};
pub use cell::{sides, Cell, Sides};
pub use config::GameConfig;
pub use game_loop::{FrameInfo, GameLoop};
pub use grid::{DrawPos, Grid, Point};
pub use keys::{KeyRepeat, KeyTimers};
pub use line_clear::{clear_lines, find_full_rows, MAX_ROWS_PER_CLEAR};
pub use particle::{Particle, Particles};
pub use pieces::{get_colour, get_shape};
pub use render::{DrawOptions, RecordingSurface, Surface};
pub use rng::{random_kind, SimpleRng};
pub use scoring::{calculate_line_score, gravity_interval_ms, level_for_lines, Score};
pub use session::{GameSession, SessionState, SettleEvent};
pub use shape::Shape;
pub use telemetry::Telemetry;
pub use tile::{Axis, DrawTarget, Tile, TileAnimations, TileId, TileIds};
