//! Terminal front-end for the tilefall engine.
//!
//! The engine draws through [`Surface`](crate::core::Surface); this crate
//! provides one backed by a character framebuffer, lays out the board and the
//! side panel, and flushes frames to a real terminal.
//!
//! - [`fb`]: styled character framebuffer
//! - [`canvas`]: `Surface` over a region of the framebuffer (2 columns × 1 row per board cell)
//! - [`game_view`]: board frame, side panel and overlays
//! - [`renderer`]: diffing crossterm output

pub mod canvas;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tilefall_core as core;
pub use tilefall_types as types;

pub use canvas::BoardCanvas;
pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{AnchorY, BoardLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
