//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto the named [`Key`](crate::types::Key)s the
//! engine understands, and synthesizes key releases for terminals that never
//! report them.

pub mod map;
pub mod release;

pub use tilefall_types as types;

pub use map::{map_key, should_quit};
pub use release::{ReleaseTracker, DEFAULT_KEY_RELEASE_TIMEOUT_MS};
