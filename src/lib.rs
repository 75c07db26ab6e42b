//! Tilefall (workspace facade crate).
//!
//! Re-exports the workspace members as `tilefall::{core,input,term,types}` so
//! the binary, the integration tests and the benches share one import path.

pub use tilefall_core as core;
pub use tilefall_input as input;
pub use tilefall_term as term;
pub use tilefall_types as types;
