//! Snake TUI (workspace facade crate).
//!
//! Re-exports the member crates as `snake_tui::{core,input,storage,term,types}`
//! and carries the environment-driven [`settings`] used by the binary.

pub mod settings;

pub use snake_tui_core as core;
pub use snake_tui_input as input;
pub use snake_tui_storage as storage;
pub use snake_tui_term as term;
pub use snake_tui_types as types;

pub use settings::Settings;
