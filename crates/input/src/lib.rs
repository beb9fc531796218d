//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Timing and
//! state rules live in the core; this crate only decodes keys.

pub mod map;

pub use snake_tui_types as types;

pub use map::handle_key_event;
