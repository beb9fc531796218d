//! Terminal renderer for the snake game.
//!
//! Renders into a plain framebuffer of styled glyphs rather than a widget
//! tree, then flushes that buffer to the terminal with diffing.
//!
//! - [`GameView`] turns a core snapshot into a framebuffer (pure, testable)
//! - [`TerminalRenderer`] writes framebuffers to the terminal via crossterm
//! - Grid cells are drawn 2 columns wide by default to look square

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use snake_tui_core as core;
pub use snake_tui_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
