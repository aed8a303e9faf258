//! User interface layer
//!
//! Key mapping, actions and the grid renderer. The frame composer lives in
//! `tui_renderer` and the event loop in `tui_app`.

pub mod actions;
pub mod key_mapper;
pub mod rendering;
pub mod table_renderer;
pub mod viewport;
