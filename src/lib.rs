pub mod config;
pub mod data;
pub mod help_text;
pub mod logging;
pub mod search_filter;
pub mod selection_model;
pub mod state;
pub mod tui_app;
pub mod tui_renderer;
pub mod ui;
pub mod utils;
