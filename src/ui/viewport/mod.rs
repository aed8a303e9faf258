//! Horizontal windowing over wide schemas

pub mod column_width_calculator;
pub mod column_window;

pub use column_window::{ColumnWindow, ScrollDirection, VisibleColumn};
