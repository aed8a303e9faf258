//! Navigation state
//!
//! The focus state machine, its typed errors and the immutable snapshot it
//! publishes after every action.

pub mod controller;
pub mod error;
pub mod focus;
pub mod view_state;

pub use controller::{ControllerOptions, NavigationController};
pub use error::NavError;
pub use focus::FocusState;
pub use view_state::ViewState;
