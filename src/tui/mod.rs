//! Interactive terminal module for tfs.
//!
//! This module handles the keyboard-driven browser:
//! - Navigation state and its transition function
//! - Frame rendering from state
//! - Key bindings
//! - The terminal session and event loop

mod keys;
mod session;
mod state;
mod view;

pub use keys::command_for;
pub use session::run;
pub use state::{
    FOOTER_ROWS, Flow, HEADER_ROWS, NavCommand, NavState, Navigator, ViewMode, Viewport,
};
pub use view::ViewRenderer;
