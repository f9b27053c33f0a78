// App module for ocean_dash
// Holds view state, input handling and the fetch dispatcher

pub mod actions;
pub mod input;
pub mod state;

pub use input::handle_input;
pub use state::{App, View};
