//! Text front end: command parsing and terminal output.

pub mod input;
pub mod renderer;
