//! Chocolate Box: share chocolates evenly between boxes, then color them.
//!
//! The crate is the game core plus a small terminal front end. The core
//! takes already-resolved player actions ("chocolate c3 dropped on box b1")
//! and hands back notifications for whatever draws the game.

pub mod config;
pub mod domain;
pub mod error;
pub mod sim;
pub mod ui;

pub use config::GameConfig;
pub use sim::action::Action;
pub use sim::event::GameEvent;
pub use sim::game::Game;
pub use sim::world::Phase;
