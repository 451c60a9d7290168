//! Game flow: level catalog, run state, scoring and the phase state machine.

pub mod action;
pub mod event;
pub mod game;
pub mod level;
pub mod schedule;
pub mod score;
pub mod world;
