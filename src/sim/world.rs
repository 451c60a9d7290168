//! RunState: where the player is in the level sequence.
//!
//! ## Phases
//!
//! Each level moves through three phases:
//!   - `Packing`   : chocolates are dropped into boxes
//!   - `Coloring`  : every box gets a color
//!   - `Completed` : waiting for the player to move on
//!
//! ## Generation
//!
//! `generation` changes on every phase change, level change and run start.
//! Deferred tasks remember the generation they were scheduled under and do
//! nothing if it has moved on by the time they come due.

use std::fmt;

use super::level;
use super::schedule::Token;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Packing,
    Coloring,
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Packing => "packing",
            Phase::Coloring => "coloring",
            Phase::Completed => "completed",
        })
    }
}

#[derive(Clone, Debug)]
pub struct RunState {
    pub level_index: usize,
    pub phase: Phase,
    pub is_active: bool,
    generation: u64,
}

impl RunState {
    pub fn new() -> Self {
        RunState {
            level_index: 1,
            phase: Phase::Packing,
            is_active: false,
            generation: 0,
        }
    }

    pub fn token(&self) -> Token {
        Token(self.generation)
    }

    pub fn is_current(&self, token: Token) -> bool {
        self.token() == token
    }

    /// Move to `phase`, invalidating any task scheduled under the old one.
    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.bump();
    }

    /// Enter level `index` (clamped) in the packing phase.
    pub fn enter_level(&mut self, index: usize) {
        self.level_index = level::clamp_index(index);
        self.set_phase(Phase::Packing);
    }

    pub fn is_last_level(&self) -> bool {
        level::is_last(self.level_index)
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive_on_level_one() {
        let rs = RunState::new();
        assert_eq!(rs.level_index, 1);
        assert_eq!(rs.phase, Phase::Packing);
        assert!(!rs.is_active);
    }

    #[test]
    fn phase_change_invalidates_token() {
        let mut rs = RunState::new();
        let t = rs.token();
        assert!(rs.is_current(t));
        rs.set_phase(Phase::Coloring);
        assert!(!rs.is_current(t));
    }

    #[test]
    fn enter_level_clamps_and_resets_phase() {
        let mut rs = RunState::new();
        rs.set_phase(Phase::Completed);
        rs.enter_level(9);
        assert_eq!(rs.level_index, 4);
        assert_eq!(rs.phase, Phase::Packing);
        assert!(rs.is_last_level());
    }
}
