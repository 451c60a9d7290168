//! Notifications emitted by the game.
//! The presentation layer consumes these for rendering and feedback.

use crate::domain::item::ItemId;
use crate::domain::packbox::BoxId;

use super::world::Phase;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameEvent {
    PhaseChanged(Phase),
    Message(String),
    ScoreChanged { run: u32, total: u32 },
    LevelChanged(usize),
    ItemPlaced { item: ItemId, target: BoxId },
    BoxAdded(BoxId),
    BoxesCleared,
    BoxColored { target: BoxId, color: String },
    /// Boxes emptied and items returned after an uneven split.
    BoardReset,
    /// The last level was finished; a fresh run starts right after.
    RunCompleted { run_score: u32, total_score: u32 },
}
