//! Player actions, already resolved by the presentation layer
//! ("item X was dropped on box Y").

use crate::domain::item::ItemId;
use crate::domain::packbox::BoxId;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Action {
    DropItem { item: ItemId, target: BoxId },
    DropColor { target: BoxId, color: String },
    /// Pick a palette color without applying it yet.
    SelectColor(String),
    AddBox,
    ClearBoxes,
    AdvanceLevel,
    StartRun,
    ResetRun,
}
