//! Distribution rules, truth-table driven.
//!
//! Pure functions over the item pool and boxes. No side effects.
//! These answer "is the level solved?" without performing any transition.
//!
//! ## Packing Truth Table
//!
//! ┌──────────────────────────────────────┬──────────┬─────────┐
//! │ Condition (checked in order)          │ complete │ valid   │
//! ├──────────────────────────────────────┼──────────┼─────────┤
//! │ no boxes                              │ NO       │ NO      │
//! │ placed < item_count                   │ NO       │ NO      │
//! │ item_count % box_count != 0           │ YES      │ NO      │
//! │ some box holds != item_count/box_count│ YES      │ NO      │
//! │ otherwise                             │ YES      │ YES     │
//! └──────────────────────────────────────┴──────────┴─────────┘
//!
//! An uneven divisor is always rejected, whatever the arrangement. There is
//! no partial credit for "almost even".
//!
//! ## Coloring Truth Table
//!
//! ┌──────────────────────────────┬───────────┐
//! │ Condition                     │ complete? │
//! ├──────────────────────────────┼───────────┤
//! │ no boxes                      │ NO        │
//! │ any box without a color       │ NO        │
//! │ otherwise                     │ YES       │
//! └──────────────────────────────┴───────────┘

use super::item::ItemPool;
use super::packbox::BoxCollection;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PackingStatus {
    /// Every item is in a box, and there is at least one box.
    pub complete: bool,
    /// Complete, and every box holds the same exact share.
    pub valid: bool,
}

/// The exact per-box share, or `None` when `item_count` does not split
/// evenly into `box_count` boxes.
pub fn even_share(item_count: usize, box_count: usize) -> Option<usize> {
    if box_count == 0 || item_count % box_count != 0 {
        return None;
    }
    Some(item_count / box_count)
}

/// See the packing truth table above.
pub fn is_packing_complete(
    pool: &ItemPool,
    boxes: &BoxCollection,
    level_item_count: usize,
) -> PackingStatus {
    let complete = !boxes.is_empty() && pool.placed_count() == level_item_count;
    if !complete {
        return PackingStatus::default();
    }
    let valid = match even_share(level_item_count, boxes.len()) {
        Some(share) => boxes.iter().all(|b| b.len() == share),
        None => false,
    };
    PackingStatus { complete, valid }
}

/// See the coloring truth table above.
pub fn is_coloring_complete(boxes: &BoxCollection) -> bool {
    !boxes.is_empty() && boxes.iter().all(|b| b.is_colored())
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
