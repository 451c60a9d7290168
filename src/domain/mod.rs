//! Pure game data: chocolates, boxes and the distribution rules.

pub mod category;
pub mod item;
pub mod packbox;
pub mod rules;
