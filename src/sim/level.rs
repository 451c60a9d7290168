//! Level catalog.
//!
//! Four fixed levels, looked up by 1-based index. Lookups clamp into
//! `[1, LEVEL_COUNT]` instead of failing.
//!
//! ## Levels:
//!   1. 6 chocolates, 2 boxes already on the table
//!   2. 8 chocolates, the player makes the boxes
//!   3. 12 chocolates, the player makes the boxes
//!   4. 7 chocolates, the player makes the boxes (prime: only 1 or 7 boxes work)

/// Static level data.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LevelDef {
    pub index: usize,
    pub item_count: usize,
    /// Boxes created up front. `None` means the player builds them.
    pub preset_box_count: Option<usize>,
    pub special_message: Option<&'static str>,
}

impl LevelDef {
    pub fn uses_preset_boxes(&self) -> bool {
        self.preset_box_count.is_some()
    }
}

pub const LEVEL_COUNT: usize = 4;

const LEVELS: [LevelDef; LEVEL_COUNT] = [
    LevelDef { index: 1, item_count: 6, preset_box_count: Some(2), special_message: None },
    LevelDef { index: 2, item_count: 8, preset_box_count: None, special_message: None },
    LevelDef { index: 3, item_count: 12, preset_box_count: None, special_message: None },
    LevelDef {
        index: 4,
        item_count: 7,
        preset_box_count: None,
        special_message: Some("Seven is a tricky number! Can you find a way to share it evenly?"),
    },
];

/// Level `index` (1-based), clamped into the valid range.
pub fn get(index: usize) -> &'static LevelDef {
    &LEVELS[clamp_index(index) - 1]
}

pub fn count() -> usize {
    LEVELS.len()
}

pub fn is_last(index: usize) -> bool {
    clamp_index(index) == count()
}

pub fn clamp_index(index: usize) -> usize {
    index.clamp(1, count())
}

/// One-line description shown when a level starts.
pub fn intro_text(def: &LevelDef) -> String {
    match def.preset_box_count {
        Some(n) => format!(
            "Level {}: share {} chocolates between the {} boxes!",
            def.index, def.item_count, n,
        ),
        None => format!(
            "Level {}: make boxes and share {} chocolates evenly!",
            def.index, def.item_count,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_ordered() {
        assert_eq!(count(), 4);
        for i in 1..=count() {
            assert_eq!(get(i).index, i);
            assert!(get(i).item_count > 0);
        }
    }

    #[test]
    fn out_of_range_clamps() {
        assert_eq!(get(0).index, 1);
        assert_eq!(get(5).index, 4);
        assert_eq!(get(usize::MAX).index, 4);
    }

    #[test]
    fn only_level_one_is_preset() {
        assert_eq!(get(1).preset_box_count, Some(2));
        assert!((2..=4).all(|i| !get(i).uses_preset_boxes()));
    }

    #[test]
    fn preset_boxes_split_evenly() {
        for i in 1..=count() {
            let def = get(i);
            if let Some(n) = def.preset_box_count {
                assert_eq!(def.item_count % n, 0, "level {i}");
            }
        }
    }

    #[test]
    fn level_four_is_the_prime_one() {
        let def = get(4);
        assert_eq!(def.item_count, 7);
        assert!(def.special_message.is_some());
        assert!(is_last(4));
        assert!(!is_last(3));
    }

    #[test]
    fn intro_mentions_counts() {
        assert!(intro_text(get(1)).contains("6 chocolates"));
        assert!(intro_text(get(2)).contains("make boxes"));
    }
}
