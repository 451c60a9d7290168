//! Chocolate kinds.
//!
//! A level's chocolates are spread over the kinds as evenly as possible:
//! every kind gets `total / 3`, and the leftover goes one each to the first
//! kinds in `Category::ALL` order (7 → milk 3, dark 2, white 2).

use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub enum Category {
    Milk,
    Dark,
    White,
}

impl Category {
    /// Enumeration order. Remainder items go to the front of this list.
    pub const ALL: [Category; 3] = [Category::Milk, Category::Dark, Category::White];

    pub fn name(self) -> &'static str {
        match self {
            Category::Milk => "milk",
            Category::Dark => "dark",
            Category::White => "white",
        }
    }

    /// One-letter tag used by the text front end.
    pub fn symbol(self) -> char {
        match self {
            Category::Milk => 'M',
            Category::Dark => 'D',
            Category::White => 'W',
        }
    }

    /// How many of `total` items fall into each category, in `ALL` order.
    ///
    /// `total / 3` each, plus one for each of the first `total % 3`.
    pub fn split(total: usize) -> [usize; 3] {
        let n = Category::ALL.len();
        let base = total / n;
        let extra = total % n;
        let mut counts = [base; 3];
        for slot in counts.iter_mut().take(extra) {
            *slot += 1;
        }
        counts
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_even() {
        assert_eq!(Category::split(6), [2, 2, 2]);
        assert_eq!(Category::split(12), [4, 4, 4]);
    }

    #[test]
    fn split_remainder_goes_to_first_categories() {
        assert_eq!(Category::split(7), [3, 2, 2]);
        assert_eq!(Category::split(8), [3, 3, 2]);
    }

    #[test]
    fn split_fewer_than_three() {
        assert_eq!(Category::split(0), [0, 0, 0]);
        assert_eq!(Category::split(1), [1, 0, 0]);
        assert_eq!(Category::split(2), [1, 1, 0]);
    }
}
