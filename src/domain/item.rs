//! Items (chocolates) and the per-level item pool.
//!
//! The pool is rebuilt from scratch for every level. An item's `placed`
//! flag only moves false → true through `mark_placed`, and only moves back
//! through `reset_all_placements`.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use super::category::Category;

/// Identifier of an item, unique within one level. Displayed as `c<n>`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct ItemId(pub usize);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Item {
    pub id: ItemId,
    pub category: Category,
    pub placed: bool,
}

impl Item {
    pub fn new(id: ItemId, category: Category) -> Self {
        Item { id, category, placed: false }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ItemPool {
    items: Vec<Item>,
}

impl ItemPool {
    pub fn new() -> Self {
        ItemPool { items: vec![] }
    }

    /// Replace the pool with `item_count` fresh, unplaced items.
    ///
    /// Categories are split as evenly as possible (see `Category::split`),
    /// ids run `1..=item_count`, then the order is shuffled with `rng`.
    /// Order is presentational only.
    pub fn initialize<R: Rng + ?Sized>(&mut self, item_count: usize, rng: &mut R) {
        self.items.clear();
        let mut next_id = 1;
        for (category, count) in Category::ALL.into_iter().zip(Category::split(item_count)) {
            for _ in 0..count {
                self.items.push(Item::new(ItemId(next_id), category));
                next_id += 1;
            }
        }
        self.items.shuffle(rng);
    }

    /// Flip an item to placed. Unknown ids and already-placed items are
    /// left alone; returns whether anything changed.
    pub fn mark_placed(&mut self, id: ItemId) -> bool {
        match self.items.iter_mut().find(|it| it.id == id) {
            Some(item) if !item.placed => {
                item.placed = true;
                true
            }
            _ => false,
        }
    }

    pub fn unplaced_items(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(|it| !it.placed)
    }

    pub fn reset_all_placements(&mut self) {
        for item in &mut self.items {
            item.placed = false;
        }
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|it| it.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn placed_count(&self) -> usize {
        self.items.iter().filter(|it| it.placed).count()
    }

    pub fn unplaced_count(&self) -> usize {
        self.len() - self.placed_count()
    }

    /// Item count per category, in `Category::ALL` order.
    pub fn category_counts(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for item in &self.items {
            let slot = Category::ALL
                .iter()
                .position(|c| *c == item.category)
                .unwrap_or(0);
            counts[slot] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn pool(count: usize) -> ItemPool {
        let mut rng = SmallRng::seed_from_u64(1);
        let mut p = ItemPool::new();
        p.initialize(count, &mut rng);
        p
    }

    #[test]
    fn initialize_builds_all_unplaced() {
        let p = pool(8);
        assert_eq!(p.len(), 8);
        assert_eq!(p.placed_count(), 0);
        assert_eq!(p.unplaced_items().count(), 8);
        assert_eq!(p.category_counts(), [3, 3, 2]);
    }

    #[test]
    fn initialize_replaces_previous_level() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut p = ItemPool::new();
        p.initialize(12, &mut rng);
        p.mark_placed(ItemId(1));
        p.initialize(7, &mut rng);
        assert_eq!(p.len(), 7);
        assert_eq!(p.placed_count(), 0);
        assert!(p.get(ItemId(8)).is_none());
    }

    #[test]
    fn same_seed_same_order() {
        assert_eq!(
            pool(12).iter().map(|it| it.id).collect::<Vec<_>>(),
            pool(12).iter().map(|it| it.id).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn mark_placed_flips_once() {
        let mut p = pool(6);
        assert!(p.mark_placed(ItemId(2)));
        let before = p.iter().cloned().collect::<Vec<_>>();
        assert!(!p.mark_placed(ItemId(2)));
        assert_eq!(p.iter().cloned().collect::<Vec<_>>(), before);
        assert_eq!(p.placed_count(), 1);
    }

    #[test]
    fn mark_placed_unknown_id_is_noop() {
        let mut p = pool(6);
        assert!(!p.mark_placed(ItemId(99)));
        assert_eq!(p.placed_count(), 0);
    }

    #[test]
    fn unplaced_items_skips_placed() {
        let mut p = pool(6);
        p.mark_placed(ItemId(1));
        p.mark_placed(ItemId(4));
        let ids: HashSet<_> = p.unplaced_items().map(|it| it.id).collect();
        assert_eq!(ids.len(), 4);
        assert!(!ids.contains(&ItemId(1)));
        assert!(!ids.contains(&ItemId(4)));
    }

    #[test]
    fn reset_all_placements_unplaces_everything() {
        let mut p = pool(7);
        for n in 1..=7 {
            p.mark_placed(ItemId(n));
        }
        assert_eq!(p.unplaced_count(), 0);
        p.reset_all_placements();
        assert_eq!(p.unplaced_count(), 7);
        assert_eq!(p.category_counts(), [3, 2, 2]);
    }

    #[test]
    fn item_id_display() {
        assert_eq!(ItemId(5).to_string(), "c5");
    }

    proptest! {
        #[test]
        fn counts_sum_and_ids_unique(count in 1usize..64, seed in any::<u64>()) {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut p = ItemPool::new();
            p.initialize(count, &mut rng);
            prop_assert_eq!(p.category_counts().iter().sum::<usize>(), count);
            prop_assert_eq!(p.category_counts(), Category::split(count));
            let ids: HashSet<_> = p.iter().map(|it| it.id).collect();
            prop_assert_eq!(ids.len(), count);
        }
    }
}
