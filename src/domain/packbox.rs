//! Boxes and the box collection.
//!
//! Two flavors, picked per level:
//!   - **preset**: a fixed number of boxes created up front; the player
//!     cannot add or clear boxes.
//!   - **free**: starts empty; the player adds boxes one at a time and may
//!     clear them all to start over.
//!
//! Box ids come from a counter that is never rewound, so a box created
//! after `clear_all` never reuses an old id.

use std::fmt;

use super::item::Item;

/// Identifier of a box. Displayed as `b<n>`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct BoxId(pub usize);

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PackBox {
    pub id: BoxId,
    pub contents: Vec<Item>,
    pub color: Option<String>,
}

impl PackBox {
    pub fn new(id: BoxId) -> Self {
        PackBox { id, contents: vec![], color: None }
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    pub fn is_colored(&self) -> bool {
        self.color.is_some()
    }
}

#[derive(Clone, Debug, Default)]
pub struct BoxCollection {
    boxes: Vec<PackBox>,
    preset: bool,
    next_id: usize,
}

impl BoxCollection {
    pub fn new() -> Self {
        BoxCollection { boxes: vec![], preset: false, next_id: 1 }
    }

    fn fresh_id(&mut self) -> BoxId {
        // Default-constructed collections start at 0; skip it so ids read b1, b2, ...
        self.next_id = self.next_id.max(1);
        let id = BoxId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Replace all boxes with `count` empty preset boxes.
    pub fn initialize_preset(&mut self, count: usize) {
        self.boxes.clear();
        self.preset = true;
        for _ in 0..count {
            let id = self.fresh_id();
            self.boxes.push(PackBox::new(id));
        }
    }

    /// Drop all boxes and switch to free mode.
    pub fn reset_free(&mut self) {
        self.boxes.clear();
        self.preset = false;
    }

    /// Append one empty box. Not allowed on preset levels.
    pub fn add_box(&mut self) -> Option<BoxId> {
        if self.preset {
            return None;
        }
        let id = self.fresh_id();
        self.boxes.push(PackBox::new(id));
        Some(id)
    }

    /// Remove every box. Not allowed on preset levels.
    ///
    /// The caller must also reset item placements, or the items that were in
    /// these boxes would stay "placed" with no box holding them.
    pub fn clear_all(&mut self) -> bool {
        if self.preset {
            return false;
        }
        self.boxes.clear();
        true
    }

    /// Keep the boxes but drop their contents and colors.
    pub fn empty_all(&mut self) {
        for b in &mut self.boxes {
            b.contents.clear();
            b.color = None;
        }
    }

    /// Put `item` into box `id`. Rejected if the item is already placed or
    /// the box does not exist. The stored copy is marked placed.
    pub fn append_item(&mut self, id: BoxId, item: &Item) -> bool {
        if item.placed {
            return false;
        }
        match self.get_mut(id) {
            Some(b) => {
                b.contents.push(Item { placed: true, ..item.clone() });
                true
            }
            None => false,
        }
    }

    /// Color box `id`. Recoloring is allowed; blank labels are rejected.
    pub fn set_color(&mut self, id: BoxId, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() {
            return false;
        }
        match self.get_mut(id) {
            Some(b) => {
                b.color = Some(label.to_string());
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: BoxId) -> Option<&PackBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    fn get_mut(&mut self, id: BoxId) -> Option<&mut PackBox> {
        self.boxes.iter_mut().find(|b| b.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PackBox> + '_ {
        self.boxes.iter()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn is_preset(&self) -> bool {
        self.preset
    }

    /// Total number of items across all boxes.
    pub fn item_total(&self) -> usize {
        self.boxes.iter().map(PackBox::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::Category;
    use crate::domain::item::ItemId;

    fn item(n: usize) -> Item {
        Item::new(ItemId(n), Category::Milk)
    }

    #[test]
    fn preset_boxes_are_fixed() {
        let mut boxes = BoxCollection::new();
        boxes.initialize_preset(2);
        assert_eq!(boxes.len(), 2);
        assert!(boxes.is_preset());
        assert_eq!(boxes.add_box(), None);
        assert!(!boxes.clear_all());
        assert_eq!(boxes.len(), 2);
    }

    #[test]
    fn free_boxes_add_and_clear() {
        let mut boxes = BoxCollection::new();
        boxes.reset_free();
        assert_eq!(boxes.add_box(), Some(BoxId(1)));
        assert_eq!(boxes.add_box(), Some(BoxId(2)));
        assert!(boxes.clear_all());
        assert!(boxes.is_empty());
        // ids are not reused after a clear
        assert_eq!(boxes.add_box(), Some(BoxId(3)));
    }

    #[test]
    fn default_collection_ids_start_at_one() {
        let mut boxes = BoxCollection::default();
        assert_eq!(boxes.add_box(), Some(BoxId(1)));
    }

    #[test]
    fn append_item_rejects_placed_and_unknown() {
        let mut boxes = BoxCollection::new();
        let id = boxes.add_box().unwrap();
        assert!(boxes.append_item(id, &item(1)));
        let mut placed = item(2);
        placed.placed = true;
        assert!(!boxes.append_item(id, &placed));
        assert!(!boxes.append_item(BoxId(42), &item(3)));
        let b = boxes.get(id).unwrap();
        assert_eq!(b.len(), 1);
        assert!(b.contents[0].placed);
        assert_eq!(boxes.item_total(), 1);
    }

    #[test]
    fn set_color_overwrites_and_is_idempotent() {
        let mut boxes = BoxCollection::new();
        boxes.initialize_preset(1);
        let id = BoxId(1);
        assert!(boxes.set_color(id, "red"));
        let once = boxes.get(id).cloned();
        assert!(boxes.set_color(id, "red"));
        assert_eq!(boxes.get(id).cloned(), once);
        assert!(boxes.set_color(id, "blue"));
        assert_eq!(boxes.get(id).unwrap().color.as_deref(), Some("blue"));
    }

    #[test]
    fn set_color_rejects_unknown_and_blank() {
        let mut boxes = BoxCollection::new();
        boxes.initialize_preset(1);
        assert!(!boxes.set_color(BoxId(9), "red"));
        assert!(!boxes.set_color(BoxId(1), "  "));
        assert!(!boxes.get(BoxId(1)).unwrap().is_colored());
    }

    #[test]
    fn empty_all_keeps_boxes() {
        let mut boxes = BoxCollection::new();
        let a = boxes.add_box().unwrap();
        boxes.append_item(a, &item(1));
        boxes.set_color(a, "green");
        boxes.empty_all();
        assert_eq!(boxes.len(), 1);
        assert!(boxes.get(a).unwrap().is_empty());
        assert!(!boxes.get(a).unwrap().is_colored());
    }

    #[test]
    fn initialize_preset_replaces_existing() {
        let mut boxes = BoxCollection::new();
        boxes.reset_free();
        boxes.add_box();
        boxes.add_box();
        boxes.add_box();
        boxes.initialize_preset(2);
        assert_eq!(boxes.len(), 2);
        assert!(boxes.iter().all(PackBox::is_empty));
    }
}
