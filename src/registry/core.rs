use std::fmt;

use serde::Serialize;

use crate::layout::{Span, SpanSet};

/// Stable item identity, unique for the lifetime of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

/// A grid item and its spans at every breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    id: ItemId,
    pub spans: SpanSet,
}

impl Item {
    fn new(id: ItemId, spans: SpanSet) -> Self {
        Self { id, spans }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }
}

/// Insertion-ordered item collection plus the current selection.
#[derive(Debug, Clone, Default)]
pub struct LayoutItemStore {
    items: Vec<Item>,
    next_id: u64,
    selection: Option<ItemId>,
}

impl LayoutItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the five-item starter layout.
    pub fn starter() -> Self {
        let span = |col, row| Span { col, row };
        let mut store = Self::new();
        for spans in [
            SpanSet::from_spans(span(1, 1), span(1, 1), span(1, 1)),
            SpanSet::from_spans(span(2, 1), span(2, 1), span(1, 1)),
            SpanSet::from_spans(span(1, 2), span(1, 1), span(1, 1)),
            SpanSet::from_spans(span(1, 1), span(1, 1), span(1, 1)),
            SpanSet::from_spans(span(2, 2), span(2, 1), span(1, 1)),
        ] {
            store.push(spans);
        }
        store
    }

    /// Append an item with `{1, 1}` spans everywhere.
    pub fn add(&mut self) -> ItemId {
        self.push(SpanSet::new())
    }

    fn push(&mut self, spans: SpanSet) -> ItemId {
        self.next_id = self.next_id.saturating_add(1);
        let id = ItemId(self.next_id);
        self.items.push(Item::new(id, spans));
        id
    }

    /// Remove an item, keeping the rest in order. Returns `false` if absent.
    /// A selection pointing at the removed item is cleared.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let removed = self.items.len() != before;
        if self.selection == Some(id) {
            self.selection = None;
        }
        removed
    }

    /// Drop every item and the selection. Identities are not reused.
    pub fn clear(&mut self) -> usize {
        let count = self.items.len();
        self.items.clear();
        self.selection = None;
        count
    }

    /// Set the selection. Unknown ids are stored as-is; lookups through
    /// [`LayoutItemStore::selected`] then report nothing.
    pub fn select(&mut self, id: Option<ItemId>) {
        self.selection = id;
    }

    pub fn selection(&self) -> Option<ItemId> {
        self.selection
    }

    pub fn selected(&self) -> Option<&Item> {
        self.selection.and_then(|id| self.find(id))
    }

    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selection == Some(id)
    }

    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn find_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Zero-based display position of an item.
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Item> {
        self.items.iter_mut()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Breakpoint;

    #[test]
    fn add_assigns_unique_ids_in_order() {
        let mut store = LayoutItemStore::new();
        let a = store.add();
        let b = store.add();
        let c = store.add();
        assert!(a < b && b < c);
        let ids: Vec<_> = store.iter().map(Item::id).collect();
        assert_eq!(ids, vec![a, b, c]);
        for bp in Breakpoint::ALL {
            assert_eq!(store.find(b).unwrap().spans.get(bp), Span::UNIT);
        }
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut store = LayoutItemStore::new();
        let a = store.add();
        let b = store.add();
        let c = store.add();
        assert!(store.remove(b));
        let ids: Vec<_> = store.iter().map(Item::id).collect();
        assert_eq!(ids, vec![a, c]);
        assert_eq!(store.position(c), Some(1));
    }

    #[test]
    fn remove_missing_is_noop() {
        let mut store = LayoutItemStore::new();
        let a = store.add();
        assert!(!store.remove(ItemId::new(999)));
        assert_eq!(store.len(), 1);
        assert!(store.remove(a));
        assert!(!store.remove(a));
    }

    #[test]
    fn removing_selected_clears_selection() {
        let mut store = LayoutItemStore::new();
        let a = store.add();
        let b = store.add();
        store.select(Some(a));
        store.remove(b);
        assert_eq!(store.selection(), Some(a));
        store.remove(a);
        assert_eq!(store.selection(), None);
    }

    #[test]
    fn unknown_selection_reads_as_not_found() {
        let mut store = LayoutItemStore::new();
        store.add();
        store.select(Some(ItemId::new(42)));
        assert_eq!(store.selection(), Some(ItemId::new(42)));
        assert!(store.selected().is_none());
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut store = LayoutItemStore::new();
        let a = store.add();
        store.select(Some(a));
        assert_eq!(store.clear(), 1);
        assert!(store.is_empty());
        assert_eq!(store.selection(), None);
        let b = store.add();
        assert_ne!(a, b);
    }

    #[test]
    fn starter_layout_has_five_items() {
        let store = LayoutItemStore::starter();
        assert_eq!(store.len(), 5);
        let last = &store.items()[4];
        assert_eq!(last.spans.get(Breakpoint::Desktop), Span { col: 2, row: 2 });
        assert_eq!(last.spans.get(Breakpoint::Tablet), Span { col: 2, row: 1 });
        assert_eq!(last.spans.get(Breakpoint::Mobile), Span::UNIT);
        let next = LayoutItemStore::starter().add();
        assert_eq!(next, ItemId::new(6));
    }
}
