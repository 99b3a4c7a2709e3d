//! Scene store: the ordered item collection plus the current selection.

use crate::presets::Preset;
use crate::shapes::{Item, ItemId, ItemKind, ItemPatch};
use kurbo::{Point, Rect};
use std::collections::HashSet;

/// Where newly added items are placed.
pub const DEFAULT_ITEM_POSITION: Point = Point::new(100.0, 100.0);

/// Items in insertion order plus at most one selected id.
///
/// Every change to the item collection bumps [`Scene::revision`]; selection
/// changes alone do not.
#[derive(Debug, Clone)]
pub struct Scene {
    items: Vec<Item>,
    selection: Option<ItemId>,
    revision: u64,
    default_position: Point,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            selection: None,
            revision: 0,
            default_position: DEFAULT_ITEM_POSITION,
        }
    }

    /// Create the scene a new designer opens with: two tables and a projector.
    pub fn starter() -> Self {
        let mut scene = Self::new();
        scene.replace_all(vec![
            Item::new(ItemId::from("1"), ItemKind::Table, Point::new(50.0, 50.0))
                .with_label("Table 1"),
            Item::new(ItemId::from("2"), ItemKind::Table, Point::new(150.0, 50.0))
                .with_label("Table 2"),
            Item::new(ItemId::from("3"), ItemKind::Projector, Point::new(100.0, 150.0)),
        ]);
        scene
    }

    /// Set where `add_item` places new items.
    pub fn with_default_position(mut self, position: Point) -> Self {
        self.default_position = position;
        self
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn selection(&self) -> Option<&ItemId> {
        self.selection.as_ref()
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selection.as_ref().and_then(|id| self.get(id))
    }

    pub fn is_selected(&self, id: &ItemId) -> bool {
        self.selection.as_ref() == Some(id)
    }

    /// Monotonic counter of item-collection changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Add an item of `kind` with registry defaults and select it.
    pub fn add_item(&mut self, kind: ItemKind) -> ItemId {
        let mut id = ItemId::generate();
        while self.contains(&id) {
            id = ItemId::generate();
        }
        self.items
            .push(Item::new(id.clone(), kind, self.default_position));
        self.selection = Some(id.clone());
        self.touch();
        log::debug!("added {kind:?} item {id}");
        id
    }

    /// Remove an item. Missing ids are ignored.
    pub fn remove_item(&mut self, id: &ItemId) {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        if self.items.len() == before {
            return;
        }
        if self.selection.as_ref() == Some(id) {
            self.selection = None;
        }
        self.touch();
        log::debug!("removed item {id}");
    }

    /// Merge `patch` into an item. Missing ids and empty patches are ignored.
    pub fn update_item(&mut self, id: &ItemId, patch: ItemPatch) {
        if patch.is_empty() {
            return;
        }
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            return;
        };
        item.apply(patch);
        self.touch();
        log::debug!("updated item {id}");
    }

    /// Select an item, or clear the selection if `id` is `None` or absent.
    pub fn select(&mut self, id: Option<&ItemId>) {
        self.selection = id.filter(|id| self.contains(id)).cloned();
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Replace every item at once and clear the selection.
    ///
    /// Items are installed in the given order. A repeated id keeps only its
    /// first occurrence.
    pub fn replace_all(&mut self, items: Vec<Item>) {
        let mut seen = HashSet::with_capacity(items.len());
        self.items = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.id.clone());
                if !fresh {
                    log::warn!("dropping duplicate item id {}", item.id);
                }
                fresh
            })
            .collect();
        self.selection = None;
        self.touch();
    }

    /// Replace the scene with a preset layout.
    pub fn apply_preset(&mut self, preset: Preset) {
        self.replace_all(preset.items());
        log::info!("applied {} preset ({} items)", preset.name(), self.items.len());
    }

    /// Ids of items under `point`, topmost (last inserted) first.
    pub fn items_at_point(&self, point: Point) -> Vec<&ItemId> {
        self.items
            .iter()
            .rev()
            .filter(|item| item.hit_test(point))
            .map(|item| &item.id)
            .collect()
    }

    /// Topmost item under `point`.
    pub fn item_at_point(&self, point: Point) -> Option<&ItemId> {
        self.items
            .iter()
            .rev()
            .find(|item| item.hit_test(point))
            .map(|item| &item.id)
    }

    /// Bounding box of all items.
    pub fn bounds(&self) -> Option<Rect> {
        self.items
            .iter()
            .map(Item::bounds)
            .reduce(|acc, bounds| acc.union(bounds))
    }
}
