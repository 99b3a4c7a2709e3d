//! Placed items and their geometry.

pub mod registry;

pub use registry::{ShapeDefaults, defaults};

use kurbo::{Circle, Point, Rect, Shape as KurboShape, Size};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Label font size used when an item carries no override.
pub const DEFAULT_FONT_SIZE: f64 = 10.0;
/// Fixed radius of circular kinds, regardless of stored size.
pub const MIC_RADIUS: f64 = 10.0;
/// Fallback label box width for items without a size.
pub const FALLBACK_WIDTH: f64 = 60.0;
/// Fallback box height for items without a size.
pub const FALLBACK_HEIGHT: f64 = 30.0;

/// Unique identifier for items.
///
/// Added items get a random UUID; preset items carry descriptive ids such as `4A-0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Allocate a fresh id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// The fixed set of placeable kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Table,
    Chair,
    Projector,
    Mic,
    Text,
}

impl ItemKind {
    pub const ALL: [ItemKind; 5] = [
        ItemKind::Table,
        ItemKind::Chair,
        ItemKind::Projector,
        ItemKind::Mic,
        ItemKind::Text,
    ];

    /// Whether this kind renders as a fixed-radius circle.
    pub fn is_circular(self) -> bool {
        matches!(self, ItemKind::Mic)
    }

    /// Whether this kind draws a filled body (text draws only its label).
    pub fn has_body(self) -> bool {
        !matches!(self, ItemKind::Text)
    }
}

/// A shape placed in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub(crate) id: ItemId,
    pub(crate) kind: ItemKind,
    /// Top-left corner (center for circular kinds).
    pub position: Point,
    /// Box size; ignored for circular kinds.
    #[serde(default)]
    pub size: Option<Size>,
    /// Label text, one rendered line per `\n`.
    #[serde(default)]
    pub label: String,
    /// Fill color (hex or named).
    pub color: String,
    /// Label font size override.
    #[serde(default)]
    pub label_font_size: Option<f64>,
}

impl Item {
    /// Create an item of `kind` with the registry defaults.
    pub fn new(id: ItemId, kind: ItemKind, position: Point) -> Self {
        let defaults = registry::defaults(kind);
        Self {
            id,
            kind,
            position,
            size: defaults.size,
            label: defaults.label.to_string(),
            color: defaults.color.to_string(),
            label_font_size: None,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.label_font_size = Some(font_size);
        self
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Font size for the label, falling back to the scene default.
    pub fn font_size(&self) -> f64 {
        self.label_font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Label split into rendered lines.
    pub fn label_lines(&self) -> impl Iterator<Item = &str> {
        self.label.split('\n')
    }

    pub fn line_count(&self) -> usize {
        self.label_lines().count()
    }

    /// Size used for drawing the body and laying out the label.
    pub fn effective_size(&self) -> Size {
        self.size
            .unwrap_or(Size::new(FALLBACK_WIDTH, FALLBACK_HEIGHT))
    }

    /// Box the label is laid out in, in scene coordinates.
    ///
    /// Lines are stacked at `font_size` spacing and the block is vertically
    /// centered in the body. Circular kinds center the box on the circle.
    pub fn label_box(&self) -> Rect {
        let font_size = self.font_size();
        let block_height = font_size * self.line_count() as f64;
        if self.kind.is_circular() {
            // Centered on the circle, not started at its center point
            let width = self.size.map_or(FALLBACK_WIDTH, |s| s.width);
            let x0 = self.position.x - width / 2.0;
            let y0 = self.position.y - font_size / 2.0;
            return Rect::new(x0, y0, x0 + width, y0 + block_height);
        }
        let size = self.effective_size();
        let y0 = self.position.y + size.height / 2.0 - block_height / 2.0;
        Rect::new(
            self.position.x,
            y0,
            self.position.x + size.width,
            y0 + block_height,
        )
    }

    /// Bounding box in scene coordinates.
    pub fn bounds(&self) -> Rect {
        match self.kind {
            ItemKind::Mic => self.circle().bounding_box(),
            ItemKind::Text => self.label_box(),
            _ => Rect::from_origin_size(self.position, self.effective_size()),
        }
    }

    /// Check if a scene point hits this item.
    pub fn hit_test(&self, point: Point) -> bool {
        match self.kind {
            ItemKind::Mic => self.circle().contains(point),
            _ => contains_inclusive(self.bounds(), point),
        }
    }

    fn circle(&self) -> Circle {
        Circle::new(self.position, MIC_RADIUS)
    }

    /// Merge a patch into this item. `id` and `kind` are untouched.
    pub(crate) fn apply(&mut self, patch: ItemPatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(size) = patch.size {
            self.size = Some(size);
        }
    }
}

/// `Rect::contains` excludes the far edges; clicks on the border count here.
fn contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Partial update for an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
}

impl ItemPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn color(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn size(size: Size) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.color.is_none() && self.position.is_none() && self.size.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_uses_registry_defaults() {
        let item = Item::new(ItemId::from("p"), ItemKind::Projector, Point::new(5.0, 6.0));
        assert_eq!(item.kind(), ItemKind::Projector);
        assert_eq!(item.label, "Projector");
        assert_eq!(item.color, registry::PROJECTOR_COLOR);
        assert_eq!(item.size, Some(Size::new(30.0, 30.0)));
        assert!(item.label_font_size.is_none());
    }

    #[test]
    fn test_generated_ids_differ() {
        assert_ne!(ItemId::generate(), ItemId::generate());
    }

    #[test]
    fn test_rect_hit_test() {
        let item = Item::new(ItemId::from("t"), ItemKind::Table, Point::new(10.0, 10.0));
        assert!(item.hit_test(Point::new(40.0, 25.0)));
        assert!(item.hit_test(Point::new(70.0, 40.0))); // far corner
        assert!(!item.hit_test(Point::new(71.0, 25.0)));
        assert!(!item.hit_test(Point::new(9.0, 25.0)));
    }

    #[test]
    fn test_mic_hit_test_ignores_size() {
        let item = Item::new(ItemId::from("m"), ItemKind::Mic, Point::new(100.0, 100.0))
            .with_size(200.0, 200.0);
        assert!(item.hit_test(Point::new(105.0, 105.0)));
        assert!(!item.hit_test(Point::new(150.0, 150.0)));
        let bounds = item.bounds();
        assert!((bounds.width() - 2.0 * MIC_RADIUS).abs() < f64::EPSILON);
    }

    #[test]
    fn test_label_box_centers_lines() {
        let item = Item::new(ItemId::from("t"), ItemKind::Table, Point::new(0.0, 0.0))
            .with_size(70.0, 40.0)
            .with_label("4A\n1-9 (9)");
        let label_box = item.label_box();
        // 40 / 2 - 10 * 2 / 2
        assert!((label_box.y0 - 10.0).abs() < f64::EPSILON);
        assert!((label_box.height() - 20.0).abs() < f64::EPSILON);
        assert!((label_box.width() - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_mic_label_box_centered_on_circle() {
        let item = Item::new(ItemId::from("m"), ItemKind::Mic, Point::new(100.0, 100.0));
        let label_box = item.label_box();
        assert!((label_box.x0 - 70.0).abs() < f64::EPSILON);
        assert!((label_box.x1 - 130.0).abs() < f64::EPSILON);
        assert!((label_box.center().x - 100.0).abs() < f64::EPSILON);
        assert!((label_box.y0 - 95.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_hit_test_uses_label_box() {
        let item = Item::new(ItemId::from("x"), ItemKind::Text, Point::new(0.0, 0.0))
            .with_label("one\ntwo\nthree");
        // 20x20 box, three 10px lines centered: y in [-5, 25]
        assert!(item.hit_test(Point::new(10.0, -4.0)));
        assert!(item.hit_test(Point::new(10.0, 24.0)));
        assert!(!item.hit_test(Point::new(30.0, 10.0)));
    }

    #[test]
    fn test_font_size_override() {
        let item = Item::new(ItemId::from("t"), ItemKind::Table, Point::ZERO).with_font_size(8.0);
        assert!((item.font_size() - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_patch_keeps_identity() {
        let mut item = Item::new(ItemId::from("t"), ItemKind::Table, Point::ZERO);
        item.apply(ItemPatch {
            label: Some("Stage".into()),
            position: Some(Point::new(3.0, 4.0)),
            ..ItemPatch::default()
        });
        assert_eq!(item.id().as_str(), "t");
        assert_eq!(item.kind(), ItemKind::Table);
        assert_eq!(item.label, "Stage");
        assert_eq!(item.position, Point::new(3.0, 4.0));
        assert_eq!(item.color, registry::TABLE_COLOR);
    }

    #[test]
    fn test_patch_deserializes_partial_fields() {
        let patch: ItemPatch = serde_json::from_str(r#"{"color":"red"}"#).unwrap();
        assert_eq!(patch, ItemPatch::color("red"));
        assert!(!patch.is_empty());
        assert!(ItemPatch::default().is_empty());
    }
}
