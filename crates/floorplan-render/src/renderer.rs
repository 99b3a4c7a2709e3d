//! Renderer trait abstraction.

use floorplan_core::shapes::ItemId;
use floorplan_core::{DesignerConfig, Scene, SerializableColor};
use kurbo::Point;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Straight-alpha RGBA8 pixels, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl RasterImage {
    /// Pixel at `(x, y)` as `[r, g, b, a]`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        self.rgba
            .get(idx..idx + 4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }
}

/// Context for a single render.
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a Scene,
    /// Output size in pixels.
    pub width: u32,
    pub height: u32,
    pub background_color: SerializableColor,
    pub grid_color: SerializableColor,
    pub grid_spacing: f64,
    /// Outline color for the selected item; `None` draws no highlight.
    pub selection_color: Option<SerializableColor>,
    /// Uncommitted drag position to draw instead of the stored one.
    pub drag_preview: Option<(&'a ItemId, Point)>,
}

impl<'a> RenderContext<'a> {
    /// Create a render context with the default canvas settings.
    pub fn new(scene: &'a Scene) -> Self {
        Self::from_config(scene, &DesignerConfig::default())
    }

    /// Create a render context from designer settings. Selection is not drawn
    /// until [`RenderContext::with_selection`] is called.
    pub fn from_config(scene: &'a Scene, config: &DesignerConfig) -> Self {
        Self {
            scene,
            width: config.canvas_width,
            height: config.canvas_height,
            background_color: parse_or(&config.background_color, SerializableColor::white()),
            grid_color: parse_or(&config.grid_color, SerializableColor::rgb(229, 231, 235)),
            grid_spacing: config.grid_spacing,
            selection_color: None,
            drag_preview: None,
        }
    }

    /// Set the output size.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Highlight the selected item with `color`.
    pub fn with_selection(mut self, color: SerializableColor) -> Self {
        self.selection_color = Some(color);
        self
    }

    /// Draw an item at its uncommitted drag position.
    pub fn with_drag_preview(mut self, preview: Option<(&'a ItemId, Point)>) -> Self {
        self.drag_preview = preview;
        self
    }

    /// Position an item is drawn at.
    pub fn draw_position(&self, id: &ItemId, stored: Point) -> Point {
        match self.drag_preview {
            Some((dragged, position)) if dragged == id => position,
            _ => stored,
        }
    }
}

/// Resolve a configured color, falling back when it doesn't parse.
pub fn parse_or(value: &str, fallback: SerializableColor) -> SerializableColor {
    SerializableColor::parse(value).unwrap_or_else(|| {
        log::warn!("unrecognized color {value:?}, using {}", fallback.to_hex());
        fallback
    })
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Rasterize the scene described by `ctx`.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<RasterImage>;
}
