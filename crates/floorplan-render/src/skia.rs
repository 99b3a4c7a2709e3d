//! CPU renderer built on tiny-skia.
//!
//! Draws the background grid, each item body and its label. The same
//! renderer serves the interactive view (with selection and drag preview)
//! and snapshot export (plain scene).

use crate::renderer::{RasterImage, RenderContext, RenderResult, Renderer, RendererError};
use crate::text::LabelFont;
use floorplan_core::shapes::{Item, ItemKind, MIC_RADIUS};
use floorplan_core::SerializableColor;
use floorplan_core::config::MIN_GRID_SPACING;
use kurbo::{Rect, Size};
use tiny_skia::{Color, FillRule, Paint, Path, PathBuilder, Pixmap, Stroke, Transform};

const CORNER_RADIUS: f32 = 2.0;
const OUTLINE_WIDTH: f32 = 0.5;
const SELECTED_OUTLINE_WIDTH: f32 = 2.0;
const GRID_LINE_WIDTH: f32 = 1.0;

fn outline_color() -> SerializableColor {
    SerializableColor::black()
}

fn label_color() -> SerializableColor {
    SerializableColor::black()
}

fn to_skia(color: SerializableColor) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn paint(color: SerializableColor) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

/// tiny-skia renderer.
#[derive(Debug, Clone, Default)]
pub struct SkiaRenderer {
    font: LabelFont,
}

impl SkiaRenderer {
    /// Create a renderer using the system label font.
    pub fn new() -> Self {
        Self::with_font(LabelFont::system())
    }

    pub fn with_font(font: LabelFont) -> Self {
        Self { font }
    }

    pub fn font(&self) -> &LabelFont {
        &self.font
    }

    fn render_grid(&self, pixmap: &mut Pixmap, ctx: &RenderContext) {
        let paint = paint(ctx.grid_color);
        let (width, height) = (ctx.width as f32, ctx.height as f32);
        let spacing = ctx.grid_spacing as f32;

        for i in 0..=(width / spacing) as u32 {
            let x = i as f32 * spacing;
            if x >= width {
                break;
            }
            if let Some(rect) = tiny_skia::Rect::from_xywh(x, 0.0, GRID_LINE_WIDTH, height) {
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }
        for i in 0..=(height / spacing) as u32 {
            let y = i as f32 * spacing;
            if y >= height {
                break;
            }
            if let Some(rect) = tiny_skia::Rect::from_xywh(0.0, y, width, GRID_LINE_WIDTH) {
                pixmap.fill_rect(rect, &paint, Transform::identity(), None);
            }
        }
    }

    fn render_item(&self, pixmap: &mut Pixmap, item: &Item, ctx: &RenderContext) {
        let position = ctx.draw_position(item.id(), item.position);
        let selected = ctx.scene.is_selected(item.id());

        if item.kind().has_body() {
            let body = match item.kind() {
                ItemKind::Mic => {
                    PathBuilder::from_circle(position.x as f32, position.y as f32, MIC_RADIUS as f32)
                }
                _ => rounded_rect_path(
                    Rect::from_origin_size(position, item.effective_size()).abs(),
                    CORNER_RADIUS,
                ),
            };
            match body {
                Some(path) => self.render_body(pixmap, &path, item, selected, ctx),
                None => log::debug!("skipping degenerate item {}", item.id()),
            }
        }

        let offset = position - item.position;
        let area = item.label_box() + offset;
        self.font.draw_lines(
            pixmap,
            item.label_lines(),
            area,
            item.font_size(),
            label_color(),
        );
    }

    fn render_body(
        &self,
        pixmap: &mut Pixmap,
        path: &Path,
        item: &Item,
        selected: bool,
        ctx: &RenderContext,
    ) {
        // Unrecognized colors leave the body unfilled but outlined
        if let Some(fill) = SerializableColor::parse(&item.color) {
            pixmap.fill_path(path, &paint(fill), FillRule::Winding, Transform::identity(), None);
        }

        let (color, width) = match ctx.selection_color {
            Some(color) if selected => (color, SELECTED_OUTLINE_WIDTH),
            _ => (outline_color(), OUTLINE_WIDTH),
        };
        let stroke = Stroke {
            width,
            ..Default::default()
        };
        pixmap.stroke_path(path, &paint(color), &stroke, Transform::identity(), None);
    }
}

impl Renderer for SkiaRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<RasterImage> {
        let mut pixmap = Pixmap::new(ctx.width, ctx.height).ok_or_else(|| {
            RendererError::Surface(format!("cannot allocate {}x{} surface", ctx.width, ctx.height))
        })?;
        pixmap.fill(to_skia(ctx.background_color));

        // Sub-pixel or non-finite spacing draws no grid
        if ctx.grid_spacing.is_finite() && ctx.grid_spacing >= MIN_GRID_SPACING {
            self.render_grid(&mut pixmap, ctx);
        } else if ctx.grid_spacing > 0.0 {
            log::warn!("skipping grid with spacing {}", ctx.grid_spacing);
        }
        for item in ctx.scene.items() {
            self.render_item(&mut pixmap, item, ctx);
        }

        Ok(to_raster(&pixmap))
    }
}

/// Build a rectangle path with quadratic corners of radius `radius`.
fn rounded_rect_path(rect: Rect, radius: f32) -> Option<Path> {
    let Size { width, height } = rect.size();
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let (x, y, w, h) = (rect.x0 as f32, rect.y0 as f32, width as f32, height as f32);
    let r = radius.min(w / 2.0).min(h / 2.0);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(x + w - r, y);
    pb.quad_to(x + w, y, x + w, y + r);
    pb.line_to(x + w, y + h - r);
    pb.quad_to(x + w, y + h, x + w - r, y + h);
    pb.line_to(x + r, y + h);
    pb.quad_to(x, y + h, x, y + h - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

/// Convert premultiplied pixmap pixels to straight RGBA.
fn to_raster(pixmap: &Pixmap) -> RasterImage {
    let mut rgba = Vec::with_capacity(pixmap.pixels().len() * 4);
    for pixel in pixmap.pixels() {
        let c = pixel.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    RasterImage {
        width: pixmap.width(),
        height: pixmap.height(),
        rgba,
    }
}
