//! Label text rasterization.
//!
//! Labels are drawn glyph-by-glyph with rusttype onto the pixmap. The face
//! comes from the system font database; when none can be loaded, labels are
//! skipped and shapes still render.

use floorplan_core::SerializableColor;
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use kurbo::Rect;
use rusttype::{Font, Scale, point};
use std::fs;
use tiny_skia::{Pixmap, PremultipliedColorU8};

/// Font used for item labels.
#[derive(Clone, Default)]
pub struct LabelFont {
    font: Option<Font<'static>>,
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelFont")
            .field("available", &self.is_available())
            .finish()
    }
}

impl LabelFont {
    /// Load a bold sans-serif face from the system.
    pub fn system() -> Self {
        let font = load_system_font();
        if font.is_none() {
            log::warn!("no system sans-serif font found; labels will not be drawn");
        }
        Self { font }
    }

    /// A font that draws nothing.
    pub fn none() -> Self {
        Self { font: None }
    }

    /// Use a font from raw TrueType/OpenType bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(bytes).map(|font| Self { font: Some(font) })
    }

    pub fn is_available(&self) -> bool {
        self.font.is_some()
    }

    /// Advance width of one line at `font_size`.
    pub fn line_width(&self, line: &str, font_size: f32) -> f32 {
        let Some(font) = &self.font else {
            return 0.0;
        };
        font.layout(line, Scale::uniform(font_size), point(0.0, 0.0))
            .last()
            .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0)
    }

    /// Draw `lines` stacked from the top of `area`, each centered horizontally.
    pub fn draw_lines<'a>(
        &self,
        pixmap: &mut Pixmap,
        lines: impl Iterator<Item = &'a str>,
        area: Rect,
        font_size: f64,
        color: SerializableColor,
    ) {
        let Some(font) = &self.font else {
            return;
        };
        let size = font_size as f32;
        let scale = Scale::uniform(size);
        let ascent = font.v_metrics(scale).ascent;
        let (width, height) = (pixmap.width() as i32, pixmap.height() as i32);

        for (row, line) in lines.enumerate() {
            if line.is_empty() {
                continue;
            }
            let line_width = self.line_width(line, size);
            let x = area.x0 as f32 + (area.width() as f32 - line_width) / 2.0;
            let baseline = area.y0 as f32 + row as f32 * size + ascent;

            for glyph in font.layout(line, scale, point(x, baseline)) {
                let Some(bb) = glyph.pixel_bounding_box() else {
                    continue;
                };
                glyph.draw(|gx, gy, coverage| {
                    let px = gx as i32 + bb.min.x;
                    let py = gy as i32 + bb.min.y;
                    if px < 0 || py < 0 || px >= width || py >= height || coverage <= 0.0 {
                        return;
                    }
                    let idx = (py * width + px) as usize;
                    let pixels = pixmap.pixels_mut();
                    pixels[idx] = blend(pixels[idx], color, coverage);
                });
            }
        }
    }
}

/// Source-over blend of `color` at `coverage` onto a premultiplied pixel.
fn blend(dst: PremultipliedColorU8, color: SerializableColor, coverage: f32) -> PremultipliedColorU8 {
    let alpha = coverage.clamp(0.0, 1.0) * color.a as f32 / 255.0;
    let inv = 1.0 - alpha;
    let out_a = (255.0 * alpha + dst.alpha() as f32 * inv).round().min(255.0) as u8;
    let mix = |src: u8, d: u8| ((src as f32 * alpha + d as f32 * inv).round() as u8).min(out_a);
    PremultipliedColorU8::from_rgba(
        mix(color.r, dst.red()),
        mix(color.g, dst.green()),
        mix(color.b, dst.blue()),
        out_a,
    )
    .unwrap_or(dst)
}

fn db() -> Database {
    let mut db = Database::new();
    db.load_system_fonts();
    db
}

fn load_system_font() -> Option<Font<'static>> {
    let db = db();
    let families = [Family::SansSerif];
    let query = Query {
        families: &families,
        weight: Weight::BOLD,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };

    let id = db.query(&query)?;
    let face = db.face(id)?;

    match &face.source {
        fontdb::Source::File(path) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec_and_index(bytes, face.index)
        }
        fontdb::Source::SharedFile(path, _) => {
            let bytes = fs::read(path).ok()?;
            Font::try_from_vec_and_index(bytes, face.index)
        }
        fontdb::Source::Binary(bytes) => {
            Font::try_from_vec_and_index(bytes.as_ref().as_ref().to_vec(), face.index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_font_draws_nothing() {
        let font = LabelFont::none();
        assert!(!font.is_available());
        assert_eq!(font.line_width("Table", 10.0), 0.0);

        let mut pixmap = Pixmap::new(20, 20).unwrap();
        font.draw_lines(
            &mut pixmap,
            ["Table"].into_iter(),
            Rect::new(0.0, 0.0, 20.0, 20.0),
            10.0,
            SerializableColor::black(),
        );
        assert!(pixmap.pixels().iter().all(|p| p.alpha() == 0));
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        assert!(LabelFont::from_bytes(vec![1, 2, 3]).is_none());
    }

    #[test]
    fn test_blend_full_coverage_replaces() {
        let dst = PremultipliedColorU8::from_rgba(255, 255, 255, 255).unwrap();
        let out = blend(dst, SerializableColor::black(), 1.0);
        assert_eq!((out.red(), out.green(), out.blue(), out.alpha()), (0, 0, 0, 255));
    }

    #[test]
    fn test_blend_half_coverage_mixes() {
        let dst = PremultipliedColorU8::from_rgba(200, 200, 200, 255).unwrap();
        let out = blend(dst, SerializableColor::black(), 0.5);
        assert_eq!(out.red(), 100);
        assert_eq!(out.alpha(), 255);
    }

    #[test]
    fn test_blend_onto_transparent() {
        let dst = PremultipliedColorU8::TRANSPARENT;
        let out = blend(dst, SerializableColor::rgb(255, 0, 0), 0.5);
        assert_eq!(out.alpha(), 128);
        assert!(out.red() <= out.alpha());
    }
}
