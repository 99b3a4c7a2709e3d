//! Floor-plan Render Library
//!
//! Renderer abstraction, a tiny-skia rasterizer and the debounced snapshot
//! exporter that feeds the document assembly step.

mod renderer;
mod skia;
pub mod snapshot;
pub mod text;

pub use renderer::{RasterImage, RenderContext, RenderResult, Renderer, RendererError, parse_or};
pub use skia::SkiaRenderer;
pub use snapshot::{Snapshot, SnapshotExporter, SnapshotSink, encode_png};
pub use text::LabelFont;
