//! Debounced snapshot export.
//!
//! The exporter watches the scene revision, waits for the configured quiet
//! period and then rasterizes the settled scene into a PNG for the document
//! assembly step.

use crate::renderer::{RasterImage, RenderContext, RenderResult, Renderer, RendererError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use floorplan_core::{DesignerConfig, Scene, SnapshotSchedule};
use std::time::Instant;

/// A rasterized capture of the scene at rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// PNG-encoded image.
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Scene revision this snapshot reflects.
    pub revision: u64,
}

impl Snapshot {
    /// `data:` URI suitable for an `<img src>`.
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png))
    }
}

/// Consumer of exported snapshots.
pub trait SnapshotSink {
    fn publish(&mut self, snapshot: Snapshot);
}

impl SnapshotSink for Vec<Snapshot> {
    fn publish(&mut self, snapshot: Snapshot) {
        self.push(snapshot);
    }
}

/// Encode RGBA pixel data to PNG bytes.
pub fn encode_png(image: &RasterImage) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, image.width, image.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RendererError::Encode(format!("PNG header: {e}")))?;
        writer
            .write_image_data(&image.rgba)
            .map_err(|e| RendererError::Encode(format!("PNG data: {e}")))?;
    }
    Ok(png_data)
}

/// Renders the scene after it settles and hands the image to a sink.
pub struct SnapshotExporter<R: Renderer, S: SnapshotSink> {
    renderer: R,
    sink: S,
    schedule: SnapshotSchedule,
    config: DesignerConfig,
    exported: usize,
}

impl<R: Renderer, S: SnapshotSink> SnapshotExporter<R, S> {
    pub fn new(renderer: R, sink: S, config: DesignerConfig) -> Self {
        Self {
            renderer,
            sink,
            schedule: SnapshotSchedule::new(config.debounce()),
            config,
            exported: 0,
        }
    }

    /// Observe the scene and export if its quiet period has elapsed.
    ///
    /// Call after every input event and on idle ticks. Returns true when a
    /// snapshot was published.
    pub fn tick(&mut self, scene: &Scene, now: Instant) -> bool {
        if self.schedule.observe(scene.revision(), now) {
            log::trace!("snapshot re-armed at revision {}", scene.revision());
        }
        if !self.schedule.poll(now) {
            return false;
        }
        self.export(scene)
    }

    /// Export immediately if an export is pending as of `now`.
    pub fn flush(&mut self, scene: &Scene, now: Instant) -> bool {
        self.schedule.observe(scene.revision(), now);
        if !self.schedule.is_pending() {
            return false;
        }
        self.schedule.cancel();
        self.export(scene)
    }

    /// When the pending export fires, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.schedule.deadline()
    }

    pub fn is_pending(&self) -> bool {
        self.schedule.is_pending()
    }

    /// Number of snapshots published so far.
    pub fn exported_count(&self) -> usize {
        self.exported
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Render the scene without selection or drag decorations.
    pub fn capture(&mut self, scene: &Scene) -> RenderResult<Snapshot> {
        let ctx = RenderContext::from_config(scene, &self.config);
        let image = self.renderer.render(&ctx)?;
        let png = encode_png(&image)?;
        Ok(Snapshot {
            png,
            width: image.width,
            height: image.height,
            revision: scene.revision(),
        })
    }

    fn export(&mut self, scene: &Scene) -> bool {
        match self.capture(scene) {
            Ok(snapshot) => {
                log::info!(
                    "published snapshot of {} items at revision {} ({} bytes)",
                    scene.len(),
                    snapshot.revision,
                    snapshot.png.len()
                );
                self.sink.publish(snapshot);
                self.exported += 1;
                true
            }
            Err(e) => {
                // No snapshot yet; the document keeps its placeholder or previous image
                log::warn!("snapshot unavailable: {e}");
                false
            }
        }
    }
}
