//! Core application state and lifecycle.
//!
//! The headless app owns the scene, the interaction controller and the
//! snapshot exporter, and advances a virtual clock so scripted sessions
//! debounce exactly as an interactive one would.

use crate::command::Command;
use crate::document::DocumentSlot;
use floorplan_core::{
    ConfigError, DesignerConfig, InteractionController, PointerEvent, Scene, SerializableColor,
};
use floorplan_render::{
    RasterImage, RenderContext, RenderResult, Renderer, SkiaRenderer, SnapshotExporter, parse_or,
};
use kurbo::Point;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

/// File name of the exported image.
pub const PNG_FILE: &str = "floorplan.png";
/// File name of the assembled document.
pub const HTML_FILE: &str = "floorplan.html";

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Script line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type AppResult<T> = Result<T, AppError>;

/// Paths written by [`App::write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outputs {
    pub html: PathBuf,
    /// Absent when no snapshot has been exported.
    pub png: Option<PathBuf>,
}

/// Floor-plan designer session.
pub struct App {
    config: DesignerConfig,
    scene: Scene,
    controller: InteractionController,
    exporter: SnapshotExporter<SkiaRenderer, DocumentSlot>,
    view_renderer: SkiaRenderer,
    clock: Instant,
}

impl App {
    /// Create a session with the starter scene and the system label font.
    pub fn new(config: DesignerConfig) -> AppResult<Self> {
        Self::with_renderer(config, SkiaRenderer::new())
    }

    pub fn with_renderer(config: DesignerConfig, renderer: SkiaRenderer) -> AppResult<Self> {
        config.validate()?;
        let scene = Scene::starter().with_default_position(config.default_position);
        let view_renderer = renderer.clone();
        let exporter = SnapshotExporter::new(renderer, DocumentSlot::new(), config.clone());
        let mut app = Self {
            config,
            scene,
            controller: InteractionController::new(),
            exporter,
            view_renderer,
            clock: Instant::now(),
        };
        app.tick();
        Ok(app)
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    pub fn config(&self) -> &DesignerConfig {
        &self.config
    }

    pub fn document(&self) -> &DocumentSlot {
        self.exporter.sink()
    }

    /// Snapshots published so far.
    pub fn exported_count(&self) -> usize {
        self.exporter.exported_count()
    }

    /// Current reading of the session clock.
    pub fn now(&self) -> Instant {
        self.clock
    }

    /// Apply one command, then let the exporter observe the result.
    pub fn apply(&mut self, command: Command) {
        log::debug!("apply {command:?}");
        match command {
            Command::Add { kind } => {
                self.scene.add_item(kind);
            }
            Command::Remove { id } => self.scene.remove_item(&id),
            Command::Select { id } => self.scene.select(id.as_ref()),
            Command::Update { id, patch } => self.scene.update_item(&id, patch),
            Command::SetLabel { label } => self.controller.set_label(&mut self.scene, label),
            Command::SetColor { color } => self.controller.set_color(&mut self.scene, color),
            Command::DeleteSelected => self.controller.delete_selected(&mut self.scene),
            Command::Preset { preset } => {
                self.controller.cancel();
                self.scene.apply_preset(preset);
            }
            Command::PointerDown { x, y } => self.pointer(PointerEvent::down(Point::new(x, y))),
            Command::PointerMove { x, y } => self.pointer(PointerEvent::moved(Point::new(x, y))),
            Command::PointerUp { x, y } => self.pointer(PointerEvent::up(Point::new(x, y))),
            Command::Wait { ms } => self.advance(Duration::from_millis(ms)),
        }
        self.tick();
    }

    /// Apply every command in order.
    pub fn run_script(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.apply(command);
        }
    }

    /// Let the clock run until any pending snapshot has been exported.
    ///
    /// Returns true when a snapshot was published.
    pub fn settle(&mut self) -> bool {
        let Some(deadline) = self.exporter.deadline() else {
            return false;
        };
        if deadline > self.clock {
            self.clock = deadline;
        }
        self.tick()
    }

    /// Render the interactive view: selection highlight and drag preview included.
    pub fn render_view(&mut self) -> RenderResult<RasterImage> {
        let selection = parse_or(&self.config.selection_color, SerializableColor::rgb(16, 185, 129));
        let ctx = RenderContext::from_config(&self.scene, &self.config)
            .with_selection(selection)
            .with_drag_preview(self.controller.drag_preview());
        self.view_renderer.render(&ctx)
    }

    /// Write the document, and the image when one exists, into `dir`.
    pub fn write_outputs(&self, dir: &Path) -> AppResult<Outputs> {
        fs::create_dir_all(dir).map_err(|source| AppError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let png = match self.document().snapshot() {
            Some(snapshot) => {
                let path = dir.join(PNG_FILE);
                write_file(&path, &snapshot.png)?;
                Some(path)
            }
            None => {
                log::warn!("no snapshot available; document shows the placeholder");
                None
            }
        };

        let html = dir.join(HTML_FILE);
        write_file(&html, self.document().html_document().as_bytes())?;
        log::info!("wrote floor plan document to {}", html.display());
        Ok(Outputs { html, png })
    }

    fn pointer(&mut self, event: PointerEvent) {
        self.controller.handle_pointer_event(&mut self.scene, event);
    }

    fn advance(&mut self, by: Duration) {
        self.clock += by;
    }

    fn tick(&mut self) -> bool {
        self.exporter.tick(&self.scene, self.clock)
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> AppResult<()> {
    fs::write(path, bytes).map_err(|source| AppError::Io {
        path: path.to_path_buf(),
        source,
    })
}
