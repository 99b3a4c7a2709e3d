//! Floor-plan Core Library
//!
//! Platform-agnostic scene model, preset layouts and interaction logic for the
//! floor-plan designer.

pub mod color;
pub mod config;
pub mod controller;
pub mod input;
pub mod presets;
pub mod scene;
pub mod schedule;
pub mod shapes;

pub use color::SerializableColor;
pub use config::{ConfigError, ConfigResult, DesignerConfig};
pub use controller::{DragState, InteractionController, InteractionState};
pub use input::{MouseButton, PointerEvent};
pub use presets::Preset;
pub use scene::Scene;
pub use schedule::SnapshotSchedule;
pub use shapes::{Item, ItemId, ItemKind, ItemPatch};
