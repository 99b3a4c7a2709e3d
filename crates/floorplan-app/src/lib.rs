//! Floor-plan Designer Application
//!
//! Headless shell that drives the designer from a command script and
//! assembles the exported snapshot into the event document.

mod app;
pub mod command;
pub mod document;

pub use app::{App, AppError, AppResult, HTML_FILE, Outputs, PNG_FILE};
pub use command::{Command, parse_script};
pub use document::DocumentSlot;
