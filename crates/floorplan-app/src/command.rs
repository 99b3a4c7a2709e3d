//! Scripted designer commands.
//!
//! A script is one JSON object per line, tagged by `op`:
//!
//! ```text
//! {"op":"preset","preset":"grid"}
//! {"op":"pointer_down","x":120,"y":130}
//! {"op":"pointer_up","x":180,"y":150}
//! {"op":"wait","ms":500}
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use crate::AppError;
use floorplan_core::{ItemId, ItemKind, ItemPatch, Preset};
use serde::{Deserialize, Serialize};

/// One designer action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    /// Add an item of `kind` at the default position and select it.
    Add { kind: ItemKind },
    Remove { id: ItemId },
    /// Select `id`, or clear the selection when omitted.
    Select {
        #[serde(default)]
        id: Option<ItemId>,
    },
    Update {
        id: ItemId,
        #[serde(default)]
        patch: ItemPatch,
    },
    /// Relabel the selected item.
    SetLabel { label: String },
    /// Recolor the selected item.
    SetColor { color: String },
    DeleteSelected,
    Preset { preset: Preset },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    /// Let `ms` milliseconds pass.
    Wait { ms: u64 },
}

/// Parse a command script.
pub fn parse_script(script: &str) -> Result<Vec<Command>, AppError> {
    script
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line_no, line)| {
            serde_json::from_str(line).map_err(|source| AppError::Script {
                line: line_no,
                source,
            })
        })
        .collect()
}
