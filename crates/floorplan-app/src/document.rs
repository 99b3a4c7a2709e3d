//! The floor-plan slot of the generated event document.

use floorplan_render::{Snapshot, SnapshotSink};

/// Text shown until the first snapshot arrives.
pub const PLACEHOLDER: &str = "Floor plan in progress...";

/// Holds the latest exported snapshot for embedding.
#[derive(Debug, Clone, Default)]
pub struct DocumentSlot {
    snapshot: Option<Snapshot>,
}

impl DocumentSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.snapshot.is_some()
    }

    /// HTML for the slot: the image, or the placeholder text.
    pub fn html_fragment(&self) -> String {
        match &self.snapshot {
            Some(snapshot) => format!(
                r#"<img src="{}" width="{}" height="{}" alt="Floor plan">"#,
                snapshot.data_uri(),
                snapshot.width,
                snapshot.height
            ),
            None => format!(r#"<p class="placeholder">{PLACEHOLDER}</p>"#),
        }
    }

    /// A standalone page around [`DocumentSlot::html_fragment`].
    pub fn html_document(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Floor plan</title></head>\n<body>\n<section id=\"floor-plan\">\n{}\n</section>\n</body>\n</html>\n",
            self.html_fragment()
        )
    }
}

impl SnapshotSink for DocumentSlot {
    fn publish(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
    }
}
