//! Default geometry, label and color for each item kind.

use super::ItemKind;
use kurbo::Size;

/// Defaults applied to a freshly added item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeDefaults {
    /// Default size; `None` for circular kinds.
    pub size: Option<Size>,
    pub label: &'static str,
    pub color: &'static str,
}

pub const TABLE_COLOR: &str = "#10b981";
pub const CHAIR_COLOR: &str = "#f59e0b";
pub const PROJECTOR_COLOR: &str = "#3b82f6";
pub const MIC_COLOR: &str = "#ef4444";
pub const TEXT_COLOR: &str = "#6b7280";

/// Look up the defaults for `kind`.
pub const fn defaults(kind: ItemKind) -> ShapeDefaults {
    match kind {
        ItemKind::Table => ShapeDefaults {
            size: Some(Size::new(60.0, 30.0)),
            label: "Table",
            color: TABLE_COLOR,
        },
        ItemKind::Chair => ShapeDefaults {
            size: Some(Size::new(20.0, 20.0)),
            label: "",
            color: CHAIR_COLOR,
        },
        ItemKind::Projector => ShapeDefaults {
            size: Some(Size::new(30.0, 30.0)),
            label: "Projector",
            color: PROJECTOR_COLOR,
        },
        ItemKind::Mic => ShapeDefaults {
            size: None,
            label: "Mic",
            color: MIC_COLOR,
        },
        ItemKind::Text => ShapeDefaults {
            size: Some(Size::new(20.0, 20.0)),
            label: "Text",
            color: TEXT_COLOR,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_defaults() {
        let d = defaults(ItemKind::Table);
        assert_eq!(d.size, Some(Size::new(60.0, 30.0)));
        assert_eq!(d.label, "Table");
        assert_eq!(d.color, TABLE_COLOR);
    }

    #[test]
    fn test_mic_has_no_size() {
        let d = defaults(ItemKind::Mic);
        assert!(d.size.is_none());
        assert_eq!(d.label, "Mic");
    }

    #[test]
    fn test_chair_label_is_empty() {
        assert!(defaults(ItemKind::Chair).label.is_empty());
    }

    #[test]
    fn test_every_default_color_parses() {
        for kind in ItemKind::ALL {
            assert!(
                crate::color::SerializableColor::parse(defaults(kind).color).is_some(),
                "{kind:?}"
            );
        }
    }
}
