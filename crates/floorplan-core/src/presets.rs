//! Preset seating layouts.
//!
//! Both presets are fixed rosters transcribed from real classes, so the
//! ranges and head counts live in static tables instead of being derived.

use crate::shapes::{Item, ItemId, ItemKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};

const WHITE: &str = "#ffffff";
const CYAN: &str = "#00ffff";
const YELLOW: &str = "#ffff00";
const PALE_PURPLE: &str = "#e9d5ff";
const GREEN: &str = "#00ff00";
const ORANGE: &str = "#ff8c00";

/// Named preset layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Five Form 4 classes around a shared equipment row.
    Grid,
    /// Six Form 5 classes in two columns below a projector bar.
    Columns,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Grid, Preset::Columns];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Grid => "grid",
            Preset::Columns => "columns",
        }
    }

    /// Build this preset's items.
    pub fn items(self) -> Vec<Item> {
        match self {
            Preset::Grid => grid(),
            Preset::Columns => columns(),
        }
    }
}

fn table(id: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Item {
    Item::new(ItemId::new(id), ItemKind::Table, Point::new(x, y)).with_size(width, height)
}

/// One class block in the grid layout: three sub-tables from `origin`, `step` apart.
struct GridGroup {
    name: &'static str,
    origin: (f64, f64),
    step: (f64, f64),
    ranges: [&'static str; 3],
    counts: [u32; 3],
    color: &'static str,
}

const GRID_TABLE_SIZE: (f64, f64) = (70.0, 40.0);

const GRID_GROUPS: [GridGroup; 5] = [
    GridGroup {
        name: "4A",
        origin: (40.0, 60.0),
        step: (90.0, 0.0),
        ranges: ["1-9", "10-18", "19-28"],
        counts: [9, 9, 10],
        color: CYAN,
    },
    GridGroup {
        name: "4B",
        origin: (45.0, 110.0),
        step: (90.0, 0.0),
        ranges: ["1-9", "10-18", "19-28"],
        counts: [9, 9, 10],
        color: YELLOW,
    },
    // 4C ends at 27, unlike its neighbours
    GridGroup {
        name: "4C",
        origin: (50.0, 160.0),
        step: (90.0, 0.0),
        ranges: ["1-9", "10-18", "19-27"],
        counts: [9, 9, 9],
        color: CYAN,
    },
    // Vertical column on the right
    GridGroup {
        name: "4D",
        origin: (310.0, 60.0),
        step: (0.0, 50.0),
        ranges: ["1-9", "10-18", "19-26"],
        counts: [9, 9, 8],
        color: PALE_PURPLE,
    },
    // Bottom row
    GridGroup {
        name: "4E",
        origin: (100.0, 210.0),
        step: (90.0, 0.0),
        ranges: ["1-9", "10-18", "19-26"],
        counts: [9, 9, 8],
        color: YELLOW,
    },
];

/// Five class groups around a shared resource row (18 items).
pub fn grid() -> Vec<Item> {
    let mut items = vec![
        table("t1", 20.0, 10.0, 80.0, 30.0).with_label("Table").with_color(WHITE),
        table("t2", 110.0, 10.0, 180.0, 30.0)
            .with_label("Desk (Computer Equipment)")
            .with_color(WHITE),
        table("t3", 300.0, 10.0, 80.0, 30.0).with_label("Table").with_color(WHITE),
    ];

    let (width, height) = GRID_TABLE_SIZE;
    for group in &GRID_GROUPS {
        for (r, (range, count)) in group.ranges.iter().zip(group.counts).enumerate() {
            let x = group.origin.0 + r as f64 * group.step.0;
            let y = group.origin.1 + r as f64 * group.step.1;
            items.push(
                table(format!("{}-{r}", group.name), x, y, width, height)
                    .with_label(format!("{}\n{range} ({count})", group.name))
                    .with_color(group.color),
            );
        }
    }
    items
}

/// One class in the two-column layout.
struct ColumnGroup {
    name: &'static str,
    ranges: [&'static str; 3],
    color: &'static str,
}

const COLUMN_SLOTS: usize = 9;
const COLUMN_X: (f64, f64) = (100.0, 220.0);
const COLUMN_TOP: f64 = 50.0;
const COLUMN_STEP: f64 = 25.0;
const COLUMN_TABLE_SIZE: (f64, f64) = (60.0, 20.0);
const COLUMN_FONT_SIZE: f64 = 8.0;

const LEFT_COLUMN: [ColumnGroup; 3] = [
    ColumnGroup {
        name: "5A",
        ranges: ["1-9", "10-17", "18-26"],
        color: CYAN,
    },
    ColumnGroup {
        name: "5C",
        ranges: ["1-7", "8-14", "15-20"],
        color: GREEN,
    },
    ColumnGroup {
        name: "5E",
        ranges: ["1-9", "10-17", "18-25"],
        color: CYAN,
    },
];

const RIGHT_COLUMN: [ColumnGroup; 3] = [
    ColumnGroup {
        name: "5B",
        ranges: ["1-7", "8-14", "15-21"],
        color: YELLOW,
    },
    ColumnGroup {
        name: "5D",
        ranges: ["1-9", "10-17", "18-26"],
        color: ORANGE,
    },
    ColumnGroup {
        name: "5F",
        ranges: ["1-9", "10-17", "18-26"],
        color: YELLOW,
    },
];

/// Two symmetric columns of three classes each below a projector bar (20 items).
pub fn columns() -> Vec<Item> {
    let mut items = Vec::with_capacity(2 + COLUMN_SLOTS * 2);
    items.push(
        table("p1", 80.0, 10.0, 200.0, 20.0)
            .with_label("Projector\nScreen")
            .with_color(WHITE),
    );
    items.push(
        table("l1", 20.0, 30.0, 80.0, 15.0)
            .with_label("Table\nStaff")
            .with_color(WHITE),
    );

    let (width, height) = COLUMN_TABLE_SIZE;
    for i in 0..COLUMN_SLOTS {
        let group = i / 3;
        let sub = i % 3;
        let y = COLUMN_TOP + i as f64 * COLUMN_STEP;
        for (prefix, x, column) in [("L", COLUMN_X.0, &LEFT_COLUMN), ("R", COLUMN_X.1, &RIGHT_COLUMN)] {
            let class = &column[group];
            items.push(
                table(format!("{prefix}-{i}"), x, y, width, height)
                    .with_label(format!("{}\n{}", class.name, class.ranges[sub]))
                    .with_color(class.color)
                    .with_font_size(COLUMN_FONT_SIZE),
            );
        }
    }
    items
}
