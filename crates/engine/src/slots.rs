//! Slot resolution: maps a position's configured raw value to the button
//! occupying that position.
//!
//! Each of the five positions has its own value table. The tables are
//! deliberate per-position permutations of the same action set (raw `2`
//! means Back at position one but Home at position three), so they are kept
//! as one data table rather than normalized. Positions one and five treat
//! raw `0` and out-of-range values as "no button"; the inner positions
//! never hide and fall back to their designated default action instead.

use softnav_types::{ButtonAction, Icon, Orientation, SlotPosition, SoftKey, Visibility};

/// One table cell: either a button action or an empty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Hidden,
    Action(ButtonAction),
}

/// Value table for a single position.
struct SlotTable {
    cells: [Cell; 8],
    /// Applied to any raw value outside `0..8`.
    fallback: Cell,
}

use Cell::{Action, Hidden};
use softnav_types::ButtonAction::{Back, Home, MediaNext, MediaPrevious, Menu, Recent, Search};

const TABLES: [SlotTable; softnav_types::SLOT_COUNT] = [
    // Position one: hides on 0, full action range on 1..=7.
    SlotTable {
        cells: [
            Hidden,
            Action(Menu),
            Action(Back),
            Action(Home),
            Action(Recent),
            Action(Search),
            Action(MediaPrevious),
            Action(MediaNext),
        ],
        fallback: Hidden,
    },
    // Position two: 0 is Menu, default action Back.
    SlotTable {
        cells: [
            Action(Menu),
            Action(Back),
            Action(Home),
            Action(Recent),
            Action(Search),
            Action(MediaPrevious),
            Action(MediaNext),
            Action(Back),
        ],
        fallback: Action(Back),
    },
    // Position three: 0 is Menu, default action Home.
    SlotTable {
        cells: [
            Action(Menu),
            Action(Back),
            Action(Home),
            Action(Recent),
            Action(Search),
            Action(MediaPrevious),
            Action(MediaNext),
            Action(Home),
        ],
        fallback: Action(Home),
    },
    // Position four: 0 is Menu, default action Recent.
    SlotTable {
        cells: [
            Action(Menu),
            Action(Back),
            Action(Home),
            Action(Recent),
            Action(Search),
            Action(MediaPrevious),
            Action(MediaNext),
            Action(Recent),
        ],
        fallback: Action(Recent),
    },
    // Position five: mirrors position one.
    SlotTable {
        cells: [
            Hidden,
            Action(Menu),
            Action(Back),
            Action(Home),
            Action(Recent),
            Action(Search),
            Action(MediaPrevious),
            Action(MediaNext),
        ],
        fallback: Hidden,
    },
];

/// A resolved button: everything the renderer needs to draw and dispatch it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonPlan {
    pub action: ButtonAction,
    /// Stable identifier for external lookup.
    pub tag: &'static str,
    pub icon: Icon,
    /// Accessibility description.
    pub label: &'static str,
    /// Key code emitted on press; `None` for Recent.
    pub key: Option<SoftKey>,
}

impl ButtonPlan {
    fn new(action: ButtonAction, orientation: Orientation) -> ButtonPlan {
        ButtonPlan {
            action,
            tag: action.tag(),
            icon: action.icon(orientation),
            label: action.label(),
            key: action.key(),
        }
    }
}

/// The resolved state of one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotPlan {
    pub position: SlotPosition,
    /// Raw configured value this plan was resolved from.
    pub raw: u8,
    /// `None` when the slot is configured empty.
    pub button: Option<ButtonPlan>,
    pub visibility: Visibility,
}

impl SlotPlan {
    /// Tag of the occupying button, if any.
    pub fn tag(&self) -> Option<&'static str> {
        self.button.map(|button| button.tag)
    }
}

/// Resolves a single slot. Pure: no shared state is read or written.
pub fn resolve(position: SlotPosition, raw: u8, orientation: Orientation) -> SlotPlan {
    let table = &TABLES[position.index()];
    let cell = match table.cells.get(raw as usize) {
        Some(cell) => *cell,
        None => table.fallback,
    };
    match cell {
        Cell::Hidden => SlotPlan {
            position,
            raw,
            button: None,
            visibility: Visibility::Removed,
        },
        Cell::Action(action) => SlotPlan {
            position,
            raw,
            button: Some(ButtonPlan::new(action, orientation)),
            visibility: Visibility::Visible,
        },
    }
}
