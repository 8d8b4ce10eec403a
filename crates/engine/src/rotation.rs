//! Rotation handling: four physical rotations share two view sets.
//!
//! The 180-degree bar reuses the upright layout and the 270-degree bar
//! reuses the right-edge layout; an upside-down variant and a mirrored
//! left-edge variant were deliberately never built.

use softnav_types::Rotation;

/// The two concrete bar layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewSet {
    /// Bar along the bottom edge (rotations 0 and 180).
    #[default]
    Horizontal,
    /// Bar along the right edge (rotations 90 and 270).
    Vertical,
}

/// Number of concrete view sets.
pub const VIEW_SET_COUNT: usize = 2;

impl ViewSet {
    pub const fn index(self) -> usize {
        match self {
            ViewSet::Horizontal => 0,
            ViewSet::Vertical => 1,
        }
    }

    /// Resource id used by diagnostics.
    pub const fn id(self) -> u16 {
        match self {
            ViewSet::Horizontal => 0x21,
            ViewSet::Vertical => 0x22,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ViewSet::Horizontal => "navbar_horizontal",
            ViewSet::Vertical => "navbar_vertical",
        }
    }

    pub fn from_id(id: u16) -> Option<ViewSet> {
        match id {
            0x21 => Some(ViewSet::Horizontal),
            0x22 => Some(ViewSet::Vertical),
            _ => None,
        }
    }
}

/// Selects the active view set for a rotation.
pub fn select(rotation: Rotation) -> ViewSet {
    match rotation {
        Rotation::Deg0 | Rotation::Deg180 => ViewSet::Horizontal,
        Rotation::Deg90 | Rotation::Deg270 => ViewSet::Vertical,
    }
}
