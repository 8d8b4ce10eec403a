//! Shared type definitions for the softnav workspace.
//!
//! Everything here is plain data: the engine derives state from these types
//! and the renderer consumes them. No module in this crate performs I/O.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the five configurable button positions in the bar.
///
/// Positions are addressed one-based in configuration and diagnostics, and
/// zero-based via [`SlotPosition::index`] when indexing slot arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotPosition {
    One,
    Two,
    Three,
    Four,
    Five,
}

impl SlotPosition {
    /// All positions in bar order, left to right.
    pub const ALL: [SlotPosition; SLOT_COUNT] = [
        SlotPosition::One,
        SlotPosition::Two,
        SlotPosition::Three,
        SlotPosition::Four,
        SlotPosition::Five,
    ];

    /// Zero-based index into slot arrays.
    pub const fn index(self) -> usize {
        match self {
            SlotPosition::One => 0,
            SlotPosition::Two => 1,
            SlotPosition::Three => 2,
            SlotPosition::Four => 3,
            SlotPosition::Five => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<SlotPosition> {
        SlotPosition::ALL.get(index).copied()
    }

    /// Whether this is one of the two outer positions (1 or 5).
    ///
    /// The outer positions are the only ones that can be configured away
    /// entirely; the visibility machine treats them differently from the
    /// inner group throughout.
    pub const fn is_outer(self) -> bool {
        matches!(self, SlotPosition::One | SlotPosition::Five)
    }
}

impl fmt::Display for SlotPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SlotPosition::One => "one",
            SlotPosition::Two => "two",
            SlotPosition::Three => "three",
            SlotPosition::Four => "four",
            SlotPosition::Five => "five",
        };
        f.write_str(name)
    }
}

/// Number of configurable slots in the bar.
pub const SLOT_COUNT: usize = 5;

/// The five raw slot values as stored in configuration.
///
/// Values are independent and may collide; each position resolves its own
/// value against its own table, so duplicates are legal. Serialization uses
/// the external setting keys (`NAV_BUTTONS_SLOT_ONE`..`FIVE`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotValues {
    #[serde(rename = "NAV_BUTTONS_SLOT_ONE", default = "defaults::slot_one")]
    pub one: u8,
    #[serde(rename = "NAV_BUTTONS_SLOT_TWO", default = "defaults::slot_two")]
    pub two: u8,
    #[serde(rename = "NAV_BUTTONS_SLOT_THREE", default = "defaults::slot_three")]
    pub three: u8,
    #[serde(rename = "NAV_BUTTONS_SLOT_FOUR", default = "defaults::slot_four")]
    pub four: u8,
    #[serde(rename = "NAV_BUTTONS_SLOT_FIVE", default = "defaults::slot_five")]
    pub five: u8,
}

mod defaults {
    pub(super) fn slot_one() -> u8 {
        0
    }
    pub(super) fn slot_two() -> u8 {
        1
    }
    pub(super) fn slot_three() -> u8 {
        2
    }
    pub(super) fn slot_four() -> u8 {
        3
    }
    pub(super) fn slot_five() -> u8 {
        0
    }
}

impl Default for SlotValues {
    fn default() -> Self {
        SlotValues {
            one: defaults::slot_one(),
            two: defaults::slot_two(),
            three: defaults::slot_three(),
            four: defaults::slot_four(),
            five: defaults::slot_five(),
        }
    }
}

impl SlotValues {
    pub const fn get(self, position: SlotPosition) -> u8 {
        match position {
            SlotPosition::One => self.one,
            SlotPosition::Two => self.two,
            SlotPosition::Three => self.three,
            SlotPosition::Four => self.four,
            SlotPosition::Five => self.five,
        }
    }

    pub fn set(&mut self, position: SlotPosition, raw: u8) {
        match position {
            SlotPosition::One => self.one = raw,
            SlotPosition::Two => self.two = raw,
            SlotPosition::Three => self.three = raw,
            SlotPosition::Four => self.four = raw,
            SlotPosition::Five => self.five = raw,
        }
    }

    /// Both outer slots carry a button (raw value non-zero).
    pub const fn both_outer_occupied(self) -> bool {
        self.one != 0 && self.five != 0
    }

    /// Neither outer slot carries a button.
    pub const fn neither_outer_occupied(self) -> bool {
        self.one == 0 && self.five == 0
    }
}

/// Physical key code emitted when a button is pressed.
///
/// Codes follow the Linux input-event numbering so downstream consumers can
/// forward them without translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoftKey {
    Menu,
    Back,
    Home,
    Search,
    MediaPrevious,
    MediaNext,
}

impl SoftKey {
    /// Linux input-event code for this key.
    pub const fn code(self) -> u16 {
        match self {
            SoftKey::Menu => 139,
            SoftKey::Back => 158,
            SoftKey::Home => 172,
            SoftKey::Search => 217,
            SoftKey::MediaPrevious => 165,
            SoftKey::MediaNext => 163,
        }
    }
}

/// The semantic function assigned to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    Menu,
    Back,
    Home,
    Recent,
    Search,
    MediaPrevious,
    MediaNext,
}

impl ButtonAction {
    /// Stable identifier used for external lookup ("find the recent button").
    pub const fn tag(self) -> &'static str {
        match self {
            ButtonAction::Menu => "menu",
            ButtonAction::Back => "back",
            ButtonAction::Home => "home",
            ButtonAction::Recent => "recent",
            ButtonAction::Search => "search",
            ButtonAction::MediaPrevious => "media_previous",
            ButtonAction::MediaNext => "media_next",
        }
    }

    /// Human-readable accessibility description.
    pub const fn label(self) -> &'static str {
        match self {
            ButtonAction::Menu => "Menu",
            ButtonAction::Back => "Back",
            ButtonAction::Home => "Home",
            ButtonAction::Recent => "Recent apps",
            ButtonAction::Search => "Search",
            ButtonAction::MediaPrevious => "Previous track",
            ButtonAction::MediaNext => "Next track",
        }
    }

    /// Key code sent on press. `Recent` is handled by the consumer directly
    /// and carries no physical key.
    pub const fn key(self) -> Option<SoftKey> {
        match self {
            ButtonAction::Menu => Some(SoftKey::Menu),
            ButtonAction::Back => Some(SoftKey::Back),
            ButtonAction::Home => Some(SoftKey::Home),
            ButtonAction::Recent => None,
            ButtonAction::Search => Some(SoftKey::Search),
            ButtonAction::MediaPrevious => Some(SoftKey::MediaPrevious),
            ButtonAction::MediaNext => Some(SoftKey::MediaNext),
        }
    }

    /// Icon variant for the given bar orientation.
    pub const fn icon(self, orientation: Orientation) -> Icon {
        match (self, orientation) {
            (ButtonAction::Menu, Orientation::Portrait) => Icon::Menu,
            (ButtonAction::Menu, Orientation::Landscape) => Icon::MenuSide,
            (ButtonAction::Back, Orientation::Portrait) => Icon::Back,
            (ButtonAction::Back, Orientation::Landscape) => Icon::BackSide,
            (ButtonAction::Home, Orientation::Portrait) => Icon::Home,
            (ButtonAction::Home, Orientation::Landscape) => Icon::HomeSide,
            (ButtonAction::Recent, Orientation::Portrait) => Icon::Recent,
            (ButtonAction::Recent, Orientation::Landscape) => Icon::RecentSide,
            (ButtonAction::Search, Orientation::Portrait) => Icon::Search,
            (ButtonAction::Search, Orientation::Landscape) => Icon::SearchSide,
            (ButtonAction::MediaPrevious, Orientation::Portrait) => Icon::MediaPrevious,
            (ButtonAction::MediaPrevious, Orientation::Landscape) => Icon::MediaPreviousSide,
            (ButtonAction::MediaNext, Orientation::Portrait) => Icon::MediaNext,
            (ButtonAction::MediaNext, Orientation::Landscape) => Icon::MediaNextSide,
        }
    }
}

/// Bar orientation, derived from rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Physical screen rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::Deg0, Rotation::Deg90, Rotation::Deg180, Rotation::Deg270];

    pub const fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    pub fn from_degrees(degrees: u16) -> Option<Rotation> {
        match degrees {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    /// The bar runs along a vertical screen edge at 90 and 270 degrees.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    pub const fn orientation(self) -> Orientation {
        if self.is_vertical() { Orientation::Landscape } else { Orientation::Portrait }
    }

    /// Next rotation clockwise, for the preview's rotate binding.
    pub const fn next(self) -> Rotation {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }
}

/// Visibility of a bar element.
///
/// `Invisible` keeps the element's layout space; `Removed` gives it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    Invisible,
    Removed,
}

impl Visibility {
    pub const fn as_str(self) -> &'static str {
        match self {
            Visibility::Visible => "VISIBLE",
            Visibility::Invisible => "INVISIBLE",
            Visibility::Removed => "REMOVED",
        }
    }

    /// Whether the element still occupies layout space.
    pub const fn takes_space(self) -> bool {
        !matches!(self, Visibility::Removed)
    }

    pub const fn is_visible(self) -> bool {
        matches!(self, Visibility::Visible)
    }
}

/// Bitmask of externally disabled bar functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisabledFlags(u32);

impl DisabledFlags {
    pub const NONE: DisabledFlags = DisabledFlags(0);
    /// Disables the inner navigation group (positions 2-4) and dims the
    /// outer positions to invisible.
    pub const HOME_GROUP: DisabledFlags = DisabledFlags(0x0020_0000);

    pub const fn from_bits(bits: u32) -> DisabledFlags {
        DisabledFlags(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: DisabledFlags) -> bool {
        self.0 & other.0 != 0
    }

    #[must_use]
    pub const fn toggled(self, other: DisabledFlags) -> DisabledFlags {
        DisabledFlags(self.0 ^ other.0)
    }
}

/// Icon resources, one bottom-bar and one side-bar variant per action.
///
/// Each icon has a stable numeric id so diagnostics can resolve names the
/// same way for live and stale references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Menu,
    MenuSide,
    Back,
    BackSide,
    Home,
    HomeSide,
    Recent,
    RecentSide,
    Search,
    SearchSide,
    MediaPrevious,
    MediaPreviousSide,
    MediaNext,
    MediaNextSide,
}

impl Icon {
    pub const ALL: [Icon; 14] = [
        Icon::Menu,
        Icon::MenuSide,
        Icon::Back,
        Icon::BackSide,
        Icon::Home,
        Icon::HomeSide,
        Icon::Recent,
        Icon::RecentSide,
        Icon::Search,
        Icon::SearchSide,
        Icon::MediaPrevious,
        Icon::MediaPreviousSide,
        Icon::MediaNext,
        Icon::MediaNextSide,
    ];

    /// Numeric resource id; 0 is reserved for "no resource".
    pub const fn id(self) -> u16 {
        match self {
            Icon::Menu => 0x11,
            Icon::MenuSide => 0x12,
            Icon::Back => 0x13,
            Icon::BackSide => 0x14,
            Icon::Home => 0x15,
            Icon::HomeSide => 0x16,
            Icon::Recent => 0x17,
            Icon::RecentSide => 0x18,
            Icon::Search => 0x19,
            Icon::SearchSide => 0x1a,
            Icon::MediaPrevious => 0x1b,
            Icon::MediaPreviousSide => 0x1c,
            Icon::MediaNext => 0x1d,
            Icon::MediaNextSide => 0x1e,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Icon::Menu => "navbar_menu",
            Icon::MenuSide => "navbar_menu_side",
            Icon::Back => "navbar_back",
            Icon::BackSide => "navbar_back_side",
            Icon::Home => "navbar_home",
            Icon::HomeSide => "navbar_home_side",
            Icon::Recent => "navbar_recent",
            Icon::RecentSide => "navbar_recent_side",
            Icon::Search => "navbar_search",
            Icon::SearchSide => "navbar_search_side",
            Icon::MediaPrevious => "navbar_media_previous",
            Icon::MediaPreviousSide => "navbar_media_previous_side",
            Icon::MediaNext => "navbar_media_next",
            Icon::MediaNextSide => "navbar_media_next_side",
        }
    }

    pub fn from_id(id: u16) -> Option<Icon> {
        Icon::ALL.iter().copied().find(|icon| icon.id() == id)
    }
}

/// Integer rectangle used by diagnostics to compare window and display
/// geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Bounds {
        Bounds { x, y, width, height }
    }

    pub const fn right(self) -> i64 {
        self.x as i64 + self.width as i64
    }

    pub const fn bottom(self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Compact `[left,top][right,bottom]` form for the diagnostics dump.
    pub fn to_short_string(self) -> String {
        format!("[{},{}][{},{}]", self.x, self.y, self.right(), self.bottom())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_values_default_to_back_home_recent_core() {
        let values = SlotValues::default();
        assert_eq!((values.one, values.two, values.three, values.four, values.five), (0, 1, 2, 3, 0));
    }

    #[test]
    fn slot_values_serialize_with_external_keys() {
        let json = serde_json::to_value(SlotValues::default()).unwrap();
        assert_eq!(json["NAV_BUTTONS_SLOT_ONE"], 0);
        assert_eq!(json["NAV_BUTTONS_SLOT_FOUR"], 3);
    }

    #[test]
    fn slot_values_missing_keys_fall_back_to_defaults() {
        let values: SlotValues = serde_json::from_str(r#"{"NAV_BUTTONS_SLOT_ONE": 2}"#).unwrap();
        assert_eq!(values.one, 2);
        assert_eq!(values.two, 1);
        assert_eq!(values.five, 0);
    }

    #[test]
    fn vertical_matches_rotation_quadrant() {
        assert!(!Rotation::Deg0.is_vertical());
        assert!(Rotation::Deg90.is_vertical());
        assert!(!Rotation::Deg180.is_vertical());
        assert!(Rotation::Deg270.is_vertical());
        assert_eq!(Rotation::Deg180.orientation(), Orientation::Portrait);
        assert_eq!(Rotation::Deg270.orientation(), Orientation::Landscape);
    }

    #[test]
    fn rotation_degrees_round_trip() {
        for rotation in Rotation::ALL {
            assert_eq!(Rotation::from_degrees(rotation.degrees()), Some(rotation));
        }
        assert_eq!(Rotation::from_degrees(45), None);
    }

    #[test]
    fn recent_carries_no_key_code() {
        assert_eq!(ButtonAction::Recent.key(), None);
        for action in [
            ButtonAction::Menu,
            ButtonAction::Back,
            ButtonAction::Home,
            ButtonAction::Search,
            ButtonAction::MediaPrevious,
            ButtonAction::MediaNext,
        ] {
            assert!(action.key().is_some(), "{} should map to a key", action.tag());
        }
    }

    #[test]
    fn icons_pair_by_orientation() {
        assert_eq!(ButtonAction::Back.icon(Orientation::Portrait), Icon::Back);
        assert_eq!(ButtonAction::Back.icon(Orientation::Landscape), Icon::BackSide);
    }

    #[test]
    fn icon_ids_are_unique_and_resolvable() {
        for icon in Icon::ALL {
            assert_eq!(Icon::from_id(icon.id()), Some(icon));
        }
        assert_eq!(Icon::from_id(0), None);
        assert_eq!(Icon::from_id(0xffff), None);
    }

    #[test]
    fn disabled_flags_bit_operations() {
        let flags = DisabledFlags::NONE.toggled(DisabledFlags::HOME_GROUP);
        assert!(flags.contains(DisabledFlags::HOME_GROUP));
        assert_eq!(flags.toggled(DisabledFlags::HOME_GROUP), DisabledFlags::NONE);
    }

    #[test]
    fn bounds_short_string_uses_edges() {
        let bounds = Bounds::new(0, 21, 240, 3);
        assert_eq!(bounds.to_short_string(), "[0,21][240,24]");
    }
}
