//! The visibility state machine and its declarative output.
//!
//! Every function here is a pure map from the current raw slot values and
//! UI flags to element visibilities. The [`RenderPlan`] they feed is the
//! only interface a renderer needs; recomputing with unchanged inputs
//! always yields the same plan, so forced reapplication is safe.

use softnav_types::{DisabledFlags, Orientation, SLOT_COUNT, SlotPosition, SlotValues, Visibility};

use crate::animation::LowProfileTransition;
use crate::rotation::{VIEW_SET_COUNT, ViewSet};
use crate::slots::{self, SlotPlan};

/// Visibility of the auxiliary spacer elements around the buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacerPlan {
    pub outside: Visibility,
    pub outside_small: Visibility,
    pub inside_one: Visibility,
    pub inside_two: Visibility,
    pub menu: Visibility,
}

/// Lights-out overlay variants, named for the dot count they render.
///
/// The variant tracks how many buttons the bar shows: five with both outer
/// slots occupied, three with neither, four otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightsOutVariant {
    Dots3,
    Dots4,
    Dots5,
}

impl LightsOutVariant {
    pub const fn dot_count(self) -> usize {
        match self {
            LightsOutVariant::Dots3 => 3,
            LightsOutVariant::Dots4 => 4,
            LightsOutVariant::Dots5 => 5,
        }
    }
}

/// Target state of the low-profile presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightsOutPlan {
    /// Whether the bar is currently in low profile.
    pub active: bool,
    pub variant: LightsOutVariant,
    pub overlay: Visibility,
    /// Final overlay alpha once any running fade settles.
    pub overlay_alpha: f32,
    /// Final button-group alpha once any running fade settles.
    pub buttons_alpha: f32,
}

/// How the renderer should bring the lights-out presentation to its new
/// target: jump there or run the fade plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightsOutChange {
    Snap,
    Animate(LowProfileTransition),
}

/// The complete declarative output of the state machine.
///
/// A renderer applies this to whatever UI toolkit is in use; the engine
/// never touches a view tree.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPlan {
    /// Visibility per view set; exactly one is visible.
    pub view_sets: [Visibility; VIEW_SET_COUNT],
    pub active_view_set: ViewSet,
    pub slots: [SlotPlan; SLOT_COUNT],
    pub spacers: SpacerPlan,
    /// The legacy secondary menu indicator, distinct from any slot that
    /// resolves to the Menu action.
    pub menu_stock: Visibility,
    pub lights_out: LightsOutPlan,
    pending_lights_change: Option<LightsOutChange>,
}

impl RenderPlan {
    /// Plan for a freshly constructed bar: upright view set, default slot
    /// values, lights on.
    pub fn initial() -> RenderPlan {
        let values = SlotValues::default();
        let mut slots = [slots::resolve(SlotPosition::One, values.one, Orientation::Portrait); SLOT_COUNT];
        for position in SlotPosition::ALL {
            slots[position.index()] = slots::resolve(position, values.get(position), Orientation::Portrait);
        }
        let (spacers, menu_stock) = spacer_plan(values);
        RenderPlan {
            view_sets: [Visibility::Visible, Visibility::Removed],
            active_view_set: ViewSet::Horizontal,
            slots,
            spacers,
            menu_stock,
            lights_out: LightsOutPlan {
                active: false,
                variant: lights_out_variant(values),
                overlay: Visibility::Removed,
                overlay_alpha: 0.0,
                buttons_alpha: 1.0,
            },
            pending_lights_change: None,
        }
    }

    /// Looks up a resolved slot by button tag.
    pub fn find_button(&self, tag: &str) -> Option<&SlotPlan> {
        self.slots.iter().find(|slot| slot.tag() == Some(tag))
    }

    pub(crate) fn set_lights_change(&mut self, change: LightsOutChange) {
        self.pending_lights_change = Some(change);
    }

    /// Hands the pending lights-out change to the renderer, if any.
    pub fn take_lights_change(&mut self) -> Option<LightsOutChange> {
        self.pending_lights_change.take()
    }
}

/// Final visibility of each slot under the disable mask.
///
/// Disabling the home group blanks the inner positions without collapsing
/// them; the outer positions blank only when they are configured to carry a
/// button at all.
pub fn slot_visibility(values: SlotValues, flags: DisabledFlags) -> [Visibility; SLOT_COUNT] {
    let disabled = flags.contains(DisabledFlags::HOME_GROUP);
    let inner = if disabled { Visibility::Invisible } else { Visibility::Visible };
    let outer = |raw: u8| {
        if raw != 0 {
            inner
        } else {
            Visibility::Removed
        }
    };
    [outer(values.one), inner, inner, inner, outer(values.five)]
}

/// Visibility of the menu-stock indicator.
///
/// The predicate is asymmetric on purpose: the outer slots disqualify when
/// they hold the Menu action (raw `1`), the inner slots disqualify when
/// configured to `0`. Legacy behavior, preserved verbatim.
pub fn menu_stock_visibility(values: SlotValues, show_menu: bool) -> Visibility {
    if values.both_outer_occupied() {
        Visibility::Removed
    } else if values.one == 1 || values.two == 0 || values.three == 0 || values.four == 0 || values.five == 1 {
        Visibility::Removed
    } else if show_menu {
        Visibility::Visible
    } else {
        Visibility::Invisible
    }
}

/// Baseline visibility of the spacers and the menu stock, recomputed
/// whenever the slot values reload ("start clean").
///
/// Returns the spacer plan and the menu-stock baseline; a later
/// [`menu_stock_visibility`] pass overrides the baseline.
pub fn spacer_plan(values: SlotValues) -> (SpacerPlan, Visibility) {
    let (outside, menu_stock) = if values.both_outer_occupied() {
        (Visibility::Removed, Visibility::Removed)
    } else {
        (Visibility::Invisible, Visibility::Invisible)
    };
    let narrow = if values.neither_outer_occupied() {
        Visibility::Invisible
    } else {
        Visibility::Removed
    };
    (
        SpacerPlan {
            outside,
            outside_small: narrow,
            inside_one: narrow,
            inside_two: narrow,
            menu: narrow,
        },
        menu_stock,
    )
}

/// Lights-out overlay variant from outer-slot occupancy.
pub fn lights_out_variant(values: SlotValues) -> LightsOutVariant {
    if values.both_outer_occupied() {
        LightsOutVariant::Dots5
    } else if values.neither_outer_occupied() {
        LightsOutVariant::Dots3
    } else {
        LightsOutVariant::Dots4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(one: u8, two: u8, three: u8, four: u8, five: u8) -> SlotValues {
        SlotValues { one, two, three, four, five }
    }

    #[test]
    fn disable_mask_blanks_inner_positions() {
        let vis = slot_visibility(values(2, 1, 2, 3, 0), DisabledFlags::HOME_GROUP);
        assert_eq!(vis[1], Visibility::Invisible);
        assert_eq!(vis[2], Visibility::Invisible);
        assert_eq!(vis[3], Visibility::Invisible);
    }

    #[test]
    fn disabled_outer_positions_blank_only_when_configured() {
        let vis = slot_visibility(values(2, 1, 2, 3, 0), DisabledFlags::HOME_GROUP);
        assert_eq!(vis[0], Visibility::Invisible);
        assert_eq!(vis[4], Visibility::Removed);
    }

    #[test]
    fn enabled_bar_shows_all_configured_positions() {
        let vis = slot_visibility(values(0, 1, 2, 3, 4), DisabledFlags::NONE);
        assert_eq!(vis[0], Visibility::Removed);
        assert_eq!(vis[1], Visibility::Visible);
        assert_eq!(vis[4], Visibility::Visible);
    }

    #[test]
    fn menu_stock_requires_show_menu() {
        let v = values(2, 1, 2, 3, 0);
        assert_eq!(menu_stock_visibility(v, true), Visibility::Visible);
        assert_eq!(menu_stock_visibility(v, false), Visibility::Invisible);
    }

    #[test]
    fn menu_stock_collapses_when_both_outer_slots_occupied() {
        let v = values(2, 1, 2, 3, 2);
        assert_eq!(menu_stock_visibility(v, true), Visibility::Removed);
        assert_eq!(menu_stock_visibility(v, false), Visibility::Removed);
    }

    #[test]
    fn menu_stock_disqualifiers_are_asymmetric() {
        // Outer slots disqualify on the Menu action (raw 1)...
        assert_eq!(menu_stock_visibility(values(1, 1, 2, 3, 0), true), Visibility::Removed);
        assert_eq!(menu_stock_visibility(values(0, 1, 2, 3, 1), true), Visibility::Removed);
        // ...inner slots disqualify on raw 0 (which resolves to Menu there).
        assert_eq!(menu_stock_visibility(values(0, 0, 2, 3, 0), true), Visibility::Removed);
        assert_eq!(menu_stock_visibility(values(0, 1, 0, 3, 0), true), Visibility::Removed);
        assert_eq!(menu_stock_visibility(values(0, 1, 2, 0, 0), true), Visibility::Removed);
        // An outer raw 0 alone does not disqualify.
        assert_eq!(menu_stock_visibility(values(0, 1, 2, 3, 0), true), Visibility::Visible);
    }

    #[test]
    fn lights_out_variant_tracks_outer_occupancy() {
        assert_eq!(lights_out_variant(values(0, 1, 2, 3, 0)), LightsOutVariant::Dots3);
        assert_eq!(lights_out_variant(values(2, 1, 2, 3, 2)), LightsOutVariant::Dots5);
        assert_eq!(lights_out_variant(values(0, 1, 2, 3, 2)), LightsOutVariant::Dots4);
        assert_eq!(lights_out_variant(values(2, 1, 2, 3, 0)), LightsOutVariant::Dots4);
    }

    #[test]
    fn spacers_collapse_with_both_outer_slots_occupied() {
        let (spacers, menu_stock) = spacer_plan(values(2, 1, 2, 3, 2));
        assert_eq!(spacers.outside, Visibility::Removed);
        assert_eq!(menu_stock, Visibility::Removed);
        assert_eq!(spacers.inside_one, Visibility::Removed);
    }

    #[test]
    fn narrow_spacers_hold_space_only_without_outer_buttons() {
        let (spacers, menu_stock) = spacer_plan(values(0, 1, 2, 3, 0));
        assert_eq!(spacers.outside, Visibility::Invisible);
        assert_eq!(menu_stock, Visibility::Invisible);
        assert_eq!(spacers.outside_small, Visibility::Invisible);
        assert_eq!(spacers.menu, Visibility::Invisible);

        let (spacers, _) = spacer_plan(values(2, 1, 2, 3, 0));
        assert_eq!(spacers.outside_small, Visibility::Removed);
        assert_eq!(spacers.inside_two, Visibility::Removed);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let v = values(3, 0, 2, 3, 1);
        assert_eq!(
            slot_visibility(v, DisabledFlags::HOME_GROUP),
            slot_visibility(v, DisabledFlags::HOME_GROUP)
        );
        assert_eq!(menu_stock_visibility(v, true), menu_stock_visibility(v, true));
        assert_eq!(spacer_plan(v), spacer_plan(v));
    }

    #[test]
    fn find_button_resolves_by_tag() {
        let plan = RenderPlan::initial();
        // Defaults place Back at position two and Recent at position four.
        assert_eq!(plan.find_button("back").map(|s| s.position), Some(SlotPosition::Two));
        assert_eq!(plan.find_button("recent").map(|s| s.position), Some(SlotPosition::Four));
        assert!(plan.find_button("search").is_none());
    }
}
