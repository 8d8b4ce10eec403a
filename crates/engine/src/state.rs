//! Bar state and the setters that drive the visibility machine.
//!
//! [`NavBar`] owns the session state, the declarative [`RenderPlan`], an
//! injected settings source, and the outbound status-service seam. All
//! mutation goes through the setters here; each setter recomputes only the
//! plan fragments its inputs feed, and every setter has a forced variant
//! that reapplies even when the target is unchanged (used after a
//! reorientation to push the plan back into compliance).

use softnav_types::{DisabledFlags, Orientation, Rotation, SlotPosition, SlotValues, Visibility};
use tracing::{debug, info};

use crate::animation;
use crate::rotation::{self, VIEW_SET_COUNT, ViewSet};
use crate::service::SystemUiNotifier;
use crate::settings::SettingsSource;
use crate::slots::{self, SlotPlan};
use crate::visibility::{self, LightsOutChange, RenderPlan};

/// Session-scoped bar state. Mutated only through [`NavBar`] setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavBarState {
    pub disabled_flags: DisabledFlags,
    pub hidden: bool,
    pub low_profile: bool,
    pub show_menu: bool,
    /// Always equal to `current_rotation.is_vertical()`.
    pub vertical: bool,
    pub current_rotation: Rotation,
    pub orientation: Orientation,
}

impl Default for NavBarState {
    fn default() -> NavBarState {
        NavBarState {
            disabled_flags: DisabledFlags::NONE,
            hidden: false,
            low_profile: false,
            show_menu: false,
            vertical: false,
            current_rotation: Rotation::Deg0,
            orientation: Orientation::Portrait,
        }
    }
}

/// The navigation bar: state machine plus declarative render output.
pub struct NavBar {
    state: NavBarState,
    slots: SlotValues,
    plan: RenderPlan,
    settings: Box<dyn SettingsSource>,
    notifier: Box<dyn SystemUiNotifier>,
}

impl NavBar {
    /// Builds a bar with default state and a coherent initial plan for
    /// rotation 0. Slot values are loaded from `settings` immediately.
    pub fn new(settings: impl SettingsSource + 'static, notifier: impl SystemUiNotifier + 'static) -> NavBar {
        let mut bar = NavBar {
            state: NavBarState::default(),
            slots: SlotValues::default(),
            plan: RenderPlan::initial(),
            settings: Box::new(settings),
            notifier: Box::new(notifier),
        };
        bar.reorient(Rotation::Deg0);
        bar
    }

    pub fn state(&self) -> &NavBarState {
        &self.state
    }

    /// Raw slot values the current plan was resolved from.
    pub fn slot_values(&self) -> SlotValues {
        self.slots
    }

    pub fn plan(&self) -> &RenderPlan {
        &self.plan
    }

    pub fn plan_mut(&mut self) -> &mut RenderPlan {
        &mut self.plan
    }

    /// Looks up a resolved slot by button tag (for example `"recent"`).
    pub fn find_button(&self, tag: &str) -> Option<&SlotPlan> {
        self.plan.find_button(tag)
    }

    /// Reloads the five raw values and rebuilds the slot plans plus the
    /// spacer and menu-stock baseline. Starts clean: every auxiliary
    /// element is reset before the flag setters reapply on top.
    pub fn refresh_slots(&mut self) {
        self.slots = self.settings.reload();
        for position in SlotPosition::ALL {
            self.plan.slots[position.index()] =
                slots::resolve(position, self.slots.get(position), self.state.orientation);
        }
        let (spacers, menu_stock) = visibility::spacer_plan(self.slots);
        self.plan.spacers = spacers;
        self.plan.menu_stock = menu_stock;
    }

    pub fn set_disabled_flags(&mut self, flags: DisabledFlags) {
        self.set_disabled_flags_forced(flags, false);
    }

    pub fn set_disabled_flags_forced(&mut self, flags: DisabledFlags, force: bool) {
        if !force && self.state.disabled_flags == flags {
            return;
        }
        self.state.disabled_flags = flags;

        let per_slot = visibility::slot_visibility(self.slots, flags);
        for (slot, vis) in self.plan.slots.iter_mut().zip(per_slot) {
            slot.visibility = vis;
        }
    }

    pub fn set_menu_visible(&mut self, show: bool) {
        self.set_menu_visible_forced(show, false);
    }

    pub fn set_menu_visible_forced(&mut self, show: bool, force: bool) {
        if !force && self.state.show_menu == show {
            return;
        }
        self.state.show_menu = show;
        self.plan.menu_stock = visibility::menu_stock_visibility(self.slots, show);
    }

    pub fn set_low_profile(&mut self, low_profile: bool) {
        self.set_low_profile_with(low_profile, true, false);
    }

    /// Enters or leaves low profile.
    ///
    /// Non-forced calls with an unchanged target are no-ops; `force`
    /// reapplies unconditionally. The plan always carries the settled
    /// target alphas; with `animate` the renderer additionally receives the
    /// fade plan, replacing any fade still running.
    pub fn set_low_profile_with(&mut self, low_profile: bool, animate: bool, force: bool) {
        if !force && low_profile == self.state.low_profile {
            return;
        }
        self.state.low_profile = low_profile;

        debug!("setting lights {}", if low_profile { "out" } else { "on" });

        let lights = &mut self.plan.lights_out;
        lights.active = low_profile;
        lights.variant = visibility::lights_out_variant(self.slots);
        lights.buttons_alpha = if low_profile { 0.0 } else { 1.0 };
        lights.overlay_alpha = if low_profile { 1.0 } else { 0.0 };
        lights.overlay = if low_profile { Visibility::Visible } else { Visibility::Removed };

        let change = if animate {
            LightsOutChange::Animate(animation::low_profile_transition(low_profile))
        } else {
            LightsOutChange::Snap
        };
        self.plan.set_lights_change(change);
    }

    /// Hides or shows the whole bar. Change-detected; hiding always brings
    /// the lights back up so the bar reappears at full visibility.
    pub fn set_hidden(&mut self, hidden: bool) {
        if hidden == self.state.hidden {
            return;
        }
        self.state.hidden = hidden;
        info!("{} navigation bar", if hidden { "hiding" } else { "showing" });

        self.set_low_profile(false);
    }

    /// Applies a rotation change: reloads slot values, swaps the view set,
    /// and forces the low-profile, disabled, and menu states back into
    /// compliance on the fresh plan.
    pub fn reorient(&mut self, rotation: Rotation) {
        self.state.current_rotation = rotation;
        self.state.vertical = rotation.is_vertical();
        self.state.orientation = rotation.orientation();

        let selected = rotation::select(rotation);
        self.plan.view_sets = [Visibility::Removed; VIEW_SET_COUNT];
        self.plan.view_sets[selected.index()] = Visibility::Visible;
        self.plan.active_view_set = selected;

        self.refresh_slots();

        self.set_low_profile_with(self.state.low_profile, false, true);
        self.set_disabled_flags_forced(self.state.disabled_flags, true);
        self.set_menu_visible_forced(self.state.show_menu, true);

        debug!(rotation = rotation.degrees(), "reoriented navigation bar");
    }

    /// Initial touch-down on the lights-out overlay: restore the buttons
    /// immediately (no animation) so they can catch the gesture, and ask
    /// the status service to bring system UI to full visibility.
    /// A service failure is logged and discarded.
    pub fn pointer_down_on_overlay(&mut self) {
        self.set_low_profile_with(false, false, false);

        if let Err(error) = self.notifier.set_system_ui_visibility(0) {
            debug!(%error, "system-ui visibility notification failed; ignoring");
        }
    }

    /// The view set a given rotation would select.
    pub fn view_set_for(rotation: Rotation) -> ViewSet {
        rotation::select(rotation)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::service::{NullNotifier, ServiceError};
    use crate::visibility::LightsOutVariant;

    /// Notifier recording every visibility request, optionally failing.
    struct RecordingNotifier {
        calls: Rc<RefCell<Vec<u32>>>,
        fail: bool,
    }

    impl SystemUiNotifier for RecordingNotifier {
        fn set_system_ui_visibility(&self, visibility: u32) -> Result<(), ServiceError> {
            self.calls.borrow_mut().push(visibility);
            if self.fail { Err(ServiceError::Unavailable) } else { Ok(()) }
        }
    }

    fn values(one: u8, two: u8, three: u8, four: u8, five: u8) -> SlotValues {
        SlotValues { one, two, three, four, five }
    }

    fn bar_with(slots: SlotValues) -> NavBar {
        NavBar::new(slots, NullNotifier)
    }

    #[test]
    fn construction_loads_settings_and_builds_a_coherent_plan() {
        let mut bar = bar_with(values(2, 1, 2, 3, 0));
        bar.plan_mut().take_lights_change();

        assert_eq!(bar.slot_values().one, 2);
        assert_eq!(bar.find_button("back").map(|s| s.position), Some(SlotPosition::One));
        assert!(!bar.state().low_profile);
        assert_eq!(bar.plan().lights_out.variant, LightsOutVariant::Dots4);
    }

    #[test]
    fn reorient_aliases_rotations_onto_shared_view_sets() {
        let mut bar = bar_with(SlotValues::default());

        bar.reorient(Rotation::Deg180);
        assert_eq!(bar.plan().active_view_set, ViewSet::Horizontal);
        assert!(!bar.state().vertical);

        bar.reorient(Rotation::Deg270);
        assert_eq!(bar.plan().active_view_set, ViewSet::Vertical);
        assert!(bar.state().vertical);
        assert_eq!(bar.plan().view_sets[ViewSet::Horizontal.index()], Visibility::Removed);
        assert_eq!(bar.plan().view_sets[ViewSet::Vertical.index()], Visibility::Visible);
    }

    #[test]
    fn reorient_swaps_icon_variants() {
        let mut bar = bar_with(SlotValues::default());
        let portrait_icon = bar.find_button("back").unwrap().button.unwrap().icon;
        bar.reorient(Rotation::Deg90);
        let landscape_icon = bar.find_button("back").unwrap().button.unwrap().icon;
        assert_ne!(portrait_icon, landscape_icon);
    }

    #[test]
    fn forced_recomputation_is_idempotent() {
        let mut bar = bar_with(values(2, 0, 2, 3, 1));
        bar.set_menu_visible(true);
        bar.set_disabled_flags(DisabledFlags::HOME_GROUP);

        bar.reorient(Rotation::Deg90);
        bar.plan_mut().take_lights_change();
        let first = bar.plan().clone();

        bar.reorient(Rotation::Deg90);
        bar.plan_mut().take_lights_change();
        assert_eq!(bar.plan(), &first);
    }

    #[test]
    fn unforced_setters_skip_unchanged_targets() {
        let shared = Rc::new(RefCell::new(values(0, 1, 2, 3, 0)));

        struct SharedSource(Rc<RefCell<SlotValues>>);
        impl SettingsSource for SharedSource {
            fn reload(&mut self) -> SlotValues {
                *self.0.borrow()
            }
        }

        let mut bar = NavBar::new(SharedSource(Rc::clone(&shared)), NullNotifier);
        bar.set_menu_visible(true);
        assert_eq!(bar.plan().menu_stock, Visibility::Visible);

        // The raw values change underneath, but a same-target call must not
        // recompute...
        shared.borrow_mut().five = 1;
        bar.refresh_slots();
        bar.set_menu_visible(true);
        assert_eq!(bar.plan().menu_stock, Visibility::Invisible); // baseline from refresh only

        // ...while a forced call re-executes the predicate.
        bar.set_menu_visible_forced(true, true);
        assert_eq!(bar.plan().menu_stock, Visibility::Removed);
    }

    #[test]
    fn disable_respects_slot_configuration() {
        let mut bar = bar_with(values(2, 1, 2, 3, 0));
        bar.set_disabled_flags(DisabledFlags::HOME_GROUP);

        let plan = bar.plan();
        assert_eq!(plan.slots[0].visibility, Visibility::Invisible);
        assert_eq!(plan.slots[1].visibility, Visibility::Invisible);
        assert_eq!(plan.slots[4].visibility, Visibility::Removed);

        bar.set_disabled_flags(DisabledFlags::NONE);
        assert_eq!(bar.plan().slots[0].visibility, Visibility::Visible);
        assert_eq!(bar.plan().slots[4].visibility, Visibility::Removed);
    }

    #[test]
    fn low_profile_animates_only_when_asked() {
        let mut bar = bar_with(SlotValues::default());
        bar.plan_mut().take_lights_change();

        bar.set_low_profile(true);
        match bar.plan_mut().take_lights_change() {
            Some(LightsOutChange::Animate(transition)) => assert!(transition.entering),
            other => panic!("expected an animated change, got {other:?}"),
        }
        assert_eq!(bar.plan().lights_out.buttons_alpha, 0.0);
        assert_eq!(bar.plan().lights_out.overlay, Visibility::Visible);

        bar.set_low_profile_with(false, false, false);
        assert_eq!(bar.plan_mut().take_lights_change(), Some(LightsOutChange::Snap));
        assert_eq!(bar.plan().lights_out.overlay, Visibility::Removed);
    }

    #[test]
    fn unforced_low_profile_with_unchanged_target_is_a_no_op() {
        let mut bar = bar_with(SlotValues::default());
        bar.plan_mut().take_lights_change();

        bar.set_low_profile(false);
        assert_eq!(bar.plan_mut().take_lights_change(), None);

        bar.set_low_profile_with(false, true, true);
        assert!(bar.plan_mut().take_lights_change().is_some());
    }

    #[test]
    fn hiding_brings_the_lights_back_up() {
        let mut bar = bar_with(SlotValues::default());
        bar.set_low_profile(true);
        bar.plan_mut().take_lights_change();

        bar.set_hidden(true);
        assert!(bar.state().hidden);
        assert!(!bar.state().low_profile);
        match bar.plan_mut().take_lights_change() {
            Some(LightsOutChange::Animate(transition)) => assert!(!transition.entering),
            other => panic!("expected an animated change, got {other:?}"),
        }

        // Same target again: no state change, no lights touch.
        bar.set_hidden(true);
        assert_eq!(bar.plan_mut().take_lights_change(), None);
    }

    #[test]
    fn overlay_pointer_down_restores_and_notifies() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let notifier = RecordingNotifier { calls: Rc::clone(&calls), fail: false };
        let mut bar = NavBar::new(SlotValues::default(), notifier);
        bar.set_low_profile(true);

        bar.pointer_down_on_overlay();
        assert!(!bar.state().low_profile);
        assert_eq!(bar.plan_mut().take_lights_change(), Some(LightsOutChange::Snap));
        assert_eq!(calls.borrow().as_slice(), &[0]);
    }

    #[test]
    fn notifier_failure_is_swallowed() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let notifier = RecordingNotifier { calls: Rc::clone(&calls), fail: true };
        let mut bar = NavBar::new(SlotValues::default(), notifier);
        bar.set_low_profile(true);

        bar.pointer_down_on_overlay();
        assert!(!bar.state().low_profile);
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn vertical_invariant_holds_across_all_rotations() {
        let mut bar = bar_with(SlotValues::default());
        for rotation in Rotation::ALL {
            bar.reorient(rotation);
            assert_eq!(bar.state().vertical, rotation.is_vertical());
        }
    }
}
