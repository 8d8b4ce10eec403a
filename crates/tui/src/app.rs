//! Application state for the preview: the bar, its fade timeline, and the
//! glue the runtime needs (layout probe, notifier channel, hit-test areas).

use std::sync::{Arc, Mutex};
use std::time::Instant;

use ratatui::layout::Rect;
use softnav_engine::{
    LayoutProbe, NavBar, RelayoutRequest, ServiceError, SlotSettings, SystemUiNotifier, schedule_check,
};
use softnav_types::{DisabledFlags, Rotation, SlotPosition};
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

use crate::render;
use crate::timeline::Timeline;

/// Last-known layout measurements, shared with the deferred sanity check.
#[derive(Debug, Default)]
pub struct SharedLayout {
    sizes: Mutex<LayoutSizes>,
}

#[derive(Debug, Default, Clone, Copy)]
struct LayoutSizes {
    bar: (u16, u16),
    view: (u16, u16),
}

impl SharedLayout {
    pub fn set_bar_size(&self, size: (u16, u16)) {
        self.sizes.lock().expect("layout lock poisoned").bar = size;
    }

    pub fn set_view_size(&self, size: (u16, u16)) {
        self.sizes.lock().expect("layout lock poisoned").view = size;
    }
}

impl LayoutProbe for SharedLayout {
    fn bar_size(&self) -> (u16, u16) {
        self.sizes.lock().expect("layout lock poisoned").bar
    }

    fn active_view_size(&self) -> (u16, u16) {
        self.sizes.lock().expect("layout lock poisoned").view
    }
}

/// Notifier that forwards system-UI visibility requests to the runtime loop
/// over a channel, standing in for the platform status service.
pub struct ChannelNotifier {
    tx: UnboundedSender<u32>,
}

impl ChannelNotifier {
    pub fn new(tx: UnboundedSender<u32>) -> ChannelNotifier {
        ChannelNotifier { tx }
    }
}

impl SystemUiNotifier for ChannelNotifier {
    fn set_system_ui_visibility(&self, visibility: u32) -> Result<(), ServiceError> {
        self.tx.send(visibility).map_err(|error| ServiceError::Call(error.to_string()))
    }
}

/// Preview application state.
pub struct App {
    pub bar: NavBar,
    pub timeline: Timeline,
    pub status: String,
    pub dirty: bool,
    /// Hit-test areas recorded during the last draw.
    pub button_areas: Vec<(SlotPosition, Rect)>,
    pub probe: Arc<SharedLayout>,
    relayout_tx: UnboundedSender<RelayoutRequest>,
}

impl App {
    pub fn new(
        settings: SlotSettings,
        rotation: Rotation,
        relayout_tx: UnboundedSender<RelayoutRequest>,
        notifier: ChannelNotifier,
    ) -> App {
        let mut bar = NavBar::new(settings, notifier);
        bar.reorient(rotation);
        let mut app = App {
            bar,
            timeline: Timeline::new(),
            status: String::new(),
            dirty: true,
            button_areas: Vec::new(),
            probe: Arc::new(SharedLayout::default()),
            relayout_tx,
        };
        app.sync_lights();
        app
    }

    /// Pulls any pending lights-out change from the plan into the timeline.
    fn sync_lights(&mut self) {
        let target = self.bar.plan().lights_out;
        if let Some(change) = self.bar.plan_mut().take_lights_change() {
            self.timeline.apply(change, &target, Instant::now());
        }
    }

    pub fn rotate(&mut self) {
        let next = self.bar.state().current_rotation.next();
        self.bar.reorient(next);
        self.sync_lights();
        self.status = format!("rotated to {}°", next.degrees());
        self.dirty = true;
    }

    pub fn toggle_menu(&mut self) {
        let show = !self.bar.state().show_menu;
        self.bar.set_menu_visible(show);
        self.status = format!("menu indicator {}", if show { "requested" } else { "dismissed" });
        self.dirty = true;
    }

    pub fn toggle_low_profile(&mut self) {
        let low = !self.bar.state().low_profile;
        self.bar.set_low_profile(low);
        self.sync_lights();
        self.status = format!("lights {}", if low { "out" } else { "on" });
        self.dirty = true;
    }

    pub fn toggle_disabled(&mut self) {
        let flags = self.bar.state().disabled_flags.toggled(DisabledFlags::HOME_GROUP);
        self.bar.set_disabled_flags(flags);
        self.status = format!("disabled flags now 0x{:08x}", flags.bits());
        self.dirty = true;
    }

    pub fn toggle_hidden(&mut self) {
        let hidden = !self.bar.state().hidden;
        self.bar.set_hidden(hidden);
        self.sync_lights();
        self.status = format!("bar {}", if hidden { "hidden" } else { "shown" });
        self.dirty = true;
    }

    /// Re-reads the slot settings by reorienting in place.
    pub fn reload_slots(&mut self) {
        let rotation = self.bar.state().current_rotation;
        self.bar.reorient(rotation);
        self.sync_lights();
        self.status = "slot settings reloaded".into();
        self.dirty = true;
    }

    /// Pointer press at a terminal position.
    pub fn press_at(&mut self, column: u16, row: u16) {
        if self.bar.state().low_profile {
            // Restore the buttons right away so they can catch the gesture.
            self.bar.pointer_down_on_overlay();
            self.sync_lights();
            self.status = "lights restored".into();
            self.dirty = true;
            return;
        }

        if let Some(position) = render::hit_test(&self.button_areas, column, row) {
            let slot = self.bar.plan().slots[position.index()];
            if slot.visibility.is_visible()
                && let Some(button) = slot.button
            {
                info!(tag = button.tag, "button pressed");
                self.status = match button.key {
                    Some(key) => format!("{} pressed (key {})", button.label, key.code()),
                    None => format!("{} pressed", button.label),
                };
                self.dirty = true;
            }
        }
    }

    /// Terminal resize: remember the bar's expected size and defer the
    /// sanity check comparing it against what actually got drawn.
    pub fn on_resize(&mut self, width: u16, height: u16) {
        let expected = render::bar_area(Rect::new(0, 0, width, height), self.bar.state().vertical);
        self.probe.set_bar_size((expected.width, expected.height));
        let _ = schedule_check(self.probe.clone(), "resize", self.relayout_tx.clone());
        self.dirty = true;
    }

    pub fn on_relayout(&mut self, request: RelayoutRequest) {
        self.status = format!(
            "re-layout requested ({}: bar {}x{}, view {}x{})",
            request.reason, request.bar_size.0, request.bar_size.1, request.view_size.0, request.view_size.1
        );
        self.dirty = true;
    }
}
