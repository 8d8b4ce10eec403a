//! Executes the engine's fade plans against wall-clock time.
//!
//! The engine hands over a [`LightsOutChange`] whenever the low-profile
//! target moves; the timeline interpolates alphas from there. Starting a
//! new change always cancels whatever fade is still running, picking up
//! from the current alpha so a reversal mid-fade does not jump.

use std::time::Instant;

use softnav_engine::{EndAction, Fade, LightsOutChange, LightsOutPlan};

#[derive(Debug, Clone, Copy)]
struct RunningFade {
    fade: Fade,
    started: Instant,
    from: f32,
}

impl RunningFade {
    fn alpha_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed < self.fade.delay {
            return self.from;
        }
        let active = elapsed - self.fade.delay;
        if self.fade.duration.is_zero() || active >= self.fade.duration {
            return self.fade.target_alpha;
        }
        let t = active.as_secs_f32() / self.fade.duration.as_secs_f32();
        self.from + (self.fade.target_alpha - self.from) * self.fade.easing.apply(t)
    }

    fn finished_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.fade.delay + self.fade.duration
    }
}

/// Current presentation alphas for the button group and the overlay.
#[derive(Debug)]
pub struct Timeline {
    buttons: Option<RunningFade>,
    overlay: Option<RunningFade>,
    buttons_alpha: f32,
    overlay_alpha: f32,
    overlay_shown: bool,
}

impl Default for Timeline {
    fn default() -> Timeline {
        Timeline {
            buttons: None,
            overlay: None,
            buttons_alpha: 1.0,
            overlay_alpha: 0.0,
            overlay_shown: false,
        }
    }
}

impl Timeline {
    pub fn new() -> Timeline {
        Timeline::default()
    }

    /// Applies a lights-out change from the engine.
    pub fn apply(&mut self, change: LightsOutChange, target: &LightsOutPlan, now: Instant) {
        match change {
            LightsOutChange::Snap => {
                self.buttons = None;
                self.overlay = None;
                self.buttons_alpha = target.buttons_alpha;
                self.overlay_alpha = target.overlay_alpha;
                self.overlay_shown = target.overlay.is_visible();
            }
            LightsOutChange::Animate(transition) => {
                self.buttons = Some(RunningFade {
                    fade: transition.buttons,
                    started: now,
                    from: self.buttons_alpha,
                });
                if transition.entering && !self.overlay_shown {
                    self.overlay_alpha = 0.0;
                    self.overlay_shown = true;
                }
                self.overlay = Some(RunningFade {
                    fade: transition.overlay,
                    started: now,
                    from: self.overlay_alpha,
                });
            }
        }
    }

    /// Advances the running fades. Returns `true` when anything visible
    /// changed and a redraw is due.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if let Some(running) = self.buttons {
            let alpha = running.alpha_at(now);
            if alpha != self.buttons_alpha {
                self.buttons_alpha = alpha;
                changed = true;
            }
            if running.finished_at(now) {
                self.buttons = None;
            }
        }

        if let Some(running) = self.overlay {
            let alpha = running.alpha_at(now);
            if alpha != self.overlay_alpha {
                self.overlay_alpha = alpha;
                changed = true;
            }
            if running.finished_at(now) {
                if running.fade.end == EndAction::RemoveOverlay {
                    self.overlay_shown = false;
                    changed = true;
                }
                self.overlay = None;
            }
        }

        changed
    }

    pub fn is_animating(&self) -> bool {
        self.buttons.is_some() || self.overlay.is_some()
    }

    pub fn buttons_alpha(&self) -> f32 {
        self.buttons_alpha
    }

    pub fn overlay_alpha(&self) -> f32 {
        self.overlay_alpha
    }

    /// Whether the overlay is currently part of the render tree.
    pub fn overlay_shown(&self) -> bool {
        self.overlay_shown
    }
}
