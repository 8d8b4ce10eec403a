//! Fade plans for the low-profile ("lights out") transition.
//!
//! The engine never animates anything itself; it emits a declarative plan
//! with the exact timings and leaves interpolation to the renderer.

use std::time::Duration;

/// Button group fade-out duration when entering low profile.
pub const BUTTONS_FADE_OUT: Duration = Duration::from_millis(600);
/// Button group fade-in duration when leaving low profile.
pub const BUTTONS_FADE_IN: Duration = Duration::from_millis(200);
/// Overlay fade-in start delay when entering low profile.
pub const OVERLAY_FADE_IN_DELAY: Duration = Duration::from_millis(500);
/// Overlay fade-in duration when entering low profile.
pub const OVERLAY_FADE_IN: Duration = Duration::from_millis(1000);
/// Overlay fade-out duration when leaving low profile.
pub const OVERLAY_FADE_OUT: Duration = Duration::from_millis(300);

/// Interpolation curve for a fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Accelerating start, `f(t) = t^2`.
    QuadraticIn,
}

impl Easing {
    /// Maps linear progress `t` in `0.0..=1.0` onto the curve.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadraticIn => t * t,
        }
    }
}

/// What the renderer does once a fade completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndAction {
    None,
    /// Drop the lights-out overlay from the render tree.
    RemoveOverlay,
}

/// A single alpha fade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub target_alpha: f32,
    pub delay: Duration,
    pub duration: Duration,
    pub easing: Easing,
    pub end: EndAction,
}

/// The two coordinated fades of one low-profile transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LowProfileTransition {
    /// `true` when entering low profile, `false` when leaving.
    pub entering: bool,
    /// Fade applied to the primary button group.
    pub buttons: Fade,
    /// Fade applied to the lights-out overlay.
    pub overlay: Fade,
}

/// Builds the transition plan for entering or leaving low profile.
pub fn low_profile_transition(entering: bool) -> LowProfileTransition {
    let buttons = Fade {
        target_alpha: if entering { 0.0 } else { 1.0 },
        delay: Duration::ZERO,
        duration: if entering { BUTTONS_FADE_OUT } else { BUTTONS_FADE_IN },
        easing: Easing::Linear,
        end: EndAction::None,
    };
    let overlay = Fade {
        target_alpha: if entering { 1.0 } else { 0.0 },
        delay: if entering { OVERLAY_FADE_IN_DELAY } else { Duration::ZERO },
        duration: if entering { OVERLAY_FADE_IN } else { OVERLAY_FADE_OUT },
        easing: Easing::QuadraticIn,
        end: if entering { EndAction::None } else { EndAction::RemoveOverlay },
    };
    LowProfileTransition { entering, buttons, overlay }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entering_uses_slow_fade_and_delayed_overlay() {
        let transition = low_profile_transition(true);
        assert_eq!(transition.buttons.target_alpha, 0.0);
        assert_eq!(transition.buttons.duration, Duration::from_millis(600));
        assert_eq!(transition.overlay.target_alpha, 1.0);
        assert_eq!(transition.overlay.delay, Duration::from_millis(500));
        assert_eq!(transition.overlay.duration, Duration::from_millis(1000));
        assert_eq!(transition.overlay.end, EndAction::None);
    }

    #[test]
    fn leaving_is_fast_and_removes_the_overlay() {
        let transition = low_profile_transition(false);
        assert_eq!(transition.buttons.target_alpha, 1.0);
        assert_eq!(transition.buttons.duration, Duration::from_millis(200));
        assert_eq!(transition.overlay.delay, Duration::ZERO);
        assert_eq!(transition.overlay.duration, Duration::from_millis(300));
        assert_eq!(transition.overlay.end, EndAction::RemoveOverlay);
    }

    #[test]
    fn quadratic_easing_accelerates() {
        assert_eq!(Easing::QuadraticIn.apply(0.5), 0.25);
        assert_eq!(Easing::QuadraticIn.apply(1.0), 1.0);
        assert_eq!(Easing::Linear.apply(0.5), 0.5);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }
}
