//! # Softnav Engine
//!
//! The state engine behind the configurable navigation bar: it resolves the
//! five user-configurable slots into concrete buttons, tracks the bar's
//! visual state (hidden, low-profile, menu indicator, disable mask,
//! rotation), and emits a declarative [`RenderPlan`] for a replaceable
//! renderer to apply.
//!
//! ## Architecture
//!
//! - **`slots`**: the data-driven `position x raw value -> action` table.
//! - **`rotation`**: physical rotations aliased onto two concrete view sets.
//! - **`visibility`**: pure visibility recomputation and the render plan.
//! - **`animation`**: fade plans for the low-profile transition.
//! - **`state`**: [`NavBar`], the owner of all mutable state and setters.
//! - **`settings`**: the JSON-backed slot-value store.
//! - **`layout`**: the deferred layout-sanity check.
//! - **`diagnostics`**: the structured text dump.
//! - **`service`**: the outbound status-service seam.
//!
//! The engine performs no rendering and owns no view tree; everything a
//! renderer needs is in the plan, and everything the engine needs back is
//! behind the [`LayoutProbe`] and [`SystemUiNotifier`] traits.
//!
//! ## Usage
//!
//! ```
//! use softnav_engine::{NavBar, NullNotifier};
//! use softnav_types::{Rotation, SlotValues};
//!
//! let mut bar = NavBar::new(SlotValues::default(), NullNotifier);
//! bar.reorient(Rotation::Deg90);
//! assert!(bar.state().vertical);
//! let back = bar.find_button("back").expect("default layout has a back button");
//! assert_eq!(back.position.index(), 1);
//! ```

pub mod animation;
pub mod diagnostics;
pub mod layout;
pub mod rotation;
pub mod service;
pub mod settings;
pub mod slots;
pub mod state;
pub mod visibility;

// Re-export commonly used types for convenience
pub use animation::{Easing, EndAction, Fade, LowProfileTransition, low_profile_transition};
pub use diagnostics::{DumpContext, dump, resource_name};
pub use layout::{CHECK_DELAY, LayoutProbe, RelayoutRequest, schedule_check};
pub use rotation::{VIEW_SET_COUNT, ViewSet};
pub use service::{NullNotifier, ServiceError, SystemUiNotifier};
pub use settings::{SETTINGS_PATH_ENV, SettingsError, SettingsSource, SlotSettings};
pub use slots::{ButtonPlan, SlotPlan, resolve};
pub use state::{NavBar, NavBarState};
pub use visibility::{LightsOutChange, LightsOutPlan, LightsOutVariant, RenderPlan, SpacerPlan};
