//! # Softnav TUI
//!
//! Terminal renderer and interactive preview for the navigation bar. The
//! engine produces a declarative render plan; this crate applies it with
//! ratatui, runs the low-profile fade timelines, and feeds key and pointer
//! input back into the engine.
//!
//! ## Architecture
//!
//! - **`app`**: preview state — the bar, the timeline, hit-test areas, and
//!   the layout probe shared with the deferred sanity check.
//! - **`render`**: draws the plan (bottom bar or right-edge bar) and maps
//!   alphas onto terminal styling.
//! - **`timeline`**: interpolates the engine's fade plans over wall time.
//! - **`runtime`**: terminal lifecycle and the unified event loop.

mod app;
mod render;
mod runtime;
mod timeline;

use anyhow::Result;
use ratatui::layout::Rect;
use softnav_engine::{DumpContext, NavBar, NullNotifier, SlotSettings, dump};
use softnav_types::{Bounds, Rotation, Visibility};

/// Runs the interactive preview until the user quits.
pub async fn run(settings: SlotSettings, rotation: Rotation) -> Result<()> {
    runtime::run_app(settings, rotation).await
}

/// Prints the diagnostics dump for the given settings and rotation.
pub fn dump_to_stdout(settings: SlotSettings, rotation: Rotation) -> Result<()> {
    let mut bar = NavBar::new(settings, NullNotifier);
    bar.reorient(rotation);

    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    let area = render::bar_area(Rect::new(0, 0, width, height), bar.state().vertical);
    let ctx = DumpContext {
        bar_visibility: if bar.state().hidden { Visibility::Invisible } else { Visibility::Visible },
        window: Bounds::new(i32::from(area.x), i32::from(area.y), u32::from(area.width), u32::from(area.height)),
        display_size: (u32::from(width), u32::from(height)),
        view_size: (area.width, area.height),
    };

    let mut out = String::new();
    dump(&bar, &ctx, &mut out)?;
    print!("{out}");
    Ok(())
}
