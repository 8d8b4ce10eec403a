//! State introspection: a structured text dump of the bar.
//!
//! The dump is debugging output; a lookup that cannot be resolved degrades
//! to a placeholder instead of failing the dump.

use std::fmt;

use softnav_types::{Bounds, Icon, Visibility};

use crate::rotation::ViewSet;
use crate::state::NavBar;

/// Geometry supplied by the renderer for the dump: where the bar's window
/// sits, how large the display is, and the measured size of the active
/// view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpContext {
    pub bar_visibility: Visibility,
    pub window: Bounds,
    pub display_size: (u32, u32),
    pub view_size: (u16, u16),
}

/// Resolves a resource id to its name.
///
/// Returns `"(none)"` for the null id and `"(unknown)"` for ids that no
/// longer (or never did) resolve, so stale references cannot fail a dump.
pub fn resource_name(id: u16) -> &'static str {
    if id == 0 {
        return "(none)";
    }
    if let Some(icon) = Icon::from_id(id) {
        return icon.name();
    }
    if let Some(set) = ViewSet::from_id(id) {
        return set.name();
    }
    "(unknown)"
}

/// Writes the diagnostics dump for the bar.
pub fn dump<W: fmt::Write>(bar: &NavBar, ctx: &DumpContext, out: &mut W) -> fmt::Result {
    let state = bar.state();
    let plan = bar.plan();

    writeln!(out, "NavigationBar {{")?;

    let offscreen =
        ctx.window.right() > i64::from(ctx.display_size.0) || ctx.window.bottom() > i64::from(ctx.display_size.1);
    writeln!(
        out,
        "      window: {} {}{}",
        ctx.window.to_short_string(),
        ctx.bar_visibility.as_str(),
        if offscreen { " OFFSCREEN!" } else { "" }
    )?;

    let active = plan.active_view_set;
    writeln!(
        out,
        "      active view: id={} ({}x{}) {}",
        resource_name(active.id()),
        ctx.view_size.0,
        ctx.view_size.1,
        plan.view_sets[active.index()].as_str()
    )?;

    write!(out, "      slots:")?;
    for slot in &plan.slots {
        match slot.button {
            Some(button) => write!(
                out,
                " {}={}[{}]",
                slot.position,
                button.tag,
                resource_name(button.icon.id())
            )?,
            None => write!(out, " {}=(none)", slot.position)?,
        }
    }
    writeln!(out)?;

    writeln!(
        out,
        "      disabled=0x{:08x} vertical={} hidden={} low={} menu={}",
        state.disabled_flags.bits(),
        state.vertical,
        state.hidden,
        state.low_profile,
        state.show_menu
    )?;
    writeln!(out, "}}")
}

#[cfg(test)]
mod tests {
    use softnav_types::{DisabledFlags, SlotValues};

    use super::*;
    use crate::service::NullNotifier;

    fn context() -> DumpContext {
        DumpContext {
            bar_visibility: Visibility::Visible,
            window: Bounds::new(0, 21, 240, 3),
            display_size: (240, 24),
            view_size: (240, 3),
        }
    }

    #[test]
    fn dump_includes_flag_summary_in_hex() {
        let mut bar = NavBar::new(SlotValues::default(), NullNotifier);
        bar.set_disabled_flags(DisabledFlags::HOME_GROUP);
        let mut out = String::new();
        dump(&bar, &context(), &mut out).unwrap();
        assert!(out.contains("disabled=0x00200000 vertical=false hidden=false low=false menu=false"));
    }

    #[test]
    fn dump_flags_offscreen_windows() {
        let bar = NavBar::new(SlotValues::default(), NullNotifier);
        let mut ctx = context();
        let mut out = String::new();
        dump(&bar, &ctx, &mut out).unwrap();
        assert!(!out.contains("OFFSCREEN!"));

        ctx.window = Bounds::new(0, 22, 240, 3);
        out.clear();
        dump(&bar, &ctx, &mut out).unwrap();
        assert!(out.contains("OFFSCREEN!"));
    }

    #[test]
    fn dump_names_the_active_view_and_slots() {
        let bar = NavBar::new(SlotValues::default(), NullNotifier);
        let mut out = String::new();
        dump(&bar, &context(), &mut out).unwrap();
        assert!(out.contains("id=navbar_horizontal"));
        assert!(out.contains("one=(none)"));
        assert!(out.contains("two=back[navbar_back]"));
    }

    #[test]
    fn unresolvable_resource_ids_degrade_to_placeholders() {
        assert_eq!(resource_name(0), "(none)");
        assert_eq!(resource_name(0x7777), "(unknown)");
        assert_eq!(resource_name(Icon::Home.id()), "navbar_home");
        assert_eq!(resource_name(ViewSet::Vertical.id()), "navbar_vertical");
    }
}
