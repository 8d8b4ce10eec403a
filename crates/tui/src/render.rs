//! Applies the engine's render plan to the terminal.
//!
//! The bar draws along the bottom edge for the horizontal view set and
//! along the right edge for the vertical one. Elements whose visibility is
//! `Invisible` keep their cell blank; `Removed` elements yield the space
//! entirely, exactly as the plan dictates.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Position, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use softnav_engine::{RenderPlan, SlotPlan, ViewSet};
use softnav_types::{Icon, SlotPosition, Visibility};
use unicode_width::UnicodeWidthChar;

use crate::app::App;

/// Rows occupied by the horizontal bar.
pub const BAR_THICKNESS: u16 = 3;
/// Columns occupied by the vertical bar.
pub const SIDE_BAR_WIDTH: u16 = 9;

const BUTTON_SPAN: u16 = 7;
const WIDE_SPACER_SPAN: u16 = 4;
const NARROW_SPACER_SPAN: u16 = 2;
const MENU_STOCK_SPAN: u16 = 5;

/// Area the bar occupies for a given terminal size.
pub fn bar_area(frame_area: Rect, vertical: bool) -> Rect {
    if vertical {
        let width = SIDE_BAR_WIDTH.min(frame_area.width);
        Rect::new(
            frame_area.x + frame_area.width.saturating_sub(width),
            frame_area.y,
            width,
            frame_area.height,
        )
    } else {
        let height = BAR_THICKNESS.min(frame_area.height);
        Rect::new(
            frame_area.x,
            frame_area.y + frame_area.height.saturating_sub(height),
            frame_area.width,
            height,
        )
    }
}

/// Terminal glyph for an icon resource.
fn icon_glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::Menu => "≡",
        Icon::MenuSide => "≡",
        Icon::Back => "◀",
        Icon::BackSide => "▼",
        Icon::Home => "⌂",
        Icon::HomeSide => "⌂",
        Icon::Recent => "❐",
        Icon::RecentSide => "❐",
        Icon::Search => "⌕",
        Icon::SearchSide => "⌕",
        Icon::MediaPrevious => "«",
        Icon::MediaPreviousSide => "«",
        Icon::MediaNext => "»",
        Icon::MediaNextSide => "»",
    }
}

/// Style for an element at the given alpha, or `None` when it is too faint
/// to draw at all.
fn alpha_style(alpha: f32) -> Option<Style> {
    if alpha < 0.05 {
        None
    } else if alpha < 0.55 {
        Some(Style::default().add_modifier(Modifier::DIM))
    } else {
        Some(Style::default())
    }
}

/// Trims a string to the given display width.
fn fit_to_width(text: &str, max_width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// One laid-out cell of the bar.
#[derive(Debug, Clone, Copy)]
enum CellKind {
    Blank,
    Button(SlotPosition),
    MenuStock,
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    span: u16,
    kind: CellKind,
}

/// Flattens the plan into bar cells in layout order, dropping `Removed`
/// elements and blanking `Invisible` ones.
fn layout_cells(plan: &RenderPlan) -> Vec<Cell> {
    let mut cells = Vec::new();

    let mut spacer = |cells: &mut Vec<Cell>, visibility: Visibility, span: u16| {
        if visibility.takes_space() {
            cells.push(Cell { span, kind: CellKind::Blank });
        }
    };
    let slot_cell = |cells: &mut Vec<Cell>, slot: &SlotPlan| {
        if !slot.visibility.takes_space() {
            return;
        }
        let kind = if slot.visibility.is_visible() {
            CellKind::Button(slot.position)
        } else {
            CellKind::Blank
        };
        cells.push(Cell { span: BUTTON_SPAN, kind });
    };

    spacer(&mut cells, plan.spacers.outside, WIDE_SPACER_SPAN);
    spacer(&mut cells, plan.spacers.outside_small, NARROW_SPACER_SPAN);
    slot_cell(&mut cells, &plan.slots[0]);
    spacer(&mut cells, plan.spacers.inside_one, NARROW_SPACER_SPAN);
    slot_cell(&mut cells, &plan.slots[1]);
    slot_cell(&mut cells, &plan.slots[2]);
    slot_cell(&mut cells, &plan.slots[3]);
    spacer(&mut cells, plan.spacers.inside_two, NARROW_SPACER_SPAN);
    slot_cell(&mut cells, &plan.slots[4]);
    spacer(&mut cells, plan.spacers.menu, NARROW_SPACER_SPAN);
    if plan.menu_stock.takes_space() {
        let kind = if plan.menu_stock.is_visible() { CellKind::MenuStock } else { CellKind::Blank };
        cells.push(Cell { span: MENU_STOCK_SPAN, kind });
    }

    cells
}

/// Finds the slot under a terminal position.
pub fn hit_test(areas: &[(SlotPosition, Rect)], column: u16, row: u16) -> Option<SlotPosition> {
    let position = Position::new(column, row);
    areas
        .iter()
        .find(|(_, rect)| rect.contains(position))
        .map(|(slot, _)| *slot)
}

/// One-line state summary for the header.
pub fn format_state(app: &App) -> String {
    let state = app.bar.state();
    let mut parts = vec![format!("rot={}°", state.current_rotation.degrees())];
    if state.vertical {
        parts.push("vertical".into());
    }
    if state.hidden {
        parts.push("hidden".into());
    }
    if state.low_profile {
        parts.push("lights-out".into());
    }
    if state.show_menu {
        parts.push("menu".into());
    }
    if state.disabled_flags.bits() != 0 {
        parts.push(format!("disabled=0x{:08x}", state.disabled_flags.bits()));
    }
    parts.join("  ")
}

const HELP_LINE: &str = "q quit  r rotate  m menu  l lights  d disable  h hide  s reload";

/// Draws the full frame: header, help, and the bar.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.button_areas.clear();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let header = Paragraph::new(fit_to_width(&format_state(app), area.width as usize));
    frame.render_widget(header, Rect::new(area.x, area.y, area.width, 1));
    if area.height > 1 {
        let help = Paragraph::new(fit_to_width(HELP_LINE, area.width as usize))
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(help, Rect::new(area.x, area.y + 1, area.width, 1));
    }
    if area.height > 2 && !app.status.is_empty() {
        let status = Paragraph::new(fit_to_width(&app.status, area.width as usize));
        frame.render_widget(status, Rect::new(area.x, area.y + 2, area.width, 1));
    }

    if app.bar.state().hidden {
        app.probe.set_view_size((0, 0));
        return;
    }

    let bar = bar_area(area, app.bar.state().vertical);
    app.probe.set_view_size((bar.width, bar.height));

    let (border, axis) = match app.bar.plan().active_view_set {
        ViewSet::Horizontal => (Borders::TOP, Direction::Horizontal),
        ViewSet::Vertical => (Borders::LEFT, Direction::Vertical),
    };
    let block = Block::new().borders(border);
    let inner = block.inner(bar);
    frame.render_widget(block, bar);

    draw_cells(frame, inner, app, axis);

    if app.timeline.overlay_shown() {
        draw_overlay(frame, inner, app);
    }
}

fn cell_length(cell: &Cell, axis: Direction) -> u16 {
    match axis {
        Direction::Horizontal => cell.span,
        // Vertical cells are shorter: buttons three rows, spacers one.
        Direction::Vertical => match cell.kind {
            CellKind::Button(_) => 3,
            CellKind::MenuStock => 2,
            CellKind::Blank => 1,
        },
    }
}

fn draw_cells(frame: &mut Frame, inner: Rect, app: &mut App, axis: Direction) {
    let plan = app.bar.plan().clone();
    let cells = layout_cells(&plan);
    if cells.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = cells.iter().map(|cell| Constraint::Length(cell_length(cell, axis))).collect();
    let layout = match axis {
        Direction::Horizontal => Layout::horizontal(constraints),
        Direction::Vertical => Layout::vertical(constraints),
    };
    let areas = layout.flex(Flex::Center).split(inner);

    let buttons_alpha = app.timeline.buttons_alpha();
    for (cell, rect) in cells.iter().zip(areas.iter()) {
        match cell.kind {
            CellKind::Blank => {}
            CellKind::Button(position) => {
                let slot = plan.slots[position.index()];
                app.button_areas.push((position, *rect));
                if let Some(style) = alpha_style(buttons_alpha)
                    && let Some(button) = slot.button
                {
                    let block = Block::bordered().border_style(style);
                    let glyph_area = block.inner(*rect);
                    frame.render_widget(block, *rect);
                    let glyph = Paragraph::new(Line::from(icon_glyph(button.icon)).centered()).style(style);
                    frame.render_widget(glyph, glyph_area);
                }
            }
            CellKind::MenuStock => {
                if let Some(style) = alpha_style(buttons_alpha) {
                    let glyph = Paragraph::new(Line::from("⋮").centered()).style(style);
                    frame.render_widget(glyph, *rect);
                }
            }
        }
    }
}

fn draw_overlay(frame: &mut Frame, inner: Rect, app: &App) {
    let Some(style) = alpha_style(app.timeline.overlay_alpha()) else {
        return;
    };
    let dots = vec!["·"; app.bar.plan().lights_out.variant.dot_count()].join("  ");
    let overlay = Paragraph::new(Line::from(dots).centered()).style(style);
    let row = inner.y + inner.height / 2;
    frame.render_widget(overlay, Rect::new(inner.x, row.min(inner.bottom().saturating_sub(1)), inner.width, 1));
}
