//! Runtime: terminal lifecycle and the unified event loop.
//!
//! - Owns the terminal (raw mode, alternate screen, mouse capture) with
//!   symmetric teardown.
//! - A dedicated input thread blocks on `crossterm::event::read()` and
//!   forwards events over a channel; keeping the blocking read on its own
//!   OS thread keeps resize delivery reliable across terminals.
//! - Smart ticking: a fast interval only while a fade is running, a long
//!   idle interval otherwise. Rendering happens only when the app marks
//!   itself dirty.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::CrosstermBackend};
use softnav_engine::SlotSettings;
use softnav_types::Rotation;
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};

use crate::app::{App, ChannelNotifier};
use crate::render;

/// Tick interval while a fade is running.
const FAST_TICK: Duration = Duration::from_millis(30);
/// Tick interval when idle.
const IDLE_TICK: Duration = Duration::from_millis(1000);

/// Spawns the dedicated input thread and returns its event channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(256);
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    tracing::warn!("failed to read terminal event: {error}");
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    terminal.draw(|frame| render::draw(frame, app))?;
    Ok(())
}

/// Routes a single input event. Returns `true` when the app should exit.
fn handle_input_event(app: &mut App, input_event: Event) -> bool {
    match input_event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return true;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return true,
                KeyCode::Char('r') => app.rotate(),
                KeyCode::Char('m') => app.toggle_menu(),
                KeyCode::Char('l') => app.toggle_low_profile(),
                KeyCode::Char('d') => app.toggle_disabled(),
                KeyCode::Char('h') => app.toggle_hidden(),
                KeyCode::Char('s') => app.reload_slots(),
                _ => {}
            }
        }
        Event::Mouse(mouse) => {
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                app.press_at(mouse.column, mouse.row);
            }
        }
        Event::Resize(width, height) => app.on_resize(width, height),
        _ => {}
    }
    false
}

/// Entry point for the preview runtime: terminal setup, event loop,
/// teardown.
pub async fn run_app(settings: SlotSettings, rotation: Rotation) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let (relayout_tx, mut relayout_rx) = mpsc::unbounded_channel();
    let (sysui_tx, mut sysui_rx) = mpsc::unbounded_channel();

    let mut app = App::new(settings, rotation, relayout_tx, ChannelNotifier::new(sysui_tx));
    let mut terminal = setup_terminal()?;

    if let Ok((width, height)) = crossterm::terminal::size() {
        app.on_resize(width, height);
    }

    let mut current_interval = IDLE_TICK;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(&mut terminal, &mut app)?;
    app.dirty = false;

    loop {
        let target_interval = if app.timeline.is_animating() { FAST_TICK } else { IDLE_TICK };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        tokio::select! {
            maybe_event = input_receiver.recv() => {
                match maybe_event {
                    Some(event) => {
                        if handle_input_event(&mut app, event) {
                            break;
                        }
                    }
                    // Input channel closed; shut down cleanly.
                    None => break,
                }
            }

            _ = ticker.tick() => {
                if app.timeline.tick(Instant::now()) {
                    app.dirty = true;
                }
            }

            Some(request) = relayout_rx.recv() => {
                app.on_relayout(request);
            }

            Some(visibility) = sysui_rx.recv() => {
                app.status = format!("system-ui visibility -> {visibility}");
                app.dirty = true;
            }

            _ = signal::ctrl_c() => { break; }
        }

        if app.dirty {
            render(&mut terminal, &mut app)?;
            app.dirty = false;
        }
    }

    cleanup_terminal(&mut terminal)?;
    Ok(())
}
