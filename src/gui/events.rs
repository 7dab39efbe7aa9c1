// src/gui/events.rs - Mouse and keyboard handling

use std::time::Instant;

use log::{info, warn};
use minifb::{Key, MouseButton, MouseMode, Window};

use crate::errors::Result;
use crate::session::{PointerButton, PointerEvent, PointerPhase};

use super::state::{GuiState, DOUBLE_CLICK_MS, DOUBLE_CLICK_SLOP, PALETTE};

/// Handle all events (mouse and keyboard)
pub fn handle_events(window: &mut Window, state: &mut GuiState) -> Result<()> {
    handle_mouse(window, state);
    handle_keys(window, state);
    Ok(())
}

fn handle_mouse(window: &Window, state: &mut GuiState) {
    let Some((fx, fy)) = window.get_mouse_pos(MouseMode::Discard) else {
        return;
    };
    let (x, y) = (fx as i32, fy as i32);

    let down_now = window.get_mouse_down(MouseButton::Left);

    if down_now && !state.mouse_down {
        // Fresh press; synthesize a double-activation when it lands close
        // enough to the previous press, quickly enough.
        let now = Instant::now();
        let is_double = state.last_press.is_some_and(|(at, (px, py))| {
            now.duration_since(at).as_millis() <= DOUBLE_CLICK_MS
                && (x - px).abs() <= DOUBLE_CLICK_SLOP
                && (y - py).abs() <= DOUBLE_CLICK_SLOP
        });
        state.last_press = if is_double { None } else { Some((now, (x, y))) };

        let phase = if is_double {
            PointerPhase::Double
        } else {
            PointerPhase::Press
        };
        dispatch_pointer(state, x, y, phase);
    } else if down_now {
        dispatch_pointer(state, x, y, PointerPhase::Move);
    } else if state.mouse_down {
        dispatch_pointer(state, x, y, PointerPhase::Release);
    }

    state.mouse_down = down_now;
}

fn dispatch_pointer(state: &mut GuiState, x: i32, y: i32, phase: PointerPhase) {
    let event = PointerEvent {
        x,
        y,
        button: PointerButton::Primary,
        phase,
    };
    // Operation failures are surfaced, never fatal to the session.
    if let Err(e) = state.session.pointer(event) {
        warn!("{}", e);
        state.status_message = e.to_string();
    }
}

fn handle_keys(window: &Window, state: &mut GuiState) {
    if window.is_key_pressed(Key::U, minifb::KeyRepeat::No) {
        let undone = state.session.undo();
        state.status_message = if undone {
            "Undo".to_string()
        } else {
            "Nothing to undo".to_string()
        };
    }

    if window.is_key_pressed(Key::F, minifb::KeyRepeat::No) {
        let enabled = !state.session.fill_tool_enabled();
        state.session.set_fill_tool(enabled);
        state.status_message = format!("Fill tool: {}", if enabled { "ON" } else { "OFF" });
    }

    if window.is_key_pressed(Key::S, minifb::KeyRepeat::No) {
        match state.session.save_page(&state.save_path) {
            Ok(()) => {
                info!("saved page to {}", state.save_path.display());
                state.status_message = format!("Saved to {}", state.save_path.display());
            }
            Err(e) => {
                warn!("{}", e);
                state.status_message = e.to_string();
            }
        }
    }

    const PALETTE_KEYS: [Key; 8] = [
        Key::Key1,
        Key::Key2,
        Key::Key3,
        Key::Key4,
        Key::Key5,
        Key::Key6,
        Key::Key7,
        Key::Key8,
    ];
    for (key, color) in PALETTE_KEYS.iter().zip(PALETTE.iter()) {
        if window.is_key_pressed(*key, minifb::KeyRepeat::No) {
            state.session.set_fill_color(*color);
            state.status_message = format!("Color: #{:02x}{:02x}{:02x}", color[0], color[1], color[2]);
        }
    }
}
