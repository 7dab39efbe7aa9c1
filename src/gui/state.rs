// src/gui/state.rs - GUI state management

use std::path::PathBuf;
use std::time::Instant;

use crate::session::Session;

/// Maximum delay between two presses to count as a double-click.
pub const DOUBLE_CLICK_MS: u128 = 350;

/// Maximum pointer travel between two presses to count as a double-click.
pub const DOUBLE_CLICK_SLOP: i32 = 4;

/// Fixed palette standing in for a color dialog. Keys 1-8 select an entry.
pub const PALETTE: [[u8; 3]; 8] = [
    [0, 0, 0],       // Black
    [255, 0, 0],     // Red
    [0, 160, 0],     // Green
    [0, 0, 255],     // Blue
    [255, 215, 0],   // Yellow
    [255, 128, 0],   // Orange
    [160, 32, 240],  // Purple
    [140, 80, 40],   // Brown
];

/// GUI application state
pub struct GuiState {
    pub session: Session,
    pub save_path: PathBuf,

    // UI state
    pub buffer: Vec<u32>,
    pub mouse_down: bool,
    pub last_press: Option<(Instant, (i32, i32))>,
    pub status_message: String,
}

impl GuiState {
    pub fn new(session: Session, save_path: PathBuf, width: usize, height: usize) -> Self {
        Self {
            session,
            save_path,
            buffer: vec![0; width * height],
            mouse_down: false,
            last_press: None,
            status_message: String::new(),
        }
    }
}
