// src/gui/mod.rs - Interactive coloring window
//
// Thin presentation glue: window creation, pointer routing and key bindings.
// All editing semantics live in `Session`; this module only produces events
// for it and blits its working page.
//
// Bindings: drag = freehand draw, double-click = flood fill (when armed),
// F = toggle fill tool, U = undo, S = save, 1-8 = palette colors.

mod events;
mod render;
mod state;

use std::path::PathBuf;
use std::time::Duration;

use log::info;
use minifb::{Window, WindowOptions};

use crate::config::Config;
use crate::errors::{ColoringPageError, Result};
use crate::session::Session;

use self::state::GuiState;

/// Run the interactive coloring window for one photo.
pub fn run_gui(image_path: PathBuf, config: Config) -> Result<()> {
    let mut session = Session::new(config);
    session.load_photo(&image_path)?;

    let (page_w, page_h) = session
        .page()
        .map(|p| p.dimensions())
        .ok_or_else(|| ColoringPageError::Processing("no page was generated".to_string()))?;
    let (width, height) = (page_w as usize, page_h as usize);

    let save_path = image_path.with_file_name(format!(
        "{}_page.png",
        image_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("coloring")
    ));

    let mut window = Window::new(
        "Coloring Page Generator",
        width,
        height,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| ColoringPageError::Window(format!("Failed to create window: {}", e)))?;

    window.limit_update_rate(Some(Duration::from_millis(16)));

    let mut state = GuiState::new(session, save_path, width, height);
    info!("entering interactive loop ({}x{})", width, height);

    while window.is_open() && !window.is_key_down(minifb::Key::Escape) {
        events::handle_events(&mut window, &mut state)?;
        render::update_buffer(&mut state, width, height);
        window
            .update_with_buffer(&state.buffer, width, height)
            .map_err(|e| ColoringPageError::Window(format!("Failed to update window: {}", e)))?;
    }

    info!("GUI closed");
    Ok(())
}
