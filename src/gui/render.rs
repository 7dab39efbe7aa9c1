// src/gui/render.rs - Framebuffer rendering

use super::state::GuiState;

const COLOR_BACKGROUND: u32 = 0x303030; // Dark gray behind the page

/// Repaint the window buffer from the session's working page.
pub fn update_buffer(state: &mut GuiState, window_width: usize, window_height: usize) {
    for px in state.buffer.iter_mut() {
        *px = COLOR_BACKGROUND;
    }

    let Some(page) = state.session.page() else {
        return;
    };

    let (page_w, page_h) = page.dimensions();
    let draw_w = (page_w as usize).min(window_width);
    let draw_h = (page_h as usize).min(window_height);

    for y in 0..draw_h {
        for x in 0..draw_w {
            let p = page.get_pixel(x as u32, y as u32);
            state.buffer[y * window_width + x] =
                ((p[0] as u32) << 16) | ((p[1] as u32) << 8) | (p[2] as u32);
        }
    }
}
