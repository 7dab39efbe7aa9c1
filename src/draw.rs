use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;

use crate::image_utils::clamp_point;

/// Freehand drawing: a one-pixel straight segment between two consecutive
/// pointer samples, applied directly to the working raster. Endpoints are
/// clamped to the raster bounds. Draw gestures are intentionally not pushed
/// to the edit history (see the undo contract on `Session`).
pub fn draw_segment(page: &mut RgbImage, from: (i32, i32), to: (i32, i32), color: Rgb<u8>) {
    let (width, height) = page.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let (x0, y0) = clamp_point(from.0, from.1, width, height);
    let (x1, y1) = clamp_point(to.0, to.1, width, height);

    draw_line_segment_mut(
        page,
        (x0 as f32, y0 as f32),
        (x1 as f32, y1 as f32),
        color,
    );
}
