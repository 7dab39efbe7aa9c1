use image::{GrayImage, Rgb, RgbImage};

/// Background of a generated page.
pub const PAGE_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Stroke color of a generated page.
pub const PAGE_STROKE: Rgb<u8> = Rgb([0, 0, 0]);

/// Compute the size a photo is displayed at inside the canvas, preserving
/// aspect ratio. Fits by width first and falls back to the height axis when
/// that overflows. Never upscales: a photo smaller than the canvas keeps its
/// own dimensions.
pub fn fit_to_canvas(photo: (u32, u32), canvas: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = photo;
    let (max_w, max_h) = canvas;

    if src_w <= max_w && src_h <= max_h {
        return (src_w, src_h);
    }

    let aspect = src_w as f64 / src_h as f64;

    let mut new_w = max_w;
    let mut new_h = (new_w as f64 / aspect).round() as u32;

    if new_h > max_h {
        new_h = max_h;
        new_w = (new_h as f64 * aspect).round() as u32;
    }

    (new_w.max(1), new_h.max(1))
}

/// Resize a photo to the given dimensions.
pub fn resize_image(image: &RgbImage, dimensions: (u32, u32)) -> RgbImage {
    image::imageops::resize(
        image,
        dimensions.0,
        dimensions.1,
        image::imageops::FilterType::Triangle,
    )
}

/// Convert an RGB photo to a single-channel intensity image.
pub fn to_grayscale(image: &RgbImage) -> GrayImage {
    image::imageops::grayscale(image)
}

/// Check if a point is inside the image bounds
#[inline]
pub fn in_bounds(x: i32, y: i32, width: u32, height: u32) -> bool {
    x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height
}

/// Clamp a raster-local point to valid pixel coordinates.
#[inline]
pub fn clamp_point(x: i32, y: i32, width: u32, height: u32) -> (u32, u32) {
    (
        x.clamp(0, width as i32 - 1) as u32,
        y.clamp(0, height as i32 - 1) as u32,
    )
}
