use image::RgbImage;
use imageproc::contours::find_contours;
use imageproc::distance_transform::Norm;
use imageproc::morphology::close;
use log::{debug, info};

use crate::config::Config;
use crate::contours::{
    filled_contour_mask, filled_polygon_mask, norm_radius, polygon_area, post_process,
    ContourParams,
};
use crate::errors::{ColoringPageError, Result};
use crate::image_utils::{fit_to_canvas, resize_image, to_grayscale, PAGE_BACKGROUND, PAGE_STROKE};
use crate::inpaint::inpaint;
use crate::threshold::adaptive_threshold_inv;

/// Turn a photo into a black-on-white coloring page fitted into `canvas`.
///
/// Pure with respect to session state: the caller owns the result and is
/// responsible for seeding the edit history with it.
pub fn generate_page(photo: &RgbImage, canvas: (u32, u32), config: &Config) -> Result<RgbImage> {
    let (src_w, src_h) = photo.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(ColoringPageError::Load("input photo is empty".to_string()));
    }
    if canvas.0 == 0 || canvas.1 == 0 {
        return Err(ColoringPageError::Processing(format!(
            "invalid canvas size {}x{}",
            canvas.0, canvas.1
        )));
    }

    // Step 1: fit into the canvas (width axis first, height as fallback,
    // never upscaled) and resize to exactly that size.
    let target = fit_to_canvas((src_w, src_h), canvas);
    let resized = resize_image(photo, target);
    info!(
        "generating page: {}x{} photo -> {}x{} canvas fit",
        src_w, src_h, target.0, target.1
    );

    // Step 2: single-channel intensity.
    let gray = to_grayscale(&resized);

    // Step 3: adaptive local threshold; foreground = darker than the local
    // neighborhood mean by more than the offset.
    let raw_mask = adaptive_threshold_inv(&gray, config.threshold_window, config.threshold_offset)?;

    // Step 4: close broken strokes. The kernel is deliberately large so that
    // nearby outline fragments merge into single contours.
    let closed = close(&raw_mask, Norm::LInf, norm_radius(config.closing_kernel_size));

    // Step 5: trace all contours, external and internal, on the closed mask.
    let traced = find_contours::<i32>(&closed);
    debug!("traced {} raw contours", traced.len());

    // Step 6: filter, simplify and redraw. The redrawn raster is superseded
    // by the mask intersection below; the cleaned contour set is what the
    // remaining stages consume.
    let mut redrawn = closed.clone();
    let cleaned = post_process(
        traced,
        &mut redrawn,
        &ContourParams {
            min_area: config.min_contour_area,
            tolerance: config.simplify_tolerance,
            thickness: config.stroke_thickness,
            junction_kernel: config.junction_kernel_size,
        },
    );

    // Step 7: recover thin strokes the aggressive closing destroyed by
    // intersecting the raw threshold output with the filled cleaned
    // contours, which also discards thresholding noise outside any contour.
    let contour_mask = close(
        &filled_contour_mask(&cleaned, target),
        Norm::LInf,
        norm_radius(config.junction_kernel_size),
    );

    // Step 8: render white background, black strokes.
    let mut page = RgbImage::from_pixel(target.0, target.1, PAGE_BACKGROUND);
    for (x, y, px) in page.enumerate_pixels_mut() {
        if raw_mask.get_pixel(x, y)[0] > 0 && contour_mask.get_pixel(x, y)[0] > 0 {
            *px = PAGE_STROKE;
        }
    }

    // Step 9: repair small false holes. Only contours below the gap area
    // threshold are inpainted, so regions at or above the minimum contour
    // area are never altered here.
    for poly in &cleaned {
        let area = polygon_area(poly);
        if area < config.gap_area_threshold {
            debug!("inpainting gap contour with area {:.1}", area);
            let gap_mask = filled_polygon_mask(poly, target);
            inpaint(&mut page, &gap_mask, config.inpaint_radius);
        }
    }

    Ok(page)
}
