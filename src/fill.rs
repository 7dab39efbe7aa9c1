use image::{Rgb, RgbImage};

use crate::errors::{ColoringPageError, Result};

/// Bounded flood fill.
///
/// Recolors the 4-connected region of pixels sharing the seed's exact color.
/// Outline strokes (or any pixel of a different color) act as barriers, so
/// the fill never crosses region boundaries. The input raster is left
/// untouched; the recolored copy is returned only on success, making the
/// operation all-or-nothing for the caller.
pub fn flood_fill(image: &RgbImage, seed: (u32, u32), color: Rgb<u8>) -> Result<RgbImage> {
    let (width, height) = image.dimensions();
    let (sx, sy) = seed;

    if sx >= width || sy >= height {
        return Err(ColoringPageError::Fill(format!(
            "seed point ({}, {}) outside raster bounds {}x{}",
            sx, sy, width, height
        )));
    }

    let mut out = image.clone();
    let target = *out.get_pixel(sx, sy);

    // Filling a region with its own color is a no-op; without this check the
    // frontier would never shrink.
    if target == color {
        return Ok(out);
    }

    let mut stack = vec![(sx, sy)];
    while let Some((x, y)) = stack.pop() {
        if *out.get_pixel(x, y) != target {
            continue;
        }
        out.put_pixel(x, y, color);

        if x > 0 {
            stack.push((x - 1, y));
        }
        if x + 1 < width {
            stack.push((x + 1, y));
        }
        if y > 0 {
            stack.push((x, y - 1));
        }
        if y + 1 < height {
            stack.push((x, y + 1));
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    /// White page with a black rectangle outline from (10,10) to (40,40).
    fn page_with_box() -> RgbImage {
        let mut img = RgbImage::from_pixel(64, 64, WHITE);
        for x in 10..=40 {
            img.put_pixel(x, 10, BLACK);
            img.put_pixel(x, 40, BLACK);
        }
        for y in 10..=40 {
            img.put_pixel(10, y, BLACK);
            img.put_pixel(40, y, BLACK);
        }
        img
    }

    #[test]
    fn fill_stays_inside_the_outline() {
        let img = page_with_box();
        let filled = flood_fill(&img, (25, 25), RED).unwrap();

        assert_eq!(filled.get_pixel(25, 25), &RED);
        assert_eq!(filled.get_pixel(11, 11), &RED);
        // Barrier and exterior untouched
        assert_eq!(filled.get_pixel(10, 25), &BLACK);
        assert_eq!(filled.get_pixel(5, 5), &WHITE);
        assert_eq!(filled.get_pixel(50, 50), &WHITE);
    }

    #[test]
    fn fill_outside_the_outline_leaves_interior_alone() {
        let img = page_with_box();
        let filled = flood_fill(&img, (2, 2), RED).unwrap();

        assert_eq!(filled.get_pixel(2, 2), &RED);
        assert_eq!(filled.get_pixel(25, 25), &WHITE);
        assert_eq!(filled.get_pixel(10, 25), &BLACK);
    }

    #[test]
    fn fill_is_idempotent() {
        let img = page_with_box();
        let once = flood_fill(&img, (25, 25), RED).unwrap();
        let twice = flood_fill(&once, (25, 25), RED).unwrap();
        assert_eq!(once.as_raw(), twice.as_raw());
    }

    #[test]
    fn input_raster_is_not_mutated() {
        let img = page_with_box();
        let before = img.clone();
        flood_fill(&img, (25, 25), RED).unwrap();
        assert_eq!(img.as_raw(), before.as_raw());
    }

    #[test]
    fn out_of_bounds_seed_is_a_fill_error() {
        let img = page_with_box();
        let err = flood_fill(&img, (64, 10), RED).unwrap_err();
        assert!(matches!(err, ColoringPageError::Fill(_)));
    }
}
