use image::{GrayImage, Luma};

use crate::errors::{ColoringPageError, Result};

/// Adaptive mean thresholding with inverted output.
///
/// Each pixel is compared against the mean intensity of its surrounding
/// `window x window` neighborhood (clipped at the borders). The pixel becomes
/// foreground (255) only when it is darker than that mean by more than
/// `offset`, which keeps outline strokes while rejecting smooth gradients.
pub fn adaptive_threshold_inv(gray: &GrayImage, window: u32, offset: u8) -> Result<GrayImage> {
    if window < 3 || window % 2 == 0 {
        return Err(ColoringPageError::Processing(format!(
            "adaptive threshold window must be odd and >= 3, got {}",
            window
        )));
    }

    let (width, height) = gray.dimensions();
    let integral = integral_image(gray);
    let radius = (window / 2) as i64;

    let mut out = GrayImage::new(width, height);
    for y in 0..height {
        let y0 = (y as i64 - radius).max(0) as u32;
        let y1 = (y as i64 + radius).min(height as i64 - 1) as u32;
        for x in 0..width {
            let x0 = (x as i64 - radius).max(0) as u32;
            let x1 = (x as i64 + radius).min(width as i64 - 1) as u32;

            let sum = window_sum(&integral, width, x0, y0, x1, y1);
            let count = ((x1 - x0 + 1) * (y1 - y0 + 1)) as f64;
            let mean = sum as f64 / count;

            let value = gray.get_pixel(x, y)[0] as f64;
            let fg = value <= mean - offset as f64;
            out.put_pixel(x, y, Luma([if fg { 255 } else { 0 }]));
        }
    }

    Ok(out)
}

/// Summed-area table with one row/column of zero padding so window sums need
/// no branching.
fn integral_image(gray: &GrayImage) -> Vec<u64> {
    let (width, height) = gray.dimensions();
    let stride = (width + 1) as usize;
    let mut integral = vec![0u64; stride * (height + 1) as usize];

    for y in 0..height {
        let mut row_sum = 0u64;
        for x in 0..width {
            row_sum += gray.get_pixel(x, y)[0] as u64;
            let idx = (y + 1) as usize * stride + (x + 1) as usize;
            integral[idx] = integral[idx - stride] + row_sum;
        }
    }

    integral
}

/// Inclusive window sum over the padded summed-area table.
#[inline]
fn window_sum(integral: &[u64], width: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> u64 {
    let stride = (width + 1) as usize;
    let a = integral[y0 as usize * stride + x0 as usize];
    let b = integral[y0 as usize * stride + (x1 + 1) as usize];
    let c = integral[(y1 + 1) as usize * stride + x0 as usize];
    let d = integral[(y1 + 1) as usize * stride + (x1 + 1) as usize];
    d + a - b - c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_image_has_no_foreground() {
        let gray = GrayImage::from_pixel(32, 32, Luma([128]));
        let mask = adaptive_threshold_inv(&gray, 15, 10).unwrap();
        assert!(mask.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn dark_blob_on_light_background_is_foreground() {
        let mut gray = GrayImage::from_pixel(32, 32, Luma([220]));
        for y in 14..18 {
            for x in 14..18 {
                gray.put_pixel(x, y, Luma([10]));
            }
        }

        let mask = adaptive_threshold_inv(&gray, 15, 10).unwrap();
        assert_eq!(mask.get_pixel(15, 15)[0], 255);
        assert_eq!(mask.get_pixel(2, 2)[0], 0);
    }

    #[test]
    fn pixel_within_offset_of_mean_stays_background() {
        // Background 100, blob 95: darker, but not by more than the offset.
        let mut gray = GrayImage::from_pixel(32, 32, Luma([100]));
        for y in 14..18 {
            for x in 14..18 {
                gray.put_pixel(x, y, Luma([95]));
            }
        }

        let mask = adaptive_threshold_inv(&gray, 15, 10).unwrap();
        assert!(mask.pixels().all(|p| p[0] == 0));
    }

    #[test]
    fn even_window_is_rejected() {
        let gray = GrayImage::new(8, 8);
        assert!(adaptive_threshold_inv(&gray, 4, 10).is_err());
    }

    #[test]
    fn integral_sums_match_naive_sums() {
        let mut gray = GrayImage::new(5, 4);
        for (i, p) in gray.pixels_mut().enumerate() {
            p.0[0] = (i * 7 % 251) as u8;
        }

        let integral = integral_image(&gray);
        let mut naive = 0u64;
        for y in 1..=2u32 {
            for x in 1..=3u32 {
                naive += gray.get_pixel(x, y)[0] as u64;
            }
        }
        assert_eq!(window_sum(&integral, 5, 1, 1, 3, 2), naive);
    }
}
