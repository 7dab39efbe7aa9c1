use image::{GrayImage, Rgb, RgbImage};

/// Hole-filling interpolation restricted to a mask.
///
/// Masked pixels are reconstructed from the surrounding known pixels in
/// onion-peel order: each sweep fills every masked pixel that can see at
/// least one known pixel within `radius`, using an inverse-distance weighted
/// average, then peels the filled layer off the mask. Pixels outside the
/// mask are never touched.
pub fn inpaint(image: &mut RgbImage, mask: &GrayImage, radius: u32) {
    debug_assert_eq!(image.dimensions(), mask.dimensions());

    let (width, height) = image.dimensions();
    let r = radius.max(1) as i32;

    let mut unknown: Vec<bool> = mask.pixels().map(|p| p[0] > 0).collect();
    let mut remaining: usize = unknown.iter().filter(|&&u| u).count();

    while remaining > 0 {
        let mut updates: Vec<(u32, u32, Rgb<u8>)> = Vec::new();

        for y in 0..height {
            for x in 0..width {
                if !unknown[(y * width + x) as usize] {
                    continue;
                }

                let mut weight_sum = 0.0f64;
                let mut acc = [0.0f64; 3];

                for dy in -r..=r {
                    for dx in -r..=r {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = x as i32 + dx;
                        let ny = y as i32 + dy;
                        if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                            continue;
                        }
                        if unknown[(ny as u32 * width + nx as u32) as usize] {
                            continue;
                        }

                        let dist_sq = (dx * dx + dy * dy) as f64;
                        let weight = 1.0 / dist_sq;
                        let px = image.get_pixel(nx as u32, ny as u32);
                        for c in 0..3 {
                            acc[c] += weight * px[c] as f64;
                        }
                        weight_sum += weight;
                    }
                }

                if weight_sum > 0.0 {
                    let value = Rgb([
                        (acc[0] / weight_sum).round().clamp(0.0, 255.0) as u8,
                        (acc[1] / weight_sum).round().clamp(0.0, 255.0) as u8,
                        (acc[2] / weight_sum).round().clamp(0.0, 255.0) as u8,
                    ]);
                    updates.push((x, y, value));
                }
            }
        }

        // A fully masked image has no boundary to grow from.
        if updates.is_empty() {
            break;
        }

        for (x, y, value) in updates {
            image.put_pixel(x, y, value);
            unknown[(y * width + x) as usize] = false;
            remaining -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn masked_hole_takes_on_surrounding_color() {
        let mut img = RgbImage::from_pixel(16, 16, Rgb([200, 100, 50]));
        let mut mask = GrayImage::new(16, 16);
        for y in 6..10 {
            for x in 6..10 {
                img.put_pixel(x, y, Rgb([0, 0, 0]));
                mask.put_pixel(x, y, Luma([255]));
            }
        }

        inpaint(&mut img, &mask, 3);

        for y in 6..10 {
            for x in 6..10 {
                assert_eq!(img.get_pixel(x, y), &Rgb([200, 100, 50]));
            }
        }
    }

    #[test]
    fn pixels_outside_the_mask_are_untouched() {
        let mut img = RgbImage::from_pixel(8, 8, Rgb([10, 20, 30]));
        img.put_pixel(0, 0, Rgb([255, 255, 255]));
        let mut mask = GrayImage::new(8, 8);
        mask.put_pixel(4, 4, Luma([255]));

        let before = img.clone();
        inpaint(&mut img, &mask, 3);

        for y in 0..8 {
            for x in 0..8 {
                if (x, y) != (4, 4) {
                    assert_eq!(img.get_pixel(x, y), before.get_pixel(x, y));
                }
            }
        }
    }

    #[test]
    fn fully_masked_image_terminates() {
        let mut img = RgbImage::from_pixel(4, 4, Rgb([1, 2, 3]));
        let mask = GrayImage::from_pixel(4, 4, Luma([255]));
        inpaint(&mut img, &mask, 3);
    }
}
