use image::{GrayImage, Luma};
use imageproc::contours::Contour;
use imageproc::distance_transform::Norm;
use imageproc::drawing::{draw_antialiased_line_segment_mut, draw_polygon_mut};
use imageproc::geometry::approximate_polygon_dp;
use imageproc::morphology::{close, dilate};
use imageproc::pixelops::interpolate;
use imageproc::point::Point;
use log::debug;

/// Parameters for contour post-processing.
pub struct ContourParams {
    pub min_area: f64,
    pub tolerance: f64,
    pub thickness: u32,
    pub junction_kernel: u32,
}

/// Enclosed area of a closed polygonal contour (shoelace formula).
pub fn polygon_area(points: &[Point<i32>]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }

    let mut twice_area = 0i64;
    for i in 0..points.len() {
        let p = points[i];
        let q = points[(i + 1) % points.len()];
        twice_area += p.x as i64 * q.y as i64 - q.x as i64 * p.y as i64;
    }

    (twice_area.abs() as f64) / 2.0
}

/// Refine the raw traced contours: drop speckle noise below the minimum
/// area, simplify each survivor by polygon approximation, and redraw it onto
/// the outline raster as a closed antialiased black stroke. A small closing
/// pass after each contour smooths stroke junctions.
///
/// Processing order follows the order contours were traced; order only
/// affects pixel overwrite where strokes overlap, not contour membership.
pub fn post_process(
    contours: Vec<Contour<i32>>,
    canvas: &mut GrayImage,
    params: &ContourParams,
) -> Vec<Vec<Point<i32>>> {
    let raw_count = contours.len();

    let mut kept = Vec::new();
    for contour in contours {
        if polygon_area(&contour.points) < params.min_area {
            continue;
        }

        let simplified = approximate_polygon_dp(&contour.points, params.tolerance, true);
        if simplified.is_empty() {
            continue;
        }

        draw_closed_stroke(canvas, &simplified, params.thickness);
        *canvas = close(canvas, Norm::LInf, norm_radius(params.junction_kernel));

        kept.push(simplified);
    }

    debug!("contour post-processing kept {}/{} contours", kept.len(), raw_count);
    kept
}

/// Draw a closed polygonal stroke in black. The centerline is antialiased;
/// thickness beyond one pixel is applied by growing the stroke support with
/// an L-infinity dilation, capped at the largest radius the morphology
/// routines accept.
pub fn draw_closed_stroke(canvas: &mut GrayImage, poly: &[Point<i32>], thickness: u32) {
    let mut layer = GrayImage::new(canvas.width(), canvas.height());

    for i in 0..poly.len() {
        let p = poly[i];
        let q = poly[(i + 1) % poly.len()];
        draw_antialiased_line_segment_mut(
            &mut layer,
            (p.x, p.y),
            (q.x, q.y),
            Luma([255u8]),
            interpolate,
        );
    }

    if thickness > 1 {
        let radius = (thickness / 2).min(255) as u8;
        layer = dilate(&layer, Norm::LInf, radius);
    }

    // Multiply-blend the stroke coverage so partially covered edge pixels
    // darken instead of snapping to black.
    for (canvas_px, layer_px) in canvas.pixels_mut().zip(layer.pixels()) {
        let coverage = layer_px[0] as u32;
        if coverage > 0 {
            canvas_px[0] = (canvas_px[0] as u32 * (255 - coverage) / 255) as u8;
        }
    }
}

/// Rasterize the filled interiors of a set of closed polygons into one mask.
pub fn filled_contour_mask(polys: &[Vec<Point<i32>>], dimensions: (u32, u32)) -> GrayImage {
    let mut mask = GrayImage::new(dimensions.0, dimensions.1);
    for poly in polys {
        fill_polygon(&mut mask, poly);
    }
    mask
}

/// Rasterize one filled polygon into a fresh mask.
pub fn filled_polygon_mask(poly: &[Point<i32>], dimensions: (u32, u32)) -> GrayImage {
    let mut mask = GrayImage::new(dimensions.0, dimensions.1);
    fill_polygon(&mut mask, poly);
    mask
}

fn fill_polygon(mask: &mut GrayImage, poly: &[Point<i32>]) {
    // draw_polygon_mut requires a non-empty polygon whose endpoints differ.
    let mut points: Vec<Point<i32>> = poly.to_vec();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return;
    }
    draw_polygon_mut(mask, &points, Luma([255u8]));
}

/// Structuring-element side length to an L-infinity radius.
#[inline]
pub fn norm_radius(kernel_size: u32) -> u8 {
    (kernel_size / 2).min(255) as u8
}
