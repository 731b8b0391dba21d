//! Decorative-shape mask generators.
//!
//! Two shapes cover every template: a full-canvas rounded rectangle used for
//! final corner clipping, and the parabolic dark-section mask used by the
//! curve-sweep template. Both produce binary coverage masks.

use crate::raster::canvas::{rounded_rect_contains, Mask};

/// Full-canvas rounded-rectangle coverage: 255 inside, 0 outside.
pub fn rounded_rect(width: u32, height: u32, radius: u32) -> Mask {
    let mut mask = Mask::new(width, height);
    let w = width as i32;
    let h = height as i32;
    let r = radius as i32;
    for y in 0..h {
        for x in 0..w {
            if rounded_rect_contains(x, y, w, h, r) {
                mask.put(x as u32, y as u32, 255);
            }
        }
    }
    mask
}

/// Number of x-positions sampled along the parabolic curve.
const CURVE_SAMPLES: u32 = 100;

/// Mask selecting the dark section at the bottom of the canvas, bounded above
/// by a downward-opening parabola.
///
/// With `cy = height − dark_section_height` and `py = dark_section_height ×
/// peak_height_ratio`, the curve is `y = −a(x − cx)² + py + cy` where
/// `a = steepness × py / cx²`. Everything from `cy + py` to the bottom edge
/// is filled outright; the polygon through the sampled curve fills the rest.
pub fn parabola(
    width: u32,
    height: u32,
    dark_section_height: u32,
    peak_height_ratio: f32,
    steepness_factor: f32,
) -> Mask {
    let mut mask = Mask::new(width, height);
    let w = f64::from(width);
    let h = f64::from(height);
    let curve_start_y = h - f64::from(dark_section_height);
    let peak_y = f64::from(dark_section_height) * f64::from(peak_height_ratio);
    let cx = w / 2.0;
    let a = (f64::from(steepness_factor) * peak_y) / (cx * cx);

    mask.fill_rect(
        0,
        (curve_start_y + peak_y) as i32,
        width as i32,
        height as i32,
        255,
    );

    let mut points = Vec::with_capacity(CURVE_SAMPLES as usize + 3);
    points.push((0.0, h));
    for i in 0..=CURVE_SAMPLES {
        let x = f64::from(i) * w / f64::from(CURVE_SAMPLES);
        let y = -a * (x - cx) * (x - cx) + peak_y + curve_start_y;
        points.push((x, y));
    }
    points.push((w, h));

    fill_polygon(&mut mask, &points, 255);
    mask
}

/// Even-odd scanline fill of a closed polygon. The final edge wraps from the
/// last point back to the first.
pub fn fill_polygon(mask: &mut Mask, points: &[(f64, f64)], value: u8) {
    if points.len() < 3 {
        return;
    }
    let height = mask.height() as i32;
    let mut crossings: Vec<f64> = Vec::new();
    for y in 0..height {
        let yc = f64::from(y) + 0.5;
        crossings.clear();
        for i in 0..points.len() {
            let (x1, y1) = points[i];
            let (x2, y2) = points[(i + 1) % points.len()];
            if (y1 <= yc && yc < y2) || (y2 <= yc && yc < y1) {
                let t = (yc - y1) / (y2 - y1);
                crossings.push(x1 + t * (x2 - x1));
            }
        }
        crossings.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in crossings.chunks_exact(2) {
            let start = (pair[0] - 0.5).ceil() as i32;
            let end = (pair[1] - 0.5).ceil() as i32;
            mask.fill_rect(start, y, end, y + 1, value);
        }
    }
}
