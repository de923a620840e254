//! Feedback overlay: ground-truth regions and user clicks drawn over the base
//! image.

use image::{DynamicImage, Pixel, Rgba, RgbaImage};

use crate::model::{Click, Rect};

pub const COLOR_REGION_FILL: Rgba<u8> = Rgba([255, 0, 0, 64]);
pub const COLOR_REGION_EDGE: Rgba<u8> = Rgba([255, 0, 0, 255]);
pub const COLOR_CLICK: Rgba<u8> = Rgba([0, 90, 255, 255]);

const EDGE_THICKNESS: i32 = 3;
const MARKER_RADIUS: i32 = 6;

pub fn render_overlay(base: &DynamicImage, rects: &[Rect], clicks: &[Click]) -> RgbaImage {
    let mut img = base.to_rgba8();
    for rect in rects {
        fill_rect(&mut img, rect, COLOR_REGION_FILL);
        draw_rect(&mut img, rect, COLOR_REGION_EDGE, EDGE_THICKNESS);
    }
    for &click in clicks {
        draw_ring(&mut img, click, MARKER_RADIUS, COLOR_CLICK);
    }
    img
}

/// Alpha-blends `color` into the pixel, ignoring points outside the image.
fn blend_at(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    if x < 0 || y < 0 || x as u32 >= w || y as u32 >= h {
        return;
    }
    img.get_pixel_mut(x as u32, y as u32).blend(&color);
}

/// Inclusive pixel ranges of `rect` that fall inside a `w`x`h` image, or
/// `None` when the two do not overlap.
pub(crate) fn clip(rect: &Rect, w: u32, h: u32) -> Option<((u32, u32), (u32, u32))> {
    let span = |lo: i32, hi: i32, len: u32| -> Option<(u32, u32)> {
        let lo = i64::from(lo).max(0);
        let hi = i64::from(hi).min(i64::from(len) - 1);
        (lo <= hi).then(|| (lo as u32, hi as u32))
    };
    Some((span(rect.x1, rect.x2, w)?, span(rect.y1, rect.y2, h)?))
}

pub fn fill_rect(img: &mut RgbaImage, rect: &Rect, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    let Some(((x1, x2), (y1, y2))) = clip(rect, w, h) else {
        return;
    };
    for y in y1..=y2 {
        for x in x1..=x2 {
            img.get_pixel_mut(x, y).blend(&color);
        }
    }
}

/// Draws the border inward from the rectangle edges.
pub fn draw_rect(img: &mut RgbaImage, rect: &Rect, color: Rgba<u8>, thickness: i32) {
    let (w, h) = img.dimensions();
    let Some(((x1, x2), (y1, y2))) = clip(rect, w, h) else {
        return;
    };
    let t = i64::from(thickness);
    let (rx1, rx2) = (i64::from(rect.x1), i64::from(rect.x2));
    let (ry1, ry2) = (i64::from(rect.y1), i64::from(rect.y2));
    for y in y1..=y2 {
        let py = i64::from(y);
        let edge_row = py - ry1 < t || ry2 - py < t;
        for x in x1..=x2 {
            let px = i64::from(x);
            if edge_row || px - rx1 < t || rx2 - px < t {
                img.get_pixel_mut(x, y).blend(&color);
            }
        }
    }
}

/// One-pixel-wide circle outline centered on the click.
pub fn draw_ring(img: &mut RgbaImage, center: Click, radius: i32, color: Rgba<u8>) {
    let outer = (radius * radius + radius) as i64;
    let inner = (radius * radius - radius) as i64;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let d = (dx * dx + dy * dy) as i64;
            if d >= inner && d <= outer {
                blend_at(img, center.x.saturating_add(dx), center.y.saturating_add(dy), color);
            }
        }
    }
}
