use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

use crate::config::DEFAULT_RECTS;
use crate::model::Rect;
use crate::render::overlay::clip;
use crate::render::{RenderError, save_image};

const SIZE: u32 = 512;
const GRID_STEP: u32 = 64;
const LINE: i32 = 3;
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([230, 230, 230]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);

/// Writes `normal.png` and `lesion.png`; the lesion copy differs by a red
/// outline at the default ground-truth region.
pub fn make_demo_images(out_dir: &Path) -> Result<(PathBuf, PathBuf), RenderError> {
    let normal = base_image();
    let mut lesion = normal.clone();
    for rect in DEFAULT_RECTS {
        outline_rect(&mut lesion, rect, RED);
    }

    let normal_path = out_dir.join("normal.png");
    let lesion_path = out_dir.join("lesion.png");
    save_image(&normal, &normal_path)?;
    save_image(&lesion, &lesion_path)?;
    tracing::info!(dir = %out_dir.display(), "demo images written");
    Ok((normal_path, lesion_path))
}

pub(crate) fn base_image() -> RgbImage {
    let mut img = RgbImage::from_pixel(SIZE, SIZE, WHITE);
    for v in (0..SIZE).step_by(GRID_STEP as usize) {
        for t in 0..SIZE {
            img.put_pixel(v, t, GRID);
            img.put_pixel(t, v, GRID);
        }
    }
    outline_rect(&mut img, &Rect::new(60, 60, 200, 160), BLACK);
    outline_ellipse(&mut img, (280, 80, 360, 160), BLACK);
    outline_rect(&mut img, &Rect::new(120, 300, 240, 420), BLACK);
    img
}

fn put(img: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

pub(crate) fn outline_rect(img: &mut RgbImage, rect: &Rect, color: Rgb<u8>) {
    let Some(((x1, x2), (y1, y2))) = clip(rect, img.width(), img.height()) else {
        return;
    };
    let line = i64::from(LINE);
    for y in y1..=y2 {
        let py = i64::from(y);
        let edge_row = py - i64::from(rect.y1) < line || i64::from(rect.y2) - py < line;
        for x in x1..=x2 {
            let px = i64::from(x);
            if edge_row || px - i64::from(rect.x1) < line || i64::from(rect.x2) - px < line {
                img.put_pixel(x, y, color);
            }
        }
    }
}

/// Ellipse outline inscribed in the box, `LINE` pixels thick.
fn outline_ellipse(img: &mut RgbImage, (x1, y1, x2, y2): (i32, i32, i32, i32), color: Rgb<u8>) {
    let (cx, cy) = ((x1 + x2) as f64 / 2.0, (y1 + y2) as f64 / 2.0);
    let (rx, ry) = ((x2 - x1) as f64 / 2.0, (y2 - y1) as f64 / 2.0);
    let (irx, iry) = (rx - LINE as f64, ry - LINE as f64);
    for y in y1..=y2 {
        for x in x1..=x2 {
            let (dx, dy) = (x as f64 - cx, y as f64 - cy);
            let outer = (dx / rx).powi(2) + (dy / ry).powi(2);
            let inner = (dx / irx).powi(2) + (dy / iry).powi(2);
            if outer <= 1.0 && inner > 1.0 {
                put(img, x, y, color);
            }
        }
    }
}
