use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgb, RgbImage};

use crate::model::Click;
use crate::render::{RenderError, open_image};

/// A source image shrunk into a square canvas, plus the geometry needed to map
/// canvas points back to source pixels.
#[derive(Debug, Clone)]
pub struct Letterbox {
    pub canvas: RgbImage,
    pub offset: (u32, u32),
    pub scaled: (u32, u32),
    pub source: (u32, u32),
}

impl Letterbox {
    /// Maps a canvas point to source pixel coordinates. Points on the
    /// background band map to `None`.
    pub fn to_image(&self, cx: u32, cy: u32) -> Option<Click> {
        let (ox, oy) = self.offset;
        let (sw, sh) = self.scaled;
        if cx < ox || cy < oy || cx >= ox + sw || cy >= oy + sh {
            return None;
        }
        let x = (cx - ox) as u64 * self.source.0 as u64 / sw as u64;
        let y = (cy - oy) as u64 * self.source.1 as u64 / sh as u64;
        Some(Click::new(x as i32, y as i32))
    }
}

pub fn fit_square(path: &Path, box_size: u32, bg: [u8; 3]) -> Result<Letterbox, RenderError> {
    let img = open_image(path)?;
    Ok(fit_square_image(&img, box_size, bg))
}

/// Shrinks (never enlarges) `img` to fit in a `box_size` square and centers it
/// on a background of `bg`.
pub fn fit_square_image(img: &DynamicImage, box_size: u32, bg: [u8; 3]) -> Letterbox {
    let rgb = img.to_rgb8();
    let source = rgb.dimensions();
    let scaled = thumbnail_size(source, box_size);

    let resized = if scaled == source {
        rgb
    } else {
        imageops::resize(&rgb, scaled.0, scaled.1, FilterType::Lanczos3)
    };

    let mut canvas = RgbImage::from_pixel(box_size, box_size, Rgb(bg));
    let offset = ((box_size - scaled.0) / 2, (box_size - scaled.1) / 2);
    imageops::replace(&mut canvas, &resized, offset.0 as i64, offset.1 as i64);

    Letterbox {
        canvas,
        offset,
        scaled,
        source,
    }
}

fn thumbnail_size((w, h): (u32, u32), box_size: u32) -> (u32, u32) {
    if w <= box_size && h <= box_size {
        return (w, h);
    }
    let scale_long = |long: u32, short: u32| {
        let v = (short as f64 * box_size as f64 / long as f64).round() as u32;
        v.clamp(1, box_size)
    };
    if w >= h {
        (box_size, scale_long(w, h))
    } else {
        (scale_long(h, w), box_size)
    }
}
