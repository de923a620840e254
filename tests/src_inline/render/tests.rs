use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

use super::canvas::fit_square_image;
use super::demo::{base_image, make_demo_images, outline_rect};
use super::overlay::{COLOR_CLICK, COLOR_REGION_EDGE, clip, draw_rect, render_overlay};
use super::{RenderError, fit_square, open_image};
use crate::model::{Click, Rect};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("xray_quiz_render_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn solid(w: u32, h: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb(color)))
}

#[test]
fn test_small_image_is_centered_not_enlarged() {
    let lb = fit_square_image(&solid(100, 50, [255, 255, 255]), 420, [0, 0, 0]);
    assert_eq!(lb.canvas.dimensions(), (420, 420));
    assert_eq!(lb.scaled, (100, 50));
    assert_eq!(lb.offset, (160, 185));
    assert_eq!(*lb.canvas.get_pixel(0, 0), Rgb([0, 0, 0]));
    assert_eq!(*lb.canvas.get_pixel(160, 185), Rgb([255, 255, 255]));
    assert_eq!(*lb.canvas.get_pixel(259, 234), Rgb([255, 255, 255]));
    assert_eq!(*lb.canvas.get_pixel(260, 234), Rgb([0, 0, 0]));
}

#[test]
fn test_wide_image_is_shrunk_and_letterboxed() {
    let lb = fit_square_image(&solid(840, 420, [10, 200, 10]), 420, [1, 2, 3]);
    assert_eq!(lb.scaled, (420, 210));
    assert_eq!(lb.offset, (0, 105));
    assert_eq!(*lb.canvas.get_pixel(5, 5), Rgb([1, 2, 3]));
    let center = lb.canvas.get_pixel(210, 210);
    assert!(center.0[1].abs_diff(200) <= 1 && center.0[0].abs_diff(10) <= 1);
}

#[test]
fn test_letterbox_maps_canvas_to_source() {
    let lb = fit_square_image(&solid(840, 420, [0, 0, 0]), 420, [0, 0, 0]);
    assert_eq!(lb.to_image(0, 105), Some(Click::new(0, 0)));
    assert_eq!(lb.to_image(210, 210), Some(Click::new(420, 210)));
    assert_eq!(lb.to_image(10, 104), None);
    assert_eq!(lb.to_image(10, 315), None);
}

#[test]
fn test_fit_square_reads_file() {
    let dir = make_temp_dir();
    let path = dir.join("in.png");
    RgbImage::from_pixel(20, 40, Rgb([9, 9, 9])).save(&path).unwrap();
    let lb = fit_square(&path, 64, [0, 0, 0]).unwrap();
    assert_eq!(lb.source, (20, 40));
    assert_eq!(lb.offset, (22, 12));
}

#[test]
fn test_missing_image_is_open_error() {
    let dir = make_temp_dir();
    let err = open_image(&dir.join("missing.png")).unwrap_err();
    assert!(matches!(err, RenderError::Open { .. }));
}

#[test]
fn test_overlay_draws_regions_and_clicks() {
    let base = DynamicImage::ImageRgba8(RgbaImage::from_pixel(100, 100, Rgba([255, 255, 255, 255])));
    let rect = Rect::new(10, 10, 40, 40);
    let out = render_overlay(&base, &[rect], &[Click::new(80, 80)]);

    assert_eq!(*out.get_pixel(10, 10), COLOR_REGION_EDGE);
    let inside = out.get_pixel(25, 25);
    assert_eq!(inside[0], 255);
    assert!(inside[1] < 255 && inside[1] > 0);
    assert_eq!(*out.get_pixel(5, 5), Rgba([255, 255, 255, 255]));

    assert_eq!(*out.get_pixel(86, 80), COLOR_CLICK);
    assert_eq!(*out.get_pixel(80, 80), Rgba([255, 255, 255, 255]));
}

#[test]
fn test_overlay_clips_out_of_bounds() {
    let base = solid(20, 20, [0, 0, 0]);
    let out = render_overlay(&base, &[Rect::new(-10, -10, 5, 5)], &[Click::new(-100, 500)]);
    assert_eq!(out.dimensions(), (20, 20));
    assert_eq!(*out.get_pixel(5, 5), COLOR_REGION_EDGE);
    assert_ne!(*out.get_pixel(0, 0), COLOR_REGION_EDGE);
}

#[test]
fn test_overlay_huge_rect_only_touches_image_pixels() {
    let base = solid(10, 10, [0, 0, 0]);
    let out = render_overlay(&base, &[Rect::new(0, 0, 1_000_000, 1_000_000)], &[]);
    // Left and top edges are inside the image, right and bottom are far outside.
    assert_eq!(*out.get_pixel(0, 9), COLOR_REGION_EDGE);
    assert_eq!(*out.get_pixel(9, 2), COLOR_REGION_EDGE);
    let interior = out.get_pixel(5, 5);
    assert_ne!(*interior, COLOR_REGION_EDGE);
    assert!(interior[0] > 0 && interior[1] == 0);
}

#[test]
fn test_overlay_extreme_coordinates_do_not_overflow() {
    let base = solid(8, 8, [0, 0, 0]);
    let full = Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX);
    let out = render_overlay(&base, &[full], &[Click::new(i32::MAX, i32::MIN)]);
    assert_ne!(*out.get_pixel(4, 4), COLOR_REGION_EDGE);
    assert!(out.get_pixel(4, 4)[0] > 0);

    let mut img = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
    draw_rect(&mut img, &Rect::new(i32::MIN, 2, 3, 5), COLOR_REGION_EDGE, 3);
    assert_eq!(*img.get_pixel(0, 2), COLOR_REGION_EDGE);
    assert_eq!(*img.get_pixel(3, 4), COLOR_REGION_EDGE);
    assert_eq!(*img.get_pixel(0, 4), COLOR_REGION_EDGE);
    assert_eq!(*img.get_pixel(0, 6), Rgba([0, 0, 0, 255]));
}

#[test]
fn test_clip_bounds() {
    assert_eq!(clip(&Rect::new(-5, 2, 100, 3), 10, 10), Some(((0, 9), (2, 3))));
    assert_eq!(clip(&Rect::new(10, 0, 20, 5), 10, 10), None);
    assert_eq!(clip(&Rect::new(i32::MIN, i32::MIN, -1, 4), 10, 10), None);
    assert_eq!(clip(&Rect::new(0, 0, 0, 0), 0, 0), None);
}

#[test]
fn test_demo_outline_clips_to_canvas() {
    let mut img = RgbImage::from_pixel(16, 16, Rgb([255, 255, 255]));
    outline_rect(&mut img, &Rect::new(i32::MIN, 4, i32::MAX, 1_000_000), Rgb([255, 0, 0]));
    assert_eq!(*img.get_pixel(15, 4), Rgb([255, 0, 0]));
    assert_eq!(*img.get_pixel(8, 6), Rgb([255, 0, 0]));
    assert_eq!(*img.get_pixel(8, 7), Rgb([255, 255, 255]));
    assert_eq!(*img.get_pixel(8, 3), Rgb([255, 255, 255]));
}

#[test]
fn test_demo_images_differ_only_at_lesion() {
    let dir = make_temp_dir();
    let (normal, lesion) = make_demo_images(&dir).unwrap();
    let a = image::open(&normal).unwrap().to_rgb8();
    let b = image::open(&lesion).unwrap().to_rgb8();
    assert_eq!(a.dimensions(), (512, 512));
    assert_eq!(*b.get_pixel(300, 140), Rgb([255, 0, 0]));
    assert_ne!(a.get_pixel(300, 140), b.get_pixel(300, 140));
    for (x, y, px) in a.enumerate_pixels() {
        let inside = (300..=360).contains(&x) && (140..=200).contains(&y);
        if !inside {
            assert_eq!(px, b.get_pixel(x, y));
        }
    }
}

#[test]
fn test_base_image_grid_and_shapes() {
    let img = base_image();
    assert_eq!(*img.get_pixel(64, 10), Rgb([230, 230, 230]));
    assert_eq!(*img.get_pixel(60, 100), Rgb([0, 0, 0]));
    assert_eq!(*img.get_pixel(100, 100), Rgb([255, 255, 255]));
    assert_eq!(*img.get_pixel(320, 80), Rgb([0, 0, 0]));
}
