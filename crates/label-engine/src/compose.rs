//! Canvas creation and alpha compositing.

use image::{DynamicImage, Rgba, RgbaImage};

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Create an opaque white canvas.
pub fn blank_canvas(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width.max(1), height.max(1), WHITE)
}

/// Create a fully transparent layer.
pub fn transparent_layer(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width.max(1), height.max(1), TRANSPARENT)
}

/// Overlay `top` onto `base` at the given position.
///
/// `top` is alpha-composited; pixels falling outside `base` are dropped.
pub fn overlay(base: &mut RgbaImage, top: &DynamicImage, x: u32, y: u32) {
    let top_rgba = top.to_rgba8();
    overlay_rgba(base, &top_rgba, x, y);
}

/// Same as [`overlay`] for an image that is already RGBA.
pub fn overlay_rgba(base: &mut RgbaImage, top: &RgbaImage, x: u32, y: u32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x >= base.width() || target_y >= base.height() {
            continue;
        }
        let alpha = pixel[3] as f32 / 255.0;
        if alpha > 0.99 {
            base.put_pixel(target_x, target_y, *pixel);
        } else if alpha > 0.01 {
            let bg = *base.get_pixel(target_x, target_y);
            base.put_pixel(target_x, target_y, blend_pixel(&bg, pixel, alpha));
        }
    }
}

/// Source-over blend of `fg` (with coverage `alpha`) onto `bg`.
fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let bg_alpha = bg[3] as f32 / 255.0;
    let out_alpha = alpha + bg_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return TRANSPARENT;
    }
    let channel = |i: usize| {
        let c = (fg[i] as f32 * alpha + bg[i] as f32 * bg_alpha * (1.0 - alpha)) / out_alpha;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([channel(0), channel(1), channel(2), (out_alpha * 255.0).round() as u8])
}

/// Bounding box `(min_x, max_x, min_y, max_y)` of dark pixels within the ranges.
#[cfg(test)]
pub(crate) fn ink_bounds(
    img: &RgbaImage,
    xs: std::ops::Range<u32>,
    ys: std::ops::Range<u32>,
) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in ys {
        for x in xs.clone() {
            if img.get_pixel(x, y)[0] >= 128 {
                continue;
            }
            bounds = Some(match bounds {
                None => (x, x, y, y),
                Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
            });
        }
    }
    bounds
}
