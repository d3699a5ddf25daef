//! Glyph metrics and text drawing on label canvases.

use ab_glyph::{Font, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

/// Measure the pixel width of a string at the given font and scale.
pub fn measure_text_width<F: Font>(font: &F, scale: PxScale, text: &str) -> u32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        if let Some(prev) = prev_glyph {
            width += scaled.kern(prev, glyph_id);
        }
        width += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width.ceil().max(0.0) as u32
}

/// Compute the line height for the given font and scale.
pub fn line_height<F: Font>(font: &F, scale: PxScale) -> u32 {
    let scaled = font.as_scaled(scale);
    (scaled.ascent() - scaled.descent()).ceil().max(0.0) as u32
}

/// Draw `text` with its top-left corner at (`x`, `y`).
pub fn draw_text_at<F: Font>(
    img: &mut RgbaImage,
    font: &F,
    scale: PxScale,
    x: i32,
    y: i32,
    text: &str,
    color: Rgba<u8>,
) {
    draw_text_mut(img, color, x, y, scale, font, text);
}

/// Left edge that centres a run of `text_width` pixels inside `area_width`.
pub fn centered_x(area_width: u32, text_width: u32) -> i32 {
    (area_width as i32 - text_width as i32).div_euclid(2)
}
