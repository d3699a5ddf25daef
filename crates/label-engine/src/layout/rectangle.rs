//! Label sized in millimetres and rendered at a given DPI.

use crate::caption::{LABEL_CAPTION_MAX, derive_caption};
use crate::compose::{blank_canvas, overlay};
use crate::fit::{fit_font_size, max_text_width};
use crate::font::FontSet;
use crate::layout::{QR_BORDER_MODULES, RenderedLabel};
use crate::qr::QrRaster;
use crate::resize::scaled_side;
use crate::text::centered_x;

const MM_PER_INCH: f64 = 25.4;
const QR_FRACTION: f64 = 0.75;
const TOP_MARGIN: u32 = 10;
const CAPTION_GAP: u32 = 10;
/// Smallest caption font size tried.
pub const FONT_FLOOR: u32 = 6;

/// Canvas size in pixels for a label of `width_mm` x `height_mm` at `dpi`.
///
/// Each axis is rounded to the nearest pixel, halves away from zero.
pub fn pixel_size(width_mm: f64, height_mm: f64, dpi: u32) -> (u32, u32) {
    let to_px = |mm: f64| ((mm / MM_PER_INCH * f64::from(dpi)).round() as u32).max(1);
    (to_px(width_mm), to_px(height_mm))
}

/// Initial caption font size for a given resolution.
pub fn start_font_size(dpi: u32) -> u32 {
    dpi / 3
}

pub(crate) fn render(
    url: &str,
    qr: &QrRaster,
    (width, height): (u32, u32),
    dpi: u32,
    fonts: &FontSet,
) -> RenderedLabel {
    let qr_side = scaled_side(height, QR_FRACTION);
    let qr_img = qr.to_image(QR_BORDER_MODULES, qr_side);

    let mut canvas = blank_canvas(width, height);
    let qr_x = (width.saturating_sub(qr_side)) / 2;
    overlay(&mut canvas, &qr_img, qr_x, TOP_MARGIN);

    let caption = derive_caption(url, LABEL_CAPTION_MAX);
    let font_size = fonts.caption_font().map(|font| {
        let fit = fit_font_size(
            &font,
            &caption,
            start_font_size(dpi),
            FONT_FLOOR,
            max_text_width(width),
        );
        let y = (TOP_MARGIN + qr_side + CAPTION_GAP) as i32;
        font.draw(&mut canvas, fit.size, centered_x(width, fit.width), y, &caption);
        font.effective_size(fit.size)
    });

    tracing::debug!(width, height, dpi, qr_side, ?font_size, "Rectangle label composed");
    RenderedLabel::new(canvas, caption, font_size, qr)
}
