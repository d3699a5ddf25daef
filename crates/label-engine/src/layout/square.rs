//! Fixed square canvas with a constant-size caption.

use crate::caption::{SQUARE_CAPTION_MAX, derive_caption};
use crate::compose::{blank_canvas, overlay};
use crate::fit::TextMeasure;
use crate::font::FontSet;
use crate::layout::RenderedLabel;
use crate::qr::QrRaster;
use crate::resize::scaled_side;
use crate::text::centered_x;

const QR_FRACTION: f64 = 0.8;
const QR_BORDER_MODULES: u32 = 1;
const TOP_MARGIN: u32 = 10;
/// Caption top edge, measured from the top of the canvas past the QR side.
const CAPTION_OFFSET: u32 = 20;
/// The square layout never shrinks its caption.
pub const CAPTION_FONT_PX: u32 = 12;

pub(crate) fn render(url: &str, qr: &QrRaster, size: u32, fonts: &FontSet) -> RenderedLabel {
    let qr_side = scaled_side(size, QR_FRACTION);
    let qr_img = qr.to_image(QR_BORDER_MODULES, qr_side);

    let mut canvas = blank_canvas(size, size);
    overlay(&mut canvas, &qr_img, (size - qr_side) / 2, TOP_MARGIN);

    let caption = derive_caption(url, SQUARE_CAPTION_MAX);
    let font_size = fonts.caption_font().map(|font| {
        let width = font.text_width(&caption, CAPTION_FONT_PX);
        let y = (qr_side + CAPTION_OFFSET) as i32;
        font.draw(&mut canvas, CAPTION_FONT_PX, centered_x(size, width), y, &caption);
        font.effective_size(CAPTION_FONT_PX)
    });

    tracing::debug!(size, qr_side, ?font_size, "Square label composed");
    RenderedLabel::new(canvas, caption, font_size, qr)
}
