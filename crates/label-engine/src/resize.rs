//! Image resizing for QR placement.
//!
//! Uses Lanczos3 filtering so scaled module edges stay sharp.

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

/// Resize a square image to exactly `side` x `side` pixels.
///
/// Returns the original image unchanged if it already has that size.
pub fn resize_to_side(img: &DynamicImage, side: u32) -> DynamicImage {
    let (orig_w, orig_h) = (img.width(), img.height());
    let side = side.max(1);

    if orig_w == side && orig_h == side {
        debug!(side, "Image already at target side, skipping resize");
        return img.clone();
    }

    debug!(orig_w, orig_h, side, "Resizing image to target side");

    img.resize_exact(side, side, FilterType::Lanczos3)
}

/// Side of a square occupying `fraction` of `extent`, truncated to whole pixels.
pub fn scaled_side(extent: u32, fraction: f64) -> u32 {
    ((f64::from(extent) * fraction) as u32).max(1)
}
