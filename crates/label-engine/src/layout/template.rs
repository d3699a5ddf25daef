//! QR code and caption composited into a zone of a background template.

use std::path::Path;

use crate::caption::{LABEL_CAPTION_MAX, derive_caption};
use crate::compose::{overlay, overlay_rgba, transparent_layer};
use crate::fit::{TextMeasure, fit_font_size, max_text_width};
use crate::font::FontSet;
use crate::layout::{QR_BORDER_MODULES, RenderedLabel};
use crate::qr::QrRaster;
use crate::request::Zone;
use crate::resize::scaled_side;
use crate::text::centered_x;
use crate::{LabelError, Result};

const QR_FRACTION: f64 = 0.75;
/// Initial caption font size.
pub const FONT_START: u32 = 28;
/// Smallest caption font size tried.
pub const FONT_FLOOR: u32 = 5;

/// Clip `zone` to an image of `width` x `height`; `None` selects the whole image.
pub fn resolve_zone(zone: Option<Zone>, width: u32, height: u32) -> Result<Zone> {
    let Some(zone) = zone else {
        return Ok(Zone {
            x: 0,
            y: 0,
            width,
            height,
        });
    };
    if zone.x >= width || zone.y >= height {
        return Err(LabelError::Validation(format!(
            "placement zone origin ({}, {}) lies outside the {width}x{height} template",
            zone.x, zone.y
        )));
    }
    Ok(Zone {
        x: zone.x,
        y: zone.y,
        width: zone.width.min(width - zone.x),
        height: zone.height.min(height - zone.y),
    })
}

pub(crate) fn render(
    url: &str,
    qr: &QrRaster,
    template_path: &Path,
    zone: Option<Zone>,
    fonts: &FontSet,
) -> Result<RenderedLabel> {
    if !template_path.exists() {
        return Err(LabelError::TemplateNotFound(template_path.to_path_buf()));
    }
    let mut base = image::open(template_path)?.to_rgba8();
    let zone = resolve_zone(zone, base.width(), base.height())?;

    let mut layer = transparent_layer(zone.width, zone.height);

    let qr_side = scaled_side(zone.height, QR_FRACTION).min(zone.width);
    let qr_img = qr.to_image(QR_BORDER_MODULES, qr_side);
    let qr_x = (zone.width - qr_side) / 2;
    let qr_y = (zone.height - qr_side) / 2;
    overlay(&mut layer, &qr_img, qr_x, qr_y);

    let caption = derive_caption(url, LABEL_CAPTION_MAX);
    let font_size = fonts.caption_font().map(|font| {
        let fit = fit_font_size(
            &font,
            &caption,
            FONT_START,
            FONT_FLOOR,
            max_text_width(zone.width),
        );
        let qr_bottom = (qr_y + qr_side) as i32;
        let remaining = zone.height as i32 - qr_bottom;
        let text_h = font.line_height(fit.size) as i32;
        let y = qr_bottom + (remaining - text_h).div_euclid(2);
        font.draw(&mut layer, fit.size, centered_x(zone.width, fit.width), y, &caption);
        font.effective_size(fit.size)
    });

    overlay_rgba(&mut base, &layer, zone.x, zone.y);

    tracing::debug!(
        template = %template_path.display(),
        zone_x = zone.x,
        zone_y = zone.y,
        zone_w = zone.width,
        zone_h = zone.height,
        qr_side,
        ?font_size,
        "Template label composed"
    );
    Ok(RenderedLabel::new(base, caption, font_size, qr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_zone_selects_whole_template() {
        let zone = resolve_zone(None, 800, 600).unwrap();
        assert_eq!(
            zone,
            Zone {
                x: 0,
                y: 0,
                width: 800,
                height: 600
            }
        );
    }

    #[test]
    fn zone_is_clipped_to_template() {
        let zone = Zone {
            x: 700,
            y: 500,
            width: 300,
            height: 300,
        };
        let clipped = resolve_zone(Some(zone), 800, 600).unwrap();
        assert_eq!((clipped.width, clipped.height), (100, 100));
    }

    #[test]
    fn zone_outside_template_is_rejected() {
        let zone = Zone {
            x: 800,
            y: 0,
            width: 10,
            height: 10,
        };
        assert!(matches!(
            resolve_zone(Some(zone), 800, 600),
            Err(LabelError::Validation(_))
        ));
    }
}
