//! Label layouts: fixed square, dimensioned rectangle, template zone.
//!
//! Every layout encodes the URL first, then places the QR raster and a
//! caption onto its own canvas. The encoder may pick a larger QR version
//! than requested; the version used is reported on [`RenderedLabel`].

pub mod rectangle;
pub mod square;
pub mod template;

use std::path::Path;

use image::{ImageFormat, RgbaImage};

use crate::Result;
use crate::font::FontSet;
use crate::qr::{self, QrRaster};
use crate::request::{LabelRequest, Layout};

/// Quiet zone, in modules, around the QR code on rectangle and template labels.
pub const QR_BORDER_MODULES: u32 = 4;

/// A composed label ready to be written out.
#[derive(Debug, Clone)]
pub struct RenderedLabel {
    pub image: RgbaImage,
    /// Caption text drawn under the QR code.
    pub caption: String,
    /// Font size the caption was drawn at; `None` when no font was usable.
    pub font_size: Option<u32>,
    /// QR version actually encoded.
    pub qr_version: u8,
    pub requested_qr_version: u8,
}

impl RenderedLabel {
    pub(crate) fn new(
        image: RgbaImage,
        caption: String,
        font_size: Option<u32>,
        qr: &QrRaster,
    ) -> Self {
        Self {
            image,
            caption,
            font_size,
            qr_version: qr.version(),
            requested_qr_version: qr.requested_version(),
        }
    }

    /// True when the encoder had to use a larger version than requested.
    pub fn qr_version_upgraded(&self) -> bool {
        self.qr_version != self.requested_qr_version
    }

    /// Write the label as PNG, creating parent directories as needed.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.image.save_with_format(path, ImageFormat::Png)?;
        tracing::info!(
            path = %path.display(),
            width = self.image.width(),
            height = self.image.height(),
            qr_version = self.qr_version,
            "Label saved"
        );
        Ok(())
    }
}

/// Render one label.
pub fn render(request: &LabelRequest, fonts: &FontSet) -> Result<RenderedLabel> {
    request.validate()?;
    let qr = qr::encode(&request.url, request.qr_version, request.error_correction)?;

    match &request.layout {
        Layout::Square { size_px } => Ok(square::render(&request.url, &qr, *size_px, fonts)),
        Layout::Rectangle {
            width_mm,
            height_mm,
            dpi,
        } => Ok(rectangle::render(
            &request.url,
            &qr,
            rectangle::pixel_size(*width_mm, *height_mm, *dpi),
            *dpi,
            fonts,
        )),
        Layout::Template {
            template_path,
            zone,
        } => template::render(&request.url, &qr, template_path, *zone, fonts),
    }
}
