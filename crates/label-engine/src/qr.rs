//! QR code generation for label images.

use image::{DynamicImage, GrayImage, Luma};
use qrcode::types::QrError;
use qrcode::{Color, QrCode, Version};
use tracing::{debug, info};

use crate::request::{ErrorCorrection, normalize_version};
use crate::resize::resize_to_side;
use crate::{MAX_QR_VERSION, Result};

/// An encoded QR symbol together with the version the encoder settled on.
pub struct QrRaster {
    code: QrCode,
    requested_version: u8,
}

impl QrRaster {
    /// Version actually used for the symbol.
    pub fn version(&self) -> u8 {
        match self.code.version() {
            Version::Normal(v) | Version::Micro(v) => v as u8,
        }
    }

    pub fn requested_version(&self) -> u8 {
        self.requested_version
    }

    /// True when the data did not fit and a larger version was chosen.
    pub fn was_upgraded(&self) -> bool {
        self.version() != self.requested_version
    }

    /// Modules per side, excluding the quiet zone.
    pub fn module_count(&self) -> u32 {
        self.code.width() as u32
    }

    /// Render black modules on white with a `border`-module quiet zone,
    /// scaled to exactly `target_px` square.
    pub fn to_image(&self, border: u32, target_px: u32) -> DynamicImage {
        let modules = self.code.to_colors();
        let module_count = self.module_count();
        let total = module_count + border * 2;

        let scale = (target_px / total).max(1);
        let img_size = total * scale;

        let mut img = GrayImage::from_pixel(img_size, img_size, Luma([255u8]));

        for (i, color) in modules.iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }
            let x = (i as u32) % module_count + border;
            let y = (i as u32) / module_count + border;
            for dx in 0..scale {
                for dy in 0..scale {
                    img.put_pixel(x * scale + dx, y * scale + dy, Luma([0u8]));
                }
            }
        }

        resize_to_side(&DynamicImage::ImageLuma8(img), target_px)
    }
}

/// Encode `data` at the requested version and error-correction level.
///
/// When the data does not fit, each larger version is tried in turn and the
/// first one that fits is used; the result reports the version chosen.
pub fn encode(data: &str, version: u8, level: ErrorCorrection) -> Result<QrRaster> {
    let requested = normalize_version(u32::from(version));

    for v in requested..=MAX_QR_VERSION {
        match QrCode::with_version(data.as_bytes(), Version::Normal(i16::from(v)), level.ec_level()) {
            Ok(code) => {
                if v != requested {
                    info!(requested, actual = v, %level, "QR data too long, version increased");
                } else {
                    debug!(version = v, %level, "QR encoded at requested version");
                }
                return Ok(QrRaster {
                    code,
                    requested_version: requested,
                });
            }
            Err(QrError::DataTooLong) => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Err(QrError::DataTooLong.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LabelError;

    #[test]
    fn encode_keeps_requested_version_when_data_fits() {
        let qr = encode("hi", 5, ErrorCorrection::M).unwrap();
        assert_eq!(qr.version(), 5);
        assert!(!qr.was_upgraded());
        assert_eq!(qr.module_count(), crate::module_count(5));
    }

    #[test]
    fn encode_upgrades_version_for_long_data() {
        let qr = encode("https://example.com/devices?deviceId=ABC123", 1, ErrorCorrection::H).unwrap();
        assert_eq!(qr.requested_version(), 1);
        assert!(qr.version() > 1);
        assert!(qr.was_upgraded());
        assert_eq!(qr.module_count(), crate::module_count(u32::from(qr.version())));
    }

    #[test]
    fn encode_out_of_range_version_uses_default() {
        let qr = encode("hi", 41, ErrorCorrection::M).unwrap();
        assert_eq!(qr.requested_version(), crate::DEFAULT_QR_VERSION);
        assert_eq!(qr.version(), crate::DEFAULT_QR_VERSION);

        let qr = encode("hi", 0, ErrorCorrection::M).unwrap();
        assert_eq!(qr.requested_version(), crate::DEFAULT_QR_VERSION);
    }

    #[test]
    fn encode_fails_when_nothing_fits() {
        let data = "x".repeat(4000);
        let err = encode(&data, 1, ErrorCorrection::H).err().unwrap();
        assert!(matches!(err, LabelError::QrEncode(QrError::DataTooLong)));
    }

    #[test]
    fn to_image_produces_exact_square() {
        let qr = encode("https://example.com", 1, ErrorCorrection::M).unwrap();
        let img = qr.to_image(1, 240);
        assert_eq!((img.width(), img.height()), (240, 240));
    }

    #[test]
    fn to_image_draws_quiet_zone_and_finder() {
        let qr = encode("test", 1, ErrorCorrection::L).unwrap();
        // 21 modules + 2*4 border = 29 modules at 10 px each
        let img = qr.to_image(4, 290).to_luma8();
        assert_eq!(img.get_pixel(5, 5)[0], 255);
        // first finder pattern module sits right after the border
        assert_eq!(img.get_pixel(45, 45)[0], 0);
    }
}
