//! Immutable label request passed into the compositor.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use qrcode::EcLevel;

use crate::layout::rectangle::pixel_size;
use crate::{DEFAULT_QR_VERSION, LabelError, MAX_QR_VERSION, Result};

/// Smallest accepted square canvas side in pixels.
pub const MIN_SQUARE_PX: u32 = 100;

/// Largest accepted square canvas side in pixels.
pub const MAX_SQUARE_PX: u32 = 2000;

/// Lowest accepted print resolution.
pub const MIN_DPI: u32 = 72;
/// Largest rectangle label side, in pixels, after the mm to px conversion.
pub const MAX_LABEL_PX: u32 = 10_000;

/// QR error-correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

impl ErrorCorrection {
    /// Single-letter name used by the capacity table.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        }
    }

    pub(crate) fn ec_level(self) -> EcLevel {
        match self {
            Self::L => EcLevel::L,
            Self::M => EcLevel::M,
            Self::Q => EcLevel::Q,
            Self::H => EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCorrection {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            other => Err(LabelError::Validation(format!(
                "unknown error-correction level '{other}' (expected L, M, Q or H)"
            ))),
        }
    }
}

/// Placement zone inside a template, in template pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Canvas variant for a label.
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// Fixed `size_px` x `size_px` white canvas.
    Square { size_px: u32 },
    /// Physical label size converted to pixels at `dpi`.
    Rectangle { width_mm: f64, height_mm: f64, dpi: u32 },
    /// Background template with an optional placement zone (whole image if `None`).
    Template {
        template_path: PathBuf,
        zone: Option<Zone>,
    },
}

/// Everything needed to render one label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRequest {
    pub url: String,
    pub layout: Layout,
    pub qr_version: u8,
    pub error_correction: ErrorCorrection,
}

impl LabelRequest {
    pub fn new(url: impl Into<String>, layout: Layout) -> Self {
        Self {
            url: url.into(),
            layout,
            qr_version: DEFAULT_QR_VERSION,
            error_correction: ErrorCorrection::default(),
        }
    }

    /// Set the requested QR version. Out-of-range values fall back to the default.
    pub fn with_qr_version(mut self, version: u32) -> Self {
        self.qr_version = normalize_version(version);
        self
    }

    pub fn with_error_correction(mut self, level: ErrorCorrection) -> Self {
        self.error_correction = level;
        self
    }

    /// Check the numeric invariants of the request.
    pub fn validate(&self) -> Result<()> {
        if self.url.is_empty() {
            return Err(LabelError::Validation("URL must not be empty".into()));
        }
        if !(1..=MAX_QR_VERSION).contains(&self.qr_version) {
            return Err(LabelError::Validation(format!(
                "QR version must be between 1 and {MAX_QR_VERSION}"
            )));
        }
        match &self.layout {
            Layout::Square { size_px } => {
                if !(MIN_SQUARE_PX..=MAX_SQUARE_PX).contains(size_px) {
                    return Err(LabelError::Validation(format!(
                        "square size must be between {MIN_SQUARE_PX} and {MAX_SQUARE_PX} px"
                    )));
                }
            }
            Layout::Rectangle {
                width_mm,
                height_mm,
                dpi,
            } => {
                if !(width_mm.is_finite() && *width_mm > 0.0)
                    || !(height_mm.is_finite() && *height_mm > 0.0)
                {
                    return Err(LabelError::Validation(
                        "label width and height must be positive".into(),
                    ));
                }
                if *dpi < MIN_DPI {
                    return Err(LabelError::Validation(format!(
                        "dpi must be at least {MIN_DPI}"
                    )));
                }
                let (width, height) = pixel_size(*width_mm, *height_mm, *dpi);
                if width > MAX_LABEL_PX || height > MAX_LABEL_PX {
                    return Err(LabelError::Validation(format!(
                        "label of {width}x{height} px exceeds {MAX_LABEL_PX} px per side"
                    )));
                }
            }
            Layout::Template { zone, .. } => {
                if let Some(zone) = zone {
                    if zone.width == 0 || zone.height == 0 {
                        return Err(LabelError::Validation(
                            "placement zone must have a positive size".into(),
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Clamp a requested QR version into 1..=40, falling back to the default.
pub fn normalize_version(version: u32) -> u8 {
    if (1..=u32::from(MAX_QR_VERSION)).contains(&version) {
        version as u8
    } else {
        tracing::debug!(version, "QR version out of range, using default");
        DEFAULT_QR_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_correction_parses_case_insensitively() {
        assert_eq!("h".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::H);
        assert_eq!(" Q ".parse::<ErrorCorrection>().unwrap(), ErrorCorrection::Q);
        assert!("X".parse::<ErrorCorrection>().is_err());
    }

    #[test]
    fn out_of_range_version_falls_back() {
        let req = LabelRequest::new("u", Layout::Square { size_px: 300 });
        assert_eq!(req.clone().with_qr_version(0).qr_version, DEFAULT_QR_VERSION);
        assert_eq!(req.clone().with_qr_version(41).qr_version, DEFAULT_QR_VERSION);
        assert_eq!(req.with_qr_version(40).qr_version, 40);
    }

    #[test]
    fn square_size_is_bounded() {
        let ok = LabelRequest::new("u", Layout::Square { size_px: 100 });
        assert!(ok.validate().is_ok());
        let small = LabelRequest::new("u", Layout::Square { size_px: 99 });
        assert!(small.validate().is_err());
        let big = LabelRequest::new("u", Layout::Square { size_px: 2001 });
        assert!(big.validate().is_err());
    }

    #[test]
    fn rectangle_rejects_bad_numbers() {
        let layout = |w: f64, h: f64, dpi: u32| Layout::Rectangle {
            width_mm: w,
            height_mm: h,
            dpi,
        };
        assert!(LabelRequest::new("u", layout(50.0, 30.0, 300)).validate().is_ok());
        assert!(LabelRequest::new("u", layout(0.0, 30.0, 300)).validate().is_err());
        assert!(LabelRequest::new("u", layout(50.0, -1.0, 300)).validate().is_err());
        assert!(LabelRequest::new("u", layout(50.0, 30.0, 71)).validate().is_err());
    }

    #[test]
    fn oversized_rectangle_is_rejected() {
        let layout = |w: f64, h: f64| Layout::Rectangle {
            width_mm: w,
            height_mm: h,
            dpi: 300,
        };
        // 846.6 mm at 300 dpi rounds to 9999 px
        assert!(LabelRequest::new("u", layout(846.6, 30.0)).validate().is_ok());
        assert!(LabelRequest::new("u", layout(847.0, 30.0)).validate().is_err());
        assert!(matches!(
            LabelRequest::new("u", layout(1e300, 1e300)).validate(),
            Err(LabelError::Validation(_))
        ));
    }

    #[test]
    fn out_of_range_version_fails_validation() {
        let mut req = LabelRequest::new("u", Layout::Square { size_px: 300 });
        req.qr_version = 41;
        assert!(matches!(req.validate(), Err(LabelError::Validation(_))));
        req.qr_version = 0;
        assert!(req.validate().is_err());
    }

    #[test]
    fn empty_url_is_rejected() {
        let req = LabelRequest::new("", Layout::Square { size_px: 300 });
        assert!(matches!(req.validate(), Err(LabelError::Validation(_))));
    }

    #[test]
    fn zero_sized_zone_is_rejected() {
        let req = LabelRequest::new(
            "u",
            Layout::Template {
                template_path: PathBuf::from("t.png"),
                zone: Some(Zone {
                    x: 0,
                    y: 0,
                    width: 0,
                    height: 10,
                }),
            },
        );
        assert!(req.validate().is_err());
    }
}
