//! Runtime configuration loaded from the environment (after `.env`).

use std::path::PathBuf;

use label_engine::{DEFAULT_QR_VERSION, ErrorCorrection};

use super::defaults::get_default;
use super::validation::validate_setting;
use crate::services::output::default_save_dir;

/// Runtime configuration with defaults for every CLI option.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub font_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub dpi: u32,
    pub qr_version: u32,
    pub error_correction: ErrorCorrection,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, anyhow::Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Missing or empty keys use their defaults; invalid values are logged and
    /// replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let g = |key: &str| -> String {
            let default = get_default(key).unwrap_or_default();
            match lookup(key) {
                Some(v) if !v.is_empty() => match validate_setting(key, &v) {
                    Ok(()) => v,
                    Err(e) => {
                        tracing::warn!("Invalid {key}={v:?} ({e}), using default {default:?}");
                        default.to_string()
                    }
                },
                _ => default.to_string(),
            }
        };

        let font = g("QR_LABEL_FONT");
        let output_dir = g("QR_LABEL_OUTPUT_DIR");

        Ok(Self {
            font_path: (!font.is_empty()).then(|| PathBuf::from(font)),
            output_dir: if output_dir.is_empty() {
                default_save_dir()
            } else {
                PathBuf::from(output_dir)
            },
            dpi: parse_u32(&g("QR_LABEL_DPI"), 300),
            qr_version: parse_u32(&g("QR_LABEL_VERSION"), u32::from(DEFAULT_QR_VERSION)),
            error_correction: g("QR_LABEL_EC_LEVEL").parse()?,
        })
    }
}

fn parse_u32(s: &str, default: u32) -> u32 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}
