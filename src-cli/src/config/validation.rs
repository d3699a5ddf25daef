//! Setting value validation.

use regex::Regex;
use std::sync::LazyLock;

static RE_EC_LEVEL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[LMQHlmqh]$").unwrap());

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "QR_LABEL_DPI" => validate_int_range(value, 72, 2400)?,
        "QR_LABEL_VERSION" => validate_int_range(value, 1, 40)?,
        "QR_LABEL_EC_LEVEL" => {
            if !RE_EC_LEVEL.is_match(value) {
                return Err("must be one of L, M, Q, H".into());
            }
        }
        "QR_LABEL_FONT" => {
            if !value.is_empty() && !is_font_path(value) {
                return Err("must point to a .ttf or .otf file".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

fn is_font_path(value: &str) -> bool {
    let lower = value.to_lowercase();
    lower.ends_with(".ttf") || lower.ends_with(".otf")
}
