//! Output locations and file names for rendered labels.

use std::path::PathBuf;

use super::slug::extract_slug;

/// File name used for single labels when no output path is given.
pub const DEFAULT_OUTPUT_NAME: &str = "qr_output.png";

/// Default directory for saved labels.
/// Priority: ~/Downloads > ~/Desktop > current directory
pub fn default_save_dir() -> PathBuf {
    if let Some(home) = dirs::home_dir() {
        for candidate in ["Downloads", "Desktop"] {
            let dir = home.join(candidate);
            if dir.is_dir() {
                return dir;
            }
        }
    }
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Batch output name: 1-based sequence number, zero-padded to three digits,
/// followed by the URL slug.
pub fn batch_file_name(index: usize, url: &str) -> String {
    format!("{index:03}_{}.png", extract_slug(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_names_are_zero_padded() {
        assert_eq!(
            batch_file_name(1, "https://x.com/a/b?deviceId=XYZ123"),
            "001_XYZ123.png"
        );
        assert_eq!(batch_file_name(42, "https://x.com/"), "042_qr-sticker.png");
        assert_eq!(batch_file_name(1234, "https://x.com/tag"), "1234_tag.png");
    }

    #[test]
    fn default_save_dir_exists() {
        assert!(default_save_dir().is_dir());
    }
}
