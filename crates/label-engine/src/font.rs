//! Caption font loading with a fixed-size fallback.
//!
//! The preferred font is scalable and drives the shrink-to-fit loop. When it
//! cannot be loaded, any other system font is used at a fixed pixel size and
//! the fit loop stops immediately.

use std::path::{Path, PathBuf};

use ab_glyph::{FontArc, PxScale};
use image::RgbaImage;

use crate::compose::BLACK;
use crate::fit::TextMeasure;
use crate::text;
use crate::{LabelError, Result};

const MAX_FONT_SIZE: u64 = 50 * 1024 * 1024; // 50MB
const VALID_EXTENSIONS: &[&str] = &["ttf", "otf"];

/// File names tried, in order, when no preferred font path is configured.
pub const PREFERRED_FONT_NAMES: &[&str] = &[
    "arial.ttf",
    "Arial.ttf",
    "DejaVuSans.ttf",
    "LiberationSans-Regular.ttf",
];

/// Pixel size of the non-resizable fallback font.
pub const FALLBACK_FONT_PX: u32 = 11;

/// How deep to descend into system font directories.
const MAX_SEARCH_DEPTH: usize = 4;

/// Font used to draw a caption.
#[derive(Clone)]
pub enum CaptionFont {
    /// Scalable face; honours the requested size.
    Scalable(FontArc),
    /// Fallback face drawn at a fixed pixel size regardless of the request.
    Fixed { font: FontArc, px: u32 },
}

impl CaptionFont {
    fn face(&self) -> &FontArc {
        match self {
            Self::Scalable(font) | Self::Fixed { font, .. } => font,
        }
    }

    /// The size actually rendered when `size` is requested.
    pub fn effective_size(&self, size: u32) -> u32 {
        match self {
            Self::Scalable(_) => size,
            Self::Fixed { px, .. } => *px,
        }
    }

    fn scale(&self, size: u32) -> PxScale {
        PxScale::from(self.effective_size(size) as f32)
    }

    /// Draw black text with its top-left corner at (`x`, `y`).
    pub fn draw(&self, img: &mut RgbaImage, size: u32, x: i32, y: i32, caption: &str) {
        text::draw_text_at(img, self.face(), self.scale(size), x, y, caption, BLACK);
    }
}

impl TextMeasure for CaptionFont {
    fn text_width(&self, text: &str, size: u32) -> u32 {
        text::measure_text_width(self.face(), self.scale(size), text)
    }

    fn line_height(&self, size: u32) -> u32 {
        text::line_height(self.face(), self.scale(size))
    }

    fn is_scalable(&self) -> bool {
        matches!(self, Self::Scalable(_))
    }
}

/// Fonts available to the compositor for one run.
#[derive(Clone, Default)]
pub struct FontSet {
    preferred: Option<FontArc>,
    fallback: Option<FontArc>,
}

impl FontSet {
    /// Load the preferred font from `preferred`, or search the system font
    /// directories when no path is given. Never fails: a missing preferred
    /// font falls back to any usable system font at a fixed size.
    pub fn load(preferred: Option<&Path>) -> Self {
        let dirs = system_font_dirs();

        let preferred_font = match preferred {
            Some(path) => match load_font_file(path) {
                Ok(font) => Some(font),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Preferred font unusable: {e}");
                    None
                }
            },
            None => find_named_font(&dirs, PREFERRED_FONT_NAMES),
        };

        if preferred_font.is_some() {
            return Self::from_fonts(preferred_font, None);
        }

        let fallback = find_any_font(&dirs);
        if fallback.is_some() {
            tracing::warn!(px = FALLBACK_FONT_PX, "Using fixed-size fallback font for captions");
        } else {
            tracing::warn!("No usable font found; captions will be skipped");
        }
        Self::from_fonts(None, fallback)
    }

    pub fn from_fonts(preferred: Option<FontArc>, fallback: Option<FontArc>) -> Self {
        Self {
            preferred,
            fallback,
        }
    }

    /// Font to draw captions with, or `None` when no font is usable at all.
    pub fn caption_font(&self) -> Option<CaptionFont> {
        if let Some(font) = &self.preferred {
            return Some(CaptionFont::Scalable(font.clone()));
        }
        self.fallback.as_ref().map(|font| CaptionFont::Fixed {
            font: font.clone(),
            px: FALLBACK_FONT_PX,
        })
    }
}

/// Read and parse a TTF/OTF font file.
pub fn load_font_file(path: &Path) -> Result<FontArc> {
    let meta = std::fs::metadata(path)
        .map_err(|e| LabelError::FontUnavailable(format!("{}: {e}", path.display())))?;
    if meta.len() > MAX_FONT_SIZE {
        return Err(LabelError::FontUnavailable(format!(
            "{}: font file too large (max 50MB)",
            path.display()
        )));
    }
    let data = std::fs::read(path)?;
    FontArc::try_from_vec(data)
        .map_err(|e| LabelError::FontUnavailable(format!("{}: {e}", path.display())))
}

/// Directories searched for fonts on this platform.
pub fn system_font_dirs() -> Vec<PathBuf> {
    let mut dirs_found = Vec::new();
    if let Some(dir) = dirs::font_dir() {
        dirs_found.push(dir);
    }
    if let Some(home) = dirs::home_dir() {
        dirs_found.push(home.join(".fonts"));
    }
    for dir in [
        "/usr/share/fonts",
        "/usr/local/share/fonts",
        "/Library/Fonts",
        "/System/Library/Fonts",
        "C:\\Windows\\Fonts",
    ] {
        dirs_found.push(PathBuf::from(dir));
    }
    dirs_found.retain(|d| d.is_dir());
    dirs_found
}

fn find_named_font(dirs: &[PathBuf], names: &[&str]) -> Option<FontArc> {
    let files = font_files(dirs);
    for name in names {
        for path in files.iter().filter(|p| p.file_name().is_some_and(|f| f == *name)) {
            match load_font_file(path) {
                Ok(font) => {
                    tracing::debug!(path = %path.display(), "Loaded preferred font");
                    return Some(font);
                }
                Err(e) => tracing::debug!("Skipping font: {e}"),
            }
        }
    }
    None
}

fn find_any_font(dirs: &[PathBuf]) -> Option<FontArc> {
    font_files(dirs).iter().find_map(|path| load_font_file(path).ok())
}

/// All TTF/OTF files under `dirs`, in a stable order.
fn font_files(dirs: &[PathBuf]) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for dir in dirs {
        collect_font_files(dir, 0, &mut out);
    }
    out
}

fn collect_font_files(dir: &Path, depth: usize, out: &mut Vec<PathBuf>) {
    if depth > MAX_SEARCH_DEPTH {
        return;
    }
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();
    for path in paths {
        if path.is_dir() {
            collect_font_files(&path, depth + 1, out);
        } else if has_font_extension(&path) {
            out.push(path);
        }
    }
}

fn has_font_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| VALID_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// DejaVu Sans shipped with the crate for deterministic caption tests.
#[cfg(test)]
pub(crate) fn bundled_font() -> FontArc {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("fonts/DejaVuSans.ttf");
    load_font_file(&path).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn font_extension_is_case_insensitive() {
        assert!(has_font_extension(Path::new("a/Arial.TTF")));
        assert!(has_font_extension(Path::new("b.otf")));
        assert!(!has_font_extension(Path::new("c.woff2")));
        assert!(!has_font_extension(Path::new("noext")));
    }

    #[test]
    fn missing_font_file_is_unavailable() {
        let err = load_font_file(Path::new("/definitely/not/here.ttf")).err().unwrap();
        assert!(matches!(err, LabelError::FontUnavailable(_)));
    }

    #[test]
    fn garbage_font_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        let err = load_font_file(&path).err().unwrap();
        assert!(matches!(err, LabelError::FontUnavailable(_)));
    }

    #[test]
    fn bundled_font_is_scalable_and_measurable() {
        let font = FontSet::from_fonts(Some(bundled_font()), None)
            .caption_font()
            .unwrap();
        assert!(font.is_scalable());
        assert_eq!(font.effective_size(17), 17);
        assert!(font.text_width("label", 24) > font.text_width("label", 12));
    }

    #[test]
    fn fallback_font_ignores_requested_size() {
        let font = FontSet::from_fonts(None, Some(bundled_font()))
            .caption_font()
            .unwrap();
        assert!(!font.is_scalable());
        assert_eq!(font.effective_size(40), FALLBACK_FONT_PX);
        assert_eq!(font.text_width("label", 40), font.text_width("label", 6));
    }

    #[test]
    fn empty_font_set_has_no_caption_font() {
        assert!(FontSet::default().caption_font().is_none());
    }

    #[test]
    fn search_skips_unparseable_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("arial.ttf"), b"junk").unwrap();
        let dirs = vec![dir.path().to_path_buf()];
        assert_eq!(font_files(&dirs).len(), 1);
        assert!(find_named_font(&dirs, PREFERRED_FONT_NAMES).is_none());
        assert!(find_any_font(&dirs).is_none());
    }
}
