//! Caption text shown under the QR code.

/// Longest caption on the fixed square canvas.
pub const SQUARE_CAPTION_MAX: usize = 40;

/// Longest caption on rectangle and template labels.
pub const LABEL_CAPTION_MAX: usize = 80;

const ELLIPSIS: &str = "...";

/// Derive the display caption for `url`.
///
/// URLs up to `max_len` characters are used verbatim. Longer ones keep the
/// first `max_len - 3` characters followed by `...`, so the caption is
/// exactly `max_len` characters long.
pub fn derive_caption(url: &str, max_len: usize) -> String {
    if url.chars().count() <= max_len {
        return url.to_string();
    }
    let keep = max_len.saturating_sub(ELLIPSIS.len());
    let mut caption: String = url.chars().take(keep).collect();
    caption.push_str(ELLIPSIS);
    caption
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_url_is_verbatim() {
        let url = "https://example.com/a";
        assert_eq!(derive_caption(url, SQUARE_CAPTION_MAX), url);
    }

    #[test]
    fn url_at_limit_is_verbatim() {
        let url = "a".repeat(40);
        assert_eq!(derive_caption(&url, SQUARE_CAPTION_MAX), url);
        let url = "b".repeat(80);
        assert_eq!(derive_caption(&url, LABEL_CAPTION_MAX), url);
    }

    #[test]
    fn long_url_is_truncated_with_ellipsis() {
        let url = format!("https://example.com/{}", "x".repeat(60));
        let caption = derive_caption(&url, SQUARE_CAPTION_MAX);
        assert_eq!(caption.len(), 40);
        assert_eq!(caption, format!("{}...", &url[..37]));
    }

    #[test]
    fn label_limit_truncates_at_eighty() {
        let url = "c".repeat(81);
        let caption = derive_caption(&url, LABEL_CAPTION_MAX);
        assert_eq!(caption.len(), 80);
        assert!(caption.ends_with("..."));
        assert_eq!(&caption[..77], &url[..77]);
    }

    #[test]
    fn truncation_never_splits_a_code_point() {
        let url = "é".repeat(50);
        let caption = derive_caption(&url, SQUARE_CAPTION_MAX);
        assert_eq!(caption.chars().count(), 40);
    }
}
