//! Filesystem-safe short names derived from label URLs.

use std::sync::LazyLock;

use regex::Regex;

/// Name used when a URL yields no usable slug.
pub const FALLBACK_SLUG: &str = "qr-sticker";

const DEVICE_ID_PARAM: &str = "deviceId";

static RE_UNSAFE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_-]").unwrap());

/// Derive a slug from `url`.
///
/// Uses the `deviceId` query value when present, else the last path
/// component, else [`FALLBACK_SLUG`]. Characters outside `[A-Za-z0-9_-]` are
/// stripped; an empty result also yields the fallback.
pub fn extract_slug(url: &str) -> String {
    let (path, query) = split_url(url);

    let device_id = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, value)| key == DEVICE_ID_PARAM && !value.is_empty())
        .map(|(_, value)| value.into_owned());

    let raw = device_id
        .or_else(|| last_path_component(path).map(str::to_string))
        .unwrap_or_else(|| FALLBACK_SLUG.to_string());

    let cleaned = RE_UNSAFE.replace_all(&raw, "");
    if cleaned.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        cleaned.into_owned()
    }
}

/// Raw path and query of `url`, without percent-decoding or dot-segment
/// resolution. Scheme and authority are dropped from absolute URLs.
fn split_url(url: &str) -> (&str, &str) {
    let without_fragment = url.split('#').next().unwrap_or_default();
    let (target, query) = without_fragment
        .split_once('?')
        .unwrap_or((without_fragment, ""));
    let path = match target.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("", |i| &rest[i..]),
        None => target,
    };
    (path, query)
}

fn last_path_component(path: &str) -> Option<&str> {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_id_wins() {
        assert_eq!(extract_slug("https://x.com/a/b?deviceId=XYZ123"), "XYZ123");
        assert_eq!(extract_slug("https://x.com/a/b?foo=1&deviceId=dev-7"), "dev-7");
    }

    #[test]
    fn last_path_component_is_used_without_device_id() {
        assert_eq!(extract_slug("https://x.com/a/b"), "b");
        assert_eq!(extract_slug("https://x.com/a/b/"), "b");
        assert_eq!(extract_slug("https://x.com/a/b?deviceId="), "b");
    }

    #[test]
    fn bare_host_falls_back() {
        assert_eq!(extract_slug("https://x.com/"), FALLBACK_SLUG);
        assert_eq!(extract_slug("https://x.com"), FALLBACK_SLUG);
        assert_eq!(extract_slug(""), FALLBACK_SLUG);
    }

    #[test]
    fn unsafe_characters_are_stripped() {
        assert_eq!(extract_slug("https://x.com/a/b?deviceId=AB%20C.D!"), "ABCD");
        assert_eq!(extract_slug("https://x.com/files/report.v2.pdf"), "reportv2pdf");
        assert_eq!(extract_slug("https://x.com/a/b?deviceId=%21%21"), FALLBACK_SLUG);
    }

    #[test]
    fn path_is_taken_raw() {
        assert_eq!(extract_slug("https://x.com/a/café"), "caf");
        assert_eq!(extract_slug("https://x.com/a/my tag"), "mytag");
        assert_eq!(extract_slug("https://x.com/a/b/.."), FALLBACK_SLUG);
        assert_eq!(extract_slug("https://x.com/a/%41B"), "41B");
    }

    #[test]
    fn authority_is_never_a_slug() {
        assert_eq!(extract_slug("https://user@x.com:8080"), FALLBACK_SLUG);
        assert_eq!(extract_slug("https://x.com?deviceId=D1"), "D1");
        assert_eq!(extract_slug("https://x.com/tags/t-9#frag"), "t-9");
    }

    #[test]
    fn relative_strings_are_handled() {
        assert_eq!(extract_slug("assets/printer-01"), "printer-01");
        assert_eq!(extract_slug("assets/x?deviceId=Q9"), "Q9");
    }
}
