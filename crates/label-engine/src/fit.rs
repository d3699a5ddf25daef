//! Shrink-to-fit font sizing for captions.

/// Text metrics needed by the fit loop.
pub trait TextMeasure {
    /// Rendered width of `text` in pixels at `size`.
    fn text_width(&self, text: &str, size: u32) -> u32;

    /// Height of one line of text at `size`.
    fn line_height(&self, size: u32) -> u32;

    /// Whether the face can be rendered at arbitrary sizes.
    fn is_scalable(&self) -> bool {
        true
    }
}

/// Font size chosen for a caption and its measured width at that size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontFit {
    pub size: u32,
    pub width: u32,
}

/// Fraction of the available width reserved as padding on each side.
pub const SIDE_PADDING: f64 = 0.05;

/// Width left for text once `SIDE_PADDING` is taken from both sides.
pub fn max_text_width(available: u32) -> u32 {
    let pad = (f64::from(available) * SIDE_PADDING) as u32;
    available.saturating_sub(pad * 2)
}

/// Pick the largest font size in `floor..=start` at which `caption` fits in
/// `max_width` pixels.
///
/// When no size fits, the floor is used. A non-scalable face is measured
/// once and kept, since shrinking it changes nothing.
pub fn fit_font_size<M: TextMeasure + ?Sized>(
    measure: &M,
    caption: &str,
    start: u32,
    floor: u32,
    max_width: u32,
) -> FontFit {
    let mut size = start;
    loop {
        let width = measure.text_width(caption, size);
        if width <= max_width || size <= floor || !measure.is_scalable() {
            tracing::debug!(size, width, max_width, "Caption font size chosen");
            return FontFit { size, width };
        }
        size -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every character is `size / 2` pixels wide.
    struct HalfWidth;

    impl TextMeasure for HalfWidth {
        fn text_width(&self, text: &str, size: u32) -> u32 {
            text.chars().count() as u32 * size / 2
        }

        fn line_height(&self, size: u32) -> u32 {
            size
        }
    }

    /// Ignores the requested size, like a bitmap fallback font.
    struct Fixed;

    impl TextMeasure for Fixed {
        fn text_width(&self, text: &str, _size: u32) -> u32 {
            text.chars().count() as u32 * 6
        }

        fn line_height(&self, _size: u32) -> u32 {
            11
        }

        fn is_scalable(&self) -> bool {
            false
        }
    }

    #[test]
    fn fitting_caption_keeps_start_size() {
        let fit = fit_font_size(&HalfWidth, "abcd", 28, 5, 1000);
        assert_eq!(fit, FontFit { size: 28, width: 56 });
    }

    #[test]
    fn shrinks_to_largest_size_that_fits() {
        // 10 chars: width = 5 * size; max 100 -> size 20
        let fit = fit_font_size(&HalfWidth, "0123456789", 100, 6, 100);
        assert_eq!(fit.size, 20);
        assert_eq!(fit.width, 100);
        assert!(HalfWidth.text_width("0123456789", 21) > 100);
    }

    #[test]
    fn stops_at_floor_when_nothing_fits() {
        let caption = "x".repeat(200);
        let fit = fit_font_size(&HalfWidth, &caption, 28, 5, 50);
        assert_eq!(fit.size, 5);
        assert!(fit.width > 50);
    }

    #[test]
    fn size_exactly_at_floor_that_fits_is_used() {
        // 20 chars at size 6 -> 60 px
        let caption = "y".repeat(20);
        let fit = fit_font_size(&HalfWidth, &caption, 100, 6, 60);
        assert_eq!(fit.size, 6);
        assert_eq!(fit.width, 60);
    }

    #[test]
    fn start_below_floor_is_measured_once() {
        let fit = fit_font_size(&HalfWidth, "abcdef", 4, 6, 1);
        assert_eq!(fit.size, 4);
    }

    #[test]
    fn fixed_face_exits_immediately() {
        let fit = fit_font_size(&Fixed, "overflowing caption", 28, 5, 10);
        assert_eq!(fit.size, 28);
        assert_eq!(fit.width, 19 * 6);
    }

    #[test]
    fn max_text_width_removes_five_percent_each_side() {
        assert_eq!(max_text_width(591), 591 - 2 * 29);
        assert_eq!(max_text_width(200), 180);
        assert_eq!(max_text_width(0), 0);
    }
}
