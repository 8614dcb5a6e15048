//! Column width unit conversions.
//!
//! Worksheets persist column widths in 1/256ths of a character. These helpers are linear fits of
//! measured rendering tables, so conversions are approximate and round trips carry a few units of
//! slack.

/// Margin added on top of the content width when columns are auto-sized.
pub const AUTO_SIZE_PADDING_PIXELS: i32 = 8;

/// Converts a pixel width to the 256ths width unit.
///
/// Negative input is not rejected and yields a negative width.
#[must_use]
pub fn pixel_to_character_width(pixels: i32) -> i32 {
    (f64::from(pixels) * 42.67).floor() as i32
}

/// Converts a width in characters to the 256ths width unit.
///
/// Widths below one character follow a steeper fit than widths of one character and more, so the
/// result drops by a couple of units right at `1.0`. Negative input is not rejected.
#[must_use]
pub fn character_width_to_256_width(width: f64) -> i32 {
    if width < 1.0 {
        (469.8 * width + 2.391).floor() as i32
    } else {
        (256.0 * width + 214.0).floor() as i32
    }
}

/// Width of `text` in character units: ASCII counts 1, everything else 2.
#[must_use]
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| if c.is_ascii() { 1 } else { 2 }).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_examples() {
        assert_eq!(pixel_to_character_width(0), 0);
        assert_eq!(pixel_to_character_width(1), 42);
        assert_eq!(pixel_to_character_width(AUTO_SIZE_PADDING_PIXELS), 341);
        assert_eq!(pixel_to_character_width(75), 3200);
    }

    #[test]
    fn pixel_accepts_negative_input() {
        assert_eq!(pixel_to_character_width(-1), -43);
    }

    #[test]
    fn pixel_is_monotonic() {
        let widths: Vec<i32> = (0..=1000).map(pixel_to_character_width).collect();
        assert!(widths.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn character_width_branches() {
        assert_eq!(character_width_to_256_width(0.0), 2);
        assert_eq!(character_width_to_256_width(0.5), 237);
        assert_eq!(character_width_to_256_width(1.0), 470);
        assert_eq!(character_width_to_256_width(2.0), 726);
        assert_eq!(character_width_to_256_width(10.0), 2774);
    }

    #[test]
    fn character_width_accepts_negative_input() {
        assert_eq!(character_width_to_256_width(-1.0), -468);
        assert_eq!(character_width_to_256_width(-0.5), -233);
    }

    #[test]
    fn character_width_is_monotonic_within_each_branch() {
        let below: Vec<i32> = (0..1000)
            .map(|i| character_width_to_256_width(f64::from(i) / 1000.0))
            .collect();
        assert!(below.windows(2).all(|w| w[0] <= w[1]));

        let above: Vec<i32> = (100..10_000)
            .map(|i| character_width_to_256_width(f64::from(i) / 100.0))
            .collect();
        assert!(above.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn character_width_seam_stays_within_tolerance() {
        let just_below = character_width_to_256_width(0.999_999);
        let at_one = character_width_to_256_width(1.0);
        assert!((just_below - at_one).abs() <= 5);
    }

    #[test]
    fn character_width_on_hundredths_is_monotonic() {
        let widths: Vec<i32> = (0..=7500)
            .map(|i| character_width_to_256_width(f64::from(i) / 100.0))
            .collect();
        assert!(widths.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn display_width_counts_wide_characters_twice() {
        assert_eq!(display_width(""), 0);
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width("한글"), 4);
        assert_eq!(display_width("a한"), 3);
    }
}
