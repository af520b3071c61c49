//! Token classification.
//!
//! A token is one whitespace-delimited run of a declaration value. Each token
//! is a hex color, a named color, or opaque text. Classification never fails:
//! anything that is not recognizably a color is opaque and passes through
//! untouched.

use colorblind_sim::Rgb;

use crate::names;

/// The classification of a single value token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken<'a> {
    /// `#rgb` or `#rrggbb`, any letter case.
    Hex(Rgb),
    /// A CSS color keyword, already resolved through the named color table.
    Named(Rgb),
    /// Anything else. Carries the original text verbatim.
    Opaque(&'a str),
}

impl<'a> ColorToken<'a> {
    /// The resolved color, if this token is one.
    pub fn rgb(&self) -> Option<Rgb> {
        match self {
            ColorToken::Hex(rgb) | ColorToken::Named(rgb) => Some(*rgb),
            ColorToken::Opaque(_) => None,
        }
    }

    /// Returns true for hex and named colors.
    pub fn is_color(&self) -> bool {
        self.rgb().is_some()
    }
}

/// Classifies one token.
///
/// Hex colors are checked first, then the named color table. Matching is
/// case-insensitive; the token text itself is never modified.
///
/// ```rust
/// use colorblind_css::{classify, ColorToken};
/// use colorblind_sim::Rgb;
///
/// assert_eq!(classify("#FC0"), ColorToken::Hex(Rgb(255, 204, 0)));
/// assert_eq!(classify("Red"), ColorToken::Named(Rgb(255, 0, 0)));
/// assert_eq!(classify("3px"), ColorToken::Opaque("3px"));
/// ```
pub fn classify(token: &str) -> ColorToken<'_> {
    if let Some(rgb) = parse_hex(token) {
        return ColorToken::Hex(rgb);
    }
    if let Some(rgb) = names::lookup(token) {
        return ColorToken::Named(rgb);
    }
    ColorToken::Opaque(token)
}

/// Parses `#` followed by exactly 3 or 6 hex digits.
fn parse_hex(token: &str) -> Option<Rgb> {
    let digits = token.strip_prefix('#')?.as_bytes();
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    match digits.len() {
        // #rgb -> #rrggbb
        3 => Some(Rgb(
            nibble(digits[0]) * 17,
            nibble(digits[1]) * 17,
            nibble(digits[2]) * 17,
        )),
        6 => Some(Rgb(
            (nibble(digits[0]) << 4) | nibble(digits[1]),
            (nibble(digits[2]) << 4) | nibble(digits[3]),
            (nibble(digits[4]) << 4) | nibble(digits[5]),
        )),
        _ => None,
    }
}

/// Value of one ASCII hex digit. Callers validate the digit first.
fn nibble(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Hex colors
    // =========================================================================

    #[test]
    fn test_hex_6_digit() {
        assert_eq!(classify("#ffcc00"), ColorToken::Hex(Rgb(255, 204, 0)));
        assert_eq!(classify("#D929E2"), ColorToken::Hex(Rgb(217, 41, 226)));
        assert_eq!(classify("#000000"), ColorToken::Hex(Rgb(0, 0, 0)));
    }

    #[test]
    fn test_hex_3_digit() {
        assert_eq!(classify("#fff"), ColorToken::Hex(Rgb(255, 255, 255)));
        assert_eq!(classify("#f80"), ColorToken::Hex(Rgb(255, 136, 0)));
    }

    #[test]
    fn test_hex_case_insensitive() {
        assert_eq!(classify("#FFCC00"), classify("#ffcc00"));
        assert_eq!(classify("#FfCc00"), classify("#ffcc00"));
        assert_eq!(classify("#ABC"), classify("#abc"));
    }

    #[test]
    fn test_hex_other_lengths_are_opaque() {
        for token in ["#", "#f", "#ff", "#ffff", "#fffff", "#ffcc00aa", "#fffffff"] {
            assert_eq!(classify(token), ColorToken::Opaque(token), "{}", token);
        }
    }

    #[test]
    fn test_hex_invalid_digits_are_opaque() {
        assert_eq!(classify("#gggggg"), ColorToken::Opaque("#gggggg"));
        assert_eq!(classify("#12345z"), ColorToken::Opaque("#12345z"));
    }

    #[test]
    fn test_hex_with_trailing_text_is_opaque() {
        assert_eq!(classify("#fff,"), ColorToken::Opaque("#fff,"));
        assert_eq!(classify("#ffcc00;"), ColorToken::Opaque("#ffcc00;"));
    }

    #[test]
    fn test_hex_without_hash_is_opaque() {
        assert_eq!(classify("ffcc00"), ColorToken::Opaque("ffcc00"));
    }

    // =========================================================================
    // Named colors
    // =========================================================================

    #[test]
    fn test_named() {
        assert_eq!(classify("red"), ColorToken::Named(Rgb(255, 0, 0)));
        assert_eq!(classify("lime"), ColorToken::Named(Rgb(0, 255, 0)));
    }

    #[test]
    fn test_named_case_insensitive() {
        assert_eq!(
            classify("ALICebLuE"),
            ColorToken::Named(Rgb(240, 248, 255))
        );
    }

    // =========================================================================
    // Opaque tokens
    // =========================================================================

    #[test]
    fn test_opaque_tokens_keep_text() {
        for token in ["solid", "dashed", "3px", "12px", "SOLID", "rgb(1,2,3)", "!important"] {
            assert_eq!(classify(token), ColorToken::Opaque(token));
        }
    }

    #[test]
    fn test_rgb_accessor() {
        assert_eq!(classify("#fff").rgb(), Some(Rgb(255, 255, 255)));
        assert!(classify("blue").is_color());
        assert!(!classify("bold").is_color());
    }

    #[test]
    fn test_nibble() {
        assert_eq!(nibble(b'0'), 0);
        assert_eq!(nibble(b'9'), 9);
        assert_eq!(nibble(b'a'), 10);
        assert_eq!(nibble(b'F'), 15);
    }
}
