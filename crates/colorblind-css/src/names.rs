//! CSS named color lookup.
//!
//! Backed by the keyword table of `cssparser`. Only opaque colors are part of
//! the table: `transparent` and `currentcolor` are CSS color keywords but have
//! no RGB value to simulate, so they are treated as unknown.

use colorblind_sim::Rgb;
use cssparser::{parse_color_keyword, Color, RGBA};

/// Looks up a CSS color keyword, ASCII case-insensitively.
///
/// ```rust
/// use colorblind_css::names::lookup;
/// use colorblind_sim::Rgb;
///
/// assert_eq!(lookup("AliceBlue"), Some(Rgb(240, 248, 255)));
/// assert_eq!(lookup("solid"), None);
/// ```
pub fn lookup(name: &str) -> Option<Rgb> {
    match parse_color_keyword::<Color>(name).ok()? {
        Color::Rgba(RGBA {
            red: Some(r),
            green: Some(g),
            blue: Some(b),
            alpha: Some(alpha),
        }) if alpha >= 1.0 => Some(Rgb(r, g, b)),
        _ => None,
    }
}

/// Returns true if `name` is a known opaque color keyword.
pub fn is_named_color(name: &str) -> bool {
    lookup(name).is_some()
}
