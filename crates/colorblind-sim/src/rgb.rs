//! The RGB triple every simulation consumes and produces.

use std::fmt;

/// A simple 8-bit sRGB color triplet.
///
/// This is the crate's own RGB type, decoupled from any CSS or terminal crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Builds a color from fractional channel values in the `0.0..=255.0` range.
    ///
    /// Values are rounded half away from zero and clamped. Non-finite values
    /// collapse to `0`.
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Rgb(channel(r), channel(g), channel(b))
    }

    /// Encodes the color as lowercase `#rrggbb`.
    ///
    /// ```rust
    /// use colorblind_sim::Rgb;
    ///
    /// assert_eq!(Rgb(255, 204, 0).to_hex(), "#ffcc00");
    /// ```
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }

    pub(crate) fn channels(self) -> [f64; 3] {
        [self.0 as f64, self.1 as f64, self.2 as f64]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn channel(v: f64) -> u8 {
    if !v.is_finite() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}
