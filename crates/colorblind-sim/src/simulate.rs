//! Confusion-line simulation of dichromatic and anomalous color vision.
//!
//! # Model
//!
//! A dichromat cannot tell apart colors that lie on the same *confusion line*
//! in the CIE xy chromaticity diagram. All confusion lines of one deficiency
//! meet in a single *copunctal point*. The simulation:
//!
//! 1. converts the sRGB color to CIE xyY (D65),
//! 2. draws the line through the color and the copunctal point,
//! 3. intersects it with the dichromat's axis (the colors the dichromat still
//!    perceives faithfully), keeping luminance `Y`,
//! 4. pulls the result toward the neutral grey of the same luminance just
//!    far enough to land inside the RGB gamut,
//! 5. re-encodes with a `1/2.2` gamma.
//!
//! Achromatopsia ignores chromaticity entirely and keeps a luminance-weighted
//! grey. Anomalous trichromacy (`*anomaly`) blends the dichromat result back
//! with the original color.

use crate::rgb::Rgb;

// ─── Color space constants ──────────────────────────────────────────────────

/// sRGB → XYZ (D65), column-major.
const RGB_TO_XYZ: [f64; 9] = [
    0.41242371206635076,
    0.21265606784927693,
    0.019331987577444885,
    0.3575793401363035,
    0.715157818248362,
    0.11919267420354762,
    0.1804662232369621,
    0.0721864539171564,
    0.9504491124870351,
];

/// XYZ → linear sRGB (D65), column-major.
const XYZ_TO_RGB: [f64; 9] = [
    3.240712470389558,
    -0.969259258688888,
    0.05563600315398933,
    -1.5372626602963142,
    1.875996969313966,
    -0.2039948802843549,
    -0.49857440415943116,
    0.041556132211625726,
    1.0570636917433989,
];

/// D65 white point chromaticity.
const WHITE_X: f64 = 0.312713;
const WHITE_Y: f64 = 0.329016;
const WHITE_Z: f64 = 0.358271;

const GAMMA: f64 = 2.2;

/// Weight of the dichromat result when blending an anomalous simulation.
const ANOMALY_WEIGHT: f64 = 1.75;

// ─── Confusion lines ────────────────────────────────────────────────────────

/// Copunctal point and dichromat axis for one cone deficiency.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ConfusionLine {
    /// Copunctal point, x chromaticity.
    cp_x: f64,
    /// Copunctal point, y chromaticity.
    cp_y: f64,
    /// Axis slope.
    axis_slope: f64,
    /// Axis y-intercept.
    axis_intercept: f64,
}

pub(crate) const PROTAN: ConfusionLine = ConfusionLine {
    cp_x: 0.735,
    cp_y: 0.265,
    axis_slope: 1.273463,
    axis_intercept: -0.073894,
};

pub(crate) const DEUTAN: ConfusionLine = ConfusionLine {
    cp_x: 1.14,
    cp_y: -0.14,
    axis_slope: 0.968437,
    axis_intercept: 0.003331,
};

pub(crate) const TRITAN: ConfusionLine = ConfusionLine {
    cp_x: 0.171,
    cp_y: -0.003,
    axis_slope: 0.062921,
    axis_intercept: 0.292119,
};

// ─── Conversions ────────────────────────────────────────────────────────────

/// Convert an sRGB component (0–255) to linear light (0.0–1.0).
fn srgb_to_linear(c: f64) -> f64 {
    let c = c / 255.0;
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

/// Convert a linear light value to a gamma-encoded component (0.0–255.0), clamped.
fn linear_to_gamma(c: f64) -> f64 {
    let encoded = if c <= 0.0 {
        0.0
    } else if c >= 1.0 {
        1.0
    } else {
        c.powf(1.0 / GAMMA)
    };
    255.0 * encoded
}

fn mul(m: &[f64; 9], v: [f64; 3]) -> [f64; 3] {
    [
        v[0] * m[0] + v[1] * m[3] + v[2] * m[6],
        v[0] * m[1] + v[1] * m[4] + v[2] * m[7],
        v[0] * m[2] + v[1] * m[5] + v[2] * m[8],
    ]
}

/// CIE xyY: chromaticity plus luminance.
#[derive(Debug, Clone, Copy)]
struct Xyy {
    x: f64,
    y: f64,
    luminance: f64,
}

fn rgb_to_xyy(rgb: [f64; 3]) -> Xyy {
    let linear = rgb.map(srgb_to_linear);
    let [x, y, z] = mul(&RGB_TO_XYZ, linear);
    let sum = x + y + z;
    if sum == 0.0 {
        return Xyy {
            x: 0.0,
            y: 0.0,
            luminance: y,
        };
    }
    Xyy {
        x: x / sum,
        y: y / sum,
        luminance: y,
    }
}

// ─── Simulation ─────────────────────────────────────────────────────────────

/// Fraction of `delta` needed to push `value` back onto the nearest gamut edge.
///
/// Out-of-range (and undefined) fractions count as zero, so a channel that
/// cannot reach its edge does not influence the shift.
fn gamut_fraction(value: f64, delta: f64) -> f64 {
    let edge = if value < 0.0 { 0.0 } else { 1.0 };
    let fraction = (edge - value) / delta;
    if fraction > 1.0 || fraction < 0.0 {
        0.0
    } else {
        fraction
    }
}

/// Projects `rgb` along its confusion line onto the dichromat axis.
///
/// Returns fractional gamma-encoded channels (0.0–255.0).
pub(crate) fn dichromat(rgb: [f64; 3], line: ConfusionLine) -> [f64; 3] {
    let c = rgb_to_xyy(rgb);

    let slope = (c.y - line.cp_y) / (c.x - line.cp_x);
    let intercept = c.y - c.x * slope;

    let dx = (line.axis_intercept - intercept) / (slope - line.axis_slope);
    let dy = slope * dx + intercept;

    let sim = [
        dx * c.luminance / dy,
        c.luminance,
        (1.0 - (dx + dy)) * c.luminance / dy,
    ];

    // Neutral grey with the same luminance.
    let grey_x = WHITE_X * c.luminance / WHITE_Y;
    let grey_z = WHITE_Z * c.luminance / WHITE_Y;
    let delta = mul(&XYZ_TO_RGB, [grey_x - sim[0], 0.0, grey_z - sim[2]]);

    let linear = mul(&XYZ_TO_RGB, sim);

    let fr = gamut_fraction(linear[0], delta[0]);
    let fg = gamut_fraction(linear[1], delta[1]);
    let fb = gamut_fraction(linear[2], delta[2]);
    let mut adjust = if fr > fg { fr } else { fg };
    if fb > adjust {
        adjust = fb;
    }

    [
        linear_to_gamma(linear[0] + adjust * delta[0]),
        linear_to_gamma(linear[1] + adjust * delta[1]),
        linear_to_gamma(linear[2] + adjust * delta[2]),
    ]
}

/// Luminance-weighted grey on the raw (gamma-encoded) components.
pub(crate) fn monochromat(rgb: [f64; 3]) -> [f64; 3] {
    let grey = rgb[0] * 0.212656 + rgb[1] * 0.715158 + rgb[2] * 0.072186;
    [grey, grey, grey]
}

/// Blends a dichromat simulation back toward the original color.
pub(crate) fn anomalize(sim: [f64; 3], original: [f64; 3]) -> [f64; 3] {
    let n = ANOMALY_WEIGHT + 1.0;
    [
        (ANOMALY_WEIGHT * sim[0] + original[0]) / n,
        (ANOMALY_WEIGHT * sim[1] + original[1]) / n,
        (ANOMALY_WEIGHT * sim[2] + original[2]) / n,
    ]
}

fn finish(channels: [f64; 3]) -> Rgb {
    Rgb::from_f64(channels[0], channels[1], channels[2])
}

/// Red-blind dichromacy (missing L cones).
pub fn protanopia(rgb: Rgb) -> Rgb {
    finish(dichromat(rgb.channels(), PROTAN))
}

/// Red-weak anomalous trichromacy.
pub fn protanomaly(rgb: Rgb) -> Rgb {
    let original = rgb.channels();
    finish(anomalize(dichromat(original, PROTAN), original))
}

/// Green-blind dichromacy (missing M cones).
pub fn deuteranopia(rgb: Rgb) -> Rgb {
    finish(dichromat(rgb.channels(), DEUTAN))
}

/// Green-weak anomalous trichromacy.
pub fn deuteranomaly(rgb: Rgb) -> Rgb {
    let original = rgb.channels();
    finish(anomalize(dichromat(original, DEUTAN), original))
}

/// Blue-blind dichromacy (missing S cones).
pub fn tritanopia(rgb: Rgb) -> Rgb {
    finish(dichromat(rgb.channels(), TRITAN))
}

/// Blue-weak anomalous trichromacy.
pub fn tritanomaly(rgb: Rgb) -> Rgb {
    let original = rgb.channels();
    finish(anomalize(dichromat(original, TRITAN), original))
}

/// Total color blindness.
pub fn achromatopsia(rgb: Rgb) -> Rgb {
    finish(monochromat(rgb.channels()))
}

/// Partial color blindness.
pub fn achromatomaly(rgb: Rgb) -> Rgb {
    let original = rgb.channels();
    finish(anomalize(monochromat(original), original))
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deuteranopia_known_values() {
        assert_eq!(deuteranopia(Rgb(0xff, 0xcc, 0x00)).to_hex(), "#ffc86b");
        assert_eq!(deuteranopia(Rgb(0xff, 0x00, 0x00)).to_hex(), "#a17800");
        assert_eq!(deuteranopia(Rgb(0x00, 0xff, 0x00)).to_hex(), "#ffd598");
        assert_eq!(deuteranopia(Rgb(0x00, 0x00, 0xff)).to_hex(), "#005082");
        assert_eq!(deuteranopia(Rgb(0xf0, 0xf8, 0xff)).to_hex(), "#fff4fb");
    }

    #[test]
    fn test_protanopia_known_values() {
        assert_eq!(protanopia(Rgb(0xff, 0x00, 0x00)).to_hex(), "#8e7e24");
        assert_eq!(protanopia(Rgb(0x00, 0x00, 0xff)).to_hex(), "#004b9a");
        assert_eq!(protanopia(Rgb(0x42, 0xde, 0xad)).to_hex(), "#d1c49f");
    }

    #[test]
    fn test_tritanopia_known_values() {
        assert_eq!(tritanopia(Rgb(0xd9, 0x29, 0xe2)).to_hex(), "#c86067");
        assert_eq!(tritanopia(Rgb(0xb2, 0x82, 0x00)).to_hex(), "#b77881");
        assert_eq!(tritanopia(Rgb(0x00, 0xff, 0x00)).to_hex(), "#74ecff");
        assert_eq!(tritanopia(Rgb(0xff, 0x00, 0x00)).to_hex(), "#fd1700");
    }

    #[test]
    fn test_achromatopsia_is_grey() {
        assert_eq!(achromatopsia(Rgb(0xd9, 0x29, 0xe2)).to_hex(), "#5c5c5c");
        assert_eq!(achromatopsia(Rgb(0xff, 0x00, 0x00)).to_hex(), "#363636");
        assert_eq!(achromatopsia(Rgb(128, 128, 128)), Rgb(128, 128, 128));
    }

    #[test]
    fn test_anomalous_variants() {
        assert_eq!(protanomaly(Rgb(0xff, 0x00, 0x00)).to_hex(), "#b75017");
        assert_eq!(deuteranomaly(Rgb(0x00, 0x00, 0xff)).to_hex(), "#0033b0");
        assert_eq!(tritanomaly(Rgb(0xff, 0xff, 0x00)).to_hex(), "#fff89f");
        assert_eq!(achromatomaly(Rgb(0xff, 0x00, 0x00)).to_hex(), "#7f2323");
    }

    #[test]
    fn test_black_and_white_are_fixed_points() {
        for f in [protanopia, deuteranopia, tritanopia] {
            assert_eq!(f(Rgb(0, 0, 0)), Rgb(0, 0, 0));
            assert_eq!(f(Rgb(255, 255, 255)), Rgb(255, 255, 255));
        }
    }

    #[test]
    fn test_gamut_fraction_ignores_out_of_range() {
        assert_eq!(gamut_fraction(0.5, 0.0), 0.0);
        assert_eq!(gamut_fraction(1.5, 1.0), 0.0);
        assert_eq!(gamut_fraction(0.5, 1.0), 0.5);
        assert_eq!(gamut_fraction(-0.25, 0.5), 0.5);
    }

    #[test]
    fn test_monochromat_weights_sum_to_one() {
        let [r, g, b] = monochromat([255.0, 255.0, 255.0]);
        assert!((r - 255.0).abs() < 1e-9);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }
}
