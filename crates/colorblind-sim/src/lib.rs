//! # colorblind-sim - Color-Vision Deficiency Simulation
//!
//! Maps an sRGB color to the color it approximately appears as under a given
//! form of color-vision deficiency.
//!
//! The registry is closed: every method is a [`Deficiency`] variant and each
//! variant owns exactly one pure [`SimulationFn`].
//!
//! | Method | Kind |
//! |--------|------|
//! | `protanopia`, `deuteranopia`, `tritanopia` | dichromacy (one cone type missing) |
//! | `protanomaly`, `deuteranomaly`, `tritanomaly` | anomalous trichromacy (one cone type weak) |
//! | `achromatopsia` | monochromacy |
//! | `achromatomaly` | partial monochromacy |
//!
//! ## Example
//!
//! ```rust
//! use colorblind_sim::{Deficiency, Rgb};
//!
//! let simulate = Deficiency::Achromatopsia.simulation();
//! let grey = simulate(Rgb(0xd9, 0x29, 0xe2));
//! assert_eq!(grey.to_hex(), "#5c5c5c");
//! ```

mod deficiency;
mod rgb;
mod simulate;

pub use deficiency::{Deficiency, SimulationFn};
pub use rgb::Rgb;
pub use simulate::{
    achromatomaly, achromatopsia, deuteranomaly, deuteranopia, protanomaly, protanopia,
    tritanomaly, tritanopia,
};
