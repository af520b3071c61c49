//! The closed registry of simulation methods.

use std::fmt;

use crate::rgb::Rgb;
use crate::simulate;

/// A pure color mapping selected once and reused for every color.
pub type SimulationFn = fn(Rgb) -> Rgb;

/// A form of color-vision deficiency that can be simulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Deficiency {
    Protanopia,
    Protanomaly,
    #[default]
    Deuteranopia,
    Deuteranomaly,
    Tritanopia,
    Tritanomaly,
    Achromatopsia,
    Achromatomaly,
}

impl Deficiency {
    /// Every registered method, in a stable order.
    pub const ALL: [Deficiency; 8] = [
        Deficiency::Protanopia,
        Deficiency::Protanomaly,
        Deficiency::Deuteranopia,
        Deficiency::Deuteranomaly,
        Deficiency::Tritanopia,
        Deficiency::Tritanomaly,
        Deficiency::Achromatopsia,
        Deficiency::Achromatomaly,
    ];

    /// The lowercase method identifier.
    pub fn name(self) -> &'static str {
        match self {
            Deficiency::Protanopia => "protanopia",
            Deficiency::Protanomaly => "protanomaly",
            Deficiency::Deuteranopia => "deuteranopia",
            Deficiency::Deuteranomaly => "deuteranomaly",
            Deficiency::Tritanopia => "tritanopia",
            Deficiency::Tritanomaly => "tritanomaly",
            Deficiency::Achromatopsia => "achromatopsia",
            Deficiency::Achromatomaly => "achromatomaly",
        }
    }

    /// Looks up a method by its exact identifier.
    ///
    /// Matching is exact: callers are expected to normalize case and
    /// whitespace first.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name)
    }

    /// The simulation function registered for this method.
    pub fn simulation(self) -> SimulationFn {
        match self {
            Deficiency::Protanopia => simulate::protanopia,
            Deficiency::Protanomaly => simulate::protanomaly,
            Deficiency::Deuteranopia => simulate::deuteranopia,
            Deficiency::Deuteranomaly => simulate::deuteranomaly,
            Deficiency::Tritanopia => simulate::tritanopia,
            Deficiency::Tritanomaly => simulate::tritanomaly,
            Deficiency::Achromatopsia => simulate::achromatopsia,
            Deficiency::Achromatomaly => simulate::achromatomaly,
        }
    }

    /// Applies this method's simulation to one color.
    pub fn simulate(self, rgb: Rgb) -> Rgb {
        (self.simulation())(rgb)
    }
}

impl fmt::Display for Deficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
