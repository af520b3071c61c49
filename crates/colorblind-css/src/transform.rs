//! Color token substitution.

use std::borrow::Cow;

use colorblind_sim::SimulationFn;

use crate::token::{classify, ColorToken};

/// Produces the replacement text for an already classified token.
///
/// Colors are run through `simulate` and re-encoded as `#rrggbb`; opaque
/// tokens are returned unchanged.
pub fn transform<'a>(token: ColorToken<'a>, simulate: SimulationFn) -> Cow<'a, str> {
    match token {
        ColorToken::Hex(rgb) | ColorToken::Named(rgb) => Cow::Owned(simulate(rgb).to_hex()),
        ColorToken::Opaque(text) => Cow::Borrowed(text),
    }
}

/// Classifies and transforms one raw token.
///
/// ```rust
/// use colorblind_css::transform_token;
/// use colorblind_sim::Deficiency;
///
/// let simulate = Deficiency::Achromatopsia.simulation();
/// assert_eq!(transform_token("#D929E2", simulate), "#5c5c5c");
/// assert_eq!(transform_token("solid", simulate), "solid");
/// ```
pub fn transform_token(token: &str, simulate: SimulationFn) -> Cow<'_, str> {
    transform(classify(token), simulate)
}
