//! Method resolution: user-supplied identifier to simulation function.

use colorblind_sim::{Deficiency, SimulationFn};

use crate::error::InvalidMethodError;

/// The method used when none is configured.
pub const DEFAULT_METHOD: Deficiency = Deficiency::Deuteranopia;

/// Normalizes a method identifier: surrounding whitespace trimmed, lowercased.
pub fn normalize_method(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Resolves an optional method identifier to its registry entry.
///
/// `None` selects [`DEFAULT_METHOD`]. Matching ignores case and surrounding
/// whitespace.
///
/// # Errors
///
/// Returns [`InvalidMethodError`] carrying the normalized identifier when it
/// names no registered method.
///
/// ```rust
/// use colorblind_css::resolve_method;
/// use colorblind_sim::Deficiency;
///
/// assert_eq!(resolve_method(Some(" DEuTerAnopiA ")).unwrap(), Deficiency::Deuteranopia);
/// assert!(resolve_method(Some("bad method name")).is_err());
/// ```
pub fn resolve_method(raw: Option<&str>) -> Result<Deficiency, InvalidMethodError> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_METHOD);
    };
    let method = normalize_method(raw);
    Deficiency::from_name(&method).ok_or(InvalidMethodError { method })
}

/// Resolves an optional method identifier straight to its simulation function.
///
/// # Errors
///
/// See [`resolve_method`].
pub fn resolve_simulation(raw: Option<&str>) -> Result<SimulationFn, InvalidMethodError> {
    resolve_method(raw).map(Deficiency::simulation)
}
