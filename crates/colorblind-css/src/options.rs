//! Filter options, loadable from YAML or JSON.

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;
use crate::visitor::FailurePolicy;

/// Configuration for a [`ColorBlind`](crate::ColorBlind) filter.
///
/// ```rust
/// use colorblind_css::{FailurePolicy, Options};
///
/// let options = Options::from_yaml("method: Protanopia\non_error: abort\n").unwrap();
/// assert_eq!(options.method.as_deref(), Some("Protanopia"));
/// assert_eq!(options.on_error, FailurePolicy::Abort);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Simulation method identifier. Case and surrounding whitespace are
    /// ignored; `None` selects deuteranopia.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// What to do when a declaration fails to rewrite.
    pub on_error: FailurePolicy,
}

impl Options {
    /// Options selecting the given method with the default failure policy.
    pub fn with_method(method: impl Into<String>) -> Self {
        Self {
            method: Some(method.into()),
            ..Self::default()
        }
    }

    /// Parses options from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, OptionsError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parses options from JSON text.
    pub fn from_json(text: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(text)?)
    }
}
