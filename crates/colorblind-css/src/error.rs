//! Error types for the colorblind filter.

use thiserror::Error;

use crate::document::Location;

/// The configured simulation method does not exist.
///
/// Raised while constructing a filter, before any document is processed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color transform: {method}")]
pub struct InvalidMethodError {
    /// The normalized identifier that failed to resolve.
    pub method: String,
}

/// A failure while rewriting a single declaration.
///
/// Always carries the location of the declaration's value so the failure can
/// be reported against the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// The declaration transform returned an error.
    #[error("{location}: failed to rewrite '{property}': {message}")]
    Failed {
        property: String,
        location: Location,
        message: String,
    },

    /// The declaration transform panicked.
    #[error("{location}: panic while rewriting '{property}': {message}")]
    Panicked {
        property: String,
        location: Location,
        message: String,
    },
}

impl DeclarationError {
    /// Where in the source the failing declaration's value starts.
    pub fn location(&self) -> Location {
        match self {
            DeclarationError::Failed { location, .. }
            | DeclarationError::Panicked { location, .. } => *location,
        }
    }

    /// The property name of the failing declaration.
    pub fn property(&self) -> &str {
        match self {
            DeclarationError::Failed { property, .. }
            | DeclarationError::Panicked { property, .. } => property,
        }
    }
}

/// Errors that stop a document pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    /// A declaration failed and the failure policy is to abort.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),
}

/// Errors raised while loading [`Options`](crate::Options).
#[derive(Debug, Error)]
pub enum OptionsError {
    /// YAML parse error.
    #[error("invalid YAML options: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parse error.
    #[error("invalid JSON options: {0}")]
    Json(#[from] serde_json::Error),
}
