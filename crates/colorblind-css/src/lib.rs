//! # colorblind-css - Colorblind Simulation for Stylesheets
//!
//! Rewrites every color literal in a CSS document to the color it would
//! appear as under a chosen color-vision deficiency. Hex colors (`#rgb`,
//! `#rrggbb`) and CSS named colors are replaced with a simulated `#rrggbb`;
//! every other token (`3px`, `solid`, `rgb(...)`) passes through unchanged.
//!
//! ## Pipeline
//!
//! 1. [`ColorBlind::new`] resolves the method identifier once.
//! 2. [`Stylesheet::parse`] collects declarations with their source spans.
//! 3. [`visit_declarations`] calls the [`rewrite_value`] pipeline for every
//!    declaration, isolating failures per declaration.
//! 4. [`Stylesheet::to_css`] splices the new values back into the source.
//!
//! ## Example
//!
//! ```rust
//! use colorblind_css::{ColorBlind, Options};
//!
//! let filter = ColorBlind::new(Options::with_method("deuteranopia")).unwrap();
//! let out = filter.process(".alert { color: red; margin: 0 }").unwrap();
//! assert_eq!(out.css, ".alert { color: #a17800; margin: 0 }");
//! ```
//!
//! ## Features
//!
//! - `parallel`: compute declaration values on the rayon thread pool.

mod document;
mod error;
mod filter;
mod method;
pub mod names;
mod options;
mod rewrite;
mod token;
mod transform;
mod visitor;

pub use colorblind_sim::{Deficiency, Rgb, SimulationFn};

pub use document::{Declaration, Location, Skipped, Stylesheet};
pub use error::{DeclarationError, InvalidMethodError, OptionsError, ProcessError};
pub use filter::{ColorBlind, Processed};
pub use method::{normalize_method, resolve_method, resolve_simulation, DEFAULT_METHOD};
pub use options::Options;
pub use rewrite::rewrite_value;
pub use token::{classify, ColorToken};
pub use transform::{transform, transform_token};
#[cfg(feature = "parallel")]
pub use visitor::visit_declarations_parallel;
pub use visitor::{visit_declarations, FailurePolicy, VisitReport};
