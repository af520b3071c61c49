//! The colorblind filter: one resolved simulation applied to whole documents.

use std::convert::Infallible;

use colorblind_sim::{Deficiency, SimulationFn};

use crate::document::{Declaration, Skipped, Stylesheet};
use crate::error::{InvalidMethodError, ProcessError};
use crate::method::{resolve_method, DEFAULT_METHOD};
use crate::options::Options;
use crate::rewrite;
use crate::visitor::{FailurePolicy, VisitReport};

/// A configured colorblind filter.
///
/// The simulation method is resolved once, at construction. An unknown
/// method fails there, before any document is touched.
///
/// ```rust
/// use colorblind_css::ColorBlind;
///
/// let filter = ColorBlind::with_method("achromatopsia").unwrap();
/// let out = filter.process("a { border: 3px #D929E2 solid; font-size: 12px }").unwrap();
/// assert_eq!(out.css, "a { border: 3px #5c5c5c solid; font-size: 12px }");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ColorBlind {
    deficiency: Option<Deficiency>,
    simulate: SimulationFn,
    policy: FailurePolicy,
}

/// The result of [`ColorBlind::process`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    /// The rewritten stylesheet.
    pub css: String,
    /// Counts and recorded failures of the pass.
    pub report: VisitReport,
    /// Malformed constructs the parser skipped; they are kept verbatim in `css`.
    pub skipped: Vec<Skipped>,
}

impl ColorBlind {
    /// Builds a filter from options.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMethodError`] if `options.method` names no method.
    pub fn new(options: Options) -> Result<Self, InvalidMethodError> {
        let deficiency = resolve_method(options.method.as_deref())?;
        tracing::debug!(
            method = %deficiency,
            on_error = ?options.on_error,
            "resolved simulation method"
        );
        Ok(Self {
            deficiency: Some(deficiency),
            simulate: deficiency.simulation(),
            policy: options.on_error,
        })
    }

    /// Builds a filter for a method identifier with the default policy.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMethodError`] if `method` names no method.
    pub fn with_method(method: &str) -> Result<Self, InvalidMethodError> {
        Self::new(Options::with_method(method))
    }

    /// Builds a filter around a caller-supplied simulation function.
    pub fn with_simulation(simulate: SimulationFn) -> Self {
        Self {
            deficiency: None,
            simulate,
            policy: FailurePolicy::default(),
        }
    }

    /// Replaces the failure policy.
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The selected method, or `None` for a custom simulation function.
    pub fn deficiency(&self) -> Option<Deficiency> {
        self.deficiency
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Rewrites one declaration value.
    pub fn rewrite_value(&self, value: &str) -> String {
        rewrite::rewrite_value(value, self.simulate)
    }

    /// Rewrites every declaration of `sheet` in place.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessError::Declaration`] when a declaration fails and the
    /// policy is [`FailurePolicy::Abort`].
    pub fn process_stylesheet(&self, sheet: &mut Stylesheet) -> Result<VisitReport, ProcessError> {
        let rewrite =
            |decl: &Declaration| Ok::<_, Infallible>(self.rewrite_value(decl.value()));

        #[cfg(feature = "parallel")]
        let report = crate::visitor::visit_declarations_parallel(sheet, self.policy, rewrite)?;
        #[cfg(not(feature = "parallel"))]
        let report = crate::visitor::visit_declarations(sheet, self.policy, rewrite)?;

        tracing::debug!(
            declarations = report.visited,
            rewritten = report.rewritten,
            failures = report.failures.len(),
            "processed stylesheet"
        );
        Ok(report)
    }

    /// Parses, rewrites and serializes a stylesheet.
    ///
    /// # Errors
    ///
    /// See [`ColorBlind::process_stylesheet`].
    pub fn process(&self, css: &str) -> Result<Processed, ProcessError> {
        let mut sheet = Stylesheet::parse(css);
        let report = self.process_stylesheet(&mut sheet)?;
        Ok(Processed {
            css: sheet.to_css(),
            report,
            skipped: sheet.skipped().to_vec(),
        })
    }
}

impl Default for ColorBlind {
    fn default() -> Self {
        Self {
            deficiency: Some(DEFAULT_METHOD),
            simulate: DEFAULT_METHOD.simulation(),
            policy: FailurePolicy::default(),
        }
    }
}
