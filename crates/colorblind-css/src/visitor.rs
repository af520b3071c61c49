//! Per-declaration traversal with failure isolation.
//!
//! Every declaration is rewritten independently. A failure, whether an
//! `Err` from the transform or a panic inside it, is turned into a
//! [`DeclarationError`] that carries the declaration's location. The failed
//! declaration keeps its original value and the [`FailurePolicy`] decides
//! whether the pass goes on.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::document::{Declaration, Stylesheet};
use crate::error::DeclarationError;

/// What to do when a declaration fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the failure and keep processing the remaining declarations.
    #[default]
    Continue,
    /// Stop at the first failure.
    Abort,
}

/// Outcome of one pass over a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitReport {
    /// Declarations the transform was called for.
    pub visited: usize,
    /// Declarations whose value changed.
    pub rewritten: usize,
    /// Failures recorded under [`FailurePolicy::Continue`].
    pub failures: Vec<DeclarationError>,
}

impl VisitReport {
    /// Returns true if no declaration failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(
        &mut self,
        decl: &mut Declaration,
        outcome: Result<String, DeclarationError>,
        policy: FailurePolicy,
    ) -> Result<(), DeclarationError> {
        self.visited += 1;
        match outcome {
            Ok(value) => {
                if value != decl.value() {
                    tracing::trace!(
                        property = decl.property(),
                        location = %decl.location(),
                        from = decl.value(),
                        to = value.as_str(),
                        "rewrote declaration"
                    );
                    decl.set_value(value);
                    self.rewritten += 1;
                }
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "declaration failed");
                match policy {
                    FailurePolicy::Continue => {
                        self.failures.push(err);
                        Ok(())
                    }
                    FailurePolicy::Abort => Err(err),
                }
            }
        }
    }
}

/// Calls `f` on every declaration in document order and writes the returned
/// value back in place.
///
/// # Errors
///
/// Under [`FailurePolicy::Abort`], returns the first [`DeclarationError`].
/// Declarations before it have already been rewritten; the ones after it are
/// left untouched.
pub fn visit_declarations<F, E>(
    sheet: &mut Stylesheet,
    policy: FailurePolicy,
    mut f: F,
) -> Result<VisitReport, DeclarationError>
where
    F: FnMut(&Declaration) -> Result<String, E>,
    E: fmt::Display,
{
    let mut report = VisitReport::default();
    for decl in sheet.declarations_mut() {
        let outcome = isolate(decl, &mut f);
        report.record(decl, outcome, policy)?;
    }
    Ok(report)
}

/// Like [`visit_declarations`], but computes the new values on the rayon
/// thread pool. Only the write-back is sequential.
///
/// # Errors
///
/// Same as [`visit_declarations`]. Under [`FailurePolicy::Abort`] every value
/// is still computed, but none after the first failure is written back.
#[cfg(feature = "parallel")]
pub fn visit_declarations_parallel<F, E>(
    sheet: &mut Stylesheet,
    policy: FailurePolicy,
    f: F,
) -> Result<VisitReport, DeclarationError>
where
    F: Fn(&Declaration) -> Result<String, E> + Sync,
    E: fmt::Display,
{
    use rayon::prelude::*;

    let outcomes: Vec<Result<String, DeclarationError>> = sheet
        .declarations()
        .par_iter()
        .map(|decl| isolate(decl, &f))
        .collect();

    let mut report = VisitReport::default();
    for (decl, outcome) in sheet.declarations_mut().iter_mut().zip(outcomes) {
        report.record(decl, outcome, policy)?;
    }
    Ok(report)
}

/// Runs `f` for one declaration, turning errors and panics into a
/// [`DeclarationError`] located at that declaration.
fn isolate<F, E>(decl: &Declaration, f: F) -> Result<String, DeclarationError>
where
    F: FnOnce(&Declaration) -> Result<String, E>,
    E: fmt::Display,
{
    match panic::catch_unwind(AssertUnwindSafe(|| f(decl))) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(DeclarationError::Failed {
            property: decl.property().to_string(),
            location: decl.location(),
            message: e.to_string(),
        }),
        Err(payload) => Err(DeclarationError::Panicked {
            property: decl.property().to_string(),
            location: decl.location(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
