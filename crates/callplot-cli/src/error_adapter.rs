//! Error adapter for converting CallplotError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.
//!
//! # Multi-Error Support
//!
//! When a batch render fails for several targets, each failed target is
//! rendered as its own diagnostic.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;

use callplot::{CallplotError, RenderError, TargetFailure};

/// Adapter for a single failed render target.
pub struct TargetAdapter<'a>(pub &'a TargetFailure);

impl fmt::Debug for TargetAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetAdapter")
            .field("failure", &self.0)
            .finish()
    }
}

impl fmt::Display for TargetAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to render `{}`: {}", self.0.target(), self.0.error())
    }
}

impl std::error::Error for TargetAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0.error())
    }
}

impl MietteDiagnostic for TargetAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0.error() {
            RenderError::Spawn { .. } => "callplot::render::spawn",
            RenderError::Exit { .. } => "callplot::render::exit",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0.error() {
            RenderError::Spawn { tool, .. } => {
                format!("make sure `{tool}` is installed and on PATH")
            }
            RenderError::Exit { .. } => {
                format!("check that `{}.dot` exists and is valid", self.0.target())
            }
        };
        Some(Box::new(help))
    }
}

/// Adapter for [`CallplotError`] variants without per-target detail.
pub struct ErrorAdapter<'a>(pub &'a CallplotError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CallplotError::Io(_) => "callplot::io",
            CallplotError::Config(_) => "callplot::config",
            CallplotError::Render(_) => "callplot::render",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A single failed render target.
    Target(TargetAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Target(t) => fmt::Display::fmt(t, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Target(t) => std::error::Error::source(t),
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Target(t) => t.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Target(t) => t.help(),
            Reportable::Error(e) => e.help(),
        }
    }
}

/// Convert a [`CallplotError`] into a list of reportable errors.
///
/// For [`CallplotError::Render`], this returns one [`Reportable`] for each
/// failed target, followed by the batch summary. For other error variants,
/// this returns a single [`Reportable`].
pub fn to_reportables(err: &CallplotError) -> Vec<Reportable<'_>> {
    match err {
        CallplotError::Render(failure) => failure
            .failures()
            .iter()
            .map(|f| Reportable::Target(TargetAdapter(f)))
            .chain(std::iter::once(Reportable::Error(ErrorAdapter(err))))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

/// One-line list of failed targets for a batch render failure.
pub fn failed_targets_line(err: &CallplotError) -> Option<String> {
    let CallplotError::Render(failure) = err else {
        return None;
    };
    let failed: Vec<_> = failure.failures().iter().map(TargetFailure::target).collect();
    Some(format!("failed targets: {}", failed.join(", ")))
}
