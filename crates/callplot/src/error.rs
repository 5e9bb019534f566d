//! Error types for callplot operations.
//!
//! This module provides the main error type [`CallplotError`] together with
//! the per-target [`RenderError`] recorded by the batch renderer.

use std::{fmt, io};

use thiserror::Error;

/// The main error type for callplot operations.
#[derive(Debug, Error)]
pub enum CallplotError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Render(BatchFailure),
}

/// Failure to render a single target.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The rendering tool could not be launched at all.
    #[error("failed to launch `{tool}`: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The rendering tool ran but did not exit successfully.
    #[error("`{tool}` {}", describe_exit(.code))]
    Exit { tool: String, code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {code}"),
        None => "was terminated by a signal".to_string(),
    }
}

/// A single failed target inside a [`BatchFailure`].
#[derive(Debug)]
pub struct TargetFailure {
    target: String,
    error: RenderError,
}

impl TargetFailure {
    pub(crate) fn new(target: impl Into<String>, error: RenderError) -> Self {
        Self {
            target: target.into(),
            error,
        }
    }

    /// Returns the identifier whose render failed.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Returns the underlying render error.
    pub fn error(&self) -> &RenderError {
        &self.error
    }
}

impl fmt::Display for TargetFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.target, self.error)
    }
}

/// Aggregate failure of a batch render.
///
/// Produced only after every target has been attempted.
#[derive(Debug)]
pub struct BatchFailure {
    attempted: usize,
    failures: Vec<TargetFailure>,
}

impl BatchFailure {
    pub(crate) fn new(attempted: usize, failures: Vec<TargetFailure>) -> Self {
        Self {
            attempted,
            failures,
        }
    }

    /// Number of targets the batch attempted.
    pub fn attempted(&self) -> usize {
        self.attempted
    }

    /// The failed targets, in list order.
    pub fn failures(&self) -> &[TargetFailure] {
        &self.failures
    }
}

impl fmt::Display for BatchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} targets failed to render",
            self.failures.len(),
            self.attempted
        )
    }
}
