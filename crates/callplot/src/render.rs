//! Batch rendering of DOT files through an external tool.
//!
//! The [`BatchRenderer`] walks an ordered list of targets. For each target
//! `X` it writes the progress line `current: X` and then asks a [`Renderer`]
//! to turn `X.dot` into `X.<format>`. Targets are processed strictly one at
//! a time. A failed target never stops the batch; failures are collected in
//! the returned [`RenderReport`].
//!
//! [`GraphvizRenderer`] is the production renderer. It runs the configured
//! tool (Graphviz `dot` by default) as a child process that inherits the
//! parent's standard streams:
//!
//! ```text
//! dot [args...] -Tsvg X.dot -o X.svg
//! ```

use std::{
    io::{self, Write},
    path::{Path, PathBuf},
    process::Command,
};

use log::{debug, info, warn};

use crate::{
    config::RenderConfig,
    error::{BatchFailure, CallplotError, RenderError, TargetFailure},
};

/// Renders a single target.
pub trait Renderer {
    /// Render `target`, blocking until the output is produced or the
    /// attempt fails.
    fn render(&self, target: &str) -> Result<(), RenderError>;
}

/// Renderer that shells out to a Graphviz-compatible tool.
#[derive(Debug, Clone)]
pub struct GraphvizRenderer {
    tool: String,
    format: String,
    args: Vec<String>,
    work_dir: PathBuf,
}

impl GraphvizRenderer {
    /// Create a renderer from configuration, working in the current
    /// directory.
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            tool: config.tool().to_string(),
            format: config.format().to_string(),
            args: config.args().to_vec(),
            work_dir: PathBuf::from("."),
        }
    }

    /// Run the tool in `dir` instead of the current directory.
    ///
    /// Input and output names stay relative to this directory.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Input file name for `target`, `<target>.dot`.
    pub fn input_name(target: &str) -> String {
        format!("{target}.dot")
    }

    /// Output file name for `target`, `<target>.<format>`.
    pub fn output_name(&self, target: &str) -> String {
        format!("{target}.{}", self.format)
    }

    fn command(&self, target: &str) -> Command {
        let mut command = Command::new(&self.tool);
        command
            .args(&self.args)
            .arg(format!("-T{}", self.format))
            .arg(Self::input_name(target))
            .arg("-o")
            .arg(self.output_name(target))
            .current_dir(&self.work_dir);
        command
    }
}

impl Renderer for GraphvizRenderer {
    fn render(&self, target: &str) -> Result<(), RenderError> {
        let mut command = self.command(target);
        debug!(command:? = command; "Spawning renderer");

        let status = command.status().map_err(|source| RenderError::Spawn {
            tool: self.tool.clone(),
            source,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(RenderError::Exit {
                tool: self.tool.clone(),
                code: status.code(),
            })
        }
    }
}

/// Result of rendering one target.
#[derive(Debug)]
pub struct TargetOutcome {
    target: String,
    result: Result<(), RenderError>,
}

impl TargetOutcome {
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn result(&self) -> &Result<(), RenderError> {
        &self.result
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of a batch run, one per target in list order.
#[derive(Debug, Default)]
pub struct RenderReport {
    outcomes: Vec<TargetOutcome>,
}

impl RenderReport {
    pub fn outcomes(&self) -> &[TargetOutcome] {
        &self.outcomes
    }

    /// Number of targets that rendered successfully.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of targets that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(TargetOutcome::is_success)
    }

    /// Convert the report into an aggregate result.
    ///
    /// Returns the number of rendered targets, or [`CallplotError::Render`]
    /// listing every failed target.
    pub fn into_result(self) -> Result<usize, CallplotError> {
        let attempted = self.outcomes.len();
        let failures: Vec<TargetFailure> = self
            .outcomes
            .into_iter()
            .filter_map(|outcome| match outcome.result {
                Ok(()) => None,
                Err(err) => Some(TargetFailure::new(outcome.target, err)),
            })
            .collect();

        if failures.is_empty() {
            Ok(attempted)
        } else {
            Err(CallplotError::Render(BatchFailure::new(attempted, failures)))
        }
    }
}

/// Drives a [`Renderer`] over an ordered list of targets.
#[derive(Debug)]
pub struct BatchRenderer<R> {
    renderer: R,
    targets: Vec<String>,
}

impl<R: Renderer> BatchRenderer<R> {
    pub fn new(renderer: R, targets: Vec<String>) -> Self {
        Self { renderer, targets }
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Render every target once, in order.
    ///
    /// The progress line for a target is written and flushed before its
    /// render starts, so it appears ahead of anything the tool prints.
    ///
    /// # Errors
    ///
    /// Only a failure to write progress aborts the run. Render failures are
    /// recorded in the report.
    pub fn run<W: Write>(&self, progress: &mut W) -> io::Result<RenderReport> {
        info!(targets = self.targets.len(); "Starting batch render");

        let mut report = RenderReport::default();
        for target in &self.targets {
            writeln!(progress, "current: {target}")?;
            progress.flush()?;

            let result = self.renderer.render(target);
            if let Err(err) = &result {
                warn!(name = target.as_str(), error:% = err; "Render failed");
            }

            report.outcomes.push(TargetOutcome {
                target: target.clone(),
                result,
            });
        }

        info!(
            succeeded = report.succeeded(),
            failed = report.failed();
            "Batch render finished"
        );
        Ok(report)
    }
}
