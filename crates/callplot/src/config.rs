//! Configuration types for the callplot pipeline.
//!
//! All types implement [`serde::Deserialize`] and fall back to defaults for
//! every missing field, so an empty TOML document is a valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`GraphStyle`] - Graph attributes written into generated DOT files.
//! - [`SplitConfig`] - Controls how far the root splitter walks.
//! - [`RenderConfig`] - Rendering tool, output format and target list.
//!
//! # Example
//!
//! ```
//! # use callplot::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.render().tool(), "dot");
//! assert_eq!(config.split().max_depth(), 3);
//! ```

use serde::Deserialize;

/// Functions rendered when no target list is configured.
pub const DEFAULT_TARGETS: [&str; 20] = [
    "main",
    "PostmasterMain",
    "PostgresMain",
    "PostgresSingleUserMain",
    "AuxiliaryProcessMain",
    "BootstrapModeMain",
    "StartupProcessMain",
    "BackgroundWriterMain",
    "CheckpointerMain",
    "WalWriterMain",
    "WalReceiverMain",
    "WalSummarizerMain",
    "PgArchiverMain",
    "SysLoggerMain",
    "AutoVacLauncherMain",
    "AutoVacWorkerMain",
    "BackgroundWorkerMain",
    "ApplyWorkerMain",
    "TableSyncWorkerMain",
    "ParallelWorkerMain",
];

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    graph: GraphStyle,

    #[serde(default)]
    split: SplitConfig,

    #[serde(default)]
    render: RenderConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(graph: GraphStyle, split: SplitConfig, render: RenderConfig) -> Self {
        Self {
            graph,
            split,
            render,
        }
    }

    /// Returns the graph style section.
    pub fn graph(&self) -> &GraphStyle {
        &self.graph
    }

    /// Returns the split section.
    pub fn split(&self) -> &SplitConfig {
        &self.split
    }

    /// Returns the render section.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns a mutable reference to the split section.
    pub fn split_mut(&mut self) -> &mut SplitConfig {
        &mut self.split
    }

    /// Returns a mutable reference to the render section.
    pub fn render_mut(&mut self) -> &mut RenderConfig {
        &mut self.render
    }
}

/// Graph attributes emitted into every generated DOT file.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphStyle {
    /// Graphviz `rankdir` attribute.
    #[serde(default = "default_rankdir")]
    rankdir: String,

    /// Graphviz node `shape` attribute.
    #[serde(default = "default_node_shape")]
    node_shape: String,
}

impl GraphStyle {
    /// Creates a new [`GraphStyle`].
    pub fn new(rankdir: impl Into<String>, node_shape: impl Into<String>) -> Self {
        Self {
            rankdir: rankdir.into(),
            node_shape: node_shape.into(),
        }
    }

    pub fn rankdir(&self) -> &str {
        &self.rankdir
    }

    pub fn node_shape(&self) -> &str {
        &self.node_shape
    }
}

impl Default for GraphStyle {
    fn default() -> Self {
        Self::new(default_rankdir(), default_node_shape())
    }
}

fn default_rankdir() -> String {
    "TB".to_string()
}

fn default_node_shape() -> String {
    "box".to_string()
}

/// Root splitter settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SplitConfig {
    /// Maximum number of call hops followed from each root.
    #[serde(default = "default_max_depth")]
    max_depth: usize,
}

impl SplitConfig {
    /// Creates a new [`SplitConfig`].
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Returns the maximum number of hops followed from a root.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Overrides the maximum number of hops.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self::new(default_max_depth())
    }
}

fn default_max_depth() -> usize {
    3
}

/// Batch renderer settings.
///
/// The target list defaults to [`DEFAULT_TARGETS`]. An explicit empty list in
/// a configuration file is honored and renders nothing.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Rendering tool executable, looked up on `PATH`.
    #[serde(default = "default_tool")]
    tool: String,

    /// Output format passed as `-T<format>`; also the output file extension.
    #[serde(default = "default_format")]
    format: String,

    /// Extra arguments placed before the format flag.
    #[serde(default)]
    args: Vec<String>,

    /// Identifiers to render, in order.
    #[serde(default = "default_targets")]
    targets: Vec<String>,
}

impl RenderConfig {
    /// Creates a new [`RenderConfig`] with no extra tool arguments.
    pub fn new(tool: impl Into<String>, format: impl Into<String>, targets: Vec<String>) -> Self {
        Self {
            tool: tool.into(),
            format: format.into(),
            args: Vec::new(),
            targets,
        }
    }

    /// Adds extra arguments passed to the tool before the format flag.
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn set_tool(&mut self, tool: impl Into<String>) {
        self.tool = tool.into();
    }

    pub fn set_format(&mut self, format: impl Into<String>) {
        self.format = format.into();
    }

    pub fn set_targets(&mut self, targets: Vec<String>) {
        self.targets = targets;
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(default_tool(), default_format(), default_targets())
    }
}

fn default_tool() -> String {
    "dot".to_string()
}

fn default_format() -> String {
    "svg".to_string()
}

fn default_targets() -> Vec<String> {
    DEFAULT_TARGETS.iter().map(|name| name.to_string()).collect()
}
