//! callplot - call-graph diagrams from `cflow` output.
//!
//! The crate covers every stage between a `cflow` call tree and rendered
//! diagrams:
//!
//! 1. [`cflow`] - read cflow output into a [`CallGraph`].
//! 2. [`dot`] - write call graphs as DOT and read edge statements back.
//! 3. [`filter`] - drop calls into lower-case helpers and `Assert`.
//! 4. [`split`] - extract one bounded subgraph per entry point.
//! 5. [`render`] - run an external renderer (Graphviz `dot`) over a list of
//!    targets, one after another.
//!
//! # Example
//!
//! ```rust
//! use callplot::{cflow, config::AppConfig, dot, split};
//!
//! let config = AppConfig::default();
//! let tree = "    1 main: int (void), <main.c 1>\n    2     PostmasterMain: <>\n    3         ServerLoop: <>\n";
//!
//! let graph = cflow::to_call_graph(tree);
//! let source = dot::write_call_graph(&graph, config.graph());
//!
//! let subgraphs = split::split_source(&source, config.split());
//! let roots: Vec<_> = subgraphs.iter().map(|s| s.root()).collect();
//! assert_eq!(roots, ["main", "PostmasterMain"]);
//! ```

pub mod cflow;
pub mod config;
pub mod dot;
pub mod filter;
pub mod graph;
pub mod render;
pub mod split;

mod error;

pub use error::{BatchFailure, CallplotError, RenderError, TargetFailure};
pub use graph::{CallEdge, CallGraph};
