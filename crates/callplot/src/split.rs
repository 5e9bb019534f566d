//! Per-root subgraph extraction.
//!
//! A *root* is `main` or any function whose name ends in `Main` (process
//! entry points such as `PostmasterMain`). For every root the splitter keeps
//! the part of the call graph reachable within a bounded number of hops.
//! Other `*Main` functions reached on the way are kept as leaves so each
//! process entry point gets its own diagram.

use std::collections::{HashSet, VecDeque};

use log::{debug, info};
use petgraph::graphmap::DiGraphMap;

use crate::{
    config::{GraphStyle, SplitConfig},
    dot,
    graph::{CallEdge, is_lowercase_symbol},
};

/// Edges reachable from a single root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subgraph {
    root: String,
    edges: Vec<CallEdge>,
}

impl Subgraph {
    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn edges(&self) -> &[CallEdge] {
        &self.edges
    }

    /// File name the subgraph is written to, `<root>.dot`.
    pub fn file_name(&self) -> String {
        format!("{}.dot", self.root)
    }

    /// Render the subgraph as a DOT document.
    pub fn to_dot(&self, style: &GraphStyle) -> String {
        dot::write_subgraph(&self.root, &self.edges, style)
    }
}

fn is_entry_point(name: &str) -> bool {
    name.ends_with("Main")
}

fn is_root_candidate(name: &str) -> bool {
    !is_lowercase_symbol(name) && (name == "main" || is_entry_point(name))
}

/// Nodes within `max_depth` hops of `root`, skipping lower-case symbols and
/// not expanding past other entry points.
fn reachable<'a>(
    graph: &DiGraphMap<&'a str, ()>,
    root: &'a str,
    max_depth: usize,
) -> HashSet<&'a str> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    if !is_lowercase_symbol(root) {
        visited.insert(root);
        queue.push_back((root, 0usize));
    }

    while let Some((node, depth)) = queue.pop_front() {
        if node != root && is_entry_point(node) {
            continue;
        }
        if depth >= max_depth {
            continue;
        }
        for next in graph.neighbors(node) {
            if is_lowercase_symbol(next) {
                continue;
            }
            if visited.insert(next) {
                queue.push_back((next, depth + 1));
            }
        }
    }

    visited
}

/// Split a list of edges into one [`Subgraph`] per root.
///
/// Roots are returned in the order their names first appear in `edges`.
/// Edge order and duplicates from `edges` are preserved inside each subgraph.
pub fn split_by_roots(edges: &[CallEdge], config: &SplitConfig) -> Vec<Subgraph> {
    let mut graph = DiGraphMap::<&str, ()>::new();
    for edge in edges {
        graph.add_edge(edge.caller(), edge.callee(), ());
    }

    let roots: Vec<&str> = graph.nodes().filter(|n| is_root_candidate(n)).collect();
    info!(
        nodes = graph.node_count(),
        edges = edges.len(),
        roots = roots.len();
        "Splitting call graph by root"
    );

    roots
        .into_iter()
        .map(|root| {
            let nodes = reachable(&graph, root, config.max_depth());
            let kept: Vec<CallEdge> = edges
                .iter()
                .filter(|edge| nodes.contains(edge.caller()) && nodes.contains(edge.callee()))
                .filter(|edge| edge.caller() == root || !is_entry_point(edge.caller()))
                .cloned()
                .collect();

            debug!(root = root, nodes = nodes.len(), edges = kept.len(); "Subgraph extracted");
            Subgraph {
                root: root.to_string(),
                edges: kept,
            }
        })
        .collect()
}

/// Parse a DOT document and split it by root.
pub fn split_source(source: &str, config: &SplitConfig) -> Vec<Subgraph> {
    split_by_roots(&dot::read_edges(source), config)
}
