//! Reading and writing the DOT subset used by callplot.
//!
//! Generated files always use the same shape:
//!
//! ```text
//! digraph cflow {
//!     rankdir=TB;
//!     node [shape=box];
//!     "caller" -> "callee";
//! }
//! ```
//!
//! Reading is line oriented. Only quoted edge statements are recognized;
//! every other line is opaque to callplot.

use winnow::{
    Parser as _,
    ascii::multispace0,
    combinator::{delimited, preceded, terminated},
    error::{ContextError, ErrMode},
    token::take_till,
};

use crate::{
    config::GraphStyle,
    graph::{CallEdge, CallGraph},
};

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Parse a double-quoted, non-empty node name
fn quoted<'src>(input: &mut &'src str) -> IResult<&'src str> {
    delimited('"', take_till(1.., '"'), '"').parse_next(input)
}

/// Parse `"a" -> "b"` with optional surrounding whitespace
fn edge<'src>(input: &mut &'src str) -> IResult<(&'src str, &'src str)> {
    (
        preceded(multispace0, quoted),
        preceded((multispace0, "->", multispace0), quoted),
    )
        .parse_next(input)
}

/// Parse `"a" -> "b";` where the semicolon directly follows the callee
fn edge_statement<'src>(input: &mut &'src str) -> IResult<(&'src str, &'src str)> {
    terminated(edge, ';').parse_next(input)
}

/// Parse a line that starts with a quoted edge, ignoring anything after it.
///
/// # Examples
///
/// ```
/// # use callplot::dot::parse_edge;
/// let edge = parse_edge(r#"    "main" -> "PostmasterMain" [color=red];"#).unwrap();
/// assert_eq!(edge.caller(), "main");
/// assert_eq!(edge.callee(), "PostmasterMain");
///
/// assert!(parse_edge("digraph cflow {").is_none());
/// ```
pub fn parse_edge(line: &str) -> Option<CallEdge> {
    let mut input = line;
    edge.parse_next(&mut input)
        .ok()
        .map(|(caller, callee)| CallEdge::new(caller, callee))
}

/// Parse a line holding a quoted edge terminated by `;`.
///
/// Stricter than [`parse_edge`]: the semicolon must follow the closing quote
/// of the callee immediately.
pub fn parse_edge_statement(line: &str) -> Option<CallEdge> {
    let mut input = line;
    edge_statement
        .parse_next(&mut input)
        .ok()
        .map(|(caller, callee)| CallEdge::new(caller, callee))
}

/// Collect every edge statement of a DOT document, in file order.
///
/// Duplicate statements are kept.
pub fn read_edges(source: &str) -> Vec<CallEdge> {
    source.lines().filter_map(parse_edge_statement).collect()
}

fn write_header(out: &mut String, style: &GraphStyle) {
    out.push_str("digraph cflow {\n");
    out.push_str(&format!("    rankdir={};\n", style.rankdir()));
    out.push_str(&format!("    node [shape={}];\n", style.node_shape()));
}

/// Render a whole call graph.
///
/// The result has no trailing newline.
pub fn write_call_graph(graph: &CallGraph, style: &GraphStyle) -> String {
    let mut out = String::new();
    write_header(&mut out, style);
    for edge in graph.edges() {
        out.push_str(&format!("    {edge};\n"));
    }
    out.push('}');
    out
}

/// Render the subgraph reachable from `root`.
///
/// Adds layout hints and the `root` attribute to the standard header.
pub fn write_subgraph<'a>(
    root: &str,
    edges: impl IntoIterator<Item = &'a CallEdge>,
    style: &GraphStyle,
) -> String {
    let mut out = String::new();
    write_header(&mut out, style);
    out.push_str("    overlap=false;\n");
    out.push_str("    splines=true;\n");
    out.push_str(&format!("    root=\"{root}\";\n\n"));
    for edge in edges {
        out.push_str(&format!("    {edge};\n"));
    }
    out.push_str("}\n");
    out
}
