//! Reader for `cflow` call-tree output.
//!
//! cflow prints one call per line, numbered, with four spaces of indentation
//! per nesting level after the line number:
//!
//! ```text
//!     1 main: int (int argc, char *argv[]), <src/backend/main/main.c 71>
//!     2     pgwin32_install_crashdump_handler: <>
//!     3     startup_hacks: void (const char *progname), <src/backend/main/main.c 283>
//!     4         setvbuf: <>
//! ```
//!
//! [`to_call_graph`] turns that tree into caller → callee edges.

use log::{debug, trace};
use winnow::{
    Parser as _,
    ascii::{digit1, multispace0},
    combinator::preceded,
    error::{ContextError, ErrMode},
    token::take_while,
};

use crate::graph::{CallEdge, CallGraph};

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// Spaces of indentation per call level.
const INDENT_WIDTH: usize = 4;

/// One parsed line of cflow output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallLine<'src> {
    level: usize,
    name: &'src str,
}

impl<'src> CallLine<'src> {
    /// Nesting level, zero for top-level functions.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn name(&self) -> &'src str {
        self.name
    }
}

/// Parse the line number and return the indentation that follows it
fn numbered_indent<'src>(input: &mut &'src str) -> IResult<&'src str> {
    preceded(
        (multispace0, digit1),
        take_while(0.., |c: char| c.is_whitespace()),
    )
    .parse_next(input)
}

/// Parse a single line of cflow output.
///
/// Returns `None` for blank lines, lines without a leading line number and
/// lines with no function name.
///
/// # Examples
///
/// ```
/// # use callplot::cflow::parse_line;
/// let line = parse_line("    4         setvbuf: <>").unwrap();
/// assert_eq!(line.level(), 2);
/// assert_eq!(line.name(), "setvbuf");
/// ```
pub fn parse_line(line: &str) -> Option<CallLine<'_>> {
    let mut input = line.trim_end();
    if input.is_empty() {
        return None;
    }

    let indent = numbered_indent.parse_next(&mut input).ok()?;
    let level = indent.chars().count() / INDENT_WIDTH;

    let name = match input.split_once(':') {
        Some((name, _)) => name,
        None => input,
    }
    .trim();

    if name.is_empty() {
        return None;
    }

    Some(CallLine { level, name })
}

/// Build the call graph described by a cflow call tree.
///
/// Each function is linked to the nearest preceding line with a smaller
/// nesting level. Repeated calls are recorded once.
pub fn to_call_graph(source: &str) -> CallGraph {
    let mut graph = CallGraph::new();
    let mut stack: Vec<CallLine<'_>> = Vec::new();
    let mut skipped = 0usize;

    for raw in source.lines() {
        let Some(line) = parse_line(raw) else {
            if !raw.trim().is_empty() {
                skipped += 1;
            }
            continue;
        };

        while stack.last().is_some_and(|top| top.level >= line.level) {
            stack.pop();
        }

        if line.level > 0 {
            if let Some(parent) = stack.last() {
                trace!(caller = parent.name, callee = line.name; "Recording call");
                graph.insert(CallEdge::new(parent.name, line.name));
            }
        }

        stack.push(line);
    }

    debug!(edges = graph.len(), skipped_lines = skipped; "Call tree converted");
    graph
}
