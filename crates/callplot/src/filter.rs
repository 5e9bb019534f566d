//! Symbol filter for generated call graphs.
//!
//! Call graphs of a large C program are dominated by calls into lower-case
//! helpers (`palloc`, `elog`, `strlen`, ...) and `Assert`. This filter drops
//! those edges while keeping everything that touches `main`. Edges involving
//! `main` are moved to the front of the edge block.

use log::debug;

use crate::{dot::parse_edge, graph::is_lowercase_symbol};

/// Lines that reference `main` in an edge are always kept and hoisted.
fn is_main_line(line: &str) -> bool {
    line.contains("->") && line.contains("\"main\"")
}

/// Whether an edge line should be dropped.
///
/// Non-edge lines are never dropped.
fn should_remove(line: &str) -> bool {
    let Some(edge) = parse_edge(line) else {
        return false;
    };
    let (caller, callee) = (edge.caller(), edge.callee());
    if caller == "main" || callee == "main" {
        return false;
    }
    is_lowercase_symbol(caller)
        || is_lowercase_symbol(callee)
        || caller == "Assert"
        || callee == "Assert"
}

/// Filter a DOT document line by line.
///
/// Line endings are preserved. Lines referencing `main` are placed just
/// before the first remaining edge line, or before the closing brace when
/// no other edge survives.
///
/// # Examples
///
/// ```
/// # use callplot::filter::filter_symbols;
/// let source = "digraph cflow {\n    \"A\" -> \"palloc\";\n    \"A\" -> \"B\";\n    \"main\" -> \"A\";\n}\n";
/// let filtered = filter_symbols(source);
/// assert_eq!(filtered, "digraph cflow {\n    \"main\" -> \"A\";\n    \"A\" -> \"B\";\n}\n");
/// ```
pub fn filter_symbols(source: &str) -> String {
    let mut main_lines = Vec::new();
    let mut kept = Vec::new();
    let mut removed = 0usize;

    for line in source.split_inclusive('\n') {
        if is_main_line(line) {
            main_lines.push(line);
        } else if should_remove(line) {
            removed += 1;
        } else {
            kept.push(line);
        }
    }

    let insert_at = kept
        .iter()
        .position(|line| parse_edge(line).is_some())
        .or_else(|| kept.iter().rposition(|line| line.trim() == "}"))
        .unwrap_or(kept.len());

    debug!(
        main_edges = main_lines.len(),
        kept_lines = kept.len(),
        removed_edges = removed;
        "Filtered call graph"
    );

    let mut out = String::with_capacity(source.len());
    for line in &kept[..insert_at] {
        out.push_str(line);
    }
    for line in &main_lines {
        out.push_str(line);
        if !line.ends_with('\n') {
            out.push('\n');
        }
    }
    for line in &kept[insert_at..] {
        out.push_str(line);
    }
    out
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::dot::read_edges;

    #[test]
    fn test_removes_lowercase_and_assert_edges() {
        let source = "\
digraph cflow {
    \"PostmasterMain\" -> \"ServerLoop\";
    \"PostmasterMain\" -> \"pqsignal\";
    \"errstart\" -> \"ServerLoop\";
    \"ServerLoop\" -> \"Assert\";
}
";
        let filtered = filter_symbols(source);
        assert_eq!(
            filtered,
            "digraph cflow {\n    \"PostmasterMain\" -> \"ServerLoop\";\n}\n"
        );
    }

    #[test]
    fn test_keeps_main_edges_even_to_lowercase() {
        let source = "digraph cflow {\n    \"main\" -> \"startup_hacks\";\n}\n";
        assert_eq!(filter_symbols(source), source);
    }

    #[test]
    fn test_hoists_main_edges_before_other_edges() {
        let source = "\
digraph cflow {
    rankdir=TB;
    \"PostmasterMain\" -> \"ServerLoop\";
    \"main\" -> \"PostmasterMain\";
    \"main\" -> \"PostgresMain\";
}";
        let expected = "\
digraph cflow {
    rankdir=TB;
    \"main\" -> \"PostmasterMain\";
    \"main\" -> \"PostgresMain\";
    \"PostmasterMain\" -> \"ServerLoop\";
}";
        assert_eq!(filter_symbols(source), expected);
    }

    #[test]
    fn test_main_edges_go_before_closing_brace_without_other_edges() {
        let source = "digraph cflow {\n    node [shape=box];\n    \"A\" -> \"b\";\n    \"main\" -> \"A\";\n}\n";
        let expected = "digraph cflow {\n    node [shape=box];\n    \"main\" -> \"A\";\n}\n";
        assert_eq!(filter_symbols(source), expected);
    }

    #[test]
    fn test_main_edges_skip_arrow_comments() {
        let source = "digraph cflow {\n    // A -> B\n    \"A\" -> \"B\";\n    \"main\" -> \"A\";\n}\n";
        let expected = "digraph cflow {\n    // A -> B\n    \"main\" -> \"A\";\n    \"A\" -> \"B\";\n}\n";
        assert_eq!(filter_symbols(source), expected);
    }

    #[test]
    fn test_non_edge_lines_are_untouched() {
        let source = "// comment with -> arrow\nfoo bar\n";
        assert_eq!(filter_symbols(source), source);
    }

    // ===================
    // Property Tests
    // ===================

    fn name_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("main".to_string()),
            Just("Assert".to_string()),
            "[a-z][a-z_]{0,8}",
            "[A-Z][A-Za-z]{0,8}",
        ]
    }

    /// No surviving edge touches a filtered symbol unless it involves `main`.
    fn check_no_filtered_symbols_survive(
        edges: Vec<(String, String)>,
    ) -> Result<(), TestCaseError> {
        let mut source = String::from("digraph cflow {\n");
        for (caller, callee) in &edges {
            source.push_str(&format!("    \"{caller}\" -> \"{callee}\";\n"));
        }
        source.push_str("}\n");

        let filtered = filter_symbols(&source);
        for edge in read_edges(&filtered) {
            if edge.caller() == "main" || edge.callee() == "main" {
                continue;
            }
            prop_assert!(!is_lowercase_symbol(edge.caller()), "kept {edge}");
            prop_assert!(!is_lowercase_symbol(edge.callee()), "kept {edge}");
            prop_assert!(edge.caller() != "Assert" && edge.callee() != "Assert");
        }

        let main_edges = edges
            .iter()
            .filter(|(caller, callee)| caller == "main" || callee == "main")
            .count();
        let kept_main = read_edges(&filtered)
            .iter()
            .filter(|edge| edge.caller() == "main" || edge.callee() == "main")
            .count();
        prop_assert_eq!(main_edges, kept_main);
        Ok(())
    }

    proptest! {
        #[test]
        fn no_filtered_symbols_survive(edges in prop::collection::vec((name_strategy(), name_strategy()), 0..16)) {
            check_no_filtered_symbols_survive(edges)?;
        }
    }
}
