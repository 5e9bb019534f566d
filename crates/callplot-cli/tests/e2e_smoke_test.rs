use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::{TempDir, tempdir};

use callplot::CallplotError;
use callplot_cli::{Args, Command, run_with_output};

const CFLOW_OUTPUT: &str = "\
    1 main: int (int argc, char *argv[]), <src/backend/main/main.c 71>
    2     startup_hacks: void (const char *progname), <src/backend/main/main.c 283>
    3     PostmasterMain: void (int argc, char *argv[]), <src/backend/postmaster/postmaster.c 490>
    4         ServerLoop: int (void), <src/backend/postmaster/postmaster.c 1650>
    5             pg_usleep: <>
    6         pqsignal: <>
";

/// Config that swaps Graphviz for `sh` copying `X.dot` to `X.svg`.
const COPY_CONFIG: &str = r#"
[render]
tool = "sh"
args = ["-c", "test -f \"$2\" && cp \"$2\" \"$4\"", "sh"]
"#;

fn args(config: Option<&Path>, command: Command) -> Args {
    Args {
        config: config.map(|p| p.to_string_lossy().to_string()),
        log_level: "off".to_string(),
        command,
    }
}

fn run_capture(args: &Args) -> (Result<(), CallplotError>, String) {
    let mut out = Vec::new();
    let result = run_with_output(args, &mut out);
    (result, String::from_utf8_lossy(&out).into_owned())
}

fn workspace() -> (TempDir, PathBuf) {
    let dir = tempdir().expect("Failed to create temp directory");
    let config = dir.path().join("config.toml");
    fs::write(&config, COPY_CONFIG).unwrap();
    (dir, config)
}

#[test]
fn e2e_cflow_filter_split() {
    let (dir, config) = workspace();
    let root = dir.path();
    fs::write(root.join("cflow.txt"), CFLOW_OUTPUT).unwrap();

    let (result, _) = run_capture(&args(
        Some(&config),
        Command::Cflow {
            input: root.join("cflow.txt"),
            output: Some(root.join("all.dot")),
        },
    ));
    result.expect("cflow stage failed");
    let all = fs::read_to_string(root.join("all.dot")).unwrap();
    assert!(all.contains("\"ServerLoop\" -> \"pg_usleep\";"));

    let (result, filtered) = run_capture(&args(
        Some(&config),
        Command::Filter {
            input: root.join("all.dot"),
            output: None,
        },
    ));
    result.expect("filter stage failed");
    assert!(!filtered.contains("pg_usleep"));
    assert!(!filtered.contains("pqsignal"));
    assert!(filtered.contains("\"main\" -> \"startup_hacks\";"));
    fs::write(root.join("filtered.dot"), &filtered).unwrap();

    let (result, summary) = run_capture(&args(
        Some(&config),
        Command::Split {
            input: root.join("filtered.dot"),
            out_dir: root.join("split"),
            max_depth: None,
        },
    ));
    result.expect("split stage failed");
    let generated: Vec<_> = summary.lines().collect();
    assert_eq!(generated.len(), 2, "unexpected summary: {summary}");
    assert!(generated[0].starts_with("Generated: ") && generated[0].ends_with("main.dot"));
    assert!(generated[1].ends_with("PostmasterMain.dot"));

    let postmaster = fs::read_to_string(root.join("split").join("PostmasterMain.dot")).unwrap();
    assert!(postmaster.contains("root=\"PostmasterMain\";"));
    assert!(postmaster.contains("\"PostmasterMain\" -> \"ServerLoop\";"));
}

#[test]
fn e2e_split_without_roots() {
    let (dir, config) = workspace();
    let input = dir.path().join("graph.dot");
    fs::write(&input, "digraph cflow {\n    \"A\" -> \"B\";\n}\n").unwrap();

    let (result, summary) = run_capture(&args(
        Some(&config),
        Command::Split {
            input,
            out_dir: dir.path().to_path_buf(),
            max_depth: Some(2),
        },
    ));
    result.expect("split should succeed without roots");
    assert_eq!(
        summary,
        "No root candidates found ('main' or '*Main'). Nothing to do.\n"
    );
}

#[cfg(unix)]
#[test]
fn e2e_render_all_targets() {
    let (dir, config) = workspace();
    fs::write(dir.path().join("main.dot"), "digraph cflow { }").unwrap();
    fs::write(dir.path().join("PostmasterMain.dot"), "digraph cflow { }").unwrap();

    let (result, progress) = run_capture(&args(
        Some(&config),
        Command::Render {
            dir: dir.path().to_path_buf(),
            tool: None,
            format: None,
            targets: vec!["main".to_string(), "PostmasterMain".to_string()],
        },
    ));

    result.expect("render should succeed");
    assert_eq!(progress, "current: main\ncurrent: PostmasterMain\n");
    assert!(dir.path().join("main.svg").is_file());
    assert!(dir.path().join("PostmasterMain.svg").is_file());
}

#[cfg(unix)]
#[test]
fn e2e_render_continues_after_failure() {
    let (dir, config) = workspace();
    fs::write(dir.path().join("b.dot"), "digraph cflow { }").unwrap();

    let (result, progress) = run_capture(&args(
        Some(&config),
        Command::Render {
            dir: dir.path().to_path_buf(),
            tool: None,
            format: None,
            targets: vec!["a".to_string(), "b".to_string()],
        },
    ));

    assert_eq!(progress, "current: a\ncurrent: b\n");
    assert!(!dir.path().join("a.svg").exists());
    assert!(dir.path().join("b.svg").is_file());

    match result {
        Err(CallplotError::Render(failure)) => {
            assert_eq!(failure.attempted(), 2);
            assert_eq!(failure.failures().len(), 1);
            assert_eq!(failure.failures()[0].target(), "a");
        }
        other => panic!("Expected render failure, got {other:?}"),
    }
}

#[test]
fn e2e_render_missing_tool() {
    let (dir, config) = workspace();

    let (result, progress) = run_capture(&args(
        Some(&config),
        Command::Render {
            dir: dir.path().to_path_buf(),
            tool: Some("callplot-no-such-renderer".to_string()),
            format: None,
            targets: vec!["a".to_string(), "b".to_string()],
        },
    ));

    assert_eq!(progress, "current: a\ncurrent: b\n");
    assert!(matches!(result, Err(CallplotError::Render(ref f)) if f.failures().len() == 2));
}

#[test]
fn e2e_missing_config_file() {
    let dir = tempdir().expect("Failed to create temp directory");
    let missing = dir.path().join("nope.toml");

    let (result, _) = run_capture(&args(
        Some(&missing),
        Command::Filter {
            input: dir.path().join("in.dot"),
            output: None,
        },
    ));
    assert!(matches!(result, Err(CallplotError::Config(_))));
}
