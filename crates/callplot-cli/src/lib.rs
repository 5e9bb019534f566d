//! CLI logic for the callplot tool.
//!
//! This module contains the command dispatch for each pipeline stage.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::info;

use callplot::{
    CallplotError, cflow,
    config::AppConfig,
    dot, filter,
    render::{BatchRenderer, GraphvizRenderer},
    split,
};

/// Run the callplot CLI application, writing command output to stdout.
///
/// # Errors
///
/// Returns `CallplotError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Render failures, after every target has been attempted
pub fn run(args: &Args) -> Result<(), CallplotError> {
    let stdout = io::stdout();
    run_with_output(args, &mut stdout.lock())
}

/// Run the callplot CLI application, writing command output to `out`.
///
/// Generated DOT text, progress lines and split summaries all go to `out`;
/// logging goes through the `log` facade.
pub fn run_with_output<W: Write>(args: &Args, out: &mut W) -> Result<(), CallplotError> {
    let mut app_config = config::load_config(args.config.as_ref())?;

    match &args.command {
        Command::Cflow { input, output } => {
            info!(input_path = input.display().to_string(); "Converting cflow output");
            let source = fs::read_to_string(input)?;
            let graph = cflow::to_call_graph(&source);
            let text = dot::write_call_graph(&graph, app_config.graph());
            emit(output.as_deref(), &format!("{text}\n"), out)?;
            info!(edges = graph.len(); "Call graph written");
        }
        Command::Filter { input, output } => {
            info!(input_path = input.display().to_string(); "Filtering call graph");
            let source = fs::read_to_string(input)?;
            let text = filter::filter_symbols(&source);
            emit(output.as_deref(), &text, out)?;
        }
        Command::Split {
            input,
            out_dir,
            max_depth,
        } => {
            if let Some(depth) = max_depth {
                app_config.split_mut().set_max_depth(*depth);
            }
            split_command(input, out_dir, &app_config, out)?;
        }
        Command::Render {
            dir,
            tool,
            format,
            targets,
        } => {
            let render = app_config.render_mut();
            if let Some(tool) = tool {
                render.set_tool(tool);
            }
            if let Some(format) = format {
                render.set_format(format);
            }
            if !targets.is_empty() {
                render.set_targets(targets.clone());
            }

            let renderer = GraphvizRenderer::new(render).with_work_dir(dir);
            let batch = BatchRenderer::new(renderer, render.targets().to_vec());
            let rendered = batch.run(out)?.into_result()?;
            info!(rendered = rendered; "All targets rendered");
        }
    }

    Ok(())
}

/// Write `text` to `output` if given, otherwise to `out`
fn emit<W: Write>(output: Option<&Path>, text: &str, out: &mut W) -> Result<(), CallplotError> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            info!(output_file = path.display().to_string(); "Output written");
        }
        None => {
            out.write_all(text.as_bytes())?;
            out.flush()?;
        }
    }
    Ok(())
}

fn split_command<W: Write>(
    input: &Path,
    out_dir: &Path,
    config: &AppConfig,
    out: &mut W,
) -> Result<(), CallplotError> {
    info!(
        input_path = input.display().to_string(),
        max_depth = config.split().max_depth();
        "Splitting call graph"
    );
    let source = fs::read_to_string(input)?;
    let subgraphs = split::split_source(&source, config.split());

    if subgraphs.is_empty() {
        writeln!(out, "No root candidates found ('main' or '*Main'). Nothing to do.")?;
        return Ok(());
    }

    fs::create_dir_all(out_dir)?;
    for subgraph in &subgraphs {
        let path = output_path(out_dir, &subgraph.file_name());
        fs::write(&path, subgraph.to_dot(config.graph()))?;
        writeln!(out, "Generated: {}", path.display())?;
    }

    Ok(())
}

/// Path of a generated file, left bare when writing to the current directory
fn output_path(out_dir: &Path, file_name: &str) -> PathBuf {
    if out_dir == Path::new(".") {
        PathBuf::from(file_name)
    } else {
        out_dir.join(file_name)
    }
}
