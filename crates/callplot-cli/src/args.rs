//! Command-line argument definitions for the callplot CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Global arguments control configuration file selection and
//! logging verbosity; each pipeline stage is a [`Command`].

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command-line arguments for the callplot tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Pipeline stages
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert cflow output into a DOT call graph
    Cflow {
        /// Path to the cflow output file
        input: PathBuf,

        /// Write the graph here instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Drop edges into lower-case symbols and Assert, hoisting main edges
    Filter {
        /// Path to the input DOT file
        input: PathBuf,

        /// Write the result here instead of standard output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write one bounded subgraph per `main`/`*Main` root
    Split {
        /// Path to the input DOT file
        input: PathBuf,

        /// Directory receiving the `<root>.dot` files
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Maximum call depth from each root (overrides configuration)
        #[arg(long)]
        max_depth: Option<usize>,
    },

    /// Render `<target>.dot` into `<target>.<format>` for every target
    Render {
        /// Directory holding the DOT files; outputs are written next to them
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Rendering tool (overrides configuration)
        #[arg(long)]
        tool: Option<String>,

        /// Output format (overrides configuration)
        #[arg(long)]
        format: Option<String>,

        /// Targets to render (defaults to the configured list)
        targets: Vec<String>,
    },
}
