//! callplot CLI entry point.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use callplot_cli::{
    Args,
    error_adapter::{failed_targets_line, to_reportables},
};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    // Logging must be up before config discovery so its lookups are traced
    let log_level = LevelFilter::from_str(&args.log_level).unwrap_or_else(|_| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    debug!(log_level:?, args:?; "Starting callplot");

    let Err(err) = callplot_cli::run(&args) else {
        info!("Completed successfully");
        return;
    };

    let reporter = miette::GraphicalReportHandler::new();
    for reportable in to_reportables(&err) {
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, &reportable)
            .expect("Writing to String buffer is infallible");

        error!("{writer}");
    }

    // Progress lines can push per-target diagnostics off screen
    if let Some(line) = failed_targets_line(&err) {
        eprintln!("callplot: {line}");
    }

    process::exit(1);
}
