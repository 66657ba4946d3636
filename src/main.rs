use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod event;
mod input;
mod logfile;
mod translate;

use event::EventKind;
use logfile::LogOptions;

/// Reads one hook event as JSON on stdin and prints a timestamped description.
#[derive(Debug, Parser)]
#[command(name = "hookmaster", version, about)]
struct Cli {
    /// Append the raw input and the description to this file
    #[arg(long, value_name = "FILE")]
    log: Option<PathBuf>,

    /// Config file (default: $XDG_CONFIG_HOME/hookmaster/config.yaml, if present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON in log entries instead of copying it verbatim
    #[arg(long)]
    pretty: bool,

    /// Add a section to log entries that unfolds multiline string fields
    #[arg(long)]
    human_readable: bool,

    /// Increase diagnostic verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("HOOKMASTER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    // stdout carries the description only
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::resolve_config(cli.config.as_deref())?;
    let raw = read_input()?;
    let record = input::parse_record(&raw)?;

    let kind = EventKind::of(&record);
    debug!(?kind, fields = record.len(), "decoded hook event");
    let output = translate::translate(&record, Local::now().naive_local(), &config.translate);

    #[allow(clippy::print_stdout)]
    {
        println!("{}", output);
    }

    if let Some(path) = &cli.log {
        let options = LogOptions {
            pretty: cli.pretty || config.log.pretty,
            human_readable: cli.human_readable || config.log.human_readable,
        };
        let entry =
            logfile::render_entry(&raw, &record, &output, Local::now().naive_local(), &options)?;
        logfile::append_entry(path, &entry)?;
        info!(path = %path.display(), "logged hook event");
    }

    Ok(())
}

fn read_input() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read stdin")?;
    Ok(buffer)
}
