mod commands;

use crate::commands::check::{handle_check, CheckArgs};
use crate::commands::generate::{handle_generate, GenerateArgs};
use crate::commands::inspect::{handle_inspect, InspectArgs};
use clap::{Parser, Subcommand};
use common::error::ForgeError;
use std::path::PathBuf;
use time::macros::format_description;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schemaforge")]
pub struct Cli {
    #[arg(
        long = "config-path",
        short = 'c',
        help = "path to config file",
        global = true
    )]
    pub config_path: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Compile schema documents into SQL, proto and class artifacts
    Generate(GenerateArgs),
    /// Parse and resolve documents without writing anything
    Check(CheckArgs),
    /// Print the resolved column metadata for the given documents
    Inspect(InspectArgs),
}

fn run_cmd(func: Result<(), ForgeError>) {
    if let Err(e) = func {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info") // fallback log level
    });
    let time_format =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond digits:2]");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_timer(fmt::time::LocalTime::new(time_format))
                .with_target(false)
                .with_level(true)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .with_span_events(fmt::format::FmtSpan::NONE)
                .compact(),
        )
        .with(filter)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Cmd::Generate(args) => run_cmd(handle_generate(&args, cli.config_path.clone())),
        Cmd::Check(args) => run_cmd(handle_check(&args, cli.config_path.clone())),
        Cmd::Inspect(args) => run_cmd(handle_inspect(&args)),
    }
}
