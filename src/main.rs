use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use weather_analysis::manager::Manager;

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// CSV file with a date column and a temperature column
    #[arg(long)]
    input: PathBuf,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compute every metric and export the result table (.csv or .msgpack)
    Process {
        #[arg(long)]
        output: PathBuf,
    },

    /// Log a summary of the series statistics
    Inspect,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::info!("{args:#?}");

    let mgr =
        Manager::new(&args.input, args.config.as_deref()).context("failed to construct mgr")?;

    match args.command {
        Command::Process { output } => mgr.run_processing(output)?,
        Command::Inspect => mgr.run_inspection()?,
    }

    Ok(())
}
