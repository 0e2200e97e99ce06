use std::path::PathBuf;

use crate::demo::{run_batch, run_demo, BatchArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use investor_profile::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Investor Profile Service",
    about = "Serve and exercise the investor-profile classification engine from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Classify a few canned respondents and print the outcomes
    Demo(DemoArgs),
    /// Replay a CSV log of recorded responses and print the tally
    Batch(BatchArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Load a rule dataset from this JSON file instead of the built-in one
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Demo(args) => run_demo(args),
        Command::Batch(args) => run_batch(args),
    }
}
