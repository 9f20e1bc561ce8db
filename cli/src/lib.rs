pub mod load;
pub mod normalize_cmd;
pub mod steps_cmd;

use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use tracing_subscriber::EnvFilter;

use crate::normalize_cmd::NormalizeCommand;
use crate::steps_cmd::StepsCommand;

/// Inspect SARIF 2.0.0 logs the way the explorer presents them.
#[derive(Debug, Parser)]
#[command(name = "sarif-explorer", version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG`
    /// takes precedence when set.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Normalize a log and print runs and results
    Normalize(NormalizeCommand),

    /// Print the code-flow step markers of one result for one document
    Steps(StepsCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        init_tracing(self.verbose);
        match self.command {
            Command::Normalize(command) => command.run().await,
            Command::Steps(command) => command.run().await,
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
