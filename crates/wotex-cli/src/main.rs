//! wotex CLI — command-line client for a wotex node.
//!
//! Subcommands: init, status, sentries, query.

mod commands;

use clap::{Parser, Subcommand};

/// wotex — web-of-trust distance explorer.
#[derive(Parser, Debug)]
#[command(name = "wotex", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize a new wotex node configuration.
    Init(commands::init::InitArgs),
    /// Query the status of a running node.
    Status(commands::status::StatusArgs),
    /// List the current sentries and non-sentries.
    Sentries(commands::sentries::SentriesArgs),
    /// Show certification chains between an identity and every member.
    Query(commands::query::QueryArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init(args) => commands::init::run(args),
        Commands::Status(args) => commands::status::run(args).await,
        Commands::Sentries(args) => commands::sentries::run(args).await,
        Commands::Query(args) => commands::query::run(args).await,
    }
}
