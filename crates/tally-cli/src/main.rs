//! tally CLI - inspect and maintain the migration bookkeeping table

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{forget, init, mark, sql, status, version};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Sql(args) => sql::execute(args, &cli.global).await,
        cli::Commands::Init => init::execute(&cli.global).await,
        cli::Commands::Status(args) => status::execute(args, &cli.global).await,
        cli::Commands::Version => version::execute(&cli.global).await,
        cli::Commands::Mark(args) => mark::execute(args, &cli.global).await,
        cli::Commands::Forget(args) => forget::execute(args, &cli.global).await,
    }
}
