//! Subcommand implementations.

mod get;
mod init;
mod list;
mod report;
mod serve;
mod stamp;

use anyhow::Result;
use clap::Subcommand;

use crate::cli::StoreArgs;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP API
    Serve(serve::ServeArgs),

    /// Create an empty document if none exists
    Init(init::InitArgs),

    /// List records
    List(list::ListArgs),

    /// Print one record
    Get(get::GetArgs),

    /// Stamp updated_at on every record that lacks it
    Stamp(stamp::StampArgs),

    /// Write the PDF report to a file
    Report(report::ReportArgs),
}

pub async fn handle(cmd: Commands, store: &StoreArgs) -> Result<()> {
    match cmd {
        Commands::Serve(args) => serve::run(args, store).await,
        Commands::Init(args) => init::run(args, store).await,
        Commands::List(args) => list::run(args, store).await,
        Commands::Get(args) => get::run(args, store).await,
        Commands::Stamp(args) => stamp::run(args, store).await,
        Commands::Report(args) => report::run(args, store).await,
    }
}
