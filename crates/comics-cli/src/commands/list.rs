//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;

use comics_core::RecordRepository;

use crate::cli::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only records from this city (case-insensitive)
    #[arg(long)]
    pub ciudad: Option<String>,

    /// Pretty-print as a JSON array
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListArgs, store_args: &StoreArgs) -> Result<()> {
    let repo = RecordRepository::new(store_args.open());

    let records = repo
        .list(args.ciudad.as_deref())
        .await
        .context("Failed to list records")?;

    if args.pretty {
        return output::json_pretty(&records);
    }

    if records.is_empty() {
        output::note("No records found.");
        return Ok(());
    }

    for record in &records {
        output::json(record)?;
    }

    Ok(())
}
