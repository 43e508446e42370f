//! Get command implementation.

use anyhow::{Context, Result};
use clap::Args;

use comics_core::{RecordId, RecordRepository};

use crate::cli::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct GetArgs {
    /// Record id
    pub id: RecordId,
}

pub async fn run(args: GetArgs, store_args: &StoreArgs) -> Result<()> {
    let repo = RecordRepository::new(store_args.open());

    let record = repo
        .get(args.id)
        .await
        .context("Failed to read record")?
        .with_context(|| format!("Record {} not found", args.id))?;

    output::json_pretty(&record)
}
