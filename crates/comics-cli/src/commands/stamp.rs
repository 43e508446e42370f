//! Stamp command implementation.

use anyhow::{Context, Result};
use clap::Args;

use comics_core::RecordRepository;

use crate::cli::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct StampArgs {}

pub async fn run(_args: StampArgs, store_args: &StoreArgs) -> Result<()> {
    let repo = RecordRepository::new(store_args.open());

    let stamped = repo
        .stamp_updated_at()
        .await
        .context("Failed to stamp records")?;

    output::success(&format!("Stamped {} record(s)", stamped));

    Ok(())
}
