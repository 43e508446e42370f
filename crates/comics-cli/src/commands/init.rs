//! Init command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct InitArgs {}

pub async fn run(_args: InitArgs, store_args: &StoreArgs) -> Result<()> {
    let store = store_args.open();
    let created = store
        .init()
        .await
        .context("Failed to initialize document")?;

    let path = store.path().display().to_string();
    if created {
        output::success(&format!("Created {}", path));
    } else {
        output::note(&format!("{} already exists", path));
    }

    Ok(())
}
