//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser};

use comics_file::{DEFAULT_COLLECTION_KEY, FileDocumentStore};

use crate::commands::Commands;

/// Comic character catalog.
#[derive(Parser, Debug)]
#[command(name = "comics")]
#[command(author, version = env!("COMICS_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Location of the catalog document.
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Path to the JSON document
    #[arg(long = "data", env = "COMICS_DATA", default_value = "db.json", global = true)]
    pub path: PathBuf,

    /// Top-level key holding the record array
    #[arg(
        long,
        env = "COMICS_COLLECTION_KEY",
        default_value = DEFAULT_COLLECTION_KEY,
        global = true
    )]
    pub collection_key: String,
}

impl StoreArgs {
    pub fn open(&self) -> FileDocumentStore {
        FileDocumentStore::with_key(&self.path, self.collection_key.clone())
    }
}
