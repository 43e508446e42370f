//! Serve command implementation.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use comics_file::AccessLog;
use comics_http::AppState;

use crate::cli::StoreArgs;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "COMICS_PORT", default_value_t = 3001)]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// File receiving one line per request
    #[arg(long, env = "COMICS_ACCESS_LOG", default_value = "access_log.txt")]
    pub access_log: PathBuf,
}

pub async fn run(args: ServeArgs, store_args: &StoreArgs) -> Result<()> {
    let store = store_args.open();
    if store
        .init()
        .await
        .context("Failed to initialize document")?
    {
        info!(path = %store.path().display(), "Created empty document");
    }

    let state = AppState::new(store, Some(AccessLog::new(&args.access_log)));
    let addr = SocketAddr::new(args.bind, args.port);

    comics_http::serve(state, addr)
        .await
        .with_context(|| format!("Server on {} failed", addr))
}
