//! Report command implementation.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use comics_core::{RecordRepository, ReportTemplate};
use comics_pdf::{PageSize, PdfExporter};

use crate::cli::StoreArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Destination file
    #[arg(long, default_value = "comics.pdf")]
    pub out: PathBuf,

    /// Use A4 pages instead of US Letter
    #[arg(long)]
    pub a4: bool,
}

pub async fn run(args: ReportArgs, store_args: &StoreArgs) -> Result<()> {
    let repo = RecordRepository::new(store_args.open());
    let exporter = if args.a4 {
        PdfExporter::new(PageSize::A4, 72.0)
    } else {
        PdfExporter::default()
    };

    let file = File::create(&args.out)
        .with_context(|| format!("Failed to create {}", args.out.display()))?;
    let mut sink = BufWriter::new(file);

    repo.export(&exporter, &ReportTemplate::default(), &mut sink)
        .await
        .context("Failed to render report")?;
    std::io::Write::flush(&mut sink)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;

    output::success(&format!("Wrote {}", args.out.display()));

    Ok(())
}
