//! comics-pdf - Renders the catalog as a PDF document.
//!
//! The writer emits PDF 1.4 with the standard Helvetica font, so no font
//! data is embedded. Pages are written to the sink as soon as they fill up.

mod encoding;
mod exporter;
mod layout;
mod writer;

pub use exporter::{PageSize, PdfExporter};
