//! Seams between the repository and its collaborators.

mod report;
mod store;

pub use report::{LineStyle, ReportExporter, ReportLine, ReportTemplate};
pub use store::DocumentStore;
