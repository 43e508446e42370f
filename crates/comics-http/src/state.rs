//! Application state.
//!
//! Arc-wrapped state shared across handlers.

use std::sync::Arc;

use comics_core::{RecordRepository, ReportExporter, ReportTemplate};
use comics_file::{AccessLog, FileDocumentStore};
use comics_pdf::PdfExporter;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    repo: RecordRepository<FileDocumentStore>,
    exporter: Box<dyn ReportExporter>,
    template: ReportTemplate,
    access_log: Option<AccessLog>,
}

impl AppState {
    /// Create state over `store`, rendering reports as PDF.
    pub fn new(store: FileDocumentStore, access_log: Option<AccessLog>) -> Self {
        Self::with_exporter(store, access_log, Box::new(PdfExporter::default()))
    }

    /// Create state with a custom report exporter.
    pub fn with_exporter(
        store: FileDocumentStore,
        access_log: Option<AccessLog>,
        exporter: Box<dyn ReportExporter>,
    ) -> Self {
        Self {
            inner: Arc::new(InnerState {
                repo: RecordRepository::new(store),
                exporter,
                template: ReportTemplate::default(),
                access_log,
            }),
        }
    }

    pub fn repo(&self) -> &RecordRepository<FileDocumentStore> {
        &self.inner.repo
    }

    pub fn exporter(&self) -> &dyn ReportExporter {
        self.inner.exporter.as_ref()
    }

    pub fn template(&self) -> &ReportTemplate {
        &self.inner.template
    }

    pub fn access_log(&self) -> Option<&AccessLog> {
        self.inner.access_log.as_ref()
    }
}
