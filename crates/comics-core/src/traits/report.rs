//! Report exporter trait and the report template.

use std::io::Write;

use crate::error::ReportError;
use crate::record::Record;

/// Typographic role of a report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Document title, centered.
    Title,
    /// First line of a record.
    Heading,
    /// Remaining record lines.
    Body,
}

/// One line of report text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub style: LineStyle,
    pub text: String,
}

impl ReportLine {
    fn new(style: LineStyle, text: String) -> Self {
        Self { style, text }
    }
}

/// What the report says about each record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTemplate {
    /// Title printed once at the top.
    pub title: String,
    /// Separator used to join `poderes`.
    pub delimiter: String,
}

impl Default for ReportTemplate {
    fn default() -> Self {
        Self {
            title: "Lista de Cómics".to_string(),
            delimiter: ", ".to_string(),
        }
    }
}

impl ReportTemplate {
    pub fn title_line(&self) -> ReportLine {
        ReportLine::new(LineStyle::Title, self.title.clone())
    }

    /// The lines describing one record: nombre, edad, ciudad and poderes.
    pub fn record_lines(&self, record: &Record) -> [ReportLine; 4] {
        [
            ReportLine::new(LineStyle::Heading, format!("Nombre: {}", record.nombre)),
            ReportLine::new(LineStyle::Body, format!("Edad: {}", record.edad)),
            ReportLine::new(LineStyle::Body, format!("Ciudad: {}", record.ciudad)),
            ReportLine::new(
                LineStyle::Body,
                format!("Poderes: {}", record.poderes.join(&self.delimiter)),
            ),
        ]
    }
}

/// Renders records into a binary report.
///
/// `records` is consumed once, in collection order.
pub trait ReportExporter: Send + Sync {
    /// MIME type of the produced document.
    fn content_type(&self) -> &'static str;

    /// Suggested file name for downloads.
    fn file_name(&self) -> &'static str;

    /// Render every record into `sink`.
    fn export(
        &self,
        template: &ReportTemplate,
        records: &mut dyn Iterator<Item = Record>,
        sink: &mut dyn Write,
    ) -> Result<(), ReportError>;
}
