//! PDF implementation of the report exporter.

use std::io::Write;

use tracing::debug;

use comics_core::{LineStyle, Record, ReportError, ReportExporter, ReportTemplate};

use crate::layout::{Align, Layout};
use crate::writer::{CATALOG, FONT, INFO, PAGES, PdfWriter};

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// US Letter, 8.5 x 11 in.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };

    /// ISO A4.
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };
}

/// Writes the catalog report as a PDF document.
#[derive(Debug, Clone)]
pub struct PdfExporter {
    page: PageSize,
    margin: f32,
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self {
            page: PageSize::LETTER,
            margin: 72.0,
        }
    }
}

impl PdfExporter {
    pub fn new(page: PageSize, margin: f32) -> Self {
        Self { page, margin }
    }

    fn font_size(style: LineStyle) -> f32 {
        match style {
            LineStyle::Title => 20.0,
            LineStyle::Heading => 14.0,
            LineStyle::Body => 10.0,
        }
    }
}

/// Emits finished pages and remembers their object numbers.
struct Pages<W> {
    writer: PdfWriter<W>,
    media_box: String,
    kids: Vec<u32>,
}

impl<W: Write> Pages<W> {
    fn emit(&mut self, content: &[u8]) -> std::io::Result<()> {
        let content_id = self.writer.allocate();
        let page_id = self.writer.allocate();
        self.writer.stream(content_id, content)?;
        self.writer.object(
            page_id,
            &format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox {} /Resources << /Font << /F1 {} 0 R >> >> /Contents {} 0 R >>",
                PAGES, self.media_box, FONT, content_id
            ),
        )?;
        self.kids.push(page_id);
        Ok(())
    }

    fn emit_all(&mut self, pages: Vec<Vec<u8>>) -> std::io::Result<()> {
        for page in pages {
            self.emit(&page)?;
        }
        Ok(())
    }
}

impl ReportExporter for PdfExporter {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn file_name(&self) -> &'static str {
        "comics.pdf"
    }

    fn export(
        &self,
        template: &ReportTemplate,
        records: &mut dyn Iterator<Item = Record>,
        sink: &mut dyn Write,
    ) -> Result<(), ReportError> {
        let mut writer = PdfWriter::new(sink)?;
        writer.object(
            FONT,
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
        )?;
        let title = String::from_utf8(crate::encoding::literal(&template.title)).map_err(|e| {
            ReportError::Render {
                message: e.to_string(),
            }
        })?;
        writer.object(
            INFO,
            &format!("<< /Title {} /Producer (comics-pdf) >>", title),
        )?;

        let mut pages = Pages {
            writer,
            media_box: format!("[0 0 {:.2} {:.2}]", self.page.width, self.page.height),
            kids: Vec::new(),
        };
        let mut layout = Layout::new(self.page.width, self.page.height, self.margin);

        let title_line = template.title_line();
        let title_size = Self::font_size(title_line.style);
        pages.emit_all(layout.text(&title_line.text, title_size, Align::Center))?;
        layout.skip(title_size);

        let mut count = 0usize;
        for record in records {
            for line in template.record_lines(&record) {
                pages.emit_all(layout.text(&line.text, Self::font_size(line.style), Align::Left))?;
            }
            layout.skip(Self::font_size(LineStyle::Body));
            count += 1;
        }
        pages.emit(&layout.finish())?;

        let kids = pages
            .kids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");
        let mut writer = pages.writer;
        writer.object(
            PAGES,
            &format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.kids.len()),
        )?;
        writer.object(CATALOG, &format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES))?;
        writer.finish()?;

        debug!(records = count, pages = pages.kids.len(), "Rendered PDF report");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: u64, nombre: &str) -> Record {
        serde_json::from_value(json!({
            "id": id,
            "nombre": nombre,
            "edad": 35,
            "ciudad": "Gotham",
            "poderes": ["riqueza", "intelecto"],
            "aliados": {"nombre": ["Alfred"], "tipo": "Humanos"},
            "enemigos": ["Joker"],
            "primera_aparicion": "Detective Comics 27",
            "hobbies": ["detective"],
            "activo": true
        }))
        .unwrap()
    }

    fn render(records: Vec<Record>) -> Vec<u8> {
        let mut out = Vec::new();
        PdfExporter::default()
            .export(&ReportTemplate::default(), &mut records.into_iter(), &mut out)
            .unwrap();
        out
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|w| w == needle.as_bytes())
    }

    fn count(haystack: &[u8], needle: &str) -> usize {
        haystack
            .windows(needle.len())
            .filter(|w| *w == needle.as_bytes())
            .count()
    }

    #[test]
    fn test_document_structure() {
        let pdf = render(vec![record(1, "Bruce Wayne")]);

        assert!(pdf.starts_with(b"%PDF-1.4"));
        assert!(pdf.ends_with(b"%%EOF\n"));
        assert!(contains(&pdf, "/BaseFont /Helvetica"));
        assert!(contains(&pdf, "/Type /Pages /Kids [6 0 R] /Count 1"));
    }

    #[test]
    fn test_record_fields_rendered() {
        let pdf = render(vec![record(1, "Bruce Wayne"), record(2, "Clark Kent")]);

        assert!(contains(&pdf, "(Lista de C\\363mics) Tj"));
        assert!(contains(&pdf, "(Nombre: Bruce Wayne) Tj"));
        assert!(contains(&pdf, "(Edad: 35) Tj"));
        assert!(contains(&pdf, "(Ciudad: Gotham) Tj"));
        assert!(contains(&pdf, "(Poderes: riqueza, intelecto) Tj"));

        let bruce = pdf.windows(11).position(|w| w == b"Bruce Wayne").unwrap();
        let clark = pdf.windows(10).position(|w| w == b"Clark Kent").unwrap();
        assert!(bruce < clark);
    }

    #[test]
    fn test_empty_collection_has_title_page() {
        let pdf = render(Vec::new());
        assert_eq!(count(&pdf, "/Type /Page "), 1);
        assert!(contains(&pdf, "/Count 1"));
    }

    #[test]
    fn test_many_records_paginate() {
        let records = (1..=40).map(|i| record(i, "Bruce Wayne")).collect();
        let pdf = render(records);

        let pages = count(&pdf, "/Type /Page ");
        assert!(pages > 1);
        assert!(contains(&pdf, &format!("/Count {}", pages)));
        assert_eq!(count(&pdf, "(Nombre: Bruce Wayne) Tj"), 40);
    }
}
