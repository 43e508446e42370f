//! Low-level PDF object writer.
//!
//! Objects are written in whatever order they become available; the
//! cross-reference table at the end records every offset.

use std::io::{self, Write};

/// Object number of the document catalog.
pub(crate) const CATALOG: u32 = 1;
/// Object number of the page tree root.
pub(crate) const PAGES: u32 = 2;
/// Object number of the Helvetica font resource.
pub(crate) const FONT: u32 = 3;
/// Object number of the document information dictionary.
pub(crate) const INFO: u32 = 4;

/// Writes numbered objects and tracks their byte offsets.
pub(crate) struct PdfWriter<W> {
    sink: W,
    position: u64,
    offsets: Vec<Option<u64>>,
    next_id: u32,
}

impl<W: Write> PdfWriter<W> {
    /// Start a document, writing the header.
    pub(crate) fn new(sink: W) -> io::Result<Self> {
        let mut writer = Self {
            sink,
            position: 0,
            offsets: Vec::new(),
            next_id: INFO + 1,
        };
        writer.raw(b"%PDF-1.4\n%\xe2\xe3\xcf\xd3\n")?;
        Ok(writer)
    }

    /// Reserve the next free object number.
    pub(crate) fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn raw(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.sink.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    fn record_offset(&mut self, id: u32) {
        let index = id as usize;
        if self.offsets.len() <= index {
            self.offsets.resize(index + 1, None);
        }
        self.offsets[index] = Some(self.position);
    }

    /// Write a dictionary object.
    pub(crate) fn object(&mut self, id: u32, dictionary: &str) -> io::Result<()> {
        self.record_offset(id);
        self.raw(format!("{} 0 obj\n{}\nendobj\n", id, dictionary).as_bytes())
    }

    /// Write a stream object holding `content`.
    pub(crate) fn stream(&mut self, id: u32, content: &[u8]) -> io::Result<()> {
        self.record_offset(id);
        self.raw(format!("{} 0 obj\n<< /Length {} >>\nstream\n", id, content.len()).as_bytes())?;
        self.raw(content)?;
        self.raw(b"\nendstream\nendobj\n")
    }

    /// Write the cross-reference table and trailer, returning the sink.
    pub(crate) fn finish(mut self) -> io::Result<W> {
        let size = self.offsets.len().max(self.next_id as usize);
        let xref_at = self.position;

        let mut table = format!("xref\n0 {}\n0000000000 65535 f \n", size);
        for id in 1..size {
            match self.offsets.get(id).copied().flatten() {
                Some(offset) => table.push_str(&format!("{:010} 00000 n \n", offset)),
                None => table.push_str("0000000000 65535 f \n"),
            }
        }
        table.push_str(&format!(
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            size, CATALOG, INFO, xref_at
        ));
        self.raw(table.as_bytes())?;
        self.sink.flush()?;

        Ok(self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(haystack: &[u8], needle: &str) -> Option<usize> {
        haystack
            .windows(needle.len())
            .position(|w| w == needle.as_bytes())
    }

    #[test]
    fn test_offsets_point_at_objects() {
        let mut writer = PdfWriter::new(Vec::new()).unwrap();
        writer.object(FONT, "<< /Type /Font >>").unwrap();
        let id = writer.allocate();
        writer.stream(id, b"BT ET").unwrap();
        let bytes = writer.finish().unwrap();

        let font_at = find(&bytes, "3 0 obj").unwrap();
        assert!(find(&bytes, &format!("{:010} 00000 n \n", font_at)).is_some());
        assert!(find(&bytes, "<< /Length 5 >>").is_some());
        assert!(bytes.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn test_startxref_matches_table() {
        let writer = PdfWriter::new(Vec::new()).unwrap();
        let bytes = writer.finish().unwrap();

        let xref_at = find(&bytes, "xref\n").unwrap();
        assert!(find(&bytes, &format!("startxref\n{}\n", xref_at)).is_some());
    }
}
