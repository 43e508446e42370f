//! Line placement and pagination.

use std::fmt::Write as _;

use crate::encoding::{literal, text_width};

/// Leading as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Align {
    Left,
    Center,
}

/// Places lines top to bottom and cuts pages when they fill up.
pub(crate) struct Layout {
    width: f32,
    height: f32,
    margin: f32,
    y: f32,
    content: Vec<u8>,
}

impl Layout {
    pub(crate) fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
            y: height - margin,
            content: Vec::new(),
        }
    }

    fn usable_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    fn start_page(&mut self) -> Vec<u8> {
        self.y = self.height - self.margin;
        std::mem::take(&mut self.content)
    }

    /// Place `text`, wrapping it to the usable width. Returns the content
    /// of every page completed along the way.
    pub(crate) fn text(&mut self, text: &str, size: f32, align: Align) -> Vec<Vec<u8>> {
        let mut finished = Vec::new();
        let leading = size * LINE_HEIGHT;

        for line in wrap(text, size, self.usable_width()) {
            if self.y - leading < self.margin {
                finished.push(self.start_page());
            }
            self.y -= leading;

            let x = match align {
                Align::Left => self.margin,
                Align::Center => self.margin + (self.usable_width() - text_width(&line, size)) / 2.0,
            };

            let mut op = String::new();
            let _ = write!(op, "BT /F1 {:.2} Tf {:.2} {:.2} Td ", size, x.max(self.margin), self.y);
            self.content.extend_from_slice(op.as_bytes());
            self.content.extend_from_slice(&literal(&line));
            self.content.extend_from_slice(b" Tj ET\n");
        }

        finished
    }

    /// Leave one blank line of `size` points.
    pub(crate) fn skip(&mut self, size: f32) {
        self.y -= size * LINE_HEIGHT;
    }

    /// Content of the last page.
    pub(crate) fn finish(self) -> Vec<u8> {
        self.content
    }
}

/// Greedy word wrap. Words wider than a line are split by character.
fn wrap(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if text_width(&candidate, size) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        for c in word.chars() {
            current.push(c);
            if text_width(&current, size) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::replace(&mut current, c.to_string()));
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}
