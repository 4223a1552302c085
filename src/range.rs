//! Documents and line-range selection
//!
//! A [`Document`] is the tab-normalized, line-split form of the input. A
//! [`LineRange`] parsed from `start-end` narrows it to an [`Excerpt`] that
//! remembers the absolute number of its first line so the gutter can show
//! the true source line numbers.

use crate::error::{Error, Result};

/// Source text split into lines with tabs expanded to spaces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Split `text` into lines and expand every tab to `tab_width` spaces.
    ///
    /// A trailing line terminator does not produce an extra empty line and
    /// `\r\n` endings are treated like `\n`.
    pub fn new(text: &str, tab_width: usize) -> Self {
        let indent = " ".repeat(tab_width);
        let lines = text.lines().map(|line| line.replace('\t', &indent)).collect();
        Self { lines }
    }

    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The document joined back together with `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Slice out the inclusive, 1-indexed `range`, clamped to this document.
    pub fn select(&self, range: LineRange) -> Result<Excerpt> {
        let start = range.start.max(1);
        let end = range.end.min(self.lines.len() as i64);
        if start > end {
            return Err(Error::Range {
                start: start as usize,
                end: end.max(0) as usize,
            });
        }

        let (start, end) = (start as usize, end as usize);
        Ok(Excerpt {
            document: Document::from_lines(self.lines[start - 1..end].to_vec()),
            start_line: start,
        })
    }

    /// The whole document as an excerpt starting at line 1.
    pub fn whole(self) -> Excerpt {
        Excerpt {
            document: self,
            start_line: 1,
        }
    }
}

/// An inclusive `start-end` range over 1-indexed lines, as typed by the user.
///
/// Bounds are kept signed and unclamped until [`Document::select`] knows the
/// document length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: i64,
    pub end: i64,
}

impl LineRange {
    /// Parse `"<start>-<end>"`.
    pub fn parse(raw: &str) -> Result<Self> {
        let parts: Vec<&str> = raw.split('-').collect();
        if parts.len() != 2 {
            return Err(Error::Format(raw.to_string()));
        }

        let start = parts[0].parse::<i64>();
        let end = parts[1].parse::<i64>();
        match (start, end) {
            (Ok(start), Ok(end)) => Ok(Self { start, end }),
            _ => Err(Error::Format(raw.to_string())),
        }
    }
}

impl std::str::FromStr for LineRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// The subset of a document that gets rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    pub document: Document,
    /// Absolute line number of the first line in `document`
    pub start_line: usize,
}

/// Parse `raw` and apply it to `document` in one step.
pub fn select(document: &Document, raw: &str) -> Result<Excerpt> {
    let range = LineRange::parse(raw)?;
    document.select(range)
}
