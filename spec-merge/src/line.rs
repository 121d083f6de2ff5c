//! Line tokenization.
//!
//! The merge engine works on ordered sequences of lines. Whether a line
//! was followed by a newline in the source file is kept as metadata, not
//! as part of the line content, so that lines compare by content alone.

use std::hash::{Hash, Hasher};

/// A single line of text, without its trailing newline.
#[derive(Debug, Clone, Eq)]
pub struct Line {
    content: String,
    newline: bool,
}

impl Line {
    /// Creates a line from its content and trailing-newline flag.
    pub fn new(content: impl Into<String>, newline: bool) -> Self {
        Line {
            content: content.into(),
            newline,
        }
    }

    /// Returns the line content, without any trailing newline.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns true if a newline followed this line in the source file.
    pub fn has_newline(&self) -> bool {
        self.newline
    }
}

// Lines are compared by content only; the newline flag is metadata.
impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.content == other.content
    }
}

impl Hash for Line {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.content.hash(state);
    }
}

/// An ordered sequence of lines, one per input file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSequence {
    lines: Vec<Line>,
}

impl LineSequence {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        LineSequence { lines: Vec::new() }
    }

    /// Splits text into a line sequence, recording trailing-newline
    /// presence per line. The empty string tokenizes to an empty
    /// sequence.
    pub fn tokenize(text: &str) -> Self {
        let mut lines = Vec::new();
        for chunk in text.split_inclusive('\n') {
            match chunk.strip_suffix('\n') {
                Some(stripped) => lines.push(Line::new(stripped, true)),
                None => lines.push(Line::new(chunk, false)),
            }
        }
        LineSequence { lines }
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the sequence has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns all lines as a slice.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Returns the line at the given index.
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Returns the lines in the given range.
    ///
    /// Out-of-bounds ranges are clamped rather than panicking; the merge
    /// engine only produces in-bounds ranges.
    pub fn slice(&self, range: std::ops::Range<usize>) -> &[Line] {
        let start = range.start.min(self.lines.len());
        let end = range.end.min(self.lines.len()).max(start);
        &self.lines[start..end]
    }

    /// Appends a line.
    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Appends a run of lines.
    pub fn extend_from_slice(&mut self, lines: &[Line]) {
        self.lines.extend_from_slice(lines);
    }

    /// Returns true if the last line was followed by a newline.
    /// An empty sequence reports false.
    pub fn trailing_newline(&self) -> bool {
        self.lines.last().is_some_and(Line::has_newline)
    }

    /// Renders the sequence back to text. Every line is terminated with
    /// a newline except the last, which follows the caller's convention.
    pub fn render(&self, trailing_newline: bool) -> String {
        let mut out = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            out.push_str(line.content());
            if i + 1 < self.lines.len() || trailing_newline {
                out.push('\n');
            }
        }
        out
    }
}
