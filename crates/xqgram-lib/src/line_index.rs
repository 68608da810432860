//! Offset to line/column translation for diagnostics.

use text_size::TextSize;

/// Maps byte offsets to 1-based line/column pairs. Built once per parse.
pub(crate) struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub(crate) fn new(text: &str) -> Self {
        let mut line_starts = vec![0u32];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        Self { line_starts }
    }

    /// Line and column for a byte offset. Columns count characters, not
    /// bytes, so multi-byte source text positions stay meaningful.
    pub(crate) fn line_col(&self, text: &str, offset: TextSize) -> (u32, u32) {
        let offset = u32::from(offset).min(text.len() as u32);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        let line_start = self.line_starts[line] as usize;
        let column = text[line_start..offset as usize].chars().count() as u32;
        (line as u32 + 1, column + 1)
    }
}
