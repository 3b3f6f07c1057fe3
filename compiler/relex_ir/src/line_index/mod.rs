//! Line-start table for offset ↔ line/column conversion.
//!
//! Built once per text snapshot in O(n); each lookup is a binary search
//! over line starts, O(log L).

use crate::Position;

/// Byte offset of every line start in a text.
///
/// ```
/// use relex_ir::{LineIndex, Position};
///
/// let index = LineIndex::new("let a\nlet b\n");
/// assert_eq!(index.position_at(8), Position::new(2, 2, 8));
/// assert_eq!(index.offset_of(2, 2), Some(8));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineIndex {
    /// `starts[0] == 0`; `starts[i]` is the byte after the i-th newline.
    starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    /// Scan `text` for newlines.
    pub fn new(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut starts = Vec::with_capacity(bytes.len() / 32 + 1);
        starts.push(0);
        starts.extend(
            memchr::memchr_iter(b'\n', bytes).map(|nl| u32::try_from(nl + 1).unwrap_or(u32::MAX)),
        );
        LineIndex {
            starts,
            len: u32::try_from(bytes.len()).unwrap_or(u32::MAX),
        }
    }

    /// Number of lines. A trailing newline opens one more (empty) line.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Length of the indexed text in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Returns `true` if the indexed text was empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Full position of a byte offset. Offsets past the end clamp to the end.
    pub fn position_at(&self, offset: u32) -> Position {
        let offset = offset.min(self.len);
        let line_idx = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        let line_start = self.starts.get(line_idx).copied().unwrap_or(0);
        let line = u32::try_from(line_idx + 1).unwrap_or(u32::MAX);
        Position::new(line, offset - line_start, offset)
    }

    /// Absolute offset of a `(line, column)` pair.
    ///
    /// Returns `None` if the line does not exist or the column runs past the
    /// line's end (the newline byte itself counts as part of the line).
    pub fn offset_of(&self, line: u32, column: u32) -> Option<u32> {
        let line_idx = usize::try_from(line.checked_sub(1)?).ok()?;
        let start = *self.starts.get(line_idx)?;
        let end = self
            .starts
            .get(line_idx + 1)
            .map_or(self.len, |next| next - 1);
        let offset = start.checked_add(column)?;
        (offset <= end).then_some(offset)
    }

    /// Fill in the offset of a position built from line/column alone.
    pub fn resolve(&self, position: Position) -> Option<Position> {
        let (line, column) = position.split();
        let offset = self.offset_of(line, column)?;
        Some(Position::new(line, column, offset))
    }
}

#[cfg(test)]
mod tests;
