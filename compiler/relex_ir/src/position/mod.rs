//! Source positions.
//!
//! A [`Position`] names one byte of a document three ways at once: its
//! 1-based line, its 0-based byte column within that line, and its 0-based
//! absolute byte offset from the start of the document. Lexers snapshot a
//! position whenever they produce a token; the reprocessor hands a saved
//! position back to a fresh byte source to resume lexing mid-document.

use std::cmp::Ordering;
use std::fmt;

/// Error when building a position from raw coordinates.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// Lines are 1-based.
    #[error("line numbers start at 1, got 0")]
    ZeroLine,
}

/// A location in a document.
///
/// Layout: 12 bytes (`line`, `column`, `offset`, all `u32`).
///
/// Equality compares all three coordinates. Ordering is deliberately not
/// derived: [`Position::compare`] orders by (line, column) only, which is
/// the only ordering that is meaningful for synthetic positions whose
/// offset was never computed.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    line: u32,
    column: u32,
    offset: u32,
}

impl Position {
    /// First byte of a document.
    pub const START: Position = Position {
        line: 1,
        column: 0,
        offset: 0,
    };

    /// Create a position from all three coordinates.
    ///
    /// Line 0 is clamped to line 1 in release builds.
    #[inline]
    pub const fn new(line: u32, column: u32, offset: u32) -> Self {
        debug_assert!(line >= 1, "Position::new: lines are 1-based");
        Position {
            line: if line == 0 { 1 } else { line },
            column,
            offset,
        }
    }

    /// Create a position, rejecting line 0.
    ///
    /// Use this for coordinates that come from outside the process
    /// (client requests, persisted caches).
    pub fn try_new(line: u32, column: u32, offset: u32) -> Result<Self, PositionError> {
        if line == 0 {
            return Err(PositionError::ZeroLine);
        }
        Ok(Position {
            line,
            column,
            offset,
        })
    }

    /// Create a position that is not tied to a live buffer.
    ///
    /// The absolute offset is left at zero. Such positions come from
    /// directive-supplied locations and similar sources; only
    /// [`compare`](Self::compare) and [`split`](Self::split) are meaningful
    /// on them.
    #[inline]
    pub const fn synthetic(line: u32, column: u32) -> Self {
        Position::new(line, column, 0)
    }

    /// 1-based line number.
    #[inline]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// 0-based byte column from the start of the line.
    #[inline]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// 0-based byte offset from the start of the document.
    #[inline]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// Project to `(line, column)`.
    #[inline]
    pub const fn split(&self) -> (u32, u32) {
        (self.line, self.column)
    }

    /// Lexicographic comparison on `(line, column)`.
    ///
    /// Only meaningful when both positions come from the same document.
    /// Positions from unrelated documents compare without error, but the
    /// result carries no meaning.
    #[inline]
    pub fn compare(&self, other: &Position) -> Ordering {
        (self.line, self.column).cmp(&(other.line, other.column))
    }

    /// Move this position across `bytes`.
    ///
    /// The offset grows by `bytes.len()`. Every `\n` starts a new line at
    /// column 0; bytes after the last newline extend the column.
    pub fn advance(&mut self, bytes: &[u8]) {
        let len = saturate(bytes.len());
        self.offset = self.offset.saturating_add(len);

        match memchr::memrchr(b'\n', bytes) {
            None => self.column = self.column.saturating_add(len),
            Some(last) => {
                let newlines = memchr::memchr_iter(b'\n', bytes).count();
                self.line = self.line.saturating_add(saturate(newlines));
                self.column = saturate(bytes.len() - last - 1);
            }
        }
    }

    /// Return this position moved across `bytes`.
    #[inline]
    #[must_use]
    pub fn advanced(mut self, bytes: &[u8]) -> Self {
        self.advance(bytes);
        self
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::START
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.line, self.column, self.offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Documents larger than 4 GiB saturate rather than wrap.
#[inline]
fn saturate(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::Position;
    crate::static_assert_size!(Position, 12);
}
