//! Edit arithmetic for incremental re-lexing.
//!
//! An editor reports an edit as "bytes `[start, old_end)` of the old text
//! were replaced by `new_len` bytes". [`TextChange`] carries exactly that.
//! [`DamageRegion`] widens the change backward by a lookbehind distance and
//! answers, for each previously lexed unit, whether it survives the edit
//! untouched.

use std::ops::Range;

/// A single replacement in a document, in old-text byte offsets.
///
/// ```
/// use relex_ir::TextChange;
///
/// let change = TextChange::replace(4, 3, 5);
/// assert_eq!(change.old_end, 7);
/// assert_eq!(change.new_end(), 9);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextChange {
    /// Start byte offset in the old text.
    pub start: u32,
    /// End byte offset in the old text (exclusive).
    pub old_end: u32,
    /// Length of the replacement in bytes.
    pub new_len: u32,
}

impl TextChange {
    #[inline]
    pub const fn new(start: u32, old_end: u32, new_len: u32) -> Self {
        TextChange {
            start,
            old_end,
            new_len,
        }
    }

    /// Insert `len` bytes at `at`.
    #[inline]
    pub const fn insert(at: u32, len: u32) -> Self {
        TextChange::new(at, at, len)
    }

    /// Remove `len` bytes starting at `start`.
    #[inline]
    pub const fn delete(start: u32, len: u32) -> Self {
        TextChange::new(start, start + len, 0)
    }

    /// Replace `old_len` bytes at `start` with `new_len` bytes.
    #[inline]
    pub const fn replace(start: u32, old_len: u32, new_len: u32) -> Self {
        TextChange::new(start, start + old_len, new_len)
    }

    /// Describe replacing `range` of the old text with `replacement`.
    pub fn from_replacement(range: Range<u32>, replacement: &str) -> Self {
        let new_len = u32::try_from(replacement.len()).unwrap_or(u32::MAX);
        TextChange::new(range.start, range.end, new_len)
    }

    /// Bytes removed from the old text.
    #[inline]
    pub const fn old_len(&self) -> u32 {
        self.old_end - self.start
    }

    /// End of the replacement in the new text.
    #[inline]
    pub const fn new_end(&self) -> u32 {
        self.start + self.new_len
    }
}

/// Old-text byte range whose units must be recomputed after an edit.
///
/// A unit ending exactly at `start` counts as damaged: inserted text may
/// extend it, and the lexer that produced it may have peeked at the byte
/// that changed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct DamageRegion {
    /// Start of the damage in the old text (change start minus lookbehind).
    pub start: u32,
    /// End of the damage in the old text (exclusive).
    pub end: u32,
}

impl DamageRegion {
    /// Widen `change` backward by `lookbehind` bytes.
    ///
    /// Lexers whose units depend on more than one byte of lookahead need a
    /// larger lookbehind so that units which peeked into the edit are
    /// recomputed.
    pub fn from_change(change: &TextChange, lookbehind: u32) -> Self {
        DamageRegion {
            start: change.start.saturating_sub(lookbehind),
            end: change.old_end,
        }
    }

    /// Returns `true` if the old-text unit `[unit.start, unit.end)` ends
    /// before the damage and is reusable as is.
    #[inline]
    pub fn is_before(&self, unit: Range<u32>) -> bool {
        unit.end < self.start
    }
}
