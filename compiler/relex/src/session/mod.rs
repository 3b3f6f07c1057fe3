//! One open document: its text, its units, and edits against them.

use std::ops::Range;
use std::sync::Arc;

use relex_cache::{CacheStats, DerivedCache};
use relex_ir::TextChange;
use relex_zipper::Cursor;
use tracing::{debug, info};

use crate::ambient::with_document;
use crate::lexer::{LexedUnit, UnitLexer};
use crate::reprocess::{RelexStats, Reprocessor};
use crate::RelexConfig;

/// Rejected edit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("edit range {start}..{end} is reversed")]
    Reversed { start: u32, end: u32 },
    #[error("edit range {start}..{end} is outside the document ({len} bytes)")]
    OutOfBounds { start: u32, end: u32, len: usize },
    #[error("edit range {start}..{end} splits a character")]
    NotCharBoundary { start: u32, end: u32 },
    #[error("edited document would exceed {max} bytes", max = u32::MAX)]
    TooLarge,
}

/// Units of a document, keyed by document name and guarded by the text
/// snapshot they were lexed from.
type UnitCache<U> = DerivedCache<Arc<str>, str, Cursor<LexedUnit<U>>>;

/// An open document kept lexed across edits.
///
/// Every edit produces a new text snapshot. Snapshots handed out by
/// [`text`](Self::text) stay valid (they are immutable) but go stale:
/// [`cached_units`](Self::cached_units) answers only for the current one.
pub struct DocumentSession<L: UnitLexer> {
    name: Arc<str>,
    text: Arc<str>,
    units: Cursor<LexedUnit<L::Unit>>,
    version: u64,
    reprocessor: Reprocessor<L>,
    cache: UnitCache<L::Unit>,
}

impl<L: UnitLexer> DocumentSession<L> {
    /// Lex `text` in full and start tracking it.
    pub fn open(
        name: impl Into<Arc<str>>,
        text: impl Into<Arc<str>>,
        lexer: L,
        config: RelexConfig,
    ) -> Self {
        let name = name.into();
        let text = text.into();
        let mut reprocessor = Reprocessor::new(lexer, config);
        let units = with_document(&name, || reprocessor.lex(&text));
        info!(document = %name, bytes = text.len(), units = units.len(), "opened document");

        let mut cache = DerivedCache::new();
        cache.insert(Arc::clone(&name), &text, units.clone());
        DocumentSession {
            name,
            text,
            units,
            version: 0,
            reprocessor,
            cache,
        }
    }

    /// Replace the bytes in `range` with `replacement` and relex.
    pub fn apply(
        &mut self,
        range: Range<u32>,
        replacement: &str,
    ) -> Result<RelexStats, SessionError> {
        let (start, end) = self.check_range(&range)?;
        let new_len = self.text.len() - (end - start) + replacement.len();
        if u32::try_from(new_len).is_err() {
            return Err(SessionError::TooLarge);
        }

        let mut new_text = String::with_capacity(new_len);
        new_text.push_str(&self.text[..start]);
        new_text.push_str(replacement);
        new_text.push_str(&self.text[end..]);
        let snapshot: Arc<str> = Arc::from(new_text);

        let change = TextChange::from_replacement(range, replacement);
        let reprocessor = &mut self.reprocessor;
        let previous = &self.units;
        let relexed = with_document(&self.name, || {
            reprocessor.relex(previous, &change, &snapshot)
        });

        self.cache
            .insert(Arc::clone(&self.name), &snapshot, relexed.units.clone());
        self.text = snapshot;
        self.units = relexed.units;
        self.version += 1;
        debug!(
            document = %self.name,
            version = self.version,
            reused = relexed.stats.reused,
            relexed = relexed.stats.relexed,
            "applied edit"
        );
        Ok(relexed.stats)
    }

    /// Replace the whole text and lex it from scratch.
    pub fn replace_all(&mut self, text: impl Into<Arc<str>>) {
        let text = text.into();
        let reprocessor = &mut self.reprocessor;
        let units = with_document(&self.name, || reprocessor.lex(&text));
        self.cache
            .insert(Arc::clone(&self.name), &text, units.clone());
        self.text = text;
        self.units = units;
        self.version += 1;
        debug!(document = %self.name, version = self.version, "replaced document text");
    }

    fn check_range(&self, range: &Range<u32>) -> Result<(usize, usize), SessionError> {
        let (start, end) = (range.start, range.end);
        if start > end {
            return Err(SessionError::Reversed { start, end });
        }
        let len = self.text.len();
        let out_of_bounds = SessionError::OutOfBounds { start, end, len };
        let (Ok(lo), Ok(hi)) = (usize::try_from(start), usize::try_from(end)) else {
            return Err(out_of_bounds);
        };
        if hi > len {
            return Err(out_of_bounds);
        }
        if !self.text.is_char_boundary(lo) || !self.text.is_char_boundary(hi) {
            return Err(SessionError::NotCharBoundary { start, end });
        }
        Ok((lo, hi))
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current text snapshot.
    #[inline]
    pub fn text(&self) -> &Arc<str> {
        &self.text
    }

    /// Units of the current text, focused on the first unit the last edit
    /// relexed.
    #[inline]
    pub fn units(&self) -> &Cursor<LexedUnit<L::Unit>> {
        &self.units
    }

    /// Number of edits applied since the document was opened.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Units lexed from `snapshot`, or `None` if `snapshot` is no longer
    /// the current text.
    pub fn cached_units(&mut self, snapshot: &Arc<str>) -> Option<Arc<Cursor<LexedUnit<L::Unit>>>> {
        self.cache.get(&self.name, snapshot)
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn config(&self) -> &RelexConfig {
        self.reprocessor.config()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
