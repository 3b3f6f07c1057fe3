//! Incremental re-lexing after an edit.
//!
//! Units that end before the damaged region are reused as they are; the
//! lexer restarts at the end of the last of them and rebuilds the rest of
//! the document. The previous unit list is a persistent [`Cursor`], so the
//! kept prefix is shared with it rather than copied.
//!
//! Units after the edit are relexed too. A lexer may carry state across
//! units, and comparing the fresh stream against the old one to find a
//! resynchronisation point costs about as much as lexing.

use relex_ir::{DamageRegion, Position, TextChange};
use relex_source::{ChunkedSource, IterRefill, Scanner};
use relex_zipper::Cursor;
use tracing::{debug, warn};

use crate::ambient::current_document;
use crate::lexer::{lex_document, lex_from, LexedUnit, UnitLexer};
use crate::RelexConfig;

/// How much work an incremental relex did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RelexStats {
    /// Units carried over from the previous list.
    pub reused: usize,
    /// Units produced by the lexer.
    pub relexed: usize,
}

impl RelexStats {
    /// Fraction of the new unit list that was reused (0.0 to 1.0).
    #[allow(clippy::cast_precision_loss)] // unit counts stay far below 2^52
    pub fn reuse_rate(&self) -> f64 {
        let total = self.reused + self.relexed;
        if total == 0 {
            return 0.0;
        }
        self.reused as f64 / total as f64
    }
}

/// Result of [`Reprocessor::relex`].
#[derive(Clone, Debug)]
pub struct Relexed<U> {
    /// Units of the new text, focused on the first relexed unit.
    pub units: Cursor<LexedUnit<U>>,
    /// Where the lexer restarted.
    pub resume: Position,
    pub stats: RelexStats,
}

/// Owns a lexer and relexes documents with it.
#[derive(Debug)]
pub struct Reprocessor<L> {
    lexer: L,
    config: RelexConfig,
}

impl<L: UnitLexer> Reprocessor<L> {
    pub fn new(lexer: L, config: RelexConfig) -> Self {
        Reprocessor { lexer, config }
    }

    #[inline]
    pub fn config(&self) -> &RelexConfig {
        &self.config
    }

    pub fn lexer_mut(&mut self) -> &mut L {
        &mut self.lexer
    }

    /// Lex `text` from scratch.
    pub fn lex(&mut self, text: &str) -> Cursor<LexedUnit<L::Unit>> {
        lex_document(&mut self.lexer, text, &self.config)
    }

    /// Bring `previous`, the units of the text before `change`, up to date
    /// with `new_text`.
    ///
    /// The returned cursor is focused just past the reused prefix, so
    /// consumers can start their own incremental work from there.
    pub fn relex(
        &mut self,
        previous: &Cursor<LexedUnit<L::Unit>>,
        change: &TextChange,
        new_text: &str,
    ) -> Relexed<L::Unit> {
        let damage = DamageRegion::from_change(change, self.config.lookbehind);
        let keep = reusable_prefix(previous, &damage);
        let kept = previous.seek_to(keep);
        let resume = kept.previous().map_or(Position::START, |unit| unit.end);

        let Some(rest) = usize::try_from(resume.offset())
            .ok()
            .and_then(|offset| new_text.get(offset..))
        else {
            warn!(
                document = ?current_document(),
                resume = %resume,
                "resume point is not a character boundary of the new text; lexing from scratch"
            );
            let units = self.lex(new_text);
            let stats = RelexStats {
                reused: 0,
                relexed: units.len(),
            };
            return Relexed {
                units,
                resume: Position::START,
                stats,
            };
        };

        let source = ChunkedSource::starting_at(
            "",
            IterRefill::chunks_of(rest, self.config.chunk_size),
            resume,
        );
        let mut scanner = Scanner::new(source);
        let fresh = lex_from(&mut self.lexer, &mut scanner);

        let stats = RelexStats {
            reused: keep,
            relexed: fresh.len(),
        };
        debug!(
            document = ?current_document(),
            resume = %resume,
            reused = stats.reused,
            relexed = stats.relexed,
            "relexed after edit"
        );
        Relexed {
            units: kept.replace_suffix(fresh),
            resume,
            stats,
        }
    }
}

/// Number of leading units the damage leaves untouched.
///
/// Units are in document order, so the reusable ones form a prefix. Walks
/// outward from the focus without materialising the sequence.
fn reusable_prefix<U>(units: &Cursor<LexedUnit<U>>, damage: &DamageRegion) -> usize {
    let reusable = |unit: &&LexedUnit<U>| damage.is_before(unit.range());
    // `before` yields closest first: damaged units, then reusable ones.
    let behind = units.before().skip_while(|unit| !reusable(unit)).count();
    if behind < units.focus_index() {
        return behind;
    }
    behind + units.after().take_while(reusable).count()
}

#[cfg(test)]
mod tests;
