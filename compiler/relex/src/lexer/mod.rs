//! The seam between the re-lexing machinery and a language's lexer.

use std::ops::Range;

use relex_ir::Position;
use relex_source::{ChunkedSource, IterRefill, Refill, Scanner};
use relex_zipper::Cursor;
use tracing::warn;

use crate::RelexConfig;

/// A lexer that can restart at the end of any unit it produced.
///
/// The driver alternates the two methods: `skip_trivia`, then (unless the
/// input is exhausted) `next_unit`. Start and end positions are taken from
/// the scanner around `next_unit`, so trivia never belongs to a unit.
///
/// Restartability is the contract: lexing from a unit's end position must
/// produce what lexing the whole text would have produced from there on.
/// Lexers with modes spanning several units (string interpolation, nested
/// comments) must fold the mode into their units.
pub trait UnitLexer {
    type Unit: Clone;

    /// Consume whitespace, comments and anything else between units.
    fn skip_trivia<R: Refill>(&mut self, scanner: &mut Scanner<R>);

    /// Consume and return one unit. `None` ends lexing early.
    fn next_unit<R: Refill>(&mut self, scanner: &mut Scanner<R>) -> Option<Self::Unit>;
}

/// One lexed unit and where it sits in the text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LexedUnit<U> {
    pub value: U,
    pub start: Position,
    /// Position just past the unit.
    pub end: Position,
}

impl<U> LexedUnit<U> {
    /// Byte range of the unit.
    #[inline]
    pub fn range(&self) -> Range<u32> {
        self.start.offset()..self.end.offset()
    }
}

/// Lex `text` from the start.
pub fn lex_document<L: UnitLexer>(
    lexer: &mut L,
    text: &str,
    config: &RelexConfig,
) -> Cursor<LexedUnit<L::Unit>> {
    let source = ChunkedSource::new("", IterRefill::chunks_of(text, config.chunk_size));
    let mut scanner = Scanner::new(source);
    Cursor::from_sequence(lex_from(lexer, &mut scanner))
}

/// Drive `lexer` until the scanner runs dry.
pub(crate) fn lex_from<L: UnitLexer, R: Refill>(
    lexer: &mut L,
    scanner: &mut Scanner<R>,
) -> Vec<LexedUnit<L::Unit>> {
    let mut units = Vec::new();
    loop {
        lexer.skip_trivia(scanner);
        if scanner.is_eof() {
            break;
        }
        let start = scanner.position();
        let Some(value) = lexer.next_unit(scanner) else {
            break;
        };
        let end = scanner.position();
        if end.offset() == start.offset() {
            warn!(at = %start, "lexer returned a unit without consuming input");
            break;
        }
        units.push(LexedUnit { value, start, end });
    }
    units
}
