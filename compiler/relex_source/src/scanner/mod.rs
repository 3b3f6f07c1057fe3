//! Peekable byte reader over a [`ChunkedSource`].
//!
//! Lexers want `peek`/`bump`, not `pull`. The scanner pulls ahead into a
//! small window and keeps its own [`Position`] for the next *unconsumed*
//! byte, which trails the source's position by whatever is still in the
//! window.

use relex_ir::Position;

use crate::{ChunkedSource, Refill};

/// Bytes requested from the source per pull.
const DEFAULT_PULL_SIZE: usize = 256;

/// Lookahead reader for lexers.
#[derive(Debug)]
pub struct Scanner<R> {
    source: ChunkedSource<R>,
    /// Pulled bytes; `window[head..]` are not yet consumed.
    window: Vec<u8>,
    head: usize,
    position: Position,
    pull_size: usize,
}

impl<R: Refill> Scanner<R> {
    pub fn new(source: ChunkedSource<R>) -> Self {
        Scanner::with_pull_size(source, DEFAULT_PULL_SIZE)
    }

    /// A `pull_size` of zero is treated as one.
    pub fn with_pull_size(source: ChunkedSource<R>, pull_size: usize) -> Self {
        let position = source.position();
        Scanner {
            source,
            window: Vec::new(),
            head: 0,
            position,
            pull_size: pull_size.max(1),
        }
    }

    /// Make at least `need` unconsumed bytes available. Returns `false` if
    /// the input ends first.
    fn fill(&mut self, need: usize) -> bool {
        while self.window.len() - self.head < need {
            if self.head > 0 {
                self.window.drain(..self.head);
                self.head = 0;
            }
            let len = self.window.len();
            self.window.resize(len + self.pull_size, 0);
            let n = self.source.pull(&mut self.window[len..]);
            self.window.truncate(len + n);
            if n == 0 {
                return false;
            }
        }
        true
    }

    /// Next unconsumed byte.
    #[inline]
    pub fn peek(&mut self) -> Option<u8> {
        self.peek_nth(0)
    }

    /// Byte `n` places past the next unconsumed one.
    pub fn peek_nth(&mut self, n: usize) -> Option<u8> {
        let need = n.checked_add(1)?;
        if self.fill(need) {
            Some(self.window[self.head + n])
        } else {
            None
        }
    }

    /// Consume one byte.
    pub fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.head += 1;
        self.position.advance(&[byte]);
        Some(byte)
    }

    /// Consume `byte` if it is next.
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume bytes while `pred` holds; returns them.
    pub fn eat_while(&mut self, mut pred: impl FnMut(u8) -> bool) -> Vec<u8> {
        let mut taken = Vec::new();
        while let Some(byte) = self.peek() {
            if !pred(byte) {
                break;
            }
            self.head += 1;
            taken.push(byte);
        }
        self.position.advance(&taken);
        taken
    }

    /// Returns `true` once every byte has been consumed.
    pub fn is_eof(&mut self) -> bool {
        self.peek().is_none()
    }
}

impl<R> Scanner<R> {
    /// Position of the next unconsumed byte.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn source(&self) -> &ChunkedSource<R> {
        &self.source
    }

    /// Give back the source. Bytes still in the lookahead window are lost;
    /// reposition the source to [`position`](Self::position) to reread them.
    pub fn into_source(self) -> ChunkedSource<R> {
        self.source
    }
}
