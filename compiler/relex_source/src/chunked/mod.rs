//! Pull-based byte source over lazily produced text chunks.
//!
//! [`ChunkedSource`] decouples where text comes from (a [`Refill`]
//! producer: a buffer snapshot, a file, an edit-patched string) from how a
//! lexer consumes it ([`ChunkedSource::pull`]). It tracks the [`Position`]
//! of the next unread byte across chunk boundaries, so a lexer can snapshot
//! token positions, and a later source can be started at a saved position
//! to resume lexing mid-document.
//!
//! # End of input
//!
//! The producer ends the input by returning an empty chunk. A source never
//! asks again after that; only [`reposition`](ChunkedSource::reposition) or
//! [`reset`](ChunkedSource::reset) clear the end-of-input state. A producer
//! that may have nothing *yet* must block or buffer on its own side rather
//! than return an empty chunk.

use std::fmt;
use std::io;

use relex_ir::Position;
use tracing::{debug, trace};

/// Producer of the next chunk of text.
///
/// Called on demand, any number of times. An empty chunk means end of
/// input.
pub trait Refill {
    fn next_chunk(&mut self) -> String;
}

impl<F> Refill for F
where
    F: FnMut() -> String,
{
    #[inline]
    fn next_chunk(&mut self) -> String {
        self()
    }
}

/// Refill for sources whose whole text is the initial chunk.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoRefill;

impl Refill for NoRefill {
    #[inline]
    fn next_chunk(&mut self) -> String {
        String::new()
    }
}

/// Chunked, refillable byte source for a lexer.
///
/// Exactly one reader pulls from a source at a time. Each [`pull`] returns
/// bytes from the current chunk only; when the chunk runs out the
/// producer is asked for the next one.
///
/// [`pull`]: ChunkedSource::pull
pub struct ChunkedSource<R> {
    chunk: String,
    /// Read cursor inside `chunk`.
    read: usize,
    /// Position of `chunk[read]`; its offset is the cumulative offset.
    position: Position,
    /// Set once the producer returned an empty chunk.
    exhausted: bool,
    refill: R,
}

impl<R: Refill> ChunkedSource<R> {
    /// Create a source at the start of a document.
    pub fn new(initial: impl Into<String>, refill: R) -> Self {
        ChunkedSource::starting_at(initial, refill, Position::START)
    }

    /// Create a source that resumes mid-document at `start`.
    ///
    /// `initial` must hold the document's bytes beginning exactly at
    /// `start.offset()`; the source cannot check this.
    pub fn starting_at(initial: impl Into<String>, refill: R, start: Position) -> Self {
        let chunk = initial.into();
        trace!(start = ?start, len = chunk.len(), "chunked source created");
        ChunkedSource {
            chunk,
            read: 0,
            position: start,
            exhausted: false,
            refill,
        }
    }

    /// Copy up to `buf.len()` bytes from the current chunk into `buf`.
    ///
    /// Returns the number of bytes written. Zero means end of input (or an
    /// empty `buf`, which consumes nothing).
    pub fn pull(&mut self, buf: &mut [u8]) -> usize {
        if buf.is_empty() {
            return 0;
        }
        if self.read == self.chunk.len() && !self.advance_chunk() {
            return 0;
        }

        let available = &self.chunk.as_bytes()[self.read..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.position.advance(&available[..n]);
        self.read += n;
        n
    }

    /// Ask the producer for the next chunk. Returns `false` at end of input.
    fn advance_chunk(&mut self) -> bool {
        if self.exhausted {
            return false;
        }
        let chunk = self.refill.next_chunk();
        if chunk.is_empty() {
            trace!(offset = self.position.offset(), "end of input");
            self.exhausted = true;
            return false;
        }
        trace!(
            offset = self.position.offset(),
            len = chunk.len(),
            "refilled chunk"
        );
        self.chunk = chunk;
        self.read = 0;
        true
    }

    /// Drop unread bytes and continue from `position`.
    ///
    /// The next [`pull`](Self::pull) asks the producer for a chunk, which
    /// must start at `position.offset()`. Already consumed chunks are not
    /// retained, so there is no seeking backward into them.
    pub fn reposition(&mut self, position: Position) {
        debug!(
            from = ?self.position,
            to = ?position,
            discarded = self.chunk.len() - self.read,
            "repositioned chunked source"
        );
        self.chunk.clear();
        self.read = 0;
        self.exhausted = false;
        self.position = position;
    }

    /// Reposition to `position` with a fresh initial chunk aligned to it.
    pub fn reset(&mut self, position: Position, initial: impl Into<String>) {
        self.reposition(position);
        self.chunk = initial.into();
    }
}

impl<R> ChunkedSource<R> {
    /// Position of the next unread byte.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Cumulative absolute offset of the next unread byte.
    #[inline]
    pub fn offset(&self) -> u32 {
        self.position.offset()
    }

    /// Returns `true` once the producer has signalled end of input.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Unread bytes of the current chunk.
    #[inline]
    pub fn buffered(&self) -> &[u8] {
        &self.chunk.as_bytes()[self.read..]
    }

    pub fn refill_mut(&mut self) -> &mut R {
        &mut self.refill
    }

    pub fn into_refill(self) -> R {
        self.refill
    }
}

impl<R: Refill> io::Read for ChunkedSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(self.pull(buf))
    }
}

impl<R> fmt::Debug for ChunkedSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkedSource")
            .field("position", &self.position)
            .field("buffered", &(self.chunk.len() - self.read))
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}
