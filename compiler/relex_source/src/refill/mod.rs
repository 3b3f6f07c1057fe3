//! Chunk producers for [`ChunkedSource`](crate::ChunkedSource).
//!
//! - [`IterRefill`]: any iterator of chunks, finite or infinite, consumed
//!   lazily and safe to abandon part way.
//! - [`ReaderRefill`]: any [`std::io::Read`], decoded as UTF-8 with
//!   multi-byte sequences kept whole across chunk boundaries.

use std::io::{self, Read};

use tracing::warn;

use crate::{Refill, SourceError};

/// Default number of bytes a [`ReaderRefill`] asks its reader for.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Adapts an iterator of chunks into a [`Refill`].
///
/// Empty items are skipped rather than treated as end of input; the input
/// ends when the iterator does.
#[derive(Clone, Debug)]
pub struct IterRefill<I> {
    iter: I,
}

impl<I> IterRefill<I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
        IterRefill {
            iter: iter.into_iter(),
        }
    }
}

impl<'a> IterRefill<TextChunks<'a>> {
    /// Feed `text` in chunks of about `size` bytes.
    pub fn chunks_of(text: &'a str, size: usize) -> Self {
        IterRefill::new(TextChunks::new(text, size))
    }
}

impl<I> Refill for IterRefill<I>
where
    I: Iterator,
    I::Item: Into<String>,
{
    fn next_chunk(&mut self) -> String {
        self.iter
            .by_ref()
            .map(Into::into)
            .find(|chunk: &String| !chunk.is_empty())
            .unwrap_or_default()
    }
}

/// Splits a string into pieces of at least `size` bytes (the last may be
/// shorter), never cutting a UTF-8 sequence.
#[derive(Clone, Debug)]
pub struct TextChunks<'a> {
    rest: &'a str,
    size: usize,
}

impl<'a> TextChunks<'a> {
    /// A `size` of zero is treated as one.
    pub fn new(text: &'a str, size: usize) -> Self {
        TextChunks {
            rest: text,
            size: size.max(1),
        }
    }
}

impl<'a> Iterator for TextChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let mut end = self.size.min(self.rest.len());
        while !self.rest.is_char_boundary(end) {
            end += 1;
        }
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}

/// Reads chunks from an [`io::Read`].
///
/// A read or decode failure ends the input; the error is kept for the
/// embedder to collect with [`take_error`](Self::take_error).
#[derive(Debug)]
pub struct ReaderRefill<R> {
    reader: R,
    chunk_size: usize,
    /// Incomplete UTF-8 sequence left over from the previous read.
    carry: Vec<u8>,
    /// Bytes handed out so far, for error offsets.
    delivered: u64,
    error: Option<SourceError>,
    done: bool,
}

impl<R: Read> ReaderRefill<R> {
    pub fn new(reader: R) -> Self {
        ReaderRefill::with_chunk_size(reader, DEFAULT_CHUNK_SIZE)
    }

    /// A `chunk_size` of zero is treated as one.
    pub fn with_chunk_size(reader: R, chunk_size: usize) -> Self {
        ReaderRefill {
            reader,
            chunk_size: chunk_size.max(1),
            carry: Vec::new(),
            delivered: 0,
            error: None,
            done: false,
        }
    }

    /// The failure that ended the input, if any.
    pub fn take_error(&mut self) -> Option<SourceError> {
        self.error.take()
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_some(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.reader.read(buf) {
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                result => return result,
            }
        }
    }

    fn deliver(&mut self, text: String) -> String {
        self.delivered += text.len() as u64;
        text
    }

    fn fail(&mut self, error: SourceError) -> String {
        warn!(error = %error, delivered = self.delivered, "chunk reader failed, ending input");
        self.error = Some(error);
        self.done = true;
        String::new()
    }
}

impl<R: Read> Refill for ReaderRefill<R> {
    fn next_chunk(&mut self) -> String {
        if self.done {
            return String::new();
        }
        loop {
            let mut buf = std::mem::take(&mut self.carry);
            let carried = buf.len();
            buf.resize(carried + self.chunk_size, 0);

            let read = match self.read_some(&mut buf[carried..]) {
                Ok(n) => n,
                Err(err) => return self.fail(SourceError::Io(err)),
            };
            buf.truncate(carried + read);

            if read == 0 {
                if carried > 0 {
                    let offset = self.delivered;
                    return self.fail(SourceError::InvalidUtf8 { offset });
                }
                self.done = true;
                return String::new();
            }

            match String::from_utf8(buf) {
                Ok(text) => return self.deliver(text),
                Err(err) => {
                    let utf8 = err.utf8_error();
                    let valid = utf8.valid_up_to();
                    if utf8.error_len().is_some() {
                        let offset = self.delivered + valid as u64;
                        return self.fail(SourceError::InvalidUtf8 { offset });
                    }
                    // Truncated sequence at the end: hold it for the next read.
                    let mut bytes = err.into_bytes();
                    self.carry = bytes.split_off(valid);
                    if valid == 0 {
                        continue;
                    }
                    match String::from_utf8(bytes) {
                        Ok(text) => return self.deliver(text),
                        Err(_) => {
                            let offset = self.delivered;
                            return self.fail(SourceError::InvalidUtf8 { offset });
                        }
                    }
                }
            }
        }
    }
}
