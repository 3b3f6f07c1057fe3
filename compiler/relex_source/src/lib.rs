//! Byte sources for resumable lexing.
//!
//! A lexer inside an editor cannot assume the whole buffer is one
//! contiguous string, nor that it always starts at byte 0. This crate gives
//! it a [`ChunkedSource`] to pull from: text arrives lazily from a
//! [`Refill`] producer, and the source keeps the [`Position`] of the next
//! unread byte so that lexing can later resume from any recorded position.
//!
//! [`Scanner`] layers peek/bump on top for lexers that need lookahead.
//!
//! # Ownership
//!
//! One reader per source. Nothing here locks or blocks; the producer runs
//! inline on the caller's thread.
//!
//! [`Position`]: relex_ir::Position

mod chunked;
mod error;
mod refill;
mod scanner;

pub use chunked::{ChunkedSource, NoRefill, Refill};
pub use error::SourceError;
pub use refill::{IterRefill, ReaderRefill, TextChunks, DEFAULT_CHUNK_SIZE};
pub use scanner::Scanner;
