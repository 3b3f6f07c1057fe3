//! Failures of chunk producers.

use std::io;

/// Why a [`ReaderRefill`](crate::ReaderRefill) ended its input early.
///
/// A [`ChunkedSource`](crate::ChunkedSource) itself never fails; the
/// producer records the failure and reports end of input instead.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read source chunk: {0}")]
    Io(#[from] io::Error),
    /// `offset` counts bytes from where the reader started.
    #[error("source is not valid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: u64 },
}
