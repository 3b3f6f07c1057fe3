//! Persistent zipper for incremental reuse.
//!
//! After an edit, an edit-reprocessing controller keeps the prefix of
//! previously computed units that the edit did not touch and recomputes
//! the rest:
//!
//! ```
//! use relex_zipper::Cursor;
//!
//! let old = Cursor::from_sequence(["fn", "main", "(", ")", "{", "}"]);
//! // Units from index 2 on were invalidated; splice in fresh ones.
//! let new = old.seek_to(2).replace_suffix(["(", "x", ")", "{", "}"]);
//!
//! assert_eq!(new.to_vec(), ["fn", "main", "(", "x", ")", "{", "}"]);
//! assert_eq!(old.len(), 6); // the previous analysis is still intact
//! ```
//!
//! Cursors are immutable values. Clones are O(1) and share structure, so
//! they are cheap to keep around as snapshots.

mod cursor;
mod stack;

pub use cursor::Cursor;
pub use stack::Iter;
