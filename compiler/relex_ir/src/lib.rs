//! Relex IR - position space and edit arithmetic
//!
//! This crate holds the plain-data vocabulary shared by every other relex
//! crate:
//! - [`Position`]: a (line, column, absolute offset) triple
//! - [`LineIndex`]: offset ↔ line/column lookups over a complete text
//! - [`TextChange`] and [`DamageRegion`]: which old analysis units an edit
//!   invalidates
//!
//! Everything here is pure arithmetic. Nothing allocates except
//! [`LineIndex`], and nothing fails except validated constructors.
//!
//! # Units
//!
//! Columns and offsets count bytes, matching what a lexer pulling from a
//! byte source observes. Lines are 1-based, columns and offsets 0-based.

/// Compile-time assertion that a type has a specific size.
///
/// Used to keep the hot value types from growing by accident.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

pub mod incremental;
mod line_index;
mod position;

pub use incremental::{DamageRegion, TextChange};
pub use line_index::LineIndex;
pub use position::{Position, PositionError};
