//! Focus cursor over a persistent sequence.
//!
//! # Layout
//!
//! ```text
//! sequence:  a b c | d e
//!                  ^ focus = 3
//! before:    [c, b, a]   (closest first)
//! after:     [d, e]
//! ```
//!
//! `focus_index() == before.len()` and `reverse(before) ++ after` is the
//! whole sequence, after every operation.
//!
//! Every operation returns a new cursor and leaves `self` untouched.
//! Unchanged nodes are shared, so an edit-reprocessing controller can keep
//! the previous analysis around while it builds the next one.

use std::fmt;

use crate::stack::{Iter, Stack};

/// Persistent zipper over a sequence of `T`.
pub struct Cursor<T> {
    before: Stack<T>,
    after: Stack<T>,
}

impl<T> Cursor<T> {
    /// Empty cursor.
    pub const fn new() -> Self {
        Cursor {
            before: Stack::new(),
            after: Stack::new(),
        }
    }

    /// Cursor over `items` with the focus at index 0.
    pub fn from_sequence(items: impl IntoIterator<Item = T>) -> Self {
        Cursor {
            before: Stack::new(),
            after: Stack::from_front(items),
        }
    }

    /// Cursor over `items` with the focus after the last element.
    pub fn from_sequence_at_end(items: impl IntoIterator<Item = T>) -> Self {
        Cursor {
            before: Stack::from_back(items),
            after: Stack::new(),
        }
    }

    /// Number of elements before the focus.
    #[inline]
    pub fn focus_index(&self) -> usize {
        self.before.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the focus is at index 0.
    #[inline]
    pub fn at_start(&self) -> bool {
        self.before.len() == 0
    }

    /// Returns `true` if the focus is past the last element.
    #[inline]
    pub fn at_end(&self) -> bool {
        self.after.len() == 0
    }

    /// Element just after the focus.
    #[inline]
    pub fn current(&self) -> Option<&T> {
        self.after.peek()
    }

    /// Element just before the focus.
    #[inline]
    pub fn previous(&self) -> Option<&T> {
        self.before.peek()
    }

    /// Elements before the focus, closest first.
    pub fn before(&self) -> Iter<'_, T> {
        self.before.iter()
    }

    /// Elements after the focus, in order.
    pub fn after(&self) -> Iter<'_, T> {
        self.after.iter()
    }

    /// The whole sequence, in order.
    ///
    /// Buffers references to the elements before the focus, so this costs
    /// O(focus) up front. Hot paths that can work outward from the focus
    /// should use [`before`](Self::before) and [`after`](Self::after).
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        let mut prefix: Vec<&T> = self.before.iter().collect();
        prefix.reverse();
        prefix.into_iter().chain(self.after.iter())
    }

    /// Place `value` immediately before the focus and move the focus past
    /// it. O(1).
    #[must_use]
    pub fn insert_at_focus(&self, value: T) -> Self {
        Cursor {
            before: self.before.push(value),
            after: self.after.clone(),
        }
    }

    /// Replace everything after the focus with `items`.
    #[must_use]
    pub fn replace_suffix(&self, items: impl IntoIterator<Item = T>) -> Self {
        Cursor {
            before: self.before.clone(),
            after: Stack::from_front(items),
        }
    }

    /// Drop everything after the focus.
    #[must_use]
    pub fn truncate_after_focus(&self) -> Self {
        self.replace_suffix(std::iter::empty())
    }
}

impl<T: Clone> Cursor<T> {
    /// Move the focus by `n` elements, forward for positive `n`.
    ///
    /// Stops at either end instead of failing; seeking further past a
    /// boundary leaves the cursor where it is.
    #[must_use]
    pub fn seek(&self, n: isize) -> Self {
        if n >= 0 {
            self.forward(n.unsigned_abs())
        } else {
            self.backward(n.unsigned_abs())
        }
    }

    /// Move the focus to `index`, clamped to `len()`.
    #[must_use]
    pub fn seek_to(&self, index: usize) -> Self {
        let focus = self.focus_index();
        if index >= focus {
            self.forward(index - focus)
        } else {
            self.backward(focus - index)
        }
    }

    fn forward(&self, steps: usize) -> Self {
        let mut before = self.before.clone();
        let mut after = self.after.clone();
        for _ in 0..steps {
            let Some((value, rest)) = after.split_first() else {
                break;
            };
            before = before.push(value.clone());
            after = rest;
        }
        Cursor { before, after }
    }

    fn backward(&self, steps: usize) -> Self {
        let mut before = self.before.clone();
        let mut after = self.after.clone();
        for _ in 0..steps {
            let Some((value, rest)) = before.split_first() else {
                break;
            };
            after = after.push(value.clone());
            before = rest;
        }
        Cursor { before, after }
    }

    /// The whole sequence, in order.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Clone for Cursor<T> {
    fn clone(&self) -> Self {
        Cursor {
            before: self.before.clone(),
            after: self.after.clone(),
        }
    }
}

impl<T> Default for Cursor<T> {
    fn default() -> Self {
        Cursor::new()
    }
}

impl<T> FromIterator<T> for Cursor<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Cursor::from_sequence(iter)
    }
}

/// Equal when both hold the same sequence with the focus at the same index.
impl<T: PartialEq> PartialEq for Cursor<T> {
    fn eq(&self, other: &Self) -> bool {
        self.focus_index() == other.focus_index()
            && self.len() == other.len()
            && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Cursor<T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("focus", &self.focus_index())
            .field("before", &self.before)
            .field("after", &self.after)
            .finish()
    }
}
