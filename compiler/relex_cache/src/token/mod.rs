//! Non-owning identity tokens.
//!
//! A cache that stores "result derived from buffer X" must be able to ask
//! later "is X still the buffer I am being asked about?" without keeping X
//! alive; holding X would pin every superseded buffer after an edit.
//!
//! [`StalenessToken`] holds a [`Weak`] to the value it was created from.
//! The weak count keeps the *allocation* reserved (not the value), so no
//! other `Arc` can ever reuse that address while the token exists, and a
//! pointer comparison is an exact identity test.

use std::fmt;
use std::sync::{Arc, Weak};

/// Identity witness for an `Arc<T>` that does not extend its lifetime.
pub struct StalenessToken<T: ?Sized> {
    target: Weak<T>,
}

impl<T: ?Sized> StalenessToken<T> {
    /// Bind a token to `value`'s identity.
    pub fn new(value: &Arc<T>) -> Self {
        StalenessToken {
            target: Arc::downgrade(value),
        }
    }

    /// Returns `true` iff the original value is still live and `candidate`
    /// is that very value.
    ///
    /// Structural equality is irrelevant: an equal but distinct `Arc` does
    /// not match. Once the original has been reclaimed nothing matches.
    pub fn matches(&self, candidate: &Arc<T>) -> bool {
        // `candidate` holds a strong reference, so if it points at our
        // allocation the original is necessarily live.
        std::ptr::addr_eq(self.target.as_ptr(), Arc::as_ptr(candidate))
    }

    /// Returns `true` while the original value has not been reclaimed.
    pub fn is_live(&self) -> bool {
        self.target.strong_count() > 0
    }
}

impl<T: ?Sized> Clone for StalenessToken<T> {
    fn clone(&self) -> Self {
        StalenessToken {
            target: Weak::clone(&self.target),
        }
    }
}

impl<T: ?Sized> fmt::Debug for StalenessToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StalenessToken")
            .field("live", &self.is_live())
            .finish()
    }
}

#[cfg(test)]
mod tests;
