//! Dynamically scoped cells for ambient context.
//!
//! Deeply nested analysis code often needs to see context that its callers
//! set up ("the document being lexed", "options in effect for this pass")
//! without that context being threaded through every signature. A
//! [`DynamicCell`] holds one current value; [`DynamicCell::override_with`]
//! installs a new value for the dynamic extent of a closure and puts the
//! old one back when the closure ends, however it ends.
//!
//! # Usage
//!
//! ```
//! use relex_scope::DynamicCell;
//!
//! static PASS: DynamicCell<&str> = DynamicCell::new("idle");
//!
//! fn report() -> String {
//!     format!("running in {}", PASS.get())
//! }
//!
//! let msg = PASS.override_with("lex", report);
//! assert_eq!(msg, "running in lex");
//! assert_eq!(PASS.get(), "idle");
//! ```
//!
//! # Nesting
//!
//! Overrides nest strictly: each one restores exactly the value that was
//! current when it was installed, which is the value installed by the next
//! outer override. The cell assumes a single logical thread of control;
//! two threads overriding the same cell at once interleave their restores.
//!
//! # Failure
//!
//! The prior value is restored when the body returns and when a panic
//! unwinds out of it. A `Result` returned by the body is handed back
//! unchanged.

use std::cell::RefCell;
use std::fmt;

use parking_lot::ReentrantMutex;
use tracing::trace;

/// A process-wide cell with scoped override and guaranteed restore.
///
/// The lock is held only to swap or read the value, never while a body
/// runs, so bodies may read the cell and nest further overrides freely.
/// The lock is reentrant: code running under [`with`](Self::with) may read
/// the cell again, and an override attempted there panics instead of
/// deadlocking.
pub struct DynamicCell<T> {
    value: ReentrantMutex<RefCell<T>>,
}

impl<T> DynamicCell<T> {
    /// Create a cell holding `initial`. Usable in `static` items.
    pub const fn new(initial: T) -> Self {
        DynamicCell {
            value: parking_lot::const_reentrant_mutex(RefCell::new(initial)),
        }
    }

    /// Current value.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.value.lock().borrow().clone()
    }

    /// Borrow the current value without cloning it.
    ///
    /// The value stays borrowed while `f` runs. `f` may read the cell;
    /// overriding it from inside `f` panics.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.value.lock();
        let value = guard.borrow();
        f(&value)
    }

    /// Run `body` with `value` installed, then restore the prior value.
    ///
    /// (`override` is a reserved word.)
    pub fn override_with<R>(&self, value: T, body: impl FnOnce() -> R) -> R {
        let _restore = self.scoped(value);
        body()
    }

    /// Install `value` until the returned guard is dropped.
    ///
    /// For overrides that must span `?`-propagating code. Guards on the same
    /// cell must be dropped in the reverse order of creation.
    pub fn scoped(&self, value: T) -> OverrideGuard<'_, T> {
        let prior = self.value.lock().replace(value);
        trace!("dynamic cell overridden");
        OverrideGuard {
            cell: self,
            prior: Some(prior),
        }
    }

    fn restore(&self, prior: T) {
        // Drop the displaced value after unlocking; its destructor may read
        // the cell.
        let displaced = self.value.lock().replace(prior);
        trace!("dynamic cell restored");
        drop(displaced);
    }
}

impl<T: Default> Default for DynamicCell<T> {
    fn default() -> Self {
        DynamicCell::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(guard) = self.value.try_lock() else {
            return f.write_str("DynamicCell(<locked>)");
        };
        let result = match guard.try_borrow() {
            Ok(value) => f.debug_tuple("DynamicCell").field(&*value).finish(),
            Err(_) => f.write_str("DynamicCell(<locked>)"),
        };
        result
    }
}

/// Restores a [`DynamicCell`]'s prior value on drop.
#[must_use = "the override ends as soon as the guard is dropped"]
pub struct OverrideGuard<'a, T> {
    cell: &'a DynamicCell<T>,
    prior: Option<T>,
}

impl<T> Drop for OverrideGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(prior) = self.prior.take() {
            self.cell.restore(prior);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for OverrideGuard<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideGuard")
            .field("prior", &self.prior)
            .finish_non_exhaustive()
    }
}
