//! Staleness detection for cached analysis results.
//!
//! - [`StalenessToken`]: "was this derived from *that* object?" without
//!   keeping the object alive
//! - [`DerivedCache`]: keyed results guarded by such tokens
//!
//! After an edit the editor replaces the authoritative buffer with a new
//! one. Results derived from the old buffer must stop being served, and the
//! old buffer must be free to go once nothing else uses it. Identity, not
//! equality, decides: an unchanged re-sent buffer is still a new object.

mod derived;
mod token;

pub use derived::{CacheStats, DerivedCache};
pub use token::StalenessToken;
