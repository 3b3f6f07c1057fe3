//! Incremental re-lexing of edited documents.
//!
//! Ties the lower layers together:
//!
//! - [`relex_source`] feeds a [`UnitLexer`] from text chunks and keeps the
//!   [`Position`] of every unit it produces.
//! - [`relex_zipper`] holds the unit list as a persistent [`Cursor`], so
//!   an edit rebuilds only the suffix after the last undamaged unit.
//! - [`relex_cache`] remembers which buffer snapshot a unit list was
//!   derived from.
//! - [`relex_scope`] carries the name of the document being processed to
//!   code that never sees it as a parameter.
//!
//! [`DocumentSession`] is the usual entry point:
//!
//! ```
//! use relex::testing::{Word, WordLexer};
//! use relex::{DocumentSession, RelexConfig};
//!
//! let mut doc = DocumentSession::open("main.rl", "let x = 1", WordLexer, RelexConfig::default());
//! let stats = doc.apply(8..9, "42").unwrap();
//! assert_eq!(&**doc.text(), "let x = 42");
//! assert_eq!(doc.units().to_vec().last().map(|u| u.value.clone()), Some(Word::Number("42".into())));
//! assert_eq!(stats.reused, 3);
//! ```
//!
//! [`Position`]: relex_ir::Position
//! [`Cursor`]: relex_zipper::Cursor

mod ambient;
mod config;
mod lexer;
mod reprocess;
mod session;
pub mod testing;

pub use ambient::{current_document, with_document};
pub use config::{RelexConfig, DEFAULT_LOOKBEHIND};
pub use lexer::{lex_document, LexedUnit, UnitLexer};
pub use reprocess::{RelexStats, Relexed, Reprocessor};
pub use session::{DocumentSession, SessionError};

pub use relex_ir::{Position, TextChange};
pub use relex_zipper::Cursor;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and only the first call has any
/// effect. Output goes to stderr.
///
/// ```bash
/// RUST_LOG=relex=debug my-language-server
/// RUST_LOG=relex_source=trace,relex=debug my-language-server
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        // The embedder may already have installed a subscriber.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .try_init();
    });
}
