//! Name of the document currently being lexed.
//!
//! Set by [`DocumentSession`](crate::DocumentSession) around every lex, so
//! lexers and log lines deep in the pipeline can say which document they
//! belong to. Each thread has its own cell; a session runs on one thread.

use std::sync::Arc;

use relex_scope::DynamicCell;

thread_local! {
    static CURRENT_DOCUMENT: DynamicCell<Option<Arc<str>>> = const { DynamicCell::new(None) };
}

/// Name of the document being processed on this thread, if any.
pub fn current_document() -> Option<Arc<str>> {
    CURRENT_DOCUMENT.with(DynamicCell::get)
}

/// Run `body` with `name` as the current document.
pub fn with_document<R>(name: &Arc<str>, body: impl FnOnce() -> R) -> R {
    CURRENT_DOCUMENT.with(|cell| cell.override_with(Some(Arc::clone(name)), body))
}
