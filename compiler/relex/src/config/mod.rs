//! Tuning knobs for incremental re-lexing.
//!
//! Defaults suit a typical editor buffer. Embedders can override them in
//! code, or through the environment:
//!
//! ```bash
//! RELEX_CHUNK_SIZE=1024 RELEX_LOOKBEHIND=2 my-language-server
//! ```

use std::sync::OnceLock;

use relex_source::DEFAULT_CHUNK_SIZE;
use tracing::warn;

/// Default backward widening of the damage region, in bytes.
///
/// Units touching the edit are already recomputed, which covers lexers
/// that peek one byte past the end of a unit.
pub const DEFAULT_LOOKBEHIND: u32 = 0;

/// Settings for [`Reprocessor`](crate::Reprocessor) and
/// [`DocumentSession`](crate::DocumentSession).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelexConfig {
    /// Size, in bytes, of the chunks text is fed to the lexer in.
    pub chunk_size: usize,
    /// Extra bytes before an edit whose units are also recomputed.
    pub lookbehind: u32,
}

impl RelexConfig {
    pub const fn new() -> Self {
        RelexConfig {
            chunk_size: DEFAULT_CHUNK_SIZE,
            lookbehind: DEFAULT_LOOKBEHIND,
        }
    }

    /// Set the chunk size. Zero is treated as one.
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = if chunk_size == 0 { 1 } else { chunk_size };
        self
    }

    #[must_use]
    pub const fn with_lookbehind(mut self, lookbehind: u32) -> Self {
        self.lookbehind = lookbehind;
        self
    }

    /// Defaults overridden by `RELEX_CHUNK_SIZE` and `RELEX_LOOKBEHIND`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Process-wide settings, read from the environment on first use.
    pub fn global() -> &'static RelexConfig {
        static GLOBAL: OnceLock<RelexConfig> = OnceLock::new();
        GLOBAL.get_or_init(RelexConfig::from_env)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = RelexConfig::new();
        if let Some(size) = parse_var(&lookup, "RELEX_CHUNK_SIZE") {
            config = config.with_chunk_size(size);
        }
        if let Some(lookbehind) = parse_var(&lookup, "RELEX_LOOKBEHIND") {
            config = config.with_lookbehind(lookbehind);
        }
        config
    }
}

impl Default for RelexConfig {
    fn default() -> Self {
        RelexConfig::new()
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
) -> Option<T> {
    let raw = lookup(name)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = name, value = %raw, "ignoring unparseable setting");
            None
        }
    }
}
