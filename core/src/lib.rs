//! naijaspell-core
//!
//! Text-change detection and spell-check orchestration for the Naija Pidgin
//! keyboard. The host keyboard UI renders suggestions and forwards user
//! actions; this crate owns everything between the editable-text surface and
//! the remote checker:
//!
//! - `surface`: the cursor-windowed text surface contract hosts implement
//! - `sampler`: sentence and full-document reconstruction via cursor walks
//! - `client`: the HTTP correction provider
//! - `filter`: ignore-list filtering of matches
//! - `ignore`: persisted ignore rules (in-memory and redb backends)
//! - `session`: the observable per-attachment state and its transitions
//! - `checker`: the poll loop and orchestration worker
//!
//! Public API:
//! - [`SpellChecker`] - a running session over a [`TextSurface`]
//! - [`SessionState`] - the observable state snapshot
//! - [`HttpSpellChecker`] / [`CorrectionProvider`] - correction sources
//! - [`IgnoreRuleStore`] - ignore-rule persistence
//! - [`SpellConfig`] - tunables

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod correction;
pub use correction::{Category, CheckResponse, Match, Replacement, Rule};

pub mod ignore;
pub use ignore::{
    IgnoreRule, IgnoreRuleStore, IgnoreRuleType, InMemoryIgnoreStore, RedbIgnoreStore, StoreError,
};

pub mod surface;
pub use surface::{BufferSurface, TextSurface};

pub mod sampler;
pub use sampler::DocumentSampler;

pub mod client;
pub use client::{CorrectionProvider, HttpSpellChecker, SpellCheckError};

pub mod filter;
pub use filter::filter_matches;

pub mod session;
pub use session::{SampleOutcome, SessionState};

pub mod checker;
pub use checker::SpellChecker;

/// Tunables for a spell-check session.
///
/// Loadable from TOML; every field has a default so a partial file works.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellConfig {
    /// Base URL of the check endpoint, trailing slash included.
    pub base_url: String,
    /// Language tag sent with every check.
    pub language: String,
    /// Poll-loop tick interval.
    pub poll_interval_ms: u64,
    /// Pause after each cursor move during document walks, giving the host's
    /// context window time to refresh.
    pub settle_delay_ms: u64,
    /// Timeout for one check request.
    pub request_timeout_ms: u64,
}

impl Default for SpellConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.languagetool.org/".to_string(),
            language: "pcm-NG".to_string(),
            poll_interval_ms: 3000,
            settle_delay_ms: 10,
            request_timeout_ms: 10_000,
        }
    }
}

impl SpellConfig {
    /// Load from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading config {}", path.as_ref().display()))?;
        let config = toml::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.as_ref().display()))?;
        Ok(config)
    }
}
