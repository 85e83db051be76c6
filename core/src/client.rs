//! Remote spell-check client.
//!
//! Uses the `reqwest` blocking client so no async runtime is needed; the
//! orchestrator already runs each request on its own thread. One outbound
//! call per invocation, no retry, no caching: the caller deduplicates via
//! the last-checked sentence.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use crate::correction::{CheckResponse, Match};
use crate::SpellConfig;

/// Why a spell-check call failed.
#[derive(Debug, Error)]
pub enum SpellCheckError {
    /// Transport failure, timeout, or non-2xx status.
    #[error("spell check request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// 2xx response with a body we could not decode.
    #[error("spell check response malformed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Source of corrections for a sentence. Implemented by the HTTP client and
/// by test fakes.
pub trait CorrectionProvider: Send + Sync {
    fn spell_check(&self, text: &str) -> Result<Vec<Match>, SpellCheckError>;
}

/// HTTP correction provider against a LanguageTool-style endpoint.
pub struct HttpSpellChecker {
    base_url: String,
    language: String,
    client: reqwest::blocking::Client,
}

impl HttpSpellChecker {
    pub fn new(config: &SpellConfig) -> Result<Self, SpellCheckError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            language: config.language.clone(),
            client,
        })
    }

    /// The request target for `text`. Query values are percent-encoded; raw
    /// interpolation would corrupt any sentence containing `&`, `#`, or
    /// spaces.
    pub fn request_url(&self, text: &str) -> String {
        format!(
            "{}v2/check?language={}&text={}",
            self.base_url,
            urlencoding::encode(&self.language),
            urlencoding::encode(text)
        )
    }
}

impl CorrectionProvider for HttpSpellChecker {
    fn spell_check(&self, text: &str) -> Result<Vec<Match>, SpellCheckError> {
        let url = self.request_url(text);
        debug!(%url, "requesting corrections");

        let response = self.client.get(&url).send()?.error_for_status()?;
        // Decode from the raw body so transport and decode failures stay
        // distinct error variants.
        let body = response.text()?;
        let decoded: CheckResponse = serde_json::from_str(&body)?;

        debug!(matches = decoded.matches.len(), "corrections received");
        Ok(decoded.matches)
    }
}
