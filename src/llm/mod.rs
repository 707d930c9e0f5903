//! LLM provider abstraction.
//!
//! `LlmProvider` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! Provider instances are shared immutable capabilities — clone them freely.
//! Async is delegated to the underlying provider; the `complete` method is
//! `async fn` on the enum so callers need no trait-object machinery.
//!
//! Every failure mode of a completion call — transport error, non-success
//! status, malformed or empty body — collapses into [`ProviderError::Request`].
//! Callers get one error to handle, not a taxonomy.

pub mod providers;

use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("provider request failed: {0}")]
    Request(String),
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
///
/// Enum dispatch avoids `dyn` trait objects and the `async-trait` dependency.
/// Adding a backend = new module + new variant + new `complete` arm.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Dummy(providers::dummy::DummyProvider),
    Gemini(providers::gemini::GeminiProvider),
    /// Always errors — exercises the failure path without a network.
    #[cfg(test)]
    Failing(FailingProvider),
}

impl LlmProvider {
    /// Send `prompt` to the provider and return its text reply.
    ///
    /// One outbound request per call: no retry, no cache, no rate limiting.
    pub async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        match self {
            LlmProvider::Dummy(p) => p.complete(prompt).await,
            LlmProvider::Gemini(p) => p.complete(prompt).await,
            #[cfg(test)]
            LlmProvider::Failing(p) => p.complete(prompt).await,
        }
    }
}

// ── Test provider ─────────────────────────────────────────────────────────────

#[cfg(test)]
#[derive(Debug, Clone)]
pub struct FailingProvider;

#[cfg(test)]
impl FailingProvider {
    pub async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Request("simulated outage".into()))
    }
}
