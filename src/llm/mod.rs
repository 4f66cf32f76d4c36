//! # Recommendation adapter
//!
//! Translates a [`Profile`](crate::profile::Profile) into one outbound call
//! to a generative-text endpoint and the reply into a typed
//! [`Recommendation`]. Two submodules:
//! - `send`: prompt construction and the HTTP transport
//! - `receive`: reply parsing, validation, and the fixed fallback
//!
//! ## Architecture
//!
//! ```text
//! Profile → send::build_prompt → CompletionClient::complete → raw text
//!         → receive::parse_reply → Recommendation (or fallback)
//! ```
//!
//! Transport failures and empty replies surface as [`AdapterError`]; a
//! malformed reply never does. It is silently replaced by the fallback
//! payload so the flow cannot dead-end on bad model output.

pub mod receive;
pub mod send;

pub use receive::{fallback_recommendation, parse_reply, BestOption, Insights, RankedCity, Recommendation};
pub use send::{build_prompt, CompletionClient, HttpCompletionClient};

use crate::config::Config;
use crate::profile::Profile;
use thiserror::Error;
use tracing::{debug, instrument};

/// Failures that reach the caller. Parse failures deliberately never do.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// The call failed at the network layer or returned a non-success status.
    #[error("API request failed: {reason}")]
    Transport { reason: String },

    /// The endpoint answered, but no usable text came back.
    #[error("no response generated from the API")]
    EmptyResponse,
}

/// The adapter: one configured client, one operation.
pub struct Recommender<C: CompletionClient> {
    client: C,
}

impl Recommender<HttpCompletionClient> {
    pub fn new(config: Config) -> Self {
        Self {
            client: HttpCompletionClient::new(config),
        }
    }
}

impl<C: CompletionClient> Recommender<C> {
    /// Wraps an alternative transport (tests use scripted clients).
    pub fn with_client(client: C) -> Self {
        Self { client }
    }

    /// One round trip: prompt → endpoint → parsed result or fallback.
    /// No retries; a failure is reported once and the user may resubmit.
    #[instrument(skip(self, profile))]
    pub async fn recommend(&self, profile: &Profile) -> Result<Recommendation, AdapterError> {
        let prompt = send::build_prompt(profile);
        debug!(chars = prompt.len(), "prompt built");
        let raw = self.client.complete(&prompt).await?;
        Ok(receive::parse_reply(&raw))
    }
}
