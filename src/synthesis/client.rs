//! `SpeechSynthesizer` trait and the `VoicevoxClient` HTTP implementation.
//!
//! The engine is driven in two steps: `POST /audio_query` turns text into an
//! editable [`AudioQuery`], `POST /synthesis` turns the (tuned) query into
//! WAV bytes.  Connection details come from [`SynthesisConfig`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SynthesisConfig;
use crate::synthesis::query::AudioQuery;
use crate::tuning::SynthesisParameters;

// ---------------------------------------------------------------------------
// SynthesisError
// ---------------------------------------------------------------------------

/// Errors that can occur while talking to the synthesis engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    /// The configured base URL cannot be joined with an endpoint path.
    #[error("invalid engine URL: {0}")]
    InvalidUrl(String),

    /// Transport failure or a non-success status.
    #[error("synthesis request failed: {0}")]
    RequestFailed(String),

    /// The response body was not what the endpoint promises.
    #[error("invalid engine response: {0}")]
    InvalidResponse(String),

    /// The request did not complete within the configured timeout.
    #[error("synthesis request timed out")]
    Timeout,
}

impl From<reqwest::Error> for SynthesisError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SynthesisError::Timeout
        } else {
            SynthesisError::RequestFailed(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Speaker
// ---------------------------------------------------------------------------

/// A voice style selectable by its `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerStyle {
    pub name: String,
    pub id: u32,
}

/// A speaker as listed by `GET /speakers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    #[serde(default)]
    pub speaker_uuid: String,
    #[serde(default)]
    pub styles: Vec<SpeakerStyle>,
}

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Async text-to-speech backend.
///
/// Implementors must be `Send + Sync` so they can be shared with the
/// readout task as `Arc<dyn SpeechSynthesizer>`.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Build the engine's synthesis query for `text`.
    async fn create_query(&self, text: &str, speaker: u32) -> Result<AudioQuery, SynthesisError>;

    /// Render `query` to WAV bytes.
    async fn synthesize(&self, query: &AudioQuery, speaker: u32) -> Result<Vec<u8>, SynthesisError>;

    /// Voices the engine offers.
    async fn speakers(&self) -> Result<Vec<Speaker>, SynthesisError>;

    /// Query, merge `params`, then render.
    async fn synthesize_text(
        &self,
        text: &str,
        speaker: u32,
        params: &SynthesisParameters,
    ) -> Result<Vec<u8>, SynthesisError> {
        let mut query = self.create_query(text, speaker).await?;
        query.apply(params);
        self.synthesize(&query, speaker).await
    }
}

// ---------------------------------------------------------------------------
// VoicevoxClient
// ---------------------------------------------------------------------------

/// HTTP client for a VOICEVOX-compatible engine.
pub struct VoicevoxClient {
    client: reqwest::Client,
    base_url: Url,
}

impl VoicevoxClient {
    /// Build a client for `base_url` with a per-request `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SynthesisError> {
        // A trailing slash makes `Url::join` append rather than replace.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalized)
            .map_err(|e| SynthesisError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(SynthesisError::InvalidUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SynthesisError::RequestFailed(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Build a client from application config.
    pub fn from_config(config: &SynthesisConfig) -> Result<Self, SynthesisError> {
        Self::new(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, SynthesisError> {
        self.base_url
            .join(path)
            .map_err(|e| SynthesisError::InvalidUrl(format!("{path}: {e}")))
    }

    async fn checked(
        path: &str,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SynthesisError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(SynthesisError::RequestFailed(format!(
            "{path} returned {status}: {}",
            body.trim()
        )))
    }
}

#[async_trait]
impl SpeechSynthesizer for VoicevoxClient {
    async fn create_query(&self, text: &str, speaker: u32) -> Result<AudioQuery, SynthesisError> {
        let url = self.endpoint("audio_query")?;
        let speaker = speaker.to_string();
        let response = self
            .client
            .post(url)
            .query(&[("text", text), ("speaker", speaker.as_str())])
            .send()
            .await?;
        let response = Self::checked("audio_query", response).await?;

        let query: AudioQuery = response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))?;
        log::debug!(
            "synthesis: query for {} chars has {} accent phrases",
            text.chars().count(),
            query.accent_phrases.len()
        );
        Ok(query)
    }

    async fn synthesize(&self, query: &AudioQuery, speaker: u32) -> Result<Vec<u8>, SynthesisError> {
        let url = self.endpoint("synthesis")?;
        let response = self
            .client
            .post(url)
            .query(&[("speaker", speaker)])
            .json(query)
            .send()
            .await?;
        let response = Self::checked("synthesis", response).await?;

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(SynthesisError::InvalidResponse("empty audio body".into()));
        }
        log::debug!("synthesis: received {} bytes of audio", audio.len());
        Ok(audio.to_vec())
    }

    async fn speakers(&self) -> Result<Vec<Speaker>, SynthesisError> {
        let url = self.endpoint("speakers")?;
        let response = self.client.get(url).send().await?;
        let response = Self::checked("speakers", response).await?;
        response
            .json()
            .await
            .map_err(|e| SynthesisError::InvalidResponse(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
