use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tempfile::NamedTempFile;

use crate::error::{AidMateError, Result};
use crate::models::Language;

pub const AUDIO_MIME: &str = "audio/mp3";

/// Synthesized speech for one answer. The MP3 lives in a temp file owned by
/// this handle; dropping the artifact removes the file, so audio never
/// accumulates across requests.
#[derive(Debug)]
pub struct AudioArtifact {
    bytes: Vec<u8>,
    file: NamedTempFile,
}

impl AudioArtifact {
    fn new(bytes: Vec<u8>) -> Result<Self> {
        let mut file = NamedTempFile::with_suffix(".mp3")
            .map_err(|e| AidMateError::Synthesis(format!("cannot create temp file: {e}")))?;
        file.write_all(&bytes)
            .map_err(|e| AidMateError::Synthesis(format!("cannot write audio file: {e}")))?;
        Ok(Self { bytes, file })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Base64 payload for an inline `<audio>` element.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

#[async_trait]
pub trait SpeechEngine: Send + Sync {
    async fn synthesize(&self, text: &str, language: Language) -> Result<AudioArtifact>;
}

/// Speech client for the Google Translate TTS endpoint. One GET per answer;
/// the voice follows the detected language's locale code.
pub struct GoogleTtsEngine {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTtsEngine {
    pub fn new(endpoint: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AidMateError::Synthesis(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl SpeechEngine for GoogleTtsEngine {
    async fn synthesize(&self, text: &str, language: Language) -> Result<AudioArtifact> {
        tracing::info!(
            "Synthesizing {} bytes of text with voice '{}'",
            text.len(),
            language.code()
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language.code()),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| AidMateError::Synthesis(format!("TTS request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AidMateError::Synthesis(format!(
                "TTS service returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AidMateError::Synthesis(format!("failed to read TTS body: {e}")))?;

        AudioArtifact::new(bytes.to_vec())
    }
}
