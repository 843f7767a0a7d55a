use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::{AidMateError, Result};
use crate::models::{GroqRequest, GroqResponse};

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

#[async_trait]
pub trait Transport: Send + Sync {
    async fn chat(&self, req: &GroqRequest) -> Result<GroqResponse>;
}

/// HTTP transport for the Groq chat-completion API. One attempt per call,
/// no retries; the bounded client timeout is the only protection against a
/// hung endpoint.
pub struct GroqTransport {
    client: Client,
    api_key: String,
}

impl GroqTransport {
    pub fn new(api_key: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AidMateError::Completion(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl Transport for GroqTransport {
    async fn chat(&self, req: &GroqRequest) -> Result<GroqResponse> {
        let response = self
            .client
            .post(GROQ_API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(req)
            .send()
            .await
            .map_err(|e| AidMateError::Completion(format!("request to Groq API failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(AidMateError::Completion(format!(
                "Groq API returned {status}: {body}"
            )));
        }

        response.json().await.map_err(|e| {
            AidMateError::Completion(format!("failed to parse Groq API response: {e}"))
        })
    }
}
