use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{AidMateError, Result};
use crate::models::{ChatMessage, GroqRequest};
use crate::transport::Transport;

// Generation parameters are fixed; the pipeline never tunes them per request.
const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: i32 = 1024;
const TOP_P: f32 = 1.0;

#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Chat-completion client over a [`Transport`]. Sends the prompt as a single
/// user-role message and returns the first choice's text. Errors propagate to
/// the caller untouched; nothing is retried or cached here.
pub struct GroqCompleter {
    tx: Arc<dyn Transport>,
    model: String,
}

impl GroqCompleter {
    pub fn new(tx: Arc<dyn Transport>, model: String) -> Self {
        Self { tx, model }
    }
}

#[async_trait]
impl Completer for GroqCompleter {
    async fn complete(&self, prompt: &str) -> Result<String> {
        tracing::info!("Requesting completion ({} prompt bytes)", prompt.len());

        let request = GroqRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            top_p: TOP_P,
            stream: false,
        };

        let response = self.tx.chat(&request).await?;

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone()),
            None => Err(AidMateError::Completion(
                "Groq API returned empty choices".to_string(),
            )),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Choice, GroqResponse};
    use std::sync::Mutex;

    /// Mock transport that pops canned responses and records requests.
    pub(crate) struct MockTransport {
        responses: Mutex<Vec<GroqResponse>>,
        pub requests: Mutex<Vec<GroqRequest>>,
    }

    impl MockTransport {
        pub(crate) fn new(responses: Vec<GroqResponse>) -> Self {
            MockTransport {
                responses: Mutex::new(responses),
                requests: Mutex::new(vec![]),
            }
        }

        pub(crate) fn answering(text: &str) -> Self {
            Self::new(vec![GroqResponse {
                choices: vec![Choice {
                    message: ChatMessage {
                        role: "assistant".to_string(),
                        content: text.to_string(),
                    },
                }],
            }])
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn chat(&self, req: &GroqRequest) -> Result<GroqResponse> {
            self.requests
                .lock()
                .expect("mock transport mutex should not be poisoned")
                .push(req.clone());
            let mut responses = self
                .responses
                .lock()
                .expect("mock transport mutex should not be poisoned");
            if let Some(response) = responses.pop() {
                Ok(response)
            } else {
                Err(AidMateError::Completion("no more mock responses".to_string()))
            }
        }
    }

    #[tokio::test]
    async fn complete_returns_first_choice_text() {
        let transport = Arc::new(MockTransport::answering("Apply cool water."));
        let completer = GroqCompleter::new(transport, "test-model".to_string());

        let answer = completer
            .complete("prompt text")
            .await
            .expect("completion should succeed");
        assert_eq!(answer, "Apply cool water.");
    }

    #[tokio::test]
    async fn complete_sends_single_user_message_with_fixed_params() {
        let transport = Arc::new(MockTransport::answering("ok"));
        let completer = GroqCompleter::new(Arc::clone(&transport) as Arc<dyn Transport>, "test-model".to_string());
        completer
            .complete("the prompt")
            .await
            .expect("completion should succeed");

        let requests = transport.requests.lock().expect("mutex");
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.model, "test-model");
        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, "user");
        assert_eq!(req.messages[0].content, "the prompt");
        assert_eq!(req.temperature, TEMPERATURE);
        assert_eq!(req.max_tokens, MAX_TOKENS);
        assert_eq!(req.top_p, TOP_P);
        assert!(!req.stream);
    }

    #[tokio::test]
    async fn complete_empty_choices_is_completion_error() {
        let transport = Arc::new(MockTransport::new(vec![GroqResponse { choices: vec![] }]));
        let completer = GroqCompleter::new(transport, "test-model".to_string());

        let err = completer.complete("prompt").await.unwrap_err();
        assert!(matches!(err, AidMateError::Completion(_)));
    }

    #[tokio::test]
    async fn complete_transport_error_propagates() {
        let transport = Arc::new(MockTransport::new(vec![]));
        let completer = GroqCompleter::new(transport, "test-model".to_string());

        let err = completer.complete("prompt").await.unwrap_err();
        assert!(matches!(err, AidMateError::Completion(_)));
    }
}
