use std::sync::Arc;
use std::time::Duration;

use crate::completion::{Completer, GroqCompleter};
use crate::config::Config;
use crate::detect::detect_language;
use crate::error::Result;
use crate::knowledge::KnowledgeStore;
use crate::models::{EmergencyRecord, Language};
use crate::prompt::build_prompt;
use crate::speech::{AudioArtifact, GoogleTtsEngine, SpeechEngine};
use crate::transport::{GroqTransport, Transport};

/// Everything one request produces. `audio` is `None` when synthesis failed;
/// the answer text survives regardless.
#[derive(Debug)]
pub struct Guidance {
    pub language: Language,
    pub matches: Vec<EmergencyRecord>,
    pub answer: String,
    pub audio: Option<AudioArtifact>,
}

/// The end-to-end first-aid pipeline: detect language, look up matching
/// records, build the prompt, get a completion, synthesize speech.
pub struct AidMateService {
    store: &'static KnowledgeStore,
    completer: Arc<dyn Completer>,
    speech: Arc<dyn SpeechEngine>,
}

impl AidMateService {
    pub fn new(cfg: &Config) -> Result<Self> {
        let store = KnowledgeStore::global(&cfg.knowledge.path)?;

        let transport = Arc::new(GroqTransport::new(
            cfg.groq.api_key.clone(),
            Duration::from_secs(cfg.groq.timeout_seconds),
        )?);
        let completer = Arc::new(GroqCompleter::new(
            Arc::clone(&transport) as Arc<dyn Transport>,
            cfg.groq.model.clone(),
        ));
        let speech = Arc::new(GoogleTtsEngine::new(
            cfg.speech.endpoint.clone(),
            Duration::from_secs(cfg.speech.timeout_seconds),
        )?);

        Ok(Self {
            store,
            completer,
            speech,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_parts(
        store: &'static KnowledgeStore,
        completer: Arc<dyn Completer>,
        speech: Arc<dyn SpeechEngine>,
    ) -> Self {
        Self {
            store,
            completer,
            speech,
        }
    }

    /// Run one query through the whole pipeline. Completion failure aborts the
    /// request; synthesis failure degrades to text-only output.
    pub async fn answer(&self, query: &str) -> Result<Guidance> {
        let language = detect_language(query);
        tracing::info!("Handling query in {:?}: {}", language, query);

        let matches = self.store.search(query);
        tracing::info!("Knowledge lookup matched {} record(s)", matches.len());

        let prompt = build_prompt(query, &matches, language);
        let answer = self.completer.complete(&prompt).await?;

        let audio = match self.speech.synthesize(&answer, language).await {
            Ok(artifact) => Some(artifact),
            Err(e) => {
                tracing::warn!("Speech synthesis failed, serving text only: {e}");
                None
            }
        };

        Ok(Guidance {
            language,
            matches,
            answer,
            audio,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::tests::MockTransport;
    use crate::error::AidMateError;
    use crate::speech::tests::MockSpeechEngine;
    use serde_json::json;
    use std::sync::OnceLock;

    fn test_store() -> &'static KnowledgeStore {
        static STORE: OnceLock<KnowledgeStore> = OnceLock::new();
        STORE.get_or_init(|| {
            let records = vec![
                serde_json::from_value(json!({
                    "emergency_type": "Severe Burn",
                    "steps": ["Cool with water", "Cover loosely"]
                }))
                .expect("test record"),
            ];
            KnowledgeStore::from_records(records)
        })
    }

    fn service(transport: Arc<MockTransport>, speech: Arc<MockSpeechEngine>) -> AidMateService {
        let completer = Arc::new(GroqCompleter::new(
            transport as Arc<dyn Transport>,
            "test-model".to_string(),
        ));
        AidMateService::with_parts(test_store(), completer, speech)
    }

    #[tokio::test]
    async fn answer_runs_full_pipeline() {
        let transport = Arc::new(MockTransport::answering("Run cool water over the burn."));
        let speech = Arc::new(MockSpeechEngine::succeeding());
        let svc = service(Arc::clone(&transport), Arc::clone(&speech));

        let guidance = svc.answer("burn").await.expect("pipeline should succeed");

        assert_eq!(guidance.language, Language::English);
        assert_eq!(guidance.matches.len(), 1);
        assert_eq!(guidance.answer, "Run cool water over the burn.");
        assert!(guidance.audio.is_some());

        // The prompt that went out carries the matched context.
        let requests = transport.requests.lock().expect("mutex");
        let prompt = &requests[0].messages[0].content;
        assert!(prompt.contains("User asked: burn"));
        assert!(prompt.contains("- Cool with water"));

        // Speech was asked for the answer text in the detected language.
        let calls = speech.calls.lock().expect("mutex");
        assert_eq!(
            calls[0],
            (
                "Run cool water over the burn.".to_string(),
                Language::English
            )
        );
    }

    #[tokio::test]
    async fn completion_failure_aborts_request_without_audio() {
        let transport = Arc::new(MockTransport::new(vec![]));
        let speech = Arc::new(MockSpeechEngine::succeeding());
        let svc = service(transport, Arc::clone(&speech));

        let err = svc.answer("burn").await.unwrap_err();
        assert!(matches!(err, AidMateError::Completion(_)));
        // Synthesis never ran.
        assert!(speech.calls.lock().expect("mutex").is_empty());
    }

    #[tokio::test]
    async fn synthesis_failure_degrades_to_text_only() {
        let transport = Arc::new(MockTransport::answering("Guidance text."));
        let speech = Arc::new(MockSpeechEngine::failing());
        let svc = service(transport, speech);

        let guidance = svc.answer("burn").await.expect("answer should survive");
        assert_eq!(guidance.answer, "Guidance text.");
        assert!(guidance.audio.is_none());
    }

    #[tokio::test]
    async fn unmatched_query_still_gets_an_answer() {
        let transport = Arc::new(MockTransport::answering("General advice."));
        let speech = Arc::new(MockSpeechEngine::succeeding());
        let svc = service(Arc::clone(&transport), speech);

        let guidance = svc.answer("earthquake").await.expect("pipeline");
        assert!(guidance.matches.is_empty());

        let requests = transport.requests.lock().expect("mutex");
        let prompt = &requests[0].messages[0].content;
        assert!(!prompt.contains("Here is some emergency information that may help:"));
    }
}
