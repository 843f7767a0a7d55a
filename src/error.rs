use thiserror::Error;

/// Error taxonomy for the AidMate pipeline.
///
/// `DataLoad` is fatal at startup (no knowledge base means no lookups).
/// `Completion` aborts the current request. `Synthesis` degrades the current
/// request to text-only output and is never fatal. Language-detection failure
/// has no variant here: detection is total and silently falls back to English.
#[derive(Error, Debug)]
pub enum AidMateError {
    #[error("Knowledge base load failed: {0}")]
    DataLoad(String),

    #[error("Completion request failed: {0}")]
    Completion(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),
}

pub type Result<T> = std::result::Result<T, AidMateError>;
