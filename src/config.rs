use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Main configuration structure for AidMate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub knowledge: KnowledgeConfig,
    pub groq: GroqConfig,
    pub speech: SpeechConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqConfig {
    pub api_key: String,
    pub model: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Config {
    /// Load configuration from file with environment variable overrides.
    /// Always returns a valid config; missing pieces fall back to defaults
    /// and validation problems are logged as warnings.
    pub fn load() -> Self {
        // .env in the working directory or one level up, for local runs
        let env_paths = ["../.env", ".env"];
        let mut env_loaded = false;
        for path in &env_paths {
            if dotenvy::from_path(path).is_ok() {
                tracing::info!("Loaded .env from: {}", path);
                env_loaded = true;
                break;
            }
        }
        if !env_loaded {
            tracing::debug!("No .env file found - continuing with process env only");
        }

        let config_path =
            env::var("AIDMATE_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {}", config_path);
                        config
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to parse config file {}: {} - using defaults",
                            config_path,
                            e
                        );
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to read config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            tracing::warn!("Config file not found at {} - using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();

        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(bind) = env::var("AIDMATE_BIND") {
            self.server.bind = bind;
        }
        if let Ok(path) = env::var("AIDMATE_KNOWLEDGE_PATH") {
            self.knowledge.path = path;
        }
        if let Ok(key) = env::var("GROQ_API_KEY") {
            self.groq.api_key = key;
        }
        if let Ok(model) = env::var("AIDMATE_GROQ_MODEL") {
            self.groq.model = model;
        }
        if let Ok(timeout) = env::var("AIDMATE_GROQ_TIMEOUT_SECONDS") {
            if let Ok(secs) = timeout.parse() {
                self.groq.timeout_seconds = secs;
            }
        }
        if let Ok(endpoint) = env::var("AIDMATE_TTS_ENDPOINT") {
            self.speech.endpoint = endpoint;
        }
        if let Ok(timeout) = env::var("AIDMATE_TTS_TIMEOUT_SECONDS") {
            if let Ok(secs) = timeout.parse() {
                self.speech.timeout_seconds = secs;
            }
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.groq.api_key.is_empty() {
            return Err("groq.api_key is empty (set GROQ_API_KEY)".to_string());
        }
        if self.groq.timeout_seconds == 0 || self.speech.timeout_seconds == 0 {
            return Err("timeouts must be non-zero".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind: "127.0.0.1:8080".to_string(),
            },
            knowledge: KnowledgeConfig {
                path: "data.json".to_string(),
            },
            groq: GroqConfig {
                api_key: String::new(),
                model: "meta-llama/llama-4-scout-17b-16e-instruct".to_string(),
                timeout_seconds: 30,
            },
            speech: SpeechConfig {
                endpoint: "https://translate.google.com/translate_tts".to_string(),
                timeout_seconds: 15,
            },
        }
    }
}
