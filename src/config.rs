// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Secrets are read once at startup and kept in memory.

use std::env;
use std::fmt;
use std::time::Duration;

/// Default chat-completions endpoint (OpenAI-compatible Groq API).
pub const DEFAULT_COMPLETION_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// Default completion model.
pub const DEFAULT_COMPLETION_MODEL: &str = "mixtral-8x7b-32768";
const DEFAULT_COMPLETION_TIMEOUT_SECS: u64 = 60;

/// Which backend holds profile records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Firestore,
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "firestore" => Ok(Self::Firestore),
            "memory" => Ok(Self::Memory),
            _ => Err(ConfigError::Invalid("PROFILE_STORE", raw.to_string())),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Profile store backend
    pub store_backend: StoreBackend,
    /// Chat-completions endpoint
    pub completion_api_url: String,
    /// Model identifier sent with every completion request
    pub completion_model: String,
    /// Timeout for a single completion request
    pub completion_timeout: Duration,

    // --- Secrets ---
    /// Bearer key for the completion service
    pub completion_api_key: String,
    /// HS256 key used by the identity provider to sign session tokens
    pub session_signing_key: Vec<u8>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("frontend_url", &self.frontend_url)
            .field("gcp_project_id", &self.gcp_project_id)
            .field("port", &self.port)
            .field("store_backend", &self.store_backend)
            .field("completion_api_url", &self.completion_api_url)
            .field("completion_model", &self.completion_model)
            .field("completion_timeout", &self.completion_timeout)
            .field("completion_api_key", &"<redacted>")
            .field("session_signing_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            store_backend: StoreBackend::Memory,
            completion_api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            completion_timeout: Duration::from_secs(5),
            completion_api_key: "test_completion_key".to_string(),
            session_signing_key: b"test_session_key_32_bytes_min!!!".to_vec(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let completion_timeout_secs = match env::var("COMPLETION_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("COMPLETION_TIMEOUT_SECS", raw))?,
            Err(_) => DEFAULT_COMPLETION_TIMEOUT_SECS,
        };

        let store_backend = match env::var("PROFILE_STORE") {
            Ok(raw) => StoreBackend::parse(&raw)?,
            Err(_) => StoreBackend::Firestore,
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            store_backend,
            completion_api_url: env::var("COMPLETION_API_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_API_URL.to_string()),
            completion_model: env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.to_string()),
            completion_timeout: Duration::from_secs(completion_timeout_secs),

            // Secrets
            completion_api_key: env::var("COMPLETION_API_KEY")
                .or_else(|_| env::var("GROQ_API_KEY"))
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("COMPLETION_API_KEY"))?,
            session_signing_key: env::var("SESSION_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("SESSION_SIGNING_KEY"))?
                .into_bytes(),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
