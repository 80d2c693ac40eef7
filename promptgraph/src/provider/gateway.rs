//! Chat gateway: offline mock or OpenAI Chat Completions, keyed at runtime.
//!
//! With no API key configured the gateway answers with a deterministic
//! placeholder that echoes the prompt and a bounded digest of the serialized
//! context, so everything works (and is testable) without network access.
//! Setting a key switches to the real model (feature `openai`).

use std::sync::RwLock;

use async_trait::async_trait;

use super::{format_context_block, AnswerProvider, AskRequest, ProviderError};

/// First line of every offline answer.
const MOCK_BANNER: &str =
    "Mock assistant response. Provide an OpenAI API key to talk to the real model.";

/// Upper bound on the offline context digest, in chars.
const DIGEST_LIMIT: usize = 400;

const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Answer provider with runtime-switchable credential.
///
/// The key can change while sends are in flight (the UI writes it on every
/// keystroke), so it sits behind a lock and is read per request. An empty or
/// whitespace-only key means offline mode.
///
/// **Interaction**: implements [`AnswerProvider`]; handed to `PromptSession`
/// as `Arc<dyn AnswerProvider>`.
pub struct ChatGateway {
    api_key: RwLock<Option<String>>,
    model: String,
    temperature: f32,
}

impl ChatGateway {
    /// Offline gateway with default model settings.
    pub fn new() -> Self {
        Self {
            api_key: RwLock::new(None),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Gateway keyed from `OPENAI_API_KEY` (loads `.env` first). Offline when
    /// the variable is unset or blank.
    #[cfg(feature = "openai")]
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        let gateway = Self::new();
        if let Ok(key) = std::env::var("OPENAI_API_KEY") {
            gateway.set_api_key(&key);
        }
        gateway
    }

    /// Set the model name (builder style).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature (builder style).
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Replaces the credential. Trimmed; empty clears it (offline mode).
    pub fn set_api_key(&self, value: &str) {
        let trimmed = value.trim();
        let key = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        *self.api_key.write().unwrap_or_else(|e| e.into_inner()) = key;
    }

    /// True when no credential is configured.
    pub fn is_offline(&self) -> bool {
        self.api_key
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }

    fn current_key(&self) -> Option<String> {
        self.api_key
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Context block capped at [`DIGEST_LIMIT`] chars, `…`-terminated when
    /// truncated.
    fn digest(context_block: &str) -> String {
        if context_block.chars().count() <= DIGEST_LIMIT {
            return context_block.to_string();
        }
        let mut digest: String = context_block.chars().take(DIGEST_LIMIT).collect();
        digest.push('…');
        digest
    }

    fn offline_answer(prompt: &str, context_block: &str) -> String {
        [
            MOCK_BANNER.to_string(),
            format!("Prompt: {}", prompt),
            format!("Context digest: {}", Self::digest(context_block)),
        ]
        .join("\n\n")
    }

    #[cfg(feature = "openai")]
    async fn online_answer(
        &self,
        api_key: &str,
        prompt: &str,
        context_block: &str,
    ) -> Result<String, ProviderError> {
        super::openai::ask_chat(api_key, &self.model, self.temperature, prompt, context_block)
            .await
    }

    #[cfg(not(feature = "openai"))]
    async fn online_answer(
        &self,
        _api_key: &str,
        _prompt: &str,
        _context_block: &str,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::RequestFailed(
            "an API key is set but promptgraph was built without the `openai` feature".into(),
        ))
    }
}

impl Default for ChatGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnswerProvider for ChatGateway {
    async fn ask(&self, request: AskRequest) -> Result<String, ProviderError> {
        let context_block = format_context_block(&request.context_entries);
        match self.current_key() {
            None => Ok(Self::offline_answer(&request.prompt, &context_block)),
            Some(key) => {
                self.online_answer(&key, &request.prompt, &context_block)
                    .await
            }
        }
    }
}
