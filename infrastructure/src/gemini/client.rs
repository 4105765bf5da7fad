//! GeminiClient -- interpretation and conversation over the Gemini REST API.
//!
//! Sends `generateContent` requests with `reqwest`. The API key travels in
//! the `x-goog-api-key` header, never in the URL, so it stays out of logs.

use super::error::GeminiError;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, SafetySetting};
use crate::config::FileGeminiConfig;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info, warn};
use tripscout_application::{CapabilityError, ConversationCapability, InterpretationCapability};
use tripscout_domain::util::truncate_str;
use tripscout_domain::{ConversationTurn, PromptTemplate, Role};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini adapter implementing both text capabilities
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    chat_model: String,
    system_instruction: Option<String>,
}

impl GeminiClient {
    /// Create a client with the default endpoint and models
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self, GeminiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::MissingApiKey);
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeminiError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            chat_model: DEFAULT_MODEL.to_string(),
            system_instruction: Some(PromptTemplate::travel_assistant_system().to_string()),
        })
    }

    /// Create a client from the `[gemini]` config section
    ///
    /// The key comes from the section or from `GEMINI_API_KEY`.
    pub fn from_config(config: &FileGeminiConfig) -> Result<Self, GeminiError> {
        let api_key = config.resolve_api_key().ok_or(GeminiError::MissingApiKey)?;
        let client = Self::new(api_key, config.timeout())?
            .with_base_url(config.base_url.clone())
            .with_model(config.model.clone())
            .with_chat_model(config.chat_model.clone());
        info!(
            "Gemini client ready (interpretation: {}, chat: {})",
            client.model, client.chat_model
        );
        Ok(client)
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    pub fn with_system_instruction(mut self, instruction: Option<String>) -> Self {
        self.system_instruction = instruction;
        self
    }

    fn url(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }

    /// Request asking for a JSON interpretation of `prompt`
    pub(crate) fn interpretation_request(prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::text(Some("user"), prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: Some(0.0),
                response_mime_type: Some("application/json".to_string()),
                ..Default::default()
            }),
            safety_settings: Vec::new(),
        }
    }

    /// Request continuing a chat with `message` after `history`
    pub(crate) fn chat_request(
        &self,
        history: &[ConversationTurn],
        message: &str,
    ) -> GenerateContentRequest {
        let mut contents: Vec<Content> = history
            .iter()
            .map(|turn| Content::text(Some(gemini_role(turn.role)), turn.content.as_str()))
            .collect();
        contents.push(Content::text(Some("user"), message));

        GenerateContentRequest {
            contents,
            system_instruction: self
                .system_instruction
                .as_deref()
                .map(|instruction| Content::text(None, instruction)),
            generation_config: Some(GenerationConfig {
                temperature: Some(0.9),
                top_p: Some(1.0),
                top_k: Some(1),
                max_output_tokens: Some(2048),
                response_mime_type: None,
            }),
            safety_settings: SafetySetting::moderate(),
        }
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<String, GeminiError> {
        let url = self.url(model);
        debug!("POST {} ({} content item(s))", url, request.contents.len());

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Gemini returned HTTP {}: {}", status, truncate_str(&body, 200));
            return Err(GeminiError::from_status(status.as_u16(), body));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Decode(e.to_string()))?;

        body.text().ok_or_else(|| GeminiError::EmptyReply {
            reason: body
                .blocked_reason()
                .unwrap_or_else(|| "no candidates".to_string()),
        })
    }
}

fn gemini_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

#[async_trait]
impl InterpretationCapability for GeminiClient {
    async fn ask(&self, prompt: &str) -> Result<String, CapabilityError> {
        let request = Self::interpretation_request(prompt);
        let reply = self.generate(&self.model, &request).await?;
        debug!("Interpretation reply: {}", truncate_str(&reply, 200));
        Ok(reply)
    }
}

#[async_trait]
impl ConversationCapability for GeminiClient {
    async fn converse(
        &self,
        history: &[ConversationTurn],
        message: &str,
    ) -> Result<String, CapabilityError> {
        let request = self.chat_request(history, message);
        let reply = self.generate(&self.chat_model, &request).await?;
        Ok(reply)
    }
}
