use crate::config::ClassifierConfig;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Prompt asking the model to pick one of `categories` for `review`.
pub fn classification_prompt(categories: &[&str], review: &str) -> String {
    format!(
        "Classify this review into one of these sentiments: {}. Review: {}",
        categories.join(", "),
        review
    )
}

/// Labels free text with one of a set of categories.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Returns the label the service chose. The label is free-form and may
    /// not be one of `categories`.
    async fn classify(&self, categories: &[&str], text: &str) -> Result<String>;
}

/// Client for an OpenAI-compatible chat-completions endpoint
#[derive(Clone)]
pub struct OpenAiClassifier {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClassifier {
    pub fn new(config: &ClassifierConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build classifier HTTP client")?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone().filter(|k| !k.is_empty()),
        })
    }
}

#[async_trait]
impl Classifier for OpenAiClassifier {
    #[tracing::instrument(skip(self, text))]
    async fn classify(&self, categories: &[&str], text: &str) -> Result<String> {
        let Some(api_key) = &self.api_key else {
            bail!("Classifier API key is not configured");
        };

        let prompt = classification_prompt(categories, text);
        let url = format!("{}/chat/completions", self.base_url);
        let req = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&req)
            .send()
            .await
            .context("Failed to send classification request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read body".to_string());
            bail!("Classification failed with status {}: {}", status, body);
        }

        let resp: ChatResponse = response
            .json()
            .await
            .context("Failed to parse classification response")?;

        let label = resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .context("Classification response contained no answer")?;

        Ok(label.trim().to_string())
    }
}
