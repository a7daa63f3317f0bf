//! OpenAI-compatible chat-completions client implementing [`BrandFitEvaluator`].

use std::time::Duration;

use brandfit_core::{AppConfig, Backoff};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;

use crate::error::EvaluatorError;
use crate::evaluator::BrandFitEvaluator;
use crate::parse::parse_evaluation;
use crate::prompt::{user_prompt, SYSTEM_PROMPT};
use crate::types::{BrandFitEvaluation, EvaluationRequest, EVALUATION_ERROR};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BACKOFF_BASE_SECS: u64 = 2;

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

/// Evaluator backed by a chat-completions endpoint.
///
/// Use [`ChatEvaluator::from_config`] in binaries, or
/// [`ChatEvaluator::with_base_url`] to point at a mock server in tests.
pub struct ChatEvaluator {
    client: Client,
    api_key: String,
    endpoint: Url,
    model: String,
    backoff: Backoff,
}

impl std::fmt::Debug for ChatEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatEvaluator")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .field("api_key", &"[redacted]")
            .field("backoff", &self.backoff)
            .finish_non_exhaustive()
    }
}

impl ChatEvaluator {
    /// Creates a client pointed at the public OpenAI API with the default model.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluatorError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, EvaluatorError> {
        Self::with_base_url(api_key, DEFAULT_MODEL, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL and model.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluatorError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`EvaluatorError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, EvaluatorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("brandfit/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));
        let endpoint =
            Url::parse(&endpoint).map_err(|_| EvaluatorError::InvalidBaseUrl(base_url.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
            model: model.to_owned(),
            backoff: Backoff::new(DEFAULT_MAX_RETRIES, DEFAULT_BACKOFF_BASE_SECS).with_jitter(),
        })
    }

    /// Builds a client from application config.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluatorError::MissingApiKey`] if no API key is configured,
    /// or any error from [`ChatEvaluator::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, EvaluatorError> {
        let api_key = config
            .openai_api_key
            .as_deref()
            .ok_or(EvaluatorError::MissingApiKey)?;
        Ok(Self::with_base_url(
            api_key,
            &config.llm_model,
            config.llm_timeout_secs,
            &config.llm_base_url,
        )?
        .with_retry(config.max_retries, config.retry_backoff_base_secs))
    }

    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_secs: u64) -> Self {
        self.backoff = Backoff::new(max_retries, backoff_base_secs).with_jitter();
        self
    }

    /// Sends one chat completion and returns the raw message content,
    /// retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`EvaluatorError::RateLimited`] if every attempt got HTTP 429.
    /// - [`EvaluatorError::Http`] on network failure or non-2xx status.
    /// - [`EvaluatorError::EmptyResponse`] if the reply carries no content.
    pub async fn complete(&self, request: &EvaluationRequest<'_>) -> Result<String, EvaluatorError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": user_prompt(request) },
            ],
            "temperature": 0.0,
        });

        let body = &body;
        self.backoff.run("chat completion", || async move {
            let response = self
                .client
                .post(self.endpoint.clone())
                .bearer_auth(&self.api_key)
                .json(body)
                .send()
                .await?;

            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                return Err(EvaluatorError::RateLimited);
            }
            let parsed: ChatResponse = response.error_for_status()?.json().await?;

            parsed
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.message.content)
                .filter(|content| !content.trim().is_empty())
                .ok_or(EvaluatorError::EmptyResponse)
        })
        .await
    }
}

impl BrandFitEvaluator for ChatEvaluator {
    async fn evaluate(&self, request: &EvaluationRequest<'_>) -> BrandFitEvaluation {
        match self.complete(request).await {
            Ok(content) => {
                tracing::debug!(
                    influencer = request.influencer,
                    brand = request.brand,
                    content = %content,
                    "model reply"
                );
                parse_evaluation(&content)
            }
            Err(e) => {
                tracing::warn!(
                    influencer = request.influencer,
                    brand = request.brand,
                    error = %e,
                    "evaluation failed"
                );
                BrandFitEvaluation::failed(EVALUATION_ERROR)
            }
        }
    }
}
