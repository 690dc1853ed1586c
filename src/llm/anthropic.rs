use crate::llm::client::{LLMError, TextGenerator};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::{Duration, Instant};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_TOKENS: u32 = 1024;
const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 1000;

// Rate limiting: 10 requests per minute
const RATE_LIMIT_REQUESTS: usize = 10;
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

pub struct AnthropicClient {
    api_key: String,
    model: String,
    http_client: Client,
    // Rate limiting: track request timestamps
    request_times: Mutex<Vec<Instant>>,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Result<Self, LLMError> {
        Self::with_options(api_key, DEFAULT_MODEL.to_string(), DEFAULT_TIMEOUT)
    }

    pub fn with_options(api_key: String, model: String, timeout: Duration) -> Result<Self, LLMError> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            model,
            http_client,
            request_times: Mutex::new(Vec::new()),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Check and enforce rate limiting
    /// Returns Ok(()) if request is allowed, Err with wait time if rate limited
    fn check_rate_limit(&self) -> Result<(), LLMError> {
        let now = Instant::now();
        let mut times = self
            .request_times
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Remove requests older than the rate limit window
        times.retain(|&time| now.duration_since(time) < RATE_LIMIT_WINDOW);

        if times.len() >= RATE_LIMIT_REQUESTS {
            let oldest = times[0];
            let wait_time = RATE_LIMIT_WINDOW.saturating_sub(now.duration_since(oldest));
            return Err(LLMError::RateLimitExceeded(wait_time.as_secs()));
        }

        times.push(now);
        Ok(())
    }

    async fn call_api(&self, prompt: &str) -> Result<String, LLMError> {
        let request_body = AnthropicRequest {
            model: self.model.clone(),
            max_tokens: MAX_TOKENS,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let mut attempt = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            attempt += 1;

            let response = self
                .http_client
                .post(ANTHROPIC_API_URL)
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", "2023-06-01")
                .header("content-type", "application/json")
                .json(&request_body)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        LLMError::Timeout
                    } else {
                        LLMError::NetworkError(e)
                    }
                })?;

            let status = response.status();

            if status.is_success() {
                let api_response: AnthropicResponse = response.json().await?;
                return Self::response_text(api_response);
            } else if status.as_u16() == 429 {
                // Rate limit - check retry-after header
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);

                if attempt >= MAX_RETRIES {
                    return Err(LLMError::RateLimitExceeded(retry_after));
                }

                // Exponential backoff with retry-after
                let wait_ms = retry_after.saturating_mul(1000).max(backoff_ms);
                tracing::warn!(
                    "Rate limited, retrying in {}ms (attempt {}/{})",
                    wait_ms,
                    attempt,
                    MAX_RETRIES
                );

                tokio::time::sleep(Duration::from_millis(wait_ms)).await;
                backoff_ms *= 2;
                continue;
            } else {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(LLMError::ApiError(format!(
                    "API returned status {}: {}",
                    status, error_text
                )));
            }
        }
    }

    /// Join the text blocks of a response
    fn response_text(response: AnthropicResponse) -> Result<String, LLMError> {
        let text: Vec<String> = response
            .content
            .into_iter()
            .map(|block| block.text)
            .filter(|text| !text.trim().is_empty())
            .collect();

        if text.is_empty() {
            return Err(LLMError::InvalidResponse(
                "No content in response".to_string(),
            ));
        }

        Ok(text.join("\n"))
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    async fn generate(&self, prompt: &str) -> Result<String, LLMError> {
        // Check rate limiting before making API call
        self.check_rate_limit()?;

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Sending prompt");
        self.call_api(prompt).await
    }
}
