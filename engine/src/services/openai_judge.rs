//! OpenAI-backed semantic judge
//!
//! Wraps the chat-completions API behind the `SemanticJudge` trait. The
//! boundary is total: any transport, status, or parse failure is downgraded
//! to a default-reject verdict, and a failed suggestion call falls back to a
//! fixed built-in list.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::traits::SemanticJudge;
use crate::types::{GuessVerdict, Language, TOO_VAGUE};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Built-in suggestions used when the upstream call fails or returns nothing
const FALLBACK_CATEGORIES: [&str; 5] = [
    "Animals",
    "Car Brands",
    "Countries",
    "Fruits",
    "Harry Potter Characters",
];

const JUDGE_SYSTEM_PROMPT: &str = "\
You are the referee of a category guessing game. The player names members of \
a category and you decide whether each guess counts. Rules: \
1. The guess must be factually correct, a genuine member of the category. \
2. The guess must be specific enough. A super-category or overly generic \
instance does not count: for category \"Car Brands\", \"Blue Car\" is \
invalid, \"Ford\" is valid. \
3. Respond in the same language as the input. \
4. Produce the canonical form formatted nicely (Title Case) in the same \
language as the input. \
5. If invalid, provide a short, fun reason in the same language as the input. \
Respond with a single JSON object: {\"isMember\": bool, \"isSpecific\": bool, \
\"canonicalForm\": string, \"rejectionReason\": string or null}. No other text.";

const SUGGEST_SYSTEM_PROMPT: &str = "\
Generate 5 fun, diverse, and popular categories for a guessing game, in the \
requested language. Respond with a single JSON object: \
{\"categories\": [string, ...]}. No other text.";

/// Failures internal to one judge call; these never cross the trait boundary
#[derive(Debug, thiserror::Error)]
enum JudgeCallError {
    #[error("network error: {0}")]
    NetworkError(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limit exceeded")]
    RateLimitExceeded,

    #[error("service unavailable")]
    ServiceUnavailable,

    #[error("server error: {0}")]
    ServerError(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Deserialize)]
struct SuggestionsReply {
    categories: Vec<String>,
}

/// Semantic judge backed by the OpenAI chat-completions API
#[derive(Clone)]
pub struct OpenAiJudge {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiJudge {
    /// Create a judge using the default model and endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: OPENAI_BASE_URL.to_string(),
        }
    }

    /// Override the judge model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point the client at a different API endpoint (tests use this)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The built-in fallback suggestion list
    pub fn fallback_categories() -> Vec<String> {
        FALLBACK_CATEGORIES.iter().map(|c| c.to_string()).collect()
    }

    /// Run one chat-completions request and extract the reply content
    async fn request_content(&self, system: &str, user: String) -> Result<String, JudgeCallError> {
        let request_body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "system",
                    "content": system
                },
                {
                    "role": "user",
                    "content": user
                }
            ],
            "max_tokens": 200,
            "temperature": 0.2,
            "response_format": { "type": "json_object" }
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .timeout(REQUEST_TIMEOUT)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| JudgeCallError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            return match response.status().as_u16() {
                401 => Err(JudgeCallError::AuthenticationFailed),
                429 => Err(JudgeCallError::RateLimitExceeded),
                503 => Err(JudgeCallError::ServiceUnavailable),
                _ => Err(JudgeCallError::ServerError(response.status().to_string())),
            };
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| JudgeCallError::InvalidResponse(format!("failed to parse response: {}", e)))?;

        let content = response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| JudgeCallError::InvalidResponse("no content in response".to_string()))?;

        Ok(content.to_string())
    }

    async fn request_verdict(
        &self,
        category: &str,
        guess: &str,
        locale: Language,
    ) -> Result<GuessVerdict, JudgeCallError> {
        let user = serde_json::json!({
            "category": category,
            "guess": guess,
            "localeHint": locale.as_str()
        })
        .to_string();

        let content = self.request_content(JUDGE_SYSTEM_PROMPT, user).await?;
        serde_json::from_str(&content)
            .map_err(|e| JudgeCallError::InvalidResponse(format!("malformed verdict: {}", e)))
    }

    async fn request_suggestions(&self, locales: &[String]) -> Result<Vec<String>, JudgeCallError> {
        let user = serde_json::json!({ "localeHints": locales }).to_string();

        let content = self.request_content(SUGGEST_SYSTEM_PROMPT, user).await?;
        let reply: SuggestionsReply = serde_json::from_str(&content)
            .map_err(|e| JudgeCallError::InvalidResponse(format!("malformed suggestions: {}", e)))?;
        Ok(reply.categories)
    }
}

#[async_trait]
impl SemanticJudge for OpenAiJudge {
    async fn judge_guess(&self, category: &str, guess: &str, locale: Language) -> GuessVerdict {
        match self.request_verdict(category, guess, locale).await {
            Ok(mut verdict) => {
                // Specificity rejections carry a fixed reason; the judge's
                // own wording is kept for factual rejections only.
                if !verdict.is_specific {
                    verdict.rejection_reason = Some(TOO_VAGUE.to_string());
                }
                debug!(%guess, accepted = verdict.accepted(), "verdict received");
                verdict
            }
            Err(e) => {
                warn!(error = %e, %guess, "judge call failed, rejecting unverified");
                GuessVerdict::unverified(guess)
            }
        }
    }

    async fn suggest_categories(&self, locales: &[String]) -> Vec<String> {
        match self.request_suggestions(locales).await {
            Ok(categories) if !categories.is_empty() => categories,
            Ok(_) => Self::fallback_categories(),
            Err(e) => {
                warn!(error = %e, "suggestion call failed, using fallback list");
                Self::fallback_categories()
            }
        }
    }
}
