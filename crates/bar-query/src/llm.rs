//! LLM fallback tier — OpenAI-compatible chat endpoint for free-form phrasing.
//!
//! Calls a chat-completions API to construct queries the rule-based tier
//! misses. Request-time failures (timeout, non-200, malformed output) are
//! logged and surface as `None`; only construction of the client itself can
//! fail, and that happens at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::constructor::{ConstructedQuery, QueryConstructor};
use crate::error::ConstructorError;
use crate::query::{MemoryQuery, QueryFilter};

/// System prompt describing the query schema the model must emit.
const SYSTEM_PROMPT: &str = r#"You are the query constructor for a bar assistant's memory layer. Convert the patron's natural-language question about drinks they have had into a structured memory query.

Filterable fields:
- spirit — base spirit, string, op "eq" only. One of: gin, vodka, rum, whiskey, tequila, mezcal, brandy, amaro.
- flavor — flavor tag, string, op "eq" only. E.g. smoky, sweet, sour, bitter, herbal, fruity, spicy, dry, creamy, citrusy, floral.
- abv — alcohol by volume in percent, number, op "eq" | "lt" | "gt".
- rating — patron rating 1-5, number, op "eq" | "lt" | "gt".

Respond with ONLY a JSON object (no markdown, no explanation):
{"terms": ["negroni"], "filters": [{"field": "spirit", "op": "eq", "value": "gin"}], "limit": 5, "confidence": 0.9}

"terms" are free-text words to match against drink names and notes. "limit" caps the result count (null for no preference).

If the text is not a question about remembered drinks, respond with:
{"terms": [], "filters": [], "limit": null, "confidence": 0.0}"#;

/// Minimum confidence threshold — below this we treat as "no match".
const MIN_CONFIDENCE: f64 = 0.3;

/// Cap on model-supplied result limits.
const MAX_LIMIT: usize = 50;

/// Configuration for the LLM endpoint.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Chat-completions URL.
    pub api_url: String,
    /// Model name.
    pub model: String,
    /// Bearer token. Required — construction fails without it.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1/chat/completions".into(),
            model: "gpt-4o-mini".into(),
            api_key: None,
            timeout_secs: 5,
        }
    }
}

/// Chat-completions request body.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Chat-completions response (only fields we need).
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Raw model output before validation. Filters deserialize through
/// `QueryFilter`, so unknown fields or operators reject the whole reply.
#[derive(Deserialize)]
struct RawConstruction {
    #[serde(default)]
    terms: Vec<String>,
    #[serde(default)]
    filters: Vec<QueryFilter>,
    #[serde(default)]
    limit: Option<usize>,
    #[serde(default)]
    confidence: f64,
}

/// Query constructor backed by an OpenAI-compatible chat endpoint.
#[derive(Debug)]
pub struct LlmQueryConstructor {
    client: reqwest::Client,
    api_url: String,
    model: String,
    api_key: String,
}

impl LlmQueryConstructor {
    /// Build the constructor. Fails fast on missing credentials or a bad
    /// endpoint so startup aborts before any listener binds.
    pub fn new(config: LlmConfig) -> Result<Self, ConstructorError> {
        let api_key = config
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or(ConstructorError::MissingApiKey)?;

        if !config.api_url.starts_with("http") {
            return Err(ConstructorError::InvalidEndpoint(config.api_url));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url,
            model: config.model,
            api_key,
        })
    }
}

#[async_trait]
impl QueryConstructor for LlmQueryConstructor {
    async fn construct(&self, text: &str) -> Option<ConstructedQuery> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            temperature: 0.0,
        };

        let response = match self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(error = %e, "llm request failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "llm returned non-200");
            return None;
        }

        let chat_resp: ChatResponse = match response.json().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse llm response body");
                return None;
            }
        };

        let content = &chat_resp.choices.first()?.message.content;

        let raw: RawConstruction = match serde_json::from_str(extract_json(content)) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, content = %content, "llm returned invalid query JSON");
                return None;
            }
        };

        if raw.confidence < MIN_CONFIDENCE {
            tracing::debug!(confidence = raw.confidence, "llm confidence below threshold");
            return None;
        }

        // An empty construction means "not a memory question".
        if raw.terms.is_empty() && raw.filters.is_empty() {
            tracing::debug!("llm produced an empty construction");
            return None;
        }

        Some(ConstructedQuery {
            query: MemoryQuery {
                terms: raw.terms,
                filters: raw.filters,
                limit: raw.limit.map(|l| l.min(MAX_LIMIT)),
            },
            tier: "llm".into(),
            confidence: raw.confidence,
        })
    }

    fn tier_name(&self) -> &str {
        "llm"
    }
}

/// Extract JSON from model output that may be wrapped in markdown code blocks.
fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();

    if let Some(start) = trimmed.find("```json") {
        let after_fence = &trimmed[start + 7..];
        if let Some(end) = after_fence.find("```") {
            return after_fence[..end].trim();
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        if let Some(end) = after_fence.find("```") {
            return after_fence[..end].trim();
        }
    }

    trimmed
}
