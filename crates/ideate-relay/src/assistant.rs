//! Conversational assistant proxy.
//!
//! Each question is sent with a fixed system prompt that embeds the dashboard
//! context. Nothing is kept between calls; callers re-supply the context.

use serde::{Deserialize, Serialize};

use ideate_config::AssistantConfig;
use ideate_core::context::cap_context;

use crate::error::RelayError;
use crate::http::{build_client, check_response};

/// Reply used when a success response carries no message content.
pub const FALLBACK_REPLY: &str = "Sorry, I could not generate a response.";

/// Context placeholder when the dashboard has nothing to show yet.
pub const NO_CONTEXT: &str = "No dashboard data available yet.";

/// Sampling temperature sent with every question.
pub const TEMPERATURE: f64 = 0.7;

/// Reply length cap sent with every question.
pub const MAX_TOKENS: u32 = 500;

const USER_AGENT: &str = "ideate/0.1";

/// Render the system prompt around the dashboard context.
#[must_use]
pub fn system_prompt(context: &str) -> String {
    format!(
        "You are **InspirAI Assistant**, a focused AI mentor for student entrepreneurs. \
Help students interpret their business analysis and take clear, practical action.

DASHBOARD DATA:
{context}

RESPONSE RULES:
• Be direct and concise - match the user's energy level
• For simple greetings (\"hi\", \"hello\"), respond briefly without full structure
• For dashboard questions, use structured format with insights and next steps
• For off-topic questions, mention you're an AI assistant and redirect to dashboard topics
• Only provide detailed analysis when explicitly requested

STRUCTURED FORMAT (use only for dashboard-related questions):
## 🔍 Summary
[Brief restatement]

## 📊 Key Insights
• [Relevant dashboard findings]

## 🚀 Next Steps
1. **[Action]** – [Reason]
2. **[Action]** – [Reason]

## 💡 Note
[Optional clarification]

For simple interactions, respond naturally and briefly."
    )
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Default, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ReplyMessage>,
}

#[derive(Debug, Default, Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions endpoint.
pub struct AssistantClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    context_max_chars: usize,
}

impl AssistantClient {
    /// # Errors
    ///
    /// Returns [`RelayError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &AssistantConfig) -> Result<Self, RelayError> {
        Ok(Self {
            http: build_client(USER_AGENT, config.timeout_secs)?,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            context_max_chars: config.context_max_chars,
        })
    }

    /// Ask one question against the given dashboard context.
    ///
    /// Empty or missing context is replaced with [`NO_CONTEXT`]; long context
    /// is cut to the configured character cap.
    ///
    /// # Errors
    ///
    /// [`RelayError::Upstream`] on a non-success answer, [`RelayError::Http`]
    /// on transport failure, [`RelayError::Parse`] if a success body is not JSON.
    pub async fn ask(&self, question: &str, context: Option<&str>) -> Result<String, RelayError> {
        let context = match context.map(str::trim) {
            Some(ctx) if !ctx.is_empty() => cap_context(ctx, self.context_max_chars),
            _ => NO_CONTEXT,
        };
        let system = system_prompt(context);

        let request = CompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &system,
                },
                ChatMessage {
                    role: "user",
                    content: question,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(
            model = %self.model,
            context_chars = context.chars().count(),
            "asking assistant"
        );
        let resp = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let resp = check_response(resp).await.inspect_err(|e| {
            tracing::error!(error = %e, "assistant endpoint failed");
        })?;

        let body = resp.text().await?;
        let parsed: CompletionResponse =
            serde_json::from_str(&body).map_err(|e| RelayError::Parse(e.to_string()))?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string()))
    }
}
