use std::time::Duration;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, trace, warn};

use crate::ai::config::AiConfig;

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

pub const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Upper bound for a single chat-completion round trip.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Build a chat-completions body with one system and one user message.
pub fn build_text_chat_body(model: &str, temperature: f32, system: &str, user: &str) -> Value {
    json!({
        "model": model,
        "temperature": temperature,
        "messages": [
            { "role": "system", "content": system },
            { "role": "user", "content": user },
        ]
    })
}

/// Send a prepared request with bearer auth, turning non-2xx statuses into errors.
#[instrument(level = "trace", skip(api_key, builder))]
pub async fn send_openai_request(
    api_key: &str,
    builder: reqwest::RequestBuilder,
) -> Result<reqwest::Response> {
    let resp = builder.bearer_auth(api_key).send().await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let err_text = resp.text().await.unwrap_or_default();
        warn!(%status, "OpenAI API error");
        return Err(anyhow!("OpenAI API error {status}: {err_text}"));
    }

    Ok(resp)
}

/// Extract the first choice's message text from a raw chat-completions body.
///
/// `None` when the message content is `null`.
pub fn parse_chat_content(raw: &str) -> Result<Option<String>> {
    let chat: ChatResponse = serde_json::from_str(raw)?;
    let content = chat
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("missing chat choice"))?
        .message
        .content;
    Ok(content.map(|c| c.trim().to_string()))
}

/// Run one system + user exchange and return the assistant's text.
#[instrument(level = "trace", skip(config, system, user))]
pub async fn request_chat_content(
    config: &AiConfig,
    system: &str,
    user: &str,
) -> Result<Option<String>> {
    let url = config.openai_chat_url.as_deref().unwrap_or(OPENAI_CHAT_URL);
    let body = build_text_chat_body(&config.gpt_model, config.temperature, system, user);

    debug!(url, model = %config.gpt_model, "sending chat completion request");

    let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    let builder = client.post(url).json(&body);
    let resp = send_openai_request(&config.api_key, builder).await?;

    let raw = resp.text().await?;
    let snippet: String = raw.chars().take(200).collect();
    debug!(snippet = %snippet, "chat response body");
    trace!(raw = %raw, "chat response");

    parse_chat_content(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_carries_both_messages() {
        let body = build_text_chat_body("gpt-4", 0.0, "sys", "usr");
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "usr");
    }

    #[test]
    fn chat_content_is_trimmed() {
        let raw = r#"{"choices":[{"message":{"content":"  {\"a\":1}\n"}}]}"#;
        assert_eq!(parse_chat_content(raw).unwrap().as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn null_content_is_none() {
        let raw = r#"{"choices":[{"message":{"content":null}}]}"#;
        assert_eq!(parse_chat_content(raw).unwrap(), None);
    }

    #[test]
    fn no_choices_is_an_error() {
        assert!(parse_chat_content(r#"{"choices":[]}"#).is_err());
        assert!(parse_chat_content("not json").is_err());
    }
}
