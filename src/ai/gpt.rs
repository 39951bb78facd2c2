use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::ai::common::request_chat_content;
use crate::ai::config::AiConfig;
use crate::ai::prompts::{
    build_normalization_prompt, build_option_explanation_prompt, NORMALIZATION_PROMPT,
    OPTION_EXPLANATION_PROMPT,
};
use crate::normalize::{Normalized, NormalizedRecord};

/// Why a completion could not be used as a [`NormalizedRecord`].
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Transport, timeout, auth or HTTP status failure.
    #[error("completion request failed: {0:#}")]
    Request(anyhow::Error),
    #[error("completion is not a valid record: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("completion has no `normalized` object")]
    MissingNormalized,
}

impl CompletionError {
    /// The collaborator answered, but not with a usable record.
    pub fn is_malformed(&self) -> bool {
        !matches!(self, CompletionError::Request(_))
    }
}

/// Ask the collaborator to normalize `text` into brand, model and options.
#[instrument(level = "trace", skip(config))]
pub async fn request_normalized(
    config: &AiConfig,
    text: &str,
) -> Result<NormalizedRecord, CompletionError> {
    let user_prompt = build_normalization_prompt(text);
    let content = request_chat_content(config, &NORMALIZATION_PROMPT, &user_prompt)
        .await
        .map_err(CompletionError::Request)?;

    // A null answer fails shape validation like any other empty object.
    decode_normalized(content.as_deref().unwrap_or("{}"))
}

/// Validate and decode a completion as a [`NormalizedRecord`].
///
/// The top level must be a JSON object holding a `normalized` object. A
/// surrounding Markdown code fence is tolerated.
pub fn decode_normalized(content: &str) -> Result<NormalizedRecord, CompletionError> {
    let value: Value = serde_json::from_str(strip_code_fence(content))?;

    match value.get("normalized") {
        Some(Value::Object(_)) => {}
        _ => return Err(CompletionError::MissingNormalized),
    }

    let record: NormalizedRecord = serde_json::from_value(value)?;
    debug!(
        options = record.normalized.options.len(),
        "Decoded normalized completion"
    );
    Ok(record)
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Plain-language explanation of a single option code.
///
/// Never fails: without a collaborator a generic sentence is returned, and a
/// failed request is reported inside the text.
#[instrument(level = "trace", skip(config))]
pub async fn explain_option(
    config: Option<&AiConfig>,
    brand: &str,
    model: &str,
    option: &str,
) -> String {
    let Some(config) = config else {
        return format!("Option '{option}' adds specific functionality to the {brand} {model}.");
    };

    let prompt = build_option_explanation_prompt(brand, model, option);
    match request_chat_content(config, OPTION_EXPLANATION_PROMPT, &prompt).await {
        Ok(Some(text)) if !text.is_empty() => text,
        Ok(_) => "No explanation available.".to_string(),
        Err(err) => {
            warn!(error = %err, option, "Option explanation failed");
            format!("Could not get details for option '{option}': {err}")
        }
    }
}

/// Explain every option of `normalized`, one request at a time, in order.
pub async fn explain_options(
    config: Option<&AiConfig>,
    normalized: &Normalized,
) -> Vec<(String, String)> {
    let mut explanations = Vec::with_capacity(normalized.options.len());
    for option in &normalized.options {
        let text = explain_option(config, &normalized.brand, &normalized.model, option).await;
        explanations.push((option.clone(), text));
    }
    explanations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_record() {
        let record = decode_normalized(
            r#"{"normalized":{"brand":"Agilent","model":"8116A","options":["160","EEC"]},"results":[]}"#,
        )
        .unwrap();
        assert_eq!(record.normalized.brand, "Agilent");
        assert_eq!(record.normalized.options, vec!["160", "EEC"]);
        assert!(record.results.is_empty());
    }

    #[test]
    fn decodes_fenced_record() {
        let record = decode_normalized(
            "```json\n{\"normalized\":{\"brand\":\"\",\"model\":\"\",\"options\":[\"B711\"]}}\n```",
        )
        .unwrap();
        assert_eq!(record.normalized.options, vec!["B711"]);
    }

    #[test]
    fn missing_normalized_is_malformed() {
        let err = decode_normalized(r#"{"results":[]}"#).unwrap_err();
        assert!(matches!(err, CompletionError::MissingNormalized));
        assert!(err.is_malformed());

        let err = decode_normalized(r#"{"normalized":"Agilent"}"#).unwrap_err();
        assert!(matches!(err, CompletionError::MissingNormalized));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = decode_normalized("Sure! Here are the options: 160, EEC").unwrap_err();
        assert!(matches!(err, CompletionError::InvalidJson(_)));
        assert!(err.is_malformed());
    }

    #[test]
    fn wrongly_typed_options_are_malformed() {
        let err = decode_normalized(r#"{"normalized":{"options":"160/EEC"}}"#).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn request_failure_is_not_malformed() {
        let err = CompletionError::Request(anyhow::anyhow!("timeout"));
        assert!(!err.is_malformed());
    }

    #[tokio::test]
    async fn explanation_without_collaborator() {
        let text = explain_option(None, "Agilent", "8116A", "160").await;
        assert_eq!(
            text,
            "Option '160' adds specific functionality to the Agilent 8116A."
        );
    }
}
