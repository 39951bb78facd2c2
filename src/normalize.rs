//! Canonical `{normalized, results}` record and the façade producing it.
//!
//! The façade prefers the text-completion collaborator and falls back to the
//! local parser. Whatever path runs, the returned brand and model are the
//! caller's hints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::ai::config::AiConfig;
use crate::ai::gpt::{request_normalized, CompletionError};
use crate::parsing::{parse_query, split_options};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Normalized {
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub options: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub normalized: Normalized,
    /// Reserved; empty under the current contract.
    #[serde(default)]
    pub results: Vec<Map<String, Value>>,
}

impl NormalizedRecord {
    /// Record with empty brand, model and options.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Overwrite brand and model with the values chosen upstream.
    pub fn with_identity(mut self, brand: &str, model: &str) -> Self {
        self.normalized.brand = brand.to_string();
        self.normalized.model = model.to_string();
        self
    }
}

/// Normalize `raw_text` into a [`NormalizedRecord`].
///
/// With a collaborator the completion is used when it decodes; a malformed
/// completion yields an empty option list and a failed request falls back to
/// [`normalize_locally`]. Without a collaborator the local path runs directly.
/// Never fails.
#[instrument(level = "trace", skip(client))]
pub async fn normalize(
    client: Option<&AiConfig>,
    raw_text: &str,
    brand_hint: &str,
    model_hint: &str,
) -> NormalizedRecord {
    match client {
        Some(config) => {
            let completion = request_normalized(config, raw_text).await;
            normalize_with_fallback(raw_text, brand_hint, model_hint, completion)
        }
        None => {
            debug!("No completion client configured, parsing locally");
            normalize_locally(raw_text, brand_hint, model_hint)
        }
    }
}

/// Resolve a collaborator outcome into a record.
pub fn normalize_with_fallback(
    raw_text: &str,
    brand_hint: &str,
    model_hint: &str,
    completion: Result<NormalizedRecord, CompletionError>,
) -> NormalizedRecord {
    let record = match completion {
        Ok(record) => {
            debug!(
                options = record.normalized.options.len(),
                "Normalized via completion"
            );
            record
        }
        Err(err) if err.is_malformed() => {
            warn!(error = %err, context = raw_text, "Discarding malformed completion");
            NormalizedRecord::empty()
        }
        Err(err) => {
            warn!(
                error = %err,
                context = raw_text,
                "Falling back to local option parsing"
            );
            normalize_locally(raw_text, brand_hint, model_hint)
        }
    };

    record.with_identity(brand_hint, model_hint)
}

/// Build the record with the local parser only.
///
/// Options are those [`parse_query`] finds in `raw_text`, minus any equal
/// (ignoring case) to the brand or model hint.
pub fn normalize_locally(raw_text: &str, brand_hint: &str, model_hint: &str) -> NormalizedRecord {
    let parsed = parse_query(raw_text);
    let brand = brand_hint.to_lowercase();
    let model = model_hint.to_lowercase();

    let options = split_options(parsed.raw_options.as_str())
        .into_iter()
        .filter(|option| {
            let option = option.to_lowercase();
            option != brand && option != model
        })
        .collect();

    NormalizedRecord {
        normalized: Normalized {
            brand: brand_hint.to_string(),
            model: model_hint.to_string(),
            options,
        },
        results: Vec::new(),
    }
}
