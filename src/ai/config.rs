use std::env;

pub const DEFAULT_GPT_MODEL: &str = "gpt-4";
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

#[derive(Clone, Debug)]
pub struct AiConfig {
    pub api_key: String,
    pub gpt_model: String,
    /// Sampling temperature, always within `[0, 1]`.
    pub temperature: f32,
    pub openai_chat_url: Option<String>,
}

impl AiConfig {
    /// `None` when `OPENAI_API_KEY` is unset, meaning no collaborator is available.
    pub fn from_env() -> Option<Self> {
        let api_key = match env::var("OPENAI_API_KEY") {
            Ok(k) if !k.trim().is_empty() => k,
            _ => return None,
        };
        Some(Self {
            api_key,
            gpt_model: env::var("OPENAI_GPT_MODEL")
                .unwrap_or_else(|_| DEFAULT_GPT_MODEL.to_string()),
            temperature: env::var("OPENAI_TEMPERATURE")
                .ok()
                .and_then(|t| parse_temperature(&t))
                .unwrap_or(DEFAULT_TEMPERATURE),
            openai_chat_url: env::var("OPENAI_CHAT_URL").ok(),
        })
    }

    /// Config pointing at an explicit endpoint with default model settings.
    pub fn with_url(api_key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            gpt_model: DEFAULT_GPT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            openai_chat_url: Some(url.into()),
        }
    }
}

fn parse_temperature(raw: &str) -> Option<f32> {
    let value: f32 = raw.trim().parse().ok()?;
    if value.is_nan() {
        return None;
    }
    Some(value.clamp(0.0, 1.0))
}
