use std::env;

use crate::ai::config::AiConfig;

#[derive(Clone, Debug)]
pub struct Config {
    pub ai: Option<AiConfig>,
    /// Also explain each option code after normalizing.
    pub explain_options: bool,
}

impl Config {
    /// Reads the process environment; `.env` is loaded once by [`crate::run`].
    pub fn from_env() -> Self {
        let ai = AiConfig::from_env();
        let explain_options = env::var("ATEQUIP_EXPLAIN_OPTIONS")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self {
            ai,
            explain_options,
        }
    }
}
