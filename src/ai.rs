//! Text-completion collaborator: an OpenAI-compatible chat-completions API.

pub mod common;
pub mod config;
pub mod gpt;
pub mod prompts;
