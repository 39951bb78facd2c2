use anyhow::Result;
use serde_json::json;
use std::env;
use tokio::io::{AsyncBufReadExt, BufReader};

pub mod ai;
pub mod catalog;
mod config;
pub mod market;
pub mod normalize;
pub mod parsing;
pub mod stopwords;
mod version;

pub use catalog::{analyze_record, extract_record, EquipmentRecord};
pub use config::Config;
pub use market::{parse_market_results, MarketListing};
pub use normalize::{
    normalize, normalize_locally, normalize_with_fallback, Normalized, NormalizedRecord,
};
pub use parsing::{parse_query, split_options, ParsedQuery};
pub use stopwords::{is_stopword, STOPWORDS};
pub use version::version_banner;

// ──────────────────────────────────────────────────────────────
// Command-line entry point
// ──────────────────────────────────────────────────────────────

/// Normalize equipment queries and print one JSON record per query.
///
/// Queries come from the command-line arguments when given, otherwise one
/// per line from stdin. Logs go to stderr.
pub async fn run() -> Result<()> {
    // Load .env file if it exists (for local development)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--version") {
        println!("{}", version_banner());
        return Ok(());
    }

    let config = Config::from_env();
    tracing::info!(
        version = %version_banner(),
        completion = config.ai.is_some(),
        explain = config.explain_options,
        "Starting equipment normalizer"
    );

    if !args.is_empty() {
        return process_query(&config, &args.join(" ")).await;
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        process_query(&config, &line).await?;
    }

    Ok(())
}

async fn process_query(config: &Config, text: &str) -> Result<()> {
    let parsed = parse_query(text);
    let record = normalize(config.ai.as_ref(), text, &parsed.brand, &parsed.model).await;
    println!("{}", serde_json::to_string(&record)?);

    if config.explain_options {
        let explanations: Vec<_> =
            ai::gpt::explain_options(config.ai.as_ref(), &record.normalized)
                .await
                .into_iter()
                .map(|(option, explanation)| json!({ "option": option, "explanation": explanation }))
                .collect();
        println!("{}", json!({ "explanations": explanations }));
    }

    Ok(())
}
