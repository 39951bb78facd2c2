//! Local, deterministic parsing of equipment queries.
//!
//! A query looks like `Agilent 8116A /160/EEC/PLK/UK6 has to be delivered soon`:
//! brand and model come first, then a run of slash-separated option codes,
//! then free text that must be ignored.

use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::stopwords::{brand_and_model, is_stopword, meaningful_words};

/// Brand, model and the unsplit options span found in a query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedQuery {
    pub brand: String,
    pub model: String,
    pub raw_options: String,
}

/// Split free-form text into brand, model and raw options.
///
/// Brand and model are the first two non-stop-word tokens before the first
/// `/`. The options span runs from the first `/` (pulling in a third or
/// later meaningful token glued directly to it, as in `like 160/EEC`) up to
/// the end of the token after the last `/`. A word separated from the first `/` by whitespace is
/// never folded into the options.
#[instrument(level = "trace")]
pub fn parse_query(text: &str) -> ParsedQuery {
    let text = text.trim();

    let Some(first_slash) = text.find('/') else {
        let (brand, model) = brand_and_model(text);
        trace!(%brand, %model, "No options in query");
        return ParsedQuery {
            brand,
            model,
            raw_options: String::new(),
        };
    };

    let (brand, model) = brand_and_model(&text[..first_slash]);
    let start = options_start(text, first_slash);
    let end = options_end(text, first_slash);
    let raw_options = text[start..end].trim().to_string();

    trace!(%brand, %model, %raw_options, "Parsed query");
    ParsedQuery {
        brand,
        model,
        raw_options,
    }
}

/// Start of the options span: the first slash, or the start of the token
/// glued to it when that token is a meaningful word past brand and model.
fn options_start(text: &str, first_slash: usize) -> usize {
    let head = &text[..first_slash];
    let glued = head.rsplit(char::is_whitespace).next().unwrap_or_default();

    // A glued brand or model stays out of the options.
    if glued.is_empty() || is_stopword(glued) || meaningful_words(head).len() <= 2 {
        first_slash
    } else {
        first_slash - glued.len()
    }
}

/// End of the options span.
///
/// Hops from slash to slash until none is left. The token after the last
/// slash belongs to the span when it is followed by whitespace and is a
/// non-empty word; with no whitespace after it the span runs to the end.
fn options_end(text: &str, first_slash: usize) -> usize {
    let mut last_slash = first_slash;
    while let Some(offset) = text[last_slash + 1..].find('/') {
        last_slash += 1 + offset;
    }

    let tail = &text[last_slash + 1..];
    match tail.find(char::is_whitespace) {
        None => text.len(),
        Some(space) => {
            let token = &tail[..space];
            if !token.is_empty() && !token.starts_with('/') {
                last_slash + 1 + space
            } else {
                last_slash + 1
            }
        }
    }
}

/// Split a raw options fragment such as `/160/EEC/PLK/UK6` into option codes.
///
/// Fragments are trimmed, empty ones dropped, order and duplicates kept.
/// Accepts `&str` or `Option<&str>`; `None` and `""` both give an empty list.
pub fn split_options<'a>(raw_options: impl Into<Option<&'a str>>) -> Vec<String> {
    let Some(raw) = raw_options.into() else {
        return Vec::new();
    };

    raw.split('/')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect()
}
