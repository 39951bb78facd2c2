//! Prompts sent to the text-completion collaborator.
//!
//! The normalization prompt lists the same stop words the local parser
//! filters, taken from [`crate::stopwords::STOPWORDS`].

use std::sync::LazyLock;

use crate::stopwords::STOPWORDS;

/// System prompt for extracting brand, model and options from free text.
pub static NORMALIZATION_PROMPT: LazyLock<String> = LazyLock::new(|| {
    let ignored = STOPWORDS
        .iter()
        .map(|w| format!("'{w}'"))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are an expert options parser for electronic test equipment. Your job is to extract brand, model, and options from free-form text.\n\
         \n\
         PARSING RULES:\n\
         1) BRAND & MODEL:\n\
         \x20  - Take the FIRST TWO meaningful words before the first '/' character\n\
         \x20  - IGNORE these words in any letter case: {ignored}\n\
         \x20  - First meaningful word = BRAND, second meaningful word = MODEL\n\
         \n\
         2) OPTIONS:\n\
         \x20  - Find the FIRST '/' character in the text\n\
         \x20  - The word IMMEDIATELY BEFORE the first '/' is the FIRST OPTION\n\
         \x20  - Split everything from the first '/' onwards by '/' and keep every non-empty part\n\
         \x20  - Keep the original letter case and order of the options\n\
         \x20  - STOP at the first space after the last '/' sequence and IGNORE the text after it (e.g. 'has to be delivered soon')\n\
         \n\
         3) EXAMPLES:\n\
         \x20  Input: 'Enter a query like: Agilent 8116A /160/EEC/PLK/UK6 has to be delivered soon'\n\
         \x20  Output: {{\"normalized\": {{\"brand\": \"Agilent\", \"model\": \"8116A\", \"options\": [\"160\", \"EEC\", \"PLK\", \"UK6\"]}}, \"results\": []}}\n\
         \x20  Input: 'Agilent 8116A with options like 160/EEC/PLK/UK6 please deliver quickly'\n\
         \x20  Output: {{\"normalized\": {{\"brand\": \"Agilent\", \"model\": \"8116A\", \"options\": [\"160\", \"EEC\", \"PLK\", \"UK6\"]}}, \"results\": []}}\n\
         \n\
         4) OUTPUT FORMAT:\n\
         \x20  - Return ONLY a JSON object with 'normalized' and 'results' keys\n\
         \x20  - 'normalized' contains brand (string), model (string), options (array of strings)\n\
         \x20  - 'results' is an empty array\n\
         \x20  - NO free text, ONLY JSON\n"
    )
});

/// User prompt wrapping the text to normalize.
pub fn build_normalization_prompt(original_text: &str) -> String {
    format!(
        "PARSE THIS INPUT TEXT:\n\n\
         ORIGINAL TEXT: {original_text}\n\n\
         EXTRACTION TASK:\n\
         1) Extract the brand (first meaningful word before '/')\n\
         2) Extract the model (second meaningful word before '/')\n\
         3) Extract ALL options (the word before the first '/' and everything after it, split by '/')\n\
         4) Ignore any text after the last option\n\n\
         OUTPUT: Return ONLY the JSON object with 'normalized' and 'results' keys."
    )
}

/// System prompt for explaining a single option code.
pub const OPTION_EXPLANATION_PROMPT: &str =
    "You are a helpful expert explaining test equipment options in simple terms.";

pub fn build_option_explanation_prompt(brand: &str, model: &str, option: &str) -> String {
    format!(
        "Explain briefly what option '{option}' means for {brand} {model}. \
         Include what it adds or changes, typical functionality, and any compatibility considerations. \
         Answer in 3-5 concise sentences in simple terms."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_prompt_lists_every_stopword() {
        for word in STOPWORDS {
            assert!(
                NORMALIZATION_PROMPT.contains(&format!("'{word}'")),
                "missing {word}"
            );
        }
    }

    #[test]
    fn user_prompt_embeds_text() {
        let prompt = build_normalization_prompt("Tektronix TDS744A 13/1F");
        assert!(prompt.contains("ORIGINAL TEXT: Tektronix TDS744A 13/1F\n"));
    }

    #[test]
    fn explanation_prompt_names_equipment() {
        let prompt = build_option_explanation_prompt("Anritsu", "MS2090A", "0031");
        assert!(prompt.starts_with("Explain briefly what option '0031' means for Anritsu MS2090A."));
    }
}
