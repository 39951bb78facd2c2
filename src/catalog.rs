//! Equipment records from a tab-separated quote catalog.
//!
//! Rows carry many columns; only `eqBrand`, `eqModel` and `options` matter
//! here. Columns are located by name in the header row.

use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::ai::config::AiConfig;
use crate::normalize::{normalize, NormalizedRecord};
use crate::parsing::split_options;

pub const BRAND_COLUMN: &str = "eqBrand";
pub const MODEL_COLUMN: &str = "eqModel";
pub const OPTIONS_COLUMN: &str = "options";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquipmentRecord {
    pub brand: String,
    pub model: String,
    /// Slash-separated option codes as stored in the catalog.
    pub options: String,
}

/// Pull brand, model and options out of one catalog row.
///
/// Missing columns and short rows give empty fields.
pub fn extract_record(header: &str, line: &str) -> EquipmentRecord {
    let columns: Vec<&str> = header.split('\t').map(str::trim).collect();
    let fields: Vec<&str> = line.split('\t').collect();

    let field = |name: &str| -> String {
        columns
            .iter()
            .position(|column| *column == name)
            .and_then(|idx| fields.get(idx))
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    };

    let record = EquipmentRecord {
        brand: field(BRAND_COLUMN),
        model: field(MODEL_COLUMN),
        options: field(OPTIONS_COLUMN),
    };
    trace!(?record, "Extracted catalog record");
    record
}

impl EquipmentRecord {
    /// Free-form text handed to the normalizer: `"{brand} {model} {options}"`.
    ///
    /// Options repeating the brand or model are dropped first.
    pub fn query_text(&self) -> String {
        let brand = self.brand.to_lowercase();
        let model = self.model.to_lowercase();
        let options: Vec<String> = split_options(self.options.as_str())
            .into_iter()
            .filter(|option| {
                let option = option.to_lowercase();
                option != brand && option != model
            })
            .collect();

        if options.is_empty() {
            format!("{} {}", self.brand, self.model)
        } else {
            format!("{} {} {}", self.brand, self.model, options.join("/"))
        }
    }
}

/// Normalize a catalog record, keeping its brand and model.
#[instrument(level = "trace", skip(client))]
pub async fn analyze_record(
    client: Option<&AiConfig>,
    record: &EquipmentRecord,
) -> NormalizedRecord {
    normalize(client, &record.query_text(), &record.brand, &record.model).await
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "quoteid\tcreateddate\tcontactname\tID\trecord_id\tcreateddate\tQuoteID\teqModel\teqBrand\toptions";

    #[test]
    fn extracts_named_columns() {
        let line = "38691\t2025-04-30\tJane Doe\t4468233\t122123\tNULL\t38691\tMS2090A\tAnritsu\t0031/0090/0104";
        assert_eq!(
            extract_record(HEADER, line),
            EquipmentRecord {
                brand: "Anritsu".to_string(),
                model: "MS2090A".to_string(),
                options: "0031/0090/0104".to_string(),
            }
        );
    }

    #[test]
    fn short_row_gives_empty_fields() {
        let record = extract_record(HEADER, "1\t2025-01-01\tJohn\t2\t3\tNULL\t1\tE4980A");
        assert_eq!(record.model, "E4980A");
        assert_eq!(record.brand, "");
        assert_eq!(record.options, "");
    }

    #[test]
    fn missing_header_column_gives_empty_field() {
        let record = extract_record("eqBrand\teqModel", "Agilent\t8596E\t004/041");
        assert_eq!(record.brand, "Agilent");
        assert_eq!(record.options, "");
    }

    #[test]
    fn query_text_drops_model_and_empty_options() {
        let record = EquipmentRecord {
            brand: "Agilent / HP".to_string(),
            model: "33120A".to_string(),
            options: "/001/33120a/".to_string(),
        };
        assert_eq!(record.query_text(), "Agilent / HP 33120A 001");
    }

    #[test]
    fn slash_in_brand_hides_options_from_local_parser() {
        // The first `/` sits inside the brand, so the options span is just "/".
        let record = EquipmentRecord {
            brand: "Agilent / HP".to_string(),
            model: "33120A".to_string(),
            options: "001".to_string(),
        };
        let normalized = crate::normalize::normalize_locally(
            &record.query_text(),
            &record.brand,
            &record.model,
        );
        assert_eq!(normalized.normalized.brand, "Agilent / HP");
        assert!(normalized.normalized.options.is_empty());
    }

    #[test]
    fn query_text_without_options() {
        let record = EquipmentRecord {
            brand: "BOONTON".to_string(),
            model: "4500C".to_string(),
            options: String::new(),
        };
        assert_eq!(record.query_text(), "BOONTON 4500C");
    }
}
