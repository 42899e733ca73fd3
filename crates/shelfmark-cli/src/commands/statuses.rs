use color_eyre::Result;
use comfy_table::Table;
use serde_json::json;
use shelfmark_core::synonym_entries;
use shelfmark_models::CanonicalStatus;

use crate::output::{Output, OutputFormat};

pub fn run_statuses(output: &Output) -> Result<()> {
    match output.format() {
        OutputFormat::Human => {
            let mut table = Table::new();
            table.set_header(vec!["Status", "Synonyms"]);
            for status in CanonicalStatus::ALL {
                table.add_row(vec![status.to_string(), synonyms_for(status).join(", ")]);
            }
            output.println(table.to_string());
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            let mut map = serde_json::Map::new();
            for status in CanonicalStatus::ALL {
                map.insert(status.as_str().to_string(), json!(synonyms_for(status)));
            }
            output.json(&serde_json::Value::Object(map));
        }
    }

    Ok(())
}

fn synonyms_for(status: CanonicalStatus) -> Vec<&'static str> {
    synonym_entries()
        .filter(|(_, s)| *s == status)
        .map(|(key, _)| key)
        .collect()
}
