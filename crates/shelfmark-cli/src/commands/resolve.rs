use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use shelfmark_core::{resolve, MatchKind, MatchResult};

use crate::output::{Output, OutputFormat};

pub fn run_resolve(values: &[String], output: &Output) -> Result<()> {
    let mut results = Vec::new();

    for value in values {
        let result = resolve(Some(value.as_str()));

        match output.format() {
            OutputFormat::Human => print_human(value, result, output),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                results.push(to_json(value, result));
            }
        }
    }

    if output.format() != OutputFormat::Human {
        output.json(&serde_json::Value::Array(results));
    }

    Ok(())
}

fn print_human(input: &str, result: MatchResult, output: &Output) {
    match result {
        MatchResult::Resolved {
            status,
            kind: MatchKind::Exact,
        } => {
            output.success(format!("'{}' -> {}", input, status.to_string().bold()));
        }
        MatchResult::Resolved {
            status,
            kind: MatchKind::Fuzzy(distance),
        } => {
            output.success(format!(
                "'{}' -> {} (fuzzy, distance {})",
                input,
                status.to_string().bold(),
                distance
            ));
        }
        MatchResult::Unresolved => {
            output.warn(format!("'{}' did not resolve", input));
        }
    }
}

fn to_json(input: &str, result: MatchResult) -> serde_json::Value {
    match result {
        MatchResult::Resolved { status, kind } => {
            let (match_kind, distance) = match kind {
                MatchKind::Exact => ("exact", None),
                MatchKind::Fuzzy(d) => ("fuzzy", Some(d)),
            };
            json!({
                "input": input,
                "status": status.as_str(),
                "match": match_kind,
                "distance": distance,
            })
        }
        MatchResult::Unresolved => json!({
            "input": input,
            "status": null,
            "match": null,
            "distance": null,
        }),
    }
}
