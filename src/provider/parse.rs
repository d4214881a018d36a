//! Parsing of LLM completions into [`ProviderScore`].
//!
//! Expected shape:
//!
//! ```json
//! {"match_percent": 75, "strong_skills": [..], "missing_skills": [..], "explanation": ".."}
//! ```
//!
//! `match_percent` is mandatory and must be integral and within `0..=100`. The list and
//! explanation fields may be absent or `null`, but when present must have the right type.

use serde_json::{Map, Value};

use super::error::{ProviderError, ProviderResult};
use super::types::ProviderScore;

const PERCENT_FIELD: &str = "match_percent";
const MATCHED_FIELD: &str = "strong_skills";
const MISSING_FIELD: &str = "missing_skills";
const RATIONALE_FIELD: &str = "explanation";

/// Parses a raw completion into a validated score.
pub fn parse_score_reply(raw: &str) -> ProviderResult<ProviderScore> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(ProviderError::invalid("empty completion"));
    }

    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| ProviderError::invalid(format!("completion is not valid JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| ProviderError::invalid("completion is not a JSON object"))?;

    let percent = integral_percent(object)?;
    let matched = string_list(object, MATCHED_FIELD)?;
    let missing = string_list(object, MISSING_FIELD)?;
    let rationale = optional_string(object, RATIONALE_FIELD)?;

    ProviderScore::try_new(percent, matched, missing, rationale)
}

/// Removes Markdown code fences (```` ``` ```` and ```` ```json ````) and surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

fn integral_percent(object: &Map<String, Value>) -> ProviderResult<i64> {
    let value = object
        .get(PERCENT_FIELD)
        .ok_or_else(|| ProviderError::invalid(format!("missing {}", PERCENT_FIELD)))?;

    let Value::Number(number) = value else {
        return Err(ProviderError::invalid(format!(
            "{} is not a number",
            PERCENT_FIELD
        )));
    };

    if let Some(n) = number.as_i64() {
        return Ok(n);
    }

    match number.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() <= i64::MAX as f64 => Ok(f as i64),
        _ => Err(ProviderError::invalid(format!(
            "{} {} is not an integer",
            PERCENT_FIELD, number
        ))),
    }
}

fn string_list(object: &Map<String, Value>, field: &str) -> ProviderResult<Vec<String>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ProviderError::invalid(format!("{} has a non-string entry", field)))
            })
            .collect(),
        Some(_) => Err(ProviderError::invalid(format!("{} is not an array", field))),
    }
}

fn optional_string(object: &Map<String, Value>, field: &str) -> ProviderResult<String> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ProviderError::invalid(format!("{} is not a string", field))),
    }
}
