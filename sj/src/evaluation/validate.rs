//! Strict and lenient validation of judge responses

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{CriteriaScores, Criterion, EvaluationResult, ResponseError};
use crate::extract;

type Fields = Map<String, Value>;

/// Validate a response that must be exactly one JSON object.
///
/// Shape problems are reported before range problems, so a response that is
/// both missing a key and out of range yields a schema error. A number too
/// large to represent as a float (e.g. `1e400`) is rejected by the JSON
/// parser itself and is therefore a parse error, not a range error.
pub fn validate_response(text: &str) -> Result<EvaluationResult, ResponseError> {
    debug!(len = text.len(), "validate_response: called");
    let value: Value = serde_json::from_str(text)?;
    let fields = value
        .as_object()
        .ok_or_else(|| ResponseError::Parse(format!("expected a JSON object, got {}", type_name(&value))))?;

    let score = number(fields, "score", "score")?;
    let reasoning = match fields.get("reasoning") {
        None => return Err(ResponseError::MissingKey("reasoning".to_string())),
        Some(Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(ResponseError::Parse(format!(
                "`reasoning` must be a string, got {}",
                type_name(other)
            )));
        }
    };
    let criteria = match fields.get("criteria_scores") {
        None => return Err(ResponseError::MissingKey("criteria_scores".to_string())),
        Some(Value::Object(map)) => map,
        Some(other) => {
            return Err(ResponseError::Parse(format!(
                "`criteria_scores` must be an object, got {}",
                type_name(other)
            )));
        }
    };

    let criteria_scores = CriteriaScores {
        detection_logic: criterion(criteria, Criterion::DetectionLogic)?,
        completeness: criterion(criteria, Criterion::Completeness)?,
        false_positive_rate: criterion(criteria, Criterion::FalsePositiveRate)?,
        technical_quality: criterion(criteria, Criterion::TechnicalQuality)?,
    };
    if let Some(extra) = criteria.keys().find(|k| Criterion::from_key(k).is_none()) {
        return Err(ResponseError::UnexpectedKey(format!("criteria_scores.{}", extra)));
    }

    in_range("score", score)?;
    for (c, s) in criteria_scores.iter() {
        in_range(&format!("criteria_scores.{}", c.key()), s)?;
    }

    let result = EvaluationResult {
        score,
        reasoning,
        criteria_scores,
    };
    debug!(score = result.score, "validate_response: accepted");
    Ok(result)
}

/// Validate raw model output, tolerating prose or code fences around the JSON.
pub fn parse_response(text: &str) -> Result<EvaluationResult, ResponseError> {
    debug!(len = text.len(), "parse_response: called");
    let trimmed = text.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        debug!("parse_response: text is a bare object");
        return validate_response(trimmed);
    }

    match extract::json_payload(text) {
        Some(payload) => {
            debug!(len = payload.len(), "parse_response: extracted JSON payload");
            validate_response(payload)
        }
        None => {
            warn!("parse_response: no JSON object found in response");
            Err(ResponseError::Parse("no JSON object found in response".to_string()))
        }
    }
}

fn criterion(criteria: &Fields, c: Criterion) -> Result<f64, ResponseError> {
    number(criteria, c.key(), &format!("criteria_scores.{}", c.key()))
}

fn number(fields: &Fields, key: &str, path: &str) -> Result<f64, ResponseError> {
    match fields.get(key) {
        None => Err(ResponseError::MissingKey(path.to_string())),
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| ResponseError::Parse(format!("`{}` is not representable as a float", path))),
        Some(other) => Err(ResponseError::Parse(format!(
            "`{}` must be a number, got {}",
            path,
            type_name(other)
        ))),
    }
}

fn in_range(path: &str, value: f64) -> Result<(), ResponseError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ResponseError::OutOfRange {
            field: path.to_string(),
            value,
        })
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
