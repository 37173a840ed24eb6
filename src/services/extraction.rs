//! Turning free provider text into a [`Problem`].
//!
//! Providers often wrap the requested JSON in prose or code fences, so the default
//! extractor takes the widest `{ ... }` span and validates it. Callers depend only on
//! [`ProblemExtractor`], so a stricter extractor can replace it.

use crate::error::{Error, Result};
use crate::models::problem::Problem;
use serde_json::Value as JsonValue;

pub trait ProblemExtractor: Send + Sync {
    fn extract(&self, raw: &str) -> Result<Problem>;
}

/// First `{` to last `}`, parsed as JSON, then checked against the problem schema.
#[derive(Debug, Clone, Copy, Default)]
pub struct BraceSpanExtractor;

impl ProblemExtractor for BraceSpanExtractor {
    fn extract(&self, raw: &str) -> Result<Problem> {
        let span = json_span(raw).ok_or_else(|| {
            Error::MalformedProviderResponse("AI response does not contain a JSON object".into())
        })?;

        let value: JsonValue = serde_json::from_str(span).map_err(|e| {
            Error::MalformedProviderResponse(format!("Failed to parse AI response as JSON: {}", e))
        })?;

        coerce_problem(&value)
    }
}

pub fn json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&text[start..=end])
}

fn coerce_problem(value: &JsonValue) -> Result<Problem> {
    let problem_text = value
        .get("problem_text")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            Error::InvalidProblemStructure("problem_text must be a non-empty string".into())
        })?;

    let final_answer = value
        .get("final_answer")
        .and_then(whole_number)
        .ok_or_else(|| {
            Error::InvalidProblemStructure("final_answer must be a whole number".into())
        })?;

    Ok(Problem {
        problem_text: problem_text.to_string(),
        final_answer,
    })
}

/// Accepts JSON integers and integral floats (`12.0`) that fit in an `i64`.
pub fn whole_number(value: &JsonValue) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(raw: &str) -> Result<Problem> {
        BraceSpanExtractor.extract(raw)
    }

    #[test]
    fn finds_json_wrapped_in_prose_and_fences() {
        let raw = "Sure! Here is one:\n```json\n{\"problem_text\":\"A farmer has 7 cows and buys 5 more. How many cows now?\",\"final_answer\":12}\n```\nEnjoy!";
        let problem = extract(raw).unwrap();
        assert_eq!(
            problem.problem_text,
            "A farmer has 7 cows and buys 5 more. How many cows now?"
        );
        assert_eq!(problem.final_answer, 12);
    }

    #[test]
    fn span_is_greedy_across_nested_braces() {
        assert_eq!(json_span("x {a {b} c} y"), Some("{a {b} c}"));
        assert_eq!(json_span("} before {"), None);
        assert_eq!(json_span("no braces"), None);
    }

    #[test]
    fn missing_or_broken_json_is_malformed() {
        assert!(matches!(
            extract("I could not think of a problem."),
            Err(Error::MalformedProviderResponse(_))
        ));
        assert!(matches!(
            extract("{problem_text: 'oops'}"),
            Err(Error::MalformedProviderResponse(_))
        ));
    }

    #[test]
    fn wrong_shape_is_invalid_structure() {
        let cases = [
            r#"{"final_answer": 3}"#,
            r#"{"problem_text": "", "final_answer": 3}"#,
            r#"{"problem_text": "   ", "final_answer": 3}"#,
            r#"{"problem_text": 42, "final_answer": 3}"#,
            r#"{"problem_text": "ok"}"#,
            r#"{"problem_text": "ok", "final_answer": "12"}"#,
            r#"{"problem_text": "ok", "final_answer": 2.5}"#,
        ];
        for raw in cases {
            assert!(
                matches!(extract(raw), Err(Error::InvalidProblemStructure(_))),
                "{raw}"
            );
        }
    }

    #[test]
    fn integral_floats_count_as_whole_numbers() {
        assert_eq!(whole_number(&json!(12.0)), Some(12));
        assert_eq!(whole_number(&json!(-4)), Some(-4));
        assert_eq!(whole_number(&json!(1e30)), None);
        assert_eq!(whole_number(&json!(null)), None);
    }
}
