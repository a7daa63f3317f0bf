//! Turning the model's reply text into a [`BrandFitEvaluation`].

use serde_json::Value;

use crate::types::{BrandFitEvaluation, JSON_PARSE_ERROR};

/// Remove a surrounding Markdown code fence (```` ``` ```` or ```` ```json ````).
///
/// Text that does not start with a fence is returned unchanged.
#[must_use]
pub fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    // Drop the opening fence line, whatever language tag it carries.
    let body = trimmed.split_once('\n').map_or("", |(_, rest)| rest);
    let body = body.trim_end();
    let body = match body.rsplit_once('\n') {
        Some((head, last)) if last.trim_start().starts_with("```") => head,
        None if body.trim_start().starts_with("```") => "",
        _ => body,
    };
    body.trim()
}

/// Parse the model reply.
///
/// A reply that is not a JSON object yields an absent score with reason
/// `"JSON parsing error"`. The score may be a JSON number or a numeric
/// string such as `"0.750"`; anything else (or a non-finite value) is absent.
#[must_use]
pub fn parse_evaluation(content: &str) -> BrandFitEvaluation {
    let json = strip_code_fence(content);
    let parsed: Value = match serde_json::from_str(json) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => {
            tracing::warn!(content = json, "model reply is not a JSON object");
            return BrandFitEvaluation::failed(JSON_PARSE_ERROR);
        }
        Err(e) => {
            tracing::warn!(error = %e, content = json, "model reply is not valid JSON");
            return BrandFitEvaluation::failed(JSON_PARSE_ERROR);
        }
    };

    let score = parsed.get("score").and_then(score_value);
    if let Some(s) = score {
        if !(0.0..=1.0).contains(&s) {
            tracing::warn!(score = s, "model score outside [0, 1]");
        }
    }
    let reason = parsed
        .get("reason")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    BrandFitEvaluation { score, reason }
}

fn score_value(value: &Value) -> Option<f64> {
    let score = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    score.is_finite().then_some(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json() {
        let eval = parse_evaluation(r#"{"score": 0.812, "reason": "Strong urban audience."}"#);
        assert_eq!(eval.score, Some(0.812));
        assert_eq!(eval.reason, "Strong urban audience.");
    }

    #[test]
    fn strips_json_code_fence() {
        let reply = "```json\n{\"score\": 0.25, \"reason\": \"Weak fit.\"}\n```";
        let eval = parse_evaluation(reply);
        assert_eq!(eval.score, Some(0.25));
        assert_eq!(eval.reason, "Weak fit.");
    }

    #[test]
    fn strips_bare_code_fence() {
        let reply = "```\n{\"score\": 1.0, \"reason\": \"Perfect.\"}\n```\n";
        assert_eq!(parse_evaluation(reply).score, Some(1.0));
    }

    #[test]
    fn fence_without_closing_line_still_parses() {
        let reply = "```json\n{\"score\": 0.5, \"reason\": \"Fine.\"}";
        assert_eq!(parse_evaluation(reply).score, Some(0.5));
    }

    #[test]
    fn accepts_string_score() {
        let eval = parse_evaluation(r#"{"score": "0.750", "reason": "ok"}"#);
        assert_eq!(eval.score, Some(0.75));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let eval = parse_evaluation("I think they are a great fit!");
        assert_eq!(eval, BrandFitEvaluation::failed("JSON parsing error"));
    }

    #[test]
    fn non_object_json_is_parse_error() {
        assert_eq!(parse_evaluation("[0.5]").reason, "JSON parsing error");
    }

    #[test]
    fn missing_or_garbage_score_is_absent() {
        assert_eq!(parse_evaluation(r#"{"reason": "no score"}"#).score, None);
        assert_eq!(parse_evaluation(r#"{"score": "high", "reason": "x"}"#).score, None);
        assert_eq!(parse_evaluation(r#"{"score": null, "reason": "x"}"#).score, None);
    }

    #[test]
    fn strip_code_fence_leaves_plain_text() {
        assert_eq!(strip_code_fence("  {\"a\":1}  "), "{\"a\":1}");
    }
}
