//! Lenient parsers for classifier responses.

use std::sync::LazyLock;

use manasx_core::types::AiDetection;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

macro_rules! response_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

response_pattern!(RE_IS_LIKELY_AI, r#"(?i)"?is_?likely_?ai"?\s*[:=]\s*"?(true|false|yes|no)"#);
response_pattern!(RE_CONFIDENCE, r#"(?i)"?confidence"?\s*[:=]\s*"?([0-9]+(?:\.[0-9]+)?)\s*(%)?"#);
response_pattern!(RE_REASON_LINE, r"(?m)^\s*(?:[-*•]|\d+[.)])\s+(.+?)\s*$");

/// One best-practice remark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestPracticeFinding {
    #[serde(default)]
    pub line: usize,
    pub message: String,
    #[serde(default)]
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    #[serde(default)]
    pub metrics: serde_json::Map<String, Value>,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// The outermost `{...}` or `[...]` span in `raw`, if any.
fn extract_json(raw: &str, open: char, close: char) -> Option<&str> {
    let start = raw.find(open)?;
    let end = raw.rfind(close)?;
    (start < end).then(|| &raw[start..=end])
}

/// `[{line, message, suggestion}]`, bare or wrapped in `{"findings": [...]}`.
/// Entries without a message are dropped.
pub fn parse_best_practice(raw: &str) -> Vec<BestPracticeFinding> {
    let value = extract_json(raw, '[', ']')
        .and_then(|s| serde_json::from_str::<Value>(s).ok())
        .or_else(|| {
            extract_json(raw, '{', '}')
                .and_then(|s| serde_json::from_str::<Value>(s).ok())
                .and_then(|v| v.get("findings").cloned())
        });
    let Some(Value::Array(items)) = value else {
        tracing::debug!("best-practice response had no findings array");
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<BestPracticeFinding>(item).ok())
        .filter(|f| !f.message.trim().is_empty())
        .collect()
}

pub fn parse_performance(raw: &str) -> PerformanceReport {
    extract_json(raw, '{', '}')
        .and_then(|s| serde_json::from_str::<PerformanceReport>(s).ok())
        .unwrap_or_else(|| {
            tracing::debug!("performance response was not a report object");
            PerformanceReport::default()
        })
}

/// JSON first, then `isLikelyAI: true` / `confidence: 85%` style text.
/// Confidence above 1 is read as a percentage. Neutral when neither yields
/// a verdict.
pub fn parse_provenance(raw: &str) -> AiDetection {
    if let Some(detection) = extract_json(raw, '{', '}')
        .and_then(|s| serde_json::from_str::<Value>(s).ok())
        .and_then(|v| provenance_from_json(&v))
    {
        return detection;
    }
    provenance_from_text(raw).unwrap_or_else(AiDetection::neutral)
}

fn provenance_from_json(value: &Value) -> Option<AiDetection> {
    let is_likely_ai = match value.get("isLikelyAI").or_else(|| value.get("is_likely_ai"))? {
        Value::Bool(b) => *b,
        Value::String(s) => parse_bool(s)?,
        _ => return None,
    };
    let confidence = match value.get("confidence") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim_end_matches('%').trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    let indicators = ["reasons", "indicators", "sections"]
        .iter()
        .filter_map(|key| value.get(*key)?.as_array())
        .flatten()
        .filter_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        })
        .collect();
    let recommendation = value
        .get("recommendation")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    Some(finish(is_likely_ai, confidence, indicators, recommendation))
}

fn provenance_from_text(raw: &str) -> Option<AiDetection> {
    let re = RE_IS_LIKELY_AI.as_ref()?;
    let is_likely_ai = parse_bool(re.captures(raw)?.get(1)?.as_str())?;
    let confidence = RE_CONFIDENCE
        .as_ref()
        .and_then(|re| re.captures(raw))
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0);
    let indicators = RE_REASON_LINE
        .as_ref()
        .map(|re| {
            re.captures_iter(raw)
                .filter_map(|c| c.get(1).map(|m| m.as_str().to_string()))
                .collect()
        })
        .unwrap_or_default();
    Some(finish(is_likely_ai, confidence, indicators, String::new()))
}

fn finish(
    is_likely_ai: bool,
    confidence: f64,
    indicators: Vec<String>,
    recommendation: String,
) -> AiDetection {
    // "NaN" and "inf" parse as f64 but serialize as null.
    let confidence = if !confidence.is_finite() {
        0.0
    } else if confidence > 1.0 {
        confidence / 100.0
    } else {
        confidence
    };
    let recommendation = if recommendation.is_empty() && is_likely_ai {
        "Review AI-generated code before merging".to_string()
    } else {
        recommendation
    };
    AiDetection {
        is_likely_ai,
        confidence: confidence.clamp(0.0, 1.0),
        indicators,
        recommendation,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provenance_json_wrapped_in_prose() {
        let raw = r#"Here is my analysis:
{"isLikelyAI": true, "confidence": 85, "reasons": ["uniform comments", "generic names"]}
Hope that helps."#;
        let d = parse_provenance(raw);
        assert!(d.is_likely_ai);
        assert!((d.confidence - 0.85).abs() < 1e-9);
        assert_eq!(d.indicators.len(), 2);
        assert!(!d.recommendation.is_empty());
    }

    #[test]
    fn provenance_free_text_fallback() {
        let raw = "isLikelyAI: yes\nConfidence: 0.7\nReasons:\n- boilerplate error handling\n- verbose docs\n";
        let d = parse_provenance(raw);
        assert!(d.is_likely_ai);
        assert!((d.confidence - 0.7).abs() < 1e-9);
        assert_eq!(
            d.indicators,
            vec!["boilerplate error handling", "verbose docs"]
        );
    }

    #[test]
    fn non_finite_confidence_becomes_zero() {
        for raw in [
            r#"{"isLikelyAI": true, "confidence": "NaN"}"#,
            r#"{"isLikelyAI": true, "confidence": "inf"}"#,
            r#"{"isLikelyAI": false, "confidence": "-infinity"}"#,
        ] {
            let d = parse_provenance(raw);
            assert_eq!(d.confidence, 0.0, "{raw}");
            let json = serde_json::to_string(&d).unwrap();
            let back: AiDetection = serde_json::from_str(&json).unwrap();
            assert_eq!(back, d);
        }
    }

    #[test]
    fn garbage_is_neutral() {
        assert_eq!(parse_provenance("I cannot tell."), AiDetection::neutral());
        assert_eq!(parse_provenance("{not json"), AiDetection::neutral());
        assert!(parse_best_practice("nothing here").is_empty());
        assert_eq!(parse_performance("]["), PerformanceReport::default());
    }

    #[test]
    fn best_practice_bare_and_wrapped() {
        let bare = r#"[{"line": 3, "message": "Avoid var", "suggestion": "Use const"}, {"line": 4}]"#;
        let findings = parse_best_practice(bare);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].line, 3);

        let wrapped = r#"{"findings": [{"message": "Missing error handling"}]}"#;
        let findings = parse_best_practice(wrapped);
        assert_eq!(findings[0].line, 0);
        assert_eq!(findings[0].suggestion, "");
    }

    #[test]
    fn performance_report() {
        let raw = r#"```json
{"metrics": {"loops": 3}, "issues": ["nested loop"], "suggestions": ["use a map"]}
```"#;
        let report = parse_performance(raw);
        assert_eq!(report.issues, vec!["nested loop"]);
        assert_eq!(report.metrics.get("loops"), Some(&Value::from(3)));
    }
}
