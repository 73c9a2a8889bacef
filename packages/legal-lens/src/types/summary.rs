//! Summary types - the risk-oriented result of analyzing one legal document.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

/// Hard cap on the characters handed to a summarizer.
pub const MAX_EXTRACTED_CHARS: usize = 4000;

/// Appended to text cut at [`MAX_EXTRACTED_CHARS`].
pub const TRUNCATION_MARKER: &str = "...";

/// Key points kept per summary.
pub const MAX_KEY_POINTS: usize = 5;

/// Key point written into the placeholder for an unparseable model response.
pub const DEGRADED_KEY_POINT: &str = "Failed to parse summary.";

/// Plain document text, bounded for summarization.
///
/// Text longer than [`MAX_EXTRACTED_CHARS`] characters is cut and marked with
/// [`TRUNCATION_MARKER`], so the stored text may exceed the cap by the
/// marker's length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    text: String,
    truncated: bool,
}

impl ExtractedText {
    /// Bound `text` to [`MAX_EXTRACTED_CHARS`] characters.
    pub fn new(text: impl Into<String>) -> Self {
        let mut text = text.into();
        let truncated = match text.char_indices().nth(MAX_EXTRACTED_CHARS) {
            Some((cut, _)) => {
                text.truncate(cut);
                text.push_str(TRUNCATION_MARKER);
                true
            }
            None => false,
        };
        Self { text, truncated }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the source text was cut.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

/// How serious a flagged risk is.
///
/// Serialized lowercase; parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(de::Error::unknown_variant(&raw, &["high", "medium", "low"])),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        })
    }
}

/// A flagged concern with its severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFinding {
    pub severity: Severity,
    pub description: String,
}

impl RiskFinding {
    pub fn new(severity: Severity, description: impl Into<String>) -> Self {
        Self {
            severity,
            description: description.into(),
        }
    }
}

/// Structured summary of a legal document.
///
/// All three sequences are always present (possibly empty). The serialized
/// field names match the JSON shape the remote model is asked to produce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    /// Notable clauses, at most [`MAX_KEY_POINTS`]
    pub key_points: Vec<String>,

    /// Flagged risks in detection order
    pub risks: Vec<RiskFinding>,

    /// Suggested follow-ups for the reader
    pub recommendations: Vec<String>,
}

impl SummaryResult {
    /// Placeholder used when a model response could not be parsed.
    pub fn degraded() -> Self {
        Self {
            key_points: vec![DEGRADED_KEY_POINT.to_string()],
            risks: Vec::new(),
            recommendations: Vec::new(),
        }
    }

    /// Whether this is the [`SummaryResult::degraded`] placeholder.
    pub fn is_degraded(&self) -> bool {
        *self == Self::degraded()
    }

    /// Whether nothing at all was produced.
    pub fn is_empty(&self) -> bool {
        self.key_points.is_empty() && self.risks.is_empty() && self.recommendations.is_empty()
    }

    /// Shape check applied before trusting a remote result.
    pub fn is_usable(&self) -> bool {
        !self.is_empty() && !self.is_degraded()
    }

    /// Drop key points beyond [`MAX_KEY_POINTS`].
    pub fn with_key_point_cap(mut self) -> Self {
        self.key_points.truncate(MAX_KEY_POINTS);
        self
    }
}

/// Where an analysis result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryOrigin {
    /// Served from the session cache
    Cached,
    /// Written by the remote model
    Remote,
    /// Produced by the deterministic rule engine
    RuleBased,
}

impl fmt::Display for SummaryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cached => "cached",
            Self::Remote => "remote model",
            Self::RuleBased => "rule-based",
        })
    }
}

/// A summary together with the document it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub url: String,
    pub summary: SummaryResult,
    pub origin: SummaryOrigin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_not_truncated() {
        let text = ExtractedText::new("short");
        assert_eq!(text.as_str(), "short");
        assert!(!text.is_truncated());
    }

    #[test]
    fn test_text_at_cap_is_not_truncated() {
        let raw = "a".repeat(MAX_EXTRACTED_CHARS);
        let text = ExtractedText::new(raw.clone());
        assert_eq!(text.as_str(), raw);
        assert!(!text.is_truncated());
    }

    #[test]
    fn test_long_text_is_cut_and_marked() {
        let text = ExtractedText::new("a".repeat(MAX_EXTRACTED_CHARS + 10));
        assert!(text.is_truncated());
        assert!(text.as_str().ends_with(TRUNCATION_MARKER));
        assert_eq!(
            text.as_str().chars().count(),
            MAX_EXTRACTED_CHARS + TRUNCATION_MARKER.len()
        );
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let text = ExtractedText::new("é".repeat(MAX_EXTRACTED_CHARS + 1));
        assert!(text.is_truncated());
        assert_eq!(
            text.as_str().trim_end_matches(TRUNCATION_MARKER).chars().count(),
            MAX_EXTRACTED_CHARS
        );
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = SummaryResult {
            key_points: vec!["point".into()],
            risks: vec![RiskFinding::new(Severity::High, "risk")],
            recommendations: vec![],
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["keyPoints"][0], "point");
        assert_eq!(json["risks"][0]["severity"], "high");
        assert_eq!(json["recommendations"], serde_json::json!([]));
    }

    #[test]
    fn test_severity_parses_any_case() {
        for (raw, expected) in [
            ("\"high\"", Severity::High),
            ("\"High\"", Severity::High),
            ("\"MEDIUM\"", Severity::Medium),
            ("\" Low \"", Severity::Low),
        ] {
            assert_eq!(serde_json::from_str::<Severity>(raw).unwrap(), expected);
        }
        assert!(serde_json::from_str::<Severity>("\"extreme\"").is_err());
        assert_eq!(serde_json::to_string(&Severity::Medium).unwrap(), "\"medium\"");
    }

    #[test]
    fn test_summary_requires_all_fields() {
        let partial = r#"{"keyPoints": ["a"], "risks": []}"#;
        assert!(serde_json::from_str::<SummaryResult>(partial).is_err());
    }

    #[test]
    fn test_degraded_is_not_usable() {
        assert!(SummaryResult::degraded().is_degraded());
        assert!(!SummaryResult::degraded().is_usable());
        assert!(!SummaryResult::default().is_usable());
    }

    #[test]
    fn test_key_point_cap() {
        let summary = SummaryResult {
            key_points: (0..8).map(|i| format!("point {i}")).collect(),
            ..Default::default()
        }
        .with_key_point_cap();
        assert_eq!(summary.key_points.len(), MAX_KEY_POINTS);
        assert_eq!(summary.key_points[4], "point 4");
    }
}
