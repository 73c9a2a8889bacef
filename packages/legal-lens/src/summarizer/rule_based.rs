//! Deterministic keyword summarizer, used whenever the remote model is
//! unavailable or unusable.

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;

use super::Summarizer;
use crate::error::RemoteResult;
use crate::types::summary::{
    ExtractedText, RiskFinding, Severity, SummaryOrigin, SummaryResult, MAX_KEY_POINTS,
};

/// Sentences shorter than this (after trimming) are ignored.
pub const MIN_SENTENCE_CHARS: usize = 20;

/// Key points longer than this are cut.
pub const MAX_KEY_POINT_CHARS: usize = 150;

/// Returned with every rule-based summary.
pub const RECOMMENDATIONS: [&str; 4] = [
    "Review data sharing policies",
    "Understand termination conditions",
    "Check liability limitations",
    "Note dispute resolution process",
];

lazy_static! {
    static ref SENTENCE_BOUNDARY: Regex = Regex::new(r"[.!?]+").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    // Key-point detectors, in output order
    static ref KEY_POINT_PATTERNS: Vec<Regex> = [
        r"(?i)data collect",
        r"(?i)personal information",
        r"(?i)third.{0,10}part",
        r"(?i)termination",
        r"(?i)liability",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    static ref RISK_RULES: Vec<(Regex, Severity, &'static str)> = vec![
        (
            Regex::new(r"(?i)not liable").unwrap(),
            Severity::High,
            "Company limits liability",
        ),
        (
            Regex::new(r"(?i)share.{0,20}information").unwrap(),
            Severity::Medium,
            "Data sharing with third parties",
        ),
        // "terminate" or "termination"
        (
            Regex::new(r"(?i)terminat.{0,20}account").unwrap(),
            Severity::Medium,
            "Account termination rights",
        ),
    ];
}

/// Keyword-driven summarizer. Pure: the same text always gives the same
/// result.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedSummarizer;

impl RuleBasedSummarizer {
    pub fn new() -> Self {
        Self
    }

    /// Summarize without going through the async trait.
    pub fn summarize_text(&self, text: &str) -> SummaryResult {
        let sentences = split_sentences(text);

        SummaryResult {
            key_points: key_points(&sentences),
            risks: risks(&sentences),
            recommendations: RECOMMENDATIONS.iter().map(|r| r.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Summarizer for RuleBasedSummarizer {
    async fn summarize(&self, text: &ExtractedText) -> RemoteResult<SummaryResult> {
        Ok(self.summarize_text(text.as_str()))
    }

    fn origin(&self) -> SummaryOrigin {
        SummaryOrigin::RuleBased
    }
}

/// Split on runs of `.`, `!`, `?` and keep trimmed fragments of at least
/// [`MIN_SENTENCE_CHARS`] characters.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_BOUNDARY
        .split(text)
        .map(str::trim)
        .filter(|s| s.chars().count() >= MIN_SENTENCE_CHARS)
        .collect()
}

fn key_points(sentences: &[&str]) -> Vec<String> {
    KEY_POINT_PATTERNS
        .iter()
        .filter_map(|pattern| sentences.iter().find(|s| pattern.is_match(s)))
        .map(|sentence| clean_sentence(sentence))
        .take(MAX_KEY_POINTS)
        .collect()
}

fn risks(sentences: &[&str]) -> Vec<RiskFinding> {
    RISK_RULES
        .iter()
        .filter(|(pattern, _, _)| sentences.iter().any(|s| pattern.is_match(s)))
        .map(|(_, severity, description)| RiskFinding::new(*severity, *description))
        .collect()
}

/// Collapse whitespace, trim, and cut to [`MAX_KEY_POINT_CHARS`] characters
/// with a trailing `...` when cut.
pub fn clean_sentence(sentence: &str) -> String {
    let collapsed = WHITESPACE.replace_all(sentence, " ");
    let collapsed = collapsed.trim();

    match collapsed.char_indices().nth(MAX_KEY_POINT_CHARS) {
        Some((cut, _)) => format!("{}...", &collapsed[..cut]),
        None => collapsed.to_string(),
    }
}
