//! Prompt for the remote summarizer.

/// Build the summarization prompt around the document text.
pub fn summary_prompt(content: &str) -> String {
    format!(
        r#"Analyze this Terms & Conditions document and extract:

1. 5 most important key points
2. Major risks/restrictions for users
3. 4 actionable recommendations

Content: "{content}"

Respond in JSON format:
{{
  "keyPoints": ["point1", "point2", "point3", "point4", "point5"],
  "risks": [{{"severity": "high|medium|low", "description": "risk description"}}],
  "recommendations": ["rec1", "rec2", "rec3", "rec4"]
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_content_and_shape() {
        let prompt = summary_prompt("You waive all rights.");
        assert!(prompt.contains("Content: \"You waive all rights.\""));
        assert!(prompt.contains("\"keyPoints\""));
        assert!(prompt.contains("\"severity\": \"high|medium|low\""));
        assert!(prompt.contains("\"recommendations\""));
    }
}
