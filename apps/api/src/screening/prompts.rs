// Prompt constants for resume suggestions.

/// Suggestion prompt template. Replace `{score}`, `{category_scores}`,
/// `{matched}`, `{missing}` and `{excerpt}` before sending.
pub const SUGGESTIONS_PROMPT_TEMPLATE: &str = r#"A resume was screened against a keyword set.

Overall match: {score}%
Category scores (percent): {category_scores}
Matched keywords: {matched}
Missing keywords: {missing}

Resume excerpt:
"""
{excerpt}
"""

Return a JSON object with this EXACT schema (no extra fields):
{
  "summary": "One or two sentences on how well the resume fits the keyword set.",
  "suggestions": [
    "A concrete, specific change the candidate could make."
  ]
}

Give at most 6 suggestions, most impactful first."#;
