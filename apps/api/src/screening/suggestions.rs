//! Suggestions — human-readable advice for one scored resume.
//!
//! Default: `RuleBasedSuggester` (deterministic, no network).
//! Optional: `LlmSuggester`, which falls back to the rule-based report when the
//! LLM call fails. `AppState` holds an `Arc<dyn Suggester>` chosen at startup.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::llm_client::prompts::{EVIDENCE_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::analysis::MatchResult;
use crate::models::keywords::{KeywordCategory, KeywordSet};
use crate::screening::prompts::SUGGESTIONS_PROMPT_TEMPLATE;

const EXCERPT_CHARS: usize = 4000;
const TOP_GAPS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuggestionReport {
    pub summary: String,
    pub suggestions: Vec<String>,
    /// "rules" | "llm"
    pub backend: String,
}

#[async_trait]
pub trait Suggester: Send + Sync {
    async fn suggest(&self, result: &MatchResult, keywords: &KeywordSet) -> SuggestionReport;
}

// ────────────────────────────────────────────────────────────────────────────
// Rule-based
// ────────────────────────────────────────────────────────────────────────────

pub struct RuleBasedSuggester;

#[async_trait]
impl Suggester for RuleBasedSuggester {
    async fn suggest(&self, result: &MatchResult, keywords: &KeywordSet) -> SuggestionReport {
        build_rule_report(result, keywords)
    }
}

pub fn build_rule_report(result: &MatchResult, keywords: &KeywordSet) -> SuggestionReport {
    let summary = build_summary(result, keywords);

    let mut suggestions: Vec<String> = Vec::new();
    for (category, keyword) in keywords.entries() {
        if !result.missing.iter().any(|m| m == keyword) {
            continue;
        }
        let line = suggestion_for(category, keyword);
        if !suggestions.contains(&line) {
            suggestions.push(line);
        }
    }

    for category in KeywordCategory::ALL {
        if !keywords.get(category).is_empty() && result.category_scores.get(category) == 0.0 {
            suggestions.push(format!(
                "None of the {} keywords were found in this resume.",
                category.as_str()
            ));
        }
    }

    SuggestionReport {
        summary,
        suggestions,
        backend: "rules".to_string(),
    }
}

fn build_summary(result: &MatchResult, keywords: &KeywordSet) -> String {
    if keywords.is_empty() {
        return "No keywords defined. Add keywords to screen this resume.".to_string();
    }

    let score = result.score;
    let top_gaps: Vec<&str> = result
        .missing
        .iter()
        .take(TOP_GAPS)
        .map(String::as_str)
        .collect();

    if score >= 80.0 {
        format!("Strong match ({score:.0}%). The resume covers most of the keyword set.")
    } else if score >= 50.0 {
        format!(
            "Moderate match ({score:.0}%). Consider adding evidence for: {}.",
            top_gaps.join(", ")
        )
    } else {
        format!(
            "Low match ({score:.0}%). Significant gaps: {}.",
            top_gaps.join(", ")
        )
    }
}

fn suggestion_for(category: KeywordCategory, keyword: &str) -> String {
    match category {
        KeywordCategory::Skills => {
            format!("Show hands-on use of {keyword} in a project or role description.")
        }
        KeywordCategory::Experience => {
            format!("State the length of relevant experience explicitly (looking for {keyword}).")
        }
        KeywordCategory::Location => {
            format!("Mention location or relocation preference ({keyword}).")
        }
        KeywordCategory::Certification => {
            format!("List the {keyword} certification, or an equivalent credential, with its date.")
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LLM-backed
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LlmSuggestions {
    summary: String,
    #[serde(default)]
    suggestions: Vec<String>,
}

pub struct LlmSuggester(pub LlmClient);

#[async_trait]
impl Suggester for LlmSuggester {
    async fn suggest(&self, result: &MatchResult, keywords: &KeywordSet) -> SuggestionReport {
        if keywords.is_empty() {
            return build_rule_report(result, keywords);
        }

        let prompt = build_prompt(result);
        let system = format!("{JSON_ONLY_SYSTEM} {EVIDENCE_INSTRUCTION}");

        match self.0.call_json::<LlmSuggestions>(&prompt, &system).await {
            Ok(reply) => SuggestionReport {
                summary: reply.summary,
                suggestions: reply.suggestions,
                backend: "llm".to_string(),
            },
            Err(e) => {
                warn!(file_name = %result.file_name, error = %e, "LLM suggestions failed, using rules");
                build_rule_report(result, keywords)
            }
        }
    }
}

fn build_prompt(result: &MatchResult) -> String {
    let c = &result.category_scores;
    let category_scores = format!(
        "skills {:.0}, experience {:.0}, location {:.0}, certification {:.0}",
        c.skills, c.experience, c.location, c.certification
    );
    let excerpt: String = result.content.chars().take(EXCERPT_CHARS).collect();

    SUGGESTIONS_PROMPT_TEMPLATE
        .replace("{score}", &format!("{:.0}", result.score))
        .replace("{category_scores}", &category_scores)
        .replace("{matched}", &result.matches.join(", "))
        .replace("{missing}", &result.missing.join(", "))
        .replace("{excerpt}", &excerpt)
}
