//! Scoring — partitions a keyword set into matched / missing for one document
//! and computes overall and per-category percentages.
//!
//! Pure and deterministic: the same document and keyword set always produce
//! the same `MatchResult`.

use tracing::{debug, warn};

use crate::models::analysis::{BatchReport, CategoryScores, DocumentFailure, MatchResult};
use crate::models::document::Document;
use crate::models::keywords::{KeywordCategory, KeywordSet};
use crate::screening::matcher::KeywordMatcher;

pub fn score_document(document: &Document, keywords: &KeywordSet) -> MatchResult {
    let matcher = KeywordMatcher::new(&document.content);

    let mut matches = Vec::new();
    let mut missing = Vec::new();
    let mut category_scores = CategoryScores::default();

    for category in KeywordCategory::ALL {
        let list = keywords.get(category);
        let mut matched_in_category = 0usize;

        for keyword in list {
            if matcher.matches(keyword) {
                matched_in_category += 1;
                matches.push(keyword.clone());
            } else {
                missing.push(keyword.clone());
            }
        }

        // Denominator floor: an empty category reports 0 rather than NaN.
        let score = matched_in_category as f64 / list.len().max(1) as f64 * 100.0;
        category_scores.set(category, score);
    }

    let total = keywords.total();
    let score = if total == 0 {
        0.0
    } else {
        matches.len() as f64 / total as f64 * 100.0
    };

    MatchResult {
        file_name: document.file_name.clone(),
        content: document.content.clone(),
        matches,
        missing,
        score,
        category_scores,
    }
}

/// Scores every successfully extracted document; inputs that already failed
/// are carried through as failures. One failure never stops the batch.
pub fn analyze_batch<I>(inputs: I, keywords: &KeywordSet) -> BatchReport
where
    I: IntoIterator<Item = Result<Document, DocumentFailure>>,
{
    let mut report = BatchReport::default();

    for input in inputs {
        match input {
            Ok(document) => {
                let result = score_document(&document, keywords);
                debug!(
                    file_name = %result.file_name,
                    score = result.score,
                    matched = result.matches.len(),
                    "Scored document"
                );
                report.results.push(result);
            }
            Err(failure) => {
                warn!(
                    file_name = %failure.file_name,
                    reason = %failure.reason,
                    "Skipping document"
                );
                report.failures.push(failure);
            }
        }
    }

    report
}

/// Scores already-extracted documents.
pub fn score_documents(documents: &[Document], keywords: &KeywordSet) -> Vec<MatchResult> {
    documents
        .iter()
        .map(|d| score_document(d, keywords))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kw(skills: &[&str], experience: &[&str], location: &[&str], cert: &[&str]) -> KeywordSet {
        let owned = |v: &[&str]| -> Vec<String> { v.iter().map(|s| s.to_string()).collect() };
        KeywordSet {
            skills: owned(skills),
            experience: owned(experience),
            location: owned(location),
            certification: owned(cert),
        }
    }

    #[test]
    fn test_reference_scenario() {
        let keywords = kw(&["python", "java"], &["5+ years"], &[], &[]);
        let doc = Document::new("a.pdf", "5 years experience with Python development");

        let result = score_document(&doc, &keywords);
        assert_eq!(result.matches, vec!["python", "5+ years"]);
        assert_eq!(result.missing, vec!["java"]);
        assert!((result.score - 66.67).abs() < 0.01, "score was {}", result.score);
        assert_eq!(result.category_scores.location, 0.0);
        assert_eq!(result.category_scores.certification, 0.0);
        assert!((result.category_scores.skills - 50.0).abs() < f64::EPSILON);
        assert!((result.category_scores.experience - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_keyword_set_scores_zero() {
        let doc = Document::new("a.pdf", "anything at all");
        let result = score_document(&doc, &KeywordSet::default());
        assert_eq!(result.score, 0.0);
        assert!(result.matches.is_empty());
        assert!(result.missing.is_empty());
        assert_eq!(result.category_scores, CategoryScores::default());
    }

    #[test]
    fn test_partition_covers_every_keyword() {
        let keywords = kw(
            &["rust", "go", "rust"],
            &["1-3 years", "senior"],
            &["Berlin"],
            &["CKA", "PMP"],
        );
        let texts = [
            "",
            "Rust and Go engineer in Berlin, 2 years, CKA",
            "nothing relevant",
        ];
        for text in texts {
            let result = score_document(&Document::new("x.pdf", text), &keywords);
            assert_eq!(result.matches.len() + result.missing.len(), keywords.total());
            assert!((0.0..=100.0).contains(&result.score));
        }
    }

    #[test]
    fn test_duplicate_keywords_count_per_entry() {
        let keywords = kw(&["rust", "rust"], &[], &[], &[]);
        let result = score_document(&Document::new("x.pdf", "rust"), &keywords);
        assert_eq!(result.matches, vec!["rust", "rust"]);
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn test_matches_preserve_original_case() {
        let keywords = kw(&["PostgreSQL"], &[], &[], &[]);
        let result = score_document(&Document::new("x.pdf", "postgresql tuning"), &keywords);
        assert_eq!(result.matches, vec!["PostgreSQL"]);
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let keywords = kw(&["python", "sql"], &["3-5 years"], &["remote"], &[]);
        let doc = Document::new("x.pdf", "Remote Python engineer, four years");
        assert_eq!(
            score_document(&doc, &keywords),
            score_document(&doc, &keywords)
        );
    }

    #[test]
    fn test_batch_skips_failures_and_continues() {
        let keywords = kw(&["rust"], &[], &[], &[]);
        let inputs = vec![
            Ok(Document::new("good.pdf", "rust")),
            Err(DocumentFailure {
                file_name: "bad.pdf".to_string(),
                reason: "not a readable PDF".to_string(),
            }),
            Ok(Document::new("other.pdf", "python")),
        ];

        let report = analyze_batch(inputs, &keywords);
        assert_eq!(report.results.len(), 2);
        assert_eq!(report.results[0].file_name, "good.pdf");
        assert_eq!(report.results[1].file_name, "other.pdf");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].file_name, "bad.pdf");
    }
}
