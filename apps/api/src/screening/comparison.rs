//! Ranking and side-by-side comparison of scored documents.

use serde::Serialize;

use crate::errors::AppError;
use crate::models::analysis::{CategoryScores, MatchResult};

/// Orders results by descending score, ties broken by file name.
pub fn rank(results: &[MatchResult]) -> Vec<MatchResult> {
    let mut ranked = results.to_vec();
    ranked.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.file_name.cmp(&b.file_name))
    });
    ranked
}

#[derive(Debug, Clone, Serialize)]
pub struct ComparedDocument {
    pub file_name: String,
    pub score: f64,
    pub category_scores: CategoryScores,
    /// Keywords matched by this document and by none of the others compared.
    pub unique_matches: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub documents: Vec<ComparedDocument>,
    /// Keywords matched by every compared document.
    pub common_matches: Vec<String>,
    pub not_found: Vec<String>,
}

pub fn compare(results: &[MatchResult], file_names: &[String]) -> Result<Comparison, AppError> {
    let mut selected: Vec<&MatchResult> = Vec::new();
    let mut not_found = Vec::new();

    for name in file_names {
        if selected.iter().any(|r| &r.file_name == name) {
            continue;
        }
        match results.iter().find(|r| &r.file_name == name) {
            Some(result) => selected.push(result),
            None => not_found.push(name.clone()),
        }
    }

    if selected.len() < 2 {
        return Err(AppError::Validation(format!(
            "At least two analyzed documents are required for a comparison (found {})",
            selected.len()
        )));
    }

    let common_matches = distinct(&selected[0].matches)
        .into_iter()
        .filter(|k| selected.iter().all(|r| r.matches.contains(k)))
        .collect();

    let documents = selected
        .iter()
        .map(|result| {
            let unique_matches = distinct(&result.matches)
                .into_iter()
                .filter(|k| {
                    selected
                        .iter()
                        .filter(|other| other.file_name != result.file_name)
                        .all(|other| !other.matches.contains(k))
                })
                .collect();
            ComparedDocument {
                file_name: result.file_name.clone(),
                score: result.score,
                category_scores: result.category_scores,
                unique_matches,
                missing: result.missing.clone(),
            }
        })
        .collect();

    Ok(Comparison {
        documents,
        common_matches,
        not_found,
    })
}

/// First occurrence of each keyword, in order.
fn distinct(keywords: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(keywords.len());
    for k in keywords {
        if !out.contains(k) {
            out.push(k.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, score: f64, matches: &[&str]) -> MatchResult {
        MatchResult {
            file_name: name.to_string(),
            content: String::new(),
            matches: matches.iter().map(|s| s.to_string()).collect(),
            missing: vec![],
            score,
            category_scores: CategoryScores::default(),
        }
    }

    #[test]
    fn test_rank_orders_by_score_then_name() {
        let ranked = rank(&[
            result("b.pdf", 50.0, &[]),
            result("c.pdf", 90.0, &[]),
            result("a.pdf", 50.0, &[]),
        ]);
        let names: Vec<&str> = ranked.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["c.pdf", "a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_compare_common_and_unique() {
        let results = vec![
            result("a.pdf", 100.0, &["rust", "go", "aws"]),
            result("b.pdf", 66.0, &["rust", "aws", "k8s"]),
            result("c.pdf", 10.0, &["rust"]),
        ];
        let names = vec!["a.pdf".to_string(), "b.pdf".to_string()];
        let cmp = compare(&results, &names).unwrap();

        assert_eq!(cmp.common_matches, vec!["rust", "aws"]);
        assert_eq!(cmp.documents[0].unique_matches, vec!["go"]);
        assert_eq!(cmp.documents[1].unique_matches, vec!["k8s"]);
        assert!(cmp.not_found.is_empty());
    }

    #[test]
    fn test_compare_reports_unknown_files() {
        let results = vec![result("a.pdf", 1.0, &[]), result("b.pdf", 2.0, &[])];
        let names = vec![
            "a.pdf".to_string(),
            "ghost.pdf".to_string(),
            "b.pdf".to_string(),
        ];
        let cmp = compare(&results, &names).unwrap();
        assert_eq!(cmp.not_found, vec!["ghost.pdf"]);
        assert_eq!(cmp.documents.len(), 2);
    }

    #[test]
    fn test_compare_needs_two_documents() {
        let results = vec![result("a.pdf", 1.0, &[])];
        let names = vec!["a.pdf".to_string(), "a.pdf".to_string()];
        assert!(matches!(
            compare(&results, &names),
            Err(AppError::Validation(_))
        ));
    }
}
