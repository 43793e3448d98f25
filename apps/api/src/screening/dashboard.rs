//! Dashboard — aggregate view over one analysis run.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::analysis::{CategoryScores, MatchResult};
use crate::models::keywords::{KeywordCategory, KeywordSet};

const BUCKETS: [(&str, f64, f64); 4] = [
    ("0-25", 0.0, 25.0),
    ("25-50", 25.0, 50.0),
    ("50-75", 50.0, 75.0),
    ("75-100", 75.0, 100.0),
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScoreBucket {
    pub range: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct KeywordCoverage {
    pub keyword: String,
    pub category: KeywordCategory,
    pub documents_matched: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub document_count: usize,
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub best_match: Option<String>,
    pub average_category_scores: CategoryScores,
    pub distribution: Vec<ScoreBucket>,
    pub keyword_coverage: Vec<KeywordCoverage>,
}

pub fn summarize(results: &[MatchResult], keywords: &KeywordSet) -> DashboardSummary {
    let document_count = results.len();

    let distribution = BUCKETS
        .iter()
        .map(|(range, lo, hi)| ScoreBucket {
            range: range.to_string(),
            count: results
                .iter()
                .filter(|r| in_bucket(r.score, *lo, *hi))
                .count(),
        })
        .collect();

    if document_count == 0 {
        return DashboardSummary {
            document_count,
            average_score: 0.0,
            highest_score: 0.0,
            lowest_score: 0.0,
            best_match: None,
            average_category_scores: CategoryScores::default(),
            distribution,
            keyword_coverage: vec![],
        };
    }

    let n = document_count as f64;
    let average_score = results.iter().map(|r| r.score).sum::<f64>() / n;
    let highest_score = results.iter().map(|r| r.score).fold(f64::MIN, f64::max);
    let lowest_score = results.iter().map(|r| r.score).fold(f64::MAX, f64::min);

    // First document reaching the highest score wins.
    let best_match = results
        .iter()
        .find(|r| r.score == highest_score)
        .map(|r| r.file_name.clone());

    let mut average_category_scores = CategoryScores::default();
    for category in KeywordCategory::ALL {
        let sum: f64 = results.iter().map(|r| r.category_scores.get(category)).sum();
        average_category_scores.set(category, sum / n);
    }

    DashboardSummary {
        document_count,
        average_score,
        highest_score,
        lowest_score,
        best_match,
        average_category_scores,
        distribution,
        keyword_coverage: keyword_coverage(results, keywords),
    }
}

fn in_bucket(score: f64, lo: f64, hi: f64) -> bool {
    if hi >= 100.0 {
        score >= lo && score <= hi
    } else {
        score >= lo && score < hi
    }
}

/// Number of documents matching each distinct (category, keyword) pair.
fn keyword_coverage(results: &[MatchResult], keywords: &KeywordSet) -> Vec<KeywordCoverage> {
    // Keyed by text alone: matching never looks at the category, so a keyword
    // listed under two categories gets the same count on both rows.
    let mut match_counts: HashMap<&str, usize> = HashMap::new();
    for result in results {
        let mut seen: Vec<&str> = result.matches.iter().map(String::as_str).collect();
        seen.sort_unstable();
        seen.dedup();
        for keyword in seen {
            *match_counts.entry(keyword).or_default() += 1;
        }
    }

    let mut coverage: Vec<KeywordCoverage> = Vec::new();
    for (category, keyword) in keywords.entries() {
        if coverage
            .iter()
            .any(|c| c.category == category && c.keyword == keyword)
        {
            continue;
        }
        coverage.push(KeywordCoverage {
            keyword: keyword.to_string(),
            category,
            documents_matched: match_counts.get(keyword).copied().unwrap_or(0),
        });
    }

    coverage.sort_by(|a, b| {
        b.documents_matched
            .cmp(&a.documents_matched)
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    coverage
}
