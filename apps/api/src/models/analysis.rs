use serde::{Deserialize, Serialize};

use crate::models::keywords::KeywordCategory;

/// Percentage score per keyword category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub certification: f64,
}

impl CategoryScores {
    pub fn get(&self, category: KeywordCategory) -> f64 {
        match category {
            KeywordCategory::Skills => self.skills,
            KeywordCategory::Experience => self.experience,
            KeywordCategory::Location => self.location,
            KeywordCategory::Certification => self.certification,
        }
    }

    pub fn set(&mut self, category: KeywordCategory, value: f64) {
        match category {
            KeywordCategory::Skills => self.skills = value,
            KeywordCategory::Experience => self.experience = value,
            KeywordCategory::Location => self.location = value,
            KeywordCategory::Certification => self.certification = value,
        }
    }
}

/// Outcome of scoring one document against one keyword set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub file_name: String,
    pub content: String,
    pub matches: Vec<String>,
    pub missing: Vec<String>,
    /// 0 – 100
    pub score: f64,
    pub category_scores: CategoryScores,
}

/// A document that could not be turned into a `MatchResult`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFailure {
    pub file_name: String,
    pub reason: String,
}

/// Results of a batch run. Failed documents never abort the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub results: Vec<MatchResult>,
    pub failures: Vec<DocumentFailure>,
}
