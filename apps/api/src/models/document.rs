use serde::{Deserialize, Serialize};

/// Plain-text rendition of one uploaded resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub file_name: String,
    pub content: String,
}

impl Document {
    pub fn new(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

/// Listing entry returned for session documents; omits the full text.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentSummary {
    pub file_name: String,
    pub char_count: usize,
}

impl From<&Document> for DocumentSummary {
    fn from(doc: &Document) -> Self {
        Self {
            file_name: doc.file_name.clone(),
            char_count: doc.content.chars().count(),
        }
    }
}
