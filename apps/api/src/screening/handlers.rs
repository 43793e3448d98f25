//! Axum route handlers for the Screening API.

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{BatchReport, DocumentFailure, MatchResult};
use crate::models::document::{Document, DocumentSummary};
use crate::models::keywords::{KeywordCategory, KeywordSet};
use crate::screening::comparison::{compare, rank, Comparison};
use crate::screening::dashboard::{summarize, DashboardSummary};
use crate::screening::scoring::{analyze_batch, score_documents};
use crate::screening::suggestions::SuggestionReport;
use crate::session::{Analysis, Session};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ScreenRequest {
    pub documents: Vec<Document>,
    pub keywords: KeywordSet,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub keyword_count: usize,
    pub document_count: usize,
    pub analyzed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct KeywordEdit {
    pub category: KeywordCategory,
    pub keyword: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordEditResponse {
    pub changed: bool,
    pub keywords: KeywordSet,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub accepted: Vec<String>,
    pub failures: Vec<DocumentFailure>,
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponse {
    pub documents: Vec<DocumentSummary>,
    pub failures: Vec<DocumentFailure>,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    /// Comma-separated file names.
    pub files: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Stateless
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/screen
///
/// Scores already-extracted documents against a keyword set. Nothing is stored.
pub async fn handle_screen(Json(req): Json<ScreenRequest>) -> Json<Vec<MatchResult>> {
    Json(score_documents(&req.documents, &req.keywords))
}

// ────────────────────────────────────────────────────────────────────────────
// Sessions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<CreateSessionResponse>) {
    let session_id = state.sessions.create().await;
    (StatusCode::CREATED, Json(CreateSessionResponse { session_id }))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionInfo>, AppError> {
    let info = state
        .sessions
        .read(id, |s| SessionInfo {
            session_id: id,
            created_at: s.created_at,
            last_seen: s.last_seen,
            keyword_count: s.keywords.total(),
            document_count: s.documents.len(),
            analyzed_at: s.analysis.as_ref().map(|a| a.analyzed_at),
        })
        .await?;
    Ok(Json(info))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    info!(session_id = %id, "Session deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Keywords
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/sessions/:id/keywords
pub async fn handle_get_keywords(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<KeywordSet>, AppError> {
    Ok(Json(state.sessions.read(id, |s| s.keywords.clone()).await?))
}

/// PUT /api/v1/sessions/:id/keywords
///
/// Replaces the whole set. Entries pass through the same normalisation as
/// single adds (trimmed, empties and same-category duplicates dropped).
pub async fn handle_replace_keywords(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(incoming): Json<KeywordSet>,
) -> Result<Json<KeywordSet>, AppError> {
    let mut keywords = KeywordSet::default();
    for (category, keyword) in incoming.entries() {
        keywords.add(category, keyword);
    }

    let stored = state
        .sessions
        .update(id, |s| {
            s.keywords = keywords;
            s.keywords.clone()
        })
        .await?;
    Ok(Json(stored))
}

/// POST /api/v1/sessions/:id/keywords
pub async fn handle_add_keyword(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(edit): Json<KeywordEdit>,
) -> Result<Json<KeywordEditResponse>, AppError> {
    if edit.keyword.trim().is_empty() {
        return Err(AppError::Validation("keyword cannot be empty".to_string()));
    }

    let response = state
        .sessions
        .update(id, |s| KeywordEditResponse {
            changed: s.keywords.add(edit.category, &edit.keyword),
            keywords: s.keywords.clone(),
        })
        .await?;
    Ok(Json(response))
}

/// DELETE /api/v1/sessions/:id/keywords
pub async fn handle_remove_keyword(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(edit): Json<KeywordEdit>,
) -> Result<Json<KeywordEditResponse>, AppError> {
    let response = state
        .sessions
        .update(id, |s| KeywordEditResponse {
            changed: s.keywords.remove(edit.category, &edit.keyword),
            keywords: s.keywords.clone(),
        })
        .await?;
    Ok(Json(response))
}

// ────────────────────────────────────────────────────────────────────────────
// Documents
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/documents
///
/// Multipart upload. Every part with a file name is one resume. Non-PDF,
/// empty and unreadable files are reported in `failures`; the rest are stored.
pub async fn handle_upload_documents(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    // Fail fast before reading the body for an unknown session.
    state.sessions.read(id, |_| ()).await?;

    // Part order is preserved so a later part of the same name replaces an earlier one.
    let mut outcomes: Vec<UploadOutcome> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;

        if !is_pdf(&file_name, content_type.as_deref()) {
            warn!(session_id = %id, file_name = %file_name, "Rejected non-PDF upload");
            outcomes.push(Err(DocumentFailure {
                file_name,
                reason: "only PDF files are accepted".to_string(),
            }));
            continue;
        }

        let extractor = state.extractor.clone();
        let extracted = tokio::task::spawn_blocking(move || extractor.extract(&data))
            .await
            .map_err(|e| AppError::Internal(e.into()))?;

        match extracted {
            Ok(content) => outcomes.push(Ok(Document::new(file_name, content))),
            Err(e) => {
                warn!(session_id = %id, file_name = %file_name, error = %e, "Text extraction failed");
                outcomes.push(Err(DocumentFailure {
                    file_name,
                    reason: e.to_string(),
                }));
            }
        }
    }

    let outcomes = latest_per_file_name(outcomes);
    let mut accepted = Vec::new();
    let mut failures = Vec::new();
    for outcome in &outcomes {
        match outcome {
            Ok(document) => accepted.push(document.file_name.clone()),
            Err(failure) => failures.push(failure.clone()),
        }
    }

    state
        .sessions
        .update(id, move |s| {
            for outcome in outcomes {
                match outcome {
                    Ok(document) => s.upsert_document(document),
                    Err(failure) => s.record_failure(failure),
                }
            }
        })
        .await?;

    info!(
        session_id = %id,
        accepted = accepted.len(),
        failed = failures.len(),
        "Upload processed"
    );
    Ok(Json(UploadResponse { accepted, failures }))
}

/// GET /api/v1/sessions/:id/documents
pub async fn handle_list_documents(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DocumentListResponse>, AppError> {
    let listing = state
        .sessions
        .read(id, |s| DocumentListResponse {
            documents: s.documents.iter().map(DocumentSummary::from).collect(),
            failures: s.failed_uploads.clone(),
        })
        .await?;
    Ok(Json(listing))
}

// ────────────────────────────────────────────────────────────────────────────
// Analysis
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/analyze
///
/// Scores every stored document against the current keyword set. Failed
/// uploads are carried into the report's `failures`.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BatchReport>, AppError> {
    let (documents, failed_uploads, keywords) = state
        .sessions
        .read(id, |s| {
            (s.documents.clone(), s.failed_uploads.clone(), s.keywords.clone())
        })
        .await?;
    if documents.is_empty() && failed_uploads.is_empty() {
        return Err(AppError::Validation(
            "No documents uploaded for this session".to_string(),
        ));
    }

    let inputs = documents
        .into_iter()
        .map(Ok)
        .chain(failed_uploads.into_iter().map(Err));
    let mut report = analyze_batch(inputs, &keywords);
    report.results = rank(&report.results);

    info!(
        session_id = %id,
        documents = report.results.len(),
        failed = report.failures.len(),
        keywords = keywords.total(),
        "Analysis complete"
    );

    let analysis = Analysis {
        keywords,
        report: report.clone(),
        analyzed_at: Utc::now(),
    };
    state.sessions.update(id, |s| s.analysis = Some(analysis)).await?;

    Ok(Json(report))
}

/// GET /api/v1/sessions/:id/results
pub async fn handle_get_results(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BatchReport>, AppError> {
    let report = state
        .sessions
        .read(id, |s| require_analysis(s).map(|a| a.report.clone()))
        .await??;
    Ok(Json(report))
}

/// GET /api/v1/sessions/:id/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardSummary>, AppError> {
    let summary = state
        .sessions
        .read(id, |s| require_analysis(s).map(|a| summarize(&a.report.results, &a.keywords)))
        .await??;
    Ok(Json(summary))
}

/// GET /api/v1/sessions/:id/compare?files=a.pdf,b.pdf
pub async fn handle_compare(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<Comparison>, AppError> {
    let file_names: Vec<String> = query
        .files
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    let comparison = state
        .sessions
        .read(id, |s| require_analysis(s).and_then(|a| compare(&a.report.results, &file_names)))
        .await??;
    Ok(Json(comparison))
}

/// GET /api/v1/sessions/:id/results/:file_name/suggestions
pub async fn handle_suggestions(
    State(state): State<AppState>,
    Path((id, file_name)): Path<(Uuid, String)>,
) -> Result<Json<SuggestionReport>, AppError> {
    let (result, keywords) = state
        .sessions
        .read(id, |s| {
            let analysis = require_analysis(s)?;
            let result = analysis
                .report
                .results
                .iter()
                .find(|r| r.file_name == file_name)
                .cloned()
                .ok_or_else(|| AppError::NotFound(format!("No result for {file_name}")))?;
            Ok::<_, AppError>((result, analysis.keywords.clone()))
        })
        .await??;

    Ok(Json(state.suggester.suggest(&result, &keywords).await))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

type UploadOutcome = Result<Document, DocumentFailure>;

fn require_analysis(session: &Session) -> Result<&Analysis, AppError> {
    session
        .analysis
        .as_ref()
        .ok_or_else(|| AppError::NotFound("No analysis has been run for this session".to_string()))
}

/// Keeps the last outcome for each file name, in the order those last parts arrived.
fn latest_per_file_name(outcomes: Vec<UploadOutcome>) -> Vec<UploadOutcome> {
    let mut latest: Vec<UploadOutcome> = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        let name = outcome_file_name(&outcome).to_string();
        latest.retain(|o| outcome_file_name(o) != name);
        latest.push(outcome);
    }
    latest
}

fn outcome_file_name(outcome: &UploadOutcome) -> &str {
    match outcome {
        Ok(document) => &document.file_name,
        Err(failure) => &failure.file_name,
    }
}

fn is_pdf(file_name: &str, content_type: Option<&str>) -> bool {
    file_name.to_lowercase().ends_with(".pdf") || content_type == Some("application/pdf")
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(format!("Invalid multipart body: {}", e.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_by_extension_or_content_type() {
        assert!(is_pdf("CV.PDF", None));
        assert!(is_pdf("resume", Some("application/pdf")));
        assert!(!is_pdf("resume.docx", Some("application/msword")));
    }

    #[test]
    fn test_latest_part_per_file_name_wins() {
        let failure = |name: &str| DocumentFailure {
            file_name: name.to_string(),
            reason: "file is empty".to_string(),
        };
        let outcomes = vec![
            Ok(Document::new("cv.pdf", "good")),
            Ok(Document::new("other.pdf", "x")),
            Err(failure("cv.pdf")),
            Err(failure("late.pdf")),
            Ok(Document::new("late.pdf", "fixed")),
        ];

        let latest = latest_per_file_name(outcomes);

        let names: Vec<&str> = latest.iter().map(outcome_file_name).collect();
        assert_eq!(names, vec!["other.pdf", "cv.pdf", "late.pdf"]);
        assert!(latest[1].is_err());
        assert!(matches!(&latest[2], Ok(d) if d.content == "fixed"));
    }
}
