//! In-memory session store. A session holds one user's keyword set, uploaded
//! documents and the results of the last analysis; nothing outlives the process.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::{BatchReport, DocumentFailure};
use crate::models::document::Document;
use crate::models::keywords::KeywordSet;

/// Results of the last run, with the keyword set they were computed against.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub keywords: KeywordSet,
    pub report: BatchReport,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub keywords: KeywordSet,
    pub documents: Vec<Document>,
    /// Uploads whose text could not be extracted.
    pub failed_uploads: Vec<DocumentFailure>,
    pub analysis: Option<Analysis>,
    pub created_at: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            keywords: KeywordSet::default(),
            documents: Vec::new(),
            failed_uploads: Vec::new(),
            analysis: None,
            created_at: now,
            last_seen: now,
        }
    }

    /// Inserts a document, replacing any earlier upload with the same file name.
    pub fn upsert_document(&mut self, document: Document) {
        self.failed_uploads
            .retain(|f| f.file_name != document.file_name);
        match self
            .documents
            .iter_mut()
            .find(|d| d.file_name == document.file_name)
        {
            Some(existing) => *existing = document,
            None => self.documents.push(document),
        }
    }

    /// Records a failed upload. The latest upload of a file name wins, so any
    /// earlier document or failure under that name is dropped.
    pub fn record_failure(&mut self, failure: DocumentFailure) {
        self.documents.retain(|d| d.file_name != failure.file_name);
        self.failed_uploads
            .retain(|f| f.file_name != failure.file_name);
        self.failed_uploads.push(failure);
    }
}

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().await.insert(id, Session::new(Utc::now()));
        info!(session_id = %id, "Session created");
        id
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    /// Runs `f` against the session and returns what it projects out; refreshes
    /// the idle timer.
    pub async fn read<T>(&self, id: Uuid, f: impl FnOnce(&Session) -> T) -> Result<T, AppError> {
        self.update(id, |s| f(s)).await
    }

    /// Runs `f` against the session under the write lock.
    pub async fn update<T>(&self, id: Uuid, f: impl FnOnce(&mut Session) -> T) -> Result<T, AppError> {
        let mut sessions = self.inner.write().await;
        let session = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        session.last_seen = Utc::now();
        Ok(f(session))
    }

    /// Drops sessions idle longer than the TTL. Returns how many were removed.
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| now - s.last_seen <= self.ttl);
        before - sessions.len()
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }
}

/// Periodically drops idle sessions.
pub fn spawn_sweeper(store: SessionStore, every: std::time::Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let removed = store.purge_expired(Utc::now()).await;
            if removed > 0 {
                let remaining = store.count().await;
                info!(removed, remaining, "Purged idle sessions");
            }
        }
    })
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
