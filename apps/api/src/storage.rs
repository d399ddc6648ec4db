//! Parsed-résumé storage.
//!
//! `AppState` holds an `Arc<dyn ResumeStore>`; the default backend keeps records
//! in process memory with no eviction, so they are lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::models::resume::ResumeResponse;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Inserts or overwrites the record for `document_id`.
    async fn save(&self, document_id: &str, resume: ResumeResponse);

    async fn get(&self, document_id: &str) -> Option<ResumeResponse>;

    async fn exists(&self, document_id: &str) -> bool;

    async fn len(&self) -> usize;
}

#[derive(Default)]
pub struct InMemoryResumeStore {
    records: RwLock<HashMap<String, ResumeResponse>>,
}

impl InMemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn save(&self, document_id: &str, resume: ResumeResponse) {
        self.records
            .write()
            .await
            .insert(document_id.to_string(), resume);
        info!("Saved resume with ID: {document_id}");
    }

    async fn get(&self, document_id: &str) -> Option<ResumeResponse> {
        self.records.read().await.get(document_id).cloned()
    }

    async fn exists(&self, document_id: &str) -> bool {
        self.records.read().await.contains_key(document_id)
    }

    async fn len(&self) -> usize {
        self.records.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;
    use crate::models::resume::ResumeData;

    fn record(id: &str, file_name: &str) -> ResumeResponse {
        ResumeResponse {
            document_id: id.to_string(),
            data: ResumeData::default(),
            extracted_at: Utc::now(),
            file_name: file_name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_then_get() {
        let store = InMemoryResumeStore::new();
        store.save("doc-1", record("doc-1", "a.pdf")).await;

        let fetched = store.get("doc-1").await.unwrap();
        assert_eq!(fetched.file_name, "a.pdf");
        assert!(store.exists("doc-1").await);
    }

    #[tokio::test]
    async fn test_unknown_id_is_absent() {
        let store = InMemoryResumeStore::new();
        assert!(store.get("missing").await.is_none());
        assert!(!store.exists("missing").await);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_save_overwrites_existing_id() {
        let store = InMemoryResumeStore::new();
        store.save("doc-1", record("doc-1", "first.pdf")).await;
        store.save("doc-1", record("doc-1", "second.docx")).await;

        assert_eq!(store.len().await, 1);
        assert_eq!(store.get("doc-1").await.unwrap().file_name, "second.docx");
    }

    #[tokio::test]
    async fn test_concurrent_saves_are_all_kept() {
        let store: Arc<dyn ResumeStore> = Arc::new(InMemoryResumeStore::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let id = format!("doc-{i}");
                store.save(&id, record(&id, "cv.pdf")).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(store.len().await, 32);
    }
}
