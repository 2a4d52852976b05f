use crate::config::ApiConfig;
use crate::error::ApiError;
use citation_engine::{CitationService, DocumentTextIndex};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct AppState {
    pub config: ApiConfig,
    pub service: CitationService,
    pub registry: DocumentRegistry,
    empty_index: Arc<DocumentTextIndex>,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        let registry = DocumentRegistry::new(config.max_documents);

        Self {
            config,
            service: CitationService::default(),
            registry,
            empty_index: Arc::new(DocumentTextIndex::empty()),
        }
    }

    /// The document's index, or the empty index if it was never opened.
    pub async fn index_or_empty(&self, document_id: &str) -> Arc<DocumentTextIndex> {
        match self.registry.get(document_id).await {
            Some(index) => index,
            None => self.empty_index.clone(),
        }
    }
}

/// Open documents and their indexes.
///
/// Indexes are swapped whole; a resolution that already holds an `Arc` keeps
/// reading its snapshot after the document is reopened or closed.
pub struct DocumentRegistry {
    indexes: RwLock<HashMap<String, Arc<DocumentTextIndex>>>,
    max_documents: usize,
}

impl DocumentRegistry {
    pub fn new(max_documents: usize) -> Self {
        Self {
            indexes: RwLock::new(HashMap::new()),
            max_documents,
        }
    }

    pub async fn insert(&self, document_id: String, index: Arc<DocumentTextIndex>) -> Result<(), ApiError> {
        let mut indexes = self.indexes.write().await;
        if !indexes.contains_key(&document_id) && indexes.len() >= self.max_documents {
            return Err(ApiError::TooManyDocuments(self.max_documents));
        }

        if indexes.insert(document_id.clone(), index).is_some() {
            log::info!("Replaced index of document {}", document_id);
        } else {
            log::info!("Opened document {}", document_id);
        }
        Ok(())
    }

    pub async fn get(&self, document_id: &str) -> Option<Arc<DocumentTextIndex>> {
        self.indexes.read().await.get(document_id).cloned()
    }

    pub async fn remove(&self, document_id: &str) -> bool {
        self.indexes.write().await.remove(document_id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.indexes.read().await.len()
    }
}
