//! Backend trait

use super::error::DispatchError;
use crate::domain::{IndexedFile, UploadFile};
use async_trait::async_trait;

/// The remote service both dispatchers talk to.
#[async_trait]
pub trait PolicyBackend: Send + Sync {
    /// Ask a question, returning the generated answer text.
    async fn ask(&self, question: &str, api_key: Option<&str>) -> Result<String, DispatchError>;

    /// Send one document for ingestion, returning the server's message.
    async fn ingest(&self, file: &UploadFile) -> Result<String, DispatchError>;

    /// List the documents the service has already indexed.
    async fn indexed_files(&self) -> Result<Vec<IndexedFile>, DispatchError>;
}
