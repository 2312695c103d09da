//! Upload dispatcher
//!
//! Batches are all-or-nothing: every file is validated before any request is
//! sent, all requests then run concurrently, and records are only added when
//! every one of them succeeded. Failures are reported for the first failing
//! file in input order, so the outcome does not depend on which request
//! happened to finish first.

use super::chat::{DispatchOptions, PolicyChat};
use super::session::SessionState;
use crate::domain::{UploadFile, UploadedFileRecord};
use crate::infrastructure::{DispatchError, PolicyBackend};
use futures::future::join_all;
use std::fmt;
use tracing::{info, warn};

/// Why a batch was not recorded, naming the file responsible.
#[derive(Debug)]
pub struct UploadFailure {
    pub file: String,
    pub error: DispatchError,
}

impl UploadFailure {
    pub fn message(&self) -> String {
        self.error.upload_message(&self.file)
    }
}

impl fmt::Display for UploadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Upload failed: {}", self.message())
    }
}

impl std::error::Error for UploadFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

pub type UploadResult = Result<Vec<UploadedFileRecord>, UploadFailure>;

/// Check every file up front; the first offender fails the whole batch.
pub fn validate_batch(files: &[UploadFile], options: &DispatchOptions) -> Result<(), UploadFailure> {
    let limit = options.max_upload_bytes();
    for file in files {
        let error = if !file.is_pdf() {
            DispatchError::not_pdf(&file.name)
        } else if file.size() > limit {
            DispatchError::too_large(&file.name, options.max_upload_mb)
        } else {
            continue;
        };
        return Err(UploadFailure {
            file: file.name.clone(),
            error,
        });
    }
    Ok(())
}

impl SessionState {
    pub(crate) fn begin_upload(&mut self, count: usize) -> Option<u64> {
        if count == 0 {
            return None;
        }
        if let Some(pending) = self.pending_upload {
            warn!(pending, "Upload ignored while another batch is in progress");
            return None;
        }
        let id = self.issue_ticket();
        self.is_uploading = true;
        self.last_error = None;
        self.pending_upload = Some(id);
        Some(id)
    }

    pub(crate) fn settle_upload(&mut self, id: u64, result: &UploadResult) {
        if self.pending_upload != Some(id) {
            return;
        }
        match result {
            Ok(records) => {
                self.extend_uploaded_files(records.clone());
                self.is_upload_modal_open = false;
            }
            Err(failure) => self.last_error = Some(failure.to_string()),
        }
        self.is_uploading = false;
        self.pending_upload = None;
    }
}

impl<B> PolicyChat<B>
where
    B: PolicyBackend + 'static,
{
    /// Upload a batch. Returns `None` when nothing was dispatched: an empty
    /// list or a batch already in progress.
    pub async fn submit_upload(&self, files: Vec<UploadFile>) -> Option<UploadResult> {
        let ticket = self.session.lock().await.begin_upload(files.len())?;
        info!(ticket, files = files.len(), "Dispatching upload batch");

        let result = match validate_batch(&files, &self.options) {
            Ok(()) => self.upload_all(&files).await,
            Err(failure) => Err(failure),
        };

        match &result {
            Ok(records) => info!(ticket, uploaded = records.len(), "Upload batch stored"),
            Err(failure) => warn!(ticket, file = failure.file.as_str(), error = %failure.error, "Upload batch failed"),
        }

        self.session.lock().await.settle_upload(ticket, &result);
        Some(result)
    }

    /// Files dropped on the upload zone: leave the drag state, then upload.
    pub async fn drop_files(&self, files: Vec<UploadFile>) -> Option<UploadResult> {
        self.session.lock().await.set_drag_active(false);
        self.submit_upload(files).await
    }

    async fn upload_all(&self, files: &[UploadFile]) -> UploadResult {
        let outcomes = join_all(files.iter().map(|file| self.backend.ingest(file))).await;

        let mut records = Vec::with_capacity(files.len());
        for (file, outcome) in files.iter().zip(outcomes) {
            match outcome {
                Ok(message) => records.push(UploadedFileRecord::success(&file.name, message)),
                Err(error) => {
                    return Err(UploadFailure {
                        file: file.name.clone(),
                        error,
                    });
                }
            }
        }
        Ok(records)
    }
}
