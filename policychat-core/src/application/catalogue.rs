//! Indexed document catalogue

use super::chat::PolicyChat;
use crate::infrastructure::{DispatchError, PolicyBackend};
use tracing::{debug, warn};

impl<B> PolicyChat<B>
where
    B: PolicyBackend + 'static,
{
    /// Reload the list of documents the service holds. On failure the previous
    /// list is kept and the error banner is set.
    pub async fn refresh_indexed_files(&self) -> Result<usize, DispatchError> {
        self.session.lock().await.dismiss_error();

        let result = self.backend.indexed_files().await;

        let mut state = self.session.lock().await;
        match result {
            Ok(files) => {
                let count = files.len();
                debug!(count, "Indexed documents refreshed");
                state.set_indexed_files(files);
                Ok(count)
            }
            Err(err) => {
                warn!(error = %err, "Could not list indexed documents");
                state.last_error = Some(format!(
                    "Could not load indexed documents: {}",
                    err.user_message()
                ));
                Err(err)
            }
        }
    }
}
