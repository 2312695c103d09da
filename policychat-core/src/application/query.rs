//! Query dispatcher
//!
//! A question moves through three store transitions: `begin_query` (optimistic
//! user message, busy flags), `settle_query` (network call returned) and
//! `reveal_reply` (assistant or system message appended, typing cleared).
//! Each transition is keyed by the ticket issued in `begin_query`, so a reply
//! can only ever land against the question that produced it.

use super::chat::PolicyChat;
use super::session::SessionState;
use crate::constants::QUERY_FAILURE_TEXT;
use crate::domain::ChatMessage;
use crate::infrastructure::{DispatchError, PolicyBackend};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub(crate) struct QueryTicket {
    pub id: u64,
    pub question: String,
    pub api_key: Option<String>,
}

impl SessionState {
    pub(crate) fn begin_query(&mut self, text: &str) -> Option<QueryTicket> {
        if text.trim().is_empty() {
            return None;
        }
        if let Some(pending) = self.pending_query {
            warn!(pending, "Question ignored while another is still pending");
            return None;
        }

        let id = self.issue_ticket();
        self.is_submitting = true;
        self.is_typing = true;
        self.last_error = None;
        self.pending_query = Some(id);
        self.append_message(ChatMessage::user(text));

        Some(QueryTicket {
            id,
            question: text.to_string(),
            api_key: self.effective_api_key().map(str::to_owned),
        })
    }

    /// The network call for `id` has returned, whatever the result.
    pub(crate) fn settle_query(&mut self, id: u64) -> bool {
        if self.pending_query != Some(id) {
            return false;
        }
        self.is_submitting = false;
        self.clear_input();
        true
    }

    pub(crate) fn reveal_reply(&mut self, id: u64, reply: &Result<String, DispatchError>) {
        if self.pending_query != Some(id) {
            warn!(ticket = id, "Dropping reply for a question that is no longer pending");
            return;
        }
        match reply {
            Ok(answer) => self.append_message(ChatMessage::assistant(answer.as_str())),
            Err(_) => {
                self.append_message(ChatMessage::system(QUERY_FAILURE_TEXT));
                self.last_error = Some(QUERY_FAILURE_TEXT.to_string());
            }
        }
        self.is_typing = false;
        self.pending_query = None;
    }
}

impl<B> PolicyChat<B>
where
    B: PolicyBackend + 'static,
{
    /// Ask `text`. Returns `None` when nothing was dispatched: blank input or
    /// a question already pending.
    pub async fn submit_query(&self, text: &str) -> Option<Result<String, DispatchError>> {
        let ticket = self.session.lock().await.begin_query(text)?;
        info!(ticket = ticket.id, "Dispatching question");

        let reply = self
            .backend
            .ask(&ticket.question, ticket.api_key.as_deref())
            .await;

        match &reply {
            Ok(answer) => debug!(ticket = ticket.id, answer_len = answer.len(), "Answer received"),
            Err(err) => warn!(ticket = ticket.id, error = %err, "Question failed"),
        }

        if reply.is_ok() && !self.options.typing_delay.is_zero() {
            self.session.lock().await.settle_query(ticket.id);
            tokio::time::sleep(self.options.typing_delay).await;
            self.session.lock().await.reveal_reply(ticket.id, &reply);
        } else {
            let mut state = self.session.lock().await;
            state.settle_query(ticket.id);
            state.reveal_reply(ticket.id, &reply);
        }

        Some(reply)
    }

    /// Submit whatever is in the input draft.
    pub async fn submit_input(&self) -> Option<Result<String, DispatchError>> {
        let text = self.session.lock().await.input().to_string();
        self.submit_query(&text).await
    }
}
