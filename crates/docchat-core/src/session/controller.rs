//! The session controller: upload sequencing, active-file selection, and the
//! two-phase ask exchange.
//!
//! All state lives behind one `RwLock` and is only mutated in synchronous
//! critical sections; the lock is never held across a backend await. The
//! two-phase ask (placeholder first, resolution later) therefore stays
//! correct even when several exchanges are in flight at once: each resolution
//! addresses the placeholder it created, by id.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::backend::{DocumentBackend, FilePayload};
use crate::error::{DocChatError, Result};
use crate::policy::UploadPolicy;

use super::message::{ChatMessage, MessageRole};
use super::model::{Session, UploadedFile};
use super::transcript::Transcript;

struct State {
    session: Session,
    transcript: Transcript,
}

/// Mediates all backend calls and owns the session state and transcript.
///
/// Every failure a user can cause (unsupported file, empty question, missing
/// active file) is absorbed into an assistant transcript entry; errors are
/// also returned so programmatic callers can branch on them. No placeholder
/// is ever left dangling: each one reaches a terminal text exactly once.
pub struct SessionController {
    state: Arc<RwLock<State>>,
    backend: Arc<dyn DocumentBackend>,
    policy: UploadPolicy,
}

impl SessionController {
    /// Creates a controller with the default upload policy.
    pub fn new(backend: Arc<dyn DocumentBackend>) -> Self {
        Self::with_policy(backend, UploadPolicy::default())
    }

    /// Creates a controller with an explicit upload policy.
    pub fn with_policy(backend: Arc<dyn DocumentBackend>, policy: UploadPolicy) -> Self {
        Self {
            state: Arc::new(RwLock::new(State {
                session: Session::new(),
                transcript: Transcript::new(),
            })),
            backend,
            policy,
        }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Uploaded files in upload order.
    pub async fn files(&self) -> Vec<UploadedFile> {
        self.state.read().await.session.files.clone()
    }

    /// The file questions are currently scoped to, if any.
    pub async fn active_file(&self) -> Option<UploadedFile> {
        self.state.read().await.session.active_file().cloned()
    }

    /// A snapshot of the transcript in append order.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.state.read().await.transcript.messages().to_vec()
    }

    /// Uploads a single file.
    ///
    /// Rejected filenames never reach the backend; they produce one assistant
    /// transcript entry. Accepted files produce a placeholder that resolves
    /// to a confirmation or an error message. A successful upload becomes the
    /// active file.
    pub async fn upload(&self, payload: FilePayload) -> Result<UploadedFile> {
        let name = payload.name.clone();

        if !self.policy.accepts(&name) {
            let err = DocChatError::unsupported_file(&name);
            let mut state = self.state.write().await;
            state.transcript.push(MessageRole::Assistant, err.to_string());
            debug!(file = %name, "rejected by upload policy");
            return Err(err);
        }

        let placeholder = {
            let mut state = self.state.write().await;
            state
                .transcript
                .push_placeholder(format!("Uploading \"{name}\"..."))
        };

        match self.backend.upload(payload).await {
            Ok(file_id) => {
                let file = UploadedFile {
                    id: file_id,
                    name: name.clone(),
                };
                let mut state = self.state.write().await;
                state.session.add_file(file.clone());
                state
                    .transcript
                    .resolve(placeholder, format!("{name} uploaded"), false);
                debug!(file = %name, id = %file.id, "upload complete");
                Ok(file)
            }
            Err(err) => {
                let mut state = self.state.write().await;
                state
                    .transcript
                    .resolve(placeholder, format!("Error: {err}"), false);
                warn!(file = %name, error = %err, "upload failed");
                Err(err)
            }
        }
    }

    /// Uploads a batch of files strictly in order.
    ///
    /// Each upload is awaited to completion before the next starts, so the
    /// transcript entries and `files` insertion order match the drop order
    /// deterministically. One failure does not abort the rest.
    pub async fn upload_batch(&self, payloads: Vec<FilePayload>) -> Vec<Result<UploadedFile>> {
        let mut results = Vec::with_capacity(payloads.len());
        for payload in payloads {
            results.push(self.upload(payload).await);
        }
        results
    }

    /// Makes the given file the active one, announcing the switch.
    ///
    /// Returns `false` (and changes nothing) for an id not in the session.
    pub async fn select_active(&self, file_id: &str) -> bool {
        let mut state = self.state.write().await;
        let Some(name) = state.session.file(file_id).map(|f| f.name.clone()) else {
            return false;
        };
        state.session.active_file_id = Some(file_id.to_string());
        state.transcript.push(
            MessageRole::Assistant,
            format!("Now answering questions about \"{name}\""),
        );
        true
    }

    /// Asks a question scoped to the active file.
    ///
    /// Empty questions are ignored without touching the transcript. With no
    /// active file, one assistant entry asks the user to load a file first;
    /// the backend is not contacted in either case. Otherwise the user
    /// message and an "Analyzing..." placeholder appear synchronously, and
    /// the placeholder later resolves to the answer (formatted) or the error
    /// text (plain).
    pub async fn ask(&self, question: &str) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(DocChatError::EmptyQuestion);
        }

        let (file_id, placeholder) = {
            let mut state = self.state.write().await;
            let Some(file_id) = state.session.active_file_id.clone() else {
                state
                    .transcript
                    .push(MessageRole::Assistant, "Load a file first.");
                return Err(DocChatError::NoActiveFile);
            };
            state.transcript.push(MessageRole::User, question);
            let placeholder = state.transcript.push_placeholder("Analyzing...");
            (file_id, placeholder)
        };

        match self.backend.ask(&file_id, question).await {
            Ok(answer) => {
                let mut state = self.state.write().await;
                state.transcript.resolve(placeholder, answer.clone(), true);
                debug!(file_id = %file_id, "ask resolved");
                Ok(answer)
            }
            Err(err) => {
                let mut state = self.state.write().await;
                state
                    .transcript
                    .resolve(placeholder, format!("Error: {err}"), false);
                warn!(file_id = %file_id, error = %err, "ask failed");
                Err(err)
            }
        }
    }

    /// Deletes a file from the backend and the session.
    ///
    /// The file leaves the session regardless of the network outcome, and
    /// the active selection is cleared if it pointed there; only the
    /// transcript entry differs. An unknown id is a silent no-op.
    pub async fn delete_file(&self, file_id: &str) -> Result<()> {
        let name = {
            let state = self.state.read().await;
            match state.session.file(file_id) {
                Some(file) => file.name.clone(),
                None => return Ok(()),
            }
        };

        let result = self.backend.delete(file_id).await;

        let mut state = self.state.write().await;
        state.session.remove_file(file_id);
        match &result {
            Ok(()) => {
                state
                    .transcript
                    .push(MessageRole::Assistant, format!("\"{name}\" deleted"));
            }
            Err(err) => {
                warn!(file_id = %file_id, error = %err, "delete failed");
                state.transcript.push(
                    MessageRole::Assistant,
                    format!("Error deleting \"{name}\": {err}"),
                );
            }
        }
        result
    }
}
