//! The seam between the session controller and the document backend.
//!
//! The backend is an opaque collaborator reachable over three operations:
//! upload a document, ask a question scoped to one document, and delete a
//! document. `docchat-client` provides the HTTP implementation; tests provide
//! in-memory mocks.

use async_trait::async_trait;

use crate::error::Result;

/// The transient payload handed to an upload call.
///
/// The bytes are consumed by the transport and are never retained in the
/// session; only the id returned by the backend and the display name survive.
#[derive(Debug, Clone)]
pub struct FilePayload {
    /// Original filename, used for validation and display.
    pub name: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl FilePayload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Backend operations the session controller depends on.
#[async_trait]
pub trait DocumentBackend: Send + Sync {
    /// Uploads a document and returns the backend-issued file id.
    async fn upload(&self, payload: FilePayload) -> Result<String>;

    /// Asks a question scoped to the given file id and returns the answer.
    async fn ask(&self, file_id: &str, question: &str) -> Result<String>;

    /// Deletes the document with the given file id. Best-effort.
    async fn delete(&self, file_id: &str) -> Result<()>;
}
