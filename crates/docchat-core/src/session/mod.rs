//! Session state machine: uploaded files, active-file selection, and the
//! chat transcript, mediated by the [`SessionController`].

pub mod controller;
pub mod message;
pub mod model;
pub mod transcript;

pub use controller::SessionController;
pub use message::{ChatMessage, MessageId, MessageRole, MessageState};
pub use model::{Session, UploadedFile};
pub use transcript::Transcript;
