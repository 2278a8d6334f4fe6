pub mod backend;
pub mod error;
pub mod format;
pub mod policy;
pub mod session;

// Re-export common error type
pub use error::{DocChatError, Result};

pub use backend::{DocumentBackend, FilePayload};
pub use policy::UploadPolicy;
pub use session::SessionController;
