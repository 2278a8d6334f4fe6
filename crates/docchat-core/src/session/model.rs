//! Session domain model.
//!
//! The session owns the set of uploaded-file identifiers and the currently
//! active file. It is an explicit value held by the controller, not ambient
//! state, so the whole state machine is testable without any UI attached.

use serde::{Deserialize, Serialize};

/// A document the backend has accepted and issued an id for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Opaque identifier issued by the backend.
    pub id: String,
    /// Original filename, kept for display.
    pub name: String,
}

/// The uploaded-file collection and active-file selection for one session.
///
/// Invariant: `active_file_id`, when set, references a file currently in
/// `files`. Removing that file clears the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Uploaded files in upload order.
    pub files: Vec<UploadedFile>,
    /// Id of the file questions are currently scoped to.
    pub active_file_id: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a file by id.
    pub fn file(&self, id: &str) -> Option<&UploadedFile> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Whether the given id is part of the session.
    pub fn contains(&self, id: &str) -> bool {
        self.file(id).is_some()
    }

    /// The currently active file, if any.
    pub fn active_file(&self) -> Option<&UploadedFile> {
        self.active_file_id.as_deref().and_then(|id| self.file(id))
    }

    /// Adds a file and makes it the active one.
    pub fn add_file(&mut self, file: UploadedFile) {
        self.active_file_id = Some(file.id.clone());
        self.files.push(file);
    }

    /// Removes a file by id, clearing the active selection if it pointed
    /// there. Returns the removed file, or `None` for an unknown id.
    pub fn remove_file(&mut self, id: &str) -> Option<UploadedFile> {
        let index = self.files.iter().position(|f| f.id == id)?;
        let removed = self.files.remove(index);
        if self.active_file_id.as_deref() == Some(id) {
            self.active_file_id = None;
        }
        Some(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(id: &str) -> UploadedFile {
        UploadedFile {
            id: id.to_string(),
            name: format!("{id}.txt"),
        }
    }

    #[test]
    fn test_add_file_sets_active() {
        let mut session = Session::new();
        session.add_file(file("f1"));
        session.add_file(file("f2"));

        assert_eq!(session.active_file_id.as_deref(), Some("f2"));
        assert_eq!(session.files.len(), 2);
    }

    #[test]
    fn test_remove_active_file_clears_selection() {
        let mut session = Session::new();
        session.add_file(file("f1"));

        assert!(session.remove_file("f1").is_some());
        assert_eq!(session.active_file_id, None);
        assert!(session.files.is_empty());
    }

    #[test]
    fn test_remove_other_file_keeps_selection() {
        let mut session = Session::new();
        session.add_file(file("f1"));
        session.add_file(file("f2"));

        assert!(session.remove_file("f1").is_some());
        assert_eq!(session.active_file_id.as_deref(), Some("f2"));
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut session = Session::new();
        session.add_file(file("f1"));

        assert!(session.remove_file("ghost").is_none());
        assert_eq!(session.files.len(), 1);
        assert_eq!(session.active_file_id.as_deref(), Some("f1"));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut session = Session::new();
        session.add_file(file("a"));
        session.add_file(file("b"));
        session.add_file(file("c"));

        let ids: Vec<_> = session.files.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
