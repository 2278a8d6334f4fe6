//! Upload validation policy.
//!
//! The allow-list of file extensions is configuration, not a hard-coded
//! constant: callers may narrow it (a legacy deployment accepted `.txt`
//! only) or extend it without touching the controller.

use std::collections::HashSet;

/// Extensions accepted by default: document, code, and markup formats.
const DEFAULT_EXTENSIONS: &[&str] = &[
    "txt", "pdf", "docx", "xls", "xlsx", "csv", "py", "js", "jsx", "ts", "tsx", "java", "c",
    "cpp", "h", "hpp", "cs", "go", "rb", "php", "swift", "kt", "rs", "pl", "sh", "html", "htm",
    "css", "scss", "sass", "json", "xml", "yaml", "yml", "ini", "sql", "dart", "vue", "md",
];

/// Decides which files are candidates for upload.
///
/// A filename is accepted iff the lowercase suffix after the last `.` is in
/// the allow-list. A filename with no extension is always rejected.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    allowed: HashSet<String>,
}

impl UploadPolicy {
    /// Creates a policy from an explicit extension list.
    ///
    /// Extensions are normalized to lowercase and a leading `.` is stripped,
    /// so `"PDF"`, `".pdf"`, and `"pdf"` all denote the same suffix.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { allowed }
    }

    /// Policy accepting only plain text files (the legacy deployment).
    pub fn text_only() -> Self {
        Self::new(["txt"])
    }

    /// Returns whether the filename's extension is allow-listed.
    ///
    /// Pure predicate: no side effects, no I/O.
    pub fn accepts(&self, filename: &str) -> bool {
        match filename.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => self.allowed.contains(&ext.to_lowercase()),
            _ => false,
        }
    }

    /// Number of allow-listed extensions.
    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allow_listed_extension() {
        let policy = UploadPolicy::default();
        assert!(policy.accepts("notes.txt"));
        assert!(policy.accepts("report.pdf"));
        assert!(policy.accepts("main.rs"));
        assert!(policy.accepts("index.html"));
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let policy = UploadPolicy::default();
        assert!(policy.accepts("README.MD"));
        assert!(policy.accepts("Data.CSV"));
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let policy = UploadPolicy::default();
        assert!(!policy.accepts("binary.exe"));
        assert!(!policy.accepts("archive.tar.gz"));
    }

    #[test]
    fn test_rejects_filename_without_extension() {
        let policy = UploadPolicy::default();
        assert!(!policy.accepts("Makefile"));
        assert!(!policy.accepts(""));
        assert!(!policy.accepts("trailing."));
    }

    #[test]
    fn test_dotfile_suffix_still_counts() {
        let policy = UploadPolicy::default();
        assert!(policy.accepts(".txt"));
    }

    #[test]
    fn test_uses_last_suffix_only() {
        let policy = UploadPolicy::default();
        assert!(policy.accepts("notes.backup.txt"));
    }

    #[test]
    fn test_text_only_policy() {
        let policy = UploadPolicy::text_only();
        assert!(policy.accepts("notes.txt"));
        assert!(!policy.accepts("report.pdf"));
        assert_eq!(policy.len(), 1);
    }

    #[test]
    fn test_extension_normalization() {
        let policy = UploadPolicy::new([".PDF", "txt"]);
        assert!(policy.accepts("a.pdf"));
        assert!(policy.accepts("a.txt"));
        assert_eq!(policy.len(), 2);
    }
}
