//! File source trait for testable registry loading.

use std::io;
use std::path::Path;

/// Trait for reading candidate registry files (injectable for testing).
pub trait RegistrySource: Send + Sync {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Production source that reads from the filesystem.
pub struct SystemSource;

impl RegistrySource for SystemSource {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Test source with predefined file contents.
#[cfg(test)]
#[derive(Default)]
pub struct MockSource {
    files: std::collections::HashMap<std::path::PathBuf, String>,
    unreadable: std::collections::HashSet<std::path::PathBuf>,
    reads: std::sync::Arc<std::sync::Mutex<Vec<std::path::PathBuf>>>,
}

#[cfg(test)]
impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file(
        mut self,
        path: impl Into<std::path::PathBuf>,
        content: impl Into<String>,
    ) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    #[must_use]
    pub fn with_unreadable(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.unreadable.insert(path.into());
        self
    }

    /// Shared log of paths read, in order.
    pub fn reads_handle(&self) -> std::sync::Arc<std::sync::Mutex<Vec<std::path::PathBuf>>> {
        std::sync::Arc::clone(&self.reads)
    }
}

#[cfg(test)]
impl RegistrySource for MockSource {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.reads.lock().unwrap().push(path.to_path_buf());

        if self.unreadable.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }
}
