//! Document discovery
//!
//! A [`DocumentSource`] hands the content index one canonical locator per
//! document and the raw text behind it. There is no fallback between
//! alternative locations: a locator that cannot be read is a load error.

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::LoadError;

/// Supplies raw markdown documents to the content index
pub trait DocumentSource: Send + Sync {
    /// Locators of every document, in indexing order
    fn locate(&self) -> Result<Vec<PathBuf>, LoadError>;

    /// Raw text of one document
    fn read(&self, locator: &Path) -> Result<String, LoadError>;
}

/// Markdown files under a content directory, in path order
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl DocumentSource for FsSource {
    fn locate(&self) -> Result<Vec<PathBuf>, LoadError> {
        if !self.root.is_dir() {
            return Err(LoadError::Discovery {
                root: self.root.clone(),
                message: "content directory does not exist".to_string(),
            });
        }

        let mut locators = Vec::new();
        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {:?}: {}", self.root, e);
                    continue;
                }
            };

            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                let relative = path.strip_prefix(&self.root).unwrap_or(path);
                locators.push(relative.to_path_buf());
            }
        }

        tracing::debug!("Found {} documents under {:?}", locators.len(), self.root);
        Ok(locators)
    }

    fn read(&self, locator: &Path) -> Result<String, LoadError> {
        let path = self.root.join(locator);
        fs::read_to_string(&path).map_err(|source| LoadError::Io { path, source })
    }
}

/// Documents held in memory, e.g. bundled into the binary
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: Vec<(PathBuf, String)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document under the given locator
    pub fn with_document<P: Into<PathBuf>, S: Into<String>>(mut self, locator: P, text: S) -> Self {
        self.documents.push((locator.into(), text.into()));
        self
    }
}

impl DocumentSource for MemorySource {
    fn locate(&self) -> Result<Vec<PathBuf>, LoadError> {
        Ok(self.documents.iter().map(|(path, _)| path.clone()).collect())
    }

    fn read(&self, locator: &Path) -> Result<String, LoadError> {
        self.documents
            .iter()
            .find(|(path, _)| path == locator)
            .map(|(_, text)| text.clone())
            .ok_or_else(|| LoadError::Io {
                path: locator.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
