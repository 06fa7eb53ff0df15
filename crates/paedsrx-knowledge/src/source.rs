use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};

use crate::error::SourceError;

/// The two reference documents making up the knowledge store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Conditions,
    Guidelines,
}

impl DocumentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKind::Conditions => "conditions",
            DocumentKind::Guidelines => "guidelines",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            DocumentKind::Conditions => "conditions.json",
            DocumentKind::Guidelines => "guidelines.json",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where knowledge documents are read from.
pub trait KnowledgeSource {
    /// Return the raw bytes of one document.
    fn read(&self, kind: DocumentKind) -> impl Future<Output = Result<Vec<u8>, SourceError>> + Send;
}

/// Reads `conditions.json` and `guidelines.json` from a directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySource { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, kind: DocumentKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }
}

impl KnowledgeSource for DirectorySource {
    async fn read(&self, kind: DocumentKind) -> Result<Vec<u8>, SourceError> {
        let path = self.path_for(kind);
        tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SourceError::NotFound {
                    document: kind,
                    path: path.display().to_string(),
                }
            } else {
                SourceError::Read {
                    document: kind,
                    path: path.display().to_string(),
                    reason: e.to_string(),
                }
            }
        })
    }
}

/// In-memory documents, mainly for tests and embedded datasets.
#[derive(Debug, Clone)]
pub struct StaticSource {
    conditions: String,
    guidelines: String,
}

impl StaticSource {
    pub fn new(conditions: impl Into<String>, guidelines: impl Into<String>) -> Self {
        StaticSource {
            conditions: conditions.into(),
            guidelines: guidelines.into(),
        }
    }
}

impl KnowledgeSource for StaticSource {
    async fn read(&self, kind: DocumentKind) -> Result<Vec<u8>, SourceError> {
        let text = match kind {
            DocumentKind::Conditions => &self.conditions,
            DocumentKind::Guidelines => &self.guidelines,
        };
        Ok(text.as_bytes().to_vec())
    }
}
