//! File-backed storage for the `/files/` routes
//!
//! Reads and writes raw bytes under a configured root directory. Relative
//! paths that could escape the root are refused before any filesystem call.

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

use crate::http::response::Response;
use crate::http::status::StatusCode;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("file not found: {0}")]
    NotFound(String),

    #[error("path escapes the served directory: {0}")]
    Forbidden(String),

    #[error("{0}")]
    Io(#[from] io::Error),
}

impl FileError {
    pub fn status(&self) -> StatusCode {
        match self {
            FileError::NotFound(_) => StatusCode::NOT_FOUND,
            FileError::Forbidden(_) => StatusCode::FORBIDDEN,
            FileError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into the response sent to the client.
    ///
    /// Only I/O failures carry a body: the underlying error message.
    pub fn into_response(self) -> Response {
        match self {
            FileError::Io(e) => Response::internal_error(e.to_string()),
            other => Response::empty(other.status()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileService {
    root: PathBuf,
}

impl FileService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Reads the whole file at `relative` under the root.
    pub async fn read(&self, relative: &str) -> Result<Vec<u8>, FileError> {
        let path = self.resolve(relative)?;

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                tracing::debug!(path = %path.display(), bytes = bytes.len(), "File read");
                Ok(bytes)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(FileError::NotFound(relative.to_string()))
            }
            Err(e) => Err(FileError::Io(e)),
        }
    }

    /// Creates or truncates the file at `relative` and writes `content`.
    ///
    /// Parent directories are not created.
    pub async fn write(&self, relative: &str, content: &[u8]) -> Result<(), FileError> {
        let path = self.resolve(relative)?;

        tokio::fs::write(&path, content).await?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "File written");

        Ok(())
    }

    fn resolve(&self, relative: &str) -> Result<PathBuf, FileError> {
        let rel = Path::new(relative);

        let escapes = rel.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            tracing::warn!(path = relative, "Rejected path outside served directory");
            return Err(FileError::Forbidden(relative.to_string()));
        }

        Ok(self.root.join(rel))
    }
}
