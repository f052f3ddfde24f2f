//! Input resolution: turn a user-supplied path into validated file bytes
//! plus a declared media type.
//!
//! Errors are split by what the user can do about them: a missing file, a
//! permission problem, an empty file, and an unsupported format each get
//! their own variant with an actionable message. The media type is sniffed
//! from the file content (magic bytes, then extension) so the acceptance
//! check runs on what the API will actually receive, not on what the file
//! claims to be called.

use crate::error::OcrError;
use crate::media::MediaType;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A resolved, validated input file.
#[derive(Debug, Clone)]
pub struct ResolvedInput {
    pub path: PathBuf,
    pub media_type: MediaType,
    pub bytes: Vec<u8>,
}

impl ResolvedInput {
    /// Display name for the session: the file name component.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Resolve a local file: existence, readability, non-emptiness, media type.
pub async fn resolve_input(path: &Path) -> Result<ResolvedInput, OcrError> {
    if !path.exists() {
        return Err(OcrError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => OcrError::PermissionDenied {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::NotFound => OcrError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => OcrError::Internal(format!("reading '{}': {}", path.display(), e)),
    })?;

    if bytes.is_empty() {
        return Err(OcrError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    let media_type = MediaType::sniff(path, &bytes)?;
    debug!(
        path = %path.display(),
        mime = %media_type,
        bytes = bytes.len(),
        "resolved input"
    );

    Ok(ResolvedInput {
        path: path.to_path_buf(),
        media_type,
        bytes,
    })
}
