//! Export: write the extraction result as markdown or plain text.
//!
//! Two formats, both produced from the same result string:
//!
//! * **Markdown** — the joined page fragments, verbatim.
//! * **Plain text** — the same string after a single global substitution
//!   that strips a fixed set of markdown punctuation. This is a lossy,
//!   best-effort strip, not a markdown-to-text converter: link syntax,
//!   tables, and multi-character sequences pass through untouched, and
//!   nothing is unescaped.
//!
//! Writes are atomic (sibling temp file + rename) so an interrupted export
//! never leaves a half-written file behind.

use crate::error::OcrError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tracing::info;

/// Default markdown export filename.
pub const MARKDOWN_FILENAME: &str = "ocr-result.md";

/// Default plain-text export filename.
pub const PLAIN_TEXT_FILENAME: &str = "ocr-result.txt";

// The fixed strip set: #, _, *, backtick, >, hyphen. Single characters
// only; everything else (newlines included) is preserved.
static RE_MARKDOWN_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[#_*`>-]").unwrap());

/// Strip markdown punctuation for the plain-text export.
pub fn to_plain_text(markdown: &str) -> String {
    RE_MARKDOWN_PUNCT.replace_all(markdown, "").into_owned()
}

/// Write the result verbatim as markdown.
pub async fn write_markdown(text: &str, path: &Path) -> Result<(), OcrError> {
    write_atomic(text, path).await?;
    info!(path = %path.display(), bytes = text.len(), "markdown export written");
    Ok(())
}

/// Write the result as plain text with markdown punctuation stripped.
pub async fn write_plain_text(markdown: &str, path: &Path) -> Result<(), OcrError> {
    let text = to_plain_text(markdown);
    write_atomic(&text, path).await?;
    info!(path = %path.display(), bytes = text.len(), "plain-text export written");
    Ok(())
}

/// Atomic write: temp file in the same directory, then rename.
async fn write_atomic(text: &str, path: &Path) -> Result<(), OcrError> {
    let wrap = |source: std::io::Error| OcrError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await.map_err(wrap)?;
        }
    }

    let tmp_path = path.with_extension("tmp");
    tokio::fs::write(&tmp_path, text).await.map_err(wrap)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(wrap)?;
    Ok(())
}
