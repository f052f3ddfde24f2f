//! Error types for the ocr2md library.
//!
//! One enum, three families, mirroring how failures reach the user:
//!
//! * **Validation** — the input or the session state is wrong before any
//!   network I/O happens (unsupported media type, nothing selected). These
//!   are surfaced immediately and change no state.
//!
//! * **Transport/API** — the OCR call itself failed (network error,
//!   non-success status, malformed body). These complete the session's
//!   `Error` arm; the previously displayed result is left untouched so a
//!   transient failure never destroys a good extraction.
//!
//! * **Configuration / I/O** — missing API key, unwritable output path.
//!   Configuration errors are raised at build time, never deferred to the
//!   first network call.
//!
//! No error here is retried; the propagation policy is a single `Result`
//! surfaced to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the ocr2md library.
#[derive(Debug, Error)]
pub enum OcrError {
    // ── Validation errors ─────────────────────────────────────────────────
    /// The file's media type is neither `application/pdf` nor `image/*`.
    #[error("Unsupported media type '{mime}' for '{path}'\nOnly PDF and image files are accepted.")]
    UnsupportedMediaType { path: PathBuf, mime: String },

    /// Submit was attempted with no encoded payload present.
    #[error("Nothing selected: choose a PDF or image file before extracting.")]
    NothingSelected,

    /// Submit was attempted while a prior submission is still in flight.
    #[error("A submission is already in flight; wait for it to complete.")]
    SubmissionInFlight,

    /// The selected file contains no bytes.
    #[error("File is empty: '{path}'")]
    EmptyFile { path: PathBuf },

    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    // ── Transport/API errors ──────────────────────────────────────────────
    /// The HTTP request could not be sent or the connection failed mid-flight.
    #[error("OCR request failed: {reason}\nCheck your internet connection.")]
    RequestFailed { reason: String },

    /// The OCR endpoint answered with a non-success status code.
    #[error("OCR API returned HTTP {status}: {detail}")]
    ApiStatus { status: u16, detail: String },

    /// The OCR call exceeded the configured timeout.
    #[error("OCR API call timed out after {secs}s\nIncrease --api-timeout.")]
    ApiTimeout { secs: u64 },

    /// The response body was not the expected JSON shape.
    #[error("Malformed OCR response: {detail}")]
    MalformedResponse { detail: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// No API key was provided. Raised when the config is built, not on
    /// first use.
    #[error("Mistral API key is not set.\nSet MISTRAL_API_KEY or pass one explicitly via the config builder.")]
    MissingApiKey,

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an export file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OcrError {
    /// True for errors the user can fix without touching configuration or
    /// network: wrong file type, nothing selected, double submit.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            OcrError::UnsupportedMediaType { .. }
                | OcrError::NothingSelected
                | OcrError::SubmissionInFlight
                | OcrError::EmptyFile { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_media_type_display() {
        let e = OcrError::UnsupportedMediaType {
            path: PathBuf::from("notes.docx"),
            mime: "application/vnd.openxmlformats".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.docx"), "got: {msg}");
        assert!(msg.contains("application/vnd.openxmlformats"));
    }

    #[test]
    fn api_status_display() {
        let e = OcrError::ApiStatus {
            status: 401,
            detail: "invalid api key".into(),
        };
        assert!(e.to_string().contains("401"));
        assert!(e.to_string().contains("invalid api key"));
    }

    #[test]
    fn api_timeout_display() {
        let e = OcrError::ApiTimeout { secs: 120 };
        assert!(e.to_string().contains("120s"));
    }

    #[test]
    fn validation_classification() {
        assert!(OcrError::NothingSelected.is_validation());
        assert!(OcrError::SubmissionInFlight.is_validation());
        assert!(!OcrError::MissingApiKey.is_validation());
        assert!(!OcrError::RequestFailed {
            reason: "dns".into()
        }
        .is_validation());
    }
}
