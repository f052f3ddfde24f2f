//! Eager extraction entry points.
//!
//! [`extract`] runs the whole flow for one file: resolve the path, encode
//! the bytes, submit to the OCR endpoint, join the page fragments. The flow
//! drives a [`Session`] through its transitions so the same state machine
//! that backs interactive callers is exercised on every run — submission
//! only starts through `begin_submit`, and `Loading` is cleared on both
//! completion paths without exception.

use crate::config::ExtractConfig;
use crate::error::OcrError;
use crate::output::{ExtractOutput, ExtractStats};
use crate::pipeline::{encode, export, input, ocr};
use crate::session::Session;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Extract markdown from a local PDF or image file.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// - Validation: file missing/empty, unsupported media type
/// - Transport: network failure, non-success status, malformed response
///
/// The config is assumed valid (the builder already rejected an absent
/// API key).
pub async fn extract(
    input_path: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<ExtractOutput, OcrError> {
    let total_start = Instant::now();
    let path = input_path.as_ref();
    info!(path = %path.display(), "starting extraction");

    // ── Step 1: Resolve and validate the input ───────────────────────────
    let resolved = input::resolve_input(path).await?;
    let input_bytes = resolved.bytes.len() as u64;

    // ── Step 2: Select + encode through the session ──────────────────────
    let mut session = Session::new();
    let generation = session.select_file(path, resolved.media_type.mime(), input_bytes)?;
    let payload = encode::encode_payload(&resolved.bytes, &resolved.media_type);
    session.attach_payload(generation, payload);

    // ── Step 3: Submit ───────────────────────────────────────────────────
    let submitted = session.begin_submit()?.clone();
    let file_name = resolved.display_name();
    let payload_bytes = submitted.base64_len();

    if let Some(ref obs) = config.observer {
        obs.on_submit_start(&file_name, payload_bytes);
    }

    let request_start = Instant::now();
    let response = ocr::process(&submitted, config).await;
    let request_duration_ms = request_start.elapsed().as_millis() as u64;

    // Loading is cleared on both arms before the error can propagate.
    let response = match response {
        Ok(r) => {
            if let Some(ref obs) = config.observer {
                obs.on_submit_complete(true, request_duration_ms);
            }
            r
        }
        Err(e) => {
            warn!(error = %e, "OCR request failed");
            session.finish_failure(e.to_string());
            if let Some(ref obs) = config.observer {
                obs.on_submit_complete(false, request_duration_ms);
            }
            return Err(e);
        }
    };

    // ── Step 4: Join page fragments ──────────────────────────────────────
    let markdown = ocr::join_pages(&response.pages);
    session.finish_success(markdown.clone());

    let stats = ExtractStats {
        page_count: response.pages.len(),
        input_bytes,
        payload_bytes,
        request_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        pages = stats.page_count,
        request_ms = stats.request_duration_ms,
        total_ms = stats.total_duration_ms,
        "extraction complete"
    );

    Ok(ExtractOutput {
        markdown,
        pages: response.pages,
        stats,
    })
}

/// Extract and write the markdown result to a file.
///
/// Uses an atomic write (temp file + rename) to prevent partial files.
pub async fn extract_to_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<ExtractStats, OcrError> {
    let output = extract(input_path, config).await?;
    export::write_markdown(&output.markdown, output_path.as_ref()).await?;
    Ok(output.stats)
}

/// Synchronous wrapper around [`extract`].
///
/// Creates a temporary tokio runtime internally.
pub fn extract_sync(
    input_path: impl AsRef<Path>,
    config: &ExtractConfig,
) -> Result<ExtractOutput, OcrError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| OcrError::Internal(format!("failed to create tokio runtime: {e}")))?
        .block_on(extract(input_path, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ExtractConfig {
        // Unroutable base_url: requests fail fast at the transport layer.
        ExtractConfig::builder()
            .api_key("test-key")
            .base_url("http://127.0.0.1:1")
            .api_timeout_secs(2)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn missing_file_fails_before_any_network_io() {
        let err = extract("/no/such/file.pdf", &test_config())
            .await
            .unwrap_err();
        assert!(matches!(err, OcrError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn unsupported_file_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "plain text").unwrap();

        let err = extract(&path, &test_config()).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn transport_failure_surfaces_as_request_failed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.4 tiny").unwrap();

        let err = extract(&path, &test_config()).await.unwrap_err();
        assert!(
            matches!(err, OcrError::RequestFailed { .. } | OcrError::ApiTimeout { .. }),
            "got: {err:?}"
        );
    }

    #[tokio::test]
    async fn observer_sees_both_arms() {
        use crate::progress::ExtractObserver;
        use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
        use std::sync::Arc;

        #[derive(Default)]
        struct Tracker {
            starts: AtomicUsize,
            completes: AtomicUsize,
            last_ok: AtomicBool,
        }
        impl ExtractObserver for Tracker {
            fn on_submit_start(&self, _f: &str, _b: usize) {
                self.starts.fetch_add(1, Ordering::SeqCst);
            }
            fn on_submit_complete(&self, ok: bool, _ms: u64) {
                self.completes.fetch_add(1, Ordering::SeqCst);
                self.last_ok.store(ok, Ordering::SeqCst);
            }
        }

        let tracker = Arc::new(Tracker::default());
        let config = ExtractConfig::builder()
            .api_key("test-key")
            .base_url("http://127.0.0.1:1")
            .api_timeout_secs(2)
            .observer(tracker.clone())
            .build()
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.pdf");
        std::fs::write(&path, b"%PDF-1.4 tiny").unwrap();

        let _ = extract(&path, &config).await;
        assert_eq!(tracker.starts.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert!(!tracker.last_ok.load(Ordering::SeqCst));
    }
}
