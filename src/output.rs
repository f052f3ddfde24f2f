//! Output types returned by the extraction entry points.

use crate::pipeline::ocr::OcrPage;
use serde::{Deserialize, Serialize};

/// The result of a completed extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractOutput {
    /// All page fragments joined with a blank line between them, or the
    /// literal `"No markdown found."` when the service returned no pages.
    pub markdown: String,
    /// The per-page fragments as returned by the service, in order.
    pub pages: Vec<OcrPage>,
    /// Timing and size statistics for the run.
    pub stats: ExtractStats,
}

/// Statistics for one extraction run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractStats {
    /// Number of pages in the response.
    pub page_count: usize,
    /// Raw input file size in bytes.
    pub input_bytes: u64,
    /// Base64 payload size actually uploaded.
    pub payload_bytes: usize,
    /// Wall-clock time of the OCR request alone.
    pub request_duration_ms: u64,
    /// Wall-clock time of the whole run (read + encode + request).
    pub total_duration_ms: u64,
}
