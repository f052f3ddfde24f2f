//! Mistral OCR API client: request construction, the single network call,
//! and page-fragment assembly.
//!
//! The endpoint takes the whole document in one request — there is no
//! per-page fan-out on our side; pagination happens inside the service and
//! comes back as an ordered list of per-page markdown fragments.
//!
//! ## Document-reference shapes
//!
//! The API distinguishes two reference shapes, selected by media type:
//! `document_url` for PDFs and `image_url` for raster images. Both carry
//! the same base64 data URI; only the tag and field name differ. The
//! request always asks for inline image data (`include_image_base64`).
//!
//! No retries are attempted: a failure is reported once, as a typed error.
//! The only guard against a hung backend is the request timeout configured
//! on the HTTP client.

use crate::config::ExtractConfig;
use crate::error::OcrError;
use crate::pipeline::encode::EncodedPayload;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Fallback result when the response carries no pages.
pub const NO_MARKDOWN_FALLBACK: &str = "No markdown found.";

// ── Wire types ───────────────────────────────────────────────────────────

/// Request body for `POST /v1/ocr`.
#[derive(Debug, Serialize)]
pub struct OcrRequest<'a> {
    pub model: &'a str,
    pub document: DocumentRef<'a>,
    pub include_image_base64: bool,
}

/// The two document-reference shapes the endpoint accepts.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentRef<'a> {
    /// Generic document reference — used for PDFs.
    DocumentUrl { document_url: &'a str },
    /// Image reference — used for all `image/*` types.
    ImageUrl { image_url: &'a str },
}

impl<'a> DocumentRef<'a> {
    /// Pick the reference shape for an encoded payload.
    pub fn for_payload(payload: &'a EncodedPayload) -> Self {
        if payload.media_type.is_pdf() {
            DocumentRef::DocumentUrl {
                document_url: &payload.data_uri,
            }
        } else {
            DocumentRef::ImageUrl {
                image_url: &payload.data_uri,
            }
        }
    }
}

/// Response body: an ordered list of per-page results.
///
/// Unknown fields (usage info, per-page images and dimensions) are ignored;
/// only the markdown fragments matter here.
#[derive(Debug, Deserialize)]
pub struct OcrResponse {
    #[serde(default)]
    pub pages: Vec<OcrPage>,
}

/// One page of OCR output.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OcrPage {
    /// 0-indexed page number as reported by the service.
    #[serde(default)]
    pub index: usize,
    /// The page's text, already formatted as markdown.
    #[serde(default)]
    pub markdown: String,
}

// ── Operations ───────────────────────────────────────────────────────────

/// Submit an encoded payload to the OCR endpoint and return the parsed
/// response.
pub async fn process(
    payload: &EncodedPayload,
    config: &ExtractConfig,
) -> Result<OcrResponse, OcrError> {
    let request = OcrRequest {
        model: &config.model,
        document: DocumentRef::for_payload(payload),
        include_image_base64: config.include_images,
    };

    let url = format!("{}/v1/ocr", config.base_url.trim_end_matches('/'));
    info!(model = %config.model, mime = %payload.media_type, "submitting OCR request");

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.api_timeout_secs))
        .build()
        .map_err(|e| OcrError::RequestFailed {
            reason: e.to_string(),
        })?;

    let response = client
        .post(&url)
        .bearer_auth(&config.api_key)
        .json(&request)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                OcrError::ApiTimeout {
                    secs: config.api_timeout_secs,
                }
            } else {
                OcrError::RequestFailed {
                    reason: e.to_string(),
                }
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        return Err(OcrError::ApiStatus {
            status: status.as_u16(),
            detail: truncate_detail(&detail),
        });
    }

    let parsed: OcrResponse = response
        .json()
        .await
        .map_err(|e| OcrError::MalformedResponse {
            detail: e.to_string(),
        })?;

    debug!(pages = parsed.pages.len(), "OCR response parsed");
    Ok(parsed)
}

/// Join per-page markdown fragments with a blank line between them.
///
/// An absent or empty page list yields the literal
/// [`NO_MARKDOWN_FALLBACK`] string rather than an empty document.
pub fn join_pages(pages: &[OcrPage]) -> String {
    if pages.is_empty() {
        return NO_MARKDOWN_FALLBACK.to_string();
    }
    pages
        .iter()
        .map(|p| p.markdown.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Error bodies can embed the full request echo; keep messages readable.
fn truncate_detail(body: &str) -> String {
    const MAX: usize = 500;
    if body.len() > MAX {
        let cut = body
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}…", &body[..cut])
    } else {
        body.to_string()
    }
}
