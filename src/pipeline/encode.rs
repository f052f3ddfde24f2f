//! Payload encoding: raw file bytes → base64 data URI.
//!
//! The OCR API accepts documents as data URIs embedded in the JSON request
//! body, so the whole file is base64-encoded once, up front, with the
//! standard alphabet. The MIME prefix comes from the sniffed media type —
//! the API routes PDFs and images differently based on it.

use crate::media::MediaType;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

/// A file encoded and ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    /// Full data URI: `data:<mime>;base64,<payload>`.
    pub data_uri: String,
    /// Media type the URI was built for.
    pub media_type: MediaType,
}

impl EncodedPayload {
    /// Length of the base64 text (excluding the `data:` prefix).
    pub fn base64_len(&self) -> usize {
        self.data_uri
            .split_once(";base64,")
            .map(|(_, b64)| b64.len())
            .unwrap_or(0)
    }
}

/// Encode file bytes as a base64 data URI for the given media type.
pub fn encode_payload(bytes: &[u8], media_type: &MediaType) -> EncodedPayload {
    let b64 = STANDARD.encode(bytes);
    debug!(
        mime = %media_type,
        raw_bytes = bytes.len(),
        base64_bytes = b64.len(),
        "encoded payload"
    );
    EncodedPayload {
        data_uri: format!("data:{};base64,{}", media_type.mime(), b64),
        media_type: media_type.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pdf_data_uri_has_prefix_and_valid_base64() {
        let payload = encode_payload(b"%PDF-1.7", &MediaType::Pdf);
        assert!(payload.data_uri.starts_with("data:application/pdf;base64,"));

        let b64 = payload.data_uri.split_once(";base64,").unwrap().1;
        let decoded = STANDARD.decode(b64).expect("valid base64");
        assert_eq!(decoded, b"%PDF-1.7");
    }

    #[test]
    fn image_data_uri_carries_the_image_mime() {
        let payload = encode_payload(&[0xFF, 0xD8, 0xFF], &MediaType::Image("image/jpeg".into()));
        assert!(payload.data_uri.starts_with("data:image/jpeg;base64,"));
        assert_eq!(payload.media_type.mime(), "image/jpeg");
    }

    #[test]
    fn base64_len_measures_payload_only() {
        let payload = encode_payload(b"abc", &MediaType::Pdf);
        // "abc" → "YWJj"
        assert_eq!(payload.base64_len(), 4);
    }

    #[test]
    fn empty_input_encodes_to_empty_payload() {
        let payload = encode_payload(b"", &MediaType::Pdf);
        assert_eq!(payload.base64_len(), 0);
        assert_eq!(payload.data_uri, "data:application/pdf;base64,");
    }
}
