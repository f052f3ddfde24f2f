//! Media-type acceptance and sniffing.
//!
//! The OCR endpoint takes exactly two document shapes: a generic document
//! reference for PDFs and an image reference for everything raster. The
//! acceptance rule is therefore binary — a declared type of
//! `application/pdf`, or anything beginning with `image/`. Everything else
//! is rejected up front with a validation error and no state change.
//!
//! A CLI has no browser-supplied `File.type`, so the declared type of a
//! local file comes from content sniffing: magic bytes first (they cannot
//! lie about what the API will receive), file extension as a fallback for
//! formats without a distinctive signature.

use crate::error::OcrError;
use std::fmt;
use std::path::Path;

/// Declared media type of a selected file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaType {
    /// `application/pdf` — sent as a generic document reference.
    Pdf,
    /// Any `image/*` type — sent as an image reference. Holds the full
    /// MIME string, e.g. `image/png`.
    Image(String),
}

impl MediaType {
    /// Validate a declared MIME string against the acceptance rule.
    ///
    /// Accepts exactly `application/pdf` or any type beginning with
    /// `image/`; everything else is an [`OcrError::UnsupportedMediaType`].
    pub fn from_mime(mime: &str, path: &Path) -> Result<Self, OcrError> {
        if mime == "application/pdf" {
            Ok(MediaType::Pdf)
        } else if mime.starts_with("image/") {
            Ok(MediaType::Image(mime.to_string()))
        } else {
            Err(OcrError::UnsupportedMediaType {
                path: path.to_path_buf(),
                mime: mime.to_string(),
            })
        }
    }

    /// Sniff the media type of a local file from its leading bytes,
    /// falling back to the extension when no signature matches.
    pub fn sniff(path: &Path, bytes: &[u8]) -> Result<Self, OcrError> {
        if let Some(mime) = sniff_magic(bytes) {
            return Self::from_mime(mime, path);
        }
        if let Some(mime) = mime_from_extension(path) {
            return Self::from_mime(mime, path);
        }
        Err(OcrError::UnsupportedMediaType {
            path: path.to_path_buf(),
            mime: "application/octet-stream".to_string(),
        })
    }

    /// The full MIME string, as used in the data-URI prefix.
    pub fn mime(&self) -> &str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::Image(mime) => mime,
        }
    }

    pub fn is_pdf(&self) -> bool {
        matches!(self, MediaType::Pdf)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// Match well-known file signatures. Returns the MIME type or None.
fn sniff_magic(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"%PDF") {
        return Some("application/pdf");
    }
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        return Some("image/png");
    }
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some("image/jpeg");
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return Some("image/gif");
    }
    // RIFF....WEBP
    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    if bytes.starts_with(b"BM") {
        return Some("image/bmp");
    }
    // TIFF, little- and big-endian
    if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00]) || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
    {
        return Some("image/tiff");
    }
    None
}

/// Extension fallback for formats the magic check does not cover.
fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "pdf" => Some("application/pdf"),
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "tif" | "tiff" => Some("image/tiff"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}
