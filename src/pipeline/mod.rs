//! Pipeline stages for document-to-Markdown extraction.
//!
//! Each submodule implements exactly one transformation step, keeping every
//! stage independently testable.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ encode ──▶ ocr ──▶ export
//! (path)   (base64)   (API)   (md / txt)
//! ```
//!
//! 1. [`input`]  — validate the user-supplied path and sniff its media type
//! 2. [`encode`] — base64-wrap the file bytes as a data URI
//! 3. [`ocr`]    — the single network call to the OCR endpoint, plus
//!    page-fragment assembly
//! 4. [`export`] — write the result as markdown (verbatim) or plain text
//!    (markdown punctuation stripped)

pub mod encode;
pub mod export;
pub mod input;
pub mod ocr;
