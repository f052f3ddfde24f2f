//! # ocr2md
//!
//! Extract Markdown from PDF and image files using the Mistral OCR API.
//!
//! ## Why this crate?
//!
//! Local OCR stacks need a rasteriser, a trained model, and a layout
//! heuristic; the hosted OCR endpoint already does all three and returns
//! per-page Markdown. This crate is the thin, well-typed client around it:
//! validate one file, encode it as a base64 data URI, make one API call,
//! join the page fragments, export the result.
//!
//! ## Flow
//!
//! ```text
//! file
//!  │
//!  ├─ 1. Input    validate path, sniff media type (PDF or image/*)
//!  ├─ 2. Encode   bytes → base64 data URI
//!  ├─ 3. Submit   one POST /v1/ocr call (document_url or image_url)
//!  ├─ 4. Join     page fragments joined with blank lines
//!  └─ 5. Export   ocr-result.md (verbatim) / ocr-result.txt (stripped)
//! ```
//!
//! The select → submit → result lifecycle is modelled explicitly by
//! [`Session`], a small state machine that enforces the rules interactive
//! hosts need: one active selection, no double submit while a request is
//! in flight, loading always cleared on completion, stale encodes
//! discarded.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ocr2md::{extract, ExtractConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads MISTRAL_API_KEY; fails fast if it is unset.
//!     let config = ExtractConfig::from_env()?;
//!     let output = extract("document.pdf", &config).await?;
//!     println!("{}", output.markdown);
//!     eprintln!("{} pages in {}ms",
//!         output.stats.page_count,
//!         output.stats.request_duration_ms);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `ocr2md` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! ocr2md = { version = "0.2", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod media;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod session;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ExtractConfig, ExtractConfigBuilder, API_KEY_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::OcrError;
pub use extract::{extract, extract_sync, extract_to_file};
pub use media::MediaType;
pub use output::{ExtractOutput, ExtractStats};
pub use pipeline::export::{to_plain_text, MARKDOWN_FILENAME, PLAIN_TEXT_FILENAME};
pub use progress::{ExtractObserver, NoopObserver, Observer};
pub use session::{RequestState, SelectedFile, Session};
