//! Upload-and-extract session: an explicit state machine for the
//! select → encode → submit → result flow.
//!
//! ## Why a state machine?
//!
//! The flow has exactly four pieces of state — the selected file, its
//! encoded payload, the current result text, and the request state — and a
//! small set of legal transitions between them. Modelling them as one
//! record updated through named transition functions makes every rule
//! checkable in a unit test: submission is disabled without a payload,
//! loading always clears on completion, a stale encode never overwrites a
//! newer selection.
//!
//! ## Transitions
//!
//! ```text
//!            select_file            begin_submit
//! (empty) ───────────────▶ Idle ───────────────▶ Loading
//!                           ▲                       │
//!                           │  finish_success       │
//!                           ├───────────────────────┤
//!                           │  finish_failure       │
//!                        Error ◀────────────────────┘
//! ```
//!
//! `Error` is a terminal-per-request state: the failure message is held for
//! display and the next `begin_submit` returns to `Loading`. The previous
//! result text survives a failure untouched, so a transient API error never
//! wipes a good extraction off the screen.
//!
//! ## Stale-encode discipline
//!
//! Encoding is asynchronous relative to selection. Each selection bumps a
//! generation counter and each payload carries the generation it was encoded
//! for; [`Session::attach_payload`] drops payloads from an older generation.
//! The newest selection always wins, deterministically — not by racing.

use crate::error::OcrError;
use crate::media::MediaType;
use crate::pipeline::encode::EncodedPayload;
use std::path::Path;
use tracing::{debug, warn};

/// The file currently selected for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Display name, typically the file name without directories.
    pub name: String,
    /// Declared media type, already validated as PDF or image.
    pub media_type: MediaType,
    /// Size of the raw payload in bytes.
    pub len: u64,
}

/// Request state of the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestState {
    /// No request in flight; ready to submit when a payload exists.
    #[default]
    Idle,
    /// A submission is in flight; further submits are rejected.
    Loading,
    /// The last submission failed; holds the user-facing message.
    Error(String),
}

/// One upload-and-extract session.
///
/// All mutation goes through the transition methods; fields are private so
/// no caller can, say, flip `Loading` without going through `begin_submit`.
#[derive(Debug, Default)]
pub struct Session {
    selected: Option<SelectedFile>,
    payload: Option<EncodedPayload>,
    result: String,
    state: RequestState,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Select a file for extraction, replacing any previous selection.
    ///
    /// Validates the declared media type; on rejection the session is left
    /// exactly as it was. On acceptance the previous payload is invalidated
    /// (its generation is now stale) and the result is kept until the next
    /// successful submission overwrites it.
    ///
    /// Returns the generation to pass to [`Session::attach_payload`] once
    /// encoding completes.
    pub fn select_file(
        &mut self,
        path: &Path,
        mime: &str,
        len: u64,
    ) -> Result<u64, OcrError> {
        let media_type = MediaType::from_mime(mime, path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        debug!(file = %name, mime = %media_type, "file selected");
        self.selected = Some(SelectedFile {
            name,
            media_type,
            len,
        });
        self.payload = None;
        self.generation += 1;
        Ok(self.generation)
    }

    /// Attach the encoded payload produced for `generation`.
    ///
    /// A payload from an older generation belongs to a file that has since
    /// been replaced; it is dropped and `false` is returned.
    pub fn attach_payload(&mut self, generation: u64, payload: EncodedPayload) -> bool {
        if generation != self.generation {
            warn!(
                stale = generation,
                current = self.generation,
                "discarding stale encoded payload"
            );
            return false;
        }
        self.payload = Some(payload);
        true
    }

    /// Begin a submission: `Idle`/`Error` → `Loading`.
    ///
    /// Preconditions: an encoded payload exists and no submission is in
    /// flight. On violation the state is unchanged and a validation error
    /// is returned. On success the payload to submit is returned.
    pub fn begin_submit(&mut self) -> Result<&EncodedPayload, OcrError> {
        if matches!(self.state, RequestState::Loading) {
            return Err(OcrError::SubmissionInFlight);
        }
        match self.payload {
            Some(ref payload) => {
                self.state = RequestState::Loading;
                Ok(payload)
            }
            None => Err(OcrError::NothingSelected),
        }
    }

    /// Complete a submission successfully: `Loading` → `Idle`.
    pub fn finish_success(&mut self, markdown: String) {
        self.result = markdown;
        self.state = RequestState::Idle;
    }

    /// Complete a submission with a failure: `Loading` → `Error`.
    ///
    /// The previous result text is deliberately left in place.
    pub fn finish_failure(&mut self, message: String) {
        self.state = RequestState::Error(message);
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// True when a submission may be started right now.
    pub fn can_submit(&self) -> bool {
        self.payload.is_some() && !matches!(self.state, RequestState::Loading)
    }

    /// True when the current result may be exported (non-empty).
    pub fn can_export(&self) -> bool {
        !self.result.is_empty()
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn payload(&self) -> Option<&EncodedPayload> {
        self.payload.as_ref()
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::encode::encode_payload;
    use std::path::PathBuf;

    fn pdf_payload() -> EncodedPayload {
        encode_payload(b"%PDF-1.7 fake", &MediaType::Pdf)
    }

    fn select_pdf(session: &mut Session) -> u64 {
        session
            .select_file(&PathBuf::from("doc.pdf"), "application/pdf", 13)
            .expect("pdf is accepted")
    }

    #[test]
    fn accepted_selection_sets_name_and_enables_submit_after_encode() {
        let mut s = Session::new();
        let generation = select_pdf(&mut s);
        assert_eq!(s.selected().unwrap().name, "doc.pdf");
        assert!(!s.can_submit(), "no payload yet");

        assert!(s.attach_payload(generation, pdf_payload()));
        assert!(s.can_submit());
    }

    #[test]
    fn rejected_selection_changes_nothing() {
        let mut s = Session::new();
        let generation = select_pdf(&mut s);
        s.attach_payload(generation, pdf_payload());

        let err = s
            .select_file(&PathBuf::from("notes.txt"), "text/plain", 5)
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(s.selected().unwrap().name, "doc.pdf");
        assert!(s.can_submit(), "prior payload survives a rejected selection");
    }

    #[test]
    fn image_types_are_accepted() {
        let mut s = Session::new();
        let generation = s
            .select_file(&PathBuf::from("scan.png"), "image/png", 100)
            .unwrap();
        assert!(s.attach_payload(generation, pdf_payload()));
        assert!(s.can_submit());
    }

    #[test]
    fn submit_without_payload_is_nothing_selected() {
        let mut s = Session::new();
        assert!(matches!(
            s.begin_submit().unwrap_err(),
            OcrError::NothingSelected
        ));
        assert_eq!(*s.state(), RequestState::Idle);

        select_pdf(&mut s);
        // Selected but not yet encoded — still nothing to submit.
        assert!(matches!(
            s.begin_submit().unwrap_err(),
            OcrError::NothingSelected
        ));
    }

    #[test]
    fn double_submit_is_rejected_while_loading() {
        let mut s = Session::new();
        let generation = select_pdf(&mut s);
        s.attach_payload(generation, pdf_payload());

        s.begin_submit().expect("first submit starts");
        assert!(s.is_loading());
        assert!(!s.can_submit());
        assert!(matches!(
            s.begin_submit().unwrap_err(),
            OcrError::SubmissionInFlight
        ));
    }

    #[test]
    fn success_clears_loading_and_sets_result() {
        let mut s = Session::new();
        let generation = select_pdf(&mut s);
        s.attach_payload(generation, pdf_payload());

        s.begin_submit().unwrap();
        s.finish_success("A\n\nB".into());
        assert_eq!(*s.state(), RequestState::Idle);
        assert_eq!(s.result(), "A\n\nB");
        assert!(s.can_export());
        assert!(s.can_submit(), "ready for a re-run");
    }

    #[test]
    fn failure_clears_loading_and_keeps_prior_result() {
        let mut s = Session::new();
        let generation = select_pdf(&mut s);
        s.attach_payload(generation, pdf_payload());

        s.begin_submit().unwrap();
        s.finish_success("first run".into());

        s.begin_submit().unwrap();
        s.finish_failure("HTTP 500".into());
        assert!(!s.is_loading(), "loading never survives completion");
        assert_eq!(*s.state(), RequestState::Error("HTTP 500".into()));
        assert_eq!(s.result(), "first run", "failure leaves the result as-is");
        assert!(s.can_submit(), "error state does not block a retry");
    }

    #[test]
    fn export_disabled_until_result_nonempty() {
        let mut s = Session::new();
        assert!(!s.can_export());
        let generation = select_pdf(&mut s);
        s.attach_payload(generation, pdf_payload());
        s.begin_submit().unwrap();
        assert!(!s.can_export());
        s.finish_success("No markdown found.".into());
        assert!(s.can_export());
    }

    #[test]
    fn stale_encode_is_discarded() {
        let mut s = Session::new();
        let first = select_pdf(&mut s);

        // User reselects before the first encode lands.
        let second = s
            .select_file(&PathBuf::from("scan.png"), "image/png", 7)
            .unwrap();
        assert_ne!(first, second);

        // The slow first encode completes afterwards: dropped.
        assert!(!s.attach_payload(first, pdf_payload()));
        assert!(!s.can_submit());

        // The encode for the current selection wins.
        assert!(s.attach_payload(second, pdf_payload()));
        assert!(s.can_submit());
    }

    #[test]
    fn reselection_invalidates_existing_payload() {
        let mut s = Session::new();
        let generation = select_pdf(&mut s);
        s.attach_payload(generation, pdf_payload());
        assert!(s.can_submit());

        select_pdf(&mut s);
        assert!(!s.can_submit(), "new selection awaits a fresh encode");
    }
}
