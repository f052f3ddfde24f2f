//! Observer trait for the in-flight submission window.
//!
//! The whole document goes to the OCR endpoint in one request, so there is
//! exactly one interesting interval: submit → completion. Callers inject an
//! `Arc<dyn ExtractObserver>` via the config builder to drive whatever busy
//! indicator fits their host — a terminal spinner, a UI flag, a log line.
//! The trait is `Send + Sync` with no-op defaults so implementors only
//! override what they care about.

use std::sync::Arc;

/// Called by the extraction flow around the OCR request.
pub trait ExtractObserver: Send + Sync {
    /// Called just before the OCR request is sent.
    ///
    /// # Arguments
    /// * `file_name`     — display name of the submitted file
    /// * `payload_bytes` — base64 payload size being uploaded
    fn on_submit_start(&self, file_name: &str, payload_bytes: usize) {
        let _ = (file_name, payload_bytes);
    }

    /// Called once the request has completed, success or failure.
    ///
    /// # Arguments
    /// * `ok`          — whether the extraction succeeded
    /// * `duration_ms` — wall-clock time of the request
    fn on_submit_complete(&self, ok: bool, duration_ms: u64) {
        let _ = (ok, duration_ms);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopObserver;

impl ExtractObserver for NoopObserver {}

/// Convenience alias matching the type stored in [`crate::config::ExtractConfig`].
pub type Observer = Arc<dyn ExtractObserver>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct TrackingObserver {
        starts: AtomicUsize,
        completed_ok: AtomicBool,
    }

    impl ExtractObserver for TrackingObserver {
        fn on_submit_start(&self, _file_name: &str, _payload_bytes: usize) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_submit_complete(&self, ok: bool, _duration_ms: u64) {
            self.completed_ok.store(ok, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_observer_does_not_panic() {
        let obs = NoopObserver;
        obs.on_submit_start("doc.pdf", 1024);
        obs.on_submit_complete(true, 42);
    }

    #[test]
    fn tracking_observer_receives_events() {
        let obs = TrackingObserver {
            starts: AtomicUsize::new(0),
            completed_ok: AtomicBool::new(false),
        };
        obs.on_submit_start("doc.pdf", 2048);
        obs.on_submit_complete(true, 900);
        assert_eq!(obs.starts.load(Ordering::SeqCst), 1);
        assert!(obs.completed_ok.load(Ordering::SeqCst));
    }

    #[test]
    fn arc_dyn_observer_works() {
        let obs: Observer = Arc::new(NoopObserver);
        obs.on_submit_start("scan.png", 10);
        obs.on_submit_complete(false, 5);
    }
}
