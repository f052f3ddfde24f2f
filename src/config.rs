//! Configuration for document-to-Markdown extraction.
//!
//! All behaviour is controlled through [`ExtractConfig`], built via its
//! [`ExtractConfigBuilder`]. Keeping every knob in one struct makes configs
//! trivial to share, log, and diff between runs.
//!
//! # Design choice: fail fast on a missing credential
//! The API key is validated when the config is **built**, not when the
//! first request goes out. Constructing a client around an absent
//! credential just moves the failure to the worst possible moment — after
//! the user has selected a file and waited on a network call.

use crate::error::OcrError;
use crate::progress::Observer;
use std::fmt;
use std::sync::Arc;

/// The fixed OCR model identifier.
pub const DEFAULT_MODEL: &str = "mistral-ocr-latest";

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai";

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "MISTRAL_API_KEY";

/// Configuration for an extraction run.
///
/// Built via [`ExtractConfig::builder()`] or [`ExtractConfig::from_env()`].
///
/// # Example
/// ```rust
/// use ocr2md::ExtractConfig;
///
/// let config = ExtractConfig::builder()
///     .api_key("sk-example")
///     .api_timeout_secs(60)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractConfig {
    /// Mistral API credential. Required; validated at build time.
    pub api_key: String,

    /// OCR model identifier. Default: [`DEFAULT_MODEL`].
    pub model: String,

    /// API base URL. Default: [`DEFAULT_BASE_URL`]. Overridable for
    /// proxies and test doubles.
    pub base_url: String,

    /// Request timeout in seconds. Default: 120.
    ///
    /// The OCR endpoint processes the whole document in one call, so large
    /// PDFs legitimately take tens of seconds. Without a timeout a hung
    /// backend would hang the busy indicator forever.
    pub api_timeout_secs: u64,

    /// Ask the service to inline image data in the response. Default: true.
    pub include_images: bool,

    /// Optional observer for the in-flight submission window.
    pub observer: Option<Observer>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_timeout_secs: 120,
            include_images: true,
            observer: None,
        }
    }
}

impl fmt::Debug for ExtractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The key never appears in logs.
        f.debug_struct("ExtractConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_timeout_secs", &self.api_timeout_secs)
            .field("include_images", &self.include_images)
            .field("observer", &self.observer.as_ref().map(|_| "<dyn ExtractObserver>"))
            .finish()
    }
}

impl ExtractConfig {
    /// Create a new builder.
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder {
            config: Self::default(),
        }
    }

    /// Build a config from the environment, reading [`API_KEY_ENV`].
    ///
    /// Fails fast with [`OcrError::MissingApiKey`] when the variable is
    /// unset or empty.
    pub fn from_env() -> Result<Self, OcrError> {
        let key = std::env::var(API_KEY_ENV).unwrap_or_default();
        Self::builder().api_key(key).build()
    }
}

/// Builder for [`ExtractConfig`].
#[derive(Debug)]
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs.max(1);
        self
    }

    pub fn include_images(mut self, v: bool) -> Self {
        self.config.include_images = v;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn crate::progress::ExtractObserver>) -> Self {
        self.config.observer = Some(observer);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractConfig, OcrError> {
        let c = &self.config;
        if c.api_key.trim().is_empty() {
            return Err(OcrError::MissingApiKey);
        }
        if c.model.is_empty() {
            return Err(OcrError::InvalidConfig("model must not be empty".into()));
        }
        if !c.base_url.starts_with("http://") && !c.base_url.starts_with("https://") {
            return Err(OcrError::InvalidConfig(format!(
                "base_url must be an HTTP(S) URL, got '{}'",
                c.base_url
            )));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let config = ExtractConfig::builder().api_key("k").build().unwrap();
        assert_eq!(config.model, "mistral-ocr-latest");
        assert_eq!(config.base_url, "https://api.mistral.ai");
        assert_eq!(config.api_timeout_secs, 120);
        assert!(config.include_images);
    }

    #[test]
    fn missing_api_key_fails_at_build_time() {
        let err = ExtractConfig::builder().build().unwrap_err();
        assert!(matches!(err, OcrError::MissingApiKey));

        let err = ExtractConfig::builder().api_key("   ").build().unwrap_err();
        assert!(matches!(err, OcrError::MissingApiKey));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let err = ExtractConfig::builder()
            .api_key("k")
            .base_url("ftp://example.com")
            .build()
            .unwrap_err();
        assert!(matches!(err, OcrError::InvalidConfig(_)));
    }

    #[test]
    fn timeout_floor_is_one_second() {
        let config = ExtractConfig::builder()
            .api_key("k")
            .api_timeout_secs(0)
            .build()
            .unwrap();
        assert_eq!(config.api_timeout_secs, 1);
    }

    #[test]
    fn debug_never_prints_the_key() {
        let config = ExtractConfig::builder()
            .api_key("sk-very-secret")
            .build()
            .unwrap();
        let dump = format!("{config:?}");
        assert!(!dump.contains("sk-very-secret"));
        assert!(dump.contains("<redacted>"));
    }
}
