//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/reviewlens/) and project (.reviewlens/) level configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{analysis, collector, delivery};
use crate::types::{Platform, Result, ReviewError};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Review source settings
    pub collectors: CollectorsConfig,

    /// Sentiment and keyword analysis settings
    pub analysis: AnalysisConfig,

    /// Session caching behavior
    pub session: SessionConfig,

    /// Prompt hand-off settings
    pub delivery: DeliveryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            collectors: CollectorsConfig::default(),
            analysis: AnalysisConfig::default(),
            session: SessionConfig::default(),
            delivery: DeliveryConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `ReviewError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.collectors.enabled.is_empty() {
            return Err(ReviewError::Config(
                "collectors.enabled must list at least one platform".to_string(),
            ));
        }

        if self.collectors.timeout_secs == 0 {
            return Err(ReviewError::Config(
                "collectors.timeout_secs must be greater than 0".to_string(),
            ));
        }

        for (key, value) in [
            ("collectors.kakao.search_url", &self.collectors.kakao.search_url),
            ("collectors.kakao.comment_url", &self.collectors.kakao.comment_url),
            ("collectors.google.api_base", &self.collectors.google.api_base),
            ("collectors.naver.search_url", &self.collectors.naver.search_url),
            ("collectors.naver.review_url", &self.collectors.naver.review_url),
            ("delivery.gemini.api_base", &self.delivery.gemini.api_base),
        ] {
            validate_url(key, value)?;
        }

        // Zero would leave no room for a neutral label
        let threshold = self.analysis.sentiment_threshold;
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(ReviewError::Config(format!(
                "analysis.sentiment_threshold must be in (0.0, 1.0), got {}",
                self.analysis.sentiment_threshold
            )));
        }

        if self.analysis.keywords_per_aspect == 0 {
            return Err(ReviewError::Config(
                "analysis.keywords_per_aspect must be greater than 0".to_string(),
            ));
        }

        if self.delivery.method == DeliveryMethod::Command && self.delivery.command.is_empty() {
            return Err(ReviewError::Config(
                "delivery.command must name a program when delivery.method = \"command\""
                    .to_string(),
            ));
        }

        if self.delivery.gemini.timeout_secs == 0 {
            return Err(ReviewError::Config(
                "delivery.gemini.timeout_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Endpoint templates may carry `{id}`/`{page}`/`{query}` placeholders; check the rest parses
fn validate_url(key: &str, value: &str) -> Result<()> {
    let probe = value
        .replace("{id}", "0")
        .replace("{page}", "1")
        .replace("{query}", "q");
    let url = url::Url::parse(&probe)
        .map_err(|e| ReviewError::Config(format!("{} is not a valid URL ({}): {}", key, e, value)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ReviewError::Config(format!(
            "{} must use http or https, got {}",
            key,
            url.scheme()
        )));
    }
    Ok(())
}

/// A configured key, or `env_var` when the configured one is missing or blank
pub fn resolve_api_key(configured: Option<String>, env_var: &str) -> Option<String> {
    configured
        .filter(|k| !k.trim().is_empty())
        .or_else(|| std::env::var(env_var).ok())
        .filter(|k| !k.trim().is_empty())
}

// =============================================================================
// Collector Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorsConfig {
    /// Platforms to query; always queried in kakao, google, naver order
    pub enabled: Vec<Platform>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Browser-like User-Agent sent with every request
    pub user_agent: String,

    pub kakao: KakaoConfig,
    pub google: GoogleConfig,
    pub naver: NaverConfig,
}

impl Default for CollectorsConfig {
    fn default() -> Self {
        Self {
            enabled: Platform::ALL.to_vec(),
            timeout_secs: collector::DEFAULT_TIMEOUT_SECS,
            user_agent: collector::USER_AGENT.to_string(),
            kakao: KakaoConfig::default(),
            google: GoogleConfig::default(),
            naver: NaverConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KakaoConfig {
    /// Place search endpoint (`{query}` placeholder)
    pub search_url: String,
    /// Comment list endpoint (`{id}` and `{page}` placeholders)
    pub comment_url: String,
    pub max_reviews: usize,
}

impl Default for KakaoConfig {
    fn default() -> Self {
        Self {
            search_url: "https://search.map.kakao.com/mapsearch/map.daum?q={query}&msFlag=A&sort=0"
                .to_string(),
            comment_url: "https://place.map.kakao.com/commentlist/v/{id}/{page}".to_string(),
            max_reviews: collector::DEFAULT_MAX_REVIEWS,
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    /// Places API base URL
    pub api_base: String,
    /// Places API key; falls back to GOOGLE_PLACES_API_KEY.
    /// Never serialized to output.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Review language requested from the API
    pub language: String,
    pub max_reviews: usize,
}

impl std::fmt::Debug for GoogleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("language", &self.language)
            .field("max_reviews", &self.max_reviews)
            .finish()
    }
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_base: "https://maps.googleapis.com/maps/api/place".to_string(),
            api_key: None,
            language: "ko".to_string(),
            max_reviews: collector::DEFAULT_MAX_REVIEWS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NaverConfig {
    /// Place search endpoint (`{query}` placeholder)
    pub search_url: String,
    /// Visitor review page (`{id}` placeholder)
    pub review_url: String,
    pub max_reviews: usize,
}

impl Default for NaverConfig {
    fn default() -> Self {
        Self {
            search_url: "https://map.naver.com/p/api/search/allSearch?query={query}&type=all"
                .to_string(),
            review_url: "https://m.place.naver.com/restaurant/{id}/review/visitor".to_string(),
            max_reviews: collector::DEFAULT_MAX_REVIEWS,
        }
    }
}

// =============================================================================
// Analysis Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// |score| at or above this value is labelled positive/negative
    pub sentiment_threshold: f32,

    /// Keywords kept per aspect
    pub keywords_per_aspect: usize,

    /// Exemplar reviews kept per polarity
    pub exemplar_count: usize,

    /// Exemplar text is cut to this many characters inside prompts
    pub exemplar_max_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sentiment_threshold: analysis::SENTIMENT_THRESHOLD,
            keywords_per_aspect: analysis::KEYWORDS_PER_ASPECT,
            exemplar_count: analysis::EXEMPLAR_COUNT,
            exemplar_max_chars: analysis::EXEMPLAR_MAX_CHARS,
        }
    }
}

// =============================================================================
// Session Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// Reuse the cached prompt when only the role changes.
    /// Off by default: the cache is keyed on (name, role).
    pub reuse_prompt_across_roles: bool,
}

// =============================================================================
// Delivery Configuration
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMethod {
    /// Launch an external program with the prompt as its last argument
    #[default]
    Command,
    /// Call the Gemini REST API directly
    Gemini,
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryMethod::Command => write!(f, "command"),
            DeliveryMethod::Gemini => write!(f, "gemini"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub method: DeliveryMethod,

    /// Program and leading arguments; the prompt is appended
    pub command: Vec<String>,

    pub gemini: GeminiConfig,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            method: DeliveryMethod::Command,
            command: delivery::DEFAULT_COMMAND
                .iter()
                .map(|s| s.to_string())
                .collect(),
            gemini: GeminiConfig::default(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_base: String,
    pub model: String,
    /// Falls back to GEMINI_API_KEY. Never serialized to output.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_base: delivery::GEMINI_API_BASE.to_string(),
            model: delivery::GEMINI_MODEL.to_string(),
            api_key: None,
            timeout_secs: delivery::GEMINI_TIMEOUT_SECS,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.collectors.enabled, Platform::ALL.to_vec());
        assert_eq!(config.delivery.method, DeliveryMethod::Command);
        assert!(!config.session.reuse_prompt_across_roles);
        config.validate().unwrap();
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let mut config = Config::default();
        config.analysis.sentiment_threshold = 1.5;
        assert!(matches!(config.validate(), Err(ReviewError::Config(_))));

        config.analysis.sentiment_threshold = 0.0;
        assert!(matches!(config.validate(), Err(ReviewError::Config(_))));

        config.analysis.sentiment_threshold = 0.05;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_command() {
        let mut config = Config::default();
        config.delivery.command.clear();
        assert!(config.validate().is_err());

        config.delivery.method = DeliveryMethod::Gemini;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = Config::default();
        config.collectors.naver.review_url = "ftp://example.com/{id}".to_string();
        assert!(config.validate().is_err());

        config.collectors.naver.review_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_api_keys_redacted_and_not_serialized() {
        let mut config = Config::default();
        config.collectors.google.api_key = Some("secret-google".to_string());
        config.delivery.gemini.api_key = Some("secret-gemini".to_string());

        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret-google"));
        assert!(!debug.contains("secret-gemini"));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret-google"));
        assert!(!json.contains("secret-gemini"));
    }

    #[test]
    fn test_blank_configured_key_falls_back_to_env() {
        const VAR: &str = "REVIEWLENS_TEST_RESOLVE_KEY";
        // SAFETY: the variable name is unique to this test
        unsafe {
            std::env::set_var(VAR, "from-env");
        }
        assert_eq!(resolve_api_key(Some("  ".to_string()), VAR).as_deref(), Some("from-env"));
        assert_eq!(resolve_api_key(None, VAR).as_deref(), Some("from-env"));
        assert_eq!(
            resolve_api_key(Some("from-config".to_string()), VAR).as_deref(),
            Some("from-config")
        );

        unsafe {
            std::env::set_var(VAR, " ");
        }
        assert_eq!(resolve_api_key(Some(String::new()), VAR), None);
        unsafe {
            std::env::remove_var(VAR);
        }
        assert_eq!(resolve_api_key(None, VAR), None);
    }

    #[test]
    fn test_delivery_method_serde() {
        let method: DeliveryMethod = serde_json::from_str("\"gemini\"").unwrap();
        assert_eq!(method, DeliveryMethod::Gemini);
        assert_eq!(DeliveryMethod::Command.to_string(), "command");
    }
}
