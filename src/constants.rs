//! Global Constants
//!
//! Centralized constants for configuration defaults and tuning.

/// Review collector constants
pub mod collector {
    /// Default per-request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

    /// Reviews kept per platform
    pub const DEFAULT_MAX_REVIEWS: usize = 30;

    /// Redirects followed per request
    pub const MAX_REDIRECTS: usize = 5;

    /// Browser-like User-Agent; the map sites reject obvious bots
    pub const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    /// Accept-Language sent with every request
    pub const ACCEPT_LANGUAGE: &str = "ko-KR,ko;q=0.9,en-US;q=0.6,en;q=0.4";

    /// Upper bound on comment pages walked for one place
    pub const MAX_PAGES: usize = 10;
}

/// Sentiment and keyword analysis constants
pub mod analysis {
    /// |score| needed for a positive/negative label
    pub const SENTIMENT_THRESHOLD: f32 = 0.1;

    /// Keywords kept per aspect
    pub const KEYWORDS_PER_ASPECT: usize = 5;

    /// Exemplar reviews per polarity
    pub const EXEMPLAR_COUNT: usize = 3;

    /// Exemplar characters shown in prompts
    pub const EXEMPLAR_MAX_CHARS: usize = 200;

    /// Weight of the star rating when text also carries sentiment
    pub const RATING_WEIGHT: f32 = 0.6;

    /// Minimum token length (characters) for keyword candidates
    pub const MIN_TOKEN_CHARS: usize = 2;
}

/// Prompt delivery constants
pub mod delivery {
    /// Default hand-off command; the prompt is appended as the last argument
    pub const DEFAULT_COMMAND: &[&str] = &["gemini", "-p"];

    pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

    pub const GEMINI_MODEL: &str = "gemini-2.0-flash";

    /// Gemini request timeout (seconds)
    pub const GEMINI_TIMEOUT_SECS: u64 = 120;

    /// Characters of response/stderr kept in a delivery report
    pub const REPORT_EXCERPT_CHARS: usize = 500;

    /// How long the CLI waits for a launched delivery to finish (seconds)
    pub const DEFAULT_WAIT_SECS: u64 = 300;
}

/// Terminal rendering constants
pub mod display {
    /// Widest a review text cell may grow (terminal columns)
    pub const REVIEW_TEXT_WIDTH: usize = 48;

    /// Widest any other table cell may grow
    pub const CELL_WIDTH: usize = 24;
}
