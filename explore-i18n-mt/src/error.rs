/// Error types for translation requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// Missing or empty text / target language
    InvalidRequest(String),
    /// Language code is not acceptable
    InvalidLocale(String),
    /// Gateway or provider configuration is unusable
    ConfigError(String),
    /// Transport-level failure talking to a provider
    NetworkError(String),
    /// Provider answered HTTP 429
    RateLimited(String),
    /// Provider answered but gave no usable translation
    ProviderFailure(String),
    /// Every provider failed for this request
    UpstreamTranslationFailure(String),
    /// General error with context
    Other(String),
}

impl std::fmt::Display for MtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MtError::InvalidRequest(msg) => write!(f, "{}", msg),
            MtError::InvalidLocale(msg) => write!(f, "Invalid locale: {}", msg),
            MtError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            MtError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            MtError::RateLimited(msg) => write!(f, "Rate limited: {}", msg),
            MtError::ProviderFailure(msg) => write!(f, "Provider failure: {}", msg),
            MtError::UpstreamTranslationFailure(msg) => write!(f, "{}", msg),
            MtError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for MtError {}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        MtError::NetworkError(err.to_string())
    }
}

impl From<explore_i18n::LanguageError> for MtError {
    fn from(err: explore_i18n::LanguageError) -> Self {
        MtError::InvalidLocale(err.to_string())
    }
}

/// Result type for translation operations
pub type MtResult<T> = Result<T, MtError>;
