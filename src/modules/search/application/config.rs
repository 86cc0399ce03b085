use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::modules::search::domain::{OutputType, SiteIndex};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{RateLimiter, RateLimiterPair};

pub const API_KEY_VAR: &str = "SAUCE_LENS_API_KEY";
pub const ENDPOINT_VAR: &str = "SAUCE_LENS_ENDPOINT";
pub const RESULT_COUNT_VAR: &str = "SAUCE_LENS_RESULT_COUNT";
pub const TEST_MODE_VAR: &str = "SAUCE_LENS_TEST_MODE";
pub const RETURN_RATINGS_VAR: &str = "SAUCE_LENS_RETURN_RATINGS";
pub const PREVENT_EXPLICIT_VAR: &str = "SAUCE_LENS_PREVENT_EXPLICIT";
pub const UNKNOWN_AS_QUESTIONABLE_VAR: &str = "SAUCE_LENS_UNKNOWN_AS_QUESTIONABLE";
pub const IGNORE_RATE_LIMITS_VAR: &str = "SAUCE_LENS_IGNORE_RATE_LIMITS";
pub const FETCH_TIMEOUT_VAR: &str = "SAUCE_LENS_FETCH_TIMEOUT_SECS";

pub const DEFAULT_ENDPOINT: &str = "https://saucenao.com/search.php";
pub const DEFAULT_RESULT_COUNT: u32 = 6;
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Account key for the search service. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(***)")
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

/// Caller policy applied after a rating is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingPolicy {
    pub treat_unknown_as_questionable: bool,
    pub prevent_explicit_results: bool,
}

/// Long-lived search settings shared by every search.
///
/// The only state a search mutates is the rate limiter pair, which sits
/// behind a single mutex.
#[derive(Debug)]
pub struct SearchConfig {
    api_key: ApiKey,
    pub api_endpoint: String,
    pub default_result_count: u32,
    pub output_type: OutputType,
    /// Service returns a single result
    pub test_mode: bool,
    pub return_ratings: bool,
    pub prevent_explicit_results: bool,
    pub treat_unknown_as_questionable: bool,
    pub ignore_rate_limits: bool,
    pub allowed_extensions: HashSet<String>,
    pub enabled_indexes: Vec<SiteIndex>,
    pub disabled_indexes: Vec<SiteIndex>,
    pub fetch_timeout: Duration,
    rate_limiters: Mutex<RateLimiterPair>,
}

impl SearchConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: ApiKey::new(api_key),
            api_endpoint: DEFAULT_ENDPOINT.to_string(),
            default_result_count: DEFAULT_RESULT_COUNT,
            output_type: OutputType::Json,
            test_mode: false,
            return_ratings: true,
            prevent_explicit_results: false,
            treat_unknown_as_questionable: true,
            ignore_rate_limits: false,
            allowed_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            enabled_indexes: Vec::new(),
            disabled_indexes: Vec::new(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            rate_limiters: Mutex::new(RateLimiterPair::default()),
        }
    }

    /// Load from the process environment, reading a `.env` file first if present
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::ConfigurationError(format!("{} is not set", API_KEY_VAR)))?;

        let mut config = Self::new(api_key.trim());

        if let Some(endpoint) = lookup(ENDPOINT_VAR) {
            config.api_endpoint = endpoint;
        }
        if let Some(count) = lookup(RESULT_COUNT_VAR) {
            config.default_result_count = count.trim().parse()?;
        }
        if let Some(secs) = lookup(FETCH_TIMEOUT_VAR) {
            config.fetch_timeout = Duration::from_secs(secs.trim().parse()?);
        }
        if let Some(flag) = parse_flag(&lookup, TEST_MODE_VAR)? {
            config.test_mode = flag;
        }
        if let Some(flag) = parse_flag(&lookup, RETURN_RATINGS_VAR)? {
            config.return_ratings = flag;
        }
        if let Some(flag) = parse_flag(&lookup, PREVENT_EXPLICIT_VAR)? {
            config.prevent_explicit_results = flag;
        }
        if let Some(flag) = parse_flag(&lookup, UNKNOWN_AS_QUESTIONABLE_VAR)? {
            config.treat_unknown_as_questionable = flag;
        }
        if let Some(flag) = parse_flag(&lookup, IGNORE_RATE_LIMITS_VAR)? {
            config.ignore_rate_limits = flag;
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into();
        self
    }

    pub fn with_result_count(mut self, count: u32) -> Self {
        self.default_result_count = count;
        self
    }

    pub fn with_output_type(mut self, output_type: OutputType) -> Self {
        self.output_type = output_type;
        self
    }

    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }

    pub fn with_return_ratings(mut self, return_ratings: bool) -> Self {
        self.return_ratings = return_ratings;
        self
    }

    pub fn with_prevent_explicit_results(mut self, prevent: bool) -> Self {
        self.prevent_explicit_results = prevent;
        self
    }

    pub fn with_treat_unknown_as_questionable(mut self, treat: bool) -> Self {
        self.treat_unknown_as_questionable = treat;
        self
    }

    pub fn with_ignore_rate_limits(mut self, ignore: bool) -> Self {
        self.ignore_rate_limits = ignore;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Replace the allow-list; leading dots are stripped and case is ignored
    pub fn with_allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    pub fn with_enabled_indexes(mut self, indexes: Vec<SiteIndex>) -> Self {
        self.enabled_indexes = indexes;
        self
    }

    pub fn with_disabled_indexes(mut self, indexes: Vec<SiteIndex>) -> Self {
        self.disabled_indexes = indexes;
        self
    }

    /// Override the free-tier limiters, e.g. for premium accounts
    pub fn with_rate_limiters(mut self, short_term: RateLimiter, long_term: RateLimiter) -> Self {
        self.rate_limiters = Mutex::new(RateLimiterPair::new(short_term, long_term));
        self
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    pub fn rating_policy(&self) -> RatingPolicy {
        RatingPolicy {
            treat_unknown_as_questionable: self.treat_unknown_as_questionable,
            prevent_explicit_results: self.prevent_explicit_results,
        }
    }

    /// Record one search against both windows as a single step
    pub async fn check_rate_limits(&self) -> AppResult<()> {
        self.rate_limiters.lock().await.check()
    }

    /// (short-term, long-term) uses left without consuming one
    pub async fn remaining_uses(&self) -> (u32, u32) {
        self.rate_limiters.lock().await.remaining_at(Instant::now())
    }

    /// `dbmask` value for `enabled_indexes`, `None` when no index is selected
    pub fn enabled_mask(&self) -> Option<u64> {
        fold_mask(&self.enabled_indexes)
    }

    /// `dbmaski` value for `disabled_indexes`
    pub fn disabled_mask(&self) -> Option<u64> {
        fold_mask(&self.disabled_indexes)
    }
}

fn fold_mask(indexes: &[SiteIndex]) -> Option<u64> {
    let mask = indexes
        .iter()
        .filter_map(SiteIndex::mask_bit)
        .fold(0u64, |mask, bit| mask | bit);
    (mask != 0).then_some(mask)
}

fn parse_flag<F>(lookup: &F, name: &str) -> AppResult<Option<bool>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(name) else {
        return Ok(None);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        other => Err(AppError::ConfigurationError(format!(
            "{} must be a boolean, got '{}'",
            name, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SearchConfig::new("key");
        assert_eq!(config.default_result_count, 6);
        assert_eq!(config.output_type, OutputType::Json);
        assert!(config.return_ratings);
        assert!(config.treat_unknown_as_questionable);
        assert!(!config.prevent_explicit_results);
        assert!(!config.ignore_rate_limits);
        assert!(config.allowed_extensions.contains("jpg"));
        assert!(!config.allowed_extensions.contains("exe"));
    }

    #[test]
    fn test_api_key_is_redacted() {
        let config = SearchConfig::new("super-secret-key");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret-key"));
        assert_eq!(config.api_key().to_string(), "***");
        assert_eq!(config.api_key().expose(), "super-secret-key");
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let config = SearchConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, " abc "),
            (RESULT_COUNT_VAR, "10"),
            (PREVENT_EXPLICIT_VAR, "yes"),
            (UNKNOWN_AS_QUESTIONABLE_VAR, "0"),
            (FETCH_TIMEOUT_VAR, "3"),
        ]))
        .unwrap();

        assert_eq!(config.api_key().expose(), "abc");
        assert_eq!(config.default_result_count, 10);
        assert!(config.prevent_explicit_results);
        assert!(!config.treat_unknown_as_questionable);
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_from_lookup_requires_key() {
        let err = SearchConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, AppError::ConfigurationError(_)));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let bad_flag =
            SearchConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "k"), (TEST_MODE_VAR, "maybe")]));
        assert!(matches!(bad_flag, Err(AppError::ConfigurationError(_))));

        let bad_count = SearchConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "k"),
            (RESULT_COUNT_VAR, "six"),
        ]));
        assert!(matches!(bad_count, Err(AppError::ConfigurationError(_))));
    }

    #[test]
    fn test_allowed_extensions_are_normalized() {
        let config = SearchConfig::new("k").with_allowed_extensions([".PNG", "jpg"]);
        assert!(config.allowed_extensions.contains("png"));
        assert!(config.allowed_extensions.contains("jpg"));
        assert_eq!(config.allowed_extensions.len(), 2);
    }

    #[test]
    fn test_index_masks() {
        let config = SearchConfig::new("k")
            .with_enabled_indexes(vec![SiteIndex::Pixiv, SiteIndex::Danbooru])
            .with_disabled_indexes(vec![SiteIndex::Other(200)]);

        assert_eq!(config.enabled_mask(), Some((1 << 5) | (1 << 9)));
        assert_eq!(config.disabled_mask(), None);
    }

    #[tokio::test]
    async fn test_rate_limiters_are_shared_state() {
        let config = SearchConfig::new("k").with_rate_limiters(
            RateLimiter::new(1, Duration::from_secs(60)),
            RateLimiter::new(10, Duration::from_secs(3600)),
        );

        assert!(config.check_rate_limits().await.is_ok());
        assert_eq!(config.remaining_uses().await, (0, 9));
        assert!(matches!(
            config.check_rate_limits().await,
            Err(AppError::RateLimited { .. })
        ));
    }
}
