//! Configuration constants and the run configuration for the harvester.

/// Base URL of the publication listing endpoint.
pub const BASE_LIST_URL: &str = "https://www.amtsblattportal.ch/api/v1/publications/xml";

/// Cantons harvested by default.
pub const DEFAULT_CANTONS: &[&str] = &["ZH", "ZG"];

/// Building-permit rubrics harvested by default.
pub const DEFAULT_RUBRICS: &[&str] = &["BP-ZH", "BP-ZG"];

/// Listing page size. A page with fewer entries signals the last page.
pub const DEFAULT_PAGE_SIZE: usize = 2000;

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Maximum number of attempts for transient failures.
pub const MAX_RETRIES: u32 = 5;

/// Base delay for exponential backoff (milliseconds).
pub const RETRY_BASE_DELAY_MS: u64 = 500;

/// Number of concurrent detail-fetch workers.
pub const DEFAULT_MAX_WORKERS: usize = 16;

/// Keyword patterns identifying multi-family-housing projects.
///
/// Word-boundary delimited so that e.g. "Mehrfamilienhausbau" does not
/// match the bare "Mehrfamilienhaus" pattern. The list is data, not code:
/// extend it here without touching the matcher.
pub const MFH_PATTERNS: &[&str] = &[
    r"\bMFH\b",
    r"\bMehrfamilienhaus\b",
    r"\bMehrfamilienhäuser\b",
    r"\bMehrfamilienwohnhaus\b",
    r"\bMehrparteienhaus\b",
    r"\bMehrparteienhäuser\b",
    r"\bWohnblock\b",
    r"\bWohnanlage\b",
    r"\bWohnüberbauung\b",
    r"\bÜberbauung\b",
    r"\bReihenhaus\b",
    r"\bReihenhäuser\b",
    r"\bReihenfamilienhaus\b",
    r"\bReiheneinfamilienhaus\b",
    r"\bReiheneinfamilienhäuser\b",
    r"\bWohnbau\b",
    r"\bWohnbebauung\b",
    r"\bMehrfamiliengebäude\b",
    r"\bMehrfamilienwohngebäude\b",
];

/// Configuration for a single harvest run.
///
/// Constructed once, passed by reference to every component that needs it.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Listing endpoint URL (overridable for tests).
    pub base_url: String,

    /// Canton codes passed as repeated `cantons` query parameters.
    pub cantons: Vec<String>,

    /// Rubric codes passed as repeated `rubrics` query parameters.
    pub rubrics: Vec<String>,

    /// Listing page size.
    pub page_size: usize,

    /// HTTP request timeout in seconds.
    pub timeout_secs: u64,

    /// Maximum attempts per request for transient failures.
    pub max_retries: u32,

    /// Base delay for exponential backoff (milliseconds).
    pub retry_base_delay_ms: u64,

    /// Concurrency ceiling for the detail-fetch worker pool.
    pub max_workers: usize,

    /// Classification keyword patterns.
    pub patterns: Vec<String>,

    /// Sort the final records descending by (canton, date, number).
    pub sort_descending: bool,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_LIST_URL.to_string(),
            cantons: DEFAULT_CANTONS.iter().map(|s| s.to_string()).collect(),
            rubrics: DEFAULT_RUBRICS.iter().map(|s| s.to_string()).collect(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: HTTP_TIMEOUT_SECS,
            max_retries: MAX_RETRIES,
            retry_base_delay_ms: RETRY_BASE_DELAY_MS,
            max_workers: DEFAULT_MAX_WORKERS,
            patterns: MFH_PATTERNS.iter().map(|s| s.to_string()).collect(),
            sort_descending: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarvestConfig::default();
        assert_eq!(config.base_url, BASE_LIST_URL);
        assert_eq!(config.cantons, vec!["ZH", "ZG"]);
        assert_eq!(config.rubrics, vec!["BP-ZH", "BP-ZG"]);
        assert_eq!(config.page_size, 2000);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.max_workers, 16);
        assert!(config.sort_descending);
        assert_eq!(config.patterns.len(), MFH_PATTERNS.len());
    }

    #[test]
    fn test_patterns_compile() {
        for pattern in MFH_PATTERNS {
            assert!(regex::Regex::new(pattern).is_ok(), "bad pattern: {pattern}");
        }
    }
}
