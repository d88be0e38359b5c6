//! HTTP transport with retry for the gazette portal.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use crate::config::HarvestConfig;
use crate::error::{HarvesterError, Result};

/// User agent string identifying this harvester.
const USER_AGENT: &str = concat!("amtsblatt-harvester/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// One client per run, shared by the listing paginator and all detail-fetch
/// workers so connections are pooled.
pub fn create_client(config: &HarvestConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Statuses the portal serves transiently; anything else fails immediately.
fn is_transient(status: StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504)
}

/// GET a URL with query parameters, retrying transient failures.
///
/// Retries HTTP 429/500/502/503/504 and connect/timeout errors with
/// exponential backoff. Other non-2xx statuses are reported once and not
/// retried. Exhausting the retry budget yields `RetriesExhausted`.
pub fn fetch_with_retry(
    client: &Client,
    config: &HarvestConfig,
    url: &str,
    params: &[(&str, String)],
) -> Result<String> {
    let mut last_error: Option<String> = None;

    for attempt in 0..config.max_retries {
        if attempt > 0 {
            // Exponential backoff: 500ms, 1000ms, 2000ms, 4000ms
            let delay = config.retry_base_delay_ms * (1 << (attempt - 1));
            tracing::debug!(attempt, delay_ms = delay, "Retrying after delay");
            thread::sleep(Duration::from_millis(delay));
        }

        let mut request = client.get(url);
        if !params.is_empty() {
            request = request.query(params);
        }

        match request.send() {
            Ok(response) => {
                let status = response.status();

                if is_transient(status) {
                    tracing::warn!(
                        status = %status,
                        attempt = attempt + 1,
                        max_retries = config.max_retries,
                        "Transient HTTP status, will retry"
                    );
                    last_error = Some(format!("HTTP {status}"));
                    continue;
                }

                if !status.is_success() {
                    return Err(HarvesterError::Status {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                return Ok(response.text()?);
            }
            Err(e) => {
                if e.is_connect() || e.is_timeout() {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt + 1,
                        max_retries = config.max_retries,
                        "Connection error, will retry"
                    );
                    last_error = Some(e.to_string());
                    continue;
                }
                // Other errors (like invalid URL) - don't retry
                return Err(HarvesterError::Http(e));
            }
        }
    }

    Err(HarvesterError::RetriesExhausted {
        attempts: config.max_retries,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_client() {
        let client = create_client(&HarvestConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_transient_statuses() {
        for code in [429u16, 500, 502, 503, 504] {
            assert!(is_transient(StatusCode::from_u16(code).unwrap()));
        }
        for code in [200u16, 301, 400, 403, 404, 501] {
            assert!(!is_transient(StatusCode::from_u16(code).unwrap()));
        }
    }
}
