//! Detail fetcher: retrieve the full XML document behind one listing entry.

use reqwest::blocking::Client;

use crate::config::HarvestConfig;
use crate::http::fetch_with_retry;

/// Fetch the detail document for a publication reference.
///
/// `None` is a first-class outcome: the item is skipped and logged, and the
/// caller moves on. Retries already happened in the transport layer.
pub fn fetch_detail(client: &Client, config: &HarvestConfig, reference: &str) -> Option<String> {
    match fetch_with_retry(client, config, reference, &[]) {
        Ok(xml) => Some(xml),
        Err(e) => {
            tracing::warn!(reference, error = %e, "Detail fetch failed, skipping");
            None
        }
    }
}
