//! Pipeline orchestrator: listing, bounded fan-out, classification,
//! extraction, final sort.
//!
//! Listing is sequential (page order detects the terminal short page).
//! Fetching fans out over a fixed-size pool of scoped threads pulling jobs
//! from a channel; records flow back over a second channel. Worker
//! completion order is unordered, so the explicit sort after join is the
//! only ordering contract on the output.

use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

use reqwest::blocking::Client;

use crate::classify::ProjectMatcher;
use crate::config::HarvestConfig;
use crate::detail::fetch_detail;
use crate::error::Result;
use crate::extract::extract_party;
use crate::http::create_client;
use crate::listing::list_publications;
use crate::types::{HarvestRecord, HarvestReport, Publication};

/// Run the full harvest: discover, fetch, classify, extract, sort.
pub fn run_harvest(config: &HarvestConfig) -> Result<HarvestReport> {
    let client = create_client(config)?;
    let matcher = ProjectMatcher::new(&config.patterns)?;

    let publications = list_publications(&client, config)?;
    let discovered = publications.len();
    tracing::info!(discovered, "Listing complete");

    let mut records = fetch_matching(&client, config, &matcher, publications);
    sort_records(&mut records, config.sort_descending);

    Ok(HarvestReport {
        discovered,
        matched: records.len(),
        records,
    })
}

/// Fan the descriptor set out over a bounded worker pool and collect the
/// matching records. Per-item failures are contained inside each worker;
/// the pool joins only after every descriptor has been resolved.
fn fetch_matching(
    client: &Client,
    config: &HarvestConfig,
    matcher: &ProjectMatcher,
    publications: Vec<Publication>,
) -> Vec<HarvestRecord> {
    if publications.is_empty() {
        return Vec::new();
    }

    let worker_count = config.max_workers.max(1).min(publications.len());

    let (job_tx, job_rx) = mpsc::channel::<Publication>();
    for publication in publications {
        // Receiver outlives this loop, send cannot fail here.
        let _ = job_tx.send(publication);
    }
    drop(job_tx);
    let jobs = Mutex::new(job_rx);

    let (record_tx, record_rx) = mpsc::channel::<HarvestRecord>();

    thread::scope(|scope| {
        for _ in 0..worker_count {
            let record_tx = record_tx.clone();
            let jobs = &jobs;
            scope.spawn(move || loop {
                // The queue is pre-filled and the sender dropped, so recv
                // under the lock never blocks: it yields a job or Disconnected.
                let publication = match jobs.lock() {
                    Ok(rx) => match rx.recv() {
                        Ok(publication) => publication,
                        Err(_) => break,
                    },
                    Err(_) => break,
                };
                process_publication(client, config, matcher, publication, &record_tx);
            });
        }
    });
    drop(record_tx);

    record_rx.into_iter().collect()
}

/// Resolve one descriptor: fetch, classify, extract. Each outcome (record,
/// skip, failure) ends here without touching sibling workers.
fn process_publication(
    client: &Client,
    config: &HarvestConfig,
    matcher: &ProjectMatcher,
    publication: Publication,
    record_tx: &mpsc::Sender<HarvestRecord>,
) {
    let Some(detail_xml) = fetch_detail(client, config, &publication.reference) else {
        return;
    };

    let Some(match_term) = matcher.classify(&detail_xml, &publication.title) else {
        tracing::debug!(reference = %publication.reference, "No keyword match, skipping");
        return;
    };

    let canton = if publication.canton.is_empty() {
        "ZH".to_string()
    } else {
        publication.canton.clone()
    };
    let party = extract_party(&detail_xml, &canton);

    let record = HarvestRecord {
        canton,
        publication_number: publication.publication_number,
        date: publication.publication_date,
        title: publication.title,
        party,
        match_term,
        reference: publication.reference,
    };
    let _ = record_tx.send(record);
}

/// Stable sort by (canton, date, publication number).
fn sort_records(records: &mut [HarvestRecord], descending: bool) {
    records.sort_by(|a, b| {
        let ordering = a.sort_key().cmp(&b.sort_key());
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(canton: &str, date: &str, number: &str) -> HarvestRecord {
        HarvestRecord {
            canton: canton.to_string(),
            publication_number: number.to_string(),
            date: date.to_string(),
            title: String::new(),
            party: String::new(),
            match_term: String::new(),
            reference: String::new(),
        }
    }

    #[test]
    fn test_sort_descending() {
        let mut records = vec![
            record("ZG", "2025-06-01", "2"),
            record("ZH", "2025-06-03", "1"),
            record("ZH", "2025-06-01", "3"),
        ];
        sort_records(&mut records, true);
        let keys: Vec<_> = records.iter().map(HarvestRecord::sort_key).collect();
        assert_eq!(
            keys,
            vec![
                ("ZH", "2025-06-03", "1"),
                ("ZH", "2025-06-01", "3"),
                ("ZG", "2025-06-01", "2"),
            ]
        );
    }

    #[test]
    fn test_sort_ascending() {
        let mut records = vec![record("ZH", "2025-06-01", "2"), record("ZG", "2025-06-02", "1")];
        sort_records(&mut records, false);
        assert_eq!(records[0].canton, "ZG");
    }
}
