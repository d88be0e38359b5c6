//! Core data types for the harvester.

use serde::Serialize;

/// Lightweight descriptor for one published record, parsed from a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    /// Opaque detail-document URL. Required; entries without it are dropped.
    pub reference: String,

    /// Display number (e.g., "BP-ZH01-0000012345"). Empty when absent.
    pub publication_number: String,

    /// Publication date as an ISO date string. Empty when absent.
    pub publication_date: String,

    /// Display title, locale-resolved (German preferred). Empty when absent.
    pub title: String,

    /// Canton code (e.g., "ZH"). Empty when absent.
    pub canton: String,
}

/// One row of the final output. Only built for publications the classifier
/// matched; field names mirror the CSV header of the output collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HarvestRecord {
    pub canton: String,

    #[serde(rename = "publicationNumber")]
    pub publication_number: String,

    pub date: String,

    pub title: String,

    #[serde(rename = "bauherrschaft")]
    pub party: String,

    pub match_term: String,

    #[serde(rename = "ref")]
    pub reference: String,
}

impl HarvestRecord {
    /// Sort key: canton, then date, then publication number.
    pub fn sort_key(&self) -> (&str, &str, &str) {
        (&self.canton, &self.date, &self.publication_number)
    }
}

/// Summary of a completed harvest run.
#[derive(Debug, Default)]
pub struct HarvestReport {
    /// Publications discovered by the listing paginator.
    pub discovered: usize,

    /// Publications the classifier matched.
    pub matched: usize,

    /// Final sorted records.
    pub records: Vec<HarvestRecord>,
}
