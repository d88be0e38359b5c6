//! Amtsblatt Harvester - collect building-permit publications from the Swiss
//! cantonal gazette portal (amtsblattportal.ch).
//!
//! The pipeline discovers published records page by page, fetches each
//! record's detail document concurrently, keeps the ones that look like
//! multi-family-housing projects, and extracts the responsible party
//! ("Bauherrschaft") with tiered fallback heuristics.
//!
//! # Example
//!
//! ```no_run
//! use amtsblatt_harvester::{run_harvest, HarvestConfig};
//!
//! let config = HarvestConfig::default();
//! let report = run_harvest(&config)?;
//! println!("{} matching publications", report.matched);
//! # Ok::<(), amtsblatt_harvester::HarvesterError>(())
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Run configuration and the keyword pattern set
//! - [`types`]: Core data types (Publication, HarvestRecord, HarvestReport)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP transport with retry/backoff
//! - [`listing`]: Paginated discovery of publication descriptors
//! - [`detail`]: Per-record detail document fetching
//! - [`classify`]: Keyword classification of project descriptions
//! - [`extract`]: Tiered party extraction
//! - [`pipeline`]: Orchestration and the worker pool
//! - [`xml`]: Namespace-agnostic XML navigation helpers
//! - [`output`]: CSV output collaborator
//! - [`cli`]: Command-line interface

pub mod classify;
pub mod cli;
pub mod config;
pub mod detail;
pub mod error;
pub mod extract;
pub mod http;
pub mod listing;
pub mod output;
pub mod pipeline;
pub mod types;
pub mod xml;

// Re-export main entry points
pub use pipeline::run_harvest;

// Re-export commonly used items
pub use config::HarvestConfig;
pub use error::{HarvesterError, Result};
pub use types::{HarvestRecord, HarvestReport, Publication};
