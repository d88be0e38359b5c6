//! Listing paginator: discover published records page by page.
//!
//! Requests pages in increasing order starting at 0 and stops on the first
//! short page, an empty page, or a failed page. Page order matters for the
//! termination check, so pagination stays strictly sequential.

use reqwest::blocking::Client;
use roxmltree::{Document, Node};

use crate::config::HarvestConfig;
use crate::error::{HarvesterError, Result};
use crate::http::fetch_with_retry;
use crate::types::Publication;
use crate::xml::{find_by_path, find_child, tag_name};

/// Collect all publication descriptors matching the configured filters.
///
/// A failed page after the first ends the loop with partial results. A
/// failure on the very first page, with nothing accumulated, is the only
/// fatal case and surfaces as `NoData`.
pub fn list_publications(client: &Client, config: &HarvestConfig) -> Result<Vec<Publication>> {
    let mut publications: Vec<Publication> = Vec::new();
    let mut page = 0usize;

    loop {
        let params = page_params(config, page);
        let xml = match fetch_with_retry(client, config, &config.base_url, &params) {
            Ok(xml) => xml,
            Err(e) => {
                if publications.is_empty() {
                    tracing::error!(error = %e, "First listing page failed, no data available");
                    return Err(HarvesterError::NoData);
                }
                tracing::warn!(page, error = %e, "Listing page failed, keeping partial results");
                break;
            }
        };

        let batch = parse_listing(&xml);
        if batch.is_empty() {
            break;
        }

        let batch_len = batch.len();
        tracing::info!(page, count = batch_len, "Parsed listing page");
        publications.extend(batch);

        // A short page is the last page.
        if batch_len < config.page_size {
            break;
        }
        page += 1;
    }

    Ok(publications)
}

/// Query parameters for one listing page (0-based).
fn page_params(config: &HarvestConfig, page: usize) -> Vec<(&'static str, String)> {
    let mut params = vec![("publicationStates", "PUBLISHED".to_string())];
    for canton in &config.cantons {
        params.push(("cantons", canton.clone()));
    }
    for rubric in &config.rubrics {
        params.push(("rubrics", rubric.clone()));
    }
    params.push(("pageRequest.page", page.to_string()));
    params.push(("pageRequest.size", config.page_size.to_string()));
    params
}

/// Parse one listing page into publication descriptors.
///
/// Handles both the `<publication ref=".."><meta>..</meta></publication>`
/// layout and the flat `<entry>` layout; absent sub-fields become empty
/// strings. Entries without a `ref` attribute are dropped. Malformed XML
/// yields an empty batch, never an error.
pub fn parse_listing(xml: &str) -> Vec<Publication> {
    let doc = match Document::parse(xml) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::warn!(error = %e, "Unparsable listing page");
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    for node in doc
        .descendants()
        .filter(|n| n.is_element() && matches!(tag_name(*n), "publication" | "entry"))
    {
        let reference = node.attribute("ref").unwrap_or("").trim().to_string();
        if reference.is_empty() {
            continue;
        }

        let mut publication_number = String::new();
        let title;
        let publication_date;
        let canton;

        if let Some(meta) = find_child(node, "meta") {
            title = resolve_title(meta);
            publication_number = child_text(meta, "publicationNumber");
            publication_date = child_text(meta, "publicationDate");
            canton = child_text(meta, "cantons");
        } else {
            title = resolve_title(node);
            publication_date = child_text(node, "publicationDate");
            canton = child_text(node, "cantons");
        }

        out.push(Publication {
            reference,
            publication_number,
            publication_date,
            title,
            canton,
        });
    }
    out
}

/// Resolve a display title: German first, then English, then the bare
/// `<title>` text.
fn resolve_title(parent: Node<'_, '_>) -> String {
    if let Some(de) = find_by_path(parent, "title/de") {
        let text = de.text().unwrap_or("").trim();
        if !text.is_empty() {
            return text.to_string();
        }
    }
    if let Some(en) = find_by_path(parent, "title/en") {
        let text = en.text().unwrap_or("").trim();
        if !text.is_empty() {
            return text.to_string();
        }
    }
    child_text(parent, "title")
}

/// Trimmed text of a direct child element, or empty string.
fn child_text(node: Node<'_, '_>, tag: &str) -> String {
    find_child(node, tag)
        .and_then(|n| n.text())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}
