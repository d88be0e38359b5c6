//! Party extraction ("Bauherrschaft") from detail documents.
//!
//! Resolution is tiered: a canton-specific structured path first, then a
//! generic container probe, then a tag-name heuristic over the whole
//! document. Each tier is a function returning `Option<String>`; the first
//! non-empty result wins via `or_else` chaining.

use std::collections::HashSet;

use roxmltree::{Document, Node};

use crate::xml::{
    descendant_text, find_children, find_descendant, find_descendants, node_text, tag_name,
};

/// Container tag names probed by the generic tier, in order.
const PARTY_CONTAINERS: &[&str] = &[
    "buildingContractor",
    "bauherrschaft",
    "gesuchsteller",
    "applicant",
];

/// Extract the party field for a publication.
///
/// Returns a `" | "`-joined, first-seen-deduplicated list of persons and
/// companies, or an empty string when every tier comes up empty. Malformed
/// XML yields an empty string, never an error.
pub fn extract_party(detail_xml: &str, canton: &str) -> String {
    let doc = match Document::parse(detail_xml) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!(error = %e, "Unparsable detail document, no party extracted");
            return String::new();
        }
    };
    let root = doc.root_element();

    let structured = match canton {
        "ZH" => zurich_building_contractor(root),
        _ => generic_party_search(root),
    };

    structured
        .or_else(|| heuristic_party_scan(root))
        .unwrap_or_default()
}

/// Tier 1 for ZH: the BP-ZH01 schema places the party under
/// `content/buildingContractor` with structured person/company children.
fn zurich_building_contractor(root: Node<'_, '_>) -> Option<String> {
    let content = find_descendant(root, "content")?;
    let block = find_descendant(content, "buildingContractor")?;

    let mut pieces: Vec<String> = Vec::new();
    collect_persons(block, true, &mut pieces);
    collect_companies(block, &mut pieces);

    // Block present but nothing structured: take its raw text as one entry.
    if pieces.is_empty() {
        let raw = node_text(block);
        if raw.is_empty() {
            return None;
        }
        return Some(raw);
    }

    Some(dedup_join(pieces))
}

/// Tier 2: probe known container names anywhere under `content`, falling
/// back to generic party/person/company nodes. Used for cantons without a
/// precise schema mapping (ZG and unknown).
fn generic_party_search(root: Node<'_, '_>) -> Option<String> {
    let content = find_descendant(root, "content")?;

    let mut pieces: Vec<String> = Vec::new();
    for container in PARTY_CONTAINERS.iter().copied() {
        for node in find_descendants(content, container) {
            collect_persons(node, false, &mut pieces);
            collect_companies(node, &mut pieces);

            if pieces.is_empty() {
                let raw = node_text(node);
                if !raw.is_empty() {
                    pieces.push(raw);
                }
            }
        }
    }

    if pieces.is_empty() {
        for tag in ["party", "person", "company"] {
            for node in find_descendants(content, tag) {
                let raw = node_text(node);
                if !raw.is_empty() {
                    pieces.push(raw);
                }
            }
        }
    }

    if pieces.is_empty() {
        None
    } else {
        Some(dedup_join(pieces))
    }
}

/// Tier 3: any element whose local tag name contains a party-concept
/// substring contributes its text. Deliberately approximate; accepted
/// imprecision on unfamiliar schemas.
fn heuristic_party_scan(root: Node<'_, '_>) -> Option<String> {
    let mut pieces: Vec<String> = Vec::new();
    for node in root.descendants().filter(|n| n.is_element()) {
        let tag = tag_name(node).to_lowercase();
        if tag.contains("bauherr") || tag.contains("gesuchstell") {
            let raw = node_text(node);
            if !raw.is_empty() {
                pieces.push(raw);
            }
        }
    }

    if pieces.is_empty() {
        None
    } else {
        Some(dedup_join(pieces))
    }
}

/// Collect `persons/person` entries under a container.
fn collect_persons(container: Node<'_, '_>, with_address: bool, pieces: &mut Vec<String>) {
    for persons in find_descendants(container, "persons") {
        for person in find_children(persons, "person") {
            if let Some(entry) = person_entry(person, with_address) {
                pieces.push(entry);
            }
        }
    }
}

/// Collect `companies/company` entries under a container.
fn collect_companies(container: Node<'_, '_>, pieces: &mut Vec<String>) {
    for companies in find_descendants(container, "companies") {
        for company in find_children(companies, "company") {
            if let Some(entry) = company_entry(company) {
                pieces.push(entry);
            }
        }
    }
}

/// "prename name", optionally suffixed with a parenthesized Swiss address.
fn person_entry(person: Node<'_, '_>, with_address: bool) -> Option<String> {
    let prename = descendant_text(person, "prename");
    let name = descendant_text(person, "name");
    let full = join_nonempty(&[prename, name], " ");
    if full.is_empty() {
        return None;
    }

    if with_address {
        if let Some(address) = find_descendant(person, "addressSwitzerland") {
            let address_text = join_nonempty(
                &[
                    descendant_text(address, "street"),
                    descendant_text(address, "houseNumber"),
                    descendant_text(address, "swissZipCode"),
                    descendant_text(address, "town"),
                ],
                " ",
            );
            if !address_text.is_empty() {
                return Some(format!("{full} ({address_text})"));
            }
        }
    }

    Some(full)
}

/// Company name, optionally suffixed with its free-text address.
fn company_entry(company: Node<'_, '_>) -> Option<String> {
    let name = descendant_text(company, "name");
    if name.is_empty() {
        return None;
    }

    let custom_address = descendant_text(company, "customAddress").replace('\n', ", ");
    if custom_address.is_empty() {
        Some(name)
    } else {
        Some(format!("{name} ({custom_address})"))
    }
}

/// Join non-empty tokens with a separator.
fn join_nonempty(tokens: &[String], separator: &str) -> String {
    tokens
        .iter()
        .filter(|t| !t.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(separator)
}

/// Deduplicate by exact string match, first occurrence wins, join with " | ".
fn dedup_join(pieces: Vec<String>) -> String {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique: Vec<String> = Vec::new();
    for piece in pieces {
        if !piece.is_empty() && seen.insert(piece.clone()) {
            unique.push(piece);
        }
    }
    unique.join(" | ")
}
