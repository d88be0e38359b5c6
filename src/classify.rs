//! Classifier: decide whether a publication describes a multi-family-housing
//! project.

use regex::{Regex, RegexBuilder};
use roxmltree::Document;

use crate::error::Result;
use crate::xml::{find_by_path, find_descendant, node_text};

/// Compiled keyword matcher over a configurable pattern set.
///
/// The pattern vocabulary lives in configuration (see
/// [`crate::config::MFH_PATTERNS`]); the matcher only joins it into one
/// case-insensitive alternation, compiled once per run.
#[derive(Debug)]
pub struct ProjectMatcher {
    regex: Regex,
}

impl ProjectMatcher {
    /// Compile the pattern set into a single alternation.
    pub fn new(patterns: &[String]) -> Result<Self> {
        let regex = RegexBuilder::new(&patterns.join("|"))
            .case_insensitive(true)
            .build()?;
        Ok(Self { regex })
    }

    /// Return the first matching keyword as found in the text, or `None`.
    ///
    /// The haystack is the listing title plus, when the detail document
    /// parses, the `content/projectDescription` sub-tree and the full
    /// `content` text. Unparsable XML degrades to a title-only scan.
    pub fn classify(&self, detail_xml: &str, title: &str) -> Option<String> {
        let mut haystack = title.to_string();

        if let Ok(doc) = Document::parse(detail_xml) {
            let root = doc.root_element();
            if let Some(description) = find_by_path(root, "content/projectDescription")
                .or_else(|| find_descendant(root, "projectDescription"))
            {
                haystack.push(' ');
                haystack.push_str(&node_text(description));
            }
            if let Some(content) = find_descendant(root, "content") {
                haystack.push(' ');
                haystack.push_str(&node_text(content));
            }
        }

        self.regex.find(&haystack).map(|m| m.as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MFH_PATTERNS;

    fn matcher() -> ProjectMatcher {
        let patterns: Vec<String> = MFH_PATTERNS.iter().map(|s| s.to_string()).collect();
        ProjectMatcher::new(&patterns).unwrap()
    }

    #[test]
    fn test_title_match_preserves_casing() {
        let m = matcher().classify("<publication/>", "Neubau Mehrfamilienhaus");
        assert_eq!(m, Some("Mehrfamilienhaus".to_string()));
    }

    #[test]
    fn test_case_insensitive_match_returns_verbatim_form() {
        let m = matcher().classify("<publication/>", "neubau WOHNBLOCK an der Seestrasse");
        assert_eq!(m, Some("WOHNBLOCK".to_string()));
    }

    #[test]
    fn test_word_boundary() {
        // Compound continuation defeats the word boundary on purpose.
        assert_eq!(matcher().classify("<p/>", "Mehrfamilienhausbau"), None);
        assert_eq!(
            matcher().classify("<p/>", "MFH mit Tiefgarage"),
            Some("MFH".to_string())
        );
    }

    #[test]
    fn test_match_from_project_description() {
        let xml = r#"<publication>
            <content>
                <projectDescription>Abbruch und Neubau Wohnanlage</projectDescription>
            </content>
        </publication>"#;
        let m = matcher().classify(xml, "Baugesuch");
        assert_eq!(m, Some("Wohnanlage".to_string()));
    }

    #[test]
    fn test_match_from_content_body() {
        let xml = r#"<publication xmlns="urn:gazette">
            <content>
                <location>Zug</location>
                <remarks>Geplant ist ein <em>Wohnblock</em> mit 12 Wohnungen</remarks>
            </content>
        </publication>"#;
        let m = matcher().classify(xml, "Baugesuch");
        assert_eq!(m, Some("Wohnblock".to_string()));
    }

    #[test]
    fn test_no_match() {
        let xml = r#"<publication><content><projectDescription>Garage</projectDescription></content></publication>"#;
        assert_eq!(matcher().classify(xml, "Baugesuch Einfamilienhaus"), None);
    }

    #[test]
    fn test_malformed_xml_is_no_match_not_error() {
        assert_eq!(matcher().classify("<publication><unclosed", "Baugesuch"), None);
    }

    #[test]
    fn test_malformed_xml_still_scans_title() {
        let m = matcher().classify("not xml at all", "Neubau Mehrfamilienhaus");
        assert_eq!(m, Some("Mehrfamilienhaus".to_string()));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let patterns = vec!["(".to_string()];
        assert!(ProjectMatcher::new(&patterns).is_err());
    }
}
