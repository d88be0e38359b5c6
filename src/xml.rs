//! XML utility functions for navigating loosely-typed gazette documents.
//!
//! The portal serves two schema dialects (plain and namespaced); all lookups
//! here match on the local tag name only, so both dialects parse the same way.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use amtsblatt_harvester::xml::tag_name;
///
/// let doc = Document::parse(r#"<ns:meta xmlns:ns="urn:x"/>"#).unwrap();
/// assert_eq!(tag_name(doc.root_element()), "meta");
/// ```
pub fn tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given local tag name.
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && tag_name(*child) == tag)
}

/// Find all child elements with the given local tag name.
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && tag_name(*child) == tag)
}

/// Find a descendant element matching a slash-separated path of tag names.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use amtsblatt_harvester::xml::find_by_path;
///
/// let doc = Document::parse(r#"<meta><title><de>Neubau</de></title></meta>"#).unwrap();
/// let de = find_by_path(doc.root_element(), "title/de");
/// assert_eq!(de.unwrap().text(), Some("Neubau"));
/// ```
pub fn find_by_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> Option<Node<'a, 'input>> {
    let mut current = node;
    for part in path.split('/') {
        current = find_child(current, part)?;
    }
    Some(current)
}

/// Find the first descendant element with the given local tag name.
pub fn find_descendant<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.descendants()
        .find(|n| n.is_element() && tag_name(*n) == tag)
}

/// Find all descendant elements with the given local tag name.
pub fn find_descendants<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.descendants()
        .filter(move |n| n.is_element() && tag_name(*n) == tag)
}

/// Trimmed text of the first descendant with the given tag, or empty string.
pub fn descendant_text(node: Node<'_, '_>, tag: &str) -> String {
    find_descendant(node, tag)
        .and_then(|n| n.text())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// Concatenated, whitespace-normalized text of a node and all descendants.
pub fn node_text(node: Node<'_, '_>) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for n in node.descendants() {
        if n.is_text() {
            if let Some(text) = n.text() {
                parts.push(text);
            }
        }
    }
    let joined = parts.join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_tag_name_strips_namespace() {
        let xml = r#"<ns:root xmlns:ns="http://example.com"/>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(tag_name(doc.root_element()), "root");
    }

    #[test]
    fn test_find_child_ignores_namespace() {
        let xml = r#"<root xmlns="urn:x"><meta><title/></meta></root>"#;
        let doc = Document::parse(xml).unwrap();
        let meta = find_child(doc.root_element(), "meta");
        assert!(meta.is_some());
        assert!(find_child(meta.unwrap(), "title").is_some());
    }

    #[test]
    fn test_find_by_path() {
        let xml = r#"<root><a><b><c>found</c></b></a></root>"#;
        let doc = Document::parse(xml).unwrap();
        let c = find_by_path(doc.root_element(), "a/b/c");
        assert_eq!(c.unwrap().text(), Some("found"));
        assert!(find_by_path(doc.root_element(), "a/missing").is_none());
    }

    #[test]
    fn test_find_descendants() {
        let xml = r#"<root><list><item>1</item></list><item>2</item></root>"#;
        let doc = Document::parse(xml).unwrap();
        let items: Vec<_> = find_descendants(doc.root_element(), "item").collect();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_descendant_text_missing_is_empty() {
        let xml = r#"<root><name>  Anna  </name></root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(descendant_text(doc.root_element(), "name"), "Anna");
        assert_eq!(descendant_text(doc.root_element(), "missing"), "");
    }

    #[test]
    fn test_node_text_normalizes_whitespace() {
        let xml = "<root>Neubau\n  <b>Mehrfamilienhaus</b>\n  mit Tiefgarage</root>";
        let doc = Document::parse(xml).unwrap();
        assert_eq!(
            node_text(doc.root_element()),
            "Neubau Mehrfamilienhaus mit Tiefgarage"
        );
    }
}
