//! Reading persisted documents with `quick-xml`

use super::node::{XmlDocument, XmlElement, XmlNode};
use crate::error::{Result, RoundTripError};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// Parse `text`; `origin` only labels errors
///
/// # Errors
/// Returns [`RoundTripError::Xml`] for malformed markup and
/// [`RoundTripError::MissingRoot`] when there is no element at all
pub fn parse_document(text: &str, origin: &Path) -> Result<XmlDocument> {
    let mut reader = Reader::from_str(text);
    let mut declaration = false;
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event().map_err(|e| RoundTripError::xml(origin, e))? {
            Event::Decl(_) => declaration = true,
            Event::Start(start) => stack.push(open(&start, origin)?),
            Event::Empty(start) => {
                let element = open(&start, origin)?;
                attach(&mut stack, &mut root, element, origin)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| RoundTripError::xml(origin, "unbalanced end tag"))?;
                attach(&mut stack, &mut root, element, origin)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| RoundTripError::xml(origin, e))?;
                if let Some(parent) = stack.last_mut() {
                    parent.push_node(XmlNode::Text(text.into_owned()));
                }
            }
            Event::CData(data) => {
                let text = utf8(&data.into_inner(), origin)?;
                if let Some(parent) = stack.last_mut() {
                    parent.push_node(XmlNode::Text(text));
                }
            }
            Event::Comment(comment) => {
                let text = utf8(&comment, origin)?;
                if let Some(parent) = stack.last_mut() {
                    parent.push_node(XmlNode::Comment(text));
                }
            }
            Event::Eof => break,
            // processing instructions and doctype are not round-tripped
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(RoundTripError::xml(
            origin,
            format!("unclosed element <{}>", open.name()),
        ));
    }
    let root = root.ok_or_else(|| RoundTripError::MissingRoot(origin.to_path_buf()))?;
    Ok(XmlDocument { declaration, root })
}

impl std::str::FromStr for XmlDocument {
    type Err = RoundTripError;

    fn from_str(s: &str) -> Result<Self> {
        parse_document(s, Path::new("<inline>"))
    }
}

fn open(start: &BytesStart<'_>, origin: &Path) -> Result<XmlElement> {
    let mut element = XmlElement::new(utf8(start.name().as_ref(), origin)?);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| RoundTripError::xml(origin, e))?;
        let key = utf8(attribute.key.as_ref(), origin)?;
        let value = attribute
            .unescape_value()
            .map_err(|e| RoundTripError::xml(origin, e))?;
        element.set_attribute(key, value.into_owned());
    }
    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
    origin: &Path,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(RoundTripError::xml(origin, "more than one root element"));
    }
    *root = Some(element);
    Ok(())
}

fn utf8(bytes: &[u8], origin: &Path) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| RoundTripError::xml(origin, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_attributes() {
        let doc: XmlDocument = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<menu id="_menu" z="?">
    <category id="c_person"><item id="i_person_new" url="/people?form"/></category>
    <!-- hand note -->
</menu>"#
            .parse()
            .unwrap();

        assert!(doc.has_declaration());
        let root = doc.root();
        assert_eq!(root.name(), "menu");
        assert_eq!(root.z(), Some("?"));
        let item = root.element_by_id("i_person_new").unwrap();
        assert_eq!(item.attribute("url"), Some("/people?form"));
        assert!(root
            .children()
            .iter()
            .any(|c| matches!(c, XmlNode::Comment(t) if t.trim() == "hand note")));
    }

    #[test]
    fn unescapes_text_and_attributes() {
        let doc: XmlDocument = r#"<p title="a &amp; b">x &lt; y</p>"#.parse().unwrap();
        assert!(!doc.has_declaration());
        assert_eq!(doc.root().attribute("title"), Some("a & b"));
        assert_eq!(doc.root().text(), "x < y");
    }

    #[test]
    fn rejects_mismatched_and_unclosed_tags() {
        assert!(matches!(
            "<a><b></a>".parse::<XmlDocument>(),
            Err(RoundTripError::Xml { .. })
        ));
        assert!(matches!(
            "<a><b/>".parse::<XmlDocument>(),
            Err(RoundTripError::Xml { .. })
        ));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(
            "   ".parse::<XmlDocument>(),
            Err(RoundTripError::MissingRoot(_))
        ));
    }
}
