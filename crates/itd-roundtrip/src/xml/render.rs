//! Deterministic text form of a document
//!
//! Four-space indentation, one element per line. An element whose children
//! are all text stays on one line; one without children self-closes.

use super::node::{XmlDocument, XmlElement, XmlNode};
use quick_xml::escape::escape;
use std::fmt::Write;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;

const INDENT: &str = "    ";

#[must_use]
pub fn render_document(document: &XmlDocument) -> String {
    let mut out = String::new();
    if document.has_declaration() {
        out.push_str(XML_DECLARATION);
        out.push('\n');
    }
    write_element(&mut out, document.root(), 0);
    out
}

#[must_use]
pub fn render_element(element: &XmlElement) -> String {
    let mut out = String::new();
    write_element(&mut out, element, 0);
    out
}

fn write_element(out: &mut String, element: &XmlElement, depth: usize) {
    let pad = INDENT.repeat(depth);
    out.push_str(&pad);
    out.push('<');
    out.push_str(element.name());
    for (name, value) in element.attributes() {
        let _ = write!(out, " {name}=\"{}\"", escape(value.as_str()));
    }

    let children = element.children();
    if children.is_empty() {
        out.push_str("/>\n");
        return;
    }

    if children.iter().all(|c| matches!(c, XmlNode::Text(_))) {
        let _ = writeln!(out, ">{}</{}>", escape(element.text().as_str()), element.name());
        return;
    }

    out.push_str(">\n");
    for child in children {
        match child {
            XmlNode::Element(el) => write_element(out, el, depth + 1),
            XmlNode::Text(text) if text.trim().is_empty() => {}
            XmlNode::Text(text) => {
                let _ = writeln!(out, "{pad}{INDENT}{}", escape(text.trim()));
            }
            XmlNode::Comment(text) => {
                let _ = writeln!(out, "{pad}{INDENT}<!--{text}-->");
            }
        }
    }
    let _ = writeln!(out, "{pad}</{}>", element.name());
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_with_four_space_indent() {
        let doc = XmlDocument::new(
            XmlElement::new("div")
                .with_attribute("id", "list")
                .with_child(XmlElement::new("span").with_text("a & b"))
                .with_child(XmlElement::new("br")),
        );
        assert_eq!(
            render_document(&doc),
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"no\"?>\n\
             <div id=\"list\">\n    <span>a &amp; b</span>\n    <br/>\n</div>\n"
        );
    }

    #[test]
    fn render_then_parse_is_stable() {
        let doc = XmlDocument::new(
            XmlElement::new("menu")
                .with_child(XmlElement::new("item").with_attribute("title", "\"quoted\"").with_unique_key()),
        );
        let text = render_document(&doc);
        let reparsed: XmlDocument = text.parse().unwrap();
        assert_eq!(render_document(&reparsed), text);
    }
}
