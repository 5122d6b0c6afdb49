// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A minimal element tree built from markup text.
//!
//! Catch2 records are small, so they are materialized in full before being interpreted. The tree
//! keeps only what the record model needs: element names, attributes in document order, and
//! trimmed, unescaped text.

use crate::errors::XmlParseError;
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

/// A node in an element tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A child element.
    Element(Element),

    /// Text content, unescaped and trimmed.
    Text(String),
}

/// An element with its attributes and children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// The maximum nesting depth accepted by [`Self::parse_document`].
    ///
    /// Record conversion and dropping walk the tree recursively, so the depth is bounded here.
    pub const MAX_DEPTH: usize = 256;

    /// Creates a new element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Parses `text` as a complete document and returns its root element.
    ///
    /// Declarations, comments, processing instructions and doctypes are skipped. The input must
    /// contain exactly one root element, every element must be closed, and elements may be nested
    /// at most [`Self::MAX_DEPTH`] levels deep.
    pub fn parse_document(text: &str) -> Result<Self, XmlParseError> {
        let mut reader = Reader::from_str(text);
        let config = reader.config_mut();
        config.trim_text(true);
        // Mismatched closing tags are reported by the stack below, with both names.
        config.check_end_names = false;

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|error| XmlParseError::Syntax {
                    position: reader.error_position(),
                    error,
                })?;

            match event {
                Event::Start(start) => {
                    let element = Self::from_start(&start, &reader)?;
                    check_depth(&stack, &element)?;
                    if stack.is_empty() && root.is_some() {
                        return Err(XmlParseError::MultipleRoots { name: element.name });
                    }
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element = Self::from_start(&start, &reader)?;
                    check_depth(&stack, &element)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(end) => {
                    let name = decode_name(end.name().as_ref(), &reader)?;
                    let Some(element) = stack.pop() else {
                        return Err(XmlParseError::UnmatchedEndTag { name });
                    };
                    if element.name != name {
                        return Err(XmlParseError::MismatchedEndTag {
                            expected: element.name,
                            found: name,
                        });
                    }
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|error| XmlParseError::Syntax {
                        position: reader.buffer_position(),
                        error,
                    })?;
                    push_text(&mut stack, &text)?;
                }
                Event::CData(cdata) => {
                    let text = String::from_utf8_lossy(&cdata);
                    push_text(&mut stack, text.trim())?;
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions and doctypes.
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(XmlParseError::UnclosedElement { name: open.name });
        }
        root.ok_or(XmlParseError::MissingRoot)
    }

    fn from_start(start: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Self, XmlParseError> {
        let mut element = Self::new(decode_name(start.name().as_ref(), reader)?);
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|error| XmlParseError::Syntax {
                position: reader.buffer_position(),
                error: error.into(),
            })?;
            let key = decode_name(attribute.key.as_ref(), reader)?;
            let value = attribute
                .unescape_value()
                .map_err(|error| XmlParseError::Syntax {
                    position: reader.buffer_position(),
                    error,
                })?;
            element.attributes.push((key, value.into_owned()));
        }
        Ok(element)
    }

    /// Adds an attribute to this element.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Adds a child node to this element.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Returns the name of this element.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value of the attribute with the given name, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Returns all attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns the child nodes in document order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns the child elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Returns the first child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    /// Returns the child elements with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |element| element.name == name)
    }

    /// Returns the direct text content of this element.
    ///
    /// Text interrupted by child elements is joined with newlines.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            if let Node::Text(text) = child {
                if !out.is_empty() {
                    out.push('\n');
                }
                out.push_str(text);
            }
        }
        out
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_owned())
    }
}

fn check_depth(stack: &[Element], element: &Element) -> Result<(), XmlParseError> {
    if stack.len() >= Element::MAX_DEPTH {
        return Err(XmlParseError::TooDeep {
            name: element.name.clone(),
            limit: Element::MAX_DEPTH,
        });
    }
    Ok(())
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlParseError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_some() => {
            return Err(XmlParseError::MultipleRoots { name: element.name });
        }
        None => *root = Some(element),
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> Result<(), XmlParseError> {
    if text.is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Text(text.to_owned()));
            Ok(())
        }
        None => Err(XmlParseError::TextOutsideRoot),
    }
}

fn decode_name(name: &[u8], reader: &Reader<&[u8]>) -> Result<String, XmlParseError> {
    std::str::from_utf8(name)
        .map(str::to_owned)
        .map_err(|error| XmlParseError::InvalidName {
            position: reader.buffer_position(),
            error,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn parses_nested_document() {
        let input = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <!-- produced by a test binary -->
            <Catch2TestRun name="tests" rng-seed="7">
              <TestCase name="a &amp; b" filename="t.cpp" line="3">
                <Original>
                  x &lt; 2
                </Original>
                <OverallResult success="true"/>
              </TestCase>
            </Catch2TestRun>
        "#};

        let root = Element::parse_document(input).expect("document is well-formed");
        assert_eq!(root.name(), "Catch2TestRun");
        assert_eq!(root.attribute("rng-seed"), Some("7"));
        assert_eq!(root.attribute("missing"), None);

        let test_case = root.child("TestCase").expect("TestCase is present");
        assert_eq!(test_case.attribute("name"), Some("a & b"));
        assert_eq!(
            test_case.attributes().collect::<Vec<_>>(),
            vec![("name", "a & b"), ("filename", "t.cpp"), ("line", "3")],
        );
        assert_eq!(
            test_case.child("Original").map(Element::text),
            Some("x < 2".to_owned())
        );
        assert_eq!(
            test_case.child("OverallResult"),
            Some(&Element::new("OverallResult").with_attribute("success", "true")),
        );
    }

    #[test]
    fn children_named_preserves_order() {
        let root = Element::parse_document(
            r#"<Group><TestCase name="1"/><Other/><TestCase name="2"/><TestCase name="3"/></Group>"#,
        )
        .expect("document is well-formed");
        let names: Vec<_> = root
            .children_named("TestCase")
            .filter_map(|e| e.attribute("name"))
            .collect();
        assert_eq!(names, vec!["1", "2", "3"]);
        assert_eq!(root.elements().count(), 4);
    }

    #[test]
    fn cdata_is_text() {
        let root = Element::parse_document("<StdOut><![CDATA[ <raw> ]]></StdOut>")
            .expect("document is well-formed");
        assert_eq!(root.text(), "<raw>");
    }

    #[test]
    fn truncated_input_is_unclosed() {
        let error = Element::parse_document(r#"<TestCase name="x"><Expression success="true">"#)
            .expect_err("input is truncated");
        assert!(
            matches!(error, XmlParseError::UnclosedElement { ref name } if name == "Expression"),
            "unexpected error: {error:?}"
        );
    }

    fn nested(depth: usize) -> String {
        let mut text = "<Section>".repeat(depth);
        text.push_str(&"</Section>".repeat(depth));
        text
    }

    #[test]
    fn nesting_up_to_limit() {
        let root = Element::parse_document(&nested(Element::MAX_DEPTH))
            .expect("document is within the depth limit");
        let mut element = &root;
        let mut depth = 1;
        while let Some(child) = element.child("Section") {
            element = child;
            depth += 1;
        }
        assert_eq!(depth, Element::MAX_DEPTH);
    }

    #[test_case(Element::MAX_DEPTH + 1 ; "one past limit")]
    #[test_case(5000 ; "far past limit")]
    fn nesting_past_limit(depth: usize) {
        let error = Element::parse_document(&nested(depth)).expect_err("document is too deep");
        assert!(
            matches!(
                error,
                XmlParseError::TooDeep { ref name, limit }
                    if name == "Section" && limit == Element::MAX_DEPTH
            ),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn empty_element_past_limit() {
        let mut text = "<Section>".repeat(Element::MAX_DEPTH);
        text.push_str("<Info/>");
        text.push_str(&"</Section>".repeat(Element::MAX_DEPTH));
        let error = Element::parse_document(&text).expect_err("document is too deep");
        assert!(
            matches!(error, XmlParseError::TooDeep { ref name, .. } if name == "Info"),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn mismatched_end_tag() {
        let error = Element::parse_document("<a><b></a></b>").expect_err("tags are mismatched");
        assert!(
            matches!(
                error,
                XmlParseError::MismatchedEndTag { ref expected, ref found }
                    if expected == "b" && found == "a"
            ),
            "unexpected error: {error:?}"
        );
    }

    #[test_case("" ; "empty")]
    #[test_case("   \n  " ; "whitespace only")]
    #[test_case("<?xml version=\"1.0\"?>" ; "declaration only")]
    fn missing_root(input: &str) {
        let error = Element::parse_document(input).expect_err("no root element");
        assert!(
            matches!(error, XmlParseError::MissingRoot),
            "unexpected error: {error:?}"
        );
    }

    #[test_case("<a/><b/>" ; "two empty roots")]
    #[test_case("<a></a><b></b>" ; "two roots")]
    fn multiple_roots(input: &str) {
        let error = Element::parse_document(input).expect_err("two roots");
        assert!(
            matches!(error, XmlParseError::MultipleRoots { ref name } if name == "b"),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn trailing_text_is_rejected() {
        let error = Element::parse_document("<a/>\nProcess exited with code 3")
            .expect_err("trailing text after root");
        assert!(
            matches!(error, XmlParseError::TextOutsideRoot),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn unmatched_end_tag() {
        let error = Element::parse_document("</a>").expect_err("no opening tag");
        // The tokenizer may reject the stray tag before the tree sees it.
        assert!(
            matches!(
                error,
                XmlParseError::UnmatchedEndTag { .. } | XmlParseError::Syntax { .. }
            ),
            "unexpected error: {error:?}"
        );
    }

    #[test]
    fn broken_attribute_is_syntax_error() {
        let error = Element::parse_document(r#"<TestCase name="unterminated></TestCase>"#)
            .expect_err("attribute is not terminated");
        assert!(
            matches!(error, XmlParseError::Syntax { .. }),
            "unexpected error: {error:?}"
        );
    }
}
