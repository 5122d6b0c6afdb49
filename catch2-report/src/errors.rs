// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced while building element trees and Catch2 records.

use thiserror::Error;

/// An error that occurs while parsing markup text into an [`Element`](crate::Element) tree.
///
/// Every variant means the text is not a single well-formed document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum XmlParseError {
    /// The tokenizer rejected the input.
    #[error("malformed markup at byte {position}")]
    Syntax {
        /// The byte offset at which the error was detected.
        position: u64,

        /// The underlying error.
        #[source]
        error: quick_xml::Error,
    },

    /// An element or attribute name was not valid UTF-8.
    #[error("name at byte {position} is not valid UTF-8")]
    InvalidName {
        /// The byte offset at which the name was read.
        position: u64,

        /// The underlying error.
        #[source]
        error: std::str::Utf8Error,
    },

    /// The input ended while an element was still open.
    #[error("input ended before element `{name}` was closed")]
    UnclosedElement {
        /// The innermost element that was left open.
        name: String,
    },

    /// Elements were nested more deeply than [`Element::MAX_DEPTH`](crate::Element::MAX_DEPTH).
    #[error("element `{name}` is nested more than {limit} levels deep")]
    TooDeep {
        /// The element that exceeded the limit.
        name: String,

        /// The maximum nesting depth.
        limit: usize,
    },

    /// A closing tag did not match the innermost open element.
    #[error("closing tag `{found}` does not match open element `{expected}`")]
    MismatchedEndTag {
        /// The element that was open.
        expected: String,

        /// The closing tag that was found.
        found: String,
    },

    /// A closing tag was found with no open element.
    #[error("closing tag `{name}` has no matching opening tag")]
    UnmatchedEndTag {
        /// The closing tag that was found.
        name: String,
    },

    /// The input did not contain any element.
    #[error("input does not contain a root element")]
    MissingRoot,

    /// A second top-level element followed the root element.
    #[error("found second root element `{name}`")]
    MultipleRoots {
        /// The name of the second top-level element.
        name: String,
    },

    /// Non-whitespace text appeared outside the root element.
    #[error("found text outside the root element")]
    TextOutsideRoot,
}

/// An error that occurs while converting an element into a Catch2 record.
///
/// Returned by [`Reporter`](crate::Reporter) implementations.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportParseError {
    /// The element had a different name than the one expected.
    #[error("expected element `{expected}`, found `{found}`")]
    UnexpectedElement {
        /// The expected element name.
        expected: &'static str,

        /// The name that was found.
        found: String,
    },

    /// A required child element was absent.
    #[error("element `{element}` is missing required child `{child}`")]
    MissingChild {
        /// The parent element.
        element: String,

        /// The missing child element.
        child: &'static str,
    },

    /// A required attribute was absent.
    #[error("element `{element}` is missing required attribute `{attribute}`")]
    MissingAttribute {
        /// The element.
        element: String,

        /// The missing attribute.
        attribute: &'static str,
    },

    /// An attribute value could not be interpreted.
    #[error("element `{element}` has invalid value `{value}` for attribute `{attribute}`")]
    InvalidAttribute {
        /// The element.
        element: String,

        /// The attribute.
        attribute: &'static str,

        /// The value that was found.
        value: String,
    },
}
