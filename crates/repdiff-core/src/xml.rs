//! Structured-document (XML) flattener + extractor.
//!
//! XML report exports are first linearized into one synthetic text line per
//! element, `<tag>: [('attr', 'value'), ...]`, walking the document in
//! pre-order. A second line grammar then recognizes the `parameter-set:` and
//! `parameter:` shapes among those lines; everything else is skipped.

use crate::error::{Error, Result};
use crate::model::{ParameterCollection, ParameterSet};
use regex::Regex;
use std::fmt::Write as _;

/// Serializes every element of `document` (pre-order, root first) into one
/// descriptive line per element. Attributes keep document order; an element
/// without attributes renders as `tag: []`.
pub fn flatten(document: &str, path: &str) -> Result<Vec<String>> {
    let doc = roxmltree::Document::parse(document).map_err(|source| Error::XmlParse {
        path: path.to_string(),
        source,
    })?;

    let mut lines = Vec::new();
    for node in doc.descendants().filter(|n| n.is_element()) {
        let mut line = String::new();
        let _ = write!(&mut line, "{}: [", node.tag_name().name());
        for (idx, attr) in node.attributes().enumerate() {
            if idx > 0 {
                line.push_str(", ");
            }
            let _ = write!(&mut line, "('{}', '{}')", attr.name(), attr.value());
        }
        line.push(']');
        lines.push(line);
    }
    Ok(lines)
}

/// Compiled patterns for the flattened-line grammar.
#[derive(Debug)]
pub struct XmlGrammar {
    parameter_set: Regex,
    parameter: Regex,
}

impl Default for XmlGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlGrammar {
    pub fn new() -> Self {
        Self {
            parameter_set: Regex::new(
                r"^parameter-set:\s+\[\('name',\s+'(\w+)\s*(?:\((.+?)\))?'\),\s+\('version',\s+'(\d+)'\),\s+\('locked',\s+'(\w+)'\),\s+\('classname',\s+'(.+?)'\)\]$",
            )
            .unwrap(),
            parameter: Regex::new(
                r"^parameter:\s+\[\('name',\s+'(\w+)'\),\s+\('value',\s+'(.+?)'\)\]$",
            )
            .unwrap(),
        }
    }

    /// Parses a flattened line sequence into a collection.
    ///
    /// A `parameter-set:` line opens a new set keyed by the name portion, with
    /// the parenthesized qualifier (when present) stripped into its own field
    /// and version/locked/classname recorded unconditionally. A `parameter:`
    /// line inserts into the open set's `values` map, created lazily on first
    /// insert.
    ///
    /// A `parameter:` line before any `parameter-set:` header cannot occur in
    /// a correct pre-order linearization; such a line is dropped (with a
    /// warning) rather than attributed to a guessed set.
    pub fn extract<S: AsRef<str>>(&self, lines: &[S]) -> ParameterCollection {
        let mut collection = ParameterCollection::new();
        let mut open: Option<(String, ParameterSet)> = None;

        for line in lines {
            let line = line.as_ref();
            if let Some(caps) = self.parameter_set.captures(line) {
                if let Some((name, set)) = open.take() {
                    collection.insert(name, set);
                }
                let set = ParameterSet {
                    qualifier: caps.get(2).map(|q| q.as_str().to_string()),
                    version: Some(caps[3].to_string()),
                    locked: Some(caps[4].to_string()),
                    class_name: Some(caps[5].to_string()),
                    ..ParameterSet::default()
                };
                open = Some((caps[1].to_string(), set));
                continue;
            }
            if let Some(caps) = self.parameter.captures(line) {
                match open.as_mut() {
                    Some((_, set)) => set.insert_value(caps[1].to_string(), caps[2].to_string()),
                    None => {
                        tracing::warn!(line, "parameter entry before any parameter-set; dropped");
                    }
                }
            }
        }
        if let Some((name, set)) = open.take() {
            collection.insert(name, set);
        }
        collection
    }
}
