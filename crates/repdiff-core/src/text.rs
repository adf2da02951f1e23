//! Free-form text report extractor.
//!
//! Recognizes `Parameter Set:` headers followed by `<key> = <value>`
//! assignment lines, up to the next header or the `Data Model Registry`
//! sentinel. Everything else in a report (prose, blank lines, tables) is
//! skipped without error.

use crate::model::{HeaderVariant, ParameterCollection};
use regex::Regex;

/// Compiled patterns for the text report grammar. Built once per extraction
/// and passed around explicitly; nothing here is process-global.
#[derive(Debug)]
pub struct TextGrammar {
    header_with_type: Regex,
    header_without_type: Regex,
    set_header: Regex,
    registry: Regex,
    assignment: Regex,
}

impl Default for TextGrammar {
    fn default() -> Self {
        Self::new()
    }
}

impl TextGrammar {
    pub fn new() -> Self {
        Self {
            // The qualifier and the type clause are both parenthesized, so the
            // with-type pattern is tried first; otherwise a lone
            // `(type=...)` group would be read as a qualifier.
            header_with_type: Regex::new(
                r"^\s*Parameter\s+Set:\s+(\w+)\s*(?:\((.+?)\))?\s*\(type=(\w+),.*\)$",
            )
            .unwrap(),
            header_without_type: Regex::new(r"^\s*Parameter\s+Set:\s+(\w+)\s*(?:\((.+?)\))?\s*$")
                .unwrap(),
            set_header: Regex::new(r"^\s*Parameter\s+Set:\s+.*$").unwrap(),
            registry: Regex::new(r"^\s*Data\s*Model\s*Registry\s*").unwrap(),
            assignment: Regex::new(r"^\s*(\w+)\s*=\s*(.+?)\s*$").unwrap(),
        }
    }

    /// Matches the four-variant set header (both groups / qualifier-only /
    /// type-only / bare), yielding exactly the fields present.
    pub fn match_header(&self, line: &str) -> Option<HeaderVariant> {
        if let Some(caps) = self.header_with_type.captures(line) {
            let name = caps[1].to_string();
            let type_name = caps[3].to_string();
            return Some(match caps.get(2) {
                Some(q) => HeaderVariant::Full {
                    name,
                    qualifier: q.as_str().to_string(),
                    type_name,
                },
                None => HeaderVariant::Typed { name, type_name },
            });
        }
        if let Some(caps) = self.header_without_type.captures(line) {
            let name = caps[1].to_string();
            return Some(match caps.get(2) {
                Some(q) => HeaderVariant::Qualified {
                    name,
                    qualifier: q.as_str().to_string(),
                },
                None => HeaderVariant::Bare { name },
            });
        }
        None
    }

    fn is_set_header(&self, line: &str) -> bool {
        self.set_header.is_match(line)
    }

    fn is_registry_header(&self, line: &str) -> bool {
        self.registry.is_match(line)
    }

    fn match_assignment(&self, line: &str) -> Option<(String, String)> {
        let caps = self.assignment.captures(line)?;
        Some((caps[1].to_string(), caps[2].to_string()))
    }

    /// Single forward pass over the report lines with a length-checked cursor.
    ///
    /// A matched header opens a set (replacing any earlier set under the same
    /// exact name) and consumes assignment lines until the next header or
    /// registry sentinel, neither of which is consumed here. The inner scan
    /// ends without error when the cursor reaches the end of input.
    pub fn extract<S: AsRef<str>>(&self, lines: &[S]) -> ParameterCollection {
        let mut collection = ParameterCollection::new();
        let mut i = 0;
        while i < lines.len() {
            let Some(header) = self.match_header(lines[i].as_ref()) else {
                i += 1;
                continue;
            };
            let (name, mut set) = header.open_set();
            i += 1;
            while i < lines.len() {
                let line = lines[i].as_ref();
                if self.is_set_header(line) || self.is_registry_header(line) {
                    break;
                }
                if let Some((key, value)) = self.match_assignment(line) {
                    set.insert_value(key, value);
                }
                i += 1;
            }
            collection.insert(name, set);
        }
        collection
    }
}
