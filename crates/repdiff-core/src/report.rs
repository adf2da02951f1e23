//! Text rendering of comparison records.

use crate::compare::{AttributeAbsence, ComparisonReport, KeyPresence, Slot, ValueRecord};
use indexmap::IndexMap;
use std::fmt;

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Slot::Qualifier => "PARAMETER_QUALIFIER",
            Slot::Type => "TYPE",
            Slot::Values => "PARAMETER_SET",
        };
        f.write_str(token)
    }
}

impl fmt::Display for KeyPresence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\nFOUND IN FILE {}\nNOT FOUND IN FILE {}",
            self.key, self.found_in, self.missing_from
        )
    }
}

impl fmt::Display for AttributeAbsence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} >>>> {} >>>> {}\nFOUND IN FILE: {}\nNOT FOUND IN FILE: {}",
            self.key, self.slot, self.value, self.found_in, self.missing_from
        )
    }
}

impl fmt::Display for ValueRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueRecord::Mismatch {
                subject_key,
                parameter,
                subject_value,
                subject_file,
                baseline_key,
                baseline_value,
                baseline_file,
            } => write!(
                f,
                "{subject_key} >>>> PARAMETER_SET: >>>> {parameter} >>>> {subject_value}\n\
                 IN FILE {subject_file}\n\
                 DOES NOT MATCH\n\
                 {baseline_key} >>>> PARAMETER_SET: >>>> {parameter} >>>> {baseline_value}\n\
                 IN FILE: {baseline_file}"
            ),
            ValueRecord::MissingInSubject {
                key,
                parameter,
                found_in,
                missing_from,
            } => write!(
                f,
                "{key} >>>> PARAMETER_SET: >>>> {parameter}\n\
                 FOUND IN FILE: {found_in}\n\
                 NOT FOUND IN FILE: {missing_from}"
            ),
        }
    }
}

/// Renders a nested values map for pass 2 records, in document order.
pub(crate) fn render_values_map(values: &IndexMap<String, String>) -> String {
    let mut out = String::from("{");
    for (idx, (key, value)) in values.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        out.push_str(key);
        out.push_str(" = ");
        out.push_str(value);
    }
    out.push('}');
    out
}

impl ComparisonReport {
    /// All records across the three passes, blank-line separated, in pass
    /// order. Passes that produced nothing contribute nothing. Empty reports
    /// render as an empty string.
    pub fn render_text(&self) -> String {
        let mut blocks: Vec<String> = Vec::new();
        blocks.extend(self.key_presence.iter().map(ToString::to_string));
        blocks.extend(self.attribute_presence.iter().map(ToString::to_string));
        blocks.extend(self.value_diff.iter().map(ToString::to_string));
        blocks.join("\n\n")
    }
}
