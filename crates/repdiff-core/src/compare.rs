//! Three-pass comparison of two parameter collections.
//!
//! Every pass first splits the two collections into *baseline* (fewer
//! top-level keys, ties favor the first input) and *subject* (the other), then
//! checks the subject's elements against the baseline. Pass 3 reuses the same
//! top-level selection rule for nested maps even though their sizes are
//! unrelated to the top-level counts; that asymmetry matches the reference
//! comparison semantics and is kept as-is.

use crate::model::{ParameterCollection, ParameterSet};
use crate::report::render_values_map;
use serde::Serialize;

/// A collection plus the file label it was extracted from.
#[derive(Debug, Clone, Copy)]
pub struct Labeled<'a> {
    pub collection: &'a ParameterCollection,
    pub label: &'a str,
}

fn split_baseline<'a>(a: Labeled<'a>, b: Labeled<'a>) -> (Labeled<'a>, Labeled<'a>) {
    if a.collection.len() <= b.collection.len() {
        (a, b)
    } else {
        (b, a)
    }
}

/// Pass 1 record: a top-level key present on the subject side only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyPresence {
    pub key: String,
    pub found_in: String,
    pub missing_from: String,
}

/// The three attribute slots checked by pass 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Qualifier,
    Type,
    Values,
}

/// Pass 2 record: an attribute slot present on the subject side's set with no
/// present counterpart on the baseline side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeAbsence {
    pub key: String,
    pub slot: Slot,
    pub value: String,
    pub found_in: String,
    pub missing_from: String,
}

/// Pass 3 record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueRecord {
    /// A nested parameter present on both sides with case-insensitively
    /// differing values.
    Mismatch {
        subject_key: String,
        parameter: String,
        subject_value: String,
        subject_file: String,
        baseline_key: String,
        baseline_value: String,
        baseline_file: String,
    },
    /// A nested parameter present in the baseline map only. The symmetric
    /// subject-only case is unreachable under baseline-keyed iteration.
    MissingInSubject {
        key: String,
        parameter: String,
        found_in: String,
        missing_from: String,
    },
}

/// All records produced by the three passes, in pass order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    pub key_presence: Vec<KeyPresence>,
    pub attribute_presence: Vec<AttributeAbsence>,
    pub value_diff: Vec<ValueRecord>,
}

impl ComparisonReport {
    pub fn is_empty(&self) -> bool {
        self.key_presence.is_empty()
            && self.attribute_presence.is_empty()
            && self.value_diff.is_empty()
    }
}

/// Runs all three passes in order.
pub fn compare_collections(a: Labeled<'_>, b: Labeled<'_>) -> ComparisonReport {
    ComparisonReport {
        key_presence: key_presence(a, b),
        attribute_presence: attribute_presence(a, b),
        value_diff: value_diff(a, b),
    }
}

/// Pass 1: subject keys without a case-insensitive baseline match. Reported
/// keys keep the subject side's original case.
pub fn key_presence(a: Labeled<'_>, b: Labeled<'_>) -> Vec<KeyPresence> {
    let (base, subj) = split_baseline(a, b);
    let base_keys = base.collection.sorted_keys();

    subj.collection
        .sorted_keys()
        .into_iter()
        .filter(|key| !base_keys.iter().any(|bk| bk.eq_ignore_ascii_case(key)))
        .map(|key| KeyPresence {
            key: key.to_string(),
            found_in: subj.label.to_string(),
            missing_from: base.label.to_string(),
        })
        .collect()
}

fn slot_found(
    base: &ParameterCollection,
    subject_key: &str,
    present: impl Fn(&ParameterSet) -> bool,
) -> bool {
    base.iter()
        .any(|(bk, bs)| bk.eq_ignore_ascii_case(subject_key) && present(bs))
}

/// Pass 2: for every subject key, each of the qualifier/type/values slots
/// present on the subject set must also be present on a case-insensitively
/// matching baseline set (the match is re-derived per slot). Only slot
/// presence is compared here; differing values inside two present slots are
/// never reported by this pass.
pub fn attribute_presence(a: Labeled<'_>, b: Labeled<'_>) -> Vec<AttributeAbsence> {
    let (base, subj) = split_baseline(a, b);
    let mut records = Vec::new();

    for key in subj.collection.sorted_keys() {
        let Some(set) = subj.collection.get(key) else {
            continue;
        };

        if let Some(qualifier) = &set.qualifier {
            if !slot_found(base.collection, key, |s| s.qualifier.is_some()) {
                records.push(AttributeAbsence {
                    key: key.to_string(),
                    slot: Slot::Qualifier,
                    value: qualifier.clone(),
                    found_in: subj.label.to_string(),
                    missing_from: base.label.to_string(),
                });
            }
        }

        if let Some(type_name) = &set.type_name {
            if !slot_found(base.collection, key, |s| s.type_name.is_some()) {
                records.push(AttributeAbsence {
                    key: key.to_string(),
                    slot: Slot::Type,
                    value: type_name.clone(),
                    found_in: subj.label.to_string(),
                    missing_from: base.label.to_string(),
                });
            }
        }

        if let Some(values) = &set.values {
            if !slot_found(base.collection, key, |s| s.values.is_some()) {
                records.push(AttributeAbsence {
                    key: key.to_string(),
                    slot: Slot::Values,
                    value: render_values_map(values),
                    found_in: subj.label.to_string(),
                    missing_from: base.label.to_string(),
                });
            }
        }
    }
    records
}

/// Pass 3: for case-insensitively matching key pairs where both sides carry a
/// `values` map, walk the baseline side's nested keys only. Nested keys match
/// exactly; nested values compare case-insensitively. Subject-only nested keys
/// are never visited, so they are never reported.
pub fn value_diff(a: Labeled<'_>, b: Labeled<'_>) -> Vec<ValueRecord> {
    let (base, subj) = split_baseline(a, b);
    let mut records = Vec::new();

    for skey in subj.collection.sorted_keys() {
        let Some(svals) = subj.collection.get(skey).and_then(|s| s.values.as_ref()) else {
            continue;
        };
        for bkey in base.collection.sorted_keys() {
            if !bkey.eq_ignore_ascii_case(skey) {
                continue;
            }
            let Some(bvals) = base.collection.get(bkey).and_then(|s| s.values.as_ref()) else {
                continue;
            };

            let mut params: Vec<&str> = bvals.keys().map(String::as_str).collect();
            params.sort_unstable();
            for param in params {
                let Some(bval) = bvals.get(param) else {
                    continue;
                };
                match svals.get(param) {
                    Some(sval) if !bval.eq_ignore_ascii_case(sval) => {
                        records.push(ValueRecord::Mismatch {
                            subject_key: skey.to_string(),
                            parameter: param.to_string(),
                            subject_value: sval.clone(),
                            subject_file: subj.label.to_string(),
                            baseline_key: bkey.to_string(),
                            baseline_value: bval.clone(),
                            baseline_file: base.label.to_string(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        records.push(ValueRecord::MissingInSubject {
                            key: skey.to_string(),
                            parameter: param.to_string(),
                            found_in: base.label.to_string(),
                            missing_from: subj.label.to_string(),
                        });
                    }
                }
            }
        }
    }
    records
}
