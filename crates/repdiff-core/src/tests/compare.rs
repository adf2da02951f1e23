use crate::compare::{
    Labeled, Slot, ValueRecord, attribute_presence, compare_collections, key_presence, value_diff,
};
use crate::model::{ParameterCollection, ParameterSet};
use indexmap::IndexMap;

fn set_with_values(values: &[(&str, &str)]) -> ParameterSet {
    ParameterSet {
        values: Some(
            values
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<IndexMap<_, _>>(),
        ),
        ..ParameterSet::default()
    }
}

fn collection(sets: Vec<(&str, ParameterSet)>) -> ParameterCollection {
    let mut c = ParameterCollection::new();
    for (name, set) in sets {
        c.insert(name.to_string(), set);
    }
    c
}

fn labeled<'a>(c: &'a ParameterCollection, label: &'a str) -> Labeled<'a> {
    Labeled {
        collection: c,
        label,
    }
}

#[test]
fn comparing_a_collection_against_itself_yields_no_records() {
    let c = collection(vec![
        ("cadence", set_with_values(&[("readNoise", "25"), ("gain", "110")])),
        ("pointing", set_with_values(&[("ra", "290.67")])),
    ]);
    let report = compare_collections(labeled(&c, "a.txt"), labeled(&c, "a.txt"));
    assert!(report.is_empty());
}

#[test]
fn key_presence_reports_subject_only_keys_against_the_smaller_baseline() {
    let a = collection(vec![("Foo", set_with_values(&[]))]);
    let b = collection(vec![
        ("Foo", set_with_values(&[])),
        ("Bar", set_with_values(&[])),
    ]);

    let records = key_presence(labeled(&a, "a.txt"), labeled(&b, "b.txt"));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key, "Bar");
    assert_eq!(records[0].found_in, "b.txt");
    assert_eq!(records[0].missing_from, "a.txt");
}

#[test]
fn key_presence_tie_makes_the_first_input_the_baseline() {
    let a = collection(vec![("Alpha", ParameterSet::default())]);
    let b = collection(vec![("Beta", ParameterSet::default())]);

    let records = key_presence(labeled(&a, "a.txt"), labeled(&b, "b.txt"));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key, "Beta");
    assert_eq!(records[0].found_in, "b.txt");
}

#[test]
fn key_matching_is_case_insensitive() {
    let a = collection(vec![("Foo", ParameterSet::default())]);
    let b = collection(vec![("FOO", ParameterSet::default())]);
    assert!(key_presence(labeled(&a, "a.txt"), labeled(&b, "b.txt")).is_empty());
}

#[test]
fn records_preserve_the_subject_sides_original_case() {
    let qualified = ParameterSet {
        qualifier: Some("fine".to_string()),
        ..ParameterSet::default()
    };
    let a = collection(vec![("Foo", ParameterSet::default())]);
    let b = collection(vec![("FOO", qualified), ("Extra", ParameterSet::default())]);

    let keys = key_presence(labeled(&a, "a.txt"), labeled(&b, "b.txt"));
    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].key, "Extra");

    let attrs = attribute_presence(labeled(&a, "a.txt"), labeled(&b, "b.txt"));
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs[0].key, "FOO", "reported key keeps original case");
    assert_eq!(attrs[0].slot, Slot::Qualifier);
}

#[test]
fn attribute_pass_reports_each_missing_slot_once() {
    let subject_set = ParameterSet {
        qualifier: Some("quarter 1".to_string()),
        type_name: Some("PIPELINE".to_string()),
        values: Some(IndexMap::new()),
        ..ParameterSet::default()
    };
    let a = collection(vec![("tad", ParameterSet::default())]);
    let b = collection(vec![("tad", subject_set), ("pad", ParameterSet::default())]);

    let mut records = attribute_presence(labeled(&a, "a.txt"), labeled(&b, "b.txt"));
    records.sort_by_key(|r| format!("{}", r.slot));
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].slot, Slot::Qualifier);
    assert_eq!(records[0].value, "quarter 1");
    assert_eq!(records[1].slot, Slot::Values);
    assert_eq!(records[1].value, "{}");
    assert_eq!(records[2].slot, Slot::Type);
    assert_eq!(records[2].value, "PIPELINE");
    for r in &records {
        assert_eq!(r.found_in, "b.txt");
        assert_eq!(r.missing_from, "a.txt");
    }
}

#[test]
fn attribute_pass_never_reports_differing_values_of_present_slots() {
    let a_set = ParameterSet {
        type_name: Some("MODULE".to_string()),
        ..ParameterSet::default()
    };
    let b_set = ParameterSet {
        type_name: Some("PIPELINE".to_string()),
        ..ParameterSet::default()
    };
    let a = collection(vec![("tad", a_set)]);
    let b = collection(vec![("tad", b_set)]);

    assert!(attribute_presence(labeled(&a, "a.txt"), labeled(&b, "b.txt")).is_empty());
}

#[test]
fn value_pass_reports_case_insensitive_mismatches_with_both_values() {
    let a = collection(vec![("P", set_with_values(&[("x", "1")]))]);
    let b = collection(vec![("P", set_with_values(&[("x", "2")]))]);

    let records = value_diff(labeled(&a, "a.txt"), labeled(&b, "b.txt"));
    assert_eq!(records.len(), 1);
    match &records[0] {
        ValueRecord::Mismatch {
            subject_key,
            parameter,
            subject_value,
            subject_file,
            baseline_key,
            baseline_value,
            baseline_file,
        } => {
            assert_eq!(subject_key, "P");
            assert_eq!(baseline_key, "P");
            assert_eq!(parameter, "x");
            assert_eq!(subject_value, "2");
            assert_eq!(baseline_value, "1");
            assert_eq!(subject_file, "b.txt");
            assert_eq!(baseline_file, "a.txt");
        }
        other => panic!("expected Mismatch, got {other:?}"),
    }
}

#[test]
fn value_pass_compares_values_case_insensitively() {
    let a = collection(vec![("P", set_with_values(&[("flag", "True")]))]);
    let b = collection(vec![("P", set_with_values(&[("flag", "true")]))]);
    assert!(value_diff(labeled(&a, "a.txt"), labeled(&b, "b.txt")).is_empty());
}

#[test]
fn value_pass_reports_baseline_only_parameters_as_missing_in_subject() {
    let a = collection(vec![("P", set_with_values(&[("x", "1"), ("z", "9")]))]);
    let b = collection(vec![("P", set_with_values(&[("x", "1")]))]);

    let records = value_diff(labeled(&a, "a.txt"), labeled(&b, "b.txt"));
    assert_eq!(records.len(), 1);
    match &records[0] {
        ValueRecord::MissingInSubject {
            key,
            parameter,
            found_in,
            missing_from,
        } => {
            assert_eq!(key, "P");
            assert_eq!(parameter, "z");
            assert_eq!(found_in, "a.txt");
            assert_eq!(missing_from, "b.txt");
        }
        other => panic!("expected MissingInSubject, got {other:?}"),
    }
}

#[test]
fn value_pass_never_visits_subject_only_parameters() {
    // Known asymmetry: only the baseline side's nested keys are walked, so a
    // subject-only nested key is invisible to the pass.
    let a = collection(vec![("P", set_with_values(&[("x", "1")]))]);
    let b = collection(vec![("P", set_with_values(&[("x", "1"), ("y", "2")]))]);

    assert!(value_diff(labeled(&a, "a.txt"), labeled(&b, "b.txt")).is_empty());
}

#[test]
fn value_pass_skips_pairs_where_either_side_has_no_values_map() {
    let a = collection(vec![("P", ParameterSet::default())]);
    let b = collection(vec![("P", set_with_values(&[("x", "1")]))]);
    assert!(value_diff(labeled(&a, "a.txt"), labeled(&b, "b.txt")).is_empty());
}

#[test]
fn report_render_text_joins_records_with_blank_lines() {
    let a = collection(vec![("Foo", set_with_values(&[("x", "1")]))]);
    let b = collection(vec![
        ("Foo", set_with_values(&[("x", "2")])),
        ("Bar", ParameterSet::default()),
    ]);

    let report = compare_collections(labeled(&a, "a.txt"), labeled(&b, "b.txt"));
    let text = report.render_text();
    assert_eq!(
        text,
        "Bar\n\
         FOUND IN FILE b.txt\n\
         NOT FOUND IN FILE a.txt\n\
         \n\
         Foo >>>> PARAMETER_SET: >>>> x >>>> 2\n\
         IN FILE b.txt\n\
         DOES NOT MATCH\n\
         Foo >>>> PARAMETER_SET: >>>> x >>>> 1\n\
         IN FILE: a.txt"
    );
}

#[test]
fn report_serializes_to_json() {
    let a = collection(vec![("Foo", ParameterSet::default())]);
    let b = collection(vec![
        ("Foo", ParameterSet::default()),
        ("Bar", ParameterSet::default()),
    ]);

    let report = compare_collections(labeled(&a, "a.txt"), labeled(&b, "b.txt"));
    let json = serde_json::to_value(&report).expect("serialize");
    assert_eq!(json["key_presence"][0]["key"], "Bar");
    assert_eq!(json["key_presence"][0]["found_in"], "b.txt");
    assert!(json["attribute_presence"].as_array().unwrap().is_empty());
    assert!(json["value_diff"].as_array().unwrap().is_empty());
}
