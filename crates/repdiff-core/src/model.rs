//! In-memory parameter model shared by both extractors.

use indexmap::IndexMap;

/// One named configuration unit extracted from a report file.
///
/// The text grammar populates `qualifier`/`type_name`; the structured grammar
/// populates `qualifier`/`version`/`locked`/`class_name`. Both feed the same
/// nested `values` map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    pub qualifier: Option<String>,
    pub type_name: Option<String>,
    pub version: Option<String>,
    pub locked: Option<String>,
    pub class_name: Option<String>,
    /// Nested parameter name → value map. `None` means the source never opened
    /// the map (structured inputs create it lazily); the text extractor always
    /// opens an empty map at the set header. Presence of the map is itself a
    /// comparable slot, but `None` and `Some(empty)` read identically as
    /// "no entries" via [`ParameterSet::entries`].
    pub values: Option<IndexMap<String, String>>,
}

impl ParameterSet {
    /// Reads the nested entries, treating a missing map and an empty map the
    /// same way.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .flatten()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Inserts a nested parameter, creating the map if the source has not
    /// opened it yet. Duplicate keys overwrite silently (last write wins).
    pub fn insert_value(&mut self, key: String, value: String) {
        let values = self.values.get_or_insert_with(IndexMap::new);
        if let Some(prev) = values.insert(key.clone(), value) {
            tracing::debug!(parameter = %key, previous = %prev, "duplicate parameter overwritten");
        }
    }
}

/// Tagged result of the four-variant `Parameter Set:` header match. Each
/// variant carries exactly the fields the line proved present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderVariant {
    Full {
        name: String,
        qualifier: String,
        type_name: String,
    },
    Qualified {
        name: String,
        qualifier: String,
    },
    Typed {
        name: String,
        type_name: String,
    },
    Bare {
        name: String,
    },
}

impl HeaderVariant {
    pub fn name(&self) -> &str {
        match self {
            HeaderVariant::Full { name, .. }
            | HeaderVariant::Qualified { name, .. }
            | HeaderVariant::Typed { name, .. }
            | HeaderVariant::Bare { name } => name,
        }
    }

    /// Opens a parameter set for this header. The text grammar always opens
    /// the `values` map, even when no assignment line follows.
    pub fn open_set(self) -> (String, ParameterSet) {
        let mut set = ParameterSet {
            values: Some(IndexMap::new()),
            ..ParameterSet::default()
        };
        let name = match self {
            HeaderVariant::Full {
                name,
                qualifier,
                type_name,
            } => {
                set.qualifier = Some(qualifier);
                set.type_name = Some(type_name);
                name
            }
            HeaderVariant::Qualified { name, qualifier } => {
                set.qualifier = Some(qualifier);
                name
            }
            HeaderVariant::Typed { name, type_name } => {
                set.type_name = Some(type_name);
                name
            }
            HeaderVariant::Bare { name } => name,
        };
        (name, set)
    }
}

/// All parameter sets extracted from one input file, keyed by set name with
/// original case preserved. Built once per file, immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterCollection {
    sets: IndexMap<String, ParameterSet>,
}

impl ParameterCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a set under its exact name. A later set under the same name
    /// replaces the earlier one silently (last seen wins).
    pub fn insert(&mut self, name: String, set: ParameterSet) {
        if self.sets.insert(name.clone(), set).is_some() {
            tracing::debug!(set = %name, "duplicate parameter set overwritten");
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParameterSet> {
        self.sets.get(name)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterSet)> {
        self.sets.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Key set sorted case-sensitively (comparison itself happens
    /// case-insensitively in the diff passes).
    pub fn sorted_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.sets.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}
