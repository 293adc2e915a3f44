use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::paths::Path;

/// A leaf value as the comparison service reports it.
///
/// Difference records address primitive positions only; containers are never
/// replaced wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Primitive {
    String(String),
    Number(serde_json::Number),
    Boolean(bool),
}

impl Primitive {
    /// Converts the primitive into the equivalent JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Primitive::String(s) => Value::String(s.clone()),
            Primitive::Number(n) => Value::Number(n.clone()),
            Primitive::Boolean(b) => Value::Bool(*b),
        }
    }
}

impl From<&str> for Primitive {
    fn from(value: &str) -> Self {
        Primitive::String(value.into())
    }
}

impl From<String> for Primitive {
    fn from(value: String) -> Self {
        Primitive::String(value)
    }
}

impl From<bool> for Primitive {
    fn from(value: bool) -> Self {
        Primitive::Boolean(value)
    }
}

impl From<i64> for Primitive {
    fn from(value: i64) -> Self {
        Primitive::Number(value.into())
    }
}

/// Which compared document a render pass displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Value1,
    Value2,
}

impl Side {
    /// Selects this side's replacement value from a difference record.
    #[must_use]
    pub fn pick(self, record: &DifferenceRecord) -> &Primitive {
        match self {
            Side::Value1 => &record.value1,
            Side::Value2 => &record.value2,
        }
    }
}

/// A single discrepancy between the two compared documents, keyed by the
/// path of the differing position.
///
/// Round-trips the comparison service's wire shape verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifferenceRecord {
    pub path: Path,
    pub value1: Primitive,
    pub value2: Primitive,
}

impl DifferenceRecord {
    #[must_use]
    pub fn new(
        path: impl Into<Path>,
        value1: impl Into<Primitive>,
        value2: impl Into<Primitive>,
    ) -> DifferenceRecord {
        DifferenceRecord {
            path: path.into(),
            value1: value1.into(),
            value2: value2.into(),
        }
    }
}

/// Path-keyed lookup over a flat list of difference records.
///
/// Built once per render pass. Records sharing a path overwrite earlier
/// ones, so the last occurrence in the input wins.
#[derive(Debug, Clone, Default)]
pub struct DiffIndex {
    by_path: AHashMap<Path, DifferenceRecord>,
    sorted: Vec<Path>,
}

impl DiffIndex {
    #[must_use]
    pub fn new(records: &[DifferenceRecord]) -> DiffIndex {
        records.iter().cloned().collect()
    }

    /// Looks up the record addressing exactly `path`.
    #[must_use]
    pub fn lookup(&self, path: &Path) -> Option<&DifferenceRecord> {
        self.by_path.get(path)
    }

    /// Returns `true` if some record addresses a strict descendant of
    /// `path`.
    ///
    /// Descendant paths share their ancestor as a prefix, so they occupy a
    /// contiguous run of the sorted path list.
    #[must_use]
    pub fn any_below(&self, path: &Path) -> bool {
        let start = self
            .sorted
            .partition_point(|candidate| candidate.as_str() < path.as_str());
        self.sorted[start..]
            .iter()
            .take_while(|candidate| candidate.as_str().starts_with(path.as_str()))
            .any(|candidate| path.is_ancestor_of(candidate))
    }

    /// The number of distinct record paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

impl FromIterator<DifferenceRecord> for DiffIndex {
    fn from_iter<I: IntoIterator<Item = DifferenceRecord>>(iter: I) -> Self {
        let mut by_path = AHashMap::new();
        for record in iter {
            by_path.insert(record.path.clone(), record);
        }
        let mut sorted: Vec<Path> = by_path.keys().cloned().collect();
        sorted.sort_unstable();
        DiffIndex { by_path, sorted }
    }
}

#[cfg(test)]
mod tests {
    use super::{DiffIndex, DifferenceRecord, Primitive, Side};
    use crate::paths::Path;
    use serde_json::json;
    use test_case::test_case;

    fn sample() -> DiffIndex {
        DiffIndex::new(&[
            DifferenceRecord::new("name", "John", "Jane"),
            DifferenceRecord::new("user.age", 30, 25),
            DifferenceRecord::new("items[2]", false, true),
        ])
    }

    #[test_case("name", true; "top level key")]
    #[test_case("user.age", true; "nested key")]
    #[test_case("items[2]", true; "array element")]
    #[test_case("user", false; "container path")]
    #[test_case("missing", false; "unknown path")]
    fn lookup(path: &str, expected: bool) {
        assert_eq!(sample().lookup(&Path::new(path)).is_some(), expected);
    }

    #[test_case("", true; "empty root")]
    #[test_case("user", true; "parent of nested record")]
    #[test_case("items", true; "parent of element record")]
    #[test_case("name", false; "record path itself")]
    #[test_case("user.age", false; "leaf record path")]
    #[test_case("item", false; "sibling prefix")]
    #[test_case("users", false; "sibling key")]
    fn any_below(path: &str, expected: bool) {
        assert_eq!(sample().any_below(&Path::new(path)), expected);
    }

    #[test]
    fn last_record_wins_on_duplicate_paths() {
        let index = DiffIndex::new(&[
            DifferenceRecord::new("name", "John", "Jane"),
            DifferenceRecord::new("name", "Ann", "Mary"),
        ]);
        assert_eq!(index.len(), 1);
        let record = index.lookup(&Path::new("name")).unwrap();
        assert_eq!(record.value1, Primitive::String("Ann".into()));
        assert_eq!(record.value2, Primitive::String("Mary".into()));
    }

    #[test]
    fn empty_index() {
        let index = DiffIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert!(index.lookup(&Path::new("name")).is_none());
        assert!(!index.any_below(&Path::default()));
    }

    #[test]
    fn side_picks_the_matching_value() {
        let record = DifferenceRecord::new("age", 30, 25);
        assert_eq!(Side::Value1.pick(&record), &Primitive::Number(30.into()));
        assert_eq!(Side::Value2.pick(&record), &Primitive::Number(25.into()));
    }

    #[test]
    fn records_round_trip_the_wire_shape() {
        let wire = json!([
            {"path": "name", "value1": "John", "value2": "Jane"},
            {"path": "user.age", "value1": 30, "value2": 25},
            {"path": "active", "value1": true, "value2": false},
        ]);
        let records: Vec<DifferenceRecord> = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].path.as_str(), "user.age");
        assert_eq!(records[2].value2, Primitive::Boolean(false));
        assert_eq!(serde_json::to_value(&records).unwrap(), wire);
    }

    #[test_case(json!("John"), Primitive::String("John".into()); "string")]
    #[test_case(json!(30), Primitive::Number(30.into()); "number")]
    #[test_case(json!(true), Primitive::Boolean(true); "boolean")]
    fn primitive_from_wire(value: serde_json::Value, expected: Primitive) {
        let primitive: Primitive = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(primitive, expected);
        assert_eq!(primitive.to_value(), value);
    }
}
