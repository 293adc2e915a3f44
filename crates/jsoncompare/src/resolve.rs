use std::borrow::Cow;

use serde_json::Value;

use crate::{
    diff::{DiffIndex, Side},
    kind::Kind,
    paths::Path,
};

/// Outcome of resolving one node against the diff index.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved<'a> {
    /// The value the node displays. Borrows the traversed document unless a
    /// difference record replaced it.
    pub value: Cow<'a, Value>,
    /// Whether the node differs between the two documents, directly or
    /// through a descendant.
    pub is_different: bool,
}

/// Decides what the node at `path` displays and whether it is marked as
/// changed.
///
/// Primitive positions with a record at their exact path display the
/// record's value for `side`, so a single difference list drives both
/// renders. Containers always display the traversed value; they are marked
/// when any record addresses them or their subtree.
#[must_use]
pub fn resolve<'a>(raw: &'a Value, path: &Path, side: Side, index: &DiffIndex) -> Resolved<'a> {
    if Kind::of(raw).is_container() {
        Resolved {
            value: Cow::Borrowed(raw),
            is_different: index.lookup(path).is_some() || index.any_below(path),
        }
    } else if let Some(record) = index.lookup(path) {
        Resolved {
            value: Cow::Owned(side.pick(record).to_value()),
            is_different: true,
        }
    } else {
        Resolved {
            value: Cow::Borrowed(raw),
            is_different: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::resolve;
    use crate::{
        diff::{DiffIndex, DifferenceRecord, Side},
        paths::Path,
    };
    use serde_json::json;
    use std::borrow::Cow;
    use test_case::test_case;

    fn index() -> DiffIndex {
        DiffIndex::new(&[
            DifferenceRecord::new("name", "John", "Jane"),
            DifferenceRecord::new("user.age", 30, 25),
        ])
    }

    #[test_case(Side::Value1, json!("John"); "first side")]
    #[test_case(Side::Value2, json!("Jane"); "second side")]
    fn leaf_with_record_displays_the_side(side: Side, expected: serde_json::Value) {
        let raw = json!("whatever the document held");
        let resolved = resolve(&raw, &Path::new("name"), side, &index());
        assert!(resolved.is_different);
        assert!(matches!(resolved.value, Cow::Owned(_)));
        assert_eq!(resolved.value.into_owned(), expected);
    }

    #[test]
    fn leaf_without_record_borrows_the_raw_value() {
        let raw = json!("untouched");
        let resolved = resolve(&raw, &Path::new("city"), Side::Value1, &index());
        assert!(!resolved.is_different);
        assert!(matches!(resolved.value, Cow::Borrowed(_)));
        assert_eq!(resolved.value.as_ref(), &raw);
    }

    #[test_case("", true; "root above both records")]
    #[test_case("user", true; "container above nested record")]
    #[test_case("account", false; "container with clean subtree")]
    fn container_flag_is_transitive(path: &str, expected: bool) {
        let raw = json!({"anything": 1});
        let resolved = resolve(&raw, &Path::new(path), Side::Value1, &index());
        assert_eq!(resolved.is_different, expected);
        assert!(matches!(resolved.value, Cow::Borrowed(_)));
    }

    #[test]
    fn container_with_record_at_its_own_path_keeps_its_value() {
        let diffs = [DifferenceRecord::new("user", "a", "b")];
        let raw = json!({"age": 30});
        let resolved = resolve(
            &raw,
            &Path::new("user"),
            Side::Value2,
            &DiffIndex::new(&diffs),
        );
        assert!(resolved.is_different);
        assert_eq!(resolved.value.as_ref(), &raw);
    }
}
