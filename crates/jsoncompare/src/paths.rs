use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

/// Address of a node within a JSON document.
///
/// Object traversal appends `.key` (without the dot when the parent path is
/// empty), array traversal appends `[index]`. The root path is whatever seed
/// the caller starts from, usually the root display label or the empty
/// string.
///
/// Construction is plain string concatenation so that addresses agree with
/// the comparison service's difference records. Keys containing `.` or `[`
/// are joined verbatim.
///
/// # Examples
///
/// ```
/// use jsoncompare::Path;
///
/// let root = Path::default();
/// let age = root.join("user").join("age");
/// assert_eq!(age.as_str(), "user.age");
///
/// let first = Path::new("items").join(0);
/// assert_eq!(first.as_str(), "items[0]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(String);

impl Path {
    /// Creates a path rooted at the given seed.
    #[must_use]
    pub fn new(seed: impl Into<String>) -> Path {
        Path(seed.into())
    }

    /// Returns the address of the child reached through `segment`.
    #[must_use]
    pub fn join<'a>(&self, segment: impl Into<Segment<'a>>) -> Path {
        let mut address = String::with_capacity(self.0.len() + 8);
        address.push_str(&self.0);
        match segment.into() {
            Segment::Key(key) => {
                if !address.is_empty() {
                    address.push('.');
                }
                address.push_str(&key);
            }
            Segment::Index(index) => {
                let mut buffer = itoa::Buffer::new();
                address.push('[');
                address.push_str(buffer.format(index));
                address.push(']');
            }
        }
        Path(address)
    }

    /// Returns `true` if `other` addresses a strict descendant of this path.
    ///
    /// A descendant continues the ancestor with a `.` key or a `[` index,
    /// so sibling keys sharing a prefix (`ab` / `abc`) never match. Every
    /// non-empty path descends from the empty root.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        if self.is_empty() {
            return !other.is_empty();
        }
        other.0.starts_with(self.0.as_str())
            && matches!(other.0.as_bytes().get(self.0.len()), Some(b'.' | b'['))
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Path {
    fn from(value: &str) -> Self {
        Path(value.into())
    }
}

impl From<String> for Path {
    fn from(value: String) -> Self {
        Path(value)
    }
}

/// A single step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A string key for object entries.
    Key(Cow<'a, str>),
    /// A numeric index for array elements.
    Index(usize),
}

impl<'a> From<&'a str> for Segment<'a> {
    fn from(value: &'a str) -> Self {
        Segment::Key(Cow::Borrowed(value))
    }
}

impl From<String> for Segment<'_> {
    fn from(value: String) -> Self {
        Segment::Key(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for Segment<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Segment::Key(value)
    }
}

impl From<usize> for Segment<'_> {
    fn from(value: usize) -> Self {
        Segment::Index(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Path;
    use test_case::test_case;

    #[test_case("", "name", "name"; "key at empty root")]
    #[test_case("user", "age", "user.age"; "nested key")]
    #[test_case("user.profile", "name", "user.profile.name"; "deeply nested key")]
    #[test_case("", "with.dot", "with.dot"; "key containing a dot")]
    fn join_key(parent: &str, key: &str, expected: &str) {
        assert_eq!(Path::new(parent).join(key).as_str(), expected);
    }

    #[test_case("", 0, "[0]"; "index at empty root")]
    #[test_case("items", 0, "items[0]"; "index under key")]
    #[test_case("items", 12, "items[12]"; "multi digit index")]
    #[test_case("items[0]", 1, "items[0][1]"; "index under index")]
    fn join_index(parent: &str, index: usize, expected: &str) {
        assert_eq!(Path::new(parent).join(index).as_str(), expected);
    }

    #[test_case("", "name", true; "empty root to key")]
    #[test_case("", "[0]", true; "empty root to index")]
    #[test_case("", "", false; "empty root to itself")]
    #[test_case("user", "user.age", true; "key to nested key")]
    #[test_case("user", "user.profile.name", true; "key to deep descendant")]
    #[test_case("items", "items[0]", true; "key to element")]
    #[test_case("items[0]", "items[0].id", true; "element to its key")]
    #[test_case("user", "user", false; "key to itself")]
    #[test_case("ab", "abc", false; "sibling key prefix")]
    #[test_case("items", "itemsets[0]", false; "sibling index prefix")]
    #[test_case("user.age", "user", false; "descendant to ancestor")]
    fn ancestry(ancestor: &str, descendant: &str, expected: bool) {
        assert_eq!(
            Path::new(ancestor).is_ancestor_of(&Path::new(descendant)),
            expected
        );
    }

    #[test]
    fn emptiness_tracks_the_seed() {
        assert!(Path::default().is_empty());
        assert!(Path::new("").is_empty());
        assert!(!Path::new("root").is_empty());
        assert!(!Path::default().join(0).is_empty());
    }

    #[test]
    fn display_and_serde_are_transparent() {
        let path = Path::new("user").join("tags").join(3);
        assert_eq!(path.to_string(), "user.tags[3]");
        let serialized = serde_json::to_string(&path).unwrap();
        assert_eq!(serialized, "\"user.tags[3]\"");
        let parsed: Path = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, path);
    }
}
