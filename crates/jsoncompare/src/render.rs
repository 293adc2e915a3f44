use serde_json::Value;

use crate::{
    diff::{DiffIndex, DifferenceRecord, Side},
    kind::Kind,
    paths::Path,
    resolve::resolve,
};

/// A node of the display tree produced by one render pass.
///
/// The tree is fully owned: no references into the source document, so it
/// outlives its inputs and is regenerated wholesale whenever they change.
/// Exactly one of `value` and `children` is populated: leaves carry their
/// resolved display value, containers carry their rendered children.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedNode {
    /// Label shown next to the node: the object key, the stringified array
    /// index, or the caller's root label.
    pub key: String,
    /// Address of the node within the document.
    pub path: Path,
    /// Nesting level, counted from the render root. A presentation hint
    /// only; it never participates in path computation or diff lookup.
    pub depth: usize,
    /// Shape of the displayed value.
    pub kind: Kind,
    /// Resolved display value; `None` for objects and arrays.
    pub value: Option<Value>,
    /// Whether this node differs between the documents, directly or through
    /// a descendant.
    pub is_different: bool,
    /// Rendered children; `None` for leaves, `Some` (possibly empty) for
    /// objects and arrays.
    pub children: Option<Vec<RenderedNode>>,
}

impl RenderedNode {
    /// Returns `true` for objects and arrays.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Canonical text for a leaf value: `null`, `true`/`false`, numbers in
    /// their JSON form, strings without quotes. `None` for containers.
    #[must_use]
    pub fn display_text(&self) -> Option<String> {
        match self.value.as_ref()? {
            Value::Null => Some("null".to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Object(_) | Value::Array(_) => None,
        }
    }

    /// Iterates the subtree depth-first, parents before children.
    pub fn iter(&self) -> Nodes<'_> {
        Nodes { stack: vec![self] }
    }
}

impl<'a> IntoIterator for &'a RenderedNode {
    type Item = &'a RenderedNode;
    type IntoIter = Nodes<'a>;

    fn into_iter(self) -> Nodes<'a> {
        self.iter()
    }
}

/// Depth-first preorder iterator over a rendered tree.
#[derive(Debug)]
pub struct Nodes<'a> {
    stack: Vec<&'a RenderedNode>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a RenderedNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(children) = &node.children {
            self.stack.extend(children.iter().rev());
        }
        Some(node)
    }
}

/// Renders the node for `value` at `path`, then its children recursively.
///
/// `key` and `depth` are carried through for presentation only. Object
/// children keep source insertion order and extend the path with `.key`;
/// array children keep index order and extend it with `[index]`.
#[must_use]
pub fn render_node(
    value: &Value,
    key: impl Into<String>,
    depth: usize,
    index: &DiffIndex,
    side: Side,
    path: Path,
) -> RenderedNode {
    let resolved = resolve(value, &path, side, index);
    let kind = Kind::of(&resolved.value);
    let children = match value {
        Value::Object(entries) => Some(
            entries
                .iter()
                .map(|(child_key, child)| {
                    render_node(
                        child,
                        child_key.as_str(),
                        depth + 1,
                        index,
                        side,
                        path.join(child_key.as_str()),
                    )
                })
                .collect(),
        ),
        Value::Array(elements) => Some(
            elements
                .iter()
                .enumerate()
                .map(|(position, element)| {
                    render_node(
                        element,
                        position.to_string(),
                        depth + 1,
                        index,
                        side,
                        path.join(position),
                    )
                })
                .collect(),
        ),
        _ => None,
    };
    let value = match children {
        Some(_) => None,
        None => Some(resolved.value.into_owned()),
    };
    RenderedNode {
        key: key.into(),
        path,
        depth,
        kind,
        value,
        is_different: resolved.is_different,
        children,
    }
}

/// Renders a full document against a flat difference list.
///
/// Builds the diff index once and roots both the display key and the path
/// at `root_label`. An empty label keeps paths relative to the document
/// root, matching the addresses the comparison service reports.
///
/// # Examples
///
/// ```
/// use jsoncompare::{render_tree, DifferenceRecord, Side};
/// use serde_json::json;
///
/// let document = json!({"name": "John"});
/// let diffs = [DifferenceRecord::new("name", "John", "Jane")];
///
/// let tree = render_tree(&document, "", &diffs, Side::Value2);
/// let name = &tree.children.as_ref().unwrap()[0];
/// assert_eq!(name.path.as_str(), "name");
/// assert_eq!(name.display_text().as_deref(), Some("Jane"));
/// assert!(name.is_different);
/// ```
#[must_use]
pub fn render_tree(
    value: &Value,
    root_label: &str,
    diffs: &[DifferenceRecord],
    side: Side,
) -> RenderedNode {
    let index = DiffIndex::new(diffs);
    render_node(value, root_label, 0, &index, side, Path::new(root_label))
}
