//! # jsoncompare
//!
//! A rendering engine for side-by-side JSON comparison. It walks a document
//! into an addressable tree, assigns every node a stable path (`user.age`,
//! `items[0]`), and annotates each node against a precomputed list of
//! path-scoped differences, substituting leaf values per side so one
//! difference list drives both renders.
//!
//! ```rust
//! use jsoncompare::{render_tree, validate, DifferenceRecord, Side};
//!
//! let checked = validate(r#"{"user": {"age": 30}}"#, "first JSON");
//! let document = checked.data().expect("valid input");
//! let diffs = [DifferenceRecord::new("user.age", 30, 25)];
//!
//! let tree = render_tree(document, "", &diffs, Side::Value2);
//! let user = &tree.children.as_ref().expect("object root")[0];
//! let age = &user.children.as_ref().expect("nested object")[0];
//! assert_eq!(age.path.as_str(), "user.age");
//! assert!(age.is_different && user.is_different);
//! assert_eq!(age.display_text().as_deref(), Some("25"));
//! ```
//!
//! The optional `client` feature (enabled by default) adds a blocking HTTP
//! client for the remote comparison service that produces the difference
//! list.
mod diff;
mod kind;
mod paths;
mod render;
mod resolve;
mod validator;

#[cfg(feature = "client")]
mod client;

#[cfg(feature = "client")]
pub use client::{ClientError, CompareClient, SessionId};
pub use diff::{DiffIndex, DifferenceRecord, Primitive, Side};
pub use kind::Kind;
pub use paths::{Path, Segment};
pub use render::{render_node, render_tree, Nodes, RenderedNode};
pub use resolve::{resolve, Resolved};
pub use validator::{is_valid_json, validate, ValidationResult};
