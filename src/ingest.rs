//! Defensive document ingestion.
//!
//! The transport hands the engine one opaque JSON document per picker mount,
//! shaped as an array of nested `{id, name, members, children}` objects.
//! Real exports carry the occasional bad record; a node or member missing its
//! id or name is skipped with a warning, and the walk continues. One bad
//! record must never abort the whole tree.

use crate::check_depth;
use crate::error::{OrgPickError, Result};
use crate::model::{Forest, Leaf, LeafId, OrgId, OrgNode};
use serde_json::Value;

/// Convert a fetched document into a [`Forest`].
///
/// Skips malformed nodes and members (logged at warn). Fails only on a
/// non-array document root or on depth beyond [`crate::MAX_DEPTH`] — the
/// latter being the symptom of a cyclic or corrupt export.
pub fn parse_forest(doc: &Value) -> Result<Forest> {
    let nodes = doc.as_array().ok_or_else(|| {
        OrgPickError::MalformedDocument("document root is not an array".to_string())
    })?;

    let mut roots = Vec::with_capacity(nodes.len());
    for value in nodes {
        if let Some(node) = parse_node(value, 0)? {
            roots.push(node);
        }
    }
    Ok(Forest::new(roots))
}

fn parse_node(value: &Value, depth: usize) -> Result<Option<OrgNode>> {
    check_depth(depth)?;

    let Some(obj) = value.as_object() else {
        log::warn!("skipping non-object tree node: {value}");
        return Ok(None);
    };

    let id = obj.get("id").and_then(Value::as_u64);
    let name = obj.get("name").and_then(Value::as_str);
    let (Some(id), Some(name)) = (id, name) else {
        log::warn!("skipping tree node without id/name");
        return Ok(None);
    };

    let mut members = Vec::new();
    if let Some(raw) = obj.get("members").and_then(Value::as_array) {
        for value in raw {
            match parse_member(value) {
                Some(member) => members.push(member),
                None => log::warn!("skipping malformed member under org {id}"),
            }
        }
    }

    let mut children = Vec::new();
    if let Some(raw) = obj.get("children").and_then(Value::as_array) {
        for value in raw {
            if let Some(child) = parse_node(value, depth + 1)? {
                children.push(child);
            }
        }
    }

    Ok(Some(OrgNode {
        id: OrgId(id),
        name: name.to_string(),
        members,
        children,
    }))
}

fn parse_member(value: &Value) -> Option<Leaf> {
    let obj = value.as_object()?;
    let id = obj.get("id")?.as_u64()?;
    let name = obj.get("name")?.as_str()?;
    Some(Leaf {
        id: LeafId(id),
        name: name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixtures::{sample_document, sample_forest};
    use serde_json::json;

    #[test]
    fn parses_nested_document() {
        let forest = parse_forest(&sample_document()).unwrap();
        assert_eq!(forest, sample_forest());
    }

    #[test]
    fn missing_members_and_children_read_as_empty() {
        let doc = json!([{ "id": 1, "name": "Bare" }]);
        let forest = parse_forest(&doc).unwrap();
        assert!(forest.roots[0].members.is_empty());
        assert!(forest.roots[0].children.is_empty());
    }

    #[test]
    fn node_without_name_is_skipped_not_fatal() {
        let doc = json!([
            { "id": 1 },
            { "id": 2, "name": "Kept" }
        ]);
        let forest = parse_forest(&doc).unwrap();
        assert_eq!(forest.roots.len(), 1);
        assert_eq!(forest.roots[0].name, "Kept");
    }

    #[test]
    fn malformed_member_is_skipped_not_fatal() {
        let doc = json!([{
            "id": 1,
            "name": "Org",
            "members": [
                { "id": 10, "name": "Good" },
                { "name": "No Id" },
                "not an object"
            ]
        }]);
        let forest = parse_forest(&doc).unwrap();
        assert_eq!(forest.roots[0].members.len(), 1);
        assert_eq!(forest.roots[0].members[0].id, LeafId(10));
    }

    #[test]
    fn malformed_child_is_skipped_but_siblings_survive() {
        let doc = json!([{
            "id": 1,
            "name": "Org",
            "children": [
                { "name": "No Id" },
                { "id": 2, "name": "Sibling" }
            ]
        }]);
        let forest = parse_forest(&doc).unwrap();
        assert_eq!(forest.roots[0].children.len(), 1);
        assert_eq!(forest.roots[0].children[0].id, OrgId(2));
    }

    #[test]
    fn non_array_root_is_an_error() {
        let doc = json!({ "id": 1, "name": "Not A Forest" });
        let err = parse_forest(&doc).unwrap_err();
        assert!(matches!(err, OrgPickError::MalformedDocument(_)));
    }

    #[test]
    fn over_deep_document_is_rejected() {
        let mut doc = json!({ "id": 0, "name": "bottom" });
        for i in 1..=crate::MAX_DEPTH + 5 {
            doc = json!({ "id": i, "name": "level", "children": [doc] });
        }
        let err = parse_forest(&json!([doc])).unwrap_err();
        assert!(matches!(err, OrgPickError::DepthExceeded { .. }));
    }
}
