//! Access-scope pruning.
//!
//! Restricts a forest to the units a caller is authorized to see. A unit in
//! scope grants full visibility of everything under it; ancestors of an
//! authorized unit survive only as structural path nodes, stripped of their
//! own members so that people in unauthorized units never leak through.

use crate::check_depth;
use crate::error::Result;
use crate::model::{Forest, OrgNode, ScopeSet};

/// Prune `forest` to the units in `scope`.
///
/// `None` — and an empty set — means no restriction: the forest is returned
/// unchanged. That is the documented full-access default, not a falsy-check.
pub fn filter(forest: &Forest, scope: Option<&ScopeSet>) -> Result<Forest> {
    let scope = match scope {
        Some(s) if !s.is_empty() => s,
        _ => return Ok(forest.clone()),
    };

    let mut roots = Vec::new();
    for root in &forest.roots {
        if let Some(kept) = filter_node(root, scope, 0)? {
            roots.push(kept);
        }
    }
    Ok(Forest::new(roots))
}

fn filter_node(node: &OrgNode, scope: &ScopeSet, depth: usize) -> Result<Option<OrgNode>> {
    check_depth(depth)?;

    // An authorized unit keeps its entire subtree unmodified.
    if scope.contains(&node.id) {
        return Ok(Some(node.clone()));
    }

    let mut children = Vec::new();
    for child in &node.children {
        if let Some(kept) = filter_node(child, scope, depth + 1)? {
            children.push(kept);
        }
    }

    if children.is_empty() {
        return Ok(None);
    }

    // Path node only: it exists to preserve hierarchy context down to an
    // authorized descendant. Its own members belong to an unauthorized unit.
    Ok(Some(OrgNode {
        id: node.id,
        name: node.name.clone(),
        members: Vec::new(),
        children,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrgPickError;
    use crate::model::OrgId;
    use crate::source::fixtures::{deep_forest, sample_forest};
    use std::collections::HashSet;

    fn scope_of(ids: &[u64]) -> ScopeSet {
        ids.iter().copied().map(OrgId).collect()
    }

    #[test]
    fn none_scope_is_full_access() {
        let forest = sample_forest();
        assert_eq!(filter(&forest, None).unwrap(), forest);
    }

    #[test]
    fn empty_scope_is_full_access() {
        let forest = sample_forest();
        let empty = HashSet::new();
        assert_eq!(filter(&forest, Some(&empty)).unwrap(), forest);
    }

    #[test]
    fn in_scope_root_keeps_whole_subtree() {
        let forest = sample_forest();
        let scoped = filter(&forest, Some(&scope_of(&[1]))).unwrap();

        assert_eq!(scoped.roots.len(), 1);
        assert_eq!(scoped.roots[0], forest.roots[0]);
    }

    #[test]
    fn ancestor_of_authorized_unit_survives_without_members() {
        // Scope covers only Survey Team (4). Head Office and Planning Dept
        // must still appear — stripped of members — purely to preserve the
        // hierarchy down to the authorized unit.
        let forest = sample_forest();
        let scoped = filter(&forest, Some(&scope_of(&[4]))).unwrap();

        assert_eq!(scoped.roots.len(), 1);
        let head = &scoped.roots[0];
        assert_eq!(head.id, OrgId(1));
        assert!(head.members.is_empty());

        let planning = &head.children[0];
        assert_eq!(planning.id, OrgId(3));
        assert!(planning.members.is_empty());

        let survey = &planning.children[0];
        assert_eq!(survey.id, OrgId(4));
        assert_eq!(survey.members.len(), 2);
    }

    #[test]
    fn unrelated_roots_are_dropped() {
        let forest = sample_forest();
        let scoped = filter(&forest, Some(&scope_of(&[4]))).unwrap();
        assert!(scoped.roots.iter().all(|r| r.id != OrgId(2)));
    }

    #[test]
    fn idempotent_under_same_scope() {
        let forest = sample_forest();
        let scope = scope_of(&[3]);
        let once = filter(&forest, Some(&scope)).unwrap();
        let twice = filter(&once, Some(&scope)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn over_deep_forest_is_rejected() {
        let forest = deep_forest(crate::MAX_DEPTH + 5);
        let scope = scope_of(&[9999]);
        let err = filter(&forest, Some(&scope)).unwrap_err();
        assert!(matches!(err, OrgPickError::DepthExceeded { .. }));
    }
}
