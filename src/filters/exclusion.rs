//! Exclusion filtering.
//!
//! Removes disallowed leaves (service accounts, placeholder users) from a
//! forest. The predicate is caller policy — typically a name-pattern check —
//! and the engine applies it mechanically.

use crate::check_depth;
use crate::error::Result;
use crate::model::{Forest, Leaf, OrgNode};

/// Keep every leaf for which `keep` returns true; drop the rest.
///
/// A node left with zero members and zero surviving children is dropped
/// entirely, cascading bottom-up: removing leaves can remove now-empty
/// ancestors. Returns a new forest; the input is untouched.
pub fn filter<F>(forest: &Forest, keep: F) -> Result<Forest>
where
    F: Fn(&Leaf) -> bool,
{
    let mut roots = Vec::with_capacity(forest.roots.len());
    for root in &forest.roots {
        if let Some(kept) = filter_node(root, &keep, 0)? {
            roots.push(kept);
        }
    }
    Ok(Forest::new(roots))
}

fn filter_node<F>(node: &OrgNode, keep: &F, depth: usize) -> Result<Option<OrgNode>>
where
    F: Fn(&Leaf) -> bool,
{
    check_depth(depth)?;

    let members: Vec<Leaf> = node.members.iter().filter(|l| keep(l)).cloned().collect();

    let mut children = Vec::new();
    for child in &node.children {
        if let Some(kept) = filter_node(child, keep, depth + 1)? {
            children.push(kept);
        }
    }

    if members.is_empty() && children.is_empty() {
        return Ok(None);
    }

    Ok(Some(OrgNode {
        id: node.id,
        name: node.name.clone(),
        members,
        children,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrgPickError;
    use crate::model::LeafId;
    use crate::source::fixtures::{deep_forest, leaf, org, sample_forest};

    #[test]
    fn keep_all_returns_equal_forest() {
        let forest = sample_forest();
        let filtered = filter(&forest, |_| true).unwrap();
        assert_eq!(filtered, forest);
    }

    #[test]
    fn drops_leaves_failing_predicate() {
        let forest = sample_forest();
        let filtered = filter(&forest, |l| l.id != LeafId(11)).unwrap();

        let head = &filtered.roots[0];
        assert_eq!(head.members.len(), 1);
        assert_eq!(head.members[0].id, LeafId(10));
    }

    #[test]
    fn excluding_sole_leaf_cascades_into_parent_removal() {
        // Survey Team (4) holds only leaves 21 and 22. Excluding both must
        // remove the team from Planning Dept's children.
        let forest = sample_forest();
        let filtered = filter(&forest, |l| l.id != LeafId(21) && l.id != LeafId(22)).unwrap();

        let planning = &filtered.roots[0].children[0];
        assert_eq!(planning.name, "Planning Dept");
        assert!(planning.children.is_empty());
    }

    #[test]
    fn cascade_reaches_the_root() {
        let forest = Forest::new(vec![org(1, "Shell").with_children(vec![
            org(2, "Inner").with_members(vec![leaf(5, "Only Member")]),
        ])]);

        let filtered = filter(&forest, |_| false).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn node_with_surviving_child_is_kept_despite_empty_members() {
        let forest = Forest::new(vec![org(1, "Shell")
            .with_members(vec![leaf(5, "svc-bot")])
            .with_children(vec![org(2, "Inner").with_members(vec![leaf(6, "Human")])])]);

        let filtered = filter(&forest, |l| !l.name.starts_with("svc-")).unwrap();
        assert_eq!(filtered.roots.len(), 1);
        assert!(filtered.roots[0].members.is_empty());
        assert_eq!(filtered.roots[0].children[0].members[0].id, LeafId(6));
    }

    #[test]
    fn over_deep_forest_is_rejected() {
        let forest = deep_forest(crate::MAX_DEPTH + 5);
        let err = filter(&forest, |_| true).unwrap_err();
        assert!(matches!(err, OrgPickError::DepthExceeded { .. }));
    }
}
