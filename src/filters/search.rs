//! Live search visibility.
//!
//! Pure functions of `(node, lowercase(query))`, recomputed on every
//! keystroke. Forests are small (low hundreds to low thousands of nodes), so
//! full re-derivation per query is both correct and fast enough; no caching.

use crate::check_depth;
use crate::error::Result;
use crate::model::{Leaf, OrgNode};

/// A normalized search query.
///
/// Holds the trimmed, lowercased term; matching is case-insensitive
/// substring containment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    term: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            term: raw.trim().to_lowercase(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.term.is_empty()
    }

    /// Whether `node` should be rendered at all.
    ///
    /// Visibility propagates upward from any match: a node is visible if its
    /// own name matches, any of its members' names match, or any child is
    /// visible — so the ancestor chain to a deep match is always shown.
    pub fn is_visible(&self, node: &OrgNode) -> Result<bool> {
        self.visible_at(node, 0)
    }

    fn visible_at(&self, node: &OrgNode, depth: usize) -> Result<bool> {
        check_depth(depth)?;

        if self.term.is_empty() {
            return Ok(true);
        }
        if node.name.to_lowercase().contains(&self.term) {
            return Ok(true);
        }
        if self.matches_member(node) {
            return Ok(true);
        }
        for child in &node.children {
            if self.visible_at(child, depth + 1)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// The members of `node` to render under the current query.
    ///
    /// With a non-empty query, only members whose names match are returned.
    /// A node-name match does NOT widen this to all members: it keeps the
    /// node visible and expandable, but says nothing about which of its
    /// members are relevant. That asymmetry is intentional.
    pub fn visible_members<'a>(&self, node: &'a OrgNode) -> Vec<&'a Leaf> {
        if self.term.is_empty() {
            return node.members.iter().collect();
        }
        node.members
            .iter()
            .filter(|m| m.name.to_lowercase().contains(&self.term))
            .collect()
    }

    fn matches_member(&self, node: &OrgNode) -> bool {
        node.members
            .iter()
            .any(|m| m.name.to_lowercase().contains(&self.term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OrgPickError;
    use crate::model::{Forest, LeafId};
    use crate::source::fixtures::{deep_forest, leaf, org, sample_forest};

    #[test]
    fn empty_query_shows_everything() {
        let forest = sample_forest();
        let query = SearchQuery::new("");

        for root in &forest.roots {
            assert!(query.is_visible(root).unwrap());
        }
        assert_eq!(
            query.visible_members(&forest.roots[0]).len(),
            forest.roots[0].members.len()
        );
    }

    #[test]
    fn whitespace_query_counts_as_empty() {
        let query = SearchQuery::new("   ");
        assert!(query.is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let forest = sample_forest();
        let query = SearchQuery::new("PLANNING");
        assert!(query.is_visible(&forest.roots[0].children[0]).unwrap());
    }

    #[test]
    fn deep_member_match_keeps_ancestor_chain_visible() {
        // A > B > C, with the only match a member of C. All three nodes must
        // be visible, but only C may list the member.
        let c = org(3, "C").with_members(vec![leaf(1, "Nguyen")]);
        let b = org(2, "B").with_children(vec![c]);
        let a = org(1, "A").with_children(vec![b]);
        let forest = Forest::new(vec![a]);

        let query = SearchQuery::new("nguyen");
        let a = &forest.roots[0];
        let b = &a.children[0];
        let c = &b.children[0];

        assert!(query.is_visible(a).unwrap());
        assert!(query.is_visible(b).unwrap());
        assert!(query.is_visible(c).unwrap());

        assert!(query.visible_members(a).is_empty());
        assert!(query.visible_members(b).is_empty());

        let members = query.visible_members(c);
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, LeafId(1));
    }

    #[test]
    fn node_name_match_does_not_widen_member_list() {
        let node = org(1, "Nguyen Bureau").with_members(vec![leaf(1, "An Tran"), leaf(2, "Binh Le")]);

        let query = SearchQuery::new("nguyen");
        assert!(query.is_visible(&node).unwrap());
        // The node's own name matched; its members did not.
        assert!(query.visible_members(&node).is_empty());
    }

    #[test]
    fn non_matching_branch_is_hidden() {
        let forest = sample_forest();
        let query = SearchQuery::new("nguyen");

        // "Em Nguyen" sits under Head Office; Field Division has no match.
        assert!(query.is_visible(&forest.roots[0]).unwrap());
        assert!(!query.is_visible(&forest.roots[1]).unwrap());
    }

    #[test]
    fn over_deep_forest_is_rejected() {
        let forest = deep_forest(crate::MAX_DEPTH + 5);
        let query = SearchQuery::new("anything");
        let err = query.is_visible(&forest.roots[0]).unwrap_err();
        assert!(matches!(err, OrgPickError::DepthExceeded { .. }));
    }
}
