use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Identifier of a selectable terminal entity — a person, or in unit-picker
/// mode a unit standing in as its own leaf.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LeafId(pub u64);

/// Identifier of an organizational unit. Distinct namespace from [`LeafId`]:
/// an org id is never treated as a leaf id, even where org ids are themselves
/// selectable group identifiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OrgId(pub u64);

impl fmt::Display for LeafId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for OrgId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A selectable terminal entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    pub id: LeafId,
    pub name: String,
}

impl Leaf {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: LeafId(id),
            name: name.into(),
        }
    }
}

/// A non-terminal organizational unit owning members and child units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgNode {
    pub id: OrgId,
    pub name: String,
    #[serde(default)]
    pub members: Vec<Leaf>,
    #[serde(default)]
    pub children: Vec<OrgNode>,
}

impl OrgNode {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: OrgId(id),
            name: name.into(),
            members: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_members(mut self, members: Vec<Leaf>) -> Self {
        self.members = members;
        self
    }

    pub fn with_children(mut self, children: Vec<OrgNode>) -> Self {
        self.children = children;
        self
    }
}

/// An ordered sequence of root units. There is no single global root.
///
/// Forests are fetched once per picker mount and treated as read-only
/// thereafter; every filter produces a new forest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    pub roots: Vec<OrgNode>,
}

impl Forest {
    pub fn new(roots: Vec<OrgNode>) -> Self {
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// The set of unit ids a caller is authorized to see.
///
/// Passed as `Option<&ScopeSet>` throughout: `None` — and, equivalently, an
/// empty set — means "no restriction". Full access is the documented default
/// for callers whose role carries no scope list, not an accidental falsy-check.
pub type ScopeSet = HashSet<OrgId>;
