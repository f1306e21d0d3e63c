//! Selection state for pickers.
//!
//! Owns the set of selected leaf ids and the single/multi/group toggle
//! semantics. Filters never mutate selection; selection never looks at
//! filters. Group indicators are derived on every call, never stored — a
//! cached tri-state is a stale-indicator bug waiting to happen.

use crate::check_depth;
use crate::error::Result;
use crate::model::{LeafId, OrgNode};
use std::collections::HashSet;

/// Selection cardinality policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// At most one leaf selected; selecting another replaces it.
    Single,
    /// Any number of leaves.
    Multi,
}

/// Derived tri-state for a group checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupState {
    /// No leaf under the group is selected.
    Off,
    /// Some, but not all, leaves under the group are selected.
    Indeterminate,
    /// Every leaf under the group is selected (and the group is non-empty).
    On,
}

/// Every leaf id reachable under `node`: its direct members plus every
/// descendant's members, in document order.
pub fn all_leaf_ids(node: &OrgNode) -> Result<Vec<LeafId>> {
    let mut ids = Vec::new();
    collect_leaf_ids(node, &mut ids, 0)?;
    Ok(ids)
}

fn collect_leaf_ids(node: &OrgNode, out: &mut Vec<LeafId>, depth: usize) -> Result<()> {
    check_depth(depth)?;
    out.extend(node.members.iter().map(|m| m.id));
    for child in &node.children {
        collect_leaf_ids(child, out, depth + 1)?;
    }
    Ok(())
}

/// The selection state machine.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    mode: SelectMode,
    selected: HashSet<LeafId>,
}

impl SelectionStore {
    pub fn new(mode: SelectMode, initial: &[LeafId]) -> Self {
        Self {
            mode,
            selected: initial.iter().copied().collect(),
        }
    }

    pub fn mode(&self) -> SelectMode {
        self.mode
    }

    pub fn is_selected(&self, id: LeafId) -> bool {
        self.selected.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Toggle a single leaf.
    ///
    /// Multi mode is a plain set toggle. Single mode taps-to-deselect when
    /// `id` is the sole selection; otherwise the new id replaces whatever was
    /// selected — switching never accumulates.
    pub fn toggle_leaf(&mut self, id: LeafId) {
        match self.mode {
            SelectMode::Multi => {
                if !self.selected.remove(&id) {
                    self.selected.insert(id);
                }
            }
            SelectMode::Single => {
                let was_sole = self.selected.len() == 1 && self.selected.contains(&id);
                self.selected.clear();
                if !was_sole {
                    self.selected.insert(id);
                }
            }
        }
    }

    /// Toggle every leaf under `node` as one action.
    ///
    /// If the group's leaves are a non-empty subset of the selection, they
    /// are all deselected. Otherwise they are all selected — including from a
    /// partially selected state: a partial group resolves to select-all,
    /// never to clear.
    ///
    /// Group toggles only exist on multi-select pickers; in Single mode this
    /// is a no-op.
    pub fn toggle_group(&mut self, node: &OrgNode) -> Result<()> {
        if self.mode == SelectMode::Single {
            return Ok(());
        }
        let ids = all_leaf_ids(node)?;
        let all_selected = !ids.is_empty() && ids.iter().all(|id| self.selected.contains(id));

        if all_selected {
            for id in &ids {
                self.selected.remove(id);
            }
        } else {
            self.selected.extend(ids);
        }
        Ok(())
    }

    /// Derive the tri-state indicator for `node` from the current selection.
    pub fn group_state(&self, node: &OrgNode) -> Result<GroupState> {
        let ids = all_leaf_ids(node)?;
        let selected = ids.iter().filter(|id| self.selected.contains(id)).count();

        Ok(if selected == 0 {
            GroupState::Off
        } else if selected == ids.len() {
            GroupState::On
        } else {
            GroupState::Indeterminate
        })
    }

    /// Snapshot the selection for the caller, sorted ascending so downstream
    /// serialization is deterministic. Later mutations of the store do not
    /// touch a snapshot already handed out.
    pub fn confirm(&self) -> Vec<LeafId> {
        let mut ids: Vec<LeafId> = self.selected.iter().copied().collect();
        ids.sort();
        ids
    }

    /// Discard all pending selection. The store holds no memory between
    /// mounts; the caller re-seeds from its own initial ids next time.
    pub fn cancel(&mut self) {
        self.selected.clear();
    }
}
