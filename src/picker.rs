//! The picker facade.
//!
//! Composes the whole engine for one picker mount: fetch through the
//! [`TreeSource`] seam, defensive ingest, exclusion then scope filtering once
//! at load, search visibility per query change, and selection wiring through
//! confirm/cancel. This is the only module that touches the transport.
//!
//! ## The stale-fetch race
//!
//! A picker can be closed (or reloaded) before its fetch resolves. Applying a
//! late response would resurrect dead state, so every load hands out a
//! [`LoadTicket`] carrying the current mount generation; [`Picker::complete_load`]
//! silently discards any response whose ticket no longer matches. Synchronous
//! callers just use [`Picker::load`], which does both halves back to back.

use crate::error::{OrgPickError, Result};
use crate::filters::search::SearchQuery;
use crate::filters::{exclusion, scope};
use crate::ingest;
use crate::model::{Forest, Leaf, LeafId, OrgId, OrgNode, ScopeSet};
use crate::selection::{GroupState, SelectMode, SelectionStore};
use crate::source::TreeSource;
use serde_json::Value;

/// Caller-supplied leaf policy: keep the leaf if it returns true.
pub type LeafPredicate = Box<dyn Fn(&Leaf) -> bool>;

/// Configuration handed in at mount.
pub struct PickerOptions {
    /// Multi vs. single selection. Defaults to multi.
    pub allow_multi_select: bool,
    /// Seeds the selection store.
    pub initial_selected_ids: Vec<LeafId>,
    /// Authorized units; `None` means full access.
    pub scope: Option<ScopeSet>,
    /// Exclusion policy applied once at load; `None` keeps every leaf.
    pub exclude: Option<LeafPredicate>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            allow_multi_select: true,
            initial_selected_ids: Vec::new(),
            scope: None,
            exclude: None,
        }
    }
}

impl PickerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single_select(mut self) -> Self {
        self.allow_multi_select = false;
        self
    }

    pub fn with_initial_selected(mut self, ids: Vec<LeafId>) -> Self {
        self.initial_selected_ids = ids;
        self
    }

    pub fn with_scope(mut self, scope: ScopeSet) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_exclusion<F>(mut self, keep: F) -> Self
    where
        F: Fn(&Leaf) -> bool + 'static,
    {
        self.exclude = Some(Box::new(keep));
        self
    }
}

/// Token tying a fetch response to the load that started it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

enum Phase {
    Idle,
    Loading,
    Ready(Forest),
    Failed(String),
    Closed,
}

/// A member row in the render model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberView {
    pub id: LeafId,
    pub name: String,
    pub selected: bool,
}

/// A unit row in the render model, with its search-visible members and
/// children and a freshly derived group indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeView {
    pub id: OrgId,
    pub name: String,
    /// Nesting level, for indentation.
    pub depth: usize,
    pub group_state: GroupState,
    pub members: Vec<MemberView>,
    pub children: Vec<NodeView>,
}

/// One picker mount: a forest snapshot plus its selection state.
pub struct Picker<S: TreeSource> {
    source: S,
    scope: Option<ScopeSet>,
    exclude: Option<LeafPredicate>,
    generation: u64,
    phase: Phase,
    selection: SelectionStore,
    query: SearchQuery,
}

impl<S: TreeSource> Picker<S> {
    pub fn new(source: S, options: PickerOptions) -> Self {
        let mode = if options.allow_multi_select {
            SelectMode::Multi
        } else {
            SelectMode::Single
        };
        Self {
            source,
            scope: options.scope,
            exclude: options.exclude,
            generation: 0,
            phase: Phase::Idle,
            selection: SelectionStore::new(mode, &options.initial_selected_ids),
            query: SearchQuery::default(),
        }
    }

    /// Fetch and ingest in one call, for synchronous transports.
    pub fn load(&mut self) -> Result<()> {
        let ticket = self.begin_load()?;
        let response = self.source.fetch();
        self.complete_load(ticket, response)
    }

    /// Start a load and hand out the ticket for it. Any ticket from an
    /// earlier load is invalidated.
    pub fn begin_load(&mut self) -> Result<LoadTicket> {
        self.ensure_open()?;
        self.generation += 1;
        self.phase = Phase::Loading;
        Ok(LoadTicket {
            generation: self.generation,
        })
    }

    /// Apply a fetch response to the picker.
    ///
    /// A response whose ticket no longer matches the current generation — a
    /// newer load started, or the picker closed — is discarded silently: a
    /// no-op, not an error. A live fetch failure puts the picker into the
    /// failed state (empty forest, error retained) and surfaces the error;
    /// there is no automatic retry, the caller may remount.
    pub fn complete_load(&mut self, ticket: LoadTicket, response: Result<Value>) -> Result<()> {
        if matches!(self.phase, Phase::Closed) || ticket.generation != self.generation {
            return Ok(());
        }

        let prepared = response
            .and_then(|doc| ingest::parse_forest(&doc))
            .and_then(|forest| self.prepare(forest));

        match prepared {
            Ok(forest) => {
                self.phase = Phase::Ready(forest);
                Ok(())
            }
            Err(e) => {
                self.phase = Phase::Failed(e.to_string());
                Err(e)
            }
        }
    }

    // Load-time pipeline: exclusion first, then scope. Search is per-query.
    fn prepare(&self, forest: Forest) -> Result<Forest> {
        let forest = match &self.exclude {
            Some(keep) => exclusion::filter(&forest, |leaf| keep(leaf))?,
            None => forest,
        };
        scope::filter(&forest, self.scope.as_ref())
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Ready(_))
    }

    /// The load error, if the last load failed.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    /// The loaded, exclusion- and scope-filtered forest.
    pub fn forest(&self) -> Option<&Forest> {
        match &self.phase {
            Phase::Ready(forest) => Some(forest),
            _ => None,
        }
    }

    /// Update the live search query. Cheap; visibility is recomputed by the
    /// next [`view`](Self::view) call.
    pub fn set_query(&mut self, raw: &str) {
        self.query = SearchQuery::new(raw);
    }

    /// The render model: search-visible units with their visible members,
    /// selected flags, and tri-state group indicators.
    ///
    /// Derived from scratch on every call so indicators can never go stale.
    /// Empty until a load succeeds.
    pub fn view(&self) -> Result<Vec<NodeView>> {
        let Phase::Ready(forest) = &self.phase else {
            return Ok(Vec::new());
        };

        let mut roots = Vec::new();
        for root in &forest.roots {
            if let Some(view) = self.node_view(root, 0)? {
                roots.push(view);
            }
        }
        Ok(roots)
    }

    fn node_view(&self, node: &OrgNode, depth: usize) -> Result<Option<NodeView>> {
        crate::check_depth(depth)?;

        if !self.query.is_visible(node)? {
            return Ok(None);
        }

        let members = self
            .query
            .visible_members(node)
            .into_iter()
            .map(|leaf| MemberView {
                id: leaf.id,
                name: leaf.name.clone(),
                selected: self.selection.is_selected(leaf.id),
            })
            .collect();

        let mut children = Vec::new();
        for child in &node.children {
            if let Some(view) = self.node_view(child, depth + 1)? {
                children.push(view);
            }
        }

        Ok(Some(NodeView {
            id: node.id,
            name: node.name.clone(),
            depth,
            group_state: self.selection.group_state(node)?,
            members,
            children,
        }))
    }

    pub fn toggle_leaf(&mut self, id: LeafId) -> Result<()> {
        self.ensure_open()?;
        self.selection.toggle_leaf(id);
        Ok(())
    }

    /// Toggle the whole subtree under the unit `org`.
    pub fn toggle_group(&mut self, org: OrgId) -> Result<()> {
        self.ensure_open()?;
        let Phase::Ready(forest) = &self.phase else {
            return Err(OrgPickError::UnknownOrg(org));
        };
        let node = find_node(forest, org).ok_or(OrgPickError::UnknownOrg(org))?;
        self.selection.toggle_group(node)
    }

    pub fn group_state(&self, org: OrgId) -> Result<GroupState> {
        let Phase::Ready(forest) = &self.phase else {
            return Err(OrgPickError::UnknownOrg(org));
        };
        let node = find_node(forest, org).ok_or(OrgPickError::UnknownOrg(org))?;
        self.selection.group_state(node)
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// The confirm contract: an atomic, sorted snapshot of selected leaf ids.
    /// Serializing it (comma-join, JSON array) is the caller's business.
    pub fn confirm(&self) -> Vec<LeafId> {
        self.selection.confirm()
    }

    /// Discard pending selection and close the picker. Outstanding load
    /// tickets are invalidated; late responses will be discarded.
    pub fn cancel(&mut self) {
        self.selection.cancel();
        self.close();
    }

    /// Close without touching selection, e.g. right after a confirm.
    pub fn close(&mut self) {
        self.generation += 1;
        self.phase = Phase::Closed;
    }

    fn ensure_open(&self) -> Result<()> {
        if matches!(self.phase, Phase::Closed) {
            return Err(OrgPickError::Closed);
        }
        Ok(())
    }
}

fn find_node(forest: &Forest, id: OrgId) -> Option<&OrgNode> {
    fn walk(node: &OrgNode, id: OrgId, depth: usize) -> Option<&OrgNode> {
        // Loaded forests are depth-bounded by ingest; stop quietly either way.
        if depth >= crate::MAX_DEPTH {
            return None;
        }
        if node.id == id {
            return Some(node);
        }
        node.children.iter().find_map(|c| walk(c, id, depth + 1))
    }
    forest.roots.iter().find_map(|r| walk(r, id, 0))
}
