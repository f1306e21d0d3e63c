//! # Orgpick Architecture
//!
//! Orgpick is a **UI-agnostic picker engine**. It implements the one piece of
//! an organizational workflow app that is worth implementing once instead of
//! per screen: a hierarchical, scope-filtered, multi-select tree over orgs and
//! their members, with live search and tri-state group selection.
//!
//! The same engine backs every picker variant — attendee selection, unit
//! selection, filter-by-unit — parameterized by exclusion predicate, scope
//! set, and select mode, rather than re-deriving the logic per screen.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Picker (picker.rs)                                         │
//! │  - Facade: load pipeline, query state, confirm/cancel       │
//! │  - The ONLY layer touching the fetch seam                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Filters (filters/*) + Selection (selection.rs)             │
//! │  - Pure transforms over forests; filters never touch        │
//! │    selection, selection never touches filters               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model (model.rs) + Ingest (ingest.rs)                      │
//! │  - Immutable tree shape; defensive JSON → Forest            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Source (source.rs)                                         │
//! │  - Abstract TreeSource trait                                │
//! │  - StaticSource (in-memory), caller-provided transports     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! The engine:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<T>`)
//! - **Never** performs network fetches itself (the [`source::TreeSource`]
//!   trait is the seam; callers implement it over their HTTP client)
//! - **Never** prints; diagnostics go through the `log` facade
//!
//! The same core can sit behind a mobile UI, a TUI, or a web handler.
//!
//! ## Lifecycle
//!
//! One forest snapshot per picker mount: fetch once, ingest defensively, apply
//! exclusion and scope filtering once, then recompute search visibility per
//! keystroke and selection indicators per render. Confirm hands back an atomic
//! id snapshot; cancel discards everything. Nothing persists across mounts.
//!
//! ## Module Overview
//!
//! - [`picker`]: The facade — entry point for callers
//! - [`filters`]: Exclusion, scope, and search transforms
//! - [`selection`]: Selection state machine and group semantics
//! - [`ingest`]: Defensive document ingestion
//! - [`model`]: Core data types (`Forest`, `OrgNode`, `Leaf`, ids)
//! - [`source`]: Fetch seam and in-memory implementations
//! - [`error`]: Error types

pub mod error;
pub mod filters;
pub mod ingest;
pub mod model;
pub mod picker;
pub mod selection;
pub mod source;

/// Upper bound on tree depth for every recursive traversal in the crate.
///
/// Source data is declared acyclic, but a cyclic or absurdly deep document
/// must fail loudly instead of recursing forever. Real org charts top out
/// around a dozen levels; 64 leaves generous headroom.
pub const MAX_DEPTH: usize = 64;

pub(crate) fn check_depth(depth: usize) -> error::Result<()> {
    if depth >= MAX_DEPTH {
        return Err(error::OrgPickError::DepthExceeded { limit: MAX_DEPTH });
    }
    Ok(())
}
