//! Forest transforms.
//!
//! Three independent, side-effect-free filters over a [`Forest`](crate::model::Forest):
//!
//! - [`exclusion`]: drop leaves failing a caller predicate, collapsing
//!   branches that end up empty
//! - [`scope`]: prune to an authorized scope set, keeping member-emptied path
//!   nodes down to authorized descendants
//! - [`search`]: per-node visibility against a live query
//!
//! Exclusion and scope run once at load; search is recomputed per keystroke.
//! None of them touch selection state.

pub mod exclusion;
pub mod scope;
pub mod search;
