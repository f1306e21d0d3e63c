//! # Fetch Seam
//!
//! This module defines the transport abstraction for pickers. The
//! [`TreeSource`] trait is the only place the engine meets the network.
//!
//! ## Design Rationale
//!
//! The fetch is abstracted behind a trait to:
//! - Enable **testing** with [`StaticSource`] (no network needed)
//! - Let callers bring **any transport** (HTTP client, cache, bundled data)
//!   without changing core logic
//! - Keep the engine **synchronous**: async callers fetch on their own
//!   runtime and hand the response to
//!   [`Picker::complete_load`](crate::picker::Picker::complete_load)
//!
//! One fetch per picker mount. No retry policy lives here; a failed fetch
//! surfaces to the caller, which may remount to retry.

use crate::error::Result;
use serde_json::Value;

/// Where a picker gets its tree document.
///
/// The document is opaque JSON in the wire shape
/// `[{id, name, members: [{id, name}], children: [...]}, ...]`; the engine
/// validates and ingests it but never fetches it itself.
pub trait TreeSource {
    /// Fetch the tree document. Called once per load.
    fn fetch(&self) -> Result<Value>;
}

/// A source backed by an in-memory document.
///
/// For tests, demos, and callers that already hold the response. Does NOT
/// perform I/O.
#[derive(Debug, Clone)]
pub struct StaticSource {
    doc: Value,
}

impl StaticSource {
    pub fn new(doc: Value) -> Self {
        Self { doc }
    }
}

impl TreeSource for StaticSource {
    fn fetch(&self) -> Result<Value> {
        Ok(self.doc.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::error::OrgPickError;
    use crate::model::{Leaf, OrgNode};

    /// A source that always fails, for exercising the fetch-error path.
    pub struct FailingSource {
        pub message: String,
    }

    impl FailingSource {
        pub fn new(message: impl Into<String>) -> Self {
            Self {
                message: message.into(),
            }
        }
    }

    impl TreeSource for FailingSource {
        fn fetch(&self) -> Result<Value> {
            Err(OrgPickError::Fetch(self.message.clone()))
        }
    }

    pub fn leaf(id: u64, name: &str) -> Leaf {
        Leaf::new(id, name)
    }

    pub fn org(id: u64, name: &str) -> OrgNode {
        OrgNode::new(id, name)
    }

    /// A small two-root org chart used across the unit tests:
    ///
    /// ```text
    /// Head Office (1)        Field Division (2)
    /// ├── members: 10, 11    └── members: 30
    /// └── Planning Dept (3)
    ///     ├── members: 20
    ///     └── Survey Team (4)
    ///         └── members: 21, 22
    /// ```
    pub fn sample_forest() -> crate::model::Forest {
        crate::model::Forest::new(vec![
            org(1, "Head Office")
                .with_members(vec![leaf(10, "An Tran"), leaf(11, "Binh Le")])
                .with_children(vec![org(3, "Planning Dept")
                    .with_members(vec![leaf(20, "Chi Pham")])
                    .with_children(vec![org(4, "Survey Team")
                        .with_members(vec![leaf(21, "Dung Vo"), leaf(22, "Em Nguyen")])])]),
            org(2, "Field Division").with_members(vec![leaf(30, "Giang Ho")]),
        ])
    }

    /// The same chart in wire shape, as a transport would deliver it.
    pub fn sample_document() -> Value {
        serde_json::json!([
            {
                "id": 1,
                "name": "Head Office",
                "members": [
                    { "id": 10, "name": "An Tran" },
                    { "id": 11, "name": "Binh Le" }
                ],
                "children": [
                    {
                        "id": 3,
                        "name": "Planning Dept",
                        "members": [{ "id": 20, "name": "Chi Pham" }],
                        "children": [
                            {
                                "id": 4,
                                "name": "Survey Team",
                                "members": [
                                    { "id": 21, "name": "Dung Vo" },
                                    { "id": 22, "name": "Em Nguyen" }
                                ]
                            }
                        ]
                    }
                ]
            },
            {
                "id": 2,
                "name": "Field Division",
                "members": [{ "id": 30, "name": "Giang Ho" }]
            }
        ])
    }

    /// A parent-chain of nested orgs `levels` deep, for depth-guard tests.
    pub fn deep_forest(levels: usize) -> crate::model::Forest {
        let mut node = org(levels as u64, "level").with_members(vec![leaf(1, "Bottom")]);
        for i in (0..levels.saturating_sub(1)).rev() {
            node = org(i as u64, "level").with_children(vec![node]);
        }
        crate::model::Forest::new(vec![node])
    }
}
