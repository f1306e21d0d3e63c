use crate::model::OrgId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrgPickError {
    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Malformed tree document: {0}")]
    MalformedDocument(String),

    #[error("Tree depth exceeds limit of {limit}; input is cyclic or corrupt")]
    DepthExceeded { limit: usize },

    #[error("Unknown organization: {0}")]
    UnknownOrg(OrgId),

    #[error("Picker is closed")]
    Closed,
}

pub type Result<T> = std::result::Result<T, OrgPickError>;
