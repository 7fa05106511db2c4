//! Error types

use windom::{NodeId, SelectorError};

/// Invalid configuration, detected before anything is mounted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("WindBox: no selector")]
    MissingSelector,

    #[error("WindBox: customTransitions must be a boolean, got {0}")]
    InvalidTransitions(String),

    #[error("WindBox: {0} selector must not be empty")]
    EmptyPartSelector(&'static str),

    #[error("WindBox: invalid configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by [`WindBox`](crate::WindBox) construction and the
/// programmatic group API.
#[derive(Debug, thiserror::Error)]
pub enum WindBoxError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("WindBox: invalid selector: {0}")]
    Selector(#[from] SelectorError),

    #[error("WindBox: no element matches {0:?}")]
    ContainerNotFound(String),

    #[error("WindBox: container already mounted: {0}")]
    AlreadyMounted(String),

    #[error("WindBox: {node} is claimed by group {group} and by another group or mount")]
    Overlapping { node: NodeId, group: usize },

    #[error("WindBox: item {item} of group {group} has no header matching {selector:?}")]
    MissingHeader {
        group: usize,
        item: usize,
        selector: String,
    },

    #[error("WindBox: item {item} of group {group} has no content matching {selector:?}")]
    MissingContent {
        group: usize,
        item: usize,
        selector: String,
    },

    #[error("WindBox: item index {index} out of range (group has {len} items)")]
    ItemOutOfRange { index: usize, len: usize },
}

impl WindBoxError {
    /// Whether this is a configuration problem (as opposed to a bad item index).
    pub fn is_config(&self) -> bool {
        !matches!(self, Self::ItemOutOfRange { .. })
    }
}
