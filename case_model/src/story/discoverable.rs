//! Discoverable definitions - evidence and insights revealed by visiting nodes.

use serde::{Deserialize, Serialize};

use super::DiscoverableId;

/// A unit of revealed evidence or insight.
///
/// Discoverables are identified and de-duplicated by id; `label` and
/// `detail` are opaque display strings that traversal never inspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discoverable {
    pub id: DiscoverableId,

    /// Short display name (e.g. "Partial fingerprint").
    pub label: String,

    /// Longer display text shown in the evidence log.
    pub detail: String,
}

impl Discoverable {
    /// Create a new discoverable with the given id and label.
    pub fn new(id: impl Into<DiscoverableId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            detail: String::new(),
        }
    }

    /// Set the detail text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }
}
