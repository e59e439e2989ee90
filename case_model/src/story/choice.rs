//! Choice definitions - labeled transitions between story nodes.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{ChoiceId, DiscoverableId, NodeId};

/// Where a choice leads.
///
/// Endings are first-class values rather than magic node-id strings, so
/// traversal never has to pattern-match on id prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceTarget {
    /// Transition to another node in the graph.
    Node(NodeId),

    /// End the story outside the graph (e.g. the case is solved).
    Ending,
}

impl ChoiceTarget {
    /// Create a target pointing at a node.
    pub fn node(id: impl Into<NodeId>) -> Self {
        ChoiceTarget::Node(id.into())
    }

    /// Check whether this target ends the story.
    pub fn is_ending(&self) -> bool {
        matches!(self, ChoiceTarget::Ending)
    }

    /// The target node id, if this target stays inside the graph.
    pub fn node_id(&self) -> Option<&NodeId> {
        match self {
            ChoiceTarget::Node(id) => Some(id),
            ChoiceTarget::Ending => None,
        }
    }
}

/// A labeled transition offered by a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,

    /// Display text describing the action (e.g. "Question the caretaker").
    pub label: String,

    /// Where taking this choice leads.
    pub target: ChoiceTarget,

    /// Evidence that must already be discovered before this choice may be
    /// taken. Empty means unconditionally available.
    pub required_discoverables: HashSet<DiscoverableId>,
}

impl Choice {
    /// Create a new ungated choice.
    pub fn new(
        id: impl Into<ChoiceId>,
        label: impl Into<String>,
        target: ChoiceTarget,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            target,
            required_discoverables: HashSet::new(),
        }
    }

    /// Require a discoverable before this choice unlocks.
    pub fn with_requirement(mut self, id: impl Into<DiscoverableId>) -> Self {
        self.required_discoverables.insert(id.into());
        self
    }

    /// Require multiple discoverables before this choice unlocks.
    pub fn with_requirements(
        mut self,
        ids: impl IntoIterator<Item = DiscoverableId>,
    ) -> Self {
        self.required_discoverables.extend(ids);
        self
    }

    /// Check whether this choice is gated at all.
    pub fn is_gated(&self) -> bool {
        !self.required_discoverables.is_empty()
    }
}
