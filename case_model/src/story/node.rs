//! Node definitions - the narrative units of a story graph.

use serde::{Deserialize, Serialize};

use super::{Choice, ChoiceId, Discoverable, NodeId};

/// One narrative unit: a scene, a recalled memory, or an analysis result.
///
/// The narration is opaque to traversal; only ids, choice targets, and
/// discoverable requirements drive behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,

    /// Display text shown when this node is presented.
    pub narration: String,

    /// Evidence revealed by visiting this node, in presentation order.
    pub discoverables: Vec<Discoverable>,

    /// Transitions available from this node, in presentation order.
    /// Empty means the node is a terminal ending in its own right.
    pub choices: Vec<Choice>,
}

impl Node {
    /// Create a new node with no discoverables or choices.
    pub fn new(id: impl Into<NodeId>, narration: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            narration: narration.into(),
            discoverables: Vec::new(),
            choices: Vec::new(),
        }
    }

    /// Add a discoverable revealed by this node.
    pub fn with_discoverable(mut self, discoverable: Discoverable) -> Self {
        self.discoverables.push(discoverable);
        self
    }

    /// Add a choice offered by this node.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Look up a choice by id.
    pub fn choice(&self, id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id.as_str() == id)
    }

    /// Check whether this node offers no way forward.
    pub fn is_dead_end(&self) -> bool {
        self.choices.is_empty()
    }

    /// Ids of the choices on this node, in presentation order.
    pub fn choice_ids(&self) -> impl Iterator<Item = &ChoiceId> {
        self.choices.iter().map(|c| &c.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::{ChoiceTarget, DiscoverableId};

    #[test]
    fn test_node_creation() {
        let node = Node::new("lobby", "The hotel lobby is deserted.");
        assert_eq!(node.id, NodeId::new("lobby"));
        assert!(node.is_dead_end());
        assert!(node.discoverables.is_empty());
    }

    #[test]
    fn test_node_builder() {
        let node = Node::new("study", "Books line every wall.")
            .with_discoverable(Discoverable::new("ledger", "Coded ledger"))
            .with_choice(Choice::new("o1", "Check the desk", ChoiceTarget::node("desk")))
            .with_choice(Choice::new("o2", "Leave", ChoiceTarget::node("hall")));

        assert!(!node.is_dead_end());
        assert_eq!(node.discoverables.len(), 1);
        assert_eq!(node.choices.len(), 2);
        assert!(node.choice("o1").is_some());
        assert!(node.choice("missing").is_none());
    }

    #[test]
    fn test_node_wire_shape() {
        let node: Node = serde_json::from_str(
            r#"{
                "id": "vault",
                "narration": "The vault door hangs open.",
                "discoverables": [
                    { "id": "drill_marks", "label": "Drill marks", "detail": "Fresh." }
                ],
                "choices": [
                    {
                        "id": "o1",
                        "label": "Step inside",
                        "target": { "Node": "vault_interior" },
                        "required_discoverables": []
                    }
                ]
            }"#,
        )
        .expect("node should deserialize");

        assert_eq!(node.id, NodeId::new("vault"));
        assert_eq!(node.discoverables[0].id, DiscoverableId::new("drill_marks"));
        assert_eq!(
            node.choices[0].target,
            ChoiceTarget::Node(NodeId::new("vault_interior"))
        );
    }
}
