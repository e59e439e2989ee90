//! Story Graph - the validated node table a session traverses.
//!
//! A `StoryGraph` is immutable after construction. Every structural rule is
//! checked up front so traversal can assume totality: the start id resolves,
//! node ids are unique, choice ids are unique within their node, and every
//! non-ending choice target resolves to a node in the table.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::story::{ChoiceId, ChoiceTarget, Node, NodeId};

/// Structural violation found while building a story graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("start node {0} is not in the graph")]
    UnknownStart(NodeId),

    #[error("duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("duplicate choice id {choice} on node {node}")]
    DuplicateChoice { node: NodeId, choice: ChoiceId },

    #[error("choice {choice} on node {node} targets unknown node {target}")]
    DanglingTarget {
        node: NodeId,
        choice: ChoiceId,
        target: NodeId,
    },
}

/// An immutable table of story nodes with a designated start node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryGraph {
    nodes: HashMap<NodeId, Node>,
    start: NodeId,
}

impl StoryGraph {
    /// Build a graph from nodes and a start id, validating structure.
    pub fn new(
        nodes: impl IntoIterator<Item = Node>,
        start: impl Into<NodeId>,
    ) -> Result<Self, GraphError> {
        let start = start.into();
        let mut table: HashMap<NodeId, Node> = HashMap::new();

        for node in nodes {
            if table.contains_key(&node.id) {
                return Err(GraphError::DuplicateNode(node.id));
            }
            table.insert(node.id.clone(), node);
        }

        if !table.contains_key(&start) {
            return Err(GraphError::UnknownStart(start));
        }

        for node in table.values() {
            let mut seen: Vec<&ChoiceId> = Vec::with_capacity(node.choices.len());
            for choice in &node.choices {
                if seen.contains(&&choice.id) {
                    return Err(GraphError::DuplicateChoice {
                        node: node.id.clone(),
                        choice: choice.id.clone(),
                    });
                }
                seen.push(&choice.id);

                if let ChoiceTarget::Node(target) = &choice.target {
                    if !table.contains_key(target) {
                        return Err(GraphError::DanglingTarget {
                            node: node.id.clone(),
                            choice: choice.id.clone(),
                            target: target.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self {
            nodes: table,
            start,
        })
    }

    /// The designated start node id.
    pub fn start(&self) -> &NodeId {
        &self.start
    }

    /// Look up a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Check whether an id resolves in the table.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of nodes in the table.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterate over all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::story::Choice;

    fn two_room_nodes() -> Vec<Node> {
        vec![
            Node::new("hall", "A long hallway.")
                .with_choice(Choice::new("o1", "Enter the study", ChoiceTarget::node("study"))),
            Node::new("study", "A cramped study."),
        ]
    }

    #[test]
    fn test_valid_graph() {
        let graph = StoryGraph::new(two_room_nodes(), "hall").expect("graph should validate");
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.start(), &NodeId::new("hall"));
        assert!(graph.contains(&NodeId::new("study")));
        assert!(graph.node(&NodeId::new("hall")).is_some());
    }

    #[test]
    fn test_unknown_start() {
        let err = StoryGraph::new(two_room_nodes(), "attic").unwrap_err();
        assert_eq!(err, GraphError::UnknownStart(NodeId::new("attic")));
    }

    #[test]
    fn test_duplicate_node() {
        let nodes = vec![
            Node::new("hall", "First."),
            Node::new("hall", "Second."),
        ];
        let err = StoryGraph::new(nodes, "hall").unwrap_err();
        assert_eq!(err, GraphError::DuplicateNode(NodeId::new("hall")));
    }

    #[test]
    fn test_duplicate_choice() {
        let nodes = vec![Node::new("hall", "A hallway.")
            .with_choice(Choice::new("o1", "Left", ChoiceTarget::node("hall")))
            .with_choice(Choice::new("o1", "Right", ChoiceTarget::node("hall")))];
        let err = StoryGraph::new(nodes, "hall").unwrap_err();
        assert_eq!(
            err,
            GraphError::DuplicateChoice {
                node: NodeId::new("hall"),
                choice: ChoiceId::new("o1"),
            }
        );
    }

    #[test]
    fn test_dangling_target() {
        let nodes = vec![Node::new("hall", "A hallway.")
            .with_choice(Choice::new("o1", "Descend", ChoiceTarget::node("cellar")))];
        let err = StoryGraph::new(nodes, "hall").unwrap_err();
        assert_eq!(
            err,
            GraphError::DanglingTarget {
                node: NodeId::new("hall"),
                choice: ChoiceId::new("o1"),
                target: NodeId::new("cellar"),
            }
        );
    }

    #[test]
    fn test_ending_target_is_not_dangling() {
        let nodes = vec![Node::new("hall", "A hallway.")
            .with_choice(Choice::new("o1", "Close the case", ChoiceTarget::Ending))];
        assert!(StoryGraph::new(nodes, "hall").is_ok());
    }
}
