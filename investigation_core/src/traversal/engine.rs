//! The story graph engine: position, history, and discovered evidence.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, trace};

use case_model::{Choice, ChoiceId, ChoiceTarget, DiscoverableId, Node, NodeId, StoryGraph};

/// Error type for traversal operations.
///
/// Every variant is recoverable: the engine remains in its pre-call state
/// and stays usable after any of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    #[error("no choice {choice} on node {node}")]
    UnknownChoice { node: NodeId, choice: String },

    #[error(
        "choice {choice} requires undiscovered evidence: {}",
        .missing.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
    )]
    PrerequisiteNotMet {
        choice: ChoiceId,
        /// The required discoverables still missing, sorted by id.
        missing: Vec<DiscoverableId>,
    },

    #[error("already at the start of the story")]
    NoHistory,

    #[error("the story has ended; reset to continue")]
    Ended,
}

/// Where a session currently stands.
///
/// The ended state is terminal: only [`StoryGraphEngine::reset`] leaves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum Position {
    At(NodeId),
    Ended,
}

/// Read-only view of the engine's current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor<'a> {
    /// The session is presenting this node.
    Node(&'a Node),
    /// The story ended outside the graph (e.g. the case was solved).
    Ended,
}

impl<'a> Cursor<'a> {
    /// The presented node, if the session is still active.
    pub fn node(&self) -> Option<&'a Node> {
        match *self {
            Cursor::Node(node) => Some(node),
            Cursor::Ended => None,
        }
    }

    /// Check whether the story has ended.
    pub fn is_ended(&self) -> bool {
        matches!(self, Cursor::Ended)
    }
}

/// Interactive walker over a validated [`StoryGraph`].
///
/// The engine owns all mutable session state: the current position, the
/// history stack for backtracking, and the set of discovered evidence.
/// Discovery is monotonic: visiting a node reveals its discoverables both
/// on arrival and on departure, and backtracking never forgets them.
///
/// One engine instance serves one session and is not meant for concurrent
/// mutation; callers sharing an instance across threads must serialize
/// access themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryGraphEngine {
    graph: StoryGraph,
    position: Position,
    history: Vec<NodeId>,
    discovered: HashSet<DiscoverableId>,
}

impl StoryGraphEngine {
    /// Start a session at the graph's start node.
    ///
    /// The start node's discoverables are revealed immediately.
    pub fn new(graph: StoryGraph) -> Self {
        let start = graph.start().clone();
        let mut engine = Self {
            graph,
            position: Position::At(start.clone()),
            history: vec![start.clone()],
            discovered: HashSet::new(),
        };
        engine.reveal_at(&start);
        debug!(start = %start, "story session started");
        engine
    }

    /// The underlying node table.
    pub fn graph(&self) -> &StoryGraph {
        &self.graph
    }

    /// The current position as a read-only cursor.
    pub fn current(&self) -> Cursor<'_> {
        match self.current_node() {
            Some(node) => Cursor::Node(node),
            None => Cursor::Ended,
        }
    }

    /// The node currently presented, or `None` once the story has ended.
    pub fn current_node(&self) -> Option<&Node> {
        match &self.position {
            Position::At(id) => self.graph.node(id),
            Position::Ended => None,
        }
    }

    /// Take a choice on the current node.
    ///
    /// On success the departed node's discoverables are merged into the
    /// discovered set, then either the story ends (`Cursor::Ended`) or the
    /// engine moves to the target node, appends it to history, and merges
    /// its discoverables as well. On any error the session is unchanged.
    pub fn choose(&mut self, choice_id: &str) -> Result<Cursor<'_>, TraversalError> {
        let Some(node) = self.current_node() else {
            return Err(TraversalError::Ended);
        };
        let node_id = node.id.clone();

        let Some(choice) = node.choice(choice_id) else {
            return Err(TraversalError::UnknownChoice {
                node: node_id,
                choice: choice_id.to_string(),
            });
        };

        let missing = self.missing_requirements(choice);
        if !missing.is_empty() {
            return Err(TraversalError::PrerequisiteNotMet {
                choice: choice.id.clone(),
                missing,
            });
        }

        let taken = choice.id.clone();
        let target = choice.target.clone();

        // Acting on a node reveals its evidence before we leave it.
        self.reveal_at(&node_id);

        match target {
            ChoiceTarget::Ending => {
                self.position = Position::Ended;
                debug!(node = %node_id, choice = %taken, "story ended");
                Ok(Cursor::Ended)
            }
            ChoiceTarget::Node(next) => {
                self.history.push(next.clone());
                self.position = Position::At(next.clone());
                self.reveal_at(&next);
                debug!(from = %node_id, to = %next, choice = %taken, "moved");
                Ok(self.current())
            }
        }
    }

    /// Step back to the previously visited node.
    ///
    /// Discovered evidence is kept: backtracking never forgets. Fails with
    /// [`TraversalError::NoHistory`] at the start node and with
    /// [`TraversalError::Ended`] once the story has ended (only `reset`
    /// leaves the ended state).
    pub fn back(&mut self) -> Result<Cursor<'_>, TraversalError> {
        if matches!(self.position, Position::Ended) {
            return Err(TraversalError::Ended);
        }
        if self.history.len() <= 1 {
            return Err(TraversalError::NoHistory);
        }

        self.history.pop();
        let previous = match self.history.last() {
            Some(id) => id.clone(),
            None => return Err(TraversalError::NoHistory),
        };
        self.position = Position::At(previous.clone());
        debug!(to = %previous, "stepped back");
        Ok(self.current())
    }

    /// The set of discovered evidence ids so far.
    pub fn discovered(&self) -> &HashSet<DiscoverableId> {
        &self.discovered
    }

    /// Check whether a specific discoverable has been found.
    pub fn has_discovered(&self, id: &str) -> bool {
        self.discovered.iter().any(|d| d.as_str() == id)
    }

    /// The visited node ids, oldest first. Never empty while active.
    pub fn history(&self) -> &[NodeId] {
        &self.history
    }

    /// True once the session can go no further forward: either the story
    /// ended, or the current node offers no choices.
    pub fn is_terminal(&self) -> bool {
        match self.current_node() {
            Some(node) => node.is_dead_end(),
            None => true,
        }
    }

    /// True once a choice targeting an ending has been taken.
    pub fn is_ended(&self) -> bool {
        matches!(self.position, Position::Ended)
    }

    /// The current node's choices whose requirements are already met.
    pub fn unlocked_choices(&self) -> Vec<&Choice> {
        match self.current_node() {
            Some(node) => node
                .choices
                .iter()
                .filter(|c| self.missing_requirements(c).is_empty())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Required discoverables of a choice not yet discovered, sorted by id.
    pub fn missing_requirements(&self, choice: &Choice) -> Vec<DiscoverableId> {
        let mut missing: Vec<DiscoverableId> = choice
            .required_discoverables
            .iter()
            .filter(|id| !self.discovered.contains(*id))
            .cloned()
            .collect();
        missing.sort();
        missing
    }

    /// Return the session to its just-constructed state: back at the start
    /// node, history reduced to the start, and only the start node's
    /// discoverables revealed.
    pub fn reset(&mut self) {
        let start = self.graph.start().clone();
        self.position = Position::At(start.clone());
        self.history.clear();
        self.history.push(start.clone());
        self.discovered.clear();
        self.reveal_at(&start);
        debug!(start = %start, "session reset");
    }

    /// Merge a node's discoverables into the discovered set.
    fn reveal_at(&mut self, id: &NodeId) {
        let Some(node) = self.graph.node(id) else {
            return;
        };
        for discoverable in &node.discoverables {
            if self.discovered.insert(discoverable.id.clone()) {
                trace!(node = %id, evidence = %discoverable.id, "evidence discovered");
            }
        }
    }
}
