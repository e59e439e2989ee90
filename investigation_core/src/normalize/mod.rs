//! Payload normalization - from raw story payloads to a validated graph.
//!
//! Case content has shipped in several incompatible JSON shapes over time:
//! scene lists, memory lists, bare single-memory objects, and exhibit
//! catalogs whose analyses must be exploded into nodes of their own. All of
//! them convert here into one canonical [`StoryGraph`]; new shapes are added
//! as new cases in this module, never as branches inside the traversal
//! engine.
//!
//! Normalization is purely structural. It resolves every optional field,
//! maps raw ending markers onto [`ChoiceTarget::Ending`], and never silently
//! drops an option or a discoverable.

mod payload;

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use case_model::{
    Choice, ChoiceTarget, Discoverable, DiscoverableId, GraphError, Node, StoryGraph,
};

use payload::{
    ExhibitsPayload, MemoriesPayload, RawClue, RawMemory, RawScene, ScenesPayload,
};

/// Which raw shape a payload carries.
///
/// Callers pass one only when structural probing would be ambiguous, e.g. a
/// bare memory object that lacks the fields probing keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadHint {
    Scenes,
    Memories,
    SingleMemory,
    Exhibits,
}

impl PayloadHint {
    /// Short name used in errors and logs.
    pub fn name(&self) -> &'static str {
        match self {
            PayloadHint::Scenes => "scenes",
            PayloadHint::Memories => "memories",
            PayloadHint::SingleMemory => "memory",
            PayloadHint::Exhibits => "exhibits",
        }
    }
}

/// Error type for payload normalization.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("payload matches no recognized story shape")]
    UnrecognizedShape,

    #[error("malformed {variant} payload: {source}")]
    Payload {
        variant: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{variant} payload contains no story nodes")]
    EmptyStory { variant: &'static str },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Knobs for normalization.
///
/// The defaults match the vocabulary the case content actually uses; the
/// lists exist so new content can extend them without touching the engine.
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Raw target ids that mean "the story ends here".
    pub ending_markers: Vec<String>,

    /// Raw target id prefixes with the same meaning.
    pub ending_prefixes: Vec<String>,

    /// Id given to the hub node synthesized for exhibit payloads.
    pub hub_node_id: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            ending_markers: vec!["case_solved".to_string(), "case_closed".to_string()],
            ending_prefixes: vec!["ending_".to_string()],
            hub_node_id: "evidence_hub".to_string(),
        }
    }
}

impl NormalizeOptions {
    /// Check whether a raw target id denotes an ending.
    pub fn is_ending(&self, target: &str) -> bool {
        self.ending_markers.iter().any(|marker| marker == target)
            || self
                .ending_prefixes
                .iter()
                .any(|prefix| target.starts_with(prefix.as_str()))
    }

    fn target(&self, raw: &str) -> ChoiceTarget {
        if self.is_ending(raw) {
            ChoiceTarget::Ending
        } else {
            ChoiceTarget::node(raw)
        }
    }
}

/// Normalize a payload with shape auto-detection and default options.
pub fn normalize(payload: Value) -> Result<StoryGraph, NormalizeError> {
    normalize_with(payload, None, &NormalizeOptions::default())
}

/// Normalize a payload, optionally forcing the shape via a hint.
pub fn normalize_with(
    payload: Value,
    hint: Option<PayloadHint>,
    options: &NormalizeOptions,
) -> Result<StoryGraph, NormalizeError> {
    let variant = match hint {
        Some(variant) => variant,
        None => detect(&payload).ok_or(NormalizeError::UnrecognizedShape)?,
    };
    debug!(variant = variant.name(), "normalizing payload");

    match variant {
        PayloadHint::Scenes => scenes(payload, options),
        PayloadHint::Memories => memories(payload, options),
        PayloadHint::SingleMemory => single_memory(payload, options),
        PayloadHint::Exhibits => exhibits(payload, options),
    }
}

/// Structural probing: keyed on which top-level collection is present, with
/// the bare-memory shape recognized by its `decisions` field.
fn detect(payload: &Value) -> Option<PayloadHint> {
    let object = payload.as_object()?;
    if object.get("scenes").is_some_and(Value::is_array) {
        return Some(PayloadHint::Scenes);
    }
    if object.get("memories").is_some_and(Value::is_array) {
        return Some(PayloadHint::Memories);
    }
    if object.get("exhibits").is_some_and(Value::is_array) {
        return Some(PayloadHint::Exhibits);
    }
    if object.contains_key("decisions") {
        return Some(PayloadHint::SingleMemory);
    }
    None
}

fn decode<T: serde::de::DeserializeOwned>(
    payload: Value,
    variant: PayloadHint,
) -> Result<T, NormalizeError> {
    serde_json::from_value(payload).map_err(|source| NormalizeError::Payload {
        variant: variant.name(),
        source,
    })
}

fn scenes(payload: Value, options: &NormalizeOptions) -> Result<StoryGraph, NormalizeError> {
    let raw: ScenesPayload = decode(payload, PayloadHint::Scenes)?;
    let Some(first) = raw.scenes.first() else {
        return Err(NormalizeError::EmptyStory {
            variant: PayloadHint::Scenes.name(),
        });
    };
    let start = raw.start_scene_id.clone().unwrap_or_else(|| first.id.clone());

    let nodes: Vec<Node> = raw
        .scenes
        .into_iter()
        .map(|scene| scene_node(scene, options))
        .collect();
    Ok(StoryGraph::new(nodes, start)?)
}

fn scene_node(scene: RawScene, options: &NormalizeOptions) -> Node {
    let mut node = Node::new(scene.id, scene.narration);
    for clue in scene.clues {
        node = node.with_discoverable(clue_discoverable(clue));
    }
    for option in scene.options {
        node = node.with_choice(
            Choice::new(option.id, option.label, options.target(&option.next_scene_id))
                .with_requirements(option.required_clues.into_iter().map(DiscoverableId::from)),
        );
    }
    node
}

fn memories(payload: Value, options: &NormalizeOptions) -> Result<StoryGraph, NormalizeError> {
    let raw: MemoriesPayload = decode(payload, PayloadHint::Memories)?;
    let Some(first) = raw.memories.first() else {
        return Err(NormalizeError::EmptyStory {
            variant: PayloadHint::Memories.name(),
        });
    };
    let start = raw
        .start_memory_id
        .clone()
        .unwrap_or_else(|| first.id.clone());

    let nodes: Vec<Node> = raw
        .memories
        .into_iter()
        .map(|memory| memory_node(memory, options))
        .collect();
    Ok(StoryGraph::new(nodes, start)?)
}

/// A bare memory object instead of a `memories` array: wrap it as a
/// one-element story.
fn single_memory(
    payload: Value,
    options: &NormalizeOptions,
) -> Result<StoryGraph, NormalizeError> {
    let raw: RawMemory = decode(payload, PayloadHint::SingleMemory)?;
    let start = raw.id.clone();
    Ok(StoryGraph::new([memory_node(raw, options)], start)?)
}

fn memory_node(memory: RawMemory, options: &NormalizeOptions) -> Node {
    let mut node = Node::new(memory.id, memory.narration);
    for revelation in memory.revelations {
        node = node.with_discoverable(clue_discoverable(revelation));
    }
    for decision in memory.decisions {
        node = node.with_choice(
            Choice::new(
                decision.id,
                decision.label,
                options.target(&decision.next_memory_id),
            )
            .with_requirements(
                decision
                    .required_evidence
                    .into_iter()
                    .map(DiscoverableId::from),
            ),
        );
    }
    node
}

/// Explode an exhibit catalog: one node per (exhibit, analysis) pair plus a
/// hub node whose choices enumerate every pair. The hub is the start node.
fn exhibits(payload: Value, options: &NormalizeOptions) -> Result<StoryGraph, NormalizeError> {
    let raw: ExhibitsPayload = decode(payload, PayloadHint::Exhibits)?;
    if raw.exhibits.is_empty() {
        return Err(NormalizeError::EmptyStory {
            variant: PayloadHint::Exhibits.name(),
        });
    }

    let hub_id = options.hub_node_id.clone();
    let mut nodes = Vec::new();
    let mut hub_choices = Vec::new();
    let mut flavor = Vec::new();

    for exhibit in raw.exhibits {
        let name = if exhibit.name.is_empty() {
            exhibit.id.clone()
        } else {
            exhibit.name.clone()
        };
        if exhibit.description.is_empty() {
            flavor.push(name.clone());
        } else {
            flavor.push(format!("{} ({})", name, exhibit.description));
        }

        for analysis in exhibit.available_analyses {
            let analysis_id = analysis.id;
            let node_id = format!("scene_{}", analysis_id);

            let finding = Discoverable::new(
                analysis_id.clone(),
                format!("{}: {}", name, analysis.analysis_type),
            )
            .with_detail(analysis.summary.clone());

            nodes.push(
                Node::new(node_id.clone(), analysis.summary)
                    .with_discoverable(finding)
                    .with_choice(Choice::new(
                        "return_to_hub",
                        "Return to the evidence room",
                        ChoiceTarget::node(hub_id.clone()),
                    )),
            );

            hub_choices.push(Choice::new(
                format!("view_{}", analysis_id),
                format!("Examine {}: {}", name, analysis.analysis_type),
                ChoiceTarget::node(node_id),
            ));
        }
    }

    let mut hub = Node::new(
        hub_id.clone(),
        format!("Evidence laid out for review: {}.", flavor.join(", ")),
    );
    for choice in hub_choices {
        hub = hub.with_choice(choice);
    }
    nodes.push(hub);

    Ok(StoryGraph::new(nodes, hub_id)?)
}

fn clue_discoverable(clue: RawClue) -> Discoverable {
    Discoverable::new(clue.id, clue.label).with_detail(clue.detail)
}
