//! Raw wire shapes accepted by the normalizer.
//!
//! Each historical payload shape gets its own set of structs; optional
//! fields default here so the canonical model never carries optionality.
//! Unknown cosmetic fields are ignored.

use serde::Deserialize;

/// `{ "scenes": [...] }` payloads.
#[derive(Debug, Deserialize)]
pub(crate) struct ScenesPayload {
    pub scenes: Vec<RawScene>,
    #[serde(default)]
    pub start_scene_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawScene {
    pub id: String,
    #[serde(default, alias = "text")]
    pub narration: String,
    #[serde(default, alias = "discoverables")]
    pub clues: Vec<RawClue>,
    #[serde(default)]
    pub options: Vec<RawSceneOption>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawSceneOption {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub next_scene_id: String,
    #[serde(default, alias = "required_evidence")]
    pub required_clues: Vec<String>,
}

/// `{ "memories": [...] }` payloads; a bare memory object uses `RawMemory`
/// directly.
#[derive(Debug, Deserialize)]
pub(crate) struct MemoriesPayload {
    pub memories: Vec<RawMemory>,
    #[serde(default)]
    pub start_memory_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawMemory {
    pub id: String,
    #[serde(default, alias = "text")]
    pub narration: String,
    #[serde(default, alias = "clues")]
    pub revelations: Vec<RawClue>,
    #[serde(default)]
    pub decisions: Vec<RawDecision>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawDecision {
    pub id: String,
    #[serde(default)]
    pub label: String,
    pub next_memory_id: String,
    #[serde(default, alias = "required_clues")]
    pub required_evidence: Vec<String>,
}

/// Clue/revelation entries shared by the scene and memory shapes.
#[derive(Debug, Deserialize)]
pub(crate) struct RawClue {
    pub id: String,
    #[serde(default, alias = "name")]
    pub label: String,
    #[serde(default, alias = "description")]
    pub detail: String,
}

/// `{ "exhibits": [...] }` payloads. Each (exhibit, analysis) pair becomes
/// its own node behind a synthesized hub.
#[derive(Debug, Deserialize)]
pub(crate) struct ExhibitsPayload {
    pub exhibits: Vec<RawExhibit>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawExhibit {
    pub id: String,
    #[serde(default, alias = "label")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub available_analyses: Vec<RawAnalysis>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawAnalysis {
    pub id: String,
    #[serde(default, alias = "type")]
    pub analysis_type: String,
    #[serde(default)]
    pub summary: String,
}
