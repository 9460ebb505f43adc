//! Episode records stored by the cortex

use arena_events::{StepTrace, TraceEntryKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// How much of a trace entry survives into the one-line summary
const SUMMARY_MAX_LEN: usize = 240;

/// One ingested step, as other agents will see it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    /// `{agent_id}_ep_{uuid8}`, freshly generated at ingestion
    pub episode_id: String,
    /// Agent that produced the underlying step
    pub source_agent_id: String,
    /// One-line condensation served to other agents
    pub summary: String,
    /// Full trace as ingested, for inspection
    pub raw_trace: StepTrace,
    /// Free-form metadata carried through from the hook
    pub metadata: serde_json::Map<String, Value>,
}

impl Episode {
    /// Build an episode from an ingested trace, condensing it to a
    /// summary line
    #[must_use]
    pub fn from_trace(
        episode_id: impl Into<String>,
        trace: StepTrace,
        metadata: serde_json::Map<String, Value>,
    ) -> Self {
        Self {
            episode_id: episode_id.into(),
            source_agent_id: trace.agent_id.clone(),
            summary: summarize(&trace),
            raw_trace: trace,
            metadata,
        }
    }
}

/// Generate a fresh episode id for an agent
#[must_use]
pub fn new_episode_id(agent_id: &str) -> String {
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{agent_id}_ep_{}", &uuid[..8])
}

/// Condense a trace into its most informative line: the final answer if
/// the step produced one, otherwise the last entry of any kind
fn summarize(trace: &StepTrace) -> String {
    let best = trace
        .logs
        .iter()
        .rev()
        .find(|e| e.kind == TraceEntryKind::Answer)
        .or_else(|| trace.logs.last());
    match best {
        Some(entry) => truncate(&entry.content, SUMMARY_MAX_LEN),
        None => String::new(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &s[..cut])
}
