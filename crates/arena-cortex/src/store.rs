//! The cortex store: agent registry, episode list, visibility

use crate::episode::{new_episode_id, Episode};
use arena_events::StepTrace;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeSet;

/// Cortex-side failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CortexError {
    /// Trace arrived from an agent that never registered
    #[error("agent `{agent_id}` is not registered with the cortex")]
    UnknownAgent { agent_id: String },

    /// Trace carried no log entries
    #[error("refusing to ingest an empty trace from `{agent_id}`")]
    EmptyTrace { agent_id: String },
}

/// Which other agents' episodes an agent may see
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// Every other agent's episodes
    All,
    /// Only episodes from the named source agents
    Sources(BTreeSet<String>),
}

impl Visibility {
    /// Convenience constructor from a slice of source agent ids
    #[must_use]
    pub fn sources(ids: &[&str]) -> Self {
        Self::Sources(ids.iter().map(ToString::to_string).collect())
    }

    fn allows(&self, source: &str) -> bool {
        match self {
            Self::All => true,
            Self::Sources(set) => set.contains(source),
        }
    }
}

/// Shared-context store
///
/// Registration is keyed by agent id; re-registering replaces the
/// visibility mask. Episodes accumulate for the lifetime of a run and
/// are served in ingestion order.
#[derive(Debug, Default)]
pub struct ContextCortex {
    agents: DashMap<String, Visibility>,
    episodes: RwLock<Vec<Episode>>,
}

impl ContextCortex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent with a visibility mask
    pub fn register_agent(&self, agent_id: impl Into<String>, visibility: Visibility) {
        self.agents.insert(agent_id.into(), visibility);
    }

    /// Whether an agent is registered
    #[must_use]
    pub fn is_registered(&self, agent_id: &str) -> bool {
        self.agents.contains_key(agent_id)
    }

    /// Ingest a step trace as a new episode, returning its fresh id
    ///
    /// # Errors
    /// `UnknownAgent` when the trace's agent never registered,
    /// `EmptyTrace` when the trace carries no log entries.
    pub fn ingest(
        &self,
        trace: StepTrace,
        metadata: serde_json::Map<String, Value>,
    ) -> Result<String, CortexError> {
        if !self.is_registered(&trace.agent_id) {
            return Err(CortexError::UnknownAgent {
                agent_id: trace.agent_id,
            });
        }
        if trace.is_empty() {
            return Err(CortexError::EmptyTrace {
                agent_id: trace.agent_id,
            });
        }
        let episode_id = new_episode_id(&trace.agent_id);
        let episode = Episode::from_trace(episode_id.clone(), trace, metadata);
        tracing::debug!(
            episode_id = %episode.episode_id,
            source = %episode.source_agent_id,
            "cortex ingested episode"
        );
        self.episodes.write().push(episode);
        Ok(episode_id)
    }

    /// Episodes visible to an agent: masked by its registration and
    /// never including its own
    #[must_use]
    pub fn episodes_for_agent(&self, agent_id: &str) -> Vec<Episode> {
        let Some(visibility) = self.agents.get(agent_id) else {
            return Vec::new();
        };
        self.episodes
            .read()
            .iter()
            .filter(|ep| ep.source_agent_id != agent_id)
            .filter(|ep| visibility.allows(&ep.source_agent_id))
            .cloned()
            .collect()
    }

    /// Total episodes stored, regardless of visibility
    #[must_use]
    pub fn episode_count(&self) -> usize {
        self.episodes.read().len()
    }
}
