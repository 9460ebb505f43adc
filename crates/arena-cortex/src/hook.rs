//! Post-step ingestion hook
//!
//! Each agent keeps a [`StepHook`] alongside its running trace buffer.
//! After every step the hook packages the entries appended since the
//! last ingestion and hands them to the cortex. The hand-off is
//! fire-and-forget: a rejected ingest is logged and the entries are
//! dropped, never failing the step.

use crate::store::ContextCortex;
use arena_events::{StepTrace, TraceEntry};
use serde_json::Value;

/// Per-agent trace buffer with an ingestion watermark
#[derive(Debug)]
pub struct StepHook {
    agent_id: String,
    entries: Vec<TraceEntry>,
    /// Index of the first entry not yet handed to the cortex
    last_ingested: usize,
    step: u64,
}

impl StepHook {
    #[must_use]
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            entries: Vec::new(),
            last_ingested: 0,
            step: 0,
        }
    }

    /// Buffer one trace entry produced during the current step
    pub fn record(&mut self, entry: TraceEntry) {
        self.entries.push(entry);
    }

    /// Entries buffered but not yet ingested
    #[must_use]
    pub fn pending(&self) -> &[TraceEntry] {
        &self.entries[self.last_ingested..]
    }

    /// Ingest everything appended since the last ingestion
    ///
    /// Returns the new episode id when the cortex accepted the trace.
    /// The watermark advances either way: rejected entries are dropped,
    /// not retried.
    pub fn post_step(&mut self, cortex: &ContextCortex) -> Option<String> {
        self.step += 1;
        let pending = self.pending();
        if pending.is_empty() {
            return None;
        }

        let mut trace = StepTrace::new(self.agent_id.clone())
            .with_metadata("step", Value::from(self.step));
        for entry in pending {
            trace = trace.with_entry(entry.clone());
        }
        self.last_ingested = self.entries.len();

        match cortex.ingest(trace, serde_json::Map::new()) {
            Ok(episode_id) => Some(episode_id),
            Err(err) => {
                tracing::warn!(agent_id = %self.agent_id, %err, "cortex ingestion dropped");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Visibility;
    use arena_events::TraceEntryKind;
    use pretty_assertions::assert_eq;

    fn entry(content: &str, ts: f64) -> TraceEntry {
        TraceEntry::new(TraceEntryKind::ToolCall, content, ts)
    }

    #[test]
    fn ingests_only_entries_since_last_ingestion() {
        let cortex = ContextCortex::new();
        cortex.register_agent("a", Visibility::All);
        cortex.register_agent("observer", Visibility::All);

        let mut hook = StepHook::new("a");
        hook.record(entry("list_rides()", 1.0));
        hook.record(entry("order_ride(...)", 2.0));
        assert!(hook.post_step(&cortex).is_some());

        hook.record(entry("user_cancel_ride()", 3.0));
        assert!(hook.post_step(&cortex).is_some());

        let episodes = cortex.episodes_for_agent("observer");
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].raw_trace.logs.len(), 2);
        assert_eq!(episodes[1].raw_trace.logs.len(), 1);
        assert_eq!(episodes[1].raw_trace.logs[0].content, "user_cancel_ride()");
    }

    #[test]
    fn empty_step_ingests_nothing() {
        let cortex = ContextCortex::new();
        cortex.register_agent("a", Visibility::All);

        let mut hook = StepHook::new("a");
        assert!(hook.post_step(&cortex).is_none());
        assert_eq!(cortex.episode_count(), 0);
    }

    #[test]
    fn rejected_ingest_never_panics_and_drops_entries() {
        let cortex = ContextCortex::new();
        // agent deliberately not registered

        let mut hook = StepHook::new("ghost");
        hook.record(entry("something", 1.0));
        assert!(hook.post_step(&cortex).is_none());
        assert_eq!(cortex.episode_count(), 0);

        // The dropped entries are not re-offered next step.
        assert!(hook.pending().is_empty());
        assert!(hook.post_step(&cortex).is_none());
    }

    #[test]
    fn step_metadata_counts_up() {
        let cortex = ContextCortex::new();
        cortex.register_agent("a", Visibility::All);
        cortex.register_agent("observer", Visibility::All);

        let mut hook = StepHook::new("a");
        hook.record(entry("x", 1.0));
        hook.post_step(&cortex);
        hook.record(entry("y", 2.0));
        hook.post_step(&cortex);

        let episodes = cortex.episodes_for_agent("observer");
        assert_eq!(
            episodes[1].raw_trace.metadata.get("step"),
            Some(&serde_json::json!(2))
        );
    }
}
