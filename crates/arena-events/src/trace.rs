//! Step-trace records handed to the cortex store
//!
//! After each agent step the harness packages the newest log entries into
//! a [`StepTrace`] and hands it to the cortex ingestion boundary. The
//! trace is a plain data record; ingestion semantics live in the cortex
//! crate.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of a trace entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceEntryKind {
    /// Model thought / plan text
    Thought,
    /// Tool call made during the step
    ToolCall,
    /// Observation returned by a tool
    Observation,
    /// Final answer for the step
    Answer,
}

/// One log line inside a step trace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    pub kind: TraceEntryKind,
    /// Content as rendered for the LLM
    pub content: String,
    /// Simulated seconds since scenario start
    pub timestamp: f64,
}

impl TraceEntry {
    #[must_use]
    pub fn new(kind: TraceEntryKind, content: impl Into<String>, timestamp: f64) -> Self {
        Self {
            kind,
            content: content.into(),
            timestamp,
        }
    }
}

/// Per-step trace record for cortex ingestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepTrace {
    /// Agent that produced the step
    pub agent_id: String,
    /// Log entries appended during the step
    pub logs: Vec<TraceEntry>,
    /// Free-form metadata (step index, timestamps, ...)
    pub metadata: serde_json::Map<String, Value>,
}

impl StepTrace {
    /// Create new empty trace for an agent
    #[must_use]
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            logs: Vec::new(),
            metadata: serde_json::Map::new(),
        }
    }

    /// With a log entry (builder style)
    #[must_use]
    pub fn with_entry(mut self, entry: TraceEntry) -> Self {
        self.logs.push(entry);
        self
    }

    /// With a metadata field (builder style)
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Whether the trace carries any log entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_builder() {
        let trace = StepTrace::new("cab_agent")
            .with_entry(TraceEntry::new(
                TraceEntryKind::ToolCall,
                "order_ride(start_location='Downtown')",
                3.0,
            ))
            .with_metadata("step", 1);

        assert_eq!(trace.agent_id, "cab_agent");
        assert_eq!(trace.logs.len(), 1);
        assert!(!trace.is_empty());
        assert_eq!(trace.metadata.get("step"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn empty_trace() {
        assert!(StepTrace::new("a").is_empty());
    }
}
