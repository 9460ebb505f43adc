//! Event and action record types
//!
//! An [`Action`] captures one tool call: the owning app (`class_name`),
//! the tool function, and its argument mapping. An [`Event`] wraps an
//! action with the event kind and a simulated timestamp. Both are
//! immutable once appended to the log.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ulid::Ulid;

/// Unique event identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EventId(pub Ulid);

impl EventId {
    /// Generate new event ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a logged event
///
/// Validators only ever look at [`EventType::Agent`] events; the other
/// kinds exist so the full run (user messages, environment effects,
/// scripted oracle actions) shares one trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Tool call made by the agent under evaluation
    Agent,
    /// Message originating from the simulated user
    User,
    /// Environment-driven effect
    Env,
    /// Reference action from the scenario's oracle flow
    Oracle,
}

impl EventType {
    #[inline]
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            EventType::Agent => 0,
            EventType::User => 1,
            EventType::Env => 2,
            EventType::Oracle => 3,
        }
    }
}

/// Read/write classification of a tool call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    /// Pure lookup, no state change
    Read,
    /// Mutates app state
    Write,
}

/// Argument mapping of a tool call (insertion-ordered)
pub type ArgMap = IndexMap<String, Value>;

/// A recorded tool call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Name of the app that owns the tool (e.g. `"DbApp"`)
    pub class_name: String,
    /// Tool function name (e.g. `"get_db_entry"`)
    pub function_name: String,
    /// Read/write classification
    pub operation: OperationType,
    /// Parameter name to value mapping
    pub args: ArgMap,
}

impl Action {
    /// Create new action with an empty argument map
    #[must_use]
    pub fn new(
        class_name: impl Into<String>,
        function_name: impl Into<String>,
        operation: OperationType,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            function_name: function_name.into(),
            operation,
            args: ArgMap::new(),
        }
    }

    /// With an argument (builder style)
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Look up an argument by parameter name
    #[inline]
    #[must_use]
    pub fn arg(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }

    /// Look up a string argument by parameter name
    ///
    /// Returns `None` when the argument is absent or not a string.
    #[inline]
    #[must_use]
    pub fn arg_str(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(Value::as_str)
    }
}

/// A single immutable log record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub event_id: EventId,
    pub event_type: EventType,
    pub action: Action,
    /// Simulated seconds since scenario start
    pub timestamp: f64,
    /// Hash of the previous event (filled on append)
    pub prev_hash: [u8; 32],
    /// Hash of this event (filled on append)
    pub hash: [u8; 32],
}

impl Event {
    /// Create a new event; the hash chain fields are filled by the log
    #[must_use]
    pub fn new(event_type: EventType, action: Action, timestamp: f64) -> Self {
        Self {
            event_id: EventId::new(),
            event_type,
            action,
            timestamp,
            prev_hash: [0u8; 32],
            hash: [0u8; 32],
        }
    }

    /// Shorthand for an agent tool-call event
    #[inline]
    #[must_use]
    pub fn agent(action: Action, timestamp: f64) -> Self {
        Self::new(EventType::Agent, action, timestamp)
    }

    /// Whether this event is an agent tool call
    #[inline]
    #[must_use]
    pub fn is_agent(&self) -> bool {
        self.event_type == EventType::Agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_id_generation() {
        let id1 = EventId::new();
        let id2 = EventId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn action_builder() {
        let action = Action::new("CabApp", "order_ride", OperationType::Write)
            .with_arg("start_location", "Downtown")
            .with_arg("end_location", "Airport");

        assert_eq!(action.class_name, "CabApp");
        assert_eq!(action.arg_str("start_location"), Some("Downtown"));
        assert_eq!(action.arg("missing"), None);
    }

    #[test]
    fn action_arg_str_rejects_non_string() {
        let action =
            Action::new("ShoppingApp", "add_to_cart", OperationType::Write).with_arg("quantity", 2);

        assert_eq!(action.arg_str("quantity"), None);
        assert_eq!(action.arg("quantity"), Some(&json!(2)));
    }

    #[test]
    fn event_kind_helpers() {
        let action = Action::new("DbApp", "get_db_entry", OperationType::Read);
        let event = Event::agent(action.clone(), 1.0);
        assert!(event.is_agent());

        let oracle = Event::new(EventType::Oracle, action, 2.0);
        assert!(!oracle.is_agent());
    }
}
