//! Agent-event trace queries
//!
//! [`AgentTrace`] is the index-preserving projection of a finalized event
//! log down to AGENT events. All validator checks run against it:
//! find-first-matching scans, argument equality/containment, relative
//! ordering, and accessed-app set comparisons.

use crate::result::ValidationError;
use arena_events::{Event, EventLog};
use serde_json::Value;
use std::collections::BTreeSet;

/// Ordered view of the agent tool calls in one run
#[derive(Debug, Clone)]
pub struct AgentTrace {
    events: Vec<Event>,
}

impl AgentTrace {
    /// Project the AGENT events out of a finalized log, preserving order
    #[must_use]
    pub fn from_log(log: &EventLog) -> Self {
        Self::from_events(log.list_view())
    }

    /// Build from an already-materialized event sequence
    #[must_use]
    pub fn from_events(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().filter(Event::is_agent).collect(),
        }
    }

    /// All agent events in log order
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// First event satisfying an arbitrary matcher
    pub fn find(&self, matcher: impl Fn(&Event) -> bool) -> Option<&Event> {
        self.events.iter().find(|e| matcher(e))
    }

    /// All calls of one tool function, in order
    pub fn calls_named<'a>(&'a self, function: &'a str) -> impl Iterator<Item = &'a Event> {
        self.events
            .iter()
            .filter(move |e| e.action.function_name == function)
    }

    /// Relative positions (indices into the agent trace) of calls of one
    /// tool function
    #[must_use]
    pub fn indices_of(&self, function: &str) -> Vec<usize> {
        self.events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.action.function_name == function)
            .map(|(i, _)| i)
            .collect()
    }

    /// Set of distinct app names touched by the agent
    #[must_use]
    pub fn accessed_apps(&self) -> BTreeSet<String> {
        self.events
            .iter()
            .map(|e| e.action.class_name.clone())
            .collect()
    }

    // ---- checks -------------------------------------------------------

    /// Require at least one call of a tool function
    ///
    /// # Errors
    /// `ValidationError::MissingCall` when the function was never called.
    pub fn require_call(&self, function: &str) -> Result<&Event, ValidationError> {
        self.events
            .iter()
            .find(|e| e.action.function_name == function)
            .ok_or_else(|| ValidationError::MissingCall {
                function: function.to_string(),
            })
    }

    /// Require at least one call of a tool function whose action
    /// satisfies the matcher; `expected` describes the arguments for the
    /// failure message
    ///
    /// # Errors
    /// `MissingCall` when the function was never called at all,
    /// `NoMatchingCall` when it was called but never with matching
    /// arguments.
    pub fn require_call_matching(
        &self,
        function: &str,
        expected: &str,
        matcher: impl Fn(&Event) -> bool,
    ) -> Result<&Event, ValidationError> {
        let mut calls = self
            .events
            .iter()
            .filter(|e| e.action.function_name == function)
            .peekable();
        if calls.peek().is_none() {
            return Err(ValidationError::MissingCall {
                function: function.to_string(),
            });
        }
        calls
            .find(|e| matcher(e))
            .ok_or_else(|| ValidationError::NoMatchingCall {
                function: function.to_string(),
                expected: expected.to_string(),
            })
    }

    /// Require that, if `first` was ever called, some `then` call occurs
    /// at a later index than the last `first`
    ///
    /// No `first` calls at all is trivially acceptable.
    ///
    /// # Errors
    /// `ValidationError::MissingFollowUp` when the follow-up is missing.
    pub fn require_follow_up(&self, first: &str, then: &str) -> Result<(), ValidationError> {
        let first_indices = self.indices_of(first);
        let Some(last_first) = first_indices.last().copied() else {
            return Ok(());
        };
        let has_later = self
            .indices_of(then)
            .iter()
            .any(|&i| i > last_first);
        if has_later {
            Ok(())
        } else {
            Err(ValidationError::MissingFollowUp {
                first: first.to_string(),
                then: then.to_string(),
            })
        }
    }

    /// Require that every app in `required` was touched
    ///
    /// # Errors
    /// `ValidationError::MissingApps` naming both the missing and the
    /// accessed sets.
    pub fn require_apps(&self, required: &[&str]) -> Result<(), ValidationError> {
        let accessed = self.accessed_apps();
        let missing: Vec<String> = required
            .iter()
            .filter(|app| !accessed.contains(**app))
            .map(ToString::to_string)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingApps {
                missing,
                accessed: accessed.into_iter().collect(),
            })
        }
    }

    /// Require that no app in `forbidden` was touched
    ///
    /// # Errors
    /// `ValidationError::ForbiddenApps` naming each distractor touched.
    pub fn forbid_apps(&self, forbidden: &[&str]) -> Result<(), ValidationError> {
        let accessed = self.accessed_apps();
        let touched: Vec<String> = forbidden
            .iter()
            .filter(|app| accessed.contains(**app))
            .map(ToString::to_string)
            .collect();
        if touched.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::ForbiddenApps { apps: touched })
        }
    }
}

/// Exact equality between an argument and an expected string
#[must_use]
pub fn arg_eq(event: &Event, key: &str, expected: &str) -> bool {
    event.action.arg_str(key) == Some(expected)
}

/// Exact equality between an argument and an expected JSON value
#[must_use]
pub fn arg_eq_value(event: &Event, key: &str, expected: &Value) -> bool {
    event.action.arg(key) == Some(expected)
}

/// Substring containment in a string argument (natural-language queries)
#[must_use]
pub fn arg_contains(event: &Event, key: &str, needle: &str) -> bool {
    event
        .action
        .arg_str(key)
        .is_some_and(|s| s.contains(needle))
}
