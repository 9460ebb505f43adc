//! Testing utilities for the arena workspace
//!
//! Shared fixtures for building agent events, logs and step traces.

#![allow(missing_docs)]

use arena_events::{Action, Event, EventLog, OperationType, StepTrace, TraceEntry, TraceEntryKind};

/// An agent read call with no arguments
pub fn read_call(app: &str, function: &str, timestamp: f64) -> Event {
    Event::agent(Action::new(app, function, OperationType::Read), timestamp)
}

/// An agent write call with no arguments
pub fn write_call(app: &str, function: &str, timestamp: f64) -> Event {
    Event::agent(Action::new(app, function, OperationType::Write), timestamp)
}

/// A booking call with the canonical test trip
pub fn order_ride_event(service_type: &str, timestamp: f64) -> Event {
    Event::agent(
        Action::new("CabApp", "order_ride", OperationType::Write)
            .with_arg("start_location", "Downtown")
            .with_arg("end_location", "Airport")
            .with_arg("service_type", service_type),
        timestamp,
    )
}

/// A log seeded with the given events, hash chain filled
pub fn log_with(events: Vec<Event>) -> EventLog {
    let log = EventLog::new();
    for event in events {
        log.append(event);
    }
    log
}

/// A one-entry step trace whose answer is the given text
pub fn answer_trace(agent_id: &str, answer: &str) -> StepTrace {
    StepTrace::new(agent_id).with_entry(TraceEntry::new(TraceEntryKind::Answer, answer, 1.0))
}
