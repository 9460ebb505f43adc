//! Arena Events - event model and append-only log
//!
//! Defines the record types shared by the whole harness:
//! - [`Action`]: a tool call made against a mock app
//! - [`Event`]: a timestamped, typed log record wrapping an action
//! - [`EventLog`]: the append-only, hash-chained trace of a scenario run
//! - [`StepTrace`]: the per-step record handed to the cortex store
//!
//! Validation consumes the log strictly read-only, after the run has
//! finished appending.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod event;
pub mod log;
pub mod trace;

pub use event::{Action, ArgMap, Event, EventId, EventType, OperationType};
pub use log::{EventLog, LogError};
pub use trace::{StepTrace, TraceEntry, TraceEntryKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
