//! Arena Validation - event-trace validation toolkit
//!
//! Every scenario decides pass/fail the same way: filter the finalized
//! event log down to agent tool calls, then check call presence, argument
//! values, relative ordering, and the set of apps touched. This crate
//! provides that toolkit once, so scenario validators compose matchers
//! instead of re-implementing linear scans.
//!
//! Validation is a pure read over a finished log: no retries, no side
//! effects, and running it twice yields the same result.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod result;
pub mod trace;

pub use result::{ScenarioValidationResult, ValidationError};
pub use trace::AgentTrace;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
