//! Arena Cortex - cross-agent shared-context store
//!
//! Agents under evaluation run in isolation, but the harness lets them
//! share condensed experience: after each step, the newest trace entries
//! are packaged into a [`StepTrace`](arena_events::StepTrace) and ingested
//! as an [`Episode`]. Other agents then see episode summaries rendered
//! into their system prompt, subject to per-agent visibility masks.
//!
//! Ingestion is fire-and-forget: a failed ingest is logged and dropped,
//! never aborting the agent's step.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod episode;
pub mod hook;
pub mod prompt;
pub mod store;

pub use episode::Episode;
pub use hook::StepHook;
pub use prompt::{append_context_to_system, render_context_block};
pub use store::{ContextCortex, CortexError, Visibility};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
