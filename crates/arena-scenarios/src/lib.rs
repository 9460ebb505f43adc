//! Arena Scenarios - scripted test cases and their runner
//!
//! A scenario is a scripted evaluation case: it pre-populates the mock
//! apps, declares the oracle event flow a correct agent would produce,
//! and validates the recorded event log. The pieces:
//!
//! - [`Environment`]: owns the app set and the event log for one run
//! - [`Scenario`]: the trait every catalogue entry implements
//! - [`registry`]: global name-to-factory map (register once, read many)
//! - [`runner`]: populate, replay the oracle flow, validate, report
//!
//! The `arena` binary lists and runs registered scenarios.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod catalog;
pub mod environment;
pub mod registry;
pub mod runner;
pub mod scenario;

pub use environment::Environment;
pub use runner::{run_and_validate, RunReport};
pub use scenario::{OracleEvent, Scenario, ScenarioError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
