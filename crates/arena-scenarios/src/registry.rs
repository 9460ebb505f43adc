//! Global scenario registry
//!
//! A process-wide name-to-factory map. Lifecycle is register-once,
//! read-many: the catalogue registers at startup and runners build fresh
//! scenario instances by name. Re-registering a name replaces the
//! factory (last registration wins).

use crate::scenario::{Scenario, ScenarioError};
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;

type ScenarioFactory = Box<dyn Fn() -> Box<dyn Scenario> + Send + Sync>;

static REGISTRY: Lazy<RwLock<HashMap<String, ScenarioFactory>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Register a scenario factory under a name; last registration wins
pub fn register(name: impl Into<String>, factory: impl Fn() -> Box<dyn Scenario> + Send + Sync + 'static) {
    let name = name.into();
    tracing::debug!(scenario = %name, "registering scenario");
    REGISTRY.write().insert(name, Box::new(factory));
}

/// Build a fresh scenario instance by name
///
/// # Errors
/// `ScenarioError::UnknownScenario` when the name was never registered.
pub fn build(name: &str) -> Result<Box<dyn Scenario>, ScenarioError> {
    REGISTRY
        .read()
        .get(name)
        .map(|factory| factory())
        .ok_or_else(|| ScenarioError::UnknownScenario {
            name: name.to_string(),
        })
}

/// Registered scenario names, sorted
#[must_use]
pub fn names() -> Vec<String> {
    let mut names: Vec<String> = REGISTRY.read().keys().cloned().collect();
    names.sort();
    names
}
