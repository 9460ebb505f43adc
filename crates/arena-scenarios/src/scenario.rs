//! The scenario contract and oracle flow records

use crate::environment::Environment;
use arena_apps::AppError;
use arena_events::{Action, LogError};
use arena_validation::ScenarioValidationResult;

/// Scenario-level failures (distinct from validation verdicts)
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// A mock app rejected a scripted call
    #[error(transparent)]
    App(#[from] AppError),

    /// The event log failed its integrity check
    #[error(transparent)]
    Log(#[from] LogError),

    /// No scenario registered under the requested name
    #[error("unknown scenario `{name}`")]
    UnknownScenario { name: String },
}

/// Side effect applied to the environment when an oracle event replays
pub type OracleEffect = Box<dyn FnOnce(&mut Environment) -> Result<(), AppError>>;

/// One reference action in a scenario's expected flow
///
/// Oracle events describe what a correct agent would do; replaying them
/// seeds the log so the harness can validate its own scripts. They are
/// reference material, not enforcement.
pub struct OracleEvent {
    pub action: Action,
    /// Seconds after the previous event
    pub delay: f64,
    effect: Option<OracleEffect>,
}

impl OracleEvent {
    #[must_use]
    pub fn new(action: Action) -> Self {
        Self {
            action,
            delay: 1.0,
            effect: None,
        }
    }

    /// Delay relative to the previous event (builder style)
    #[must_use]
    pub fn after(mut self, seconds: f64) -> Self {
        self.delay = seconds;
        self
    }

    /// Attach the app side effect performed when this event replays
    #[must_use]
    pub fn with_effect(
        mut self,
        effect: impl FnOnce(&mut Environment) -> Result<(), AppError> + 'static,
    ) -> Self {
        self.effect = Some(Box::new(effect));
        self
    }

    /// Run the attached side effect, if any
    ///
    /// # Errors
    /// Propagates the app failure from the effect.
    pub fn apply(&mut self, env: &mut Environment) -> Result<(), AppError> {
        match self.effect.take() {
            Some(effect) => effect(env),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for OracleEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleEvent")
            .field("action", &self.action)
            .field("delay", &self.delay)
            .field("has_effect", &self.effect.is_some())
            .finish()
    }
}

/// A scripted evaluation case
///
/// The runner drives the three phases in order: populate the apps,
/// build and replay the oracle flow, validate the finalized log.
pub trait Scenario {
    /// Stable registry name
    fn id(&self) -> &'static str;

    /// Seed the apps with the scenario's initial state
    ///
    /// # Errors
    /// `ScenarioError::App` when seeding a mock app fails.
    fn init_and_populate_apps(&mut self, env: &mut Environment) -> Result<(), ScenarioError>;

    /// The expected event flow, with delays relative to the previous
    /// event
    fn build_events_flow(&mut self, env: &mut Environment) -> Vec<OracleEvent>;

    /// Decide pass/fail over the finalized log
    fn validate(&self, env: &Environment) -> ScenarioValidationResult;
}
