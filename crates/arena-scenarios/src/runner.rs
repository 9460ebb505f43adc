//! Populate, replay, validate

use crate::environment::Environment;
use crate::scenario::{Scenario, ScenarioError};
use arena_validation::ScenarioValidationResult;
use serde::Serialize;
use tracing::info;

/// Outcome of one scenario run
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub scenario_id: String,
    /// Events in the finalized log
    pub events_recorded: usize,
    pub result: ScenarioValidationResult,
}

impl RunReport {
    #[inline]
    #[must_use]
    pub fn passed(&self) -> bool {
        self.result.is_success()
    }
}

/// Run one scenario end to end: populate the apps, replay the oracle
/// flow into the log, verify the log's hash chain, then validate.
///
/// # Errors
/// `ScenarioError::App` when a scripted call fails, `ScenarioError::Log`
/// when the finalized log does not verify. A failed validation is a
/// normal `Ok` report, not an error.
pub fn run_and_validate(scenario: &mut dyn Scenario) -> Result<RunReport, ScenarioError> {
    let scenario_id = scenario.id().to_string();
    info!(scenario = %scenario_id, "running scenario");

    let mut env = Environment::new();
    scenario.init_and_populate_apps(&mut env)?;

    let flow = scenario.build_events_flow(&mut env);
    for mut oracle in flow {
        env.advance(oracle.delay);
        oracle.apply(&mut env)?;
        env.record_agent(oracle.action);
    }

    env.event_log.verify_integrity()?;
    let result = scenario.validate(&env);
    info!(
        scenario = %scenario_id,
        success = result.is_success(),
        reason = result.reason().as_deref().unwrap_or(""),
        "scenario finished"
    );

    Ok(RunReport {
        scenario_id,
        events_recorded: env.event_log.len(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::OracleEvent;
    use arena_events::{Action, OperationType};
    use arena_validation::{AgentTrace, ValidationError};
    use pretty_assertions::assert_eq;

    struct OrderWithoutCancel;

    impl Scenario for OrderWithoutCancel {
        fn id(&self) -> &'static str {
            "order_without_cancel"
        }
        fn init_and_populate_apps(&mut self, _env: &mut Environment) -> Result<(), ScenarioError> {
            Ok(())
        }
        fn build_events_flow(&mut self, _env: &mut Environment) -> Vec<OracleEvent> {
            vec![OracleEvent::new(
                Action::new("CabApp", "order_ride", OperationType::Write),
            )]
        }
        fn validate(&self, env: &Environment) -> ScenarioValidationResult {
            let trace = AgentTrace::from_log(&env.event_log);
            trace
                .require_follow_up("order_ride", "user_cancel_ride")
                .into()
        }
    }

    #[test]
    fn report_carries_validation_verdict() {
        let mut scenario = OrderWithoutCancel;
        let report = run_and_validate(&mut scenario).unwrap();

        assert_eq!(report.scenario_id, "order_without_cancel");
        assert_eq!(report.events_recorded, 1);
        assert!(!report.passed());
        assert_eq!(
            report.result.exception,
            Some(ValidationError::MissingFollowUp {
                first: "order_ride".to_string(),
                then: "user_cancel_ride".to_string(),
            })
        );
    }

    #[test]
    fn rerunning_a_scenario_is_deterministic() {
        let first = run_and_validate(&mut OrderWithoutCancel).unwrap();
        let second = run_and_validate(&mut OrderWithoutCancel).unwrap();
        assert_eq!(first.result, second.result);
    }
}
