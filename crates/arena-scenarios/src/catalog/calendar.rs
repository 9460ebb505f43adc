//! Calendar scenarios (`ss5`, `ss10`)

use crate::environment::Environment;
use crate::scenario::{OracleEvent, Scenario, ScenarioError};
use arena_events::{Action, OperationType};
use arena_validation::trace::arg_eq;
use arena_validation::{AgentTrace, ScenarioValidationResult, ValidationError};
use chrono::NaiveDateTime;

fn ts(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok()
}

/// `ss5`: fetch a specific calendar event by id
#[derive(Default)]
pub struct CalendarFetch {
    target_id: Option<String>,
}

impl Scenario for CalendarFetch {
    fn id(&self) -> &'static str {
        "ss5"
    }

    fn init_and_populate_apps(&mut self, env: &mut Environment) -> Result<(), ScenarioError> {
        let (Some(s1), Some(e1), Some(s2), Some(e2)) = (
            ts("2024-03-12 09:00:00"),
            ts("2024-03-12 09:30:00"),
            ts("2024-03-12 14:00:00"),
            ts("2024-03-12 15:00:00"),
        ) else {
            return Ok(());
        };
        env.calendar
            .add_calendar_event("Standup", s1, e1, None, vec![]);
        let target = env.calendar.add_calendar_event(
            "Dentist",
            s2,
            e2,
            Some("Bring insurance card".to_string()),
            vec![],
        );
        self.target_id = Some(target.clone());

        env.post_user_message(&format!("What are the details of calendar event {target}?"));
        Ok(())
    }

    fn build_events_flow(&mut self, env: &mut Environment) -> Vec<OracleEvent> {
        let _ = env;
        let target = self.target_id.clone().unwrap_or_default();
        let effect_target = target.clone();
        vec![OracleEvent::new(
            Action::new("CalendarApp", "get_calendar_event", OperationType::Read)
                .with_arg("event_id", target),
        )
        .with_effect(move |env| env.calendar.get_calendar_event(&effect_target).map(|_| ()))]
    }

    fn validate(&self, env: &Environment) -> ScenarioValidationResult {
        let Some(target) = self.target_id.as_deref() else {
            return ScenarioValidationResult::fail(ValidationError::failed(
                "scenario was never populated",
            ));
        };
        let trace = AgentTrace::from_log(&env.event_log);
        trace
            .require_call_matching("get_calendar_event", &format!("event_id='{target}'"), |e| {
                arg_eq(e, "event_id", target)
            })
            .map(|_| ())
            .into()
    }
}

/// `ss10`: add a calendar event (trivially-true validator)
pub struct CalendarAdd;

impl Scenario for CalendarAdd {
    fn id(&self) -> &'static str {
        "ss10"
    }

    fn init_and_populate_apps(&mut self, env: &mut Environment) -> Result<(), ScenarioError> {
        env.post_user_message("Put a team lunch on my calendar for Friday at noon.");
        Ok(())
    }

    fn build_events_flow(&mut self, env: &mut Environment) -> Vec<OracleEvent> {
        let _ = env;
        vec![OracleEvent::new(
            Action::new("CalendarApp", "add_calendar_event", OperationType::Write)
                .with_arg("title", "Team lunch")
                .with_arg("start_datetime", "2024-03-15 12:00:00")
                .with_arg("end_datetime", "2024-03-15 13:00:00"),
        )
        .with_effect(|env| {
            if let (Some(start), Some(end)) =
                (ts("2024-03-15 12:00:00"), ts("2024-03-15 13:00:00"))
            {
                env.calendar
                    .add_calendar_event("Team lunch", start, end, None, vec![]);
            }
            Ok(())
        })]
    }

    fn validate(&self, _env: &Environment) -> ScenarioValidationResult {
        ScenarioValidationResult::ok()
    }
}
