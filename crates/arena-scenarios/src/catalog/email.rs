//! Email scenarios (`ss4`, `ss9`)

use crate::environment::Environment;
use crate::scenario::{OracleEvent, Scenario, ScenarioError};
use arena_apps::{Email, EmailFolder};
use arena_events::{Action, OperationType};
use arena_validation::trace::arg_eq;
use arena_validation::{AgentTrace, ScenarioValidationResult};

/// `ss4`: fetch a specific email by id
#[derive(Default)]
pub struct EmailFetch {
    target_id: Option<String>,
}

impl Scenario for EmailFetch {
    fn id(&self) -> &'static str {
        "ss4"
    }

    fn init_and_populate_apps(&mut self, env: &mut Environment) -> Result<(), ScenarioError> {
        env.email.add_email(
            Email::new(
                "noreply@example.com",
                vec!["user@example.com".to_string()],
                "Your receipt",
                "Thanks for your purchase.",
            ),
            EmailFolder::Inbox,
        );
        let target = env.email.add_email(
            Email::new(
                "boss@example.com",
                vec!["user@example.com".to_string()],
                "Quarterly review",
                "Please read before Friday's meeting.",
            )
            .with_timestamp(10.0),
            EmailFolder::Inbox,
        );
        self.target_id = Some(target.clone());

        env.post_user_message(&format!("Open the email with id {target} and summarize it."));
        Ok(())
    }

    fn build_events_flow(&mut self, env: &mut Environment) -> Vec<OracleEvent> {
        let _ = env;
        let target = self.target_id.clone().unwrap_or_default();
        let effect_target = target.clone();
        vec![OracleEvent::new(
            Action::new("EmailApp", "get_email_by_id", OperationType::Read)
                .with_arg("email_id", target),
        )
        .with_effect(move |env| env.email.get_email_by_id(&effect_target).map(|_| ()))]
    }

    fn validate(&self, env: &Environment) -> ScenarioValidationResult {
        let Some(target) = self.target_id.as_deref() else {
            return ScenarioValidationResult::fail(arena_validation::ValidationError::failed(
                "scenario was never populated",
            ));
        };
        let trace = AgentTrace::from_log(&env.event_log);
        trace
            .require_call_matching("get_email_by_id", &format!("email_id='{target}'"), |e| {
                arg_eq(e, "email_id", target)
            })
            .map(|_| ())
            .into()
    }
}

/// `ss9`: send an email
///
/// The original validator is trivially true; the scenario exists to
/// exercise the oracle flow, not to constrain the agent.
pub struct EmailSend;

impl Scenario for EmailSend {
    fn id(&self) -> &'static str {
        "ss9"
    }

    fn init_and_populate_apps(&mut self, env: &mut Environment) -> Result<(), ScenarioError> {
        env.post_user_message("Email carol@example.com asking to reschedule tomorrow's sync.");
        Ok(())
    }

    fn build_events_flow(&mut self, env: &mut Environment) -> Vec<OracleEvent> {
        let _ = env;
        vec![OracleEvent::new(
            Action::new("EmailApp", "send_email", OperationType::Write)
                .with_arg("recipients", vec!["carol@example.com"])
                .with_arg("subject", "Rescheduling tomorrow's sync"),
        )
        .with_effect(|env| {
            env.email.send_email(
                vec!["carol@example.com".to_string()],
                "Rescheduling tomorrow's sync",
                "Could we move our sync to later in the week?",
            );
            Ok(())
        })]
    }

    fn validate(&self, _env: &Environment) -> ScenarioValidationResult {
        ScenarioValidationResult::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_events::Event;

    #[test]
    fn fetch_requires_the_exact_id() {
        let mut scenario = EmailFetch::default();
        let mut env = Environment::new();
        scenario.init_and_populate_apps(&mut env).unwrap();

        env.event_log.append(Event::agent(
            Action::new("EmailApp", "get_email_by_id", OperationType::Read)
                .with_arg("email_id", "not-the-target"),
            1.0,
        ));
        assert!(!scenario.validate(&env).is_success());

        let target = scenario.target_id.clone().unwrap();
        env.event_log.append(Event::agent(
            Action::new("EmailApp", "get_email_by_id", OperationType::Read)
                .with_arg("email_id", target),
            2.0,
        ));
        assert!(scenario.validate(&env).is_success());
    }

    #[test]
    fn send_scenario_always_validates() {
        let scenario = EmailSend;
        let env = Environment::new();
        assert!(scenario.validate(&env).is_success());
    }
}
