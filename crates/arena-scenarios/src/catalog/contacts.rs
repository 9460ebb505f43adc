//! Contact search scenario (`ss3`)

use crate::environment::Environment;
use crate::scenario::{OracleEvent, Scenario, ScenarioError};
use arena_apps::{Contact, Gender, Status};
use arena_events::{Action, OperationType};
use arena_validation::trace::arg_contains;
use arena_validation::{AgentTrace, ScenarioValidationResult};

const TARGET_NAME: &str = "Jane Smith";

/// `ss3`: search the contacts for a person by name
///
/// The query is natural language, so the check is substring containment
/// rather than exact equality.
#[derive(Default)]
pub struct ContactSearch;

impl Scenario for ContactSearch {
    fn id(&self) -> &'static str {
        "ss3"
    }

    fn init_and_populate_apps(&mut self, env: &mut Environment) -> Result<(), ScenarioError> {
        env.contacts.add_contact(
            Contact::new("Jane", "Smith")
                .with_email("jane.smith@example.com")
                .with_phone("5559876543")
                .with_gender(Gender::Female)
                .with_status(Status::Employed)
                .with_job("Architect"),
        );
        env.contacts
            .add_contact(Contact::new("Jim", "Brown").with_email("jim.brown@example.com"));
        env.contacts
            .add_contact(Contact::new("Janet", "Smythe").with_email("janet.smythe@example.com"));

        env.post_user_message("What's Jane Smith's phone number?");
        Ok(())
    }

    fn build_events_flow(&mut self, env: &mut Environment) -> Vec<OracleEvent> {
        let _ = env;
        vec![OracleEvent::new(
            Action::new("ContactsApp", "search_contacts", OperationType::Read)
                .with_arg("query", TARGET_NAME),
        )
        .with_effect(|env| {
            env.contacts.search_contacts(TARGET_NAME);
            Ok(())
        })]
    }

    fn validate(&self, env: &Environment) -> ScenarioValidationResult {
        let trace = AgentTrace::from_log(&env.event_log);
        trace
            .require_call_matching(
                "search_contacts",
                &format!("query containing '{TARGET_NAME}'"),
                |e| arg_contains(e, "query", TARGET_NAME),
            )
            .map(|_| ())
            .into()
    }
}
