//! Database lookup scenarios (`ss1`, `ss7`)

use crate::environment::Environment;
use crate::scenario::{OracleEvent, Scenario, ScenarioError};
use arena_apps::{Contact, DbEntry, Email, EmailFolder, Item, Product};
use arena_events::{Action, OperationType};
use arena_validation::trace::arg_eq;
use arena_validation::{AgentTrace, ScenarioValidationResult};

fn seed_db(env: &mut Environment, target_id: &str) {
    env.db.create_db_entry(
        DbEntry::new("17", "Alice Johnson")
            .with_email("alice.johnson@example.com")
            .with_location("Springfield", "IL", "62701", "USA"),
    );
    env.db.create_db_entry(
        DbEntry::new(target_id, "John Doe")
            .with_email("john.doe@example.com")
            .with_phone("5551234567")
            .with_location("Portland", "OR", "97201", "USA"),
    );
    env.db.create_db_entry(
        DbEntry::new("99", "Maria Garcia")
            .with_email("maria.garcia@example.com")
            .with_location("Austin", "TX", "73301", "USA"),
    );
}

/// `ss1`: fetch one database entry by its id
pub struct DbLookup {
    target_id: &'static str,
}

impl DbLookup {
    #[must_use]
    pub fn target(target_id: &'static str) -> Self {
        Self { target_id }
    }
}

impl Scenario for DbLookup {
    fn id(&self) -> &'static str {
        "ss1"
    }

    fn init_and_populate_apps(&mut self, env: &mut Environment) -> Result<(), ScenarioError> {
        seed_db(env, self.target_id);
        env.post_user_message(&format!(
            "Look up the database entry with id {} and tell me the name on it.",
            self.target_id
        ));
        Ok(())
    }

    fn build_events_flow(&mut self, env: &mut Environment) -> Vec<OracleEvent> {
        let _ = env;
        let target_id = self.target_id;
        vec![OracleEvent::new(
            Action::new("DbApp", "get_db_entry", OperationType::Read)
                .with_arg("entry_id", target_id),
        )
        .with_effect(move |env| env.db.get_db_entry(target_id).map(|_| ()))]
    }

    fn validate(&self, env: &Environment) -> ScenarioValidationResult {
        let trace = AgentTrace::from_log(&env.event_log);
        trace
            .require_call_matching(
                "get_db_entry",
                &format!("entry_id='{}'", self.target_id),
                |e| arg_eq(e, "entry_id", self.target_id),
            )
            .map(|_| ())
            .into()
    }
}

/// `ss7`: the same lookup, but with six distractor apps populated
#[derive(Default)]
pub struct DbLookupAmidDistractors;

impl DbLookupAmidDistractors {
    const TARGET_ID: &'static str = "314";
}

impl Scenario for DbLookupAmidDistractors {
    fn id(&self) -> &'static str {
        "ss7"
    }

    fn init_and_populate_apps(&mut self, env: &mut Environment) -> Result<(), ScenarioError> {
        seed_db(env, Self::TARGET_ID);

        // Distractor state the correct agent never needs to touch.
        env.contacts
            .add_contact(Contact::new("Jane", "Smith").with_email("jane.smith@example.com"));
        env.email.add_email(
            Email::new(
                "newsletter@example.com",
                vec!["user@example.com".to_string()],
                "Weekly digest",
                "Nothing relevant here.",
            ),
            EmailFolder::Inbox,
        );
        env.messaging.add_users(&["Bob"]);
        env.shopping.add_product(
            Product::new("p1", "Desk Lamp").with_variant("black", Item::new("i1", 24.99, true)),
        );
        env.apartment.add_new_apartment(
            "Riverside Studio",
            "12 River Road",
            "97209",
            1450.0,
            1,
            1,
            520,
            "Studio",
        );
        env.cab.list_rides("Downtown", "Airport", 0.0);

        env.post_user_message(&format!(
            "Find the database record with id {} for me.",
            Self::TARGET_ID
        ));
        Ok(())
    }

    fn build_events_flow(&mut self, env: &mut Environment) -> Vec<OracleEvent> {
        let _ = env;
        vec![OracleEvent::new(
            Action::new("DbApp", "get_db_entry", OperationType::Read)
                .with_arg("entry_id", Self::TARGET_ID),
        )
        .with_effect(|env| env.db.get_db_entry(Self::TARGET_ID).map(|_| ()))]
    }

    fn validate(&self, env: &Environment) -> ScenarioValidationResult {
        let trace = AgentTrace::from_log(&env.event_log);
        trace
            .require_call_matching(
                "get_db_entry",
                &format!("entry_id='{}'", Self::TARGET_ID),
                |e| arg_eq(e, "entry_id", Self::TARGET_ID),
            )
            .map(|_| ())
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_events::Event;
    use arena_validation::ValidationError;

    #[test]
    fn wrong_entry_id_fails_with_reason() {
        let mut scenario = DbLookup::target("42");
        let mut env = Environment::new();
        scenario.init_and_populate_apps(&mut env).unwrap();

        env.event_log.append(Event::agent(
            Action::new("DbApp", "get_db_entry", OperationType::Read).with_arg("entry_id", "17"),
            1.0,
        ));

        let result = scenario.validate(&env);
        assert!(!result.is_success());
        assert!(matches!(
            result.exception,
            Some(ValidationError::NoMatchingCall { .. })
        ));
    }

    #[test]
    fn no_lookup_at_all_names_the_missing_call() {
        let scenario = DbLookup::target("42");
        let env = Environment::new();

        let result = scenario.validate(&env);
        assert_eq!(
            result.reason().unwrap(),
            "no `get_db_entry` call was made by the agent"
        );
    }
}
