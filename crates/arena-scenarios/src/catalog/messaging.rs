//! Messaging scenarios (`ss6`, `ss11`)

use crate::environment::Environment;
use crate::scenario::{OracleEvent, Scenario, ScenarioError};
use arena_apps::{Conversation, Message};
use arena_events::{Action, OperationType};
use arena_validation::trace::arg_eq;
use arena_validation::{AgentTrace, ScenarioValidationResult, ValidationError};

/// `ss6`: read a specific conversation
#[derive(Default)]
pub struct ConversationRead {
    target_id: Option<String>,
}

impl Scenario for ConversationRead {
    fn id(&self) -> &'static str {
        "ss6"
    }

    fn init_and_populate_apps(&mut self, env: &mut Environment) -> Result<(), ScenarioError> {
        let ids = env.messaging.add_users(&["Alice", "Bob"]);
        let me = env.messaging.current_user_id().to_string();

        env.messaging.add_conversation(
            Conversation::new(vec![me.clone(), ids[0].clone()], "Alice")
                .with_message(Message::new(&ids[0], "Lunch today?").with_timestamp(1.0)),
        );
        let target = env.messaging.add_conversation(
            Conversation::new(vec![me, ids[1].clone()], "Bob")
                .with_message(
                    Message::new(&ids[1], "Did you see the contract?").with_timestamp(2.0),
                )
                .with_message(
                    Message::new(&ids[1], "We need an answer by Thursday.").with_timestamp(3.0),
                ),
        );
        self.target_id = Some(target.clone());

        env.post_user_message(&format!("Catch me up on conversation {target}."));
        Ok(())
    }

    fn build_events_flow(&mut self, env: &mut Environment) -> Vec<OracleEvent> {
        let _ = env;
        let target = self.target_id.clone().unwrap_or_default();
        let effect_target = target.clone();
        vec![OracleEvent::new(
            Action::new("MessagingApp", "read_conversation", OperationType::Read)
                .with_arg("conversation_id", target)
                .with_arg("offset", 0)
                .with_arg("limit", 10),
        )
        .with_effect(move |env| {
            env.messaging
                .read_conversation(&effect_target, 0, 10)
                .map(|_| ())
        })]
    }

    fn validate(&self, env: &Environment) -> ScenarioValidationResult {
        let Some(target) = self.target_id.as_deref() else {
            return ScenarioValidationResult::fail(ValidationError::failed(
                "scenario was never populated",
            ));
        };
        let trace = AgentTrace::from_log(&env.event_log);
        trace
            .require_call_matching(
                "read_conversation",
                &format!("conversation_id='{target}'"),
                |e| arg_eq(e, "conversation_id", target),
            )
            .map(|_| ())
            .into()
    }
}

/// `ss11`: send a message (trivially-true validator)
#[derive(Default)]
pub struct MessageSend {
    recipient_id: Option<String>,
}

impl Scenario for MessageSend {
    fn id(&self) -> &'static str {
        "ss11"
    }

    fn init_and_populate_apps(&mut self, env: &mut Environment) -> Result<(), ScenarioError> {
        let ids = env.messaging.add_users(&["Dana"]);
        self.recipient_id = ids.into_iter().next();

        env.post_user_message("Tell Dana I'm running ten minutes late.");
        Ok(())
    }

    fn build_events_flow(&mut self, env: &mut Environment) -> Vec<OracleEvent> {
        let _ = env;
        let recipient = self.recipient_id.clone().unwrap_or_default();
        let effect_recipient = recipient.clone();
        vec![OracleEvent::new(
            Action::new("MessagingApp", "send_message", OperationType::Write)
                .with_arg("user_id", recipient)
                .with_arg("content", "Running ten minutes late, sorry!"),
        )
        .with_effect(move |env| {
            env.messaging
                .send_message(&effect_recipient, "Running ten minutes late, sorry!")
                .map(|_| ())
        })]
    }

    fn validate(&self, _env: &Environment) -> ScenarioValidationResult {
        ScenarioValidationResult::ok()
    }
}
