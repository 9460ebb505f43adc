//! Agent/user message channel
//!
//! The conduit the simulated user and agent exchange messages over.
//! Scenarios script the user side; the agent side is recorded so
//! validators can inspect what the agent reported back.

use crate::app::App;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub(crate) const APP_NAME: &str = "AgentUserInterface";

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sender {
    User,
    Agent,
}

/// One message on the channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub content: String,
    /// Simulated seconds; scenario-relative
    pub timestamp: f64,
}

/// In-memory message channel
#[derive(Debug, Default)]
pub struct AgentUserInterface {
    messages: Vec<ChatMessage>,
}

impl AgentUserInterface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a user -> agent message
    pub fn send_message_to_agent(&mut self, content: impl Into<String>, timestamp: f64) {
        self.messages.push(ChatMessage {
            sender: Sender::User,
            content: content.into(),
            timestamp,
        });
    }

    /// Record an agent -> user message
    pub fn send_message_to_user(&mut self, content: impl Into<String>, timestamp: f64) {
        self.messages.push(ChatMessage {
            sender: Sender::Agent,
            content: content.into(),
            timestamp,
        });
    }

    /// Most recent user-authored message
    #[must_use]
    pub fn get_last_message_from_user(&self) -> Option<&ChatMessage> {
        self.messages.iter().rev().find(|m| m.sender == Sender::User)
    }

    /// Full channel history in order
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

impl App for AgentUserInterface {
    fn name(&self) -> &'static str {
        APP_NAME
    }

    fn reset(&mut self) {
        self.messages.clear();
    }

    fn state(&self) -> Value {
        serde_json::to_value(&self.messages).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_user_message() {
        let mut agui = AgentUserInterface::new();
        agui.send_message_to_agent("Book me a ride", 1.0);
        agui.send_message_to_user("Booked a Default ride", 5.0);

        let last = agui.get_last_message_from_user().unwrap();
        assert_eq!(last.content, "Book me a ride");
        assert_eq!(agui.messages().len(), 2);
    }

    #[test]
    fn empty_channel_has_no_user_message() {
        let agui = AgentUserInterface::new();
        assert!(agui.get_last_message_from_user().is_none());
    }
}
