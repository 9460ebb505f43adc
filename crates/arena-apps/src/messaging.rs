//! Messaging app
//!
//! A user directory plus conversations of timestamped messages.
//! `send_message` finds or creates the one-to-one conversation with the
//! target user.

use crate::app::App;
use crate::error::AppError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub(crate) const APP_NAME: &str = "MessagingApp";

/// One message inside a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub sender_id: String,
    pub content: String,
    /// Simulated seconds; scenario-relative
    pub timestamp: f64,
}

impl Message {
    #[must_use]
    pub fn new(sender_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            content: content.into(),
            timestamp: 0.0,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// One conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_id: String,
    pub participant_ids: Vec<String>,
    pub title: String,
    pub messages: Vec<Message>,
}

impl Conversation {
    #[must_use]
    pub fn new(participant_ids: Vec<String>, title: impl Into<String>) -> Self {
        Self {
            conversation_id: Uuid::new_v4().simple().to_string(),
            participant_ids,
            title: title.into(),
            messages: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }
}

/// In-memory messaging app
#[derive(Debug)]
pub struct MessagingApp {
    current_user_id: String,
    /// user id -> display name
    users: IndexMap<String, String>,
    conversations: IndexMap<String, Conversation>,
}

impl Default for MessagingApp {
    fn default() -> Self {
        Self::with_current_user("user1", "User")
    }
}

impl MessagingApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an app whose point of view is the given user
    #[must_use]
    pub fn with_current_user(user_id: impl Into<String>, name: impl Into<String>) -> Self {
        let user_id = user_id.into();
        let mut users = IndexMap::new();
        users.insert(user_id.clone(), name.into());
        Self {
            current_user_id: user_id,
            users,
            conversations: IndexMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn current_user_id(&self) -> &str {
        &self.current_user_id
    }

    /// Register users by display name, returning their assigned ids
    pub fn add_users(&mut self, names: &[&str]) -> Vec<String> {
        names
            .iter()
            .map(|name| {
                let id = format!("u{}", self.users.len());
                self.users.insert(id.clone(), (*name).to_string());
                id
            })
            .collect()
    }

    /// Resolve a display name to a user id
    ///
    /// # Errors
    /// `AppError::NotFound` if no user carries that name.
    pub fn get_user_id(&self, name: &str) -> Result<String, AppError> {
        self.users
            .iter()
            .find(|(_, n)| n.as_str() == name)
            .map(|(id, _)| id.clone())
            .ok_or_else(|| AppError::not_found(APP_NAME, name))
    }

    /// Add a pre-built conversation; returns its id
    pub fn add_conversation(&mut self, conversation: Conversation) -> String {
        let id = conversation.conversation_id.clone();
        self.conversations.insert(id.clone(), conversation);
        id
    }

    /// Create an empty conversation with the given participants
    pub fn create_conversation(
        &mut self,
        participant_ids: Vec<String>,
        title: impl Into<String>,
    ) -> String {
        self.add_conversation(Conversation::new(participant_ids, title))
    }

    /// Page through a conversation's messages
    ///
    /// # Errors
    /// `AppError::NotFound` if the conversation id is unknown.
    pub fn read_conversation(
        &self,
        conversation_id: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Message>, AppError> {
        let conv = self
            .conversations
            .get(conversation_id)
            .ok_or_else(|| AppError::not_found(APP_NAME, conversation_id))?;
        Ok(conv.messages.iter().skip(offset).take(limit).cloned().collect())
    }

    /// Conversations ordered by the timestamp of their latest message,
    /// newest first
    #[must_use]
    pub fn list_recent_conversations(&self, offset: usize, limit: usize) -> Vec<Conversation> {
        let mut convs: Vec<Conversation> = self.conversations.values().cloned().collect();
        convs.sort_by(|a, b| {
            let ta = a.messages.last().map_or(0.0, |m| m.timestamp);
            let tb = b.messages.last().map_or(0.0, |m| m.timestamp);
            tb.partial_cmp(&ta).unwrap_or(std::cmp::Ordering::Equal)
        });
        convs.into_iter().skip(offset).take(limit).collect()
    }

    /// Send a message to a user, creating the one-to-one conversation if
    /// it does not exist yet; returns the conversation id
    ///
    /// # Errors
    /// `AppError::NotFound` if the user id is unknown.
    pub fn send_message(
        &mut self,
        user_id: &str,
        content: impl Into<String>,
    ) -> Result<String, AppError> {
        if !self.users.contains_key(user_id) {
            return Err(AppError::not_found(APP_NAME, user_id));
        }

        let conv_id = self
            .conversations
            .values()
            .find(|c| {
                c.participant_ids.len() == 2
                    && c.participant_ids.contains(&self.current_user_id)
                    && c.participant_ids.iter().any(|p| p == user_id)
            })
            .map(|c| c.conversation_id.clone());

        let conv_id = match conv_id {
            Some(id) => id,
            None => {
                let title = self.users.get(user_id).cloned().unwrap_or_default();
                self.create_conversation(
                    vec![self.current_user_id.clone(), user_id.to_string()],
                    title,
                )
            }
        };

        if let Some(conv) = self.conversations.get_mut(&conv_id) {
            conv.messages
                .push(Message::new(self.current_user_id.clone(), content));
        }
        Ok(conv_id)
    }
}

impl App for MessagingApp {
    fn name(&self) -> &'static str {
        APP_NAME
    }

    fn reset(&mut self) {
        let current = self.current_user_id.clone();
        let name = self.users.get(&current).cloned().unwrap_or_default();
        self.users.clear();
        self.users.insert(current, name);
        self.conversations.clear();
    }

    fn state(&self) -> Value {
        serde_json::json!({
            "users": self.users,
            "conversations": self.conversations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_users_and_resolve() {
        let mut app = MessagingApp::new();
        let ids = app.add_users(&["Alice", "Bob"]);
        assert_eq!(ids.len(), 2);
        assert_eq!(app.get_user_id("Alice").unwrap(), ids[0]);
        assert!(app.get_user_id("Charlie").is_err());
    }

    #[test]
    fn read_conversation_pages() {
        let mut app = MessagingApp::new();
        let ids = app.add_users(&["Bob"]);
        let conv = Conversation::new(
            vec!["user1".to_string(), ids[0].clone()],
            "Bob",
        )
        .with_message(Message::new(&ids[0], "Can we meet tomorrow?"))
        .with_message(Message::new("user1", "Sure"));
        let conv_id = app.add_conversation(conv);

        let msgs = app.read_conversation(&conv_id, 0, 10).unwrap();
        assert_eq!(msgs.len(), 2);
        assert_eq!(msgs[0].content, "Can we meet tomorrow?");

        assert!(app.read_conversation("missing", 0, 10).is_err());
    }

    #[test]
    fn send_message_creates_one_to_one_conversation() {
        let mut app = MessagingApp::new();
        let ids = app.add_users(&["Alice"]);

        let conv_id = app.send_message(&ids[0], "Hello, how are you?").unwrap();
        let again = app.send_message(&ids[0], "Still there?").unwrap();
        assert_eq!(conv_id, again);

        let msgs = app.read_conversation(&conv_id, 0, 10).unwrap();
        assert_eq!(msgs.len(), 2);
    }

    #[test]
    fn recent_conversations_sorted_by_latest_message() {
        let mut app = MessagingApp::new();
        let ids = app.add_users(&["Alice", "Bob"]);

        app.add_conversation(
            Conversation::new(vec!["user1".to_string(), ids[0].clone()], "Alice")
                .with_message(Message::new(&ids[0], "old").with_timestamp(1.0)),
        );
        let recent_id = app.add_conversation(
            Conversation::new(vec!["user1".to_string(), ids[1].clone()], "Bob")
                .with_message(Message::new(&ids[1], "new").with_timestamp(9.0)),
        );

        let convs = app.list_recent_conversations(0, 10);
        assert_eq!(convs[0].conversation_id, recent_id);
    }
}
