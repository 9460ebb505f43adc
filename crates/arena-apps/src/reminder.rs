//! Reminder app

use crate::app::App;
use crate::error::AppError;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub(crate) const APP_NAME: &str = "ReminderApp";

/// One reminder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub reminder_id: String,
    pub title: String,
    pub due_datetime: NaiveDateTime,
    pub description: Option<String>,
}

/// In-memory reminder app
#[derive(Debug, Default)]
pub struct ReminderApp {
    reminders: IndexMap<String, Reminder>,
}

impl ReminderApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reminder and return its generated id
    pub fn add_reminder(
        &mut self,
        title: impl Into<String>,
        due_datetime: NaiveDateTime,
        description: Option<String>,
    ) -> String {
        let reminder_id = Uuid::new_v4().simple().to_string();
        self.reminders.insert(
            reminder_id.clone(),
            Reminder {
                reminder_id: reminder_id.clone(),
                title: title.into(),
                due_datetime,
                description,
            },
        );
        reminder_id
    }

    /// Get a reminder by id
    ///
    /// # Errors
    /// `AppError::NotFound` if the id is unknown.
    pub fn get_reminder(&self, reminder_id: &str) -> Result<Reminder, AppError> {
        self.reminders
            .get(reminder_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(APP_NAME, reminder_id))
    }

    /// Delete a reminder by id
    ///
    /// # Errors
    /// `AppError::NotFound` if the id is unknown.
    pub fn delete_reminder(&mut self, reminder_id: &str) -> Result<String, AppError> {
        self.reminders
            .shift_remove(reminder_id)
            .map(|r| r.reminder_id)
            .ok_or_else(|| AppError::not_found(APP_NAME, reminder_id))
    }

    /// All reminders in insertion order
    #[must_use]
    pub fn list_reminders(&self) -> Vec<Reminder> {
        self.reminders.values().cloned().collect()
    }
}

impl App for ReminderApp {
    fn name(&self) -> &'static str {
        APP_NAME
    }

    fn reset(&mut self) {
        self.reminders.clear();
    }

    fn state(&self) -> Value {
        serde_json::to_value(&self.reminders).unwrap_or(Value::Null)
    }
}
