//! Calendar app

use crate::app::App;
use crate::error::AppError;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub(crate) const APP_NAME: &str = "CalendarApp";

/// One calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub event_id: String,
    pub title: String,
    pub start_datetime: NaiveDateTime,
    pub end_datetime: NaiveDateTime,
    pub description: Option<String>,
    pub attendees: Vec<String>,
}

/// In-memory calendar app
#[derive(Debug, Default)]
pub struct CalendarApp {
    events: IndexMap<String, CalendarEvent>,
}

impl CalendarApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event and return its generated id
    pub fn add_calendar_event(
        &mut self,
        title: impl Into<String>,
        start_datetime: NaiveDateTime,
        end_datetime: NaiveDateTime,
        description: Option<String>,
        attendees: Vec<String>,
    ) -> String {
        let event_id = Uuid::new_v4().simple().to_string();
        self.events.insert(
            event_id.clone(),
            CalendarEvent {
                event_id: event_id.clone(),
                title: title.into(),
                start_datetime,
                end_datetime,
                description,
                attendees,
            },
        );
        event_id
    }

    /// Get an event by id
    ///
    /// # Errors
    /// `AppError::NotFound` if the id is unknown.
    pub fn get_calendar_event(&self, event_id: &str) -> Result<CalendarEvent, AppError> {
        self.events
            .get(event_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(APP_NAME, event_id))
    }

    /// Events overlapping the half-open range `[start, end)`
    #[must_use]
    pub fn get_calendar_events_from_to(
        &self,
        start_datetime: NaiveDateTime,
        end_datetime: NaiveDateTime,
    ) -> Vec<CalendarEvent> {
        self.events
            .values()
            .filter(|e| e.start_datetime < end_datetime && e.end_datetime > start_datetime)
            .cloned()
            .collect()
    }

    /// Delete an event by id
    ///
    /// # Errors
    /// `AppError::NotFound` if the id is unknown.
    pub fn delete_calendar_event(&mut self, event_id: &str) -> Result<String, AppError> {
        self.events
            .shift_remove(event_id)
            .map(|e| e.event_id)
            .ok_or_else(|| AppError::not_found(APP_NAME, event_id))
    }

    /// All events in insertion order
    #[must_use]
    pub fn list_calendar_events(&self) -> Vec<CalendarEvent> {
        self.events.values().cloned().collect()
    }
}

impl App for CalendarApp {
    fn name(&self) -> &'static str {
        APP_NAME
    }

    fn reset(&mut self) {
        self.events.clear();
    }

    fn state(&self) -> Value {
        serde_json::to_value(&self.events).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn add_and_get() {
        let mut cal = CalendarApp::new();
        let id = cal.add_calendar_event(
            "Doctor Appointment",
            ts("2024-01-16 14:00:00"),
            ts("2024-01-16 15:00:00"),
            Some("Annual checkup".to_string()),
            vec![],
        );

        let event = cal.get_calendar_event(&id).unwrap();
        assert_eq!(event.title, "Doctor Appointment");
        assert!(cal.get_calendar_event("missing").is_err());
    }

    #[test]
    fn range_query_returns_overlapping_events() {
        let mut cal = CalendarApp::new();
        cal.add_calendar_event(
            "Standup",
            ts("2024-01-20 09:00:00"),
            ts("2024-01-20 09:30:00"),
            None,
            vec![],
        );
        cal.add_calendar_event(
            "Lunch",
            ts("2024-01-20 12:00:00"),
            ts("2024-01-20 13:00:00"),
            None,
            vec![],
        );
        // Straddles the range start
        cal.add_calendar_event(
            "Early sync",
            ts("2024-01-20 08:30:00"),
            ts("2024-01-20 09:15:00"),
            None,
            vec![],
        );

        let hits =
            cal.get_calendar_events_from_to(ts("2024-01-20 09:00:00"), ts("2024-01-20 10:00:00"));
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn delete_removes_event() {
        let mut cal = CalendarApp::new();
        let id = cal.add_calendar_event(
            "Standup",
            ts("2024-01-20 09:00:00"),
            ts("2024-01-20 09:30:00"),
            None,
            vec![],
        );
        cal.delete_calendar_event(&id).unwrap();
        assert!(cal.get_calendar_event(&id).is_err());
    }
}
