//! Execution environment for one scenario run
//!
//! The environment owns every mock app plus the event log, and is the
//! only place tool calls get recorded. Scenario time is a simulated
//! clock in seconds, advanced explicitly by the runner.

use arena_apps::{
    AgentUserInterface, ApartmentApp, App, CabApp, CalendarApp, ContactsApp, DbApp, EmailApp,
    MessagingApp, ReminderApp, ShoppingApp,
};
use arena_events::{Action, Event, EventLog, EventType, OperationType};
use serde_json::Value;

/// Apps, event log and simulated clock for one run
#[derive(Debug, Default)]
pub struct Environment {
    pub db: DbApp,
    pub contacts: ContactsApp,
    pub calendar: CalendarApp,
    pub email: EmailApp,
    pub messaging: MessagingApp,
    pub shopping: ShoppingApp,
    pub reminder: ReminderApp,
    pub apartment: ApartmentApp,
    pub cab: CabApp,
    pub agui: AgentUserInterface,
    pub event_log: EventLog,
    clock: f64,
}

impl Environment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current simulated time in seconds since scenario start
    #[inline]
    #[must_use]
    pub fn now(&self) -> f64 {
        self.clock
    }

    /// Advance the simulated clock
    pub fn advance(&mut self, seconds: f64) {
        self.clock += seconds;
    }

    /// Record an agent tool call at the current simulated time
    pub fn record_agent(&self, action: Action) {
        self.event_log.append(Event::agent(action, self.clock));
    }

    /// Record an event of any kind at the current simulated time
    pub fn record(&self, event_type: EventType, action: Action) {
        self.event_log
            .append(Event::new(event_type, action, self.clock));
    }

    fn apps(&self) -> [&dyn App; 10] {
        [
            &self.db,
            &self.contacts,
            &self.calendar,
            &self.email,
            &self.messaging,
            &self.shopping,
            &self.reminder,
            &self.apartment,
            &self.cab,
            &self.agui,
        ]
    }

    /// JSON snapshot of every app's state, keyed by app name
    #[must_use]
    pub fn snapshot(&self) -> Value {
        let mut map = serde_json::Map::new();
        for app in self.apps() {
            map.insert(app.name().to_string(), app.state());
        }
        Value::Object(map)
    }

    /// Drop all app state; the event log and clock are untouched
    pub fn reset_apps(&mut self) {
        self.db.reset();
        self.contacts.reset();
        self.calendar.reset();
        self.email.reset();
        self.messaging.reset();
        self.shopping.reset();
        self.reminder.reset();
        self.apartment.reset();
        self.cab.reset();
        self.agui.reset();
    }

    /// Script a user message: delivered on the channel and recorded as a
    /// User event
    pub fn post_user_message(&mut self, content: &str) {
        self.agui.send_message_to_agent(content, self.clock);
        self.record(
            EventType::User,
            Action::new(
                "AgentUserInterface",
                "send_message_to_agent",
                OperationType::Write,
            )
            .with_arg("content", content),
        );
    }
}
