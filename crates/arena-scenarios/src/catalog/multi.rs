//! Multi-app information gathering scenario (`ms1`)
//!
//! The user asks for a briefing about next Tuesday's meeting with Jane
//! Smith. A correct agent touches exactly the five relevant apps and
//! none of the distractors, and its calendar query must cover the
//! meeting's time range.

use crate::environment::Environment;
use crate::scenario::{OracleEvent, Scenario, ScenarioError};
use arena_apps::{Contact, Conversation, DbEntry, Email, EmailFolder, Message, ServiceType};
use arena_events::{Action, Event, OperationType};
use arena_validation::trace::{arg_contains, arg_eq};
use arena_validation::{AgentTrace, ScenarioValidationResult, ValidationError};
use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime, Utc, Weekday};

const CONTACT_NAME: &str = "Jane Smith";
const DB_TARGET_ID: &str = "88";
const REQUIRED_APPS: [&str; 5] = [
    "ContactsApp",
    "CalendarApp",
    "EmailApp",
    "MessagingApp",
    "DbApp",
];
const FORBIDDEN_APPS: [&str; 3] = ["ApartmentApp", "CabApp", "ReminderApp"];
const DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

fn next_tuesday_at(time: NaiveTime) -> NaiveDateTime {
    let today = Utc::now().date_naive();
    let ahead = (Weekday::Tue.num_days_from_monday() + 7
        - today.weekday().num_days_from_monday())
        % 7;
    let ahead = if ahead == 0 { 7 } else { ahead };
    (today + Duration::days(i64::from(ahead))).and_time(time)
}

fn parse_arg_datetime(event: &Event, key: &str) -> Option<NaiveDateTime> {
    event
        .action
        .arg_str(key)
        .and_then(|s| NaiveDateTime::parse_from_str(s, DATETIME_FMT).ok())
}

/// `ms1`: gather meeting context across five apps
#[derive(Default)]
pub struct MultiAppGather {
    email_id: Option<String>,
    conversation_id: Option<String>,
    meeting_start: Option<NaiveDateTime>,
    meeting_end: Option<NaiveDateTime>,
}

impl Scenario for MultiAppGather {
    fn id(&self) -> &'static str {
        "ms1"
    }

    fn init_and_populate_apps(&mut self, env: &mut Environment) -> Result<(), ScenarioError> {
        let Some(two_pm) = NaiveTime::from_hms_opt(14, 0, 0) else {
            return Ok(());
        };
        let start = next_tuesday_at(two_pm);
        let end = start + Duration::hours(1);
        self.meeting_start = Some(start);
        self.meeting_end = Some(end);

        env.contacts.add_contact(
            Contact::new("Jane", "Smith")
                .with_email("jane.smith@example.com")
                .with_phone("5559876543")
                .with_job("Architect"),
        );
        env.calendar.add_calendar_event(
            "Project review with Jane Smith",
            start,
            end,
            Some("Bring the revised plans".to_string()),
            vec!["jane.smith@example.com".to_string()],
        );
        let email_id = env.email.add_email(
            Email::new(
                "jane.smith@example.com",
                vec!["user@example.com".to_string()],
                "Agenda for Tuesday",
                "Attaching the points I'd like to cover.",
            ),
            EmailFolder::Inbox,
        );
        self.email_id = Some(email_id);

        let ids = env.messaging.add_users(&["Jane Smith"]);
        let me = env.messaging.current_user_id().to_string();
        let conv_id = env.messaging.add_conversation(
            Conversation::new(vec![me, ids[0].clone()], CONTACT_NAME).with_message(
                Message::new(&ids[0], "Looking forward to Tuesday!").with_timestamp(1.0),
            ),
        );
        self.conversation_id = Some(conv_id);

        env.db.create_db_entry(
            DbEntry::new(DB_TARGET_ID, CONTACT_NAME)
                .with_email("jane.smith@example.com")
                .with_location("Portland", "OR", "97201", "USA"),
        );

        // Distractor state; touching these apps fails validation.
        env.apartment.add_new_apartment(
            "Garden Flat",
            "3 Rose Lane",
            "97210",
            1900.0,
            2,
            1,
            780,
            "Apartment",
        );
        env.cab.get_quotation("Downtown", "Airport", ServiceType::Default, 0.0);
        if let Some(due) = start.checked_add_signed(Duration::days(1)) {
            env.reminder.add_reminder("Water the plants", due, None);
        }

        env.post_user_message(
            "Brief me for my meeting with Jane Smith next Tuesday: her contact \
             details, the calendar slot, her last email, our chat, and her \
             database record.",
        );
        Ok(())
    }

    fn build_events_flow(&mut self, env: &mut Environment) -> Vec<OracleEvent> {
        let _ = env;
        let Some(start) = self.meeting_start else {
            return Vec::new();
        };
        // The oracle queries the whole meeting day, comfortably containing
        // the event.
        let day_start = start.date().and_time(NaiveTime::MIN);
        let day_end = day_start + Duration::days(1);
        let email_id = self.email_id.clone().unwrap_or_default();
        let conv_id = self.conversation_id.clone().unwrap_or_default();

        let effect_email = email_id.clone();
        let effect_conv = conv_id.clone();
        vec![
            OracleEvent::new(
                Action::new("ContactsApp", "search_contacts", OperationType::Read)
                    .with_arg("query", CONTACT_NAME),
            )
            .with_effect(|env| {
                env.contacts.search_contacts(CONTACT_NAME);
                Ok(())
            }),
            OracleEvent::new(
                Action::new(
                    "CalendarApp",
                    "get_calendar_events_from_to",
                    OperationType::Read,
                )
                .with_arg("start_datetime", day_start.format(DATETIME_FMT).to_string())
                .with_arg("end_datetime", day_end.format(DATETIME_FMT).to_string()),
            )
            .with_effect(move |env| {
                env.calendar.get_calendar_events_from_to(day_start, day_end);
                Ok(())
            }),
            OracleEvent::new(
                Action::new("EmailApp", "get_email_by_id", OperationType::Read)
                    .with_arg("email_id", email_id),
            )
            .with_effect(move |env| env.email.get_email_by_id(&effect_email).map(|_| ())),
            OracleEvent::new(
                Action::new("MessagingApp", "read_conversation", OperationType::Read)
                    .with_arg("conversation_id", conv_id)
                    .with_arg("offset", 0)
                    .with_arg("limit", 10),
            )
            .with_effect(move |env| {
                env.messaging
                    .read_conversation(&effect_conv, 0, 10)
                    .map(|_| ())
            }),
            OracleEvent::new(
                Action::new("DbApp", "get_db_entry", OperationType::Read)
                    .with_arg("entry_id", DB_TARGET_ID),
            )
            .with_effect(|env| env.db.get_db_entry(DB_TARGET_ID).map(|_| ())),
        ]
    }

    fn validate(&self, env: &Environment) -> ScenarioValidationResult {
        let (Some(email_id), Some(conv_id), Some(start), Some(end)) = (
            self.email_id.as_deref(),
            self.conversation_id.as_deref(),
            self.meeting_start,
            self.meeting_end,
        ) else {
            return ScenarioValidationResult::fail(ValidationError::failed(
                "scenario was never populated",
            ));
        };

        let trace = AgentTrace::from_log(&env.event_log);
        trace
            .require_apps(&REQUIRED_APPS)
            .and_then(|()| trace.forbid_apps(&FORBIDDEN_APPS))
            .and_then(|()| {
                trace
                    .require_call_matching(
                        "search_contacts",
                        &format!("query containing '{CONTACT_NAME}'"),
                        |e| arg_contains(e, "query", CONTACT_NAME),
                    )
                    .map(|_| ())
            })
            .and_then(|()| {
                trace
                    .require_call_matching(
                        "get_calendar_events_from_to",
                        &format!(
                            "a range containing {} .. {}",
                            start.format(DATETIME_FMT),
                            end.format(DATETIME_FMT)
                        ),
                        |e| {
                            let (Some(q_start), Some(q_end)) = (
                                parse_arg_datetime(e, "start_datetime"),
                                parse_arg_datetime(e, "end_datetime"),
                            ) else {
                                return false;
                            };
                            q_start <= start && q_end >= end
                        },
                    )
                    .map(|_| ())
            })
            .and_then(|()| {
                trace
                    .require_call_matching("get_email_by_id", &format!("email_id='{email_id}'"), |e| {
                        arg_eq(e, "email_id", email_id)
                    })
                    .map(|_| ())
            })
            .and_then(|()| {
                trace
                    .require_call_matching(
                        "read_conversation",
                        &format!("conversation_id='{conv_id}'"),
                        |e| arg_eq(e, "conversation_id", conv_id),
                    )
                    .map(|_| ())
            })
            .and_then(|()| {
                trace
                    .require_call_matching(
                        "get_db_entry",
                        &format!("entry_id='{DB_TARGET_ID}'"),
                        |e| arg_eq(e, "entry_id", DB_TARGET_ID),
                    )
                    .map(|_| ())
            })
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_and_validate;

    fn populated() -> (MultiAppGather, Environment) {
        let mut scenario = MultiAppGather::default();
        let mut env = Environment::new();
        scenario.init_and_populate_apps(&mut env).unwrap();
        (scenario, env)
    }

    fn replay_oracle(scenario: &mut MultiAppGather, env: &mut Environment) {
        for mut oracle in scenario.build_events_flow(env) {
            oracle.apply(env).unwrap();
            env.record_agent(oracle.action);
        }
    }

    #[test]
    fn oracle_flow_satisfies_every_check() {
        let report = run_and_validate(&mut MultiAppGather::default()).unwrap();
        assert!(report.passed(), "{:?}", report.result.reason());
    }

    #[test]
    fn touching_a_distractor_app_fails_by_name() {
        let (mut scenario, mut env) = populated();
        replay_oracle(&mut scenario, &mut env);
        env.record_agent(
            Action::new("CabApp", "list_rides", OperationType::Read)
                .with_arg("start_location", "Downtown")
                .with_arg("end_location", "Airport"),
        );

        let result = scenario.validate(&env);
        assert!(!result.is_success());
        assert!(result.reason().unwrap().contains("CabApp"));
    }

    #[test]
    fn skipping_an_app_reports_it_missing() {
        let (mut scenario, mut env) = populated();
        let mut flow = scenario.build_events_flow(&mut env);
        // Drop the DbApp lookup.
        flow.retain(|o| o.action.class_name != "DbApp");
        for mut oracle in flow {
            oracle.apply(&mut env).unwrap();
            env.record_agent(oracle.action);
        }

        let result = scenario.validate(&env);
        assert!(!result.is_success());
        assert!(result.reason().unwrap().contains("DbApp"));
    }

    #[test]
    fn calendar_query_must_contain_the_meeting_range() {
        let (mut scenario, mut env) = populated();
        replay_oracle(&mut scenario, &mut env);

        // A second, too-narrow query does not spoil the earlier good one.
        let start = scenario.meeting_start.unwrap();
        env.record_agent(
            Action::new(
                "CalendarApp",
                "get_calendar_events_from_to",
                OperationType::Read,
            )
            .with_arg(
                "start_datetime",
                (start + Duration::minutes(30)).format(DATETIME_FMT).to_string(),
            )
            .with_arg(
                "end_datetime",
                (start + Duration::minutes(40)).format(DATETIME_FMT).to_string(),
            ),
        );
        assert!(scenario.validate(&env).is_success());
    }

    #[test]
    fn narrow_only_calendar_query_fails() {
        let (mut scenario, mut env) = populated();
        let mut flow = scenario.build_events_flow(&mut env);
        let start = scenario.meeting_start.unwrap();

        // Replace the calendar query with one starting after the meeting
        // begins.
        for oracle in &mut flow {
            if oracle.action.function_name == "get_calendar_events_from_to" {
                oracle.action = Action::new(
                    "CalendarApp",
                    "get_calendar_events_from_to",
                    OperationType::Read,
                )
                .with_arg(
                    "start_datetime",
                    (start + Duration::minutes(30)).format(DATETIME_FMT).to_string(),
                )
                .with_arg(
                    "end_datetime",
                    (start + Duration::hours(2)).format(DATETIME_FMT).to_string(),
                );
            }
        }
        for mut oracle in flow {
            // Effects still run against the original query; only the
            // recorded action matters to the validator.
            let _ = oracle.apply(&mut env);
            env.record_agent(oracle.action);
        }

        let result = scenario.validate(&env);
        assert!(!result.is_success());
        assert!(result
            .reason()
            .unwrap()
            .contains("get_calendar_events_from_to"));
    }
}
