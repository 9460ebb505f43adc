//! Property tests for the event log hash chain

use arena_events::{Action, Event, EventLog, OperationType};
use proptest::prelude::*;

fn arbitrary_event() -> impl Strategy<Value = Event> {
    (
        prop::sample::select(vec![
            ("CabApp", "order_ride"),
            ("CabApp", "user_cancel_ride"),
            ("DbApp", "get_db_entry"),
            ("ContactsApp", "search_contacts"),
        ]),
        0.0f64..1000.0,
        "[a-z0-9]{0,12}",
    )
        .prop_map(|((app, function), timestamp, arg)| {
            Event::agent(
                Action::new(app, function, OperationType::Write).with_arg("value", arg),
                timestamp,
            )
        })
}

proptest! {
    #[test]
    fn appended_logs_always_verify(events in prop::collection::vec(arbitrary_event(), 0..32)) {
        let expected: Vec<String> = events
            .iter()
            .map(|e| e.action.function_name.clone())
            .collect();

        let log = EventLog::new();
        for event in events {
            log.append(event);
        }

        prop_assert!(log.verify_integrity().is_ok());
        prop_assert_eq!(log.len(), expected.len());

        let view = log.list_view();
        let got: Vec<String> = view.iter().map(|e| e.action.function_name.clone()).collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn every_link_chains_to_its_predecessor(events in prop::collection::vec(arbitrary_event(), 1..16)) {
        let log = EventLog::new();
        for event in events {
            log.append(event);
        }

        let view = log.list_view();
        prop_assert_eq!(view[0].prev_hash, [0u8; 32]);
        for pair in view.windows(2) {
            prop_assert_eq!(pair[1].prev_hash, pair[0].hash);
        }
    }
}
