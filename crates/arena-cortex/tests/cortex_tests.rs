//! Cortex end to end: register, ingest, render into a prompt

use arena_cortex::{append_context_to_system, ContextCortex, StepHook, Visibility};
use arena_events::{TraceEntry, TraceEntryKind};
use arena_test_utils::answer_trace;
use pretty_assertions::assert_eq;

#[test]
fn ingested_episodes_reach_other_agents_prompts() {
    let cortex = ContextCortex::new();
    cortex.register_agent("cab_agent", Visibility::All);
    cortex.register_agent("db_agent", Visibility::All);

    cortex
        .ingest(
            answer_trace("cab_agent", "Booked a Default ride to the airport."),
            serde_json::Map::new(),
        )
        .unwrap();

    let episodes = cortex.episodes_for_agent("db_agent");
    let system = append_context_to_system("You are a database assistant.", &episodes);
    assert_eq!(
        system,
        "You are a database assistant.\n\n\
         <relevant_multiagent_context>\n\
         - [cab_agent]: Booked a Default ride to the airport.\n\
         </relevant_multiagent_context>"
    );
}

#[test]
fn hook_ingests_incrementally_across_steps() {
    let cortex = ContextCortex::new();
    cortex.register_agent("cab_agent", Visibility::All);
    cortex.register_agent("db_agent", Visibility::All);

    let mut hook = StepHook::new("cab_agent");
    hook.record(TraceEntry::new(
        TraceEntryKind::ToolCall,
        "list_rides(start_location='Downtown', end_location='Airport')",
        1.0,
    ));
    hook.record(TraceEntry::new(
        TraceEntryKind::Answer,
        "Cheapest option is the Default tier.",
        2.0,
    ));
    let first = hook.post_step(&cortex).unwrap();
    assert!(first.starts_with("cab_agent_ep_"));

    hook.record(TraceEntry::new(
        TraceEntryKind::Answer,
        "Ride booked.",
        3.0,
    ));
    hook.post_step(&cortex).unwrap();

    let episodes = cortex.episodes_for_agent("db_agent");
    assert_eq!(episodes.len(), 2);
    assert_eq!(episodes[0].summary, "Cheapest option is the Default tier.");
    assert_eq!(episodes[1].summary, "Ride booked.");
    assert_eq!(episodes[1].raw_trace.logs.len(), 1);
}

#[test]
fn visibility_masks_apply_at_read_time() {
    let cortex = ContextCortex::new();
    cortex.register_agent("a", Visibility::All);
    cortex.register_agent("b", Visibility::All);
    cortex.register_agent("narrow", Visibility::sources(&["b"]));

    cortex
        .ingest(answer_trace("a", "from a"), serde_json::Map::new())
        .unwrap();
    cortex
        .ingest(answer_trace("b", "from b"), serde_json::Map::new())
        .unwrap();

    let visible: Vec<String> = cortex
        .episodes_for_agent("narrow")
        .into_iter()
        .map(|e| e.source_agent_id)
        .collect();
    assert_eq!(visible, vec!["b".to_string()]);
}
