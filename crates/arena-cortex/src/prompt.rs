//! Rendering visible episodes into an agent's prompt

use crate::episode::Episode;
use std::fmt::Write as _;

const BLOCK_OPEN: &str = "<relevant_multiagent_context>";
const BLOCK_CLOSE: &str = "</relevant_multiagent_context>";

/// Render episodes as the shared-context block, one summary line per
/// episode; `None` when there is nothing to show
#[must_use]
pub fn render_context_block(episodes: &[Episode]) -> Option<String> {
    if episodes.is_empty() {
        return None;
    }
    let mut block = String::from(BLOCK_OPEN);
    block.push('\n');
    for ep in episodes {
        // Rendering to a String cannot fail.
        let _ = writeln!(block, "- [{}]: {}", ep.source_agent_id, ep.summary);
    }
    block.push_str(BLOCK_CLOSE);
    Some(block)
}

/// Produce a system message extended with the shared-context block
///
/// The caller's message is untouched; a run uses the returned snapshot
/// for one model call only.
#[must_use]
pub fn append_context_to_system(system_message: &str, episodes: &[Episode]) -> String {
    match render_context_block(episodes) {
        Some(block) => format!("{system_message}\n\n{block}"),
        None => system_message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_events::{StepTrace, TraceEntry, TraceEntryKind};
    use pretty_assertions::assert_eq;

    fn episode(source: &str, summary: &str) -> Episode {
        let trace = StepTrace::new(source).with_entry(TraceEntry::new(
            TraceEntryKind::Answer,
            summary,
            1.0,
        ));
        Episode::from_trace(format!("{source}_ep_00000000"), trace, serde_json::Map::new())
    }

    #[test]
    fn block_lists_one_line_per_episode() {
        let episodes = vec![episode("cab_agent", "booked a ride"), episode("db_agent", "found the entry")];
        let block = render_context_block(&episodes).unwrap();
        assert_eq!(
            block,
            "<relevant_multiagent_context>\n\
             - [cab_agent]: booked a ride\n\
             - [db_agent]: found the entry\n\
             </relevant_multiagent_context>"
        );
    }

    #[test]
    fn empty_episode_list_leaves_system_message_alone() {
        assert!(render_context_block(&[]).is_none());
        assert_eq!(append_context_to_system("be helpful", &[]), "be helpful");
    }

    #[test]
    fn system_message_gains_block() {
        let extended = append_context_to_system("be helpful", &[episode("a", "did a thing")]);
        assert!(extended.starts_with("be helpful\n\n<relevant_multiagent_context>"));
        assert!(extended.ends_with("</relevant_multiagent_context>"));
    }
}
