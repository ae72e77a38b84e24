use sugg_core::condition::Condition;
use sugg_core::event::{Event, LoggedEvent};

use super::ExperimentState;

impl ExperimentState {
    /// Rebuild a session by feeding `events` through `handle_event` in order.
    pub fn replay<'a>(condition: Condition, events: impl IntoIterator<Item = &'a Event>) -> Self {
        let mut state = Self::new(condition);
        for event in events {
            state.handle_event(event);
        }
        state
    }

    pub fn replay_log(condition: Condition, log: &[LoggedEvent]) -> Self {
        Self::replay(condition, log.iter().map(|entry| &entry.event))
    }
}
