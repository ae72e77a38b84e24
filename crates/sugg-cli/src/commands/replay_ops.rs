use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use sugg_core::condition::Condition;
use sugg_core::event_log::read_event_log;
use sugg_core::protocol::ClientMessage;
use sugg_session::{CheckKind, ExperimentState};

use super::CliError;

#[derive(Debug, Serialize)]
pub struct CheckSummary {
    pub total: u32,
    pub passed: u32,
}

/// Derived state of a replayed session, printed by `suggtool replay`.
#[derive(Debug, Serialize)]
pub struct ReplaySummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
    pub event_count: usize,
    pub text: String,
    pub context_sequence_num: u64,
    pub word_count: usize,
    pub attention_checks: BTreeMap<&'static str, CheckSummary>,
}

impl ReplaySummary {
    pub fn new(
        state: &ExperimentState,
        event_count: usize,
        participant_id: Option<String>,
    ) -> Self {
        let attention_checks = CheckKind::ALL
            .into_iter()
            .map(|kind| {
                let stats = state.attention_check_stats(kind);
                (
                    kind.name(),
                    CheckSummary {
                        total: stats.total,
                        passed: stats.passed,
                    },
                )
            })
            .collect();
        Self {
            participant_id,
            event_count,
            text: state.text().to_string(),
            context_sequence_num: state.context_sequence_num(),
            word_count: state.word_count(),
            attention_checks,
        }
    }
}

pub struct Replayed {
    pub state: ExperimentState,
    pub summary: ReplaySummary,
}

/// Read `log` and feed it through a fresh session.
pub fn replay_file(log: &Path, condition: Condition) -> Result<Replayed, CliError> {
    let entries = read_event_log(log)?;
    let participant_id = entries.iter().find_map(|e| e.participant_id.clone());
    let state = ExperimentState::replay_log(condition, &entries);
    info!(
        path = %log.display(),
        events = entries.len(),
        seq = state.context_sequence_num(),
        "replayed event log"
    );
    Ok(Replayed {
        summary: ReplaySummary::new(&state, entries.len(), participant_id),
        state,
    })
}

pub fn replay_json(log: &Path, condition: Condition) -> Result<String, CliError> {
    let replayed = replay_file(log, condition)?;
    Ok(serde_json::to_string_pretty(&replayed.summary)?)
}

/// The `requestSuggestions` frame the client would send after the last
/// event in `log`.
pub fn request_json(log: &Path, condition: Condition, timestamp: u64) -> Result<String, CliError> {
    let replayed = replay_file(log, condition)?;
    let msg = ClientMessage::RequestSuggestions(replayed.state.suggestion_request(timestamp));
    Ok(serde_json::to_string_pretty(&msg)?)
}
