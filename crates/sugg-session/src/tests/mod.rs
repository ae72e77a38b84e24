mod context;
mod replay;

use sugg_core::condition::Condition;
use sugg_core::protocol::{Suggestion, SuggestionResponse, Tap};

use super::{ExperimentState, Outcome};

/// No attention checks, predictions shown, synonyms hidden.
pub(super) fn plain_condition() -> Condition {
    Condition {
        attention_check_rate: 0.0,
        ..Condition::default()
    }
}

pub(super) fn synonyms_condition() -> Condition {
    Condition {
        show_synonyms: true,
        ..plain_condition()
    }
}

pub(super) fn tap_at(i: usize) -> Tap {
    Tap {
        x: 10.0 * i as f64,
        y: 5.0,
    }
}

// Helper: simulate typing a string one character at a time
pub(super) fn type_string(state: &mut ExperimentState, s: &str) -> Vec<Vec<Outcome>> {
    s.chars()
        .enumerate()
        .map(|(i, ch)| state.tap_key(ch, tap_at(i)))
        .collect()
}

/// Response answering the current context.
pub(super) fn current_response(
    state: &ExperimentState,
    predictions: &[&[&str]],
    synonyms: &[&[&str]],
) -> SuggestionResponse {
    SuggestionResponse {
        request_id: state.context_sequence_num(),
        predictions: predictions
            .iter()
            .map(|w| Suggestion::new(w.iter().copied()))
            .collect(),
        synonyms: synonyms
            .iter()
            .map(|w| Suggestion::new(w.iter().copied()))
            .collect(),
        replacement_range: None,
    }
}
