//! Experiment state machine for the suggestion study.
//!
//! `ExperimentState` owns one participant's typing session: the text and its
//! per-char tap history, the context sequence number that correlates
//! suggestion requests with responses, the multi-word suggestion being walked,
//! and the covert attention checks. Every input arrives as an
//! [`Event`](sugg_core::event::Event) through [`ExperimentState::handle_event`]
//! and returns a list of [`Outcome`] notifications.

pub(crate) mod types;

mod attention;
mod context;
mod dispatch;
mod edit;
mod replay;
mod suggestions;

#[cfg(test)]
mod tests;

use sugg_core::condition::Condition;
use sugg_core::protocol::{SuggestionResponse, Tap};
use sugg_core::text::{char_len, count_words};

pub use types::{
    ActiveSuggestion, AttentionCheck, AttentionCheckStats, CheckKind, Outcome, SuggestionContext,
    VisibleSuggestions, ATTENTION_CHECK_MARKER, AVOID_ALPHABET,
};

/// One participant's session under one condition.
#[derive(Debug, Clone)]
pub struct ExperimentState {
    condition: Condition,

    text: String,
    /// One slot per char of `text`; `None` for programmatically inserted chars.
    tap_locations: Vec<Option<Tap>>,
    /// Logical clock; bumped once per text-affecting action.
    context_sequence_num: u64,
    last_suggestions_from_server: Option<SuggestionResponse>,
    active_suggestion: Option<ActiveSuggestion>,
    last_space_was_auto: bool,

    attention_check: Option<AttentionCheck>,
    /// Indexed by `CheckKind::index`.
    attention_check_stats: [AttentionCheckStats; 3],
}

impl ExperimentState {
    pub fn new(condition: Condition) -> Self {
        Self {
            condition,
            text: String::new(),
            tap_locations: Vec::new(),
            context_sequence_num: 0,
            last_suggestions_from_server: None,
            active_suggestion: None,
            last_space_was_auto: false,
            attention_check: None,
            attention_check_stats: [AttentionCheckStats::default(); 3],
        }
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tap_locations(&self) -> &[Option<Tap>] {
        &self.tap_locations
    }

    pub fn context_sequence_num(&self) -> u64 {
        self.context_sequence_num
    }

    pub fn last_space_was_auto(&self) -> bool {
        self.last_space_was_auto
    }

    pub fn active_suggestion(&self) -> Option<&ActiveSuggestion> {
        self.active_suggestion.as_ref()
    }

    pub fn attention_check(&self) -> Option<AttentionCheck> {
        self.attention_check
    }

    pub fn attention_check_stats(&self, kind: CheckKind) -> AttentionCheckStats {
        self.attention_check_stats[kind.index()]
    }

    /// The last response received, whether or not it is still current.
    pub fn last_suggestions_from_server(&self) -> Option<&SuggestionResponse> {
        self.last_suggestions_from_server.as_ref()
    }

    pub fn word_count(&self) -> usize {
        count_words(&self.text)
    }

    fn text_len(&self) -> usize {
        char_len(&self.text)
    }

    /// True when the text is empty or ends in whitespace.
    fn cur_word_is_empty(&self) -> bool {
        self.text
            .chars()
            .next_back()
            .map_or(true, char::is_whitespace)
    }
}
