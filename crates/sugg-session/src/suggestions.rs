use tracing::{debug, warn};

use sugg_core::protocol::{Category, SuggestionResponse};

use super::types::{
    ActiveSuggestion, CheckTarget, Outcome, VisibleSuggestions, ATTENTION_CHECK_MARKER,
};
use super::ExperimentState;

impl ExperimentState {
    /// Accept a response only if it answers the current context.
    pub fn update_suggestions(&mut self, response: &SuggestionResponse) -> Vec<Outcome> {
        let current = self.context_sequence_num;
        if response.request_id != current {
            // The previous generation routinely loses the race against the
            // edit that superseded it.
            if response.request_id.saturating_add(1) == current {
                debug!(
                    request_id = response.request_id,
                    current,
                    "dropped previous-generation suggestions"
                );
            } else {
                warn!(
                    request_id = response.request_id,
                    current,
                    "dropped stale suggestions"
                );
            }
            return Vec::new();
        }
        self.last_suggestions_from_server = Some(response.clone());
        vec![Outcome::SuggestionsUpdated]
    }

    /// The suggestion bar as currently shown: the last response if it is
    /// still current, with condition filtering and the attention-check
    /// disguise applied to a copy.
    pub fn visible_suggestions(&self) -> VisibleSuggestions {
        let Some(resp) = self
            .last_suggestions_from_server
            .as_ref()
            .filter(|r| r.request_id == self.context_sequence_num)
        else {
            return VisibleSuggestions::default();
        };

        let mut visible = VisibleSuggestions {
            predictions: resp.predictions.clone(),
            synonyms: resp.synonyms.clone(),
            replacement_range: resp.replacement_range,
        };
        if !self.predictions_shown() {
            visible.predictions.clear();
        }
        if !self.condition.show_synonyms {
            visible.synonyms.clear();
        }

        if let Some(check) = self.attention_check {
            if let Some(category) = check.kind.category() {
                let word = visible
                    .slots_mut(category)
                    .get_mut(check.slot)
                    .and_then(|s| s.words.first_mut());
                if let Some(word) = word {
                    word.insert(0, ATTENTION_CHECK_MARKER);
                }
            }
        }
        visible
    }

    pub fn handle_tap_suggestion(&mut self, category: Category, slot: usize) -> Vec<Outcome> {
        let mut outcomes = match self.gate(CheckTarget::Suggestion { category, slot }) {
            Ok(outcomes) => outcomes,
            Err(outcomes) => return outcomes,
        };
        let applied = match category {
            Category::Predictions => self.tap_prediction(slot),
            Category::Synonyms => self.tap_synonym(slot),
        };
        if applied {
            outcomes.extend(self.state_changed());
        }
        outcomes
    }

    /// Insert the next word for a prediction slot. Repeated taps on the slot
    /// of the active suggestion walk through its words.
    fn tap_prediction(&mut self, slot: usize) -> bool {
        let continued = self
            .active_suggestion
            .as_ref()
            .filter(|active| active.slot == slot)
            .and_then(|active| Some((active.next_word()?.to_string(), active.advanced())));

        let (word, next) = match continued {
            Some(step) => step,
            None => {
                let visible = self.visible_suggestions();
                let Some(suggestion) = visible.predictions.get(slot) else {
                    debug!(slot, "tap on empty prediction slot");
                    return false;
                };
                let Some(word) = suggestion.first_word() else {
                    return false;
                };
                let first = ActiveSuggestion {
                    suggestion: suggestion.clone(),
                    slot,
                    word_idx: 0,
                };
                (word.to_string(), first.advanced())
            }
        };

        self.replace_current_word(&word);
        self.active_suggestion = next;
        true
    }

    /// Replace the response's replacement range with the synonym in `slot`.
    fn tap_synonym(&mut self, slot: usize) -> bool {
        let visible = self.visible_suggestions();
        let Some(word) = visible.word(Category::Synonyms, slot) else {
            debug!(slot, "tap on empty synonym slot");
            return false;
        };
        let Some((start, end)) = visible.replacement_range else {
            debug!(slot, "synonyms without replacement range");
            return false;
        };
        let len = self.text_len();
        if start > end || end > len {
            warn!(start, end, len, "replacement range outside text");
            return false;
        }

        let at_end = end == len;
        let mut insert = word.to_string();
        if at_end {
            insert.push(' ');
        }
        let taps = vec![None; insert.chars().count()];
        self.splice_text(start, end - start, &insert, taps);
        if at_end {
            self.last_space_was_auto = true;
        }
        self.active_suggestion = None;
        true
    }

    /// Insert a word chosen from the alternatives expansion.
    pub fn handle_select_alternative(&mut self, word: &str) -> Vec<Outcome> {
        let mut outcomes = match self.gate(CheckTarget::Alternative) {
            Ok(outcomes) => outcomes,
            Err(outcomes) => return outcomes,
        };
        if word.is_empty() {
            return outcomes;
        }
        self.replace_current_word(word);
        outcomes.extend(self.state_changed());
        outcomes
    }
}
