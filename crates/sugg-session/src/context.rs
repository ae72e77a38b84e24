use tracing::debug;

use sugg_core::protocol::{Constraints, CurWordItem, Promise, SuggestionRequest};
use sugg_core::text::{current_word_start, sentence_terminator_count};

use super::types::{SuggestionContext, AVOID_ALPHABET};
use super::ExperimentState;

impl ExperimentState {
    /// Derive the request context from the current text and tap history.
    /// Pure; recomputed on demand after every mutation.
    pub fn suggestion_context(&self) -> SuggestionContext {
        let start = current_word_start(&self.text);
        let prefix: String = self.text.chars().take(start).collect();
        let cur_word: Vec<CurWordItem> = self
            .text
            .chars()
            .skip(start)
            .zip(self.tap_locations.get(start..).unwrap_or(&[]))
            .map(|(letter, tap)| CurWordItem { letter, tap: *tap })
            .collect();
        let promise = self.active_suggestion.as_ref().map(|active| Promise {
            slot: active.slot,
            words: active.remaining().to_vec(),
        });

        debug!(
            seq = self.context_sequence_num,
            prefix_len = start,
            cur_word_len = cur_word.len(),
            has_promise = promise.is_some()
        );

        SuggestionContext {
            prefix,
            cur_word,
            constraints: Constraints {
                avoid_letter: self.avoid_letter(),
            },
            promise,
        }
    }

    /// The letter the participant may not type right now, if the condition
    /// enables the constraint. Rotates once per completed sentence.
    pub fn avoid_letter(&self) -> Option<char> {
        if !self.condition.avoid_letter {
            return None;
        }
        let idx = sentence_terminator_count(&self.text) % AVOID_ALPHABET.len();
        AVOID_ALPHABET.chars().nth(idx)
    }

    /// Outbound request for the current context. `timestamp` is the caller's
    /// wall clock in milliseconds.
    pub fn suggestion_request(&self, timestamp: u64) -> SuggestionRequest {
        let SuggestionContext {
            prefix,
            cur_word,
            constraints,
            promise,
        } = self.suggestion_context();
        let c = &self.condition;
        SuggestionRequest {
            request_id: self.context_sequence_num,
            sofar: prefix,
            cur_word,
            constraints,
            promise,
            domain: c.domain.clone(),
            rare_word_bonus: c.rare_word_bonus,
            use_sufarr: c.use_sufarr,
            temperature: c.temperature,
            alternatives: c.alternatives,
            timestamp,
        }
    }
}
