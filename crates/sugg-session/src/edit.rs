use sugg_core::protocol::Tap;
use sugg_core::text::{char_len, current_word_start, is_word_char, splice_chars};

use super::types::Outcome;
use super::ExperimentState;

impl ExperimentState {
    /// Replace `delete_count` chars at `start` with `insert`, keeping
    /// `tap_locations` aligned with the text.
    pub(super) fn splice_text(
        &mut self,
        start: usize,
        delete_count: usize,
        insert: &str,
        taps: Vec<Option<Tap>>,
    ) {
        debug_assert_eq!(char_len(insert), taps.len());
        let len = self.text_len();
        let start = start.min(len);
        let end = start.saturating_add(delete_count).min(len);
        splice_chars(&mut self.text, start, end - start, insert);
        self.tap_locations.splice(start..end, taps);
    }

    /// Replace the in-progress word with `word` plus an automatic space.
    /// A word that starts with punctuation also swallows a preceding auto-space.
    pub(super) fn replace_current_word(&mut self, word: &str) {
        let len = self.text_len();
        let mut start = current_word_start(&self.text);
        let attaches_left = word.chars().next().is_some_and(|c| !is_word_char(c));
        if start == len && start > 0 && self.last_space_was_auto && attaches_left {
            start -= 1;
        }

        let insert = format!("{word} ");
        let taps = vec![None; char_len(&insert)];
        self.splice_text(start, len - start, &insert, taps);
        self.last_space_was_auto = true;
        self.active_suggestion = None;
    }

    /// Bookkeeping after every text-affecting action.
    pub(super) fn state_changed(&mut self) -> Vec<Outcome> {
        self.context_sequence_num += 1;
        self.inject_attention_check();
        vec![Outcome::Changed]
    }
}
