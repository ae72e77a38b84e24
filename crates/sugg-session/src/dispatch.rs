use tracing::{debug, debug_span};

use sugg_core::event::Event;
use sugg_core::protocol::Tap;
use sugg_core::text::is_word_char;

use super::types::{CheckTarget, Outcome, NO_AUTO_SPACE_KEYS};
use super::ExperimentState;

impl ExperimentState {
    /// Single entry point for every UI and network event.
    pub fn handle_event(&mut self, event: &Event) -> Vec<Outcome> {
        let _span = debug_span!(
            "handle_event",
            kind = event.kind(),
            seq = self.context_sequence_num
        )
        .entered();

        match event {
            Event::TapKey { key, x, y } => self.tap_key(*key, Tap { x: *x, y: *y }),
            Event::TapBackspace => self.tap_backspace(),
            Event::TapSuggestion { category, slot } => self.handle_tap_suggestion(*category, *slot),
            Event::SelectAlternative { word } => self.handle_select_alternative(word),
            Event::TapText => self.handle_tap_text(),
            Event::ReceivedSuggestions { msg } => self.update_suggestions(msg),
        }
    }

    /// Type one character at the end of the text.
    pub fn tap_key(&mut self, key: char, tap: Tap) -> Vec<Outcome> {
        let mut outcomes = match self.gate(CheckTarget::Keyboard) {
            Ok(outcomes) => outcomes,
            Err(outcomes) => return outcomes,
        };

        if self
            .avoid_letter()
            .is_some_and(|avoid| avoid.eq_ignore_ascii_case(&key))
        {
            debug!(%key, "dropped avoided letter");
            return outcomes;
        }

        let non_word = !is_word_char(key);
        let len = self.text_len();
        // Punctuation replaces the space we inserted after the previous one.
        let delete_space = self.last_space_was_auto && non_word && len > 0;
        let auto_space = non_word && !NO_AUTO_SPACE_KEYS.contains(&key);

        let mut insert = String::from(key);
        let mut taps = vec![Some(tap)];
        if auto_space {
            insert.push(' ');
            taps.push(None);
        }
        let start = if delete_space { len - 1 } else { len };
        self.splice_text(start, usize::from(delete_space), &insert, taps);
        self.last_space_was_auto = auto_space;
        self.active_suggestion = None;

        outcomes.extend(self.state_changed());
        outcomes
    }

    /// Delete the last character. Never gated by attention checks.
    pub fn tap_backspace(&mut self) -> Vec<Outcome> {
        let len = self.text_len();
        if len > 0 {
            self.splice_text(len - 1, 1, "", Vec::new());
        }
        self.last_space_was_auto = false;
        self.active_suggestion = None;
        self.state_changed()
    }

    /// A tap on the text area. Only ever answers a pending check.
    pub fn handle_tap_text(&mut self) -> Vec<Outcome> {
        match self.gate(CheckTarget::Text) {
            Ok(outcomes) | Err(outcomes) => outcomes,
        }
    }
}
