use sugg_core::protocol::{CurWordItem, Promise};

use super::*;
use crate::ActiveSuggestion;

#[test]
fn test_context_splits_prefix_and_cur_word() {
    let mut state = ExperimentState::new(plain_condition());
    type_string(&mut state, "the fo");
    let ctx = state.suggestion_context();

    assert_eq!(ctx.prefix, "the ");
    assert_eq!(ctx.cur_word_text(), "fo");
    assert_eq!(
        ctx.cur_word[0],
        CurWordItem {
            letter: 'f',
            tap: Some(tap_at(4)),
        }
    );
    assert!(ctx.promise.is_none());
}

#[test]
fn test_context_empty_cur_word_after_space() {
    let mut state = ExperimentState::new(plain_condition());
    type_string(&mut state, "great. ");
    let ctx = state.suggestion_context();
    assert_eq!(ctx.prefix, "great. ");
    assert!(ctx.cur_word.is_empty());
}

#[test]
fn test_context_untapped_chars_have_no_tap() {
    let mut state = ExperimentState::new(plain_condition());
    state.handle_select_alternative("pizza");
    state.tap_backspace();
    let ctx = state.suggestion_context();
    assert_eq!(ctx.cur_word_text(), "pizza");
    assert!(ctx.cur_word.iter().all(|item| item.tap.is_none()));
}

#[test]
fn test_context_carries_promise() {
    let mut state = ExperimentState::new(plain_condition());
    state.active_suggestion = Some(ActiveSuggestion {
        suggestion: sugg_core::protocol::Suggestion::new(["was", "really", "good"]),
        slot: 2,
        word_idx: 1,
    });
    let ctx = state.suggestion_context();
    assert_eq!(
        ctx.promise,
        Some(Promise {
            slot: 2,
            words: vec!["really".to_string(), "good".to_string()],
        })
    );
}

#[test]
fn test_request_uses_sequence_and_condition_flags() {
    let condition = Condition {
        domain: "reviews".to_string(),
        rare_word_bonus: 2.5,
        use_sufarr: true,
        alternatives: 5,
        avoid_letter: true,
        ..plain_condition()
    };
    let mut state = ExperimentState::new(condition);
    type_string(&mut state, "ab");
    let req = state.suggestion_request(42);

    assert_eq!(req.request_id, 2);
    assert_eq!(req.sofar, "");
    assert_eq!(req.cur_word.len(), 2);
    assert_eq!(req.constraints.avoid_letter, Some('e'));
    assert_eq!(req.domain, "reviews");
    assert_eq!(req.rare_word_bonus, 2.5);
    assert!(req.use_sufarr);
    assert_eq!(req.alternatives, 5);
    assert_eq!(req.timestamp, 42);
}
