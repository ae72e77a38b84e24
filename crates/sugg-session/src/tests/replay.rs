use sugg_core::event::{Event, LoggedEvent};
use sugg_core::protocol::{Category, Suggestion, SuggestionResponse};
use time::macros::datetime;
use time::Duration;

use super::*;
use crate::CheckKind;

fn session_events() -> Vec<Event> {
    let mut events: Vec<Event> = "the "
        .chars()
        .enumerate()
        .map(|(i, c)| Event::tap_key(c, tap_at(i)))
        .collect();
    events.push(Event::ReceivedSuggestions {
        msg: SuggestionResponse {
            request_id: 4,
            predictions: vec![Suggestion::new(["food", "was"]), Suggestion::new(["staff"])],
            ..Default::default()
        },
    });
    events.push(Event::TapSuggestion {
        category: Category::Predictions,
        slot: 0,
    });
    events.push(Event::TapSuggestion {
        category: Category::Predictions,
        slot: 0,
    });
    events.push(Event::TapText);
    events.extend(
        "great!"
            .chars()
            .enumerate()
            .map(|(i, c)| Event::tap_key(c, tap_at(i))),
    );
    events.push(Event::TapBackspace);
    events.push(Event::SelectAlternative {
        word: "fine".to_string(),
    });
    events
}

#[test]
fn test_replay_reproduces_state() {
    let state = ExperimentState::replay(plain_condition(), &session_events());
    assert_eq!(state.text(), "the food was fine ");
    assert_eq!(state.tap_locations().len(), state.text().chars().count());
}

#[test]
fn test_replay_twice_is_identical() {
    let condition = Condition {
        attention_check_rate: 0.6,
        show_synonyms: true,
        ..Condition::default()
    };
    let a = ExperimentState::replay(condition.clone(), &session_events());
    let b = ExperimentState::replay(condition, &session_events());

    assert_eq!(a.text(), b.text());
    assert_eq!(a.tap_locations(), b.tap_locations());
    assert_eq!(a.context_sequence_num(), b.context_sequence_num());
    assert_eq!(a.attention_check(), b.attention_check());
    for kind in CheckKind::ALL {
        assert_eq!(a.attention_check_stats(kind), b.attention_check_stats(kind));
    }
}

#[test]
fn test_replay_log_ignores_timestamps() {
    let log: Vec<LoggedEvent> = session_events()
        .into_iter()
        .enumerate()
        .map(|(i, event)| LoggedEvent {
            timestamp: datetime!(2024-05-01 10:00 UTC) + Duration::seconds(i as i64),
            participant_id: Some("abc123".to_string()),
            event,
        })
        .collect();
    let from_log = ExperimentState::replay_log(plain_condition(), &log);
    let direct = ExperimentState::replay(plain_condition(), &session_events());
    assert_eq!(from_log.text(), direct.text());
    assert_eq!(
        from_log.context_sequence_num(),
        direct.context_sequence_num()
    );
}

#[test]
fn test_replay_through_json() {
    let json: Vec<String> = session_events()
        .iter()
        .map(|e| serde_json::to_string(e).unwrap())
        .collect();
    let parsed: Vec<Event> = json
        .iter()
        .map(|s| serde_json::from_str(s).unwrap())
        .collect();
    let state = ExperimentState::replay(plain_condition(), &parsed);
    assert_eq!(state.text(), "the food was fine ");
}
