//! The replayable event contract.
//!
//! Every input the session reacts to is one of these records. The UI and
//! network layers produce them, the session consumes them through a single
//! dispatch entry point, and the event log stores them for offline replay.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::protocol::{Category, SuggestionResponse, Tap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    TapKey { key: char, x: f64, y: f64 },
    TapBackspace,
    TapSuggestion { category: Category, slot: usize },
    SelectAlternative { word: String },
    TapText,
    ReceivedSuggestions { msg: SuggestionResponse },
}

impl Event {
    pub fn tap_key(key: char, tap: Tap) -> Self {
        Self::TapKey {
            key,
            x: tap.x,
            y: tap.y,
        }
    }

    /// Short event-type name as it appears in the log's `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TapKey { .. } => "tapKey",
            Self::TapBackspace => "tapBackspace",
            Self::TapSuggestion { .. } => "tapSuggestion",
            Self::SelectAlternative { .. } => "selectAlternative",
            Self::TapText => "tapText",
            Self::ReceivedSuggestions { .. } => "receivedSuggestions",
        }
    }
}

/// An event as persisted: the record plus wall-clock time and participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    #[serde(with = "timestamp")]
    pub timestamp: OffsetDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<String>,
    #[serde(flatten)]
    pub event: Event,
}

impl LoggedEvent {
    pub fn now(event: Event, participant_id: Option<String>) -> Self {
        Self {
            timestamp: OffsetDateTime::now_utc(),
            participant_id,
            event,
        }
    }
}

/// Written as RFC 3339. Read as RFC 3339, or as an ISO 8601 date-time without
/// offset, which older study logs carry; those are taken as UTC.
mod timestamp {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use time::format_description::well_known::{Iso8601, Rfc3339};
    use time::{OffsetDateTime, PrimitiveDateTime};

    pub fn serialize<S>(ts: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        time::serde::rfc3339::serialize(ts, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<OffsetDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse(&s).map_err(de::Error::custom)
    }

    fn parse(s: &str) -> Result<OffsetDateTime, time::error::Parse> {
        OffsetDateTime::parse(s, &Rfc3339).or_else(|_| {
            PrimitiveDateTime::parse(s, &Iso8601::DEFAULT)
                .map(PrimitiveDateTime::assume_utc)
        })
    }
}
