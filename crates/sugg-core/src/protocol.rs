//! Wire types exchanged with the suggestion service.
//!
//! The transport is opaque to this crate; these are the JSON payloads it
//! carries. Field names follow the service's existing protocol.

use serde::{Deserialize, Serialize};

/// Suggestion categories shown in the suggestion bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Predictions,
    Synonyms,
}

/// Touch coordinate of a key tap, serialized as `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Tap {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for Tap {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<Tap> for (f64, f64) {
    fn from(tap: Tap) -> Self {
        (tap.x, tap.y)
    }
}

/// One server-sourced suggestion: a run of words to insert one per tap.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Suggestion {
    pub words: Vec<String>,
}

impl Suggestion {
    pub fn new<S: Into<String>>(words: impl IntoIterator<Item = S>) -> Self {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    pub fn first_word(&self) -> Option<&str> {
        self.words.first().map(String::as_str)
    }
}

/// A suggestion batch answering the request with the same `request_id`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub request_id: u64,
    #[serde(default)]
    pub predictions: Vec<Suggestion>,
    #[serde(default)]
    pub synonyms: Vec<Suggestion>,
    /// Char span `[start, end)` of the text a synonym replaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacement_range: Option<(usize, usize)>,
}

impl SuggestionResponse {
    pub fn slots(&self, category: Category) -> &[Suggestion] {
        match category {
            Category::Predictions => &self.predictions,
            Category::Synonyms => &self.synonyms,
        }
    }
}

/// One char of the in-progress word, with its tap if it was typed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurWordItem {
    pub letter: char,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap: Option<Tap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Constraints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avoid_letter: Option<char>,
}

/// Words already committed to a slot; the service offers them again verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promise {
    pub slot: usize,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub request_id: u64,
    pub sofar: String,
    pub cur_word: Vec<CurWordItem>,
    pub constraints: Constraints,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promise: Option<Promise>,
    pub domain: String,
    pub rare_word_bonus: f64,
    #[serde(rename = "useSufarr")]
    pub use_sufarr: bool,
    pub temperature: f64,
    pub alternatives: usize,
    /// Caller-supplied wall clock in milliseconds, echoed by the service.
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    RequestSuggestions(SuggestionRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    Suggestions(SuggestionResponse),
}

pub fn parse_server_message(frame: &str) -> Result<ServerMessage, serde_json::Error> {
    serde_json::from_str(frame)
}
