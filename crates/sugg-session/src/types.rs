use sugg_core::protocol::{Category, Constraints, CurWordItem, Promise, Suggestion};

/// Prefixed to the disguised suggestion word of a pending attention check.
pub const ATTENTION_CHECK_MARKER: char = 'ᐅ';

/// Letters ordered by English frequency; the avoid-letter constraint rotates
/// through it once per completed sentence.
pub const AVOID_ALPHABET: &str = "etaoinshrdlcumwfgypbvkjxqz";

/// Non-word keys that do not get an automatic trailing space.
pub(super) const NO_AUTO_SPACE_KEYS: [char; 4] = [' ', '\'', '"', '-'];

/// Notification returned by every session operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Text or tap state changed and the context sequence number advanced.
    Changed,
    /// A fresh suggestion response was accepted.
    SuggestionsUpdated,
    PassedAttentionCheck,
    /// A failed check was recorded; the action still applied.
    FailedAttentionCheck,
    /// First failure for this check kind: the action was rejected and must be retried.
    FailedAttentionCheckForce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Text,
    Predictions,
    Synonyms,
}

impl CheckKind {
    pub const ALL: [CheckKind; 3] = [
        CheckKind::Text,
        CheckKind::Predictions,
        CheckKind::Synonyms,
    ];

    pub(super) fn index(self) -> usize {
        match self {
            Self::Text => 0,
            Self::Predictions => 1,
            Self::Synonyms => 2,
        }
    }

    /// Suggestion category a disguised item of this kind lives in.
    pub fn category(self) -> Option<Category> {
        match self {
            Self::Text => None,
            Self::Predictions => Some(Category::Predictions),
            Self::Synonyms => Some(Category::Synonyms),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Predictions => "predictions",
            Self::Synonyms => "synonyms",
        }
    }
}

/// A single pending covert verification item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttentionCheck {
    pub kind: CheckKind,
    pub slot: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttentionCheckStats {
    /// Unforced attempts, passed or failed.
    pub total: u32,
    pub passed: u32,
    /// Set by the first failure; cleared by the retry.
    pub force: bool,
}

/// A multi-word suggestion being consumed one word per tap on its slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSuggestion {
    pub suggestion: Suggestion,
    pub slot: usize,
    /// Index of the next word to insert.
    pub word_idx: usize,
}

impl ActiveSuggestion {
    pub fn remaining(&self) -> &[String] {
        self.suggestion.words.get(self.word_idx..).unwrap_or(&[])
    }

    pub(super) fn next_word(&self) -> Option<&str> {
        self.suggestion.words.get(self.word_idx).map(String::as_str)
    }

    /// State after inserting the next word, or `None` once the words run out.
    pub(super) fn advanced(&self) -> Option<ActiveSuggestion> {
        let next = ActiveSuggestion {
            word_idx: self.word_idx + 1,
            ..self.clone()
        };
        (!next.remaining().is_empty()).then_some(next)
    }
}

/// Everything the suggestion service needs to know about the current text.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionContext {
    /// Text up to and including the last whitespace char.
    pub prefix: String,
    /// The in-progress word, with taps.
    pub cur_word: Vec<CurWordItem>,
    pub constraints: Constraints,
    pub promise: Option<Promise>,
}

impl SuggestionContext {
    pub fn cur_word_text(&self) -> String {
        self.cur_word.iter().map(|item| item.letter).collect()
    }
}

/// Derived copy of the last accepted response, as the suggestion bar shows it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VisibleSuggestions {
    pub predictions: Vec<Suggestion>,
    pub synonyms: Vec<Suggestion>,
    pub replacement_range: Option<(usize, usize)>,
}

impl VisibleSuggestions {
    pub fn slots(&self, category: Category) -> &[Suggestion] {
        match category {
            Category::Predictions => &self.predictions,
            Category::Synonyms => &self.synonyms,
        }
    }

    pub(super) fn slots_mut(&mut self, category: Category) -> &mut Vec<Suggestion> {
        match category {
            Category::Predictions => &mut self.predictions,
            Category::Synonyms => &mut self.synonyms,
        }
    }

    /// First word shown in `slot` of `category`.
    pub fn word(&self, category: Category, slot: usize) -> Option<&str> {
        self.slots(category).get(slot)?.first_word()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty() && self.synonyms.is_empty()
    }

    /// Whether the disguised attention-check item is shown in this slot.
    pub fn has_marker(&self, category: Category, slot: usize) -> bool {
        self.word(category, slot)
            .is_some_and(|w| w.starts_with(ATTENTION_CHECK_MARKER))
    }
}

/// What a gated action touched, for matching against a pending check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CheckTarget {
    /// A key tap. Only checked against pending `Text` checks.
    Keyboard,
    Text,
    Suggestion { category: Category, slot: usize },
    Alternative,
}
