//! Text helpers used by the context builder and the state machine.
//!
//! Positions are char indices throughout. Tap locations are stored one per
//! char, so byte offsets stay private to this module.

/// Characters that end a sentence when followed by whitespace.
pub const SENTENCE_TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Word characters as the suggestion service tokenizes them (`\w`).
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn byte_offset(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}

/// Replace `delete_count` chars starting at char index `start` with `insert`.
/// Spans past the end are clamped to the end of the string.
pub fn splice_chars(s: &mut String, start: usize, delete_count: usize, insert: &str) {
    let begin = byte_offset(s, start);
    let end = byte_offset(s, start.saturating_add(delete_count));
    s.replace_range(begin..end, insert);
}

/// Char index where the in-progress word begins: just past the last
/// whitespace char, or 0 if there is none.
pub fn current_word_start(text: &str) -> usize {
    text.chars()
        .enumerate()
        .filter(|(_, c)| c.is_whitespace())
        .last()
        .map_or(0, |(i, _)| i + 1)
}

/// Number of sentence terminators followed by whitespace.
pub fn sentence_terminator_count(text: &str) -> usize {
    text.chars()
        .zip(text.chars().skip(1))
        .filter(|(c, next)| SENTENCE_TERMINATORS.contains(c) && next.is_whitespace())
        .count()
}

/// Whitespace-separated tokens that contain at least one word character.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|tok| tok.chars().any(is_word_char))
        .count()
}
