//! Building blocks shared by the suggestion-study client: text utilities,
//! content-seeded randomness, study conditions, the suggestion wire protocol,
//! and the replayable event contract with its JSON-lines log.

pub mod condition;
pub mod event;
pub mod event_log;
pub mod protocol;
pub mod random;
pub mod text;
