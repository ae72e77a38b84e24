//! Study conditions, keyed by name and loaded from TOML.
//!
//! The built-in set lives in `default_conditions.toml`. A study can replace it
//! with `init_custom` before the first `conditions()` call; after that the set
//! is fixed for the life of the process.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONDITIONS_TOML: &str = include_str!("default_conditions.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `conditions()` call.
pub fn init_custom(toml_content: String) -> Result<(), ConditionError> {
    parse_conditions_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| ConditionError::AlreadyInitialized)
}

/// Get or initialize the global condition set.
pub fn conditions() -> &'static ConditionSet {
    static INSTANCE: OnceLock<ConditionSet> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_CONDITIONS_TOML);
        parse_conditions_toml(toml_str).expect("conditions TOML must be valid")
    })
}

/// Returns the embedded default conditions TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_CONDITIONS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum ConditionError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("unknown condition: {0}")]
    UnknownCondition(String),
    #[error("conditions already initialized")]
    AlreadyInitialized,
}

/// One experimental condition. Read-only to the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    /// Probability of injecting an attention check after each text change.
    pub attention_check_rate: f64,
    pub show_predictions: bool,
    pub show_synonyms: bool,
    /// Hide whole-word predictions until the participant starts a word.
    pub hide_fullword_predictions: bool,
    /// Enable the rotating avoid-letter constraint.
    pub avoid_letter: bool,
    /// Visible slots per suggestion category.
    pub suggestion_slots: usize,
    /// Size of the alternatives expansion, forwarded to the service.
    pub alternatives: usize,

    // Forwarded verbatim in suggestion requests.
    pub domain: String,
    pub rare_word_bonus: f64,
    pub use_sufarr: bool,
    pub temperature: f64,
}

impl Default for Condition {
    fn default() -> Self {
        Self {
            attention_check_rate: 0.0,
            show_predictions: true,
            show_synonyms: false,
            hide_fullword_predictions: false,
            avoid_letter: false,
            suggestion_slots: 3,
            alternatives: 0,
            domain: "yelp_train".to_string(),
            rare_word_bonus: 1.0,
            use_sufarr: false,
            temperature: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionSet {
    default: String,
    conditions: BTreeMap<String, Condition>,
}

impl ConditionSet {
    pub fn get(&self, name: &str) -> Result<&Condition, ConditionError> {
        self.conditions
            .get(name)
            .ok_or_else(|| ConditionError::UnknownCondition(name.to_string()))
    }

    /// The condition named by the top-level `default` key.
    pub fn default_condition(&self) -> &Condition {
        // validate() guarantees the default name resolves
        &self.conditions[&self.default]
    }

    pub fn default_name(&self) -> &str {
        &self.default
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.conditions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

pub fn parse_conditions_toml(toml_str: &str) -> Result<ConditionSet, ConditionError> {
    let set: ConditionSet = toml::from_str(toml_str)
        .map_err(|e| ConditionError::Parse(e.to_string()))?;
    validate(&set)?;
    Ok(set)
}

fn validate(set: &ConditionSet) -> Result<(), ConditionError> {
    if !set.conditions.contains_key(&set.default) {
        return Err(ConditionError::InvalidValue {
            field: "default".to_string(),
            reason: format!("no condition named {:?}", set.default),
        });
    }
    for (name, c) in &set.conditions {
        validate_condition(name, c)?;
    }
    Ok(())
}

fn validate_condition(name: &str, c: &Condition) -> Result<(), ConditionError> {
    let invalid = |field: &str, reason: &str| ConditionError::InvalidValue {
        field: format!("conditions.{name}.{field}"),
        reason: reason.to_string(),
    };

    if !(0.0..=1.0).contains(&c.attention_check_rate) {
        return Err(invalid("attention_check_rate", "must be within 0.0..=1.0"));
    }
    if c.suggestion_slots == 0 {
        return Err(invalid("suggestion_slots", "must be positive"));
    }
    if c.rare_word_bonus < 0.0 {
        return Err(invalid("rare_word_bonus", "must be non-negative"));
    }
    if c.temperature < 0.0 {
        return Err(invalid("temperature", "must be non-negative"));
    }
    if c.domain.is_empty() {
        return Err(invalid("domain", "must not be empty"));
    }
    Ok(())
}
