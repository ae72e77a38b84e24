use std::fs;
use std::path::Path;

use sugg_core::condition::{self, parse_conditions_toml, Condition, ConditionSet};

use super::CliError;

pub fn conditions_export() {
    print!("{}", condition::default_toml());
}

/// One-line summary of a valid conditions file.
pub fn conditions_validate(file: &Path) -> Result<String, CliError> {
    let content = fs::read_to_string(file)?;
    let set = parse_conditions_toml(&content)?;
    let names: Vec<&str> = set.names().collect();
    Ok(format!(
        "OK: {} conditions (default={}): {}",
        set.len(),
        set.default_name(),
        names.join(", ")
    ))
}

/// The conditions in `file`, or the embedded defaults.
pub fn load_conditions(file: Option<&Path>) -> Result<ConditionSet, CliError> {
    let set = match file {
        Some(path) => parse_conditions_toml(&fs::read_to_string(path)?)?,
        None => condition::conditions().clone(),
    };
    Ok(set)
}

/// Resolve `name` in `file` (or the embedded defaults); `None` picks the
/// set's default condition.
pub fn load_condition(file: Option<&Path>, name: Option<&str>) -> Result<Condition, CliError> {
    let set = load_conditions(file)?;
    let condition = match name {
        Some(name) => set.get(name)?.clone(),
        None => set.default_condition().clone(),
    };
    Ok(condition)
}
