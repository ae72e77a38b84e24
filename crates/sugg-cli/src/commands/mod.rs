pub mod config_ops;
pub mod replay_ops;

use std::io;

use sugg_core::condition::ConditionError;
use sugg_core::event_log::EventLogError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("condition error: {0}")]
    Condition(#[from] ConditionError),

    #[error("event log error: {0}")]
    EventLog(#[from] EventLogError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
