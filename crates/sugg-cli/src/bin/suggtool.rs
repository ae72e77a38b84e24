use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use sugg_cli::commands::{config_ops, replay_ops};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Parser)]
#[command(name = "suggtool", about = "Suggestion study log and condition tool")]
struct Cli {
    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a participant event log and print the derived state
    Replay {
        /// Path to the JSONL event log
        log: PathBuf,
        /// Condition name (defaults to the set's default)
        #[arg(long)]
        condition: Option<String>,
        /// Conditions TOML file (defaults to the embedded set)
        #[arg(long)]
        conditions: Option<PathBuf>,
    },
    /// Print the suggestion request for the state at the end of a log
    Request {
        /// Path to the JSONL event log
        log: PathBuf,
        /// Condition name (defaults to the set's default)
        #[arg(long)]
        condition: Option<String>,
        /// Conditions TOML file (defaults to the embedded set)
        #[arg(long)]
        conditions: Option<PathBuf>,
        /// Request timestamp in milliseconds (defaults to now)
        #[arg(long)]
        timestamp: Option<u64>,
    },
    /// Export or validate study conditions
    Conditions {
        #[command(subcommand)]
        action: ConditionsAction,
    },
}

#[derive(Subcommand)]
enum ConditionsAction {
    /// Print the embedded default conditions TOML
    Export,
    /// Check a conditions TOML file
    Validate {
        /// Conditions TOML file
        file: PathBuf,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sugg_session=info,sugg_core=info,sugg_cli=info"));
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn now_millis() -> u64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as u64
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    match cli.command {
        Command::Replay {
            log,
            condition,
            conditions,
        } => {
            let condition = die!(
                config_ops::load_condition(conditions.as_deref(), condition.as_deref()),
                "Error: {}"
            );
            let json = die!(
                replay_ops::replay_json(&log, condition),
                "Error replaying {}: {}",
                log.display()
            );
            println!("{json}");
        }
        Command::Request {
            log,
            condition,
            conditions,
            timestamp,
        } => {
            let condition = die!(
                config_ops::load_condition(conditions.as_deref(), condition.as_deref()),
                "Error: {}"
            );
            let timestamp = timestamp.unwrap_or_else(now_millis);
            let json = die!(
                replay_ops::request_json(&log, condition, timestamp),
                "Error replaying {}: {}",
                log.display()
            );
            println!("{json}");
        }
        Command::Conditions { action } => match action {
            ConditionsAction::Export => config_ops::conditions_export(),
            ConditionsAction::Validate { file } => {
                let summary = die!(
                    config_ops::conditions_validate(&file),
                    "Error in {}: {}",
                    file.display()
                );
                println!("{summary}");
            }
        },
    }
}
