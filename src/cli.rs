use clap::builder::RangedI64ValueParser;
use clap::Parser;

use crate::cmd::Commands;
use crate::logging::LogLevel;
use crate::project::MAX_ESTIMATED_DAYS;

/// In-memory project planner.
/// Derives weekly and daily task dates from a project's start date.
#[derive(Parser)]
#[command(name = "planner", version, about = "Weekly and daily project schedule planner")]
pub struct Cli {
    /// Log verbosity (overridden by RUST_LOG).
    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Pretend today is this date: YYYY-MM-DD, "tomorrow", "in 3d", ...
    /// Relative forms are resolved once against the real date at startup.
    #[arg(long, global = true)]
    pub today: Option<String>,

    /// Number ids 1, 2, 3, ... instead of random UUIDs (reproducible output).
    #[arg(long, global = true)]
    pub sequential_ids: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Parser for `--days` arguments, bounded by [`MAX_ESTIMATED_DAYS`].
pub fn estimate_parser() -> RangedI64ValueParser<i64> {
    clap::value_parser!(i64).range(-MAX_ESTIMATED_DAYS..=MAX_ESTIMATED_DAYS)
}
