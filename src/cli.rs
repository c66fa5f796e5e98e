use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::config::constants::seasonality::{DEFAULT_HORIZONS, DEFAULT_YEARS_BACK};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Calendar and intraday cycle profiles for OHLC bars", long_about = None)]
pub struct Cli {
    /// JSON file overriding the built-in cycle configuration
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    /// Raise log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Per-bucket profile of one cycle
    Profile(ProfileArgs),
    /// Weekday x session profile, or sessions pooled across weekdays
    Sessions(SessionsArgs),
    /// Profile re-averaged over a lookback horizon
    Composite(CompositeArgs),
    /// Day-of-year cumulative return curves
    Seasonality(SeasonalityArgs),
    /// Where an instant sits in every cycle
    Positions(PositionsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SeriesArgs {
    /// CSV with Date, Open, High, Low, Close columns
    #[arg(long)]
    pub csv: PathBuf,

    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Drop the first and last calendar day of data
    #[arg(long, default_value_t = false)]
    pub trim_partial_days: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// decennial, presidential, quarter, month, week_of_year, week_of_month,
    /// day_of_week, session or hour_of_day
    #[arg(long, default_value = "month")]
    pub kind: String,

    /// Also list the N highest and lowest buckets
    #[arg(long)]
    pub top: Option<usize>,

    /// Metric used by --top
    #[arg(long, default_value = "AvgRange")]
    pub rank_by: String,
}

#[derive(Args, Debug, Clone)]
pub struct SessionsArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    /// Pool all weekdays into one row per session
    #[arg(long, default_value_t = false)]
    pub combined: bool,

    /// Day filter for the combined view: all, green or red
    #[arg(long, default_value = "all")]
    pub filter: String,
}

#[derive(Args, Debug, Clone)]
pub struct CompositeArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    #[arg(long, default_value = "month")]
    pub kind: String,

    /// min_cycle, short_term, mid_term, long_term or multi_year
    #[arg(long, default_value = "short_term")]
    pub horizon: String,

    /// Show every horizon for --metric instead of one horizon for all metrics
    #[arg(long, default_value_t = false)]
    pub matrix: bool,

    #[arg(long, default_value = "AvgReturn")]
    pub metric: String,
}

#[derive(Args, Debug, Clone)]
pub struct SeasonalityArgs {
    #[command(flatten)]
    pub series: SeriesArgs,

    #[arg(long, default_value_t = DEFAULT_YEARS_BACK)]
    pub years_back: u32,

    /// open-close or close-close
    #[arg(long, default_value = "open-close")]
    pub method: String,

    /// Last date included; defaults to today (UTC)
    #[arg(long)]
    pub cutoff: Option<NaiveDate>,

    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_HORIZONS.to_vec())]
    pub horizons: Vec<u32>,
}

#[derive(Args, Debug, Clone)]
pub struct PositionsArgs {
    /// UTC instant, e.g. "2025-03-19 14:00"; defaults to now
    #[arg(long)]
    pub at: Option<String>,
}
