#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod report;
pub mod utils;

// Re-export commonly used types outside of crate
pub use analysis::{
    CompositeAverager, DayFilter, ProfileBuilder, ProfileOutput, SeasonalityCalculator,
    SessionView,
};
pub use cli::Cli;
pub use config::CycleConfig;
pub use domain::{Bucket, DateRange, Horizon, PriceBar, ProfileKind, Session};
pub use error::{ProfileError, Result};
pub use models::{
    BarTable, InstanceRow, Metric, PriceSeries, ProfileRow, ReturnMethod, SessionRow,
};

/// Entry point for the binary: run one parsed command line.
pub fn run_cli(args: Cli) -> anyhow::Result<()> {
    app::run(args)
}
