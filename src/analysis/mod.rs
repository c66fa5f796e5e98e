// Cycle profiling algorithms
pub mod bucket_assigner;
pub mod composite;
pub mod metrics;
pub mod positions;
pub mod profile_builder;
pub mod ranking;
pub mod seasonality;
pub mod session_profile;

pub use {
    bucket_assigner::{BarClock, CycleProfile, REGISTRY},
    composite::{CompositeAverager, describe_horizon},
    positions::{CyclePosition, current_positions},
    profile_builder::{ProfileBuilder, ProfileOutput, fill_domain},
    ranking::top_buckets,
    seasonality::{SeasonalityCalculator, normalized_day_of_year},
    session_profile::{DayFilter, SessionView, build_sessions},
};
