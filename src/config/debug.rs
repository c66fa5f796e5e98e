//! Debugging feature flags.

pub struct LogFlags {
    /// Bucket assignment and completeness fill summaries.
    pub log_profiles: bool,

    /// Window sizes and unit counts used by the composite averager.
    pub log_composite: bool,

    pub log_seasonality: bool,

    /// Rows dropped while converting a bar table (bad timestamps, non-positive opens).
    pub log_loader: bool,

    /// Activate trace_time macro (for scope-level timing)
    pub log_performance: bool,
}

pub const DF: LogFlags = LogFlags {
    log_profiles: false,
    log_composite: false,
    log_seasonality: false,
    log_loader: true,
    log_performance: false,
};
