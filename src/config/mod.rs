//! Configuration module for the cycle profiler.

// Can all be private now because we have a public re-export.
mod cycles;
mod debug;
mod types;

// Public
pub mod constants;

// Re-export commonly used items
pub use cycles::{CurveOrigin, CycleConfig, HorizonWindows, Week53Policy};
pub use debug::{DF, LogFlags};
pub use types::{
    ClosePrice, HighPrice, LowPrice, OpenPrice, PriceLike, ProbPct, RangePoints, ReturnPct,
};
