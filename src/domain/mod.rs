// Domain types and value objects
mod bar;
mod bucket;
mod date_range;
mod horizon;
mod profile_kind;
mod session;

// Re-export commonly used types to the world
pub use bar::{BarColor, PriceBar};
pub use bucket::Bucket;
pub use date_range::DateRange;
pub use horizon::Horizon;
pub use profile_kind::{InstancePeriod, ProfileKind};
pub use session::Session;
