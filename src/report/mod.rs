mod reporter;

pub use reporter::{Reporter, profile_summary, to_json};
