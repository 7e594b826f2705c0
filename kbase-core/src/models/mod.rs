pub mod answer;
pub mod confidence_tier;
pub mod query_result;

pub use answer::{Answer, Source};
pub use confidence_tier::{ConfidenceTier, TierThresholds};
pub use query_result::QueryResult;
