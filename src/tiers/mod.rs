pub mod criteria;
pub mod filter;

pub use criteria::{TierCriteria, TierCriteriaGenerator, TieredQualityCriteria};
pub use filter::{TierOutcome, TieredFilter};
