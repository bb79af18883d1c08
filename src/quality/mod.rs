pub mod authority;
pub mod content;
pub mod engagement;
pub mod relevancy;
pub mod service;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QualityResult;
use crate::model::{CandidateVideo, ChannelRecord, QualityMetrics};

pub use authority::{consistency_score, AuthorityMetrics, AuthorityScorer};
pub use content::{is_clickbait, ContentQualityMetrics, ContentQualityScorer};
pub use engagement::{EngagementMetrics, EngagementScorer};
pub use relevancy::{extract_keywords, RelevancyScorer};
pub use service::{OverallQuality, QualityReport, QualityService};

/// Reference thresholds the sub-scores are normalised against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    pub subscriber_threshold: u64,
    pub like_ratio_threshold: f64,
    pub comment_ratio_threshold: f64,
    pub max_age_days: f64,
    pub min_description_length: usize,
    pub title_reference_length: usize,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            subscriber_threshold: 100_000,
            like_ratio_threshold: 0.01,
            comment_ratio_threshold: 0.001,
            max_age_days: 365.0,
            min_description_length: 100,
            title_reference_length: 50,
        }
    }
}

/// Computes quality metrics for one video. Implementations must be pure with
/// respect to their inputs so batches can score videos concurrently.
pub trait QualityScorer: Send + Sync {
    fn score(
        &self,
        video: &CandidateVideo,
        channel: &ChannelRecord,
        search_query: Option<&str>,
        now: DateTime<Utc>,
    ) -> QualityResult<QualityMetrics>;
}
