use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{days_between, ChannelRecord, MILLIS_PER_DAY};
use crate::{clamp01, log10_safe};

const DEFAULT_CONSISTENCY: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityMetrics {
    pub subscriber_count: u64,
    pub is_verified: bool,
    pub total_views: u64,
    pub avg_video_views: f64,
    pub channel_age_years: f64,
    /// Videos per year of channel age.
    pub upload_frequency: f64,
    /// Computed for inspection; not part of the authority score.
    pub consistency_score: f64,
}

impl AuthorityMetrics {
    pub fn from_channel(
        channel: &ChannelRecord,
        now: DateTime<Utc>,
        subscriber_threshold: u64,
    ) -> Self {
        let channel_age_years = days_between(channel.created_at, now).max(0.0) / 365.0;
        let upload_frequency = if channel_age_years > 0.0 {
            channel.video_count as f64 / channel_age_years
        } else {
            0.0
        };

        Self {
            subscriber_count: channel.subscriber_count,
            is_verified: channel.subscriber_count > subscriber_threshold,
            total_views: channel.total_views,
            avg_video_views: channel.total_views as f64 / channel.video_count.max(1) as f64,
            channel_age_years,
            upload_frequency,
            consistency_score: consistency_score(&channel.recent_uploads),
        }
    }
}

/// Regularity of the gaps between recent uploads: `1 - stddev / mean`,
/// floored at zero. Fewer than two uploads yields 0.5.
pub fn consistency_score(uploads: &[DateTime<Utc>]) -> f64 {
    if uploads.len() < 2 {
        return DEFAULT_CONSISTENCY;
    }

    let mut sorted = uploads.to_vec();
    sorted.sort_by(|a, b| b.cmp(a));

    let gaps: Vec<f64> = sorted
        .windows(2)
        .map(|pair| (pair[0] - pair[1]).num_milliseconds() as f64 / MILLIS_PER_DAY)
        .collect();

    let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
    if mean <= 0.0 {
        return DEFAULT_CONSISTENCY;
    }

    let variance = gaps.iter().map(|gap| (gap - mean).powi(2)).sum::<f64>() / gaps.len() as f64;
    clamp01(1.0 - variance.sqrt() / mean)
}

#[derive(Debug, Clone, Default)]
pub struct AuthorityScorer;

impl AuthorityScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, metrics: &AuthorityMetrics) -> f64 {
        let subscriber_score = clamp01(log10_safe(metrics.subscriber_count as f64) / 7.0);
        let verification_score = if metrics.is_verified { 1.0 } else { 0.5 };
        let view_score = clamp01(log10_safe(metrics.avg_video_views) / 6.0);

        subscriber_score * 0.4 + verification_score * 0.3 + view_score * 0.3
    }
}
