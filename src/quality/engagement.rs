use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::CandidateVideo;
use crate::{clamp01, log10_safe};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub view_to_like_ratio: f64,
    pub view_to_comment_ratio: f64,
    pub avg_daily_views: f64,
    pub total_engagements: u64,
    /// Likes plus comments per day since publish.
    pub engagement_trend: f64,
}

impl EngagementMetrics {
    pub fn from_video(video: &CandidateVideo, now: DateTime<Utc>) -> Self {
        let views = video.view_count as f64;
        let likes = video.like_count as f64;
        let comments = video.comment_count as f64;
        let days_since_publish = video.age_in_days(now).max(1.0);

        let total_engagements = video.like_count.saturating_add(video.comment_count);

        let (view_to_like_ratio, view_to_comment_ratio) = if views > 0.0 {
            (likes / views, comments / views)
        } else {
            (0.0, 0.0)
        };

        Self {
            view_to_like_ratio,
            view_to_comment_ratio,
            avg_daily_views: views / days_since_publish,
            total_engagements,
            engagement_trend: total_engagements as f64 / days_since_publish,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngagementScorer {
    like_ratio_threshold: f64,
    comment_ratio_threshold: f64,
}

impl EngagementScorer {
    pub fn new(like_ratio_threshold: f64, comment_ratio_threshold: f64) -> Self {
        Self {
            like_ratio_threshold,
            comment_ratio_threshold,
        }
    }

    pub fn score(&self, metrics: &EngagementMetrics) -> f64 {
        let like_score = ratio_score(metrics.view_to_like_ratio, self.like_ratio_threshold);
        let comment_score =
            ratio_score(metrics.view_to_comment_ratio, self.comment_ratio_threshold);
        let view_score = clamp01(log10_safe(metrics.avg_daily_views) / 5.0);

        like_score * 0.4 + comment_score * 0.3 + view_score * 0.3
    }
}

fn ratio_score(ratio: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        return 0.0;
    }
    clamp01(ratio / threshold)
}
