use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{QualityError, QualityResult};
use crate::model::{CandidateVideo, ChannelRecord, QualityMetrics, QualityWeights};
use crate::quality::{
    extract_keywords, AuthorityMetrics, AuthorityScorer, ContentQualityMetrics,
    ContentQualityScorer, EngagementMetrics, EngagementScorer, QualityConfig, QualityScorer,
    RelevancyScorer,
};
use crate::clamp01;

/// Substituted for a sub-score that could not be computed.
const NEUTRAL_SCORE: f64 = 0.5;
const SUB_SCORE_COUNT: f64 = 5.0;

/// Metrics plus the raw measurements behind them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub metrics: QualityMetrics,
    pub engagement: EngagementMetrics,
    pub authority: AuthorityMetrics,
    pub content: ContentQualityMetrics,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverallQuality {
    pub score: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone)]
pub struct QualityService {
    config: QualityConfig,
    engagement: EngagementScorer,
    authority: AuthorityScorer,
    content: ContentQualityScorer,
    relevancy: RelevancyScorer,
}

impl Default for QualityService {
    fn default() -> Self {
        Self::new(QualityConfig::default())
    }
}

impl QualityService {
    pub fn new(config: QualityConfig) -> Self {
        Self {
            engagement: EngagementScorer::new(
                config.like_ratio_threshold,
                config.comment_ratio_threshold,
            ),
            authority: AuthorityScorer::new(),
            content: ContentQualityScorer::new(
                config.min_description_length,
                config.title_reference_length,
            ),
            relevancy: RelevancyScorer::new(),
            config,
        }
    }

    pub fn calculate_video_quality(
        &self,
        video: &CandidateVideo,
        channel: &ChannelRecord,
        search_query: Option<&str>,
        now: DateTime<Utc>,
    ) -> QualityResult<QualityMetrics> {
        self.assess(video, channel, search_query, now)
            .map(|report| report.metrics)
    }

    pub fn assess(
        &self,
        video: &CandidateVideo,
        channel: &ChannelRecord,
        search_query: Option<&str>,
        now: DateTime<Utc>,
    ) -> QualityResult<QualityReport> {
        if video.channel_id != channel.id {
            return Err(QualityError::computation(
                &video.id,
                format!(
                    "channel record {} does not belong to video channel {}",
                    channel.id, video.channel_id
                ),
            ));
        }

        let keywords = extract_keywords(&video.description);
        let engagement = EngagementMetrics::from_video(video, now);
        let authority =
            AuthorityMetrics::from_channel(channel, now, self.config.subscriber_threshold);
        let content = self.content.metrics(video);

        let query = search_query
            .map(str::trim)
            .filter(|query| !query.is_empty());

        let raw = [
            self.engagement.score(&engagement),
            self.authority.score(&authority),
            self.content.score(&content),
            self.freshness_score(video.published_at, now),
            match query {
                Some(query) => self.relevancy.score(video, &keywords, query),
                None => 1.0,
            },
        ];

        let confidence = confidence_score(&raw);
        let [
            engagement_score,
            authority_score,
            content_quality_score,
            freshness_score,
            relevancy_score,
        ] = raw.map(settle);

        let mut metrics = QualityMetrics {
            engagement_score,
            authority_score,
            content_quality_score,
            freshness_score,
            relevancy_score,
            overall_score: 0.0,
            confidence,
        };
        metrics.overall_score = overall_score(&metrics);

        Ok(QualityReport {
            metrics,
            engagement,
            authority,
            content,
            keywords,
        })
    }

    /// Weighted score used for ranking together with the metrics' confidence.
    pub fn calculate_overall_quality(
        &self,
        metrics: &QualityMetrics,
        weights: &QualityWeights,
    ) -> OverallQuality {
        OverallQuality {
            score: weighted_score(metrics, weights),
            confidence: confidence_score(&metrics.sub_scores()),
        }
    }

    pub fn freshness_score(&self, published_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        if self.config.max_age_days <= 0.0 {
            return 0.0;
        }
        let age_in_days = crate::model::days_between(published_at, now);
        clamp01(1.0 - age_in_days / self.config.max_age_days)
    }
}

impl QualityScorer for QualityService {
    fn score(
        &self,
        video: &CandidateVideo,
        channel: &ChannelRecord,
        search_query: Option<&str>,
        now: DateTime<Utc>,
    ) -> QualityResult<QualityMetrics> {
        self.calculate_video_quality(video, channel, search_query, now)
    }
}

pub fn overall_score(metrics: &QualityMetrics) -> f64 {
    clamp01(
        metrics.engagement_score * 0.25
            + metrics.authority_score * 0.25
            + metrics.content_quality_score * 0.2
            + metrics.freshness_score * 0.15
            + metrics.relevancy_score * 0.15,
    )
}

/// `Σ(score·weight) / Σweight`; zero when the weights sum to zero.
pub fn weighted_score(metrics: &QualityMetrics, weights: &QualityWeights) -> f64 {
    let total_weight = weights.total();
    if total_weight <= 0.0 {
        return 0.0;
    }

    let total = metrics.engagement_score * weights.engagement
        + metrics.authority_score * weights.authority
        + metrics.content_quality_score * weights.quality
        + metrics.freshness_score * weights.freshness
        + metrics.relevancy_score * weights.relevancy;

    total / total_weight
}

pub fn confidence_score(scores: &[f64]) -> f64 {
    scores.iter().filter(|score| score.is_finite()).count() as f64 / SUB_SCORE_COUNT
}

fn settle(raw: f64) -> f64 {
    if raw.is_finite() {
        clamp01(raw)
    } else {
        NEUTRAL_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_counts_finite_scores() {
        assert_eq!(confidence_score(&[0.1, 0.2, 0.3, 0.4, 0.5]), 1.0);
        assert!((confidence_score(&[0.1, f64::NAN, 0.3, f64::INFINITY, 0.5]) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn settle_replaces_non_finite_with_neutral() {
        assert_eq!(settle(f64::NAN), NEUTRAL_SCORE);
        assert_eq!(settle(1.4), 1.0);
        assert_eq!(settle(0.25), 0.25);
    }

    #[test]
    fn weighted_score_with_zero_weights_is_zero() {
        let metrics = QualityMetrics {
            engagement_score: 1.0,
            authority_score: 1.0,
            content_quality_score: 1.0,
            freshness_score: 1.0,
            relevancy_score: 1.0,
            overall_score: 1.0,
            confidence: 1.0,
        };
        let weights = QualityWeights {
            engagement: 0.0,
            authority: 0.0,
            quality: 0.0,
            freshness: 0.0,
            relevancy: 0.0,
        };
        assert_eq!(weighted_score(&metrics, &weights), 0.0);
    }
}
