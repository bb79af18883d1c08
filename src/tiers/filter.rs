use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::duration::parse_duration;
use crate::model::{CandidateVideo, QualityMetrics, UserPreferences};
use crate::tiers::{TierCriteria, TieredQualityCriteria};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TierOutcome {
    pub videos: Vec<CandidateVideo>,
    /// 0 when no tier produced a single video.
    pub used_tier: u8,
}

/// Walks the tiers from strictest to loosest until enough videos qualify.
#[derive(Debug, Clone)]
pub struct TieredFilter {
    min_results: usize,
}

impl Default for TieredFilter {
    fn default() -> Self {
        Self::new(3)
    }
}

impl TieredFilter {
    pub fn new(min_results: usize) -> Self {
        Self { min_results }
    }

    pub fn apply(
        &self,
        videos: &[CandidateVideo],
        metrics: &BTreeMap<String, QualityMetrics>,
        criteria: &TieredQualityCriteria,
        preferences: &UserPreferences,
        now: DateTime<Utc>,
    ) -> TierOutcome {
        let last_tier = criteria.last_tier();
        let mut tier = 1u8;
        let mut selected = self.select(videos, metrics, &criteria.tier1, preferences, now);
        debug!(tier, passed = selected.len(), "applied tier criteria");

        loop {
            if selected.len() >= self.min_results || tier >= last_tier {
                break;
            }

            let next_tier = tier + 1;
            let Some(next) = criteria.tier(next_tier) else {
                break;
            };
            let passing = self.select(videos, metrics, next, preferences, now);
            debug!(tier = next_tier, passed = passing.len(), "applied tier criteria");

            if criteria.strict_transition {
                // Entries already selected stay; duplicates are intentional.
                selected.extend(passing);
            } else {
                selected = passing;
            }
            tier = next_tier;
        }

        if selected.is_empty() {
            info!(last_tier = tier, "no videos qualified at any tier");
            return TierOutcome {
                videos: selected,
                used_tier: 0,
            };
        }

        info!(tier, count = selected.len(), "tiered filtering finished");
        TierOutcome {
            videos: selected,
            used_tier: tier,
        }
    }

    fn select(
        &self,
        videos: &[CandidateVideo],
        metrics: &BTreeMap<String, QualityMetrics>,
        criteria: &TierCriteria,
        preferences: &UserPreferences,
        now: DateTime<Utc>,
    ) -> Vec<CandidateVideo> {
        videos
            .iter()
            .filter(|video| passes(video, metrics.get(&video.id), criteria, preferences, now))
            .cloned()
            .collect()
    }
}

/// Whether a video satisfies every threshold of one tier. Videos without
/// metrics never pass.
pub fn passes(
    video: &CandidateVideo,
    metrics: Option<&QualityMetrics>,
    criteria: &TierCriteria,
    preferences: &UserPreferences,
    now: DateTime<Utc>,
) -> bool {
    let Some(metrics) = metrics else {
        return false;
    };

    if metrics.authority_score < criteria.min_authority_score
        || metrics.content_quality_score < criteria.min_quality_score
        || metrics.engagement_score < criteria.min_engagement_score
        || metrics.relevancy_score < criteria.min_relevancy_score
    {
        return false;
    }

    if video.view_count < criteria.min_view_count {
        return false;
    }

    let duration = parse_duration(&video.duration);
    if duration < criteria.min_duration || duration > criteria.max_duration {
        return false;
    }

    if video.age_in_days(now) > f64::from(criteria.max_age_in_days) {
        return false;
    }

    if criteria.requires_completeness && !is_complete(video) {
        return false;
    }

    if !preferences.language_preferences.is_empty()
        && !preferences
            .language_preferences
            .iter()
            .any(|language| language == video.language())
    {
        return false;
    }

    if let (Some(region), Some(restriction)) =
        (preferences.region_code.as_deref(), video.region_restriction.as_ref())
    {
        if !restriction.permits(region) {
            return false;
        }
    }

    true
}

fn is_complete(video: &CandidateVideo) -> bool {
    !video.description.trim().is_empty()
        && video.thumbnails.has_high_res()
        && !video.title.trim().is_empty()
        && !video.tags.is_empty()
}
