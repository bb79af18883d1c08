use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::batch::BatchMetricsCalculator;
use crate::config::EngineConfig;
use crate::model::{CandidateVideo, ChannelRecord, FilterResult, UserPreferences};
use crate::quality::{QualityScorer, QualityService};
use crate::ranking::WeightedRanker;
use crate::tiers::{TierCriteriaGenerator, TieredFilter, TieredQualityCriteria};
use crate::validation::{is_valid_channel_id, is_valid_video_id};

/// Filter-and-rank entry point. Never fails: every problem degrades to an
/// empty or partial result.
#[derive(Clone)]
pub struct FilteringEngine {
    metrics: BatchMetricsCalculator,
    generator: TierCriteriaGenerator,
    filter: TieredFilter,
}

impl Default for FilteringEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl FilteringEngine {
    pub fn new(config: EngineConfig) -> Self {
        let scorer = Arc::new(QualityService::new(config.quality.clone()));
        Self::with_scorer(config, scorer)
    }

    pub fn with_scorer(config: EngineConfig, scorer: Arc<dyn QualityScorer>) -> Self {
        Self {
            metrics: BatchMetricsCalculator::new(scorer, config.batch.clone()),
            filter: TieredFilter::new(config.tiers.min_results),
            generator: TierCriteriaGenerator::new(config.tiers),
        }
    }

    pub fn criteria_for(&self, preferences: &UserPreferences) -> TieredQualityCriteria {
        self.generator.generate(preferences)
    }

    pub async fn filter_and_rank_content(
        &self,
        videos: &[CandidateVideo],
        channels: &HashMap<String, ChannelRecord>,
        preferences: &UserPreferences,
        search_query: Option<&str>,
    ) -> FilterResult {
        self.filter_and_rank_content_at(videos, channels, preferences, search_query, Utc::now())
            .await
    }

    /// Same as [`filter_and_rank_content`](Self::filter_and_rank_content) with
    /// an explicit clock reading used for every age computation in the call.
    pub async fn filter_and_rank_content_at(
        &self,
        videos: &[CandidateVideo],
        channels: &HashMap<String, ChannelRecord>,
        preferences: &UserPreferences,
        search_query: Option<&str>,
        now: DateTime<Utc>,
    ) -> FilterResult {
        if videos.is_empty() {
            warn!("no videos provided to filter");
            return FilterResult::empty();
        }

        let candidates: Vec<CandidateVideo> = videos
            .iter()
            .filter(|video| {
                if !is_valid_video_id(&video.id) {
                    warn!(video_id = %video.id, "skipping video with invalid id");
                    return false;
                }
                if !is_valid_channel_id(&video.channel_id) {
                    warn!(
                        video_id = %video.id,
                        channel_id = %video.channel_id,
                        "skipping video with invalid channel id"
                    );
                    return false;
                }
                if !channels.contains_key(&video.channel_id) {
                    debug!(video_id = %video.id, "no channel data for video");
                    return false;
                }
                true
            })
            .cloned()
            .collect();

        if candidates.is_empty() {
            warn!("no videos with valid ids and available channel data");
            return FilterResult::empty();
        }

        let metrics = self
            .metrics
            .calculate(&candidates, channels, search_query, now)
            .await;

        if metrics.is_empty() {
            warn!("no quality metrics calculated");
            return FilterResult::empty();
        }

        let criteria = self.generator.generate(preferences);
        let outcome = self
            .filter
            .apply(&candidates, &metrics, &criteria, preferences, now);

        if outcome.videos.is_empty() {
            warn!("no videos passed any tier, try different keywords");
            return FilterResult::with_metrics(metrics);
        }

        let ranker = WeightedRanker::new(preferences.weights.clone());
        let mut ranked = ranker.rank(outcome.videos, &metrics);
        ranked.truncate(preferences.number_of_videos);

        info!(
            returned = ranked.len(),
            scored = metrics.len(),
            tier = outcome.used_tier,
            "filtered and ranked candidates"
        );

        FilterResult {
            videos: ranked,
            metrics,
            used_tier: outcome.used_tier,
        }
    }
}
