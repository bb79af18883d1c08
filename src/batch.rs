use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::config::BatchConfig;
use crate::error::QualityError;
use crate::model::{CandidateVideo, ChannelRecord, QualityMetrics};
use crate::quality::QualityScorer;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub metrics: BTreeMap<String, QualityMetrics>,
    pub batches: usize,
    /// Batches that still failed after every retry.
    pub failed_batches: usize,
    pub attempts: usize,
    /// Videos skipped because scoring them failed.
    pub item_failures: usize,
}

struct BatchFailure {
    error: QualityError,
    partial: BTreeMap<String, QualityMetrics>,
    item_failures: usize,
}

struct BatchSuccess {
    metrics: BTreeMap<String, QualityMetrics>,
    item_failures: usize,
}

/// Scores candidates in fixed-size batches. Batches run one after another;
/// the videos inside a batch are scored concurrently.
#[derive(Clone)]
pub struct BatchMetricsCalculator {
    scorer: Arc<dyn QualityScorer>,
    config: BatchConfig,
}

impl BatchMetricsCalculator {
    pub fn new(scorer: Arc<dyn QualityScorer>, config: BatchConfig) -> Self {
        Self { scorer, config }
    }

    pub fn batch_size(&self) -> usize {
        self.config.batch_size.max(1)
    }

    pub async fn calculate(
        &self,
        videos: &[CandidateVideo],
        channels: &HashMap<String, ChannelRecord>,
        search_query: Option<&str>,
        now: DateTime<Utc>,
    ) -> BTreeMap<String, QualityMetrics> {
        self.calculate_detailed(videos, channels, search_query, now)
            .await
            .metrics
    }

    pub async fn calculate_detailed(
        &self,
        videos: &[CandidateVideo],
        channels: &HashMap<String, ChannelRecord>,
        search_query: Option<&str>,
        now: DateTime<Utc>,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for (index, batch) in videos.chunks(self.batch_size()).enumerate() {
            debug!(batch = index, size = batch.len(), "scoring batch");
            outcome.batches += 1;
            self.process_batch_with_retry(batch, channels, search_query, now, &mut outcome)
                .await;
        }

        outcome
    }

    async fn process_batch_with_retry(
        &self,
        batch: &[CandidateVideo],
        channels: &HashMap<String, ChannelRecord>,
        search_query: Option<&str>,
        now: DateTime<Utc>,
        outcome: &mut BatchOutcome,
    ) {
        // Metrics survive across attempts; a retry only rescores the rest.
        let mut scored: BTreeMap<String, QualityMetrics> = BTreeMap::new();
        let mut attempt = 0u32;
        loop {
            outcome.attempts += 1;
            let pending: Vec<CandidateVideo> = batch
                .iter()
                .filter(|video| !scored.contains_key(&video.id))
                .cloned()
                .collect();

            match self.process_batch(&pending, channels, search_query, now).await {
                Ok(success) => {
                    scored.extend(success.metrics);
                    outcome.item_failures += success.item_failures;
                    outcome.metrics.extend(scored);
                    return;
                }
                Err(failure) if attempt < self.config.max_retries => {
                    scored.extend(failure.partial);
                    let delay = self.config.retry_delay(attempt);
                    warn!(
                        "batch scoring failed (attempt {}), retrying in {:?}: {}",
                        attempt + 1,
                        delay,
                        failure.error
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(failure) => {
                    scored.extend(failure.partial);
                    error!(
                        "batch scoring failed after {} attempts, keeping {} partial results: {}",
                        attempt + 1,
                        scored.len(),
                        failure.error
                    );
                    outcome.failed_batches += 1;
                    outcome.item_failures += failure.item_failures;
                    outcome.metrics.extend(scored);
                    return;
                }
            }
        }
    }

    async fn process_batch(
        &self,
        batch: &[CandidateVideo],
        channels: &HashMap<String, ChannelRecord>,
        search_query: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<BatchSuccess, BatchFailure> {
        let mut tasks = JoinSet::new();
        let mut item_failures = 0usize;

        for video in batch {
            let Some(channel) = channels.get(&video.channel_id) else {
                warn!(video_id = %video.id, "channel not found for video");
                item_failures += 1;
                continue;
            };

            let scorer = Arc::clone(&self.scorer);
            let video = video.clone();
            let channel = channel.clone();
            let query = search_query.map(str::to_string);
            tasks.spawn(async move {
                let result = scorer.score(&video, &channel, query.as_deref(), now);
                (video.id, result)
            });
        }

        let mut metrics = BTreeMap::new();
        let mut systemic: Option<QualityError> = None;

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((video_id, Ok(video_metrics))) => {
                    metrics.insert(video_id, video_metrics);
                }
                Ok((_, Err(err))) if err.is_retryable() => {
                    systemic.get_or_insert(err);
                }
                Ok((video_id, Err(err))) => {
                    warn!(video_id = %video_id, "skipping video: {}", err);
                    item_failures += 1;
                }
                Err(err) => {
                    error!("video scoring task aborted: {}", err);
                    item_failures += 1;
                }
            }
        }

        match systemic {
            Some(error) => Err(BatchFailure {
                error,
                partial: metrics,
                item_failures,
            }),
            None => Ok(BatchSuccess {
                metrics,
                item_failures,
            }),
        }
    }
}
