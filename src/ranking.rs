use std::collections::BTreeMap;

use crate::model::{CandidateVideo, QualityMetrics, QualityWeights};
use crate::quality::service::weighted_score;

#[derive(Debug, Clone)]
pub struct WeightedRanker {
    weights: QualityWeights,
}

impl WeightedRanker {
    pub fn new(weights: QualityWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, metrics: &QualityMetrics) -> f64 {
        weighted_score(metrics, &self.weights)
    }

    /// Sorts scored videos by descending weighted score. Videos without
    /// metrics keep their positions; scored ones fill the remaining slots in
    /// ranked order, ties keeping their input order.
    pub fn rank(
        &self,
        videos: Vec<CandidateVideo>,
        metrics: &BTreeMap<String, QualityMetrics>,
    ) -> Vec<CandidateVideo> {
        let mut slots: Vec<Option<CandidateVideo>> = Vec::with_capacity(videos.len());
        let mut scored: Vec<(usize, f64, CandidateVideo)> = Vec::new();

        for (index, video) in videos.into_iter().enumerate() {
            match metrics.get(&video.id) {
                Some(video_metrics) => {
                    scored.push((index, self.score(video_metrics), video));
                    slots.push(None);
                }
                None => slots.push(Some(video)),
            }
        }

        let open_slots: Vec<usize> = scored.iter().map(|(index, _, _)| *index).collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        for (slot, (_, _, video)) in open_slots.into_iter().zip(scored) {
            slots[slot] = Some(video);
        }

        slots.into_iter().flatten().collect()
    }
}
