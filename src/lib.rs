pub mod batch;
pub mod config;
pub mod duration;
pub mod engine;
pub mod error;
pub mod model;
pub mod quality;
pub mod ranking;
pub mod synthetic;
pub mod tiers;
pub mod validation;

pub use batch::BatchMetricsCalculator;
pub use config::EngineConfig;
pub use duration::parse_duration;
pub use engine::FilteringEngine;
pub use error::{QualityError, QualityResult};
pub use model::{
    CandidateSet, CandidateVideo, ChannelRecord, FilterResult, QualityMetrics, QualityWeights,
    RegionRestriction, ThumbnailInfo, Thumbnails, UserPreferences,
};
pub use quality::{QualityScorer, QualityService};
pub use ranking::WeightedRanker;
pub use tiers::{TierCriteria, TierCriteriaGenerator, TieredFilter, TieredQualityCriteria};

pub(crate) fn clamp01(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.max(0.0).min(1.0)
}

pub(crate) fn bool_to_f64(value: bool) -> f64 {
    if value {
        1.0
    } else {
        0.0
    }
}

pub(crate) fn log10_safe(value: f64) -> f64 {
    if value <= 0.0 {
        0.0
    } else {
        value.log10()
    }
}

pub fn format_number(value: f64) -> String {
    let rounded = value.round().max(0.0) as i64;
    let mut chars: Vec<char> = rounded.to_string().chars().collect();
    let mut result = String::new();
    let mut count = 0usize;

    while let Some(ch) = chars.pop() {
        if count == 3 {
            result.push(',');
            count = 0;
        }
        result.push(ch);
        count += 1;
    }

    result.chars().rev().collect()
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
