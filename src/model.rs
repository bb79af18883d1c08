use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailInfo {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub default: Option<ThumbnailInfo>,
    #[serde(default)]
    pub medium: Option<ThumbnailInfo>,
    #[serde(default)]
    pub high: Option<ThumbnailInfo>,
    #[serde(default)]
    pub maxres: Option<ThumbnailInfo>,
}

impl Thumbnails {
    pub fn has_high_res(&self) -> bool {
        self.high.is_some() || self.maxres.is_some()
    }
}

/// Country-code allow/block lists attached to a video by the content source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionRestriction {
    #[serde(default)]
    pub allowed: Option<Vec<String>>,
    #[serde(default)]
    pub blocked: Option<Vec<String>>,
}

impl RegionRestriction {
    pub fn permits(&self, region_code: &str) -> bool {
        if let Some(blocked) = &self.blocked {
            if blocked.iter().any(|code| code == region_code) {
                return false;
            }
        }
        if let Some(allowed) = &self.allowed {
            return allowed.iter().any(|code| code == region_code);
        }
        true
    }
}

/// Snapshot of a video's public metadata. Never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateVideo {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub published_at: DateTime<Utc>,
    pub channel_id: String,
    #[serde(default)]
    pub view_count: u64,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comment_count: u64,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub default_language: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub has_captions: bool,
    #[serde(default)]
    pub audio_quality: Option<String>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(default)]
    pub region_restriction: Option<RegionRestriction>,
}

impl CandidateVideo {
    pub fn language(&self) -> &str {
        self.default_language.as_deref().unwrap_or("en")
    }

    pub fn age_in_days(&self, now: DateTime<Utc>) -> f64 {
        days_between(self.published_at, now)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subscriber_count: u64,
    #[serde(default)]
    pub total_views: u64,
    #[serde(default)]
    pub video_count: u64,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub recent_uploads: Vec<DateTime<Utc>>,
}

/// Ranking weights. They need not sum to one; ranking divides by their sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityWeights {
    pub engagement: f64,
    pub authority: f64,
    pub quality: f64,
    pub freshness: f64,
    pub relevancy: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            engagement: 1.0,
            authority: 1.0,
            quality: 1.0,
            freshness: 1.0,
            relevancy: 1.0,
        }
    }
}

impl QualityWeights {
    pub fn total(&self) -> f64 {
        self.engagement + self.authority + self.quality + self.freshness + self.relevancy
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub min_engagement_score: f64,
    pub min_authority_score: f64,
    pub min_quality_score: f64,
    pub min_relevancy_score: f64,
    /// Maximum content age in days.
    pub max_content_age: u32,
    pub min_view_count: u64,
    /// Seconds.
    pub min_duration: u64,
    /// Seconds.
    pub max_duration: u64,
    pub language_preferences: Vec<String>,
    pub region_code: Option<String>,
    pub number_of_videos: usize,
    pub weights: QualityWeights,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            min_engagement_score: 0.0,
            min_authority_score: 0.0,
            min_quality_score: 0.0,
            min_relevancy_score: 0.0,
            max_content_age: 365,
            min_view_count: 0,
            min_duration: 0,
            max_duration: 3600,
            language_preferences: Vec::new(),
            region_code: None,
            number_of_videos: 5,
            weights: QualityWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub engagement_score: f64,
    pub authority_score: f64,
    pub content_quality_score: f64,
    pub freshness_score: f64,
    pub relevancy_score: f64,
    pub overall_score: f64,
    pub confidence: f64,
}

impl QualityMetrics {
    pub fn sub_scores(&self) -> [f64; 5] {
        [
            self.engagement_score,
            self.authority_score,
            self.content_quality_score,
            self.freshness_score,
            self.relevancy_score,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterResult {
    pub videos: Vec<CandidateVideo>,
    pub metrics: BTreeMap<String, QualityMetrics>,
    /// 1-3, or 0 when nothing qualified.
    pub used_tier: u8,
}

impl FilterResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: BTreeMap<String, QualityMetrics>) -> Self {
        Self {
            videos: Vec::new(),
            metrics,
            used_tier: 0,
        }
    }
}

/// Videos and channels as handed over by the content source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateSet {
    #[serde(default)]
    pub videos: Vec<CandidateVideo>,
    #[serde(default)]
    pub channels: Vec<ChannelRecord>,
}

impl CandidateSet {
    pub fn channels_by_id(&self) -> HashMap<String, ChannelRecord> {
        self.channels
            .iter()
            .map(|channel| (channel.id.clone(), channel.clone()))
            .collect()
    }
}

pub(crate) fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / MILLIS_PER_DAY
}

pub(crate) const MILLIS_PER_DAY: f64 = 1000.0 * 60.0 * 60.0 * 24.0;
