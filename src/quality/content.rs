use regex::RegexSet;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::model::{CandidateVideo, Thumbnails};
use crate::{bool_to_f64, clamp01};

const MUSIC_CATEGORY: &str = "10";

fn clickbait_patterns() -> &'static RegexSet {
    static PATTERNS: OnceLock<RegexSet> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        RegexSet::new([
            r"(?i)you won't believe",
            r"(?i)shocking",
            r"(?i)amazing",
            r"(?i)\d+ (things|ways|reasons)",
            r"(?i)\(.*gone.*wrong\)",
            r"!{2,}",
        ])
        .expect("clickbait patterns compile")
    })
}

pub fn is_clickbait(title: &str) -> bool {
    clickbait_patterns().is_match(title)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentQualityMetrics {
    pub has_hd_video: bool,
    pub has_captions: bool,
    pub description_quality: f64,
    pub title_quality: f64,
    // The three below are informational and carry no weight in the score.
    pub thumbnail_quality: f64,
    pub production_value: f64,
    pub audio_quality: f64,
}

#[derive(Debug, Clone)]
pub struct ContentQualityScorer {
    description_reference: usize,
    title_reference: usize,
}

impl ContentQualityScorer {
    pub fn new(description_reference: usize, title_reference: usize) -> Self {
        Self {
            description_reference: description_reference.max(1),
            title_reference: title_reference.max(1),
        }
    }

    pub fn metrics(&self, video: &CandidateVideo) -> ContentQualityMetrics {
        ContentQualityMetrics {
            has_hd_video: video.thumbnails.high.is_some(),
            has_captions: video.has_captions,
            description_quality: self.description_quality(&video.description),
            title_quality: self.title_quality(&video.title),
            thumbnail_quality: thumbnail_quality(&video.thumbnails),
            production_value: self.production_value(video),
            audio_quality: audio_quality(video),
        }
    }

    pub fn score(&self, metrics: &ContentQualityMetrics) -> f64 {
        let hd_score = if metrics.has_hd_video { 1.0 } else { 0.5 };
        let caption_score = if metrics.has_captions { 1.0 } else { 0.7 };

        hd_score * 0.3
            + caption_score * 0.2
            + metrics.description_quality * 0.25
            + metrics.title_quality * 0.25
    }

    pub fn description_quality(&self, description: &str) -> f64 {
        let length = description.chars().count() as f64;
        let has_links = description.contains("http");
        let has_formatting = description.contains('\n');

        let length_score = clamp01(length / self.description_reference as f64);
        let format_score = 0.5 * bool_to_f64(has_links) + 0.5 * bool_to_f64(has_formatting);

        length_score * 0.7 + format_score * 0.3
    }

    pub fn title_quality(&self, title: &str) -> f64 {
        let length = title.chars().count() as f64;
        let has_keywords = title.split_whitespace().count() >= 3;

        let length_score = clamp01(length / self.title_reference as f64);
        let keyword_score = if has_keywords { 1.0 } else { 0.5 };
        let clickbait_penalty = if is_clickbait(title) { 0.5 } else { 1.0 };

        length_score * 0.3 + keyword_score * 0.3 + clickbait_penalty * 0.4
    }

    fn production_value(&self, video: &CandidateVideo) -> f64 {
        let has_maxres = video.thumbnails.maxres.is_some();
        let has_description = video.description.chars().count() > self.description_reference;
        let has_tags = !video.tags.is_empty();
        let has_custom_title =
            !video.title.to_lowercase().contains("video") && video.title.chars().count() > 20;

        0.3 * bool_to_f64(has_maxres)
            + 0.3 * bool_to_f64(has_description)
            + 0.2 * bool_to_f64(has_tags)
            + 0.2 * bool_to_f64(has_custom_title)
    }
}

fn thumbnail_quality(thumbnails: &Thumbnails) -> f64 {
    let has_custom = thumbnails
        .default
        .as_ref()
        .map(|thumb| !thumb.url.contains("vi/"))
        .unwrap_or(false);

    let aspect_ratio = match &thumbnails.high {
        Some(high) if high.height > 0 => high.width as f64 / high.height as f64,
        Some(_) => 0.0,
        None => 16.0 / 9.0,
    };
    let widescreen = (aspect_ratio - 16.0 / 9.0).abs() < 0.1;

    0.4 * bool_to_f64(thumbnails.has_high_res())
        + 0.4 * bool_to_f64(has_custom)
        + 0.2 * bool_to_f64(widescreen)
}

fn audio_quality(video: &CandidateVideo) -> f64 {
    let hd_audio = video
        .audio_quality
        .as_deref()
        .map(|quality| quality.eq_ignore_ascii_case("hd"))
        .unwrap_or(false);
    let is_music = video.category_id.as_deref() == Some(MUSIC_CATEGORY);

    (if hd_audio { 0.5 } else { 0.3 })
        + 0.3 * bool_to_f64(video.has_captions)
        + (if is_music { 0.2 } else { 0.1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_clickbait_titles() {
        assert!(is_clickbait("You Won't Believe What Happened"));
        assert!(is_clickbait("10 Things Nobody Tells You"));
        assert!(is_clickbait("Camping (GONE WRONG)"));
        assert!(is_clickbait("Wow!!"));
        assert!(is_clickbait("An amazing sunset"));
        assert!(!is_clickbait("Introduction to Rust ownership"));
        assert!(!is_clickbait("Wow!"));
    }

    #[test]
    fn title_quality_penalises_clickbait() {
        let scorer = ContentQualityScorer::new(100, 50);
        let honest = scorer.title_quality("Building a compiler in Rust part one");
        let bait = scorer.title_quality("SHOCKING compiler secrets revealed!!");
        assert!(honest > bait);
    }

    #[test]
    fn empty_description_scores_zero() {
        let scorer = ContentQualityScorer::new(100, 50);
        assert_eq!(scorer.description_quality(""), 0.0);
        let rich = format!("{}\nhttps://example.com", "a".repeat(120));
        assert!((scorer.description_quality(&rich) - 1.0).abs() < 1e-9);
    }
}
