use regex::Regex;
use std::sync::OnceLock;

use crate::model::{CandidateSet, CandidateVideo, ChannelRecord};

fn video_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("video id pattern compiles"))
}

fn channel_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^UC[a-zA-Z0-9_-]{22}$").expect("channel id pattern compiles"))
}

pub fn is_valid_video_id(value: &str) -> bool {
    video_id_pattern().is_match(value)
}

pub fn is_valid_channel_id(value: &str) -> bool {
    channel_id_pattern().is_match(value)
}

/// Lists every problem with a video record; empty means valid.
pub fn validate_video(video: &CandidateVideo) -> Vec<String> {
    let mut errors = Vec::new();
    if !is_valid_video_id(&video.id) {
        errors.push(format!("invalid video id: {:?}", video.id));
    }
    if !is_valid_channel_id(&video.channel_id) {
        errors.push(format!("invalid channel id: {:?}", video.channel_id));
    }
    if video.title.trim().is_empty() {
        errors.push("missing video title".to_string());
    }
    errors
}

pub fn validate_channel(channel: &ChannelRecord) -> Vec<String> {
    let mut errors = Vec::new();
    if !is_valid_channel_id(&channel.id) {
        errors.push(format!("invalid channel id: {:?}", channel.id));
    }
    if channel.title.trim().is_empty() {
        errors.push("missing channel title".to_string());
    }
    errors
}

/// Problems across a whole candidate set, each prefixed with the record id.
/// Videos whose channel is missing from the set are reported too.
pub fn validate_candidates(candidates: &CandidateSet) -> Vec<String> {
    let channels = candidates.channels_by_id();
    let mut problems = Vec::new();

    for channel in &candidates.channels {
        problems.extend(
            validate_channel(channel)
                .into_iter()
                .map(|problem| format!("channel {}: {}", channel.id, problem)),
        );
    }

    for video in &candidates.videos {
        problems.extend(
            validate_video(video)
                .into_iter()
                .map(|problem| format!("video {}: {}", video.id, problem)),
        );
        if !channels.contains_key(&video.channel_id) {
            problems.push(format!(
                "video {}: no channel record for {}",
                video.id, video.channel_id
            ));
        }
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_ids_are_eleven_url_safe_chars() {
        assert!(is_valid_video_id("dQw4w9WgXcQ"));
        assert!(is_valid_video_id("a-b_c-d_e-f"));
        assert!(!is_valid_video_id("dQw4w9WgXc"));
        assert!(!is_valid_video_id("dQw4w9WgXcQQ"));
        assert!(!is_valid_video_id("dQw4w9WgX!Q"));
    }

    #[test]
    fn channel_ids_need_uc_prefix() {
        assert!(is_valid_channel_id("UCuAXFkgsw1L7xaCfnd5JJOw"));
        assert!(!is_valid_channel_id("XXuAXFkgsw1L7xaCfnd5JJOw"));
        assert!(!is_valid_channel_id("UCshort"));
    }

    #[test]
    fn channel_validation_lists_every_problem() {
        let channel = ChannelRecord {
            id: "UCshort".to_string(),
            title: "  ".to_string(),
            subscriber_count: 0,
            total_views: 0,
            video_count: 0,
            created_at: chrono::Utc::now(),
            recent_uploads: Vec::new(),
        };
        assert_eq!(validate_channel(&channel).len(), 2);
    }
}
