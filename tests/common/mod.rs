#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;
use video_curator::{CandidateVideo, ChannelRecord, ThumbnailInfo, Thumbnails};

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

pub fn video_id(n: usize) -> String {
    format!("vid{:08}", n)
}

pub fn channel_id(n: usize) -> String {
    format!("UC{:022}", n)
}

pub fn thumb(url: &str, width: u32, height: u32) -> ThumbnailInfo {
    ThumbnailInfo {
        url: url.to_string(),
        width,
        height,
    }
}

pub fn strong_channel(n: usize) -> ChannelRecord {
    ChannelRecord {
        id: channel_id(n),
        title: format!("Channel {}", n),
        subscriber_count: 1_000_000,
        total_views: 50_000_000,
        video_count: 500,
        created_at: fixed_now() - Duration::days(3_000),
        recent_uploads: vec![
            fixed_now() - Duration::days(7),
            fixed_now() - Duration::days(14),
            fixed_now() - Duration::days(21),
        ],
    }
}

/// A complete, well-performing video that passes the strictest tier.
pub fn strong_video(n: usize, channel: usize) -> CandidateVideo {
    let id = video_id(n);
    CandidateVideo {
        id: id.clone(),
        title: "Learning Rust ownership step by step".to_string(),
        description: format!(
            "A walkthrough of borrowing and lifetimes with worked examples.\n\nSource code: https://example.com/{}\nQuestions welcome in the comments.",
            id
        ),
        published_at: fixed_now() - Duration::days(30),
        channel_id: channel_id(channel),
        view_count: 100_000,
        like_count: 5_000,
        comment_count: 500,
        duration: "PT10M".to_string(),
        default_language: Some("en".to_string()),
        tags: vec!["rust".to_string(), "programming".to_string()],
        category_id: Some("27".to_string()),
        has_captions: true,
        audio_quality: None,
        thumbnails: Thumbnails {
            default: Some(thumb("https://cdn.example.com/custom.jpg", 120, 90)),
            medium: None,
            high: Some(thumb("https://i.ytimg.com/vi/x/hqdefault.jpg", 1280, 720)),
            maxres: None,
        },
        region_restriction: None,
    }
}

/// Same as a strong video but with a view count that only tier 2 accepts.
pub fn mid_video(n: usize, channel: usize) -> CandidateVideo {
    let mut video = strong_video(n, channel);
    video.view_count = 800;
    video.like_count = 40;
    video.comment_count = 4;
    video
}

/// Only the loosest tier accepts this one.
pub fn weak_video(n: usize, channel: usize) -> CandidateVideo {
    let mut video = strong_video(n, channel);
    video.view_count = 300;
    video.like_count = 15;
    video.comment_count = 2;
    video.tags.clear();
    video
}

pub fn channel_map(channels: Vec<ChannelRecord>) -> HashMap<String, ChannelRecord> {
    channels
        .into_iter()
        .map(|channel| (channel.id.clone(), channel))
        .collect()
}
