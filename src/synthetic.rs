use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sha2::{Digest, Sha256};

use crate::model::{CandidateSet, CandidateVideo, ChannelRecord, ThumbnailInfo, Thumbnails};

const VIDEOS_PER_CHANNEL: usize = 4;

const TOPICS: [&str; 8] = [
    "rust ownership",
    "sourdough baking",
    "trail running",
    "home espresso",
    "synth patching",
    "watercolor landscapes",
    "chess endgames",
    "bike maintenance",
];

const TITLE_TEMPLATES: [&str; 6] = [
    "A practical guide to {}",
    "{} explained in depth",
    "Beginner mistakes in {} and how to fix them",
    "SHOCKING truth about {}!!",
    "7 things nobody tells you about {}",
    "{}",
];

/// Deterministic candidate videos and their channels for demos and tests.
pub fn generate_synthetic_candidates(count: usize, seed: u64, now: DateTime<Utc>) -> CandidateSet {
    let mut rng = StdRng::seed_from_u64(seed);
    let channel_total = count.div_ceil(VIDEOS_PER_CHANNEL).max(1);

    let channels: Vec<ChannelRecord> = (0..channel_total)
        .map(|idx| synthetic_channel(&mut rng, seed, idx, now))
        .collect();

    let videos = (0..count)
        .map(|idx| {
            let channel = &channels[rng.gen_range(0..channels.len())];
            synthetic_video(&mut rng, seed, idx, &channel.id, now)
        })
        .collect();

    CandidateSet { videos, channels }
}

/// 11-character id derived from the first 8 bytes of a SHA-256 digest.
pub fn synthetic_video_id(seed: u64, index: usize) -> String {
    let digest = digest(&format!("video:{}:{}", seed, index));
    URL_SAFE_NO_PAD.encode(&digest[..8])
}

/// "UC" followed by 22 characters derived from 16 digest bytes.
pub fn synthetic_channel_id(seed: u64, index: usize) -> String {
    let digest = digest(&format!("channel:{}:{}", seed, index));
    format!("UC{}", URL_SAFE_NO_PAD.encode(&digest[..16]))
}

fn digest(value: &str) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    hasher.finalize().to_vec()
}

fn synthetic_channel(rng: &mut StdRng, seed: u64, idx: usize, now: DateTime<Utc>) -> ChannelRecord {
    let subscriber_count = log_uniform(rng, 1.0, 7.0);
    let video_count = rng.gen_range(5..2_000u64);
    let avg_views = log_uniform(rng, 2.0, 6.0);
    let created_at = now - Duration::days(rng.gen_range(180..4_000));

    let upload_total = rng.gen_range(0..6usize);
    let cadence = rng.gen_range(2..30i64);
    let recent_uploads = (0..upload_total)
        .map(|n| {
            let jitter = rng.gen_range(0..=cadence / 2);
            now - Duration::days(n as i64 * cadence + jitter)
        })
        .collect();

    ChannelRecord {
        id: synthetic_channel_id(seed, idx),
        title: format!("Channel {}", idx + 1),
        subscriber_count,
        total_views: avg_views.saturating_mul(video_count),
        video_count,
        created_at,
        recent_uploads,
    }
}

fn synthetic_video(
    rng: &mut StdRng,
    seed: u64,
    idx: usize,
    channel_id: &str,
    now: DateTime<Utc>,
) -> CandidateVideo {
    let id = synthetic_video_id(seed, idx);
    let topic = TOPICS[rng.gen_range(0..TOPICS.len())];
    let template = TITLE_TEMPLATES[rng.gen_range(0..TITLE_TEMPLATES.len())];
    let title = template.replace("{}", topic);

    let view_count = log_uniform(rng, 1.0, 7.0);
    let like_count = (view_count as f64 * rng.gen_range(0.001..0.06)).round() as u64;
    let comment_count = (view_count as f64 * rng.gen_range(0.0001..0.005)).round() as u64;

    let description = match rng.gen_range(0..3) {
        0 => String::new(),
        1 => format!("Notes on {}.", topic),
        _ => format!(
            "Everything about {topic} in one session.\n\nChapters and links: https://example.com/{id}\nFollow along and practise {topic} at home."
        ),
    };

    let minutes = rng.gen_range(0..90u32);
    let seconds = rng.gen_range(0..60u32);
    let duration = if minutes >= 60 {
        format!("PT1H{}M{}S", minutes - 60, seconds)
    } else {
        format!("PT{}M{}S", minutes, seconds)
    };

    let tags = if rng.gen_bool(0.7) {
        topic.split_whitespace().map(str::to_string).collect()
    } else {
        Vec::new()
    };

    let default_language = match rng.gen_range(0..10) {
        0 => Some("es".to_string()),
        1 => Some("de".to_string()),
        2 => None,
        _ => Some("en".to_string()),
    };

    CandidateVideo {
        id: id.clone(),
        title,
        description,
        published_at: now - Duration::days(rng.gen_range(1..1_200)),
        channel_id: channel_id.to_string(),
        view_count,
        like_count,
        comment_count,
        duration,
        default_language,
        tags,
        category_id: Some(if rng.gen_bool(0.1) { "10" } else { "27" }.to_string()),
        has_captions: rng.gen_bool(0.6),
        audio_quality: rng.gen_bool(0.3).then(|| "hd".to_string()),
        thumbnails: synthetic_thumbnails(rng, &id),
        region_restriction: None,
    }
}

fn synthetic_thumbnails(rng: &mut StdRng, id: &str) -> Thumbnails {
    let thumb = |url: String, width: u32, height: u32| ThumbnailInfo { url, width, height };
    let default_url = if rng.gen_bool(0.5) {
        format!("https://i.ytimg.com/vi/{}/default.jpg", id)
    } else {
        format!("https://cdn.example.com/custom/{}.jpg", id)
    };

    Thumbnails {
        default: Some(thumb(default_url, 120, 90)),
        medium: Some(thumb(format!("https://i.ytimg.com/vi/{}/mqdefault.jpg", id), 320, 180)),
        high: rng
            .gen_bool(0.8)
            .then(|| thumb(format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id), 1280, 720)),
        maxres: rng
            .gen_bool(0.4)
            .then(|| thumb(format!("https://i.ytimg.com/vi/{}/maxresdefault.jpg", id), 1920, 1080)),
    }
}

fn log_uniform(rng: &mut StdRng, min_exp: f64, max_exp: f64) -> u64 {
    10f64.powf(rng.gen_range(min_exp..max_exp)).round() as u64
}
