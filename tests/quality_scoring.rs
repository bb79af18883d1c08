mod common;

use chrono::Duration;
use common::{fixed_now, strong_channel, strong_video};
use video_curator::quality::QualityConfig;
use video_curator::{QualityService, QualityWeights, Thumbnails};

fn in_unit_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

#[test]
fn strong_video_scores_match_reference_formulas() {
    let service = QualityService::default();
    let video = strong_video(1, 1);
    let channel = strong_channel(1);

    let metrics = service
        .calculate_video_quality(&video, &channel, None, fixed_now())
        .unwrap();

    let view_score = (100_000.0f64 / 30.0).log10() / 5.0;
    let expected_engagement = 0.4 + 0.3 + 0.3 * view_score;
    assert!((metrics.engagement_score - expected_engagement).abs() < 1e-6);

    let expected_authority = 0.4 * (6.0 / 7.0) + 0.3 + 0.3 * (5.0 / 6.0);
    assert!((metrics.authority_score - expected_authority).abs() < 1e-6);

    let expected_freshness = 1.0 - 30.0 / 365.0;
    assert!((metrics.freshness_score - expected_freshness).abs() < 1e-6);

    assert!((metrics.relevancy_score - 1.0).abs() < 1e-6);
    assert!((metrics.confidence - 1.0).abs() < 1e-6);

    let expected_overall = 0.25 * metrics.engagement_score
        + 0.25 * metrics.authority_score
        + 0.2 * metrics.content_quality_score
        + 0.15 * metrics.freshness_score
        + 0.15 * metrics.relevancy_score;
    assert!((metrics.overall_score - expected_overall).abs() < 1e-6);
}

#[test]
fn zero_statistics_do_not_produce_nan() {
    let service = QualityService::default();
    let mut video = strong_video(2, 1);
    video.view_count = 0;
    video.like_count = 0;
    video.comment_count = 0;
    video.description.clear();
    video.title.clear();
    video.thumbnails = Thumbnails::default();

    let mut channel = strong_channel(1);
    channel.subscriber_count = 0;
    channel.total_views = 0;
    channel.video_count = 0;
    channel.recent_uploads.clear();

    let metrics = service
        .calculate_video_quality(&video, &channel, Some("rust"), fixed_now())
        .unwrap();

    assert_eq!(metrics.engagement_score, 0.0);
    for score in metrics.sub_scores() {
        assert!(score.is_finite());
        assert!(in_unit_range(score));
    }
    assert!(in_unit_range(metrics.overall_score));
    assert!((metrics.confidence - 1.0).abs() < 1e-6);
}

#[test]
fn exact_title_match_beats_unrelated_title() {
    let service = QualityService::default();
    let channel = strong_channel(1);

    let mut matching = strong_video(3, 1);
    matching.title = "Funny Cats Compilation".to_string();
    matching.description.clear();

    let mut unrelated = strong_video(4, 1);
    unrelated.title = "Quarterly tax filing basics".to_string();
    unrelated.description.clear();

    let matching_metrics = service
        .calculate_video_quality(&matching, &channel, Some("cats"), fixed_now())
        .unwrap();
    let unrelated_metrics = service
        .calculate_video_quality(&unrelated, &channel, Some("cats"), fixed_now())
        .unwrap();

    // exact title hit (0.5 of the exact score) plus full title term overlap
    assert!((matching_metrics.relevancy_score - (0.4 * 0.5 + 0.3)).abs() < 1e-6);
    assert_eq!(unrelated_metrics.relevancy_score, 0.0);
    assert!(matching_metrics.relevancy_score > unrelated_metrics.relevancy_score);
}

#[test]
fn blank_query_counts_as_no_query() {
    let service = QualityService::default();
    let channel = strong_channel(1);
    let video = strong_video(5, 1);

    let metrics = service
        .calculate_video_quality(&video, &channel, Some("   "), fixed_now())
        .unwrap();
    assert_eq!(metrics.relevancy_score, 1.0);
}

#[test]
fn freshness_decays_to_zero_after_a_year() {
    let service = QualityService::default();
    let now = fixed_now();

    assert!((service.freshness_score(now, now) - 1.0).abs() < 1e-9);
    let half = service.freshness_score(now - Duration::days(365) / 2, now);
    assert!((half - 0.5).abs() < 0.01);
    assert_eq!(service.freshness_score(now - Duration::days(800), now), 0.0);
}

#[test]
fn mismatched_channel_is_a_computation_error() {
    let service = QualityService::default();
    let video = strong_video(6, 1);
    let other_channel = strong_channel(2);

    let err = service
        .calculate_video_quality(&video, &other_channel, None, fixed_now())
        .unwrap_err();
    assert!(!err.is_retryable());
}

#[test]
fn report_exposes_unweighted_metrics() {
    let service = QualityService::new(QualityConfig::default());
    let video = strong_video(7, 1);
    let channel = strong_channel(1);

    let report = service.assess(&video, &channel, None, fixed_now()).unwrap();

    assert!((report.authority.consistency_score - 1.0).abs() < 1e-6);
    assert!(report.authority.is_verified);
    assert!((report.authority.avg_video_views - 100_000.0).abs() < 1e-6);
    assert_eq!(report.engagement.total_engagements, 5_500);
    assert!(in_unit_range(report.content.thumbnail_quality));
    assert!(in_unit_range(report.content.production_value));
    assert!(in_unit_range(report.content.audio_quality));
    assert!(report.keywords.contains(&"walkthrough".to_string()));
}

#[test]
fn overall_quality_normalises_by_weight_sum() {
    let service = QualityService::default();
    let video = strong_video(8, 1);
    let channel = strong_channel(1);
    let metrics = service
        .calculate_video_quality(&video, &channel, None, fixed_now())
        .unwrap();

    let weights = QualityWeights {
        engagement: 2.0,
        authority: 0.0,
        quality: 0.0,
        freshness: 0.0,
        relevancy: 2.0,
    };
    let overall = service.calculate_overall_quality(&metrics, &weights);
    let expected = (metrics.engagement_score + metrics.relevancy_score) / 2.0;
    assert!((overall.score - expected).abs() < 1e-6);
    assert!((overall.confidence - 1.0).abs() < 1e-6);
}
