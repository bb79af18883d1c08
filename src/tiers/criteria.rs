use serde::{Deserialize, Serialize};

use crate::clamp01;
use crate::config::TierConfig;
use crate::model::UserPreferences;

/// Share of a preference's excess over the tier-1 default carried into the
/// second and third tiers.
const TIER2_PROPAGATION: f64 = 0.8;
const TIER3_PROPAGATION: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierCriteria {
    pub tier: u8,
    pub name: String,
    pub min_authority_score: f64,
    pub min_quality_score: f64,
    pub min_engagement_score: f64,
    pub min_relevancy_score: f64,
    pub min_view_count: u64,
    /// Seconds.
    pub min_duration: u64,
    /// Seconds.
    pub max_duration: u64,
    pub max_age_in_days: u32,
    pub requires_completeness: bool,
}

impl TierCriteria {
    pub fn optimal() -> Self {
        Self {
            tier: 1,
            name: "optimal".to_string(),
            min_authority_score: 0.5,
            min_quality_score: 0.5,
            min_engagement_score: 0.5,
            min_relevancy_score: 0.5,
            min_view_count: 1000,
            min_duration: 60,
            max_duration: 3600,
            max_age_in_days: 365,
            requires_completeness: true,
        }
    }

    pub fn balanced() -> Self {
        Self {
            tier: 2,
            name: "balanced".to_string(),
            min_authority_score: 0.35,
            min_quality_score: 0.35,
            min_engagement_score: 0.35,
            min_relevancy_score: 0.35,
            min_view_count: 500,
            min_duration: 45,
            max_duration: 4500,
            max_age_in_days: 730,
            requires_completeness: true,
        }
    }

    pub fn minimum_viable() -> Self {
        Self {
            tier: 3,
            name: "minimum-viable".to_string(),
            min_authority_score: 0.2,
            min_quality_score: 0.2,
            min_engagement_score: 0.2,
            min_relevancy_score: 0.2,
            min_view_count: 200,
            min_duration: 30,
            max_duration: 5400,
            max_age_in_days: 1095,
            requires_completeness: false,
        }
    }

    /// True when every threshold of `self` is at least as strict as `other`'s.
    pub fn at_least_as_strict_as(&self, other: &TierCriteria) -> bool {
        self.min_authority_score >= other.min_authority_score
            && self.min_quality_score >= other.min_quality_score
            && self.min_engagement_score >= other.min_engagement_score
            && self.min_relevancy_score >= other.min_relevancy_score
            && self.min_view_count >= other.min_view_count
            && self.min_duration >= other.min_duration
            && self.max_duration <= other.max_duration
            && self.max_age_in_days <= other.max_age_in_days
            && (self.requires_completeness || !other.requires_completeness)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredQualityCriteria {
    pub tier1: TierCriteria,
    pub tier2: TierCriteria,
    pub tier3: TierCriteria,
    /// Loosest tier the filter may relax to.
    pub minimum_acceptable_tier: u8,
    pub strict_transition: bool,
}

impl TieredQualityCriteria {
    pub fn tier(&self, tier: u8) -> Option<&TierCriteria> {
        match tier {
            1 => Some(&self.tier1),
            2 => Some(&self.tier2),
            3 => Some(&self.tier3),
            _ => None,
        }
    }

    pub fn tiers(&self) -> [&TierCriteria; 3] {
        [&self.tier1, &self.tier2, &self.tier3]
    }

    pub fn last_tier(&self) -> u8 {
        self.minimum_acceptable_tier.clamp(1, 3)
    }
}

#[derive(Debug, Clone)]
pub struct TierCriteriaGenerator {
    defaults: [TierCriteria; 3],
    config: TierConfig,
}

impl Default for TierCriteriaGenerator {
    fn default() -> Self {
        Self::new(TierConfig::default())
    }
}

impl TierCriteriaGenerator {
    pub fn new(config: TierConfig) -> Self {
        Self {
            defaults: [
                TierCriteria::optimal(),
                TierCriteria::balanced(),
                TierCriteria::minimum_viable(),
            ],
            config,
        }
    }

    /// Derives the three tiers from the defaults, tightening them where the
    /// caller asks for more than tier 1 offers.
    pub fn generate(&self, preferences: &UserPreferences) -> TieredQualityCriteria {
        let [mut tier1, mut tier2, mut tier3] = self.defaults.clone();

        if let Some([t1, t2, t3]) =
            raise_scores(tier1.min_authority_score, preferences.min_authority_score)
        {
            tier1.min_authority_score = t1;
            tier2.min_authority_score = t2;
            tier3.min_authority_score = t3;
        }
        if let Some([t1, t2, t3]) =
            raise_scores(tier1.min_quality_score, preferences.min_quality_score)
        {
            tier1.min_quality_score = t1;
            tier2.min_quality_score = t2;
            tier3.min_quality_score = t3;
        }
        if let Some([t1, t2, t3]) =
            raise_scores(tier1.min_engagement_score, preferences.min_engagement_score)
        {
            tier1.min_engagement_score = t1;
            tier2.min_engagement_score = t2;
            tier3.min_engagement_score = t3;
        }
        if let Some([t1, t2, t3]) =
            raise_scores(tier1.min_relevancy_score, preferences.min_relevancy_score)
        {
            tier1.min_relevancy_score = t1;
            tier2.min_relevancy_score = t2;
            tier3.min_relevancy_score = t3;
        }
        if let Some([v1, v2, v3]) = raise_counts(tier1.min_view_count, preferences.min_view_count)
        {
            tier1.min_view_count = v1;
            tier2.min_view_count = v2;
            tier3.min_view_count = v3;
        }
        if let Some([d1, d2, d3]) = raise_counts(tier1.min_duration, preferences.min_duration) {
            tier1.min_duration = d1;
            tier2.min_duration = d2;
            tier3.min_duration = d3;
        }
        if let Some([d1, d2, d3]) = lower_counts(tier1.max_duration, preferences.max_duration) {
            tier1.max_duration = d1;
            tier2.max_duration = d2;
            tier3.max_duration = d3;
        }
        if let Some([m1, m2, m3]) = lower_counts(
            u64::from(tier1.max_age_in_days),
            u64::from(preferences.max_content_age),
        ) {
            tier1.max_age_in_days = m1 as u32;
            tier2.max_age_in_days = m2 as u32;
            tier3.max_age_in_days = m3 as u32;
        }

        TieredQualityCriteria {
            tier1,
            tier2,
            tier3,
            minimum_acceptable_tier: self.config.minimum_acceptable_tier.clamp(1, 3),
            strict_transition: self.config.strict_transition,
        }
    }
}

/// Tightened minimums for the three tiers when the preference exceeds the
/// tier-1 default. Every tier is offset from the tier-1 default.
fn raise_scores(default: f64, preference: f64) -> Option<[f64; 3]> {
    let preference = clamp01(preference);
    let excess = preference - default;
    if excess <= 0.0 {
        return None;
    }
    Some([
        preference,
        clamp01(default + excess * TIER2_PROPAGATION),
        clamp01(default + excess * TIER3_PROPAGATION),
    ])
}

fn raise_counts(default: u64, preference: u64) -> Option<[u64; 3]> {
    if preference <= default {
        return None;
    }
    let excess = (preference - default) as f64;
    Some([
        preference,
        default + (excess * TIER2_PROPAGATION).round() as u64,
        default + (excess * TIER3_PROPAGATION).round() as u64,
    ])
}

fn lower_counts(default: u64, preference: u64) -> Option<[u64; 3]> {
    if preference >= default {
        return None;
    }
    let deficit = (default - preference) as f64;
    Some([
        preference,
        default.saturating_sub((deficit * TIER2_PROPAGATION).round() as u64),
        default.saturating_sub((deficit * TIER3_PROPAGATION).round() as u64),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_ordered() {
        let optimal = TierCriteria::optimal();
        let balanced = TierCriteria::balanced();
        let minimum = TierCriteria::minimum_viable();
        assert!(optimal.at_least_as_strict_as(&balanced));
        assert!(balanced.at_least_as_strict_as(&minimum));
    }

    #[test]
    fn lower_counts_shrinks_maximums_proportionally() {
        assert_eq!(lower_counts(3600, 1600), Some([1600, 2000, 2400]));
        assert_eq!(lower_counts(3600, 3600), None);
    }

    #[test]
    fn raise_counts_ignores_weaker_preferences() {
        assert_eq!(raise_counts(1000, 200), None);
        assert_eq!(raise_counts(1000, 6000), Some([6000, 5000, 4000]));
    }
}
