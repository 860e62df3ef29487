use serde::{Deserialize, Serialize};

use crate::input::CompetitorRecord;
use crate::normalize::normalize_magnitude;
use crate::stats::{self, round2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementQuality {
    Excellent,
    Good,
    Average,
    Poor,
    VeryPoorOrFakeFollowers,
    InsufficientData,
}

impl EngagementQuality {
    /// Classifies the likes-to-followers ratio. Every threshold is an
    /// exclusive lower bound, so a ratio of exactly 0.9 is `Good`.
    pub fn assess(likes: u64, followers: u64) -> Self {
        if followers == 0 {
            return EngagementQuality::InsufficientData;
        }

        let ratio = likes as f64 / followers as f64;
        if ratio > 0.9 {
            EngagementQuality::Excellent
        } else if ratio > 0.7 {
            EngagementQuality::Good
        } else if ratio > 0.5 {
            EngagementQuality::Average
        } else if ratio > 0.2 {
            EngagementQuality::Poor
        } else {
            EngagementQuality::VeryPoorOrFakeFollowers
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EngagementQuality::Excellent => "excellent",
            EngagementQuality::Good => "good",
            EngagementQuality::Average => "average",
            EngagementQuality::Poor => "poor",
            EngagementQuality::VeryPoorOrFakeFollowers => "very_poor_or_fake_followers",
            EngagementQuality::InsufficientData => "insufficient_data",
        }
    }

    pub fn is_weak(self) -> bool {
        matches!(
            self,
            EngagementQuality::Poor | EngagementQuality::VeryPoorOrFakeFollowers
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReelViewStats {
    pub total_views: u64,
    pub average_views: f64,
    pub median_views: f64,
    pub max_views: u64,
    pub min_views: u64,
    pub views_distribution: Vec<u64>,
}

impl ReelViewStats {
    pub fn from_views(views: Vec<u64>) -> Self {
        if views.is_empty() {
            return Self::default();
        }

        let samples: Vec<f64> = views.iter().map(|value| *value as f64).collect();
        Self {
            total_views: views.iter().fold(0u64, |acc, value| acc.saturating_add(*value)),
            average_views: round2(stats::mean(&samples).unwrap_or(0.0)),
            median_views: stats::median(&samples).unwrap_or(0.0),
            max_views: views.iter().copied().max().unwrap_or(0),
            min_views: views.iter().copied().min().unwrap_or(0),
            views_distribution: views,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub likes: u64,
    pub followers: u64,
    pub like_to_follower_ratio: f64,
    pub engagement_quality: EngagementQuality,
    pub total_reels: usize,
    pub reel_views: ReelViewStats,
    pub content_performance_score: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EngagementCalculator;

impl EngagementCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(&self, record: &CompetitorRecord) -> EngagementMetrics {
        let likes = normalize_magnitude(&record.likes);
        let followers = normalize_magnitude(&record.followers);
        let views: Vec<u64> = record
            .reel_views
            .iter()
            .map(|value| normalize_magnitude(value))
            .collect();

        let content_performance_score = content_score(&views, followers);

        EngagementMetrics {
            likes,
            followers,
            like_to_follower_ratio: like_ratio(likes, followers),
            engagement_quality: EngagementQuality::assess(likes, followers),
            total_reels: views.len(),
            reel_views: ReelViewStats::from_views(views),
            content_performance_score,
        }
    }
}

/// Likes as a percentage of followers, `0` without followers.
pub fn like_ratio(likes: u64, followers: u64) -> f64 {
    if followers == 0 {
        return 0.0;
    }
    round2(likes as f64 / followers as f64 * 100.0)
}

/// Mean reel views as a percentage of followers.
pub fn content_score(views: &[u64], followers: u64) -> f64 {
    if views.is_empty() || followers == 0 {
        return 0.0;
    }
    let samples: Vec<f64> = views.iter().map(|value| *value as f64).collect();
    let average = stats::mean(&samples).unwrap_or(0.0);
    round2(average / followers as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_labels_follow_exclusive_thresholds() {
        let cases = [
            (950, 1000, EngagementQuality::Excellent),
            (901, 1000, EngagementQuality::Excellent),
            (900, 1000, EngagementQuality::Good),
            (701, 1000, EngagementQuality::Good),
            (700, 1000, EngagementQuality::Average),
            (501, 1000, EngagementQuality::Average),
            (500, 1000, EngagementQuality::Poor),
            (201, 1000, EngagementQuality::Poor),
            (200, 1000, EngagementQuality::VeryPoorOrFakeFollowers),
            (100, 1000, EngagementQuality::VeryPoorOrFakeFollowers),
            (0, 1000, EngagementQuality::VeryPoorOrFakeFollowers),
            (0, 0, EngagementQuality::InsufficientData),
            (500, 0, EngagementQuality::InsufficientData),
        ];
        for (likes, followers, expected) in cases {
            assert_eq!(
                EngagementQuality::assess(likes, followers),
                expected,
                "likes {} followers {}",
                likes,
                followers
            );
        }
        assert_eq!(EngagementQuality::assess(950, 1000).label(), "excellent");
    }

    #[test]
    fn only_poor_and_very_poor_are_weak() {
        assert!(EngagementQuality::Poor.is_weak());
        assert!(EngagementQuality::VeryPoorOrFakeFollowers.is_weak());
        assert!(!EngagementQuality::Average.is_weak());
        assert!(!EngagementQuality::InsufficientData.is_weak());
    }
}
