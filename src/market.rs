use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::stats::round2;
use crate::CompetitorAnalysis;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitivenessWeights {
    pub follower_weight: f64,
    pub content_weight: f64,
    pub maturity_weight: f64,
    pub advertising_weight: f64,
    /// Follower count at which the follower component saturates at 100.
    pub follower_saturation: f64,
}

impl Default for CompetitivenessWeights {
    fn default() -> Self {
        Self {
            follower_weight: 0.3,
            content_weight: 0.3,
            maturity_weight: 0.2,
            advertising_weight: 0.2,
            follower_saturation: 10_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketPosition {
    pub estimated_market_share: f64,
    pub follower_rank: usize,
    pub engagement_rank: usize,
    pub overall_competitiveness: f64,
}

#[derive(Debug, Clone, Default)]
pub struct MarketRanker {
    weights: CompetitivenessWeights,
}

impl MarketRanker {
    pub fn new(weights: CompetitivenessWeights) -> Self {
        Self { weights }
    }

    /// Positions keyed by page name. A repeated name keeps the position of
    /// its last occurrence.
    pub fn rank(&self, competitors: &[CompetitorAnalysis]) -> BTreeMap<String, MarketPosition> {
        let followers: Vec<f64> = competitors
            .iter()
            .map(|competitor| competitor.engagement.followers as f64)
            .collect();
        let views: Vec<f64> = competitors
            .iter()
            .map(|competitor| competitor.engagement.reel_views.average_views)
            .collect();
        let total_followers: f64 = followers.iter().sum();
        let followers_desc = sorted_descending(&followers);
        let views_desc = sorted_descending(&views);

        let mut positions = BTreeMap::new();
        for (idx, competitor) in competitors.iter().enumerate() {
            let market_share = if total_followers > 0.0 {
                followers[idx] / total_followers * 100.0
            } else {
                0.0
            };

            let position = MarketPosition {
                estimated_market_share: round2(market_share),
                follower_rank: rank_of(&followers_desc, followers[idx]),
                engagement_rank: rank_of(&views_desc, views[idx]),
                overall_competitiveness: self.competitiveness(competitor),
            };

            if positions
                .insert(competitor.page_name.clone(), position)
                .is_some()
            {
                tracing::warn!(
                    page = %competitor.page_name,
                    "duplicate page name; market position overwritten"
                );
            }
        }

        positions
    }

    /// Weighted 0-100 composite of follower scale, content performance,
    /// business maturity and advertising presence.
    pub fn competitiveness(&self, competitor: &CompetitorAnalysis) -> f64 {
        let weights = &self.weights;
        let follower_score = if weights.follower_saturation > 0.0 {
            (competitor.engagement.followers as f64 / weights.follower_saturation * 100.0)
                .min(100.0)
        } else {
            0.0
        };
        let content_score = competitor.engagement.content_performance_score.min(100.0);
        let maturity_score = competitor.business.maturity.score();
        let advertising_score = if competitor.advertising.is_advertising {
            100.0
        } else {
            0.0
        };

        let total = follower_score * weights.follower_weight
            + content_score * weights.content_weight
            + maturity_score * weights.maturity_weight
            + advertising_score * weights.advertising_weight;

        if total.is_nan() {
            return 0.0;
        }
        round2(total).clamp(0.0, 100.0)
    }
}

/// One-based position of the first occurrence of `value` in a descending
/// list, so equal values share the rank of the first one.
fn rank_of(sorted_desc: &[f64], value: f64) -> usize {
    sorted_desc
        .iter()
        .position(|candidate| *candidate == value)
        .map(|idx| idx + 1)
        .unwrap_or(sorted_desc.len())
}

fn sorted_descending(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(Ordering::Equal));
    sorted
}
