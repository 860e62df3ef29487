//! Dataset-wide aggregates: summary statistics, the executive summary and
//! distribution benchmarks.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::insights::first_max;
use crate::stats::{self, round2};
use crate::{format_number, CompetitorAnalysis};

const DOMINANT_SHARE_PERCENT: f64 = 75.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub total_combined_followers: u64,
    pub average_followers: f64,
    pub average_content_performance: f64,
    pub advertising_adoption_rate: f64,
    pub cross_platform_adoption: f64,
}

pub fn summarize(competitors: &[CompetitorAnalysis]) -> Result<SummaryStatistics, AnalysisError> {
    let empty = || AnalysisError::EmptyDataset { skipped: 0 };
    if competitors.is_empty() {
        return Err(empty());
    }

    let followers: Vec<f64> = competitors
        .iter()
        .map(|competitor| competitor.engagement.followers as f64)
        .collect();
    let performance: Vec<f64> = competitors
        .iter()
        .map(|competitor| competitor.engagement.content_performance_score)
        .collect();
    let platforms: Vec<f64> = competitors
        .iter()
        .map(|competitor| competitor.business.cross_platform.total_platforms as f64)
        .collect();
    let advertisers = competitors
        .iter()
        .filter(|competitor| competitor.advertising.is_advertising)
        .count();

    Ok(SummaryStatistics {
        total_combined_followers: total_followers(competitors),
        average_followers: round2(stats::mean(&followers).ok_or_else(empty)?),
        average_content_performance: round2(stats::mean(&performance).ok_or_else(empty)?),
        advertising_adoption_rate: round2(advertisers as f64 / competitors.len() as f64 * 100.0),
        cross_platform_adoption: round2(stats::mean(&platforms).ok_or_else(empty)?),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketOverview {
    pub total_market_size: String,
    pub market_leader: String,
    pub leader_market_share: String,
    pub average_engagement_quality: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyOpportunities {
    pub advertising_gaps: String,
    pub engagement_weakness: usize,
    pub cross_platform_gaps: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub market_overview: MarketOverview,
    pub key_opportunities: KeyOpportunities,
    pub strategic_recommendations: Vec<String>,
    pub risk_assessment: String,
}

pub fn executive_summary(
    competitors: &[CompetitorAnalysis],
    summary: &SummaryStatistics,
) -> Result<ExecutiveSummary, AnalysisError> {
    if competitors.is_empty() {
        return Err(AnalysisError::EmptyDataset { skipped: 0 });
    }

    let total = total_followers(competitors);
    let leader = first_max(competitors, |competitor| competitor.engagement.followers as f64);
    let leader_share = if total > 0 {
        leader.value / total as f64 * 100.0
    } else {
        0.0
    };
    let best_content = first_max(competitors, |competitor| {
        competitor.engagement.reel_views.average_views
    });

    let ad_gaps = competitors
        .iter()
        .filter(|competitor| !competitor.advertising.is_advertising)
        .count();
    let engagement_weakness = competitors
        .iter()
        .filter(|competitor| competitor.engagement.engagement_quality.is_weak())
        .count();
    let cross_platform_gaps = competitors
        .iter()
        .filter(|competitor| competitor.business.cross_platform.total_platforms < 2)
        .count();

    let risk_assessment = if leader_share > DOMINANT_SHARE_PERCENT {
        format!(
            "High - {} controls {:.1}% of the combined audience",
            leader.name, leader_share
        )
    } else {
        format!(
            "Low - market shows fragmentation with no dominant player controlling >{:.0}% market share",
            DOMINANT_SHARE_PERCENT
        )
    };

    Ok(ExecutiveSummary {
        market_overview: MarketOverview {
            total_market_size: format!("{} combined followers", format_number(total as f64)),
            market_leader: leader.name,
            leader_market_share: format!("{:.1}%", leader_share),
            average_engagement_quality: summary.average_content_performance,
        },
        key_opportunities: KeyOpportunities {
            advertising_gaps: format!(
                "{} out of {} competitors not advertising",
                ad_gaps,
                competitors.len()
            ),
            engagement_weakness,
            cross_platform_gaps,
        },
        strategic_recommendations: vec![
            "Enter paid advertising market immediately - low competition".to_string(),
            "Focus on authentic engagement vs follower count".to_string(),
            "Develop strong cross-platform presence".to_string(),
            "Target geographic expansion opportunities".to_string(),
            format!("Benchmark content against {}'s performance", best_content.name),
        ],
        risk_assessment,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub q25: f64,
    pub q75: f64,
}

impl Benchmark {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let (q25, q75) = stats::quartiles(values)?;
        Some(Self {
            min: stats::min(values)?,
            max: stats::max(values)?,
            median: stats::median(values)?,
            q25,
            q75,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmarks {
    pub follower_benchmarks: Benchmark,
    pub view_benchmarks: Benchmark,
    pub performance_benchmarks: Benchmark,
}

pub fn benchmarks(competitors: &[CompetitorAnalysis]) -> Result<Benchmarks, AnalysisError> {
    let column = |pick: fn(&CompetitorAnalysis) -> f64| -> Result<Benchmark, AnalysisError> {
        let values: Vec<f64> = competitors.iter().map(pick).collect();
        Benchmark::from_values(&values).ok_or(AnalysisError::EmptyDataset { skipped: 0 })
    };

    Ok(Benchmarks {
        follower_benchmarks: column(|competitor| competitor.engagement.followers as f64)?,
        view_benchmarks: column(|competitor| competitor.engagement.reel_views.average_views)?,
        performance_benchmarks: column(|competitor| {
            competitor.engagement.content_performance_score
        })?,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickInsights {
    pub top_performer_by_followers: String,
    pub top_performer_by_engagement: String,
    pub most_active_advertiser: String,
    pub most_cross_platform: String,
}

pub fn quick_insights(competitors: &[CompetitorAnalysis]) -> Result<QuickInsights, AnalysisError> {
    if competitors.is_empty() {
        return Err(AnalysisError::EmptyDataset { skipped: 0 });
    }

    Ok(QuickInsights {
        top_performer_by_followers: first_max(competitors, |competitor| {
            competitor.engagement.followers as f64
        })
        .name,
        top_performer_by_engagement: first_max(competitors, |competitor| {
            competitor.engagement.content_performance_score
        })
        .name,
        most_active_advertiser: first_max(competitors, |competitor| {
            competitor.advertising.total_active_ads as f64
        })
        .name,
        most_cross_platform: first_max(competitors, |competitor| {
            competitor.business.cross_platform.total_platforms as f64
        })
        .name,
    })
}

fn total_followers(competitors: &[CompetitorAnalysis]) -> u64 {
    competitors.iter().fold(0u64, |acc, competitor| {
        acc.saturating_add(competitor.engagement.followers)
    })
}
