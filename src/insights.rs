//! Threshold-driven insights over a fully computed competitor set.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::AnalysisError;
use crate::market::MarketPosition;
use crate::stats::{self, round2};
use crate::{format_number, CompetitorAnalysis};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leader {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentOpportunity {
    pub competitor: String,
    pub performance_gap: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityKind {
    AdvertisingGap,
    EngagementWeakness,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub kind: OpportunityKind,
    pub competitor: String,
    pub opportunity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecommendation {
    pub benchmark: String,
    pub recommendation: String,
    pub potential_impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketGap {
    pub kind: String,
    pub gap: String,
    pub opportunity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveAdvantage {
    pub advantage: String,
    pub detail: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitiveInsights {
    pub market_leader: Leader,
    pub engagement_leader: Leader,
    pub advertising_gap: Vec<String>,
    pub content_opportunities: Vec<ContentOpportunity>,
    pub immediate_opportunities: Vec<Opportunity>,
    pub content_strategy: Vec<ContentRecommendation>,
    pub market_gaps: Vec<MarketGap>,
    pub competitive_advantages: Vec<CompetitiveAdvantage>,
}

pub fn generate_insights(
    competitors: &[CompetitorAnalysis],
    positions: &BTreeMap<String, MarketPosition>,
) -> Result<CompetitiveInsights, AnalysisError> {
    if competitors.is_empty() {
        return Err(AnalysisError::EmptyDataset { skipped: 0 });
    }

    let position_value = |competitor: &CompetitorAnalysis, pick: fn(&MarketPosition) -> f64| {
        positions
            .get(&competitor.page_name)
            .map(pick)
            .unwrap_or(0.0)
    };

    let market_leader = first_max(competitors, |competitor| {
        position_value(competitor, |position| position.estimated_market_share)
    });
    let engagement_leader = first_max(competitors, |competitor| {
        position_value(competitor, |position| position.overall_competitiveness)
    });

    let advertising_gap: Vec<String> = competitors
        .iter()
        .filter(|competitor| !competitor.advertising.is_advertising)
        .map(|competitor| competitor.page_name.clone())
        .collect();

    Ok(CompetitiveInsights {
        market_leader,
        engagement_leader,
        advertising_gap,
        content_opportunities: content_opportunities(competitors),
        immediate_opportunities: immediate_opportunities(competitors),
        content_strategy: content_strategy(competitors),
        market_gaps: market_gaps(competitors),
        competitive_advantages: competitive_advantages(competitors),
    })
}

/// Competitors scoring below the set's mean content performance.
pub fn content_opportunities(competitors: &[CompetitorAnalysis]) -> Vec<ContentOpportunity> {
    let scores: Vec<f64> = competitors
        .iter()
        .map(|competitor| competitor.engagement.content_performance_score)
        .collect();
    let Some(average) = stats::mean(&scores) else {
        return Vec::new();
    };

    competitors
        .iter()
        .filter(|competitor| competitor.engagement.content_performance_score < average)
        .map(|competitor| ContentOpportunity {
            competitor: competitor.page_name.clone(),
            performance_gap: round2(average - competitor.engagement.content_performance_score),
        })
        .collect()
}

fn immediate_opportunities(competitors: &[CompetitorAnalysis]) -> Vec<Opportunity> {
    let mut opportunities = Vec::new();
    for competitor in competitors {
        let name = &competitor.page_name;
        if !competitor.advertising.is_advertising {
            opportunities.push(Opportunity {
                kind: OpportunityKind::AdvertisingGap,
                competitor: name.clone(),
                opportunity: format!(
                    "Enter paid advertising market - {} has {} followers but no ads",
                    name,
                    format_number(competitor.engagement.followers as f64)
                ),
            });
        }
        if competitor.engagement.engagement_quality.is_weak() {
            opportunities.push(Opportunity {
                kind: OpportunityKind::EngagementWeakness,
                competitor: name.clone(),
                opportunity: format!(
                    "Target {}'s audience with better engagement - they show signs of low-quality followers",
                    name
                ),
            });
        }
    }
    opportunities
}

fn content_strategy(competitors: &[CompetitorAnalysis]) -> Vec<ContentRecommendation> {
    if competitors.is_empty() {
        return Vec::new();
    }
    let best = first_max(competitors, |competitor| {
        competitor.engagement.reel_views.average_views
    });
    vec![ContentRecommendation {
        benchmark: format!(
            "{} averages {} views per reel",
            best.name,
            format_number(best.value)
        ),
        recommendation: "Analyze their top-performing content themes and formats".to_string(),
        potential_impact: "Could increase content performance by 2-5x based on gap analysis"
            .to_string(),
    }]
}

/// Raised only when every located competitor shares one location.
fn market_gaps(competitors: &[CompetitorAnalysis]) -> Vec<MarketGap> {
    let locations: BTreeSet<&str> = competitors
        .iter()
        .filter(|competitor| competitor.business.has_location())
        .map(|competitor| competitor.business.location.as_str())
        .collect();

    match locations.iter().next() {
        Some(location) if locations.len() == 1 => vec![MarketGap {
            kind: "geographic_concentration".to_string(),
            gap: format!("All competitors focus on {}", location),
            opportunity: "Geographic expansion to other cities/areas".to_string(),
        }],
        _ => Vec::new(),
    }
}

fn competitive_advantages(competitors: &[CompetitorAnalysis]) -> Vec<CompetitiveAdvantage> {
    let mut advantages = Vec::new();

    let advertisers: Vec<&CompetitorAnalysis> = competitors
        .iter()
        .filter(|competitor| competitor.advertising.is_advertising)
        .collect();
    if let [only] = advertisers.as_slice() {
        advantages.push(CompetitiveAdvantage {
            advantage: "Low advertising competition".to_string(),
            detail: format!("Only {} is actively advertising", only.page_name),
            action: "Enter advertising market with aggressive campaigns".to_string(),
        });
    }

    let platform_counts: Vec<f64> = competitors
        .iter()
        .map(|competitor| competitor.business.cross_platform.total_platforms as f64)
        .collect();
    if let Some(average) = stats::mean(&platform_counts) {
        if average < 2.0 {
            advantages.push(CompetitiveAdvantage {
                advantage: "Poor cross-platform integration".to_string(),
                detail: format!("Competitors average only {:.1} platforms", average),
                action: "Develop strong multi-platform presence (TikTok, Instagram, WhatsApp Business)"
                    .to_string(),
            });
        }
    }

    advantages
}

/// Highest value wins; ties keep the earliest competitor.
pub(crate) fn first_max<F>(competitors: &[CompetitorAnalysis], value: F) -> Leader
where
    F: Fn(&CompetitorAnalysis) -> f64,
{
    let mut best: Option<Leader> = None;
    for competitor in competitors {
        let candidate = value(competitor);
        let replace = match &best {
            Some(leader) => candidate > leader.value,
            None => true,
        };
        if replace {
            best = Some(Leader {
                name: competitor.page_name.clone(),
                value: candidate,
            });
        }
    }
    best.unwrap_or(Leader {
        name: String::new(),
        value: 0.0,
    })
}
