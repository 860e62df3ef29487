pub mod config;
pub mod error;
pub mod input;
pub mod insights;
pub mod market;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod summary;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::AnalyzerConfig;
use crate::insights::CompetitiveInsights;
use crate::market::MarketPosition;
use crate::metrics::{AdvertisingProfile, BusinessProfile, EngagementMetrics};
use crate::summary::{ExecutiveSummary, SummaryStatistics};

pub use crate::error::AnalysisError;
pub use crate::input::{CompetitorRecord, Dataset, RawDataset, SkippedRecord};
pub use crate::normalize::normalize_magnitude;
pub use crate::pipeline::AnalysisPipeline;

/// Every derived view of one competitor page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorAnalysis {
    pub page_name: String,
    pub page_url: Option<String>,
    pub engagement: EngagementMetrics,
    pub business: BusinessProfile,
    pub advertising: AdvertisingProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    pub extraction_timestamp: Option<String>,
    pub analysis_date: DateTime<Utc>,
    pub total_competitors: usize,
    pub skipped_records: Vec<SkippedRecord>,
    pub source_digest: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub metadata: AnalysisMetadata,
    pub competitors: Vec<CompetitorAnalysis>,
    pub market_position: BTreeMap<String, MarketPosition>,
    pub competitive_insights: CompetitiveInsights,
    pub summary_statistics: SummaryStatistics,
    pub executive_summary: ExecutiveSummary,
}

impl AnalysisResult {
    pub fn position_of(&self, page_name: &str) -> Option<&MarketPosition> {
        self.market_position.get(page_name)
    }

    /// Market positions from most to least competitive. Equal scores keep
    /// name order.
    pub fn ranked_positions(&self) -> Vec<(&str, &MarketPosition)> {
        let mut ranked: Vec<(&str, &MarketPosition)> = self
            .market_position
            .iter()
            .map(|(name, position)| (name.as_str(), position))
            .collect();
        ranked.sort_by(|a, b| {
            b.1.overall_competitiveness
                .partial_cmp(&a.1.overall_competitiveness)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }
}

pub fn analyze(dataset: &Dataset, config: &AnalyzerConfig) -> Result<AnalysisResult, AnalysisError> {
    analyze_at(dataset, config, Utc::now())
}

/// Deterministic entry point: the same dataset, config and date always
/// produce the same result.
pub fn analyze_at(
    dataset: &Dataset,
    config: &AnalyzerConfig,
    analysis_date: DateTime<Utc>,
) -> Result<AnalysisResult, AnalysisError> {
    AnalysisPipeline::from_config(config).run(dataset, analysis_date)
}

/// Rounds to a whole number and groups thousands with commas.
pub fn format_number(value: f64) -> String {
    let digits = (value.round().max(0.0) as u64).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a value that is already a percentage.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_group_by_thousands() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.4), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1_234_567.6), "1,234,568");
        assert_eq!(format_number(-12.0), "0");
    }

    #[test]
    fn percent_keeps_two_decimals() {
        assert_eq!(format_percent(66.666), "66.67%");
        assert_eq!(format_float(2.0, 1), "2.0");
    }
}
