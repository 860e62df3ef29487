use chrono::{DateTime, Utc};

use crate::config::AnalyzerConfig;
use crate::error::AnalysisError;
use crate::input::{CompetitorRecord, Dataset};
use crate::insights::generate_insights;
use crate::market::MarketRanker;
use crate::metrics::{AdvertisingAnalyzer, BusinessAnalyzer, EngagementCalculator, ThemeMatcher};
use crate::summary::{executive_summary, summarize};
use crate::{AnalysisMetadata, AnalysisResult, CompetitorAnalysis};

/// Runs the stages in order: per-competitor metrics, cross-competitor
/// ranking, insights, then summary. Each stage sees the complete output of
/// the one before it.
#[derive(Debug, Clone, Default)]
pub struct AnalysisPipeline {
    engagement: EngagementCalculator,
    business: BusinessAnalyzer,
    advertising: AdvertisingAnalyzer,
    ranker: MarketRanker,
}

impl AnalysisPipeline {
    pub fn new(
        engagement: EngagementCalculator,
        business: BusinessAnalyzer,
        advertising: AdvertisingAnalyzer,
        ranker: MarketRanker,
    ) -> Self {
        Self {
            engagement,
            business,
            advertising,
            ranker,
        }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self::new(
            EngagementCalculator::new(),
            BusinessAnalyzer::new(),
            AdvertisingAnalyzer::new(ThemeMatcher::new(config.themes.clone())),
            MarketRanker::new(config.competitiveness.clone()),
        )
    }

    pub fn analyze_competitor(&self, record: &CompetitorRecord) -> CompetitorAnalysis {
        let analysis = CompetitorAnalysis {
            page_name: record.page_name.clone(),
            page_url: record.page_url.clone(),
            engagement: self.engagement.calculate(record),
            business: self.business.analyze(&record.about),
            advertising: self.advertising.analyze(&record.ads),
        };
        tracing::debug!(
            page = %analysis.page_name,
            followers = analysis.engagement.followers,
            quality = analysis.engagement.engagement_quality.label(),
            "computed competitor metrics"
        );
        analysis
    }

    pub fn run(
        &self,
        dataset: &Dataset,
        analysis_date: DateTime<Utc>,
    ) -> Result<AnalysisResult, AnalysisError> {
        if dataset.records.is_empty() {
            return Err(AnalysisError::EmptyDataset {
                skipped: dataset.skipped.len(),
            });
        }

        tracing::info!(
            competitors = dataset.records.len(),
            skipped = dataset.skipped.len(),
            "analyzing competitor dataset"
        );

        let competitors: Vec<CompetitorAnalysis> = dataset
            .records
            .iter()
            .map(|record| self.analyze_competitor(record))
            .collect();

        let market_position = self.ranker.rank(&competitors);
        let competitive_insights = generate_insights(&competitors, &market_position)?;
        let summary_statistics = summarize(&competitors)?;
        let executive_summary = executive_summary(&competitors, &summary_statistics)?;

        Ok(AnalysisResult {
            metadata: AnalysisMetadata {
                extraction_timestamp: dataset.extraction_timestamp.clone(),
                analysis_date,
                total_competitors: competitors.len(),
                skipped_records: dataset.skipped.clone(),
                source_digest: dataset.source_digest.clone(),
            },
            competitors,
            market_position,
            competitive_insights,
            summary_statistics,
            executive_summary,
        })
    }
}
