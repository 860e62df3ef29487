use serde::Serialize;

use crate::error::AnalysisError;
use crate::summary::{benchmarks, quick_insights, Benchmarks, QuickInsights};
use crate::AnalysisResult;

#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    #[serde(flatten)]
    pub result: &'a AnalysisResult,
    pub benchmarks: Benchmarks,
    pub quick_insights: QuickInsights,
}

impl<'a> JsonReport<'a> {
    pub fn build(result: &'a AnalysisResult) -> Result<Self, AnalysisError> {
        Ok(Self {
            result,
            benchmarks: benchmarks(&result.competitors)?,
            quick_insights: quick_insights(&result.competitors)?,
        })
    }
}

pub fn render(result: &AnalysisResult) -> Result<String, AnalysisError> {
    let report = JsonReport::build(result)?;
    serde_json::to_string_pretty(&report).map_err(|source| AnalysisError::Json {
        context: "json report".to_string(),
        source,
    })
}
