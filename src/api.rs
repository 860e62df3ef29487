use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::path::Path;

use competitor_metrics::report::ReportPaths;
use competitor_metrics::{AnalysisError, AnalysisResult};

#[derive(Debug, Default, Deserialize)]
pub struct ApiAnalyzeQuery {
    pub reports: Option<bool>,
}

/// Report files as URLs under the `/reports` mount.
#[derive(Debug, Default, Serialize)]
pub struct ApiReportLinks {
    pub json: Option<String>,
    pub markdown: Option<String>,
    pub csv: Vec<String>,
}

impl ApiReportLinks {
    pub fn from_paths(paths: &ReportPaths) -> Self {
        Self {
            json: paths.json.as_deref().and_then(report_url),
            markdown: paths.markdown.as_deref().and_then(report_url),
            csv: paths.csv.iter().filter_map(|path| report_url(path)).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiAnalysisResponse {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub warnings: Vec<String>,
    pub reports: Option<ApiReportLinks>,
}

impl ApiAnalysisResponse {
    pub fn from_result(result: AnalysisResult, mut warnings: Vec<String>) -> Self {
        warnings.extend(
            result
                .metadata
                .skipped_records
                .iter()
                .map(|skipped| format!("record {} skipped: {}", skipped.index, skipped.reason)),
        );
        Self {
            result,
            warnings,
            reports: None,
        }
    }
}

pub fn error_status(err: &AnalysisError) -> StatusCode {
    match err {
        AnalysisError::EmptyDataset { .. } | AnalysisError::Json { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn report_url(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| format!("/reports/{}", name))
}
