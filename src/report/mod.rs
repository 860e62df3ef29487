//! Report rendering. The writer receives a finished [`AnalysisResult`] and
//! an explicit [`ReportConfig`]; nothing here feeds back into the analysis.

pub mod csv;
pub mod json;
pub mod markdown;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::config::ReportConfig;
use crate::error::AnalysisError;
use crate::AnalysisResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Markdown,
    Csv,
}

impl ReportFormat {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" | "document" | "doc" => Some(ReportFormat::Markdown),
            "csv" | "sheets" | "spreadsheet" => Some(ReportFormat::Csv),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportPaths {
    pub json: Option<PathBuf>,
    pub markdown: Option<PathBuf>,
    pub csv: Vec<PathBuf>,
}

impl ReportPaths {
    pub fn all(&self) -> Vec<&Path> {
        self.json
            .iter()
            .chain(self.markdown.iter())
            .chain(self.csv.iter())
            .map(PathBuf::as_path)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ReportWriter {
    config: ReportConfig,
    stamp: String,
}

impl ReportWriter {
    pub fn new(config: ReportConfig, stamp: impl Into<String>) -> Self {
        Self {
            config,
            stamp: stamp.into(),
        }
    }

    /// Stamps file names with the result's analysis date.
    pub fn for_result(config: ReportConfig, result: &AnalysisResult) -> Self {
        let stamp = result
            .metadata
            .analysis_date
            .format("%Y%m%d_%H%M%S")
            .to_string();
        Self::new(config, stamp)
    }

    /// Stamp with milliseconds and a digest prefix, for writers that may run
    /// several times within one second.
    pub fn for_request(config: ReportConfig, result: &AnalysisResult) -> Self {
        let digest: String = result.metadata.source_digest.chars().take(8).collect();
        let mut stamp = result
            .metadata
            .analysis_date
            .format("%Y%m%d_%H%M%S_%3f")
            .to_string();
        if !digest.is_empty() {
            stamp.push('_');
            stamp.push_str(&digest);
        }
        Self::new(config, stamp)
    }

    pub fn base_name(&self) -> String {
        format!("{}_{}", self.config.file_prefix, self.stamp)
    }

    pub fn write_all(&self, result: &AnalysisResult) -> Result<ReportPaths, AnalysisError> {
        if self.config.formats.is_empty() {
            return Err(AnalysisError::Report("no report formats configured".to_string()));
        }
        let dir = &self.config.output_dir;
        std::fs::create_dir_all(dir).map_err(|err| AnalysisError::io(dir, err))?;

        let base = self.base_name();
        let mut paths = ReportPaths::default();
        for format in &self.config.formats {
            match format {
                ReportFormat::Json => {
                    let path = dir.join(format!("{}.json", base));
                    write_file(&path, &json::render(result)?)?;
                    paths.json = Some(path);
                }
                ReportFormat::Markdown => {
                    let path = dir.join(format!("{}.md", base));
                    write_file(&path, &markdown::render(result))?;
                    paths.markdown = Some(path);
                }
                ReportFormat::Csv => {
                    for sheet in csv::sheets(result) {
                        let path = dir.join(format!("{}_{}.csv", base, sheet.name));
                        write_file(&path, &sheet.render())?;
                        paths.csv.push(path);
                    }
                }
            }
        }

        tracing::info!(
            dir = %dir.display(),
            files = paths.all().len(),
            "reports written"
        );
        Ok(paths)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), AnalysisError> {
    std::fs::write(path, contents).map_err(|err| AnalysisError::io(path, err))
}
